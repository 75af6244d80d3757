//! SELECT 渲染。

use crate::dataset::Dataset;
use crate::error::Result;
use crate::literal::{literal, write_literal};
use crate::modifiers::raw;
use crate::string_builder::StringBuilder;
use crate::value::Value;

impl Dataset {
    /// 渲染 SELECT 语句。
    pub fn select_sql(&self) -> Result<String> {
        let opts = self.options();
        let mut buf = StringBuilder::new();

        buf.write_leading("SELECT");
        if opts.distinct {
            buf.write_str(" DISTINCT");
        }
        buf.write_str(" ");
        match &opts.select {
            Some(cols) => buf.write_str(&self.value_list(cols)?),
            None => buf.write_char('*'),
        }

        if !opts.from.is_empty() {
            buf.write_leading("FROM");
            buf.write_str(" ");
            buf.write_str(&self.source_list()?);
        }

        if let Some(w) = &opts.where_ {
            buf.write_leading("WHERE");
            buf.write_str(" ");
            buf.write_str(w.as_str());
        }

        if let Some(group) = &opts.group {
            buf.write_leading("GROUP BY");
            buf.write_str(" ");
            buf.write_str(&self.value_list(group)?);
        }

        if let Some(h) = &opts.having {
            buf.write_leading("HAVING");
            buf.write_str(" ");
            buf.write_str(h.as_str());
        }

        if let Some(order) = &opts.order {
            buf.write_leading("ORDER BY");
            buf.write_str(" ");
            buf.write_str(&self.value_list(order)?);
        }

        if let Some(limit) = opts.limit {
            buf.write_leading("LIMIT");
            buf.write_str(" ");
            buf.write_str(&limit.to_string());
        }
        if let Some(offset) = opts.offset {
            buf.write_leading("OFFSET");
            buf.write_str(" ");
            buf.write_str(&offset.to_string());
        }

        Ok(buf.into_string())
    }

    /// `select_sql` 的别名。
    pub fn sql(&self) -> Result<String> {
        self.select_sql()
    }

    /// `SELECT COUNT(*)`：分组、去重或带 limit 时对子查询计数。
    pub fn count_sql(&self) -> Result<String> {
        let opts = self.options();
        if opts.is_grouped() || opts.distinct || opts.limit.is_some() {
            return Ok(format!("SELECT COUNT(*) FROM ({}) AS t1", self.select_sql()?));
        }
        let mut counted = self.select(raw("COUNT(*)"));
        if opts.order.is_some() {
            counted = counted.order(());
        }
        counted.select_sql()
    }

    pub(crate) fn value_list(&self, values: &[Value]) -> Result<String> {
        let mut out = String::new();
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_literal(&mut out, v, self)?;
        }
        Ok(out)
    }

    /// FROM 列表：可内联的子 dataset 直接写表名，其余子 dataset 写成子查询。
    pub(crate) fn source_list(&self) -> Result<String> {
        let sources = self
            .options()
            .from
            .iter()
            .map(|v| match v {
                Value::Dataset(sub) => match sub.inline_source() {
                    Some(table) => literal(table, self),
                    None => literal(v, self),
                },
                _ => literal(v, self),
            })
            .collect::<Result<Vec<_>>>()?;
        let mut buf = StringBuilder::new();
        buf.write_strings(&sources, ", ");
        Ok(buf.into_string())
    }
}

//! UPDATE 渲染。

use crate::column::ColumnRef;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::literal::write_literal;
use crate::string_builder::StringBuilder;
use crate::value::Value;

impl Dataset {
    /// `UPDATE t SET a = 1, b = 'x' [WHERE ...]`。
    pub fn update_sql<K, V>(&self, values: impl IntoIterator<Item = (K, V)>) -> Result<String>
    where
        K: Into<ColumnRef>,
        V: Into<Value>,
    {
        let table = self.mutation_source("update")?;
        if self.options().is_grouped() {
            return Err(Error::GroupedMutation("update"));
        }

        let mut set = String::new();
        for (i, (k, v)) in values.into_iter().enumerate() {
            if i > 0 {
                set.push_str(", ");
            }
            set.push_str(&self.resolve_column(&k.into())?);
            set.push_str(" = ");
            write_literal(&mut set, &v.into(), self)?;
        }
        if set.is_empty() {
            return Err(Error::invalid_option("update requires at least one column"));
        }

        let mut buf = StringBuilder::new();
        buf.write_leading("UPDATE");
        buf.write_leading(&table);
        buf.write_leading("SET");
        buf.write_leading(&set);
        if let Some(w) = self.options().where_fragment() {
            buf.write_leading("WHERE");
            buf.write_leading(w.as_str());
        }
        Ok(buf.into_string())
    }
}

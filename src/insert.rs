//! INSERT 渲染。

use crate::column::ColumnRef;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::literal::write_literal;
use crate::value::Value;
use indexmap::IndexMap;

/// insert 的值：无值、列 => 值映射、或按位置的值列表。
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InsertValues {
    #[default]
    Default,
    Columns(Vec<(ColumnRef, Value)>),
    Values(Vec<Value>),
}

impl From<()> for InsertValues {
    fn from(_: ()) -> Self {
        Self::Default
    }
}

impl From<Vec<Value>> for InsertValues {
    fn from(v: Vec<Value>) -> Self {
        Self::Values(v)
    }
}

impl<K: Into<ColumnRef>, V: Into<Value>> From<Vec<(K, V)>> for InsertValues {
    fn from(v: Vec<(K, V)>) -> Self {
        Self::Columns(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<ColumnRef>, V: Into<Value>, const N: usize> From<[(K, V); N]> for InsertValues {
    fn from(v: [(K, V); N]) -> Self {
        Self::Columns(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<ColumnRef>, V: Into<Value>> From<IndexMap<K, V>> for InsertValues {
    fn from(v: IndexMap<K, V>) -> Self {
        Self::Columns(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Dataset {
    /// `INSERT INTO t DEFAULT VALUES` / `INSERT INTO t (a, b) VALUES (1, 2)` / `INSERT INTO t VALUES (...)`。
    pub fn insert_sql(&self, values: impl Into<InsertValues>) -> Result<String> {
        let table = self.mutation_source("insert")?;
        let mut sql = format!("INSERT INTO {table}");
        match values.into() {
            InsertValues::Default => sql.push_str(" DEFAULT VALUES"),
            InsertValues::Columns(pairs) if pairs.is_empty() => sql.push_str(" DEFAULT VALUES"),
            InsertValues::Values(values) if values.is_empty() => sql.push_str(" DEFAULT VALUES"),
            InsertValues::Columns(pairs) => {
                let mut cols = Vec::with_capacity(pairs.len());
                let mut vals = String::new();
                for (i, (c, v)) in pairs.iter().enumerate() {
                    cols.push(self.resolve_column(c)?);
                    if i > 0 {
                        vals.push_str(", ");
                    }
                    write_literal(&mut vals, v, self)?;
                }
                sql.push_str(&format!(" ({}) VALUES ({vals})", cols.join(", ")));
            }
            InsertValues::Values(values) => {
                sql.push_str(&format!(" VALUES ({})", self.value_list(&values)?));
            }
        }
        Ok(sql)
    }

    /// insert/update/delete 的目标表：必须恰好一个来源。
    pub(crate) fn mutation_source(&self, action: &'static str) -> Result<String> {
        match self.options().from.len() {
            0 => Err(Error::invalid_option(format!(
                "cannot {action} without a source table"
            ))),
            1 => self.source_list(),
            _ => Err(Error::MultiTableMutation(action)),
        }
    }
}

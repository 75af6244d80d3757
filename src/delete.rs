//! DELETE 渲染。

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::string_builder::StringBuilder;

impl Dataset {
    /// `DELETE FROM t [WHERE ...]`。
    pub fn delete_sql(&self) -> Result<String> {
        let table = self.mutation_source("delete")?;
        if self.options().is_grouped() {
            return Err(Error::GroupedMutation("delete"));
        }

        let mut buf = StringBuilder::new();
        buf.write_leading("DELETE FROM");
        buf.write_leading(&table);
        if let Some(w) = self.options().where_fragment() {
            buf.write_leading("WHERE");
            buf.write_leading(w.as_str());
        }
        Ok(buf.into_string())
    }
}

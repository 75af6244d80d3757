//! Database：持有可选的 backend 与配置，作为 Dataset 的工厂和语句执行入口。

use crate::backend::{Backend, Row, execute_logged};
use crate::config::Config;
use crate::create_table::{CreateTableBuilder, drop_table_sql};
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::macros::IntoColumns;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Database {
    backend: Option<Arc<dyn Backend>>,
    config: Config,
}

impl Database {
    /// 只生成 SQL、不执行的 Database。
    pub fn new(config: Config) -> Self {
        Self {
            backend: None,
            config,
        }
    }

    /// 挂载 backend，方言取自 backend。
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        let config = Config::from(backend.flavor());
        Self {
            backend: Some(backend),
            config,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dataset(&self) -> Dataset {
        match &self.backend {
            Some(b) => Dataset::with_backend(b.clone(), self.config),
            None => Dataset::new(self.config),
        }
    }

    /// `db.from("items")`。
    pub fn from(&self, sources: impl IntoColumns) -> Dataset {
        self.dataset().from(sources)
    }

    pub fn execute(&self, sql: &str) -> Result<Vec<Row>> {
        let backend = self.backend.as_deref().ok_or(Error::MissingBackend)?;
        execute_logged(backend, &self.config, sql)
    }

    pub fn create_table_sql(&self, builder: &CreateTableBuilder) -> Result<Vec<String>> {
        builder.build_with_config(&self.config)
    }

    /// 依次执行 CREATE TABLE 与 CREATE INDEX。
    pub fn create_table(&self, builder: &CreateTableBuilder) -> Result<()> {
        for sql in self.create_table_sql(builder)? {
            self.execute(&sql)?;
        }
        Ok(())
    }

    pub fn drop_table(&self, table: &str) -> Result<()> {
        let sql = drop_table_sql(&self.dataset().quote_identifier(table));
        self.execute(&sql)?;
        Ok(())
    }
}

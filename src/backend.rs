//! Backend：外部适配层的接口。本 crate 只调用 `execute` 和三个方言钩子，不持有连接。

use crate::config::Config;
use crate::error::Result;
use crate::flavor::Flavor;
use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;

/// 结果行：列名 => 值，保持列顺序。
pub type Row = IndexMap<String, Value>;

/// 适配层返回的错误（原样透传，不做解释）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("backend error: {0}")]
pub struct BackendError(pub String);

/// 数据库适配层。
pub trait Backend: fmt::Debug + Send + Sync {
    fn execute(&self, sql: &str) -> Result<Vec<Row>, BackendError>;

    fn flavor(&self) -> Flavor {
        Flavor::Generic
    }

    fn quote_identifier(&self, name: &str) -> String {
        self.flavor().quote_identifier(name)
    }

    fn literal_bool(&self, v: bool) -> String {
        self.flavor().bool_literal(v).to_string()
    }

    fn regex_operator(&self) -> String {
        self.flavor().regex_operator().to_string()
    }
}

/// 行装饰器：`all()` 返回前对每一行做转换（例如映射为记录对象前的预处理）。
pub trait RowDecorator: dyn_clone::DynClone + Send + Sync {
    fn decorate(&self, row: Row) -> Row;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

dyn_clone::clone_trait_object!(RowDecorator);

impl<F> RowDecorator for F
where
    F: Fn(Row) -> Row + Clone + Send + Sync,
{
    fn decorate(&self, row: Row) -> Row {
        self(row)
    }
}

impl fmt::Debug for dyn RowDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RowDecorator").field(&self.name()).finish()
    }
}

/// 执行一条语句并记录日志。
pub(crate) fn execute_logged(backend: &dyn Backend, config: &Config, sql: &str) -> Result<Vec<Row>> {
    tracing::debug!(
        target: "halo_dataset::sql",
        flavor = %config.flavor,
        sql = %config.truncate_for_log(sql),
        "executing statement",
    );
    backend.execute(sql).map_err(|e| {
        tracing::warn!(
            target: "halo_dataset::sql",
            error = %e,
            sql = %config.truncate_for_log(sql),
            "statement failed",
        );
        e.into()
    })
}

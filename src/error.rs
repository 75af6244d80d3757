//! 错误类型：所有错误都是构造查询时的编程错误，在出错点同步返回，不做重试。

use crate::backend::BackendError;

/// Dataset / 字面量 / 条件表达式的统一错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 值没有对应的 SQL 字面量编码。
    #[error("dataset unsupported literal type: {0}")]
    UnsupportedLiteralType(String),
    /// 表达式引用了无法解析的标识符、函数或运算符。
    #[error("dataset invalid expression: {0}")]
    InvalidExpression(String),
    /// 在已分组的 dataset 上调用 where，或在未分组的 dataset 上调用 having。
    #[error("dataset illegal filter context: {0}")]
    IllegalFilterContext(String),
    /// update/delete/insert 遇到多个 FROM 来源。
    #[error("dataset cannot {0} with multiple source tables")]
    MultiTableMutation(&'static str),
    /// update/delete 遇到 GROUP BY。
    #[error("dataset cannot {0} a grouped dataset")]
    GroupedMutation(&'static str),
    /// limit/range/column token 等选项取值非法。
    #[error("dataset invalid option value: {0}")]
    InvalidOptionValue(String),
    #[error("dataset has no backend attached")]
    MissingBackend,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn invalid_expression(msg: impl Into<String>) -> Self {
        Self::InvalidExpression(msg.into())
    }

    pub(crate) fn invalid_option(msg: impl Into<String>) -> Self {
        Self::InvalidOptionValue(msg.into())
    }

    pub(crate) fn unsupported_literal(type_name: impl Into<String>) -> Self {
        Self::UnsupportedLiteralType(type_name.into())
    }
}

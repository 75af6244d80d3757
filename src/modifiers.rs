//! 值修饰器与辅助函数：raw / list / pattern。

use crate::error::Result;
use crate::value::{Pattern, Value};
use std::fmt;

/// Raw：标记为原样拼入 SQL（字面量编码器不会加引号或转义）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Raw {
    pub(crate) expr: String,
}

impl Raw {
    pub fn new(expr: impl Into<String>) -> Self {
        Self { expr: expr.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.expr
    }

    pub fn into_string(self) -> String {
        self.expr
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}

/// 把一段已经是合法 SQL 的文本标记为 Raw。
pub fn raw(expr: impl Into<String>) -> Raw {
    Raw::new(expr)
}

/// List：把一组值收集成有序序列，编码为 `a, b, c`（空序列编码为 `NULL`）。
pub fn list<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Value {
    Value::List(values.into_iter().map(Into::into).collect())
}

/// Pattern：正则条件右值，渲染为方言的正则运算符。
pub fn pattern(source: &str) -> Result<Value> {
    Pattern::new(source).map(Value::Pattern)
}

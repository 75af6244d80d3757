//! 列引用：紧凑的列名 token（`table__col`、`col___alias`、`table__col___alias`），
//! 在渲染时解析为 `table.col [AS alias]`。

use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::modifiers::Raw;
use crate::value::Value;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// 限定符分隔：`table__col`。
pub const QUALIFIER_SEPARATOR: &str = "__";
/// 别名分隔：`col___alias`。
pub const ALIAS_SEPARATOR: &str = "___";

fn qualified_alias_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\w+)__(\w+)___(\w+)$").expect("invalid built-in column token regex")
    })
}

fn alias_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)___(\w+)$").expect("invalid built-in column token regex"))
}

fn qualified_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)__(\w+)$").expect("invalid built-in column token regex"))
}

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\w+(\.\w+)?$").expect("invalid built-in identifier regex"))
}

/// 列引用 token。只保存 token 本身，不预先解析，便于在不同方言下复用。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    token: String,
}

/// 创建列引用。
pub fn col(token: impl Into<String>) -> ColumnRef {
    ColumnRef::new(token)
}

impl ColumnRef {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// token 是否已带表限定（`a.b` 或 `a__b`）。
    pub fn is_qualified(&self) -> bool {
        self.token.contains('.')
            || qualified_re().is_match(&self.token)
            || qualified_alias_re().is_match(&self.token)
    }

    /// 是否是一个合法的列标识符（表达式求值时只接受这类 token）。
    pub fn is_identifier(&self) -> bool {
        identifier_re().is_match(&self.token)
    }

    /// 用给定的标识符 quote 函数解析 token。
    pub fn resolve_with(&self, quote: impl Fn(&str) -> String) -> Result<String> {
        resolve_token(&self.token, quote)
    }

    /// `col AS alias`。
    pub fn as_(&self, alias: impl Into<String>) -> Expr {
        Expr::binary(self.clone(), "AS", Some(ColumnRef::new(alias).into()))
    }

    pub fn desc(&self) -> Expr {
        Expr::binary(self.clone(), "DESC", None)
    }

    pub fn asc(&self) -> Expr {
        Expr::binary(self.clone(), "ASC", None)
    }

    /// `table.*`。
    pub fn all(&self) -> Expr {
        Expr::Wildcard {
            table: self.token.clone(),
        }
    }

    pub fn min(&self) -> Expr {
        Expr::function("min", vec![self.clone().into()])
    }

    pub fn max(&self) -> Expr {
        Expr::function("max", vec![self.clone().into()])
    }

    pub fn sum(&self) -> Expr {
        Expr::function("sum", vec![self.clone().into()])
    }

    pub fn avg(&self) -> Expr {
        Expr::function("avg", vec![self.clone().into()])
    }

    /// 全大写的函数名简写：`col("x").function("COUNT")` => `count(x)`；其余名称返回错误。
    pub fn function(&self, name: &str) -> Result<Expr> {
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(Error::invalid_expression(format!(
                "unknown column method {name:?} on {}",
                self.token
            )));
        }
        Ok(Expr::function(
            name.to_ascii_lowercase(),
            vec![self.clone().into()],
        ))
    }

    /// `cast(col AS type)`。
    pub fn cast_as(&self, sql_type: impl Into<String>) -> Expr {
        let target = Value::Raw(Raw::new(sql_type));
        Expr::function(
            "cast",
            vec![Expr::binary(self.clone(), "AS", Some(target)).into()],
        )
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

impl From<&str> for ColumnRef {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for ColumnRef {
    fn from(v: String) -> Self {
        Self::new(v)
    }
}

impl From<&String> for ColumnRef {
    fn from(v: &String) -> Self {
        Self::new(v.as_str())
    }
}

impl From<&ColumnRef> for ColumnRef {
    fn from(v: &ColumnRef) -> Self {
        v.clone()
    }
}

/// 解析列 token：限定符比别名绑定更紧，`col___alias` 合法；
/// 已含 `.` 的 token 视为限定好的 SQL 原样返回，其余一律走标识符 quote。
/// 需要原样拼入的 SQL 片段请用 `raw(...)`。
pub fn resolve_token(token: &str, quote: impl Fn(&str) -> String) -> Result<String> {
    if token.is_empty() {
        return Err(Error::invalid_option("empty column token"));
    }
    if token.contains('.') {
        return Ok(token.to_string());
    }
    if let Some(c) = qualified_alias_re().captures(token) {
        return Ok(format!(
            "{}.{} AS {}",
            quote(&c[1]),
            quote(&c[2]),
            quote(&c[3])
        ));
    }
    if let Some(c) = alias_re().captures(token) {
        return Ok(format!("{} AS {}", quote(&c[1]), quote(&c[2])));
    }
    if let Some(c) = qualified_re().captures(token) {
        return Ok(format!("{}.{}", quote(&c[1]), quote(&c[2])));
    }
    Ok(quote(token))
}

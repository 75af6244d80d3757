//! 表达式节点：二元运算、函数调用、`table.*`。

use crate::column::ColumnRef;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::literal::write_literal;
use crate::value::Value;

/// 一个在渲染时才转换为 SQL 的表达式节点。创建后不再修改。
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `left op right`；`right` 为空时渲染为 `left op`（如 `name DESC`）。
    BinaryOp {
        left: Value,
        op: String,
        right: Option<Value>,
    },
    /// `name(args...)`。
    Function { name: String, args: Vec<Value> },
    /// `table.*`。
    Wildcard { table: String },
}

/// 创建函数调用表达式。
pub fn func<T: Into<Value>>(name: impl Into<String>, args: impl IntoIterator<Item = T>) -> Expr {
    Expr::function(name, args.into_iter().map(Into::into).collect())
}

impl Expr {
    pub fn binary(left: impl Into<Value>, op: impl Into<String>, right: Option<Value>) -> Self {
        Self::BinaryOp {
            left: left.into(),
            op: op.into(),
            right,
        }
    }

    pub fn function(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self::Function {
            name: name.into(),
            args,
        }
    }

    pub fn wildcard(table: impl Into<String>) -> Self {
        Self::Wildcard {
            table: table.into(),
        }
    }

    /// `expr AS alias`。
    pub fn as_(self, alias: impl Into<String>) -> Self {
        Self::binary(self, "AS", Some(ColumnRef::new(alias).into()))
    }

    pub fn desc(self) -> Self {
        Self::binary(self, "DESC", None)
    }

    pub fn asc(self) -> Self {
        Self::binary(self, "ASC", None)
    }

    /// 排序方向标记：`Some(true)` 表示 DESC，`Some(false)` 表示 ASC。
    pub(crate) fn direction(&self) -> Option<(bool, &Value)> {
        match self {
            Self::BinaryOp {
                left,
                op,
                right: None,
            } if op == "DESC" => Some((true, left)),
            Self::BinaryOp {
                left,
                op,
                right: None,
            } if op == "ASC" => Some((false, left)),
            _ => None,
        }
    }

    pub fn render(&self, ds: &Dataset) -> Result<String> {
        let mut out = String::new();
        match self {
            Self::BinaryOp { left, op, right } => {
                write_literal(&mut out, left, ds)?;
                out.push(' ');
                out.push_str(op);
                if let Some(right) = right {
                    out.push(' ');
                    write_literal(&mut out, right, ds)?;
                }
            }
            Self::Function { name, args } => {
                if !is_function_name(name) {
                    return Err(Error::invalid_expression(format!(
                        "invalid function name {name:?}"
                    )));
                }
                out.push_str(name);
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_literal(&mut out, arg, ds)?;
                }
                out.push(')');
            }
            Self::Wildcard { table } => {
                out.push_str(&ds.resolve_column(&ColumnRef::new(table.as_str()))?);
                out.push_str(".*");
            }
        }
        Ok(out)
    }
}

pub(crate) fn is_function_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::col;
    use crate::config::Config;
    use crate::flavor::Flavor;
    use pretty_assertions::assert_eq;

    fn render(e: Expr) -> String {
        e.render(&Dataset::default()).unwrap()
    }

    #[test]
    fn binary_and_postfix() {
        assert_eq!(render(Expr::binary(col("a"), "+", Some(1.into()))), "a + 1");
        assert_eq!(render(col("name").desc()), "name DESC");
        assert_eq!(render(col("name").asc()), "name ASC");
        assert_eq!(render(col("test__name").as_("n")), "test.name AS n");
    }

    #[test]
    fn functions() {
        assert_eq!(render(col("population").sum()), "sum(population)");
        assert_eq!(render(func("now", Vec::<Value>::new())), "now()");
        assert_eq!(render(func("coalesce", [Value::from(col("a")), 0.into()])), "coalesce(a, 0)");
        assert_eq!(render(col("x").cast_as("integer")), "cast(x AS integer)");
        assert_eq!(render(col("price").max().as_("top")), "max(price) AS top");
    }

    #[test]
    fn invalid_function_name() {
        let r = func("drop table; x", [1]).render(&Dataset::default());
        assert!(matches!(r, Err(Error::InvalidExpression(_))));
    }

    #[test]
    fn wildcard() {
        assert_eq!(render(col("test").all()), "test.*");
        let ds = Dataset::new(Config::from(Flavor::MySQL));
        assert_eq!(col("test").all().render(&ds).unwrap(), "`test`.*");
    }

    #[test]
    fn direction_tag() {
        let e = col("a").desc();
        assert_eq!(e.direction(), Some((true, &Value::from(col("a")))));
        assert_eq!(col("a").min().direction(), None);
    }
}

//! Cond：条件表达式树。比较/逻辑运算只记录节点，渲染时才转换成 SQL 片段。
//!
//! 这是一个封闭的求值器：只接受列引用、函数节点和字面量操作数，
//! 无法映射到已知列/运算符的节点在渲染时返回 `InvalidExpression`。

use crate::column::ColumnRef;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::expr::{Expr, func, is_function_name};
use crate::literal::{literal, quote_string, write_literal};
use crate::value::{RangeValue, Value};
use crate::where_clause::{Fragment, Grouping};
use std::ops::{BitAnd, BitOr, Not};

/// 比较运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    Like,
    /// 正则匹配，具体运算符由方言决定。
    Regex,
}

impl CompareOp {
    fn is_ordering(self) -> bool {
        matches!(self, Self::Lt | Self::Lte | Self::Gt | Self::Gte)
    }

    fn sql(self, ds: &Dataset) -> String {
        match self {
            Self::Lt => "<".to_string(),
            Self::Lte => "<=".to_string(),
            Self::Gt => ">".to_string(),
            Self::Gte => ">=".to_string(),
            Self::Eq => "=".to_string(),
            Self::Like => "LIKE".to_string(),
            Self::Regex => ds.regex_operator(),
        }
    }
}

/// 条件节点。
#[derive(Debug, Clone, PartialEq)]
pub enum Cond {
    Compare {
        left: Value,
        op: CompareOp,
        right: Value,
    },
    /// `x >= lo AND x < hi`（闭区间为 `<= hi`）。
    Range { operand: Value, range: RangeValue },
    /// `x IN (...)`：右值是序列或子查询。
    In { operand: Value, values: Value },
    And(Box<Cond>, Box<Cond>),
    Or(Box<Cond>, Box<Cond>),
    Not(Box<Cond>),
    /// 构造期发现的非法表达式，渲染时报错。
    Invalid(String),
}

impl Cond {
    /// 列与值的配对规则（hash 条件和 `equal` 共用）：
    /// 区间 => 区间比较；序列/子查询 => IN；正则 => 正则运算符；NULL => IS NULL；其余 => `=`。
    pub fn pair(left: impl Into<Value>, right: impl Into<Value>) -> Self {
        let left = left.into();
        match right.into() {
            Value::Range(range) => Self::Range {
                operand: left,
                range,
            },
            values @ (Value::List(_) | Value::Dataset(_)) => Self::In {
                operand: left,
                values,
            },
            right @ Value::Pattern(_) => Self::Compare {
                left,
                op: CompareOp::Regex,
                right,
            },
            right => Self::Compare {
                left,
                op: CompareOp::Eq,
                right,
            },
        }
    }

    fn compare(left: Value, op: CompareOp, right: Value) -> Self {
        let invalid = match &right {
            Value::Range(_) | Value::Pattern(_) | Value::List(_) => {
                op.is_ordering() || op == CompareOp::Like
            }
            _ => false,
        };
        if invalid {
            return Self::Invalid(format!(
                "cannot compare with {} using {op:?}",
                right.type_name()
            ));
        }
        Self::Compare { left, op, right }
    }

    fn membership(left: Value, right: Value) -> Self {
        match right {
            Value::Range(_) | Value::List(_) | Value::Dataset(_) => Self::pair(left, right),
            other => Self::Invalid(format!(
                "in_ expects a range, list or dataset, got {}",
                other.type_name()
            )),
        }
    }

    fn matching(left: Value, right: Value) -> Self {
        match right {
            right @ Value::Pattern(_) => Self::Compare {
                left,
                op: CompareOp::Regex,
                right,
            },
            right => Self::compare(left, CompareOp::Like, right),
        }
    }

    pub fn and(self, other: Cond) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Cond) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// 校验条件树只引用合法的列和函数。
    pub(crate) fn check(&self) -> Result<()> {
        match self {
            Self::Compare { left, right, .. } => {
                check_operand(left)?;
                check_operand(right)
            }
            Self::Range { operand, range } => {
                check_operand(operand)?;
                check_operand(&range.start)?;
                check_operand(&range.end)
            }
            Self::In { operand, values } => {
                check_operand(operand)?;
                check_operand(values)
            }
            Self::And(a, b) | Self::Or(a, b) => {
                a.check()?;
                b.check()
            }
            Self::Not(a) => a.check(),
            Self::Invalid(msg) => Err(Error::invalid_expression(msg.clone())),
        }
    }

    /// 渲染为可独立存放的过滤片段（带分组信息）。
    pub(crate) fn translate(&self, ds: &Dataset) -> Result<Fragment> {
        let sql = self.render(ds)?;
        let fragment = match self {
            Self::Compare { .. } | Self::Range { .. } | Self::In { .. } => {
                Fragment::new(format!("({sql})"), Grouping::Enclosed)
            }
            Self::Not(_) => Fragment::new(sql, Grouping::Atom),
            Self::And(..) => Fragment::new(sql, Grouping::Conjunction),
            Self::Or(..) => Fragment::new(sql, Grouping::Loose),
            Self::Invalid(msg) => return Err(Error::invalid_expression(msg.clone())),
        };
        Ok(fragment)
    }

    /// 渲染节点本身（不加外层括号）。
    pub fn render(&self, ds: &Dataset) -> Result<String> {
        let mut out = String::new();
        match self {
            Self::Compare {
                left,
                op: CompareOp::Eq,
                right: Value::Null,
            } => {
                write_literal(&mut out, left, ds)?;
                out.push_str(" IS NULL");
            }
            Self::Compare {
                left,
                op,
                right: Value::Pattern(p),
            } => {
                write_literal(&mut out, left, ds)?;
                out.push(' ');
                out.push_str(&op.sql(ds));
                out.push(' ');
                quote_string(&mut out, p.as_str());
            }
            Self::Compare { left, op, right } => {
                write_literal(&mut out, left, ds)?;
                out.push(' ');
                out.push_str(&op.sql(ds));
                out.push(' ');
                write_literal(&mut out, right, ds)?;
            }
            Self::Range { operand, range } => {
                let x = literal(operand, ds)?;
                out.push_str(&x);
                out.push_str(" >= ");
                write_literal(&mut out, &range.start, ds)?;
                out.push_str(" AND ");
                out.push_str(&x);
                out.push_str(if range.inclusive { " <= " } else { " < " });
                write_literal(&mut out, &range.end, ds)?;
            }
            Self::In { operand, values } => {
                write_literal(&mut out, operand, ds)?;
                out.push_str(" IN ");
                match values {
                    Value::Dataset(_) => write_literal(&mut out, values, ds)?,
                    _ => {
                        out.push('(');
                        write_literal(&mut out, values, ds)?;
                        out.push(')');
                    }
                }
            }
            Self::And(a, b) => {
                out.push('(');
                out.push_str(&a.render(ds)?);
                out.push_str(") AND (");
                out.push_str(&b.render(ds)?);
                out.push(')');
            }
            Self::Or(a, b) => {
                out.push('(');
                out.push_str(&a.render(ds)?);
                out.push_str(") OR (");
                out.push_str(&b.render(ds)?);
                out.push(')');
            }
            Self::Not(a) => {
                out.push_str("NOT (");
                out.push_str(&a.render(ds)?);
                out.push(')');
            }
            Self::Invalid(msg) => return Err(Error::invalid_expression(msg.clone())),
        }
        Ok(out)
    }
}

fn check_operand(v: &Value) -> Result<()> {
    match v {
        Value::Column(c) if !c.is_identifier() => Err(Error::invalid_expression(format!(
            "unknown identifier {:?}",
            c.token()
        ))),
        Value::Expr(e) => check_expr(e),
        Value::List(items) => items.iter().try_for_each(check_operand),
        _ => Ok(()),
    }
}

fn check_expr(e: &Expr) -> Result<()> {
    match e {
        Expr::BinaryOp { left, right, .. } => {
            check_operand(left)?;
            right.as_ref().map_or(Ok(()), check_operand)
        }
        Expr::Function { name, args } => {
            if !is_function_name(name) {
                return Err(Error::invalid_expression(format!(
                    "unknown function {name:?}"
                )));
            }
            args.iter().try_for_each(check_operand)
        }
        Expr::Wildcard { table } if !ColumnRef::new(table.as_str()).is_identifier() => Err(
            Error::invalid_expression(format!("unknown table {table:?}")),
        ),
        Expr::Wildcard { .. } => Ok(()),
    }
}

impl BitAnd for Cond {
    type Output = Cond;

    fn bitand(self, rhs: Cond) -> Cond {
        self.and(rhs)
    }
}

impl BitOr for Cond {
    type Output = Cond;

    fn bitor(self, rhs: Cond) -> Cond {
        self.or(rhs)
    }
}

impl Not for Cond {
    type Output = Cond;

    fn not(self) -> Cond {
        Cond::Not(Box::new(self))
    }
}

macro_rules! impl_comparisons {
    ($($t:ty),*) => {
        $(
            impl $t {
                pub fn lt(&self, v: impl Into<Value>) -> Cond {
                    Cond::compare(self.clone().into(), CompareOp::Lt, v.into())
                }

                pub fn lte(&self, v: impl Into<Value>) -> Cond {
                    Cond::compare(self.clone().into(), CompareOp::Lte, v.into())
                }

                pub fn gt(&self, v: impl Into<Value>) -> Cond {
                    Cond::compare(self.clone().into(), CompareOp::Gt, v.into())
                }

                pub fn gte(&self, v: impl Into<Value>) -> Cond {
                    Cond::compare(self.clone().into(), CompareOp::Gte, v.into())
                }

                /// 等值比较，右值为区间/序列/子查询/正则/NULL 时按配对规则渲染。
                pub fn equal(&self, v: impl Into<Value>) -> Cond {
                    Cond::pair(self.clone(), v)
                }

                /// `NOT (x = v)`。
                pub fn not_equal(&self, v: impl Into<Value>) -> Cond {
                    Cond::pair(self.clone(), v).not()
                }

                pub fn like(&self, v: impl Into<Value>) -> Cond {
                    Cond::matching(self.clone().into(), v.into())
                }

                pub fn matches(&self, v: impl Into<Value>) -> Cond {
                    Cond::matching(self.clone().into(), v.into())
                }

                pub fn in_(&self, v: impl Into<Value>) -> Cond {
                    Cond::membership(self.clone().into(), v.into())
                }
            }
        )*
    };
}

impl_comparisons!(ColumnRef, Expr);

/// 表达式闭包的求值上下文：标识符只能通过它变成列引用或函数节点。
#[derive(Debug, Clone, Copy, Default)]
pub struct Scope {
    _private: (),
}

impl Scope {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn col(&self, token: &str) -> ColumnRef {
        ColumnRef::new(token)
    }

    pub fn func<T: Into<Value>>(&self, name: &str, args: impl IntoIterator<Item = T>) -> Expr {
        func(name, args)
    }

    pub fn sum(&self, token: &str) -> Expr {
        self.col(token).sum()
    }

    pub fn min(&self, token: &str) -> Expr {
        self.col(token).min()
    }

    pub fn max(&self, token: &str) -> Expr {
        self.col(token).max()
    }

    pub fn avg(&self, token: &str) -> Expr {
        self.col(token).avg()
    }

    pub fn count(&self, token: &str) -> Expr {
        Expr::function("count", vec![self.col(token).into()])
    }
}

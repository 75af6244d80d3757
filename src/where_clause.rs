//! 过滤条件：把 hash / 文本 / 模板 / 表达式四种输入规范化为一个布尔 SQL 片段，
//! 并与已有片段做 AND / NOT 组合。

use crate::column::ColumnRef;
use crate::cond::Cond;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::interpolate::{interpolate, is_enclosed};
use crate::modifiers::Raw;
use crate::string_builder::StringBuilder;
use crate::value::Value;
use indexmap::IndexMap;

/// 片段的分组形态，决定组合时是否需要补括号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grouping {
    /// 单个带括号的条件，或 `NOT x`。
    Atom,
    /// 表达式块渲染出的单个带括号比较：组合时原样拼接，取反时整体再包一层括号。
    Enclosed,
    /// 由 ` AND ` 连接的若干 atom。
    Conjunction,
    /// 其余文本（如 `a OR b`、未加括号的字符串条件）。
    Loose,
}

/// 已渲染的过滤片段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    sql: String,
    grouping: Grouping,
}

impl Fragment {
    pub(crate) fn new(sql: impl Into<String>, grouping: Grouping) -> Self {
        Self {
            sql: sql.into(),
            grouping,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    fn negate(self) -> Self {
        let sql = match self.grouping {
            Grouping::Atom => format!("NOT {}", self.sql),
            Grouping::Enclosed | Grouping::Conjunction | Grouping::Loose => {
                format!("NOT ({})", self.sql)
            }
        };
        Self::new(sql, Grouping::Atom)
    }

    fn and_operand(&self) -> String {
        match self.grouping {
            Grouping::Loose => format!("({})", self.sql),
            Grouping::Atom | Grouping::Enclosed | Grouping::Conjunction => self.sql.clone(),
        }
    }
}

/// 过滤条件输入。
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// 列 => 值，保持插入顺序。
    Hash(Vec<(ColumnRef, Value)>),
    /// 调用方保证是合法布尔 SQL 的文本。
    Text(String),
    /// 带 `?` 占位符的模板。
    Template { sql: String, args: Vec<Value> },
    /// 表达式树。
    Block(Cond),
}

impl Filter {
    pub fn template<T: Into<Value>>(sql: impl Into<String>, args: impl IntoIterator<Item = T>) -> Self {
        Self::Template {
            sql: sql.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// 规范化为片段。
    pub(crate) fn normalize(&self, ds: &Dataset) -> Result<Fragment> {
        match self {
            Self::Hash(pairs) => {
                if pairs.is_empty() {
                    return Err(Error::invalid_option("empty condition mapping"));
                }
                let parts = pairs
                    .iter()
                    .map(|(c, v)| Cond::pair(c.clone(), v.clone()).translate(ds).map(|f| f.sql))
                    .collect::<Result<Vec<_>>>()?;
                let mut buf = StringBuilder::new();
                buf.write_strings(&parts, " AND ");
                let grouping = if parts.len() == 1 {
                    Grouping::Atom
                } else {
                    Grouping::Conjunction
                };
                Ok(Fragment::new(buf.into_string(), grouping))
            }
            Self::Text(sql) => text_fragment(sql.clone()),
            Self::Template { sql, args } => text_fragment(interpolate(sql, args, ds)?),
            Self::Block(cond) => {
                cond.check()?;
                cond.translate(ds)
            }
        }
    }
}

fn text_fragment(sql: String) -> Result<Fragment> {
    if sql.trim().is_empty() {
        return Err(Error::invalid_option("empty condition text"));
    }
    let grouping = if is_enclosed(&sql) {
        Grouping::Atom
    } else {
        Grouping::Loose
    };
    Ok(Fragment::new(sql, grouping))
}

/// 把新片段 AND 到已有片段上；`negate` 时新片段先取反。已有片段不会被重新包裹。
pub(crate) fn combine(existing: Option<&Fragment>, new: Fragment, negate: bool) -> Fragment {
    let new = if negate { new.negate() } else { new };
    match existing {
        None => new,
        Some(old) => Fragment::new(
            format!("{} AND {}", old.and_operand(), new.and_operand()),
            Grouping::Conjunction,
        ),
    }
}

impl From<&str> for Filter {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Filter {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Raw> for Filter {
    fn from(v: Raw) -> Self {
        Self::Text(v.into_string())
    }
}

impl From<Cond> for Filter {
    fn from(v: Cond) -> Self {
        Self::Block(v)
    }
}

impl<K: Into<ColumnRef>, V: Into<Value>> From<Vec<(K, V)>> for Filter {
    fn from(v: Vec<(K, V)>) -> Self {
        Self::Hash(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<ColumnRef>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Filter {
    fn from(v: [(K, V); N]) -> Self {
        Self::Hash(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<ColumnRef>, V: Into<Value>> From<IndexMap<K, V>> for Filter {
    fn from(v: IndexMap<K, V>) -> Self {
        Self::Hash(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<T: Into<Value>> From<(&str, Vec<T>)> for Filter {
    fn from((sql, args): (&str, Vec<T>)) -> Self {
        Self::template(sql, args)
    }
}

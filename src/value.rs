//! SQL 值类型：字面量编码器的输入。

use crate::column::ColumnRef;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::modifiers::Raw;
use std::borrow::Cow;
use std::ops::{Range, RangeInclusive};

/// 可被编码为 SQL 字面量（或作为条件右值）的值。
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(Cow<'static, str>),
    Bytes(Vec<u8>),
    Date(time::Date),
    DateTime(time::OffsetDateTime),
    /// 原样输出的 SQL 文本。
    Raw(Raw),
    /// 有序序列：值列表或 `IN (...)` 的右值。
    List(Vec<Value>),
    /// 列引用 token，渲染时解析。
    Column(ColumnRef),
    Expr(Box<Expr>),
    /// 子查询。
    Dataset(Box<Dataset>),
    /// 只在条件右值中有意义，没有字面量形式。
    Range(RangeValue),
    /// 只在条件右值中有意义，没有字面量形式。
    Pattern(Pattern),
}

/// 区间值：`start..end` 或 `start..=end`。
#[derive(Debug, Clone, PartialEq)]
pub struct RangeValue {
    pub start: Box<Value>,
    pub end: Box<Value>,
    pub inclusive: bool,
}

impl RangeValue {
    pub fn new(start: impl Into<Value>, end: impl Into<Value>, inclusive: bool) -> Self {
        Self {
            start: Box::new(start.into()),
            end: Box::new(end.into()),
            inclusive,
        }
    }
}

/// 正则条件右值。
#[derive(Debug, Clone)]
pub struct Pattern(regex::Regex);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self> {
        regex::Regex::new(pattern)
            .map(Self)
            .map_err(|e| Error::invalid_option(format!("invalid pattern {pattern:?}: {e}")))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl From<regex::Regex> for Pattern {
    fn from(re: regex::Regex) -> Self {
        Self(re)
    }
}

impl Value {
    /// 将 `Option<T>` 映射为 `Value`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<Value>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(v.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// 用于错误信息的类型名。
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::I64(_) | Self::U64(_) => "integer",
            Self::F64(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::Raw(_) => "raw",
            Self::List(_) => "list",
            Self::Column(_) => "column",
            Self::Expr(_) => "expression",
            Self::Dataset(_) => "dataset",
            Self::Range(_) => "range",
            Self::Pattern(_) => "pattern",
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::I64(v as i64)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::U64(v as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::F64(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for Value {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<time::Date> for Value {
    fn from(v: time::Date) -> Self {
        Self::Date(v)
    }
}

impl From<time::OffsetDateTime> for Value {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<Raw> for Value {
    fn from(v: Raw) -> Self {
        Self::Raw(v)
    }
}

impl From<ColumnRef> for Value {
    fn from(v: ColumnRef) -> Self {
        Self::Column(v)
    }
}

impl From<Expr> for Value {
    fn from(v: Expr) -> Self {
        Self::Expr(Box::new(v))
    }
}

impl From<Dataset> for Value {
    fn from(v: Dataset) -> Self {
        Self::Dataset(Box::new(v))
    }
}

impl From<&Dataset> for Value {
    fn from(v: &Dataset) -> Self {
        Self::Dataset(Box::new(v.clone()))
    }
}

impl From<RangeValue> for Value {
    fn from(v: RangeValue) -> Self {
        Self::Range(v)
    }
}

impl From<Pattern> for Value {
    fn from(v: Pattern) -> Self {
        Self::Pattern(v)
    }
}

impl From<regex::Regex> for Value {
    fn from(v: regex::Regex) -> Self {
        Self::Pattern(Pattern(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Self::from_option(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_from_range {
    ($($t:ty),*) => {
        $(
            impl From<Range<$t>> for Value {
                fn from(r: Range<$t>) -> Self {
                    Self::Range(RangeValue::new(r.start, r.end, false))
                }
            }

            impl From<RangeInclusive<$t>> for Value {
                fn from(r: RangeInclusive<$t>) -> Self {
                    let (start, end) = r.into_inner();
                    Self::Range(RangeValue::new(start, end, true))
                }
            }
        )*
    };
}

impl_from_range!(i32, i64, u32, u64, usize, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_option_some() {
        assert_eq!(Value::from_option(Some(123_i64)), Value::I64(123));
    }

    #[test]
    fn from_option_none() {
        assert_eq!(Value::from_option::<i64>(None), Value::Null);
    }

    #[test]
    fn from_unit_is_null() {
        let v: Value = ().into();
        assert!(v.is_null());
    }

    #[test]
    fn from_vec_is_list() {
        let v: Value = vec![1, 2, 3].into();
        assert_eq!(v, Value::List(vec![Value::I64(1), Value::I64(2), Value::I64(3)]));
    }

    #[test]
    fn from_ranges() {
        let v: Value = (4..7).into();
        assert_eq!(v, Value::Range(RangeValue::new(4, 7, false)));
        let v: Value = (4..=7).into();
        assert_eq!(v, Value::Range(RangeValue::new(4, 7, true)));
    }

    #[test]
    fn pattern_equality_by_source() {
        let a = Pattern::new("^bc").unwrap();
        let b = Pattern::new("^bc").unwrap();
        assert_eq!(a, b);
        assert!(Pattern::new("(").is_err());
    }
}

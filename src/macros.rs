//! 宏与可变参数支持：`from` / `select` / `group` / `order` 接受单个值、数组、Vec 或元组，
//! 也可以用 `cols!` 混合不同类型的列。

use crate::column::ColumnRef;
use crate::dataset::Dataset;
use crate::expr::Expr;
use crate::modifiers::Raw;
use crate::value::Value;

/// 可展开为一组列（或来源表）的值。字符串按列 token 处理。
pub trait IntoColumns {
    fn extend_into_columns(self, dst: &mut Vec<Value>);
}

impl IntoColumns for () {
    fn extend_into_columns(self, _dst: &mut Vec<Value>) {}
}

impl IntoColumns for &str {
    fn extend_into_columns(self, dst: &mut Vec<Value>) {
        dst.push(Value::Column(ColumnRef::new(self)));
    }
}

impl IntoColumns for String {
    fn extend_into_columns(self, dst: &mut Vec<Value>) {
        dst.push(Value::Column(ColumnRef::new(self)));
    }
}

impl IntoColumns for ColumnRef {
    fn extend_into_columns(self, dst: &mut Vec<Value>) {
        dst.push(self.into());
    }
}

impl IntoColumns for Expr {
    fn extend_into_columns(self, dst: &mut Vec<Value>) {
        dst.push(self.into());
    }
}

impl IntoColumns for Raw {
    fn extend_into_columns(self, dst: &mut Vec<Value>) {
        dst.push(self.into());
    }
}

impl IntoColumns for Dataset {
    fn extend_into_columns(self, dst: &mut Vec<Value>) {
        dst.push(self.into());
    }
}

impl IntoColumns for &Dataset {
    fn extend_into_columns(self, dst: &mut Vec<Value>) {
        dst.push(self.into());
    }
}

impl IntoColumns for Value {
    fn extend_into_columns(self, dst: &mut Vec<Value>) {
        dst.push(self);
    }
}

impl<T: IntoColumns, const N: usize> IntoColumns for [T; N] {
    fn extend_into_columns(self, dst: &mut Vec<Value>) {
        for item in self {
            item.extend_into_columns(dst);
        }
    }
}

impl<T: IntoColumns> IntoColumns for Vec<T> {
    fn extend_into_columns(self, dst: &mut Vec<Value>) {
        for item in self {
            item.extend_into_columns(dst);
        }
    }
}

macro_rules! impl_into_columns_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: IntoColumns),+> IntoColumns for ($($name,)+) {
            #[allow(non_snake_case)]
            fn extend_into_columns(self, dst: &mut Vec<Value>) {
                let ($($name,)+) = self;
                $($name.extend_into_columns(dst);)+
            }
        }
    };
}

impl_into_columns_for_tuple!(A, B);
impl_into_columns_for_tuple!(A, B, C);
impl_into_columns_for_tuple!(A, B, C, D);
impl_into_columns_for_tuple!(A, B, C, D, E);
impl_into_columns_for_tuple!(A, B, C, D, E, F);

#[doc(hidden)]
pub fn extend_into_columns<T>(value: T, dst: &mut Vec<Value>)
where
    T: IntoColumns,
{
    value.extend_into_columns(dst);
}

pub(crate) fn collect_columns<T>(value: T) -> Vec<Value>
where
    T: IntoColumns,
{
    let mut dst = Vec::new();
    value.extend_into_columns(&mut dst);
    dst
}

/// 混合类型的列列表：`cols!["name", col("price").desc(), raw("1")]`。
#[macro_export]
macro_rules! cols {
    () => {
        Vec::<$crate::value::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut values = Vec::<$crate::value::Value>::new();
        $(
            $crate::macros::extend_into_columns($value, &mut values);
        )*
        values
    }};
}

/// 有序的 列 => 值 映射：`hash! { "name" => "abc", "price" => 342 }`。
#[macro_export]
macro_rules! hash {
    () => {
        Vec::<($crate::column::ColumnRef, $crate::value::Value)>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        vec![$((
            $crate::column::ColumnRef::from($key),
            $crate::value::Value::from($value),
        )),+]
    };
}

/// 位置参数值列表：`values!["a", 2, 6.5]`。
#[macro_export]
macro_rules! values {
    () => {
        Vec::<$crate::value::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::value::Value::from($value)),+]
    };
}

//! halo-dataset：不可变、可组合的 SQL dataset 构造器，以及字面量编码与条件表达式。

pub mod backend;
pub mod column;
pub mod cond;
pub mod config;
pub mod create_table;
pub mod database;
pub mod dataset;
#[cfg(test)]
mod dataset_tests;
pub mod delete;
pub mod error;
pub mod expr;
pub mod flavor;
#[cfg(test)]
mod flavor_tests;
pub mod insert;
#[cfg(test)]
mod insert_tests;
mod interpolate;
mod literal;
pub mod macros;
#[cfg(test)]
mod macros_tests;
pub mod modifiers;
pub mod select;
mod string_builder;
pub mod update;
#[cfg(test)]
mod update_delete_tests;
pub mod value;
pub mod where_clause;

pub use crate::backend::{Backend, BackendError, Row, RowDecorator};
pub use crate::column::{ColumnRef, col};
pub use crate::cond::{CompareOp, Cond, Scope};
pub use crate::config::Config;
pub use crate::create_table::{
    ColumnDef, CreateTableBuilder, IndexDef, OnDelete, create_table, drop_table_sql,
};
pub use crate::database::Database;
pub use crate::dataset::{Dataset, Limit, Options};
pub use crate::error::{Error, Result};
pub use crate::expr::{Expr, func};
pub use crate::flavor::Flavor;
pub use crate::insert::InsertValues;
pub use crate::macros::IntoColumns;
pub use crate::modifiers::{Raw, list, pattern, raw};
pub use crate::value::{Pattern, RangeValue, Value};
pub use crate::where_clause::{Filter, Fragment, Grouping};

/// 推荐的便捷命名空间：允许 `use halo_dataset::sqlbuilder::{...}` 形式导入。
pub mod sqlbuilder {
    pub use crate::*;
}

//! Dataset：不可变的查询构造器。所有修改方法都返回新的 Dataset，原实例保持不变。

use crate::backend::{Backend, BackendError, Row, RowDecorator, execute_logged};
use crate::column::ColumnRef;
use crate::cond::{Cond, Scope};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::flavor::Flavor;
use crate::insert::InsertValues;
use crate::literal::literal;
use crate::macros::{IntoColumns, collect_columns};
use crate::modifiers::{Raw, raw};
use crate::value::Value;
use crate::where_clause::{Filter, Fragment, combine};
use std::fmt;
use std::ops::{Range, RangeInclusive};
use std::sync::Arc;

/// 查询选项。只通过 Dataset 的修改方法生成新副本，从不原地修改。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub(crate) from: Vec<Value>,
    pub(crate) select: Option<Vec<Value>>,
    pub(crate) where_: Option<Fragment>,
    pub(crate) group: Option<Vec<Value>>,
    pub(crate) having: Option<Fragment>,
    pub(crate) order: Option<Vec<Value>>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) distinct: bool,
}

impl Options {
    pub fn sources(&self) -> &[Value] {
        &self.from
    }

    pub fn columns(&self) -> Option<&[Value]> {
        self.select.as_deref()
    }

    pub fn where_fragment(&self) -> Option<&Fragment> {
        self.where_.as_ref()
    }

    pub fn having_fragment(&self) -> Option<&Fragment> {
        self.having.as_ref()
    }

    pub fn group(&self) -> Option<&[Value]> {
        self.group.as_deref()
    }

    pub fn order(&self) -> Option<&[Value]> {
        self.order.as_deref()
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn is_grouped(&self) -> bool {
        self.group.is_some()
    }
}

/// limit 参数：`n`、`(n, offset)`、`a..b`、`a..=b`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Count(i128),
    CountOffset(i128, i128),
    Range { start: i128, end: i128, inclusive: bool },
}

impl Limit {
    fn resolve(self) -> Result<(u64, Option<u64>)> {
        let (count, offset) = match self {
            Self::Count(n) => (n, None),
            Self::CountOffset(n, off) => (n, Some(off)),
            Self::Range {
                start,
                end,
                inclusive,
            } => {
                let count = if inclusive { end - start + 1 } else { end - start };
                if count < 0 {
                    return Err(Error::invalid_option(format!(
                        "reversed limit range {start}..{}{end}",
                        if inclusive { "=" } else { "" }
                    )));
                }
                (count, Some(start))
            }
        };
        let count = non_negative(count, "limit")?;
        let offset = offset.map(|o| non_negative(o, "offset")).transpose()?;
        Ok((count, offset))
    }
}

fn non_negative(v: i128, what: &str) -> Result<u64> {
    u64::try_from(v).map_err(|_| Error::invalid_option(format!("invalid {what} {v}")))
}

macro_rules! impl_limit_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Limit {
                fn from(n: $t) -> Self {
                    Self::Count(n as i128)
                }
            }

            impl From<($t, $t)> for Limit {
                fn from((n, off): ($t, $t)) -> Self {
                    Self::CountOffset(n as i128, off as i128)
                }
            }

            impl From<Range<$t>> for Limit {
                fn from(r: Range<$t>) -> Self {
                    Self::Range {
                        start: r.start as i128,
                        end: r.end as i128,
                        inclusive: false,
                    }
                }
            }

            impl From<RangeInclusive<$t>> for Limit {
                fn from(r: RangeInclusive<$t>) -> Self {
                    let (start, end) = r.into_inner();
                    Self::Range {
                        start: start as i128,
                        end: end as i128,
                        inclusive: true,
                    }
                }
            }
        )*
    };
}

impl_limit_from!(i32, i64, u32, u64, usize);

/// 不可变查询构造器。
#[derive(Clone, Default)]
pub struct Dataset {
    backend: Option<Arc<dyn Backend>>,
    config: Config,
    opts: Arc<Options>,
    row_decorator: Option<Box<dyn RowDecorator>>,
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("backend", &self.backend)
            .field("config", &self.config)
            .field("opts", &self.opts)
            .field("row_decorator", &self.row_decorator)
            .finish()
    }
}

/// 只比较查询状态（配置与选项），不比较 backend 和行装饰器。
impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.opts == other.opts
    }
}

impl Dataset {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// 方言以 backend 为准，覆盖 `config.flavor`。
    pub fn with_backend(backend: Arc<dyn Backend>, config: Config) -> Self {
        let config = config.with_flavor(backend.flavor());
        Self {
            backend: Some(backend),
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn backend(&self) -> Option<&Arc<dyn Backend>> {
        self.backend.as_ref()
    }

    /// 复制选项并做局部覆盖，生成新实例。
    fn merge(&self, f: impl FnOnce(&mut Options)) -> Self {
        let mut opts = (*self.opts).clone();
        f(&mut opts);
        Self {
            opts: Arc::new(opts),
            ..self.clone()
        }
    }

    pub fn from(&self, sources: impl IntoColumns) -> Self {
        let sources = collect_columns(sources);
        self.merge(|o| o.from = sources)
    }

    /// 不传列时重置为 `*`。
    pub fn select(&self, cols: impl IntoColumns) -> Self {
        let cols = collect_columns(cols);
        self.merge(|o| o.select = (!cols.is_empty()).then_some(cols))
    }

    pub fn select_all(&self) -> Self {
        self.merge(|o| o.select = None)
    }

    pub fn where_(&self, filter: impl Into<Filter>) -> Result<Self> {
        self.add_where(filter.into(), false)
    }

    pub fn filter(&self, filter: impl Into<Filter>) -> Result<Self> {
        self.where_(filter)
    }

    pub fn exclude(&self, filter: impl Into<Filter>) -> Result<Self> {
        self.add_where(filter.into(), true)
    }

    pub fn having(&self, filter: impl Into<Filter>) -> Result<Self> {
        if !self.opts.is_grouped() {
            return Err(Error::IllegalFilterContext(
                "having requires a grouped dataset".to_string(),
            ));
        }
        let fragment = filter.into().normalize(self)?;
        let having = combine(self.opts.having.as_ref(), fragment, false);
        Ok(self.merge(|o| o.having = Some(having)))
    }

    /// `ds.where_expr(|s| s.col("price").lt(100))`。
    pub fn where_expr(&self, f: impl FnOnce(&Scope) -> Cond) -> Result<Self> {
        self.where_(Filter::Block(f(&Scope::new())))
    }

    pub fn filter_expr(&self, f: impl FnOnce(&Scope) -> Cond) -> Result<Self> {
        self.where_expr(f)
    }

    pub fn exclude_expr(&self, f: impl FnOnce(&Scope) -> Cond) -> Result<Self> {
        self.exclude(Filter::Block(f(&Scope::new())))
    }

    pub fn having_expr(&self, f: impl FnOnce(&Scope) -> Cond) -> Result<Self> {
        self.having(Filter::Block(f(&Scope::new())))
    }

    fn add_where(&self, filter: Filter, negate: bool) -> Result<Self> {
        if self.opts.is_grouped() {
            return Err(Error::IllegalFilterContext(
                "where cannot be used on a grouped dataset, use having".to_string(),
            ));
        }
        let fragment = filter.normalize(self)?;
        let where_ = combine(self.opts.where_.as_ref(), fragment, negate);
        Ok(self.merge(|o| o.where_ = Some(where_)))
    }

    pub fn group(&self, cols: impl IntoColumns) -> Self {
        let cols = collect_columns(cols);
        self.merge(|o| o.group = (!cols.is_empty()).then_some(cols))
    }

    pub fn order(&self, cols: impl IntoColumns) -> Self {
        let cols = collect_columns(cols);
        self.merge(|o| o.order = (!cols.is_empty()).then_some(cols))
    }

    /// 不传列时翻转现有排序；否则按给定列的反方向排序。
    pub fn reverse_order(&self, cols: impl IntoColumns) -> Self {
        let cols = collect_columns(cols);
        if cols.is_empty() {
            return match &self.opts.order {
                Some(order) => {
                    let order = invert_order(order);
                    self.merge(|o| o.order = Some(order))
                }
                None => self.clone(),
            };
        }
        let order = invert_order(&cols);
        self.merge(|o| o.order = Some(order))
    }

    pub fn limit(&self, limit: impl Into<Limit>) -> Result<Self> {
        let (limit, offset) = limit.into().resolve()?;
        Ok(self.merge(|o| {
            o.limit = Some(limit);
            o.offset = offset;
        }))
    }

    pub fn distinct(&self) -> Self {
        self.merge(|o| o.distinct = true)
    }

    pub fn uniq(&self) -> Self {
        self.distinct()
    }

    /// 已带限定符的列原样解析，否则补上 `table.`。
    pub fn qualified_field_name(&self, column: impl Into<ColumnRef>, table: &str) -> Result<String> {
        let column = column.into();
        let resolved = self.resolve_column(&column)?;
        if column.is_qualified() {
            return Ok(resolved);
        }
        let table = self.resolve_column(&ColumnRef::new(table))?;
        Ok(format!("{table}.{resolved}"))
    }

    pub fn literal(&self, v: impl Into<Value>) -> Result<String> {
        literal(&v.into(), self)
    }

    /// `EXISTS (SELECT 1 FROM ...)`，可直接作为过滤条件。
    pub fn exists(&self) -> Result<Raw> {
        let sql = self.select(raw("1")).select_sql()?;
        Ok(Raw::new(format!("EXISTS ({sql})")))
    }

    /// 去掉行装饰器，`all()` 返回原始行。
    pub fn naked(&self) -> Self {
        Self {
            row_decorator: None,
            ..self.clone()
        }
    }

    pub fn set_row_decorator(&self, decorator: impl RowDecorator + 'static) -> Self {
        Self {
            row_decorator: Some(Box::new(decorator)),
            ..self.clone()
        }
    }

    pub fn row_decorator(&self) -> Option<&dyn RowDecorator> {
        self.row_decorator.as_deref()
    }

    pub fn flavor(&self) -> Flavor {
        self.config.flavor
    }

    pub fn quote_identifier(&self, name: &str) -> String {
        match &self.backend {
            Some(b) => b.quote_identifier(name),
            None => self.config.flavor.quote_identifier(name),
        }
    }

    pub fn bool_literal(&self, v: bool) -> String {
        match &self.backend {
            Some(b) => b.literal_bool(v),
            None => self.config.flavor.bool_literal(v).to_string(),
        }
    }

    pub fn regex_operator(&self) -> String {
        match &self.backend {
            Some(b) => b.regex_operator(),
            None => self.config.flavor.regex_operator().to_string(),
        }
    }

    pub(crate) fn resolve_column(&self, column: &ColumnRef) -> Result<String> {
        column.resolve_with(|name| self.quote_identifier(name))
    }

    /// 只有一个普通来源、没有其它选项的 dataset，在 FROM 中可以直接内联为表名。
    pub(crate) fn inline_source(&self) -> Option<&Value> {
        match self.opts.from.as_slice() {
            [single @ (Value::Column(_) | Value::Raw(_))] => {
                let bare = Options {
                    from: self.opts.from.clone(),
                    ..Options::default()
                };
                (*self.opts == bare).then_some(single)
            }
            _ => None,
        }
    }

    fn require_backend(&self) -> Result<&dyn Backend> {
        self.backend.as_deref().ok_or(Error::MissingBackend)
    }

    fn run(&self, sql: &str) -> Result<Vec<Row>> {
        execute_logged(self.require_backend()?, &self.config, sql)
    }

    /// 执行 SELECT，结果行经过行装饰器。
    pub fn all(&self) -> Result<Vec<Row>> {
        self.require_backend()?;
        let rows = self.run(&self.select_sql()?)?;
        Ok(match &self.row_decorator {
            Some(d) => rows.into_iter().map(|r| d.decorate(r)).collect(),
            None => rows,
        })
    }

    pub fn first(&self) -> Result<Option<Row>> {
        Ok(self.limit(1)?.all()?.into_iter().next())
    }

    pub fn count(&self) -> Result<u64> {
        self.require_backend()?;
        let rows = self.run(&self.count_sql()?)?;
        let value = rows.into_iter().next().and_then(|r| r.into_values().next());
        match value {
            Some(Value::I64(n)) => non_negative(n as i128, "count"),
            Some(Value::U64(n)) => Ok(n),
            other => Err(Error::Backend(BackendError(format!(
                "unexpected count result {other:?}"
            )))),
        }
    }

    /// 取每一行某一列的值（缺失列为 NULL）。
    pub fn map(&self, column: &str) -> Result<Vec<Value>> {
        Ok(self
            .naked()
            .all()?
            .into_iter()
            .map(|mut r| r.shift_remove(column).unwrap_or(Value::Null))
            .collect())
    }

    /// 按行取 (key, value) 两列，保持结果顺序。
    pub fn hash_column(&self, key: &str, value: &str) -> Result<Vec<(Value, Value)>> {
        Ok(self
            .naked()
            .all()?
            .into_iter()
            .map(|mut r| {
                let k = r.shift_remove(key).unwrap_or(Value::Null);
                let v = r.shift_remove(value).unwrap_or(Value::Null);
                (k, v)
            })
            .collect())
    }

    pub fn insert(&self, values: impl Into<InsertValues>) -> Result<Vec<Row>> {
        self.require_backend()?;
        self.run(&self.insert_sql(values)?)
    }

    pub fn update<K, V>(&self, values: impl IntoIterator<Item = (K, V)>) -> Result<Vec<Row>>
    where
        K: Into<ColumnRef>,
        V: Into<Value>,
    {
        self.require_backend()?;
        self.run(&self.update_sql(values)?)
    }

    pub fn delete(&self) -> Result<Vec<Row>> {
        self.require_backend()?;
        self.run(&self.delete_sql()?)
    }
}

/// 翻转排序方向：DESC <=> 升序；raw 文本形式按逗号逐项翻转 ASC/DESC。
fn invert_order(order: &[Value]) -> Vec<Value> {
    order.iter().map(invert_order_entry).collect()
}

fn invert_order_entry(v: &Value) -> Value {
    match v {
        Value::Expr(e) => match e.direction() {
            Some((true, inner)) => inner.clone(),
            Some((false, inner)) => Expr::binary(inner.clone(), "DESC", None).into(),
            None => Expr::binary(v.clone(), "DESC", None).into(),
        },
        Value::Raw(r) => Value::Raw(Raw::new(invert_text_order(r.as_str()))),
        _ => Expr::binary(v.clone(), "DESC", None).into(),
    }
}

fn invert_text_order(text: &str) -> String {
    text.split(',')
        .map(|item| {
            let item = item.trim();
            if let Some(col) = item.strip_suffix(" DESC") {
                col.trim_end().to_string()
            } else if let Some(col) = item.strip_suffix(" ASC") {
                format!("{} DESC", col.trim_end())
            } else {
                format!("{item} DESC")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

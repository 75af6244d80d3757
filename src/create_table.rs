//! CreateTableBuilder：由列/索引描述生成 CREATE TABLE、CREATE INDEX 语句。

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::flavor::Flavor;
use crate::string_builder::StringBuilder;
use crate::value::Value;

/// `ON DELETE` 动作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OnDelete {
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
    #[default]
    NoAction,
}

impl OnDelete {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// 列描述。
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    name: String,
    sql_type: String,
    size: Option<Value>,
    elements: Option<Vec<Value>>,
    unique: bool,
    null: Option<bool>,
    default: Option<Value>,
    primary_key: bool,
    references: Option<String>,
    on_delete: Option<OnDelete>,
    auto_increment: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            size: None,
            elements: None,
            unique: false,
            null: None,
            default: None,
            primary_key: false,
            references: None,
            on_delete: None,
            auto_increment: false,
        }
    }

    /// 长度；传序列可得到 `decimal(10, 2)` 形式。
    pub fn size(mut self, size: impl Into<Value>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// 枚举取值（如 `enum('a', 'b')`）。
    pub fn elements<T: Into<Value>>(mut self, elements: impl IntoIterator<Item = T>) -> Self {
        self.elements = Some(elements.into_iter().map(Into::into).collect());
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// `null(false)` 输出 `NOT NULL`。
    pub fn null(mut self, allow: bool) -> Self {
        self.null = Some(allow);
        self
    }

    pub fn default(mut self, v: impl Into<Value>) -> Self {
        self.default = Some(v.into());
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn references(mut self, table: impl Into<String>) -> Self {
        self.references = Some(table.into());
        self
    }

    pub fn on_delete(mut self, action: OnDelete) -> Self {
        self.on_delete = Some(action);
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    fn type_sql(&self) -> &str {
        match self.sql_type.as_str() {
            "double" => "double precision",
            other => other,
        }
    }

    fn to_sql(&self, ds: &Dataset) -> Result<String> {
        let mut buf = StringBuilder::new();
        buf.write_leading(&ds.quote_identifier(&self.name));
        buf.write_leading(self.type_sql());

        let size = match (&self.size, self.sql_type.as_str()) {
            (Some(size), _) => Some(size.clone()),
            (None, "varchar") => Some(Value::from(ds.config().default_string_size)),
            (None, _) => self.elements.clone().map(Value::List),
        };
        if let Some(size) = size {
            buf.write_char('(');
            buf.write_str(&ds.literal(size)?);
            buf.write_char(')');
        }

        if self.unique {
            buf.write_leading("UNIQUE");
        }
        if self.null == Some(false) {
            buf.write_leading("NOT NULL");
        }
        if let Some(default) = &self.default {
            buf.write_leading("DEFAULT");
            buf.write_leading(&ds.literal(default.clone())?);
        }
        if self.primary_key {
            buf.write_leading("PRIMARY KEY");
        }
        if let Some(table) = &self.references {
            buf.write_leading("REFERENCES");
            buf.write_leading(&ds.quote_identifier(table));
        }
        if let Some(action) = self.on_delete {
            buf.write_leading("ON DELETE");
            buf.write_leading(action.as_str());
        }
        if self.auto_increment {
            buf.write_leading(ds.flavor().auto_increment_sql());
        }
        Ok(buf.into_string())
    }
}

/// 索引描述；未命名时使用 `<table>_<col1>_<col2>_index`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    columns: Vec<String>,
    name: Option<String>,
    unique: bool,
}

impl IndexDef {
    pub fn new<T: Into<String>>(columns: impl IntoIterator<Item = T>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            name: None,
            unique: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    fn to_sql(&self, table: &str, ds: &Dataset) -> String {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| format!("{table}_{}_index", self.columns.join("_")));
        let fields = self
            .columns
            .iter()
            .map(|c| ds.quote_identifier(c))
            .collect::<Vec<_>>();

        let mut buf = StringBuilder::new();
        buf.write_leading(if self.unique {
            "CREATE UNIQUE INDEX"
        } else {
            "CREATE INDEX"
        });
        buf.write_leading(&ds.quote_identifier(&name));
        buf.write_leading("ON");
        buf.write_leading(&ds.quote_identifier(table));
        buf.write_leading("(");
        buf.write_strings(&fields, ", ");
        buf.write_char(')');
        buf.into_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableBuilder {
    table: String,
    columns: Vec<ColumnDef>,
    indexes: Vec<IndexDef>,
}

impl CreateTableBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&mut self, column: ColumnDef) -> &mut Self {
        self.columns.push(column);
        self
    }

    pub fn index(&mut self, index: IndexDef) -> &mut Self {
        self.indexes.push(index);
        self
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// 使用默认配置生成语句列表。
    pub fn build(&self) -> Result<Vec<String>> {
        self.build_with_config(&Config::default())
    }

    pub fn build_with_flavor(&self, flavor: Flavor) -> Result<Vec<String>> {
        self.build_with_config(&Config::from(flavor))
    }

    /// `CREATE TABLE` 在前，随后每个索引一条 `CREATE INDEX`。
    pub fn build_with_config(&self, config: &Config) -> Result<Vec<String>> {
        let ds = Dataset::new(*config);
        let defs = self
            .columns
            .iter()
            .map(|c| c.to_sql(&ds))
            .collect::<Result<Vec<_>>>()?;

        let mut buf = StringBuilder::new();
        buf.write_leading("CREATE TABLE");
        buf.write_leading(&ds.quote_identifier(&self.table));
        buf.write_leading("(");
        buf.write_strings(&defs, ", ");
        buf.write_char(')');

        let mut sqls = vec![buf.into_string()];
        sqls.extend(self.indexes.iter().map(|i| i.to_sql(&self.table, &ds)));
        Ok(sqls)
    }
}

pub fn create_table(table: impl Into<String>) -> CreateTableBuilder {
    CreateTableBuilder::new(table)
}

/// `DROP TABLE name`。
pub fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE {table}")
}

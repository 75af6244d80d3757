//! Config：显式传入 Database / Dataset 的配置对象（不使用进程级全局状态）。

use crate::flavor::Flavor;

/// varchar 未指定长度时的默认值。
pub const DEFAULT_STRING_SIZE: u32 = 255;

/// 日志中 SQL 的默认截断长度（字符数）。
pub const DEFAULT_MAX_LOGGED_SQL_LENGTH: usize = 200;

/// 构造 Dataset 时携带的配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// 未挂载 backend 时使用的方言。
    pub flavor: Flavor,
    /// `varchar` 列未指定 size 时的默认长度。
    pub default_string_size: u32,
    /// 执行日志里 SQL 的截断长度；`None` 表示不截断。
    pub max_logged_sql_length: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flavor: Flavor::default(),
            default_string_size: DEFAULT_STRING_SIZE,
            max_logged_sql_length: Some(DEFAULT_MAX_LOGGED_SQL_LENGTH),
        }
    }
}

impl From<Flavor> for Config {
    fn from(flavor: Flavor) -> Self {
        Self {
            flavor,
            ..Self::default()
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn with_default_string_size(mut self, size: u32) -> Self {
        self.default_string_size = size;
        self
    }

    pub fn with_max_logged_sql_length(mut self, len: Option<usize>) -> Self {
        self.max_logged_sql_length = len;
        self
    }

    /// 按配置截断用于日志输出的 SQL（按字符边界）。
    pub(crate) fn truncate_for_log<'a>(&self, sql: &'a str) -> std::borrow::Cow<'a, str> {
        match self.max_logged_sql_length {
            Some(max) if sql.chars().count() > max => {
                let cut: String = sql.chars().take(max).collect();
                std::borrow::Cow::Owned(format!("{cut}..."))
            }
            _ => std::borrow::Cow::Borrowed(sql),
        }
    }
}

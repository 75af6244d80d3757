//! SQL Flavor（方言）：控制标识符 Quote、布尔字面量、正则运算符等方言差异点。

use std::fmt;

/// 方言枚举。`Generic` 不对标识符加引号，其余方言按各自规则处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    #[default]
    Generic,
    MySQL,
    PostgreSQL,
    SQLite,
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Generic => "Generic",
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
        };
        f.write_str(s)
    }
}

impl Flavor {
    /// 为标识符加引号（引号字符本身会被双写）。
    pub fn quote_identifier(self, name: &str) -> String {
        match self {
            Self::Generic => name.to_string(),
            Self::MySQL => format!("`{}`", name.replace('`', "``")),
            Self::PostgreSQL | Self::SQLite => format!("\"{}\"", name.replace('"', "\"\"")),
        }
    }

    /// 布尔值字面量。
    pub fn bool_literal(self, v: bool) -> &'static str {
        match (self, v) {
            (Self::SQLite, true) => "1",
            (Self::SQLite, false) => "0",
            (_, true) => "TRUE",
            (_, false) => "FALSE",
        }
    }

    /// 正则匹配运算符。
    pub fn regex_operator(self) -> &'static str {
        match self {
            Self::PostgreSQL => "~",
            Self::Generic | Self::MySQL | Self::SQLite => "REGEXP",
        }
    }

    /// 自增列修饰。
    pub fn auto_increment_sql(self) -> &'static str {
        match self {
            Self::Generic | Self::SQLite => "AUTOINCREMENT",
            Self::MySQL => "AUTO_INCREMENT",
            Self::PostgreSQL => "GENERATED BY DEFAULT AS IDENTITY",
        }
    }

    /// 二进制字面量（十六进制）。
    pub fn bytes_literal(self, data: &[u8]) -> String {
        let mut out = String::with_capacity(data.len() * 2 + 12);
        match self {
            Self::PostgreSQL => {
                out.push_str("'\\x");
                push_hex(&mut out, data);
                out.push_str("'::bytea");
            }
            Self::Generic | Self::MySQL | Self::SQLite => {
                out.push_str("X'");
                push_hex(&mut out, data);
                out.push('\'');
            }
        }
        out
    }
}

fn push_hex(out: &mut String, data: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for &b in data {
        out.push(HEX[((b >> 4) & 0xF) as usize] as char);
        out.push(HEX[(b & 0xF) as usize] as char);
    }
}

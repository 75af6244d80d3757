//! 模板插值：将 `?` 占位符按顺序替换为参数的字面量。
//!
//! 引号内的 `?` 不做替换；多出来的 `?` 原样保留，多出来的参数被忽略。
//! 序列参数按 `a, b, c` 展开，不加括号（由模板自己写 `IN (?)`）。

use crate::dataset::Dataset;
use crate::error::Result;
use crate::literal::write_literal;
use crate::value::Value;

pub(crate) fn interpolate(template: &str, args: &[Value], ds: &Dataset) -> Result<String> {
    let mut out = String::with_capacity(template.len() + args.len() * 16);
    let mut quote: Option<char> = None;
    let mut escaping = false;
    let mut arg_idx = 0usize;

    for c in template.chars() {
        if escaping {
            out.push(c);
            escaping = false;
            continue;
        }

        match c {
            '\\' if quote.is_some() => {
                out.push(c);
                escaping = true;
            }
            '\'' | '"' | '`' => {
                if quote == Some(c) {
                    quote = None;
                } else if quote.is_none() {
                    quote = Some(c);
                }
                out.push(c);
            }
            '?' if quote.is_none() && arg_idx < args.len() => {
                write_literal(&mut out, &args[arg_idx], ds)?;
                arg_idx += 1;
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

/// 文本是否被一对完整的括号包住（忽略引号内的括号）。
pub(crate) fn is_enclosed(sql: &str) -> bool {
    let sql = sql.trim();
    if !sql.starts_with('(') || !sql.ends_with(')') {
        return false;
    }

    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let last = sql.len() - 1;
    for (i, c) in sql.char_indices() {
        match c {
            '\'' | '"' | '`' => {
                if quote == Some(c) {
                    quote = None;
                } else if quote.is_none() {
                    quote = Some(c);
                }
            }
            '(' if quote.is_none() => depth += 1,
            ')' if quote.is_none() => {
                depth = depth.saturating_sub(1);
                if depth == 0 && i != last {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0 && quote.is_none()
}

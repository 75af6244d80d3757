//! 字面量编码：所有用户值进入 SQL 的唯一出口。

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::value::Value;
use time::macros::format_description;

/// 将值编码为 SQL 字面量文本。
pub(crate) fn literal(v: &Value, ds: &Dataset) -> Result<String> {
    let mut out = String::new();
    write_literal(&mut out, v, ds)?;
    Ok(out)
}

pub(crate) fn write_literal(out: &mut String, v: &Value, ds: &Dataset) -> Result<()> {
    match v {
        Value::Null => out.push_str("NULL"),
        Value::Bool(b) => out.push_str(&ds.bool_literal(*b)),
        Value::I64(n) => out.push_str(&n.to_string()),
        Value::U64(n) => out.push_str(&n.to_string()),
        Value::F64(n) => {
            if !n.is_finite() {
                return Err(Error::unsupported_literal(format!("float {n}")));
            }
            out.push_str(&n.to_string());
        }
        Value::String(s) => quote_string(out, s),
        Value::Bytes(b) => out.push_str(&ds.flavor().bytes_literal(b)),
        Value::Date(d) => {
            let s = d
                .format(format_description!("[year]-[month]-[day]"))
                .map_err(|e| Error::unsupported_literal(format!("date: {e}")))?;
            quote_string(out, &s);
        }
        Value::DateTime(dt) => {
            let s = if dt.nanosecond() == 0 {
                dt.format(format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second]"
                ))
            } else {
                dt.format(format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]"
                ))
            }
            .map_err(|e| Error::unsupported_literal(format!("datetime: {e}")))?;
            quote_string(out, &s);
        }
        Value::Raw(r) => out.push_str(r.as_str()),
        Value::List(items) => {
            if items.is_empty() {
                out.push_str("NULL");
                return Ok(());
            }
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_literal(out, item, ds)?;
            }
        }
        Value::Column(c) => out.push_str(&ds.resolve_column(c)?),
        Value::Expr(e) => out.push_str(&e.render(ds)?),
        Value::Dataset(sub) => {
            out.push('(');
            out.push_str(&sub.select_sql()?);
            out.push(')');
        }
        Value::Range(_) | Value::Pattern(_) => {
            return Err(Error::unsupported_literal(v.type_name()));
        }
    }
    Ok(())
}

/// 单引号包裹，内部单引号双写；其他字符原样保留。
pub(crate) fn quote_string(out: &mut String, s: &str) {
    out.reserve(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::col;
    use crate::config::Config;
    use crate::flavor::Flavor;
    use crate::modifiers::{list, raw};
    use crate::value::RangeValue;
    use pretty_assertions::assert_eq;
    use time::macros::{date, datetime};

    fn lit(v: impl Into<Value>) -> String {
        literal(&v.into(), &Dataset::default()).unwrap()
    }

    #[test]
    fn scalars() {
        assert_eq!(lit(()), "NULL");
        assert_eq!(lit(123), "123");
        assert_eq!(lit(1.5), "1.5");
        assert_eq!(lit(-7_i64), "-7");
        assert_eq!(lit(true), "TRUE");
        assert_eq!(lit(false), "FALSE");
    }

    #[test]
    fn strings_double_single_quotes() {
        assert_eq!(lit("abc"), "'abc'");
        assert_eq!(lit("a\"x\"bc"), "'a\"x\"bc'");
        assert_eq!(lit("a'b''c"), "'a''b''''c'");
    }

    #[test]
    fn string_literal_decodes_back() {
        for s in ["", "'", "it's", "''x''", "plain", "a\\b"] {
            let encoded = lit(s.to_string());
            let inner = &encoded[1..encoded.len() - 1];
            assert_eq!(inner.replace("''", "'"), s);
        }
    }

    #[test]
    fn lists() {
        assert_eq!(lit(Vec::<i64>::new()), "NULL");
        assert_eq!(
            lit(list([Value::from(1), "a'b''c".into(), 3.into()])),
            "1, 'a''b''''c', 3"
        );
    }

    #[test]
    fn raw_and_column() {
        assert_eq!(lit(raw("COUNT(*)")), "COUNT(*)");
        assert_eq!(lit(col("items__abc___a")), "items.abc AS a");
    }

    #[test]
    fn dates() {
        assert_eq!(lit(date!(2024 - 03 - 09)), "'2024-03-09'");
        assert_eq!(
            lit(datetime!(2019-04-24 12:23:34 UTC)),
            "'2019-04-24 12:23:34'"
        );
        assert_eq!(
            lit(datetime!(2019-04-24 12:23:34.5 UTC)),
            "'2019-04-24 12:23:34.500000'"
        );
    }

    #[test]
    fn bool_and_bytes_follow_flavor() {
        let ds = Dataset::new(Config::from(Flavor::SQLite));
        assert_eq!(literal(&Value::Bool(true), &ds).unwrap(), "1");
        assert_eq!(literal(&Value::bytes(vec![0xAB, 0x01]), &ds).unwrap(), "X'AB01'");
    }

    #[test]
    fn subquery_is_parenthesized() {
        let sub = Dataset::default().from("test").select("name");
        assert_eq!(lit(sub), "(SELECT name FROM test)");
    }

    #[test]
    fn unsupported_values() {
        let ds = Dataset::default();
        let r = literal(&RangeValue::new(1, 2, false).into(), &ds);
        assert!(matches!(r, Err(Error::UnsupportedLiteralType(_))));
        let r = literal(&Value::F64(f64::NAN), &ds);
        assert!(matches!(r, Err(Error::UnsupportedLiteralType(_))));
    }
}

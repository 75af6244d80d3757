#[cfg(test)]
mod tests {
    use crate::flavor::Flavor;
    use pretty_assertions::assert_eq;

    #[test]
    fn flavor_display() {
        let cases = vec![
            (Flavor::Generic, "Generic"),
            (Flavor::MySQL, "MySQL"),
            (Flavor::PostgreSQL, "PostgreSQL"),
            (Flavor::SQLite, "SQLite"),
        ];

        for (f, expected) in cases {
            assert_eq!(f.to_string(), expected);
        }
    }

    #[test]
    fn flavor_quote_identifier() {
        assert_eq!(Flavor::Generic.quote_identifier("name"), "name");
        assert_eq!(Flavor::MySQL.quote_identifier("name"), "`name`");
        assert_eq!(Flavor::PostgreSQL.quote_identifier("name"), "\"name\"");
        assert_eq!(Flavor::SQLite.quote_identifier("na\"me"), "\"na\"\"me\"");
        assert_eq!(Flavor::MySQL.quote_identifier("na`me"), "`na``me`");
    }

    #[test]
    fn flavor_bool_and_regex_hooks() {
        assert_eq!(Flavor::Generic.bool_literal(true), "TRUE");
        assert_eq!(Flavor::PostgreSQL.bool_literal(false), "FALSE");
        assert_eq!(Flavor::SQLite.bool_literal(true), "1");
        assert_eq!(Flavor::SQLite.bool_literal(false), "0");

        assert_eq!(Flavor::PostgreSQL.regex_operator(), "~");
        assert_eq!(Flavor::MySQL.regex_operator(), "REGEXP");
    }

    #[test]
    fn flavor_bytes_literal() {
        assert_eq!(Flavor::Generic.bytes_literal(&[0xAB, 0x01]), "X'AB01'");
        assert_eq!(Flavor::PostgreSQL.bytes_literal(&[0xFF]), "'\\xFF'::bytea");
        assert_eq!(Flavor::SQLite.bytes_literal(&[]), "X''");
    }
}

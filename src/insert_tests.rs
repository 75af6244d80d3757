#[cfg(test)]
mod tests {
    use crate::column::col;
    use crate::error::Error;
    use crate::insert::InsertValues;
    use crate::{Dataset, hash, values};
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn test_ds() -> Dataset {
        Dataset::default().from("test")
    }

    #[test]
    fn insert_default_values() {
        assert_eq!(
            test_ds().insert_sql(()).unwrap(),
            "INSERT INTO test DEFAULT VALUES"
        );
        assert_eq!(
            test_ds().insert_sql(InsertValues::default()).unwrap(),
            "INSERT INTO test DEFAULT VALUES"
        );
    }

    #[test]
    fn insert_mapping() {
        assert_eq!(
            test_ds()
                .insert_sql(hash! { "name" => "wxyz", "price" => 342 })
                .unwrap(),
            "INSERT INTO test (name, price) VALUES ('wxyz', 342)"
        );

        let mut m = IndexMap::new();
        m.insert("price", 1.5);
        assert_eq!(
            test_ds().insert_sql(m).unwrap(),
            "INSERT INTO test (price) VALUES (1.5)"
        );
    }

    #[test]
    fn insert_positional() {
        assert_eq!(
            test_ds().insert_sql(values!["a", 2, 6.5]).unwrap(),
            "INSERT INTO test VALUES ('a', 2, 6.5)"
        );
        assert_eq!(
            test_ds().insert_sql(values![col("now_col"), ()]).unwrap(),
            "INSERT INTO test VALUES (now_col, NULL)"
        );
    }

    #[test]
    fn insert_requires_single_source() {
        assert!(matches!(
            Dataset::default().from(("a", "b")).insert_sql(()),
            Err(Error::MultiTableMutation("insert"))
        ));
        assert!(matches!(
            Dataset::default().insert_sql(()),
            Err(Error::InvalidOptionValue(_))
        ));
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::{Dataset, hash};
    use pretty_assertions::assert_eq;

    fn test_ds() -> Dataset {
        Dataset::default().from("test")
    }

    #[test]
    fn update_sql() {
        assert_eq!(
            test_ds().update_sql([("name", "abc")]).unwrap(),
            "UPDATE test SET name = 'abc'"
        );
        assert_eq!(
            test_ds()
                .where_([("region", "Asia")])
                .unwrap()
                .update_sql(hash! { "name" => "abc", "price" => 10 })
                .unwrap(),
            "UPDATE test SET name = 'abc', price = 10 WHERE (region = 'Asia')"
        );
    }

    #[test]
    fn update_errors() {
        assert!(matches!(
            Dataset::default().from(("a", "b")).update_sql([("x", 1)]),
            Err(Error::MultiTableMutation("update"))
        ));
        assert!(matches!(
            test_ds().group("t").update_sql([("x", 1)]),
            Err(Error::GroupedMutation("update"))
        ));
        assert!(matches!(
            test_ds().update_sql(Vec::<(&str, i32)>::new()),
            Err(Error::InvalidOptionValue(_))
        ));
    }

    #[test]
    fn delete_sql() {
        assert_eq!(test_ds().delete_sql().unwrap(), "DELETE FROM test");
        assert_eq!(
            test_ds()
                .exclude([("region", "Asia")])
                .unwrap()
                .delete_sql()
                .unwrap(),
            "DELETE FROM test WHERE NOT (region = 'Asia')"
        );
    }

    #[test]
    fn delete_errors() {
        assert!(matches!(
            Dataset::default().from(("a", "b")).delete_sql(),
            Err(Error::MultiTableMutation("delete"))
        ));
        assert!(matches!(
            test_ds().group("t").delete_sql(),
            Err(Error::GroupedMutation("delete"))
        ));
        assert!(matches!(
            Dataset::default().delete_sql(),
            Err(Error::InvalidOptionValue(_))
        ));
    }
}

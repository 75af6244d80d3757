#[cfg(test)]
mod tests {
    use crate::column::col;
    use crate::config::Config;
    use crate::error::Error;
    use crate::flavor::Flavor;
    use crate::modifiers::raw;
    use crate::value::Value;
    use crate::{Dataset, Limit};
    use pretty_assertions::assert_eq;

    fn test_ds() -> Dataset {
        Dataset::default().from("test")
    }

    #[test]
    fn mutators_do_not_affect_original() {
        let base = test_ds();
        let filtered = base.where_([("a", 1)]).unwrap();
        let ordered = filtered.order("name");
        let _limited = ordered.limit(10).unwrap();

        assert_eq!(base.sql().unwrap(), "SELECT * FROM test");
        assert_eq!(filtered.sql().unwrap(), "SELECT * FROM test WHERE (a = 1)");
        assert_eq!(
            ordered.sql().unwrap(),
            "SELECT * FROM test WHERE (a = 1) ORDER BY name"
        );
        assert!(base.options().where_fragment().is_none());
        assert_eq!(ordered.options().limit(), None);
    }

    #[test]
    fn clones_share_nothing_mutable() {
        let a = test_ds();
        let b = a.clone().select("x");
        assert_ne!(a, b);
        assert_eq!(a, test_ds());
    }

    #[test]
    fn limit_forms() {
        let ds = test_ds();
        let cases: Vec<(Limit, &str)> = vec![
            (10.into(), "SELECT * FROM test LIMIT 10"),
            ((6, 10).into(), "SELECT * FROM test LIMIT 6 OFFSET 10"),
            ((3..7).into(), "SELECT * FROM test LIMIT 4 OFFSET 3"),
            ((3..=7).into(), "SELECT * FROM test LIMIT 5 OFFSET 3"),
        ];
        for (limit, expected) in cases {
            assert_eq!(ds.limit(limit).unwrap().sql().unwrap(), expected);
        }
    }

    #[test]
    fn invalid_limits() {
        let ds = test_ds();
        assert!(matches!(ds.limit(-1), Err(Error::InvalidOptionValue(_))));
        assert!(matches!(ds.limit((5, -2)), Err(Error::InvalidOptionValue(_))));
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = 7..3;
        assert!(matches!(ds.limit(reversed), Err(Error::InvalidOptionValue(_))));
    }

    #[test]
    fn select_forms() {
        let ds = test_ds();
        assert_eq!(
            ds.select(col("test").all()).sql().unwrap(),
            "SELECT test.* FROM test"
        );
        assert_eq!(
            ds.select(col("test__name").as_("n")).sql().unwrap(),
            "SELECT test.name AS n FROM test"
        );
        assert_eq!(
            ds.select("test__name___n").sql().unwrap(),
            "SELECT test.name AS n FROM test"
        );
        assert_eq!(
            ds.select(("a", "b")).select(()).sql().unwrap(),
            "SELECT * FROM test"
        );
        assert_eq!(
            ds.select("a").select_all().sql().unwrap(),
            "SELECT * FROM test"
        );
    }

    #[test]
    fn distinct_and_uniq() {
        assert_eq!(
            test_ds().select("name").distinct().sql().unwrap(),
            "SELECT DISTINCT name FROM test"
        );
        assert_eq!(
            test_ds().select("name").uniq().sql().unwrap(),
            "SELECT DISTINCT name FROM test"
        );
    }

    #[test]
    fn order_and_reverse_order() {
        let ds = test_ds();
        assert_eq!(
            ds.order(("name", col("price").desc())).sql().unwrap(),
            "SELECT * FROM test ORDER BY name, price DESC"
        );
        assert_eq!(
            ds.reverse_order("name").sql().unwrap(),
            "SELECT * FROM test ORDER BY name DESC"
        );
        assert_eq!(
            ds.reverse_order(col("name").desc()).sql().unwrap(),
            "SELECT * FROM test ORDER BY name"
        );
        assert_eq!(
            ds.order(("name", col("price").desc()))
                .reverse_order(())
                .sql()
                .unwrap(),
            "SELECT * FROM test ORDER BY name DESC, price"
        );
        assert_eq!(
            ds.order(raw("clumsy DESC, fool")).reverse_order(()).sql().unwrap(),
            "SELECT * FROM test ORDER BY clumsy, fool DESC"
        );
        assert_eq!(ds.reverse_order(()), ds);
    }

    #[test]
    fn from_subquery() {
        let ds = Dataset::default();
        assert_eq!(
            ds.from(ds.from("a")).sql().unwrap(),
            "SELECT * FROM a"
        );
        let sub = ds.from("a").where_([("a", 1)]).unwrap();
        assert_eq!(
            ds.from(sub).sql().unwrap(),
            "SELECT * FROM (SELECT * FROM a WHERE (a = 1))"
        );
    }

    #[test]
    fn grouping_rules() {
        let grouped = test_ds().group("t");
        assert_eq!(
            grouped.having("sum(x) > 10").unwrap().sql().unwrap(),
            "SELECT * FROM test GROUP BY t HAVING sum(x) > 10"
        );
        assert!(matches!(
            grouped.where_([("a", 1)]),
            Err(Error::IllegalFilterContext(_))
        ));
        assert!(matches!(
            grouped.exclude("a = 1"),
            Err(Error::IllegalFilterContext(_))
        ));
        assert!(matches!(
            test_ds().having("sum(x) > 10"),
            Err(Error::IllegalFilterContext(_))
        ));
    }

    #[test]
    fn qualified_field_name() {
        let ds = Dataset::default().from("items");
        assert_eq!(ds.qualified_field_name("test.a", "items").unwrap(), "test.a");
        assert_eq!(ds.qualified_field_name("ccc__b", "items").unwrap(), "ccc.b");
        assert_eq!(ds.qualified_field_name("a", "items").unwrap(), "items.a");
    }

    #[test]
    fn literal_delegates() {
        let ds = test_ds();
        assert_eq!(ds.literal(Vec::<i64>::new()).unwrap(), "NULL");
        assert_eq!(
            ds.literal(vec![Value::from(1), "a'b''c".into(), 3.into()]).unwrap(),
            "1, 'a''b''''c', 3"
        );
        assert_eq!(ds.literal(col("items__abc___a")).unwrap(), "items.abc AS a");
        assert_eq!(ds.literal(raw("NOW()")).unwrap(), "NOW()");
        assert_eq!(
            ds.literal(ds.select("name")).unwrap(),
            "(SELECT name FROM test)"
        );
    }

    #[test]
    fn flavor_quoting() {
        let ds = Dataset::new(Config::from(Flavor::MySQL))
            .from("items")
            .select(("id", "items__name___n"))
            .where_([("price", 10)])
            .unwrap();
        assert_eq!(
            ds.sql().unwrap(),
            "SELECT `id`, `items`.`name` AS `n` FROM `items` WHERE (`price` = 10)"
        );
    }

    #[test]
    fn column_tokens_cannot_escape_identifier_quotes() {
        let pg = Dataset::new(Config::from(Flavor::PostgreSQL)).from("test");
        assert_eq!(pg.literal(col("bad\"name")).unwrap(), "\"bad\"\"name\"");
        assert_eq!(pg.literal(col("my column")).unwrap(), "\"my column\"");
        assert_eq!(
            pg.where_([("x\" = 1 OR \"y", 1)]).unwrap().sql().unwrap(),
            "SELECT * FROM \"test\" WHERE (\"x\"\" = 1 OR \"\"y\" = 1)"
        );
        assert_eq!(
            pg.select("a; DROP TABLE test").sql().unwrap(),
            "SELECT \"a; DROP TABLE test\" FROM \"test\""
        );
        assert_eq!(
            pg.update_sql([("na\"me", "x")]).unwrap(),
            "UPDATE \"test\" SET \"na\"\"me\" = 'x'"
        );
    }

    #[test]
    fn raw_text_is_emitted_verbatim() {
        let pg = Dataset::new(Config::from(Flavor::PostgreSQL)).from("test");
        assert_eq!(
            pg.select(raw("COUNT(*)")).order(raw("a DESC")).sql().unwrap(),
            "SELECT COUNT(*) FROM \"test\" ORDER BY a DESC"
        );
    }

    #[test]
    fn row_decorator_and_naked() {
        let ds = test_ds().set_row_decorator(|row: crate::Row| row);
        assert!(ds.row_decorator().is_some());
        assert!(ds.naked().row_decorator().is_none());
        assert_eq!(ds.naked(), ds);
    }
}

#[cfg(test)]
mod tests {
    use crate::column::{ColumnRef, col};
    use crate::modifiers::raw;
    use crate::value::Value;
    use crate::{Dataset, cols, hash, values};
    use pretty_assertions::assert_eq;

    #[test]
    fn cols_macro_mixes_column_kinds() {
        let ds = Dataset::default()
            .from("items")
            .select(cols!["id", col("price").desc(), raw("1")]);
        assert_eq!(ds.sql().unwrap(), "SELECT id, price DESC, 1 FROM items");
    }

    #[test]
    fn tuples_and_arrays_expand() {
        let ds = Dataset::default()
            .from(("a", "b"))
            .select(["x", "y"])
            .order((col("x"), col("y").desc()));
        assert_eq!(ds.sql().unwrap(), "SELECT x, y FROM a, b ORDER BY x, y DESC");
    }

    #[test]
    fn hash_macro_keeps_order() {
        let h = hash! { "name" => "abc", "price" => 342 };
        assert_eq!(
            h,
            vec![
                (ColumnRef::new("name"), Value::from("abc")),
                (ColumnRef::new("price"), Value::I64(342)),
            ]
        );
    }

    #[test]
    fn values_macro() {
        assert_eq!(
            values!["a", 2, 6.5],
            vec![Value::from("a"), Value::I64(2), Value::F64(6.5)]
        );
        assert!(values![].is_empty());
    }
}

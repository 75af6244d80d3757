//! 语句拼接工具：按子句追加，自动补空格。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    /// 写入 `s`；如果不是首次写入，会先写入一个空格。
    pub(crate) fn write_leading(&mut self, s: &str) {
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
        self.buf.push_str(s);
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub(crate) fn write_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// 用 `sep` 连接非空片段。
    pub(crate) fn write_strings(&mut self, items: &[String], sep: &str) {
        let mut first_added = false;
        for s in items {
            if s.is_empty() {
                continue;
            }
            if first_added {
                self.buf.push_str(sep);
            }
            self.buf.push_str(s);
            first_added = true;
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::StringBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn leading_space_between_clauses() {
        let mut buf = StringBuilder::new();
        buf.write_leading("DELETE FROM");
        buf.write_leading("t");
        buf.write_char(';');
        assert_eq!(buf.into_string(), "DELETE FROM t;");
    }

    #[test]
    fn write_strings_skips_empty() {
        let mut buf = StringBuilder::new();
        buf.write_strings(&["a".to_string(), String::new(), "b".to_string()], ", ");
        assert_eq!(buf.into_string(), "a, b");
    }
}

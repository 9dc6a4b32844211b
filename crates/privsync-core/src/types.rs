//! Core types for privsync

/// A column value as returned by a driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// NULL value
    Null,
    /// UTF-8 string
    String(String),
    /// Binary data that is not valid UTF-8
    Bytes(Vec<u8>),
}

impl Value {
    /// Check if the value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Textual content of a string-like value.
    ///
    /// Byte strings are accepted when they are valid UTF-8, since servers
    /// often report text columns through the binary protocol as raw bytes.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            Value::Null => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::String(v) => write!(f, "{}", v),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

/// A row from a query result
#[derive(Debug, Clone, Default)]
pub struct Row {
    /// Column values, in column order
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Get a value by column index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

/// Query result
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Column names
    pub columns: Vec<String>,
    /// Result rows
    pub rows: Vec<Row>,
}

impl QueryResult {
    /// Create a new empty query result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a single-column result, one row per entry.
    ///
    /// Shaped like a `SHOW GRANTS` report.
    pub fn single_column(
        column: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self {
            columns: vec![column.into()],
            rows: values.into_iter().map(|value| Row::new(vec![value])).collect(),
        }
    }
}

/// Result of a statement that returns no rows
#[derive(Debug, Clone, Default)]
pub struct StatementResult {
    /// Rows affected
    pub affected_rows: u64,
    /// Warnings reported by the server
    pub warnings: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_as_text_accepts_utf8_bytes() {
        let value = Value::Bytes(b"GRANT USAGE ON *.* TO `app`@`%`".to_vec());
        assert_eq!(value.as_text(), Some("GRANT USAGE ON *.* TO `app`@`%`"));
    }

    #[test]
    fn test_as_text_rejects_invalid_bytes_and_null() {
        assert_eq!(Value::Bytes(vec![0xff, 0xfe]).as_text(), None);
        assert_eq!(Value::Null.as_text(), None);
        assert_eq!(Value::Bytes(vec![0xff, 0xfe]).to_string(), "<2 bytes>");
    }

    #[test]
    fn test_single_column_result() {
        let result = QueryResult::single_column(
            "Grants for app@%",
            vec![Value::String("a".into()), Value::Null],
        );
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.columns, vec!["Grants for app@%".to_string()]);
        assert_eq!(result.rows[0].get(0), Some(&Value::String("a".into())));
        assert!(result.rows[1].get(0).is_some_and(Value::is_null));
        assert!(QueryResult::empty().rows.is_empty());
    }
}

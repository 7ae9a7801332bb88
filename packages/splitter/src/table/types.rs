//! Types for extracted tables.

/// Rows and declared column count of one parsed table fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableFragment {
    /// Cell texts per row; row 0 is the header row.
    pub rows: Vec<Vec<String>>,

    /// Number of `<col>` elements in the `<colgroup>`, 0 without one.
    pub column_count: usize,
}

impl TableFragment {
    /// The header row, if the table has any rows.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// All rows after the header.
    #[must_use]
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_body() {
        let table = TableFragment {
            rows: vec![vec!["H".to_string()], vec!["a".to_string()], vec!["b".to_string()]],
            column_count: 1,
        };
        assert_eq!(table.header(), Some(&["H".to_string()][..]));
        assert_eq!(table.body().len(), 2);
    }

    #[test]
    fn test_empty_table() {
        let table = TableFragment::default();
        assert!(table.header().is_none());
        assert!(table.body().is_empty());
    }
}

//! The tabular result handed to callers.

use polars::prelude::*;

/// A table of API records.
///
/// `Table` wraps a Polars DataFrame. Tables built from keyed payloads also
/// record the name of the column that holds the originating key (for
/// indicator metadata this is `IndicatorID`); the index column is always the
/// first column of the frame. Tables built from plain record listings have
/// no index column and are addressed positionally.
///
/// # Example
///
/// ```no_run
/// use fingertips_types::Table;
/// use polars::prelude::*;
///
/// let df = df! {
///     "IndicatorID" => &[90630i64, 93088],
///     "Name" => &["Smoking prevalence", "Obesity prevalence"],
/// }.unwrap();
///
/// let table = Table::with_index(df, "IndicatorID");
/// assert_eq!(table.index_name(), Some("IndicatorID"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Table {
    data: DataFrame,
    index: Option<PlSmallStr>,
}

impl Table {
    /// Creates a table without an index column.
    pub const fn new(data: DataFrame) -> Self {
        Self { data, index: None }
    }

    /// Creates a table whose column `index` is its index.
    pub fn with_index(data: DataFrame, index: impl Into<PlSmallStr>) -> Self {
        Self {
            data,
            index: Some(index.into()),
        }
    }

    /// A table with zero rows and zero columns.
    ///
    /// This is what every failed or empty fetch turns into.
    pub fn empty() -> Self {
        Self::new(DataFrame::empty())
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn frame(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Name of the index column, if the table has one.
    pub fn index_name(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// The index column, if the table has one.
    pub fn index(&self) -> Option<&Column> {
        self.index
            .as_deref()
            .and_then(|name| self.data.column(name).ok())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Number of columns, index column included.
    pub fn width(&self) -> usize {
        self.data.width()
    }

    /// Whether the table holds no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0 || self.data.width() == 0
    }

    /// Returns the column names in order.
    pub fn columns(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Checks if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Gets a column by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the column does not exist.
    pub fn column(&self, name: &str) -> PolarsResult<&Column> {
        self.data.column(name)
    }
}

impl From<DataFrame> for Table {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df! {
            "AreaCode" => &["E06000001", "E06000002"],
            "Value" => &[12.5, 17.25],
        }
        .unwrap()
    }

    #[test]
    fn test_empty_table_has_no_rows_or_columns() {
        let table = Table::empty();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.width(), 0);
        assert!(table.index_name().is_none());
    }

    #[test]
    fn test_table_accessors() {
        let table = Table::new(sample());
        assert_eq!(table.len(), 2);
        assert_eq!(table.width(), 2);
        assert_eq!(table.columns(), vec!["AreaCode", "Value"]);
        assert!(table.has_column("Value"));
        assert!(!table.has_column("Missing"));
        assert!(table.column("AreaCode").is_ok());
        assert!(table.index().is_none());
    }

    #[test]
    fn test_table_with_index() {
        let table = Table::with_index(sample(), "AreaCode");
        assert_eq!(table.index_name(), Some("AreaCode"));
        let index = table.index().unwrap();
        assert_eq!(index.name().as_str(), "AreaCode");
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_into_inner() {
        let df = Table::from(sample()).into_inner();
        assert_eq!(df.height(), 2);
    }
}

//! Uploaded CSV datasets.

use crate::error::DatasetError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Name of the categorical column identifying each row's crop.
pub const LABEL_COLUMN: &str = "label";

/// Cell texts read as a missing value, compared after trimming.
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell holds no value.
pub fn is_missing(cell: &str) -> bool {
    NA_TOKENS.contains(&cell.trim())
}

/// Parsed values of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Every present cell parsed as a number; missing or non-finite cells are `None`.
    Numeric(Vec<Option<f64>>),
    Categorical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }

    /// Present numeric values, skipping missing cells. `None` for categorical columns.
    pub fn numbers(&self) -> Option<impl Iterator<Item = f64> + '_> {
        match &self.data {
            ColumnData::Numeric(values) => Some(values.iter().filter_map(|v| *v)),
            ColumnData::Categorical => None,
        }
    }
}

/// A CSV table with typed columns and the raw cells kept for preview and grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = File::open(path.as_ref()).map_err(csv::Error::from)?;
        Self::from_reader(file)
    }

    /// Parses comma-separated text with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = rdr.headers()?.clone();
        if headers.is_empty() {
            return Err(DatasetError::MissingHeader);
        }
        let names: Vec<String> = headers.iter().map(str::to_string).collect();
        for (idx, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(DatasetError::EmptyColumnName(idx));
            }
            if names[..idx].contains(name) {
                return Err(DatasetError::DuplicateColumn(name.clone()));
            }
        }

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        let columns = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Column {
                data: infer_column(&rows, idx),
                name,
            })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Every column except `label`, as offered for grouped views.
    pub fn feature_columns(&self) -> impl Iterator<Item = &str> {
        self.column_names().filter(|n| *n != LABEL_COLUMN)
    }

    pub fn has_label(&self) -> bool {
        self.column(LABEL_COLUMN).is_some()
    }

    /// Raw text of the label column, one entry per row.
    pub fn labels(&self) -> Option<Vec<&str>> {
        let idx = self.column_index(LABEL_COLUMN)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows as raw cells.
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

fn infer_column(rows: &[Vec<String>], idx: usize) -> ColumnData {
    let mut values = Vec::with_capacity(rows.len());
    for row in rows {
        let cell = row[idx].trim();
        if is_missing(cell) {
            values.push(None);
            continue;
        }
        match cell.parse::<f64>() {
            Ok(v) if v.is_finite() => values.push(Some(v)),
            // other NaN spellings and infinities count as missing
            Ok(_) => values.push(None),
            Err(_) => return ColumnData::Categorical,
        }
    }
    ColumnData::Numeric(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    const CROPS: &str = "\
N,P,K,temperature,humidity,ph,rainfall,label
90,42,43,20.87,82.00,6.50,202.93,rice
85,58,41,21.77,80.31,7.03,226.65,rice
71,54,16,22.61,63.69,5.74,87.75,maize
61,44,17,26.10,71.57,6.93,102.26,maize
";

    #[test]
    fn parses_typed_columns() -> anyhow::Result<()> {
        let ds = Dataset::from_reader(CROPS.as_bytes())?;
        assert_eq!(ds.row_count(), 4);
        assert!(ds.has_label());
        assert!(ds.column("rainfall").unwrap().is_numeric());
        assert!(!ds.column(LABEL_COLUMN).unwrap().is_numeric());
        assert_eq!(
            ds.feature_columns().collect::<Vec<_>>(),
            ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"]
        );
        assert_eq!(ds.labels().unwrap(), ["rice", "rice", "maize", "maize"]);
        Ok(())
    }

    #[test]
    fn empty_cells_are_missing_numbers() -> anyhow::Result<()> {
        let ds = Dataset::from_reader("a,b\n1,x\n,y\n3,\n".as_bytes())?;
        let a = ds.column("a").unwrap();
        assert_eq!(a.data, ColumnData::Numeric(vec![Some(1.0), None, Some(3.0)]));
        assert_eq!(a.numbers().unwrap().collect::<Vec<_>>(), [1.0, 3.0]);
        assert!(ds.column("b").unwrap().numbers().is_none());
        Ok(())
    }

    #[rstest]
    #[case("")]
    #[case("#N/A")]
    #[case("#N/A N/A")]
    #[case("#NA")]
    #[case("-1.#IND")]
    #[case("-1.#QNAN")]
    #[case("-NaN")]
    #[case("-nan")]
    #[case("1.#IND")]
    #[case("1.#QNAN")]
    #[case("<NA>")]
    #[case("N/A")]
    #[case("NA")]
    #[case("NULL")]
    #[case("NaN")]
    #[case("None")]
    #[case("n/a")]
    #[case("nan")]
    #[case("null")]
    fn na_tokens_keep_a_column_numeric(#[case] token: &str) -> anyhow::Result<()> {
        let csv = format!("N,label\n10,rice\n{token},rice\n30,maize\n");
        let ds = Dataset::from_reader(csv.as_bytes())?;
        let n = ds.column("N").unwrap();
        assert_eq!(n.data, ColumnData::Numeric(vec![Some(10.0), None, Some(30.0)]));
        Ok(())
    }

    #[test]
    fn other_text_makes_a_column_categorical() -> anyhow::Result<()> {
        let ds = Dataset::from_reader("N,label\n10,rice\nna,rice\n".as_bytes())?;
        assert!(!ds.column("N").unwrap().is_numeric());
        assert!(is_missing("  NA "));
        assert!(!is_missing("0"));
        Ok(())
    }

    #[test]
    fn head_is_clamped() -> anyhow::Result<()> {
        let ds = Dataset::from_reader(CROPS.as_bytes())?;
        assert_eq!(ds.head(10).len(), 4);
        assert_eq!(ds.head(1)[0][7], "rice");
        Ok(())
    }

    #[test]
    fn header_only_file_is_empty() -> anyhow::Result<()> {
        let ds = Dataset::from_reader("a,b,label\n".as_bytes())?;
        assert!(ds.is_empty());
        assert!(ds.column("a").unwrap().is_numeric());
        Ok(())
    }

    #[test]
    fn rejects_bad_headers_and_ragged_rows() {
        assert!(matches!(
            Dataset::from_reader("a,a\n1,2\n".as_bytes()),
            Err(DatasetError::DuplicateColumn(n)) if n == "a"
        ));
        assert!(matches!(
            Dataset::from_reader("a,\n1,2\n".as_bytes()),
            Err(DatasetError::EmptyColumnName(1))
        ));
        assert!(matches!(
            Dataset::from_reader("".as_bytes()),
            Err(DatasetError::MissingHeader)
        ));
        assert!(matches!(
            Dataset::from_reader("a,b\n1,2,3\n".as_bytes()),
            Err(DatasetError::Csv(_))
        ));
    }

    #[test]
    fn reads_from_disk() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("crops.csv");
        std::fs::write(&path, CROPS)?;
        let ds = Dataset::from_path(&path)?;
        assert_eq!(ds.column_names().count(), 8);
        assert!(Dataset::from_path(dir.path().join("missing.csv")).is_err());
        Ok(())
    }
}

// Spreadsheet uploads: read a CSV or XLSX file into a normalized table.
//
// Responsibilities
// - Pick the reader from the file extension and the worksheet from the upload kind.
// - Rename headers to the canonical column names each import expects.
// - Turn placeholder cells ("-", "n/a", "NULL", ...) into missing values and
//   drop rows that end up empty.

pub mod fuzzy;
pub mod normalize;
pub mod reader;
pub mod values;

use thiserror::Error;

pub use normalize::normalize;
pub use reader::{read_csv, read_xlsx};

#[derive(Debug, Error)]
pub enum TabularError {
    #[error("Only .csv and .xlsx are supported.")]
    UnsupportedFormat,

    #[error("Required column '{expected}' not found. Best match: '{best}' (score: {score})")]
    ColumnNotMatched {
        expected: String,
        best: String,
        score: u8,
    },

    #[error("Required column '{0}' not found.")]
    MissingColumn(String),

    #[error("The file has no header row.")]
    Empty,

    #[error("Worksheet {0} not found in workbook.")]
    MissingSheet(usize),

    #[error("Invalid CSV file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid XLSX file: {0}")]
    Xlsx(#[from] calamine::XlsxError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    pub fn from_filename(filename: &str) -> Result<Self, TabularError> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".csv") {
            Ok(FileFormat::Csv)
        } else if lower.ends_with(".xlsx") {
            Ok(FileFormat::Xlsx)
        } else {
            Err(TabularError::UnsupportedFormat)
        }
    }
}

/// Which dataset a file carries. Decides the worksheet and the header rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Funds,
    FundProjects,
    Commitments,
}

impl UploadKind {
    /// Zero based worksheet index used for XLSX workbooks.
    pub fn sheet_index(self) -> usize {
        match self {
            UploadKind::Funds => 0,
            UploadKind::Commitments => 1,
            UploadKind::FundProjects => 2,
        }
    }
}

pub const DEFAULT_EXPECTED_COLUMNS: &str =
    "fund,fund_type,fund_focus,pledge,deposit,approval,disbursement,projects_approved";

pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub expected_columns: Vec<String>,
    pub similarity_threshold: u8,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            expected_columns: DEFAULT_EXPECTED_COLUMNS.split(',').map(String::from).collect(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

/// A rectangular table of optional text cells. Every row has `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |cells| Record { table: self, cells })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a Table,
    cells: &'a [Option<String>],
}

impl<'a> Record<'a> {
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self.table.column_index(column)?;
        self.cells.get(index)?.as_deref()
    }

    /// First present value among `columns`, in order.
    pub fn get_any(&self, columns: &[&str]) -> Option<&'a str> {
        columns.iter().find_map(|column| self.get(column))
    }
}

/// Parses `bytes` and normalizes the result for `kind`.
pub fn read_table(
    bytes: &[u8],
    format: FileFormat,
    kind: UploadKind,
    settings: &UploadSettings,
) -> Result<Table, TabularError> {
    let raw = match format {
        FileFormat::Csv => read_csv(bytes)?,
        FileFormat::Xlsx => read_xlsx(bytes, kind.sheet_index())?,
    };
    normalize(raw, kind, settings)
}

#[cfg(test)]
mod shared_tabular_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("funds.csv", FileFormat::Csv)]
    #[case("FUNDS.CSV", FileFormat::Csv)]
    #[case("crdf-2022.XLSX", FileFormat::Xlsx)]
    fn it_should_detect_supported_formats(#[case] filename: &str, #[case] expected: FileFormat) {
        assert_eq!(FileFormat::from_filename(filename).unwrap(), expected);
    }

    #[rstest]
    #[case("funds.xls")]
    #[case("funds.json")]
    #[case("csv")]
    fn it_should_reject_other_extensions(#[case] filename: &str) {
        let error = FileFormat::from_filename(filename).unwrap_err();
        assert_eq!(error.to_string(), "Only .csv and .xlsx are supported.");
    }

    #[rstest]
    fn it_should_read_a_csv_upload_end_to_end() {
        let settings = UploadSettings {
            expected_columns: vec!["fund".into(), "pledge".into()],
            similarity_threshold: 80,
        };
        let csv = "Fund,Pledge\nAdaptation Fund,12.5\nn/a,-\n";

        let table = read_table(csv.as_bytes(), FileFormat::Csv, UploadKind::Funds, &settings)
            .expect("table");

        assert_eq!(table.columns, vec!["fund", "pledge"]);
        assert_eq!(table.rows.len(), 1);
        let record = table.records().next().unwrap();
        assert_eq!(record.get("fund"), Some("Adaptation Fund"));
        assert_eq!(record.get("pledge"), Some("12.5"));
        assert_eq!(record.get("deposit"), None);
    }
}

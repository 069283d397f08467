use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use super::{Table, TabularError};

pub fn read_csv(bytes: &[u8]) -> Result<Table, TabularError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    if columns.is_empty() {
        return Err(TabularError::Empty);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut cells: Vec<Option<String>> = record.iter().map(|c| Some(c.to_string())).collect();
        cells.resize(columns.len(), None);
        rows.push(cells);
    }

    Ok(Table { columns, rows })
}

pub fn read_xlsx(bytes: &[u8], sheet: usize) -> Result<Table, TabularError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(sheet)
        .ok_or(TabularError::MissingSheet(sheet))??;

    let mut rows = range.rows();
    let header = rows.next().ok_or(TabularError::Empty)?;
    let columns: Vec<String> = header
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();

    let rows = rows
        .map(|row| {
            let mut cells: Vec<Option<String>> = row.iter().map(cell_text).collect();
            cells.resize(columns.len(), None);
            cells
        })
        .collect();

    Ok(Table { columns, rows })
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod shared_tabular_reader_tests {
    use super::*;
    use crate::shared::infrastructure::tabular::UploadKind;
    use rstest::{fixture, rstest};
    use rust_xlsxwriter::Workbook;

    /// Funds on the first sheet, commitments on the second, an empty third sheet.
    #[fixture]
    fn workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let funds = workbook.add_worksheet();
        funds.write_string(0, 0, "Fund").unwrap();
        funds.write_string(0, 1, "Pledge").unwrap();
        funds.write_string(1, 0, "Adaptation Fund").unwrap();
        funds.write_number(1, 1, 12.5).unwrap();

        let commitments = workbook.add_worksheet();
        commitments.write_string(0, 0, "year").unwrap();
        commitments.write_string(0, 1, "recipient").unwrap();
        commitments.write_number(1, 0, 2021.0).unwrap();
        commitments.write_string(1, 1, "Kenya").unwrap();

        workbook.add_worksheet();
        workbook.save_to_buffer().unwrap()
    }

    #[rstest]
    fn it_should_pad_short_rows_and_strip_the_bom() {
        let table = read_csv("\u{feff}a,b,c\n1,2\n".as_bytes()).expect("csv");
        assert_eq!(table.columns, vec!["a", "b", "c"]);
        assert_eq!(
            table.rows,
            vec![vec![Some("1".to_string()), Some("2".to_string()), None]]
        );
    }

    #[rstest]
    fn it_should_keep_quoted_commas_inside_a_cell() {
        let table = read_csv("name,amount\n\"Fund, Green\",3\n".as_bytes()).expect("csv");
        assert_eq!(table.rows[0][0].as_deref(), Some("Fund, Green"));
    }

    #[rstest]
    fn it_should_read_the_funds_sheet_first(workbook: Vec<u8>) {
        let table = read_xlsx(&workbook, UploadKind::Funds.sheet_index()).unwrap();

        assert_eq!(table.columns, vec!["Fund", "Pledge"]);
        assert_eq!(
            table.rows,
            vec![vec![Some("Adaptation Fund".to_string()), Some("12.5".to_string())]]
        );
    }

    #[rstest]
    fn it_should_read_commitments_from_the_second_sheet_with_whole_numbers_as_integers(
        workbook: Vec<u8>,
    ) {
        let table = read_xlsx(&workbook, UploadKind::Commitments.sheet_index()).unwrap();

        assert_eq!(table.columns, vec!["year", "recipient"]);
        assert_eq!(
            table.rows,
            vec![vec![Some("2021".to_string()), Some("Kenya".to_string())]]
        );
    }

    #[rstest]
    fn it_should_report_an_empty_fund_projects_sheet(workbook: Vec<u8>) {
        assert!(matches!(
            read_xlsx(&workbook, UploadKind::FundProjects.sheet_index()),
            Err(TabularError::Empty)
        ));
    }

    #[rstest]
    fn it_should_report_a_missing_sheet() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        let bytes = workbook.save_to_buffer().unwrap();

        assert!(matches!(
            read_xlsx(&bytes, UploadKind::Commitments.sheet_index()),
            Err(TabularError::MissingSheet(1))
        ));
    }

    #[rstest]
    fn it_should_reject_bytes_that_are_not_a_workbook() {
        assert!(matches!(
            read_xlsx(b"definitely not a zip archive", 0),
            Err(TabularError::Xlsx(_))
        ));
    }
}

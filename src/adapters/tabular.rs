use crate::domain::model::{CellValue, Dataset, Record};
use crate::utils::error::{ClassifierError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    Csv,
    Spreadsheet,
}

impl TabularFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(TabularFormat::Csv),
            Some("xlsx" | "xlsm" | "xls" | "ods") => Ok(TabularFormat::Spreadsheet),
            _ => Err(ClassifierError::UnsupportedFormat {
                path: path.to_string(),
            }),
        }
    }
}

/// Parse raw file bytes into a typed dataset. The first row is the header.
pub fn parse_table(path: &str, bytes: Vec<u8>) -> Result<Dataset> {
    let dataset = match TabularFormat::from_path(path)? {
        TabularFormat::Csv => parse_csv(&bytes)?,
        TabularFormat::Spreadsheet => parse_spreadsheet(bytes)?,
    };

    tracing::debug!(
        "Parsed {}: {} columns, {} records",
        path,
        dataset.columns.len(),
        dataset.len()
    );
    Ok(dataset)
}

/// Read and parse a local tabular file.
pub fn read_table(path: &str) -> Result<Dataset> {
    let bytes = std::fs::read(path)?;
    parse_table(path, bytes)
}

pub fn parse_csv(bytes: &[u8]) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let columns = normalize_headers(headers);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let data = columns
            .iter()
            .enumerate()
            .map(|(i, column)| (column.clone(), sniff_cell(row.get(i).unwrap_or(""))))
            .collect();
        records.push(Record { data });
    }

    Ok(Dataset::new(columns, records))
}

pub fn parse_spreadsheet(bytes: Vec<u8>) -> Result<Dataset> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(Dataset::default()),
    };

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| match convert_cell(cell) {
                CellValue::Empty => String::new(),
                other => other.as_text().into_owned(),
            })
            .collect(),
        None => return Ok(Dataset::default()),
    };
    let columns = normalize_headers(headers);

    let records = rows
        .map(|row| Record {
            data: columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let cell = row.get(i).map(convert_cell).unwrap_or(CellValue::Empty);
                    (column.clone(), cell)
                })
                .collect(),
        })
        .collect();

    Ok(Dataset::new(columns, records))
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(_) => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

/// Type a raw CSV field: blank, number, boolean, otherwise text.
///
/// Only whitespace counts as missing. Markers such as `NA`, `nan` or `null`
/// stay `Text`, so one of them is enough to make a column textual.
pub fn sniff_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return CellValue::Number(n);
        }
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }
    CellValue::Text(raw.to_string())
}

/// Blank headers become `Unnamed: {i}`; repeats get `.1`, `.2`, ...
fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    headers
        .into_iter()
        .enumerate()
        .map(|(i, header)| {
            let base = if header.trim().is_empty() {
                format!("Unnamed: {}", i)
            } else {
                header
            };

            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ColumnKind;

    #[test]
    fn test_format_from_path() {
        assert_eq!(TabularFormat::from_path("a/b.csv").unwrap(), TabularFormat::Csv);
        assert_eq!(
            TabularFormat::from_path("Keyword.XLSX").unwrap(),
            TabularFormat::Spreadsheet
        );
        assert!(matches!(
            TabularFormat::from_path("notes.txt"),
            Err(ClassifierError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_sniff_cell() {
        assert_eq!(sniff_cell(""), CellValue::Empty);
        assert_eq!(sniff_cell("  "), CellValue::Empty);
        assert_eq!(sniff_cell("42"), CellValue::Number(42.0));
        assert_eq!(sniff_cell("-3.5"), CellValue::Number(-3.5));
        assert_eq!(sniff_cell("TRUE"), CellValue::Bool(true));
        assert_eq!(sniff_cell("nan"), CellValue::Text("nan".to_string()));
        assert_eq!(sniff_cell("NA"), CellValue::Text("NA".to_string()));
        assert_eq!(sniff_cell("null"), CellValue::Text("null".to_string()));
        assert_eq!(
            sniff_cell("ward round"),
            CellValue::Text("ward round".to_string())
        );
    }

    #[test]
    fn test_parse_csv_types_columns() {
        let content = "id,notes,amount\n1,surgery planned,10.5\n2,,3\n3,bank loan,\n";
        let dataset = parse_csv(content.as_bytes()).unwrap();

        assert_eq!(dataset.columns, vec!["id", "notes", "amount"]);
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.column_kind("id"), ColumnKind::Numeric);
        assert_eq!(dataset.column_kind("notes"), ColumnKind::Textual);
        assert_eq!(dataset.column_kind("amount"), ColumnKind::Numeric);
        assert_eq!(dataset.records[1].get("notes"), &CellValue::Empty);
        assert_eq!(dataset.first_textual_column(), Some("notes"));
    }

    #[test]
    fn test_parse_csv_short_rows_are_padded() {
        let content = "Category,Keywords\nMedical\n";
        let dataset = parse_csv(content.as_bytes()).unwrap();
        assert_eq!(dataset.records[0].get("Keywords"), &CellValue::Empty);
    }

    #[test]
    fn test_quoted_keywords_keep_commas() {
        let content = "Category,Keywords\nMedical,\"surgery,patient\"\n";
        let dataset = parse_csv(content.as_bytes()).unwrap();
        assert_eq!(
            dataset.records[0].get("Keywords"),
            &CellValue::Text("surgery,patient".to_string())
        );
    }

    #[test]
    fn test_normalize_headers() {
        let headers = vec![
            "name".to_string(),
            "".to_string(),
            "name".to_string(),
            "name".to_string(),
        ];
        assert_eq!(
            normalize_headers(headers),
            vec!["name", "Unnamed: 1", "name.1", "name.2"]
        );
    }

    #[test]
    fn test_parse_table_rejects_unknown_extension() {
        assert!(parse_table("data.json", b"{}".to_vec()).is_err());
    }

    #[test]
    fn test_read_table_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hospital.csv");
        std::fs::write(&path, "ward,notes\n3,patient surgery\n").unwrap();

        let dataset = read_table(path.to_str().unwrap()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.first_textual_column(), Some("notes"));
    }
}

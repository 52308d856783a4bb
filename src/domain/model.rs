use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// A single typed cell as read from the tabular source.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Render the cell as text. Integral numbers drop the fractional part.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Cow::Owned(format!("{}", *n as i64))
            }
            CellValue::Number(n) => Cow::Owned(n.to_string()),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
        }
    }
}

/// Derived kind of a whole column, used for text-column auto-detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Textual,
    Numeric,
    Boolean,
    Mixed,
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub data: HashMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> &CellValue {
        self.data.get(column).unwrap_or(&CellValue::Empty)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn column_kind(&self, column: &str) -> ColumnKind {
        let mut numbers = false;
        let mut bools = false;

        for record in &self.records {
            match record.get(column) {
                CellValue::Text(_) => return ColumnKind::Textual,
                CellValue::Number(_) => numbers = true,
                CellValue::Bool(_) => bools = true,
                CellValue::Empty => {}
            }
        }

        match (numbers, bools) {
            (true, true) => ColumnKind::Mixed,
            (true, false) => ColumnKind::Numeric,
            (false, true) => ColumnKind::Boolean,
            (false, false) => ColumnKind::Empty,
        }
    }

    /// First column, in header order, whose kind is textual.
    pub fn first_textual_column(&self) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| self.column_kind(c) == ColumnKind::Textual)
            .map(String::as_str)
    }
}

/// Which column supplies the text to score.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TextColumn {
    #[default]
    AutoDetect,
    Named(String),
}

impl From<String> for TextColumn {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("auto") {
            TextColumn::AutoDetect
        } else {
            TextColumn::Named(value)
        }
    }
}

impl From<TextColumn> for String {
    fn from(value: TextColumn) -> Self {
        match value {
            TextColumn::AutoDetect => "auto".to_string(),
            TextColumn::Named(name) => name,
        }
    }
}

impl std::str::FromStr for TextColumn {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(TextColumn::from(s.to_string()))
    }
}

impl fmt::Display for TextColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextColumn::AutoDetect => write!(f, "auto"),
            TextColumn::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Outcome for one record, or for the whole dataset.
///
/// `Absent` means no domain scored above zero. It serializes to `null` and
/// never compares equal to a domain, even one literally named "None".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Prediction {
    Domain(String),
    Absent,
}

impl Prediction {
    pub fn domain(&self) -> Option<&str> {
        match self {
            Prediction::Domain(name) => Some(name),
            Prediction::Absent => None,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Domain(name) => write!(f, "{}", name),
            Prediction::Absent => write!(f, "None"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteCount {
    pub prediction: Prediction,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub text_column: Option<String>,
    pub record_count: usize,
    pub overall: Prediction,
    pub votes: Vec<VoteCount>,
    pub predictions: Vec<Prediction>,
}

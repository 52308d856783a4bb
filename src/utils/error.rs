use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Malformed mapping row {row}: {reason}")]
    MalformedMappingRow { row: usize, reason: String },

    #[error("Required column '{column}' not found")]
    MissingColumn { column: String },

    #[error("Domain mapping is empty: no domains to score against")]
    EmptyDomainMapping,

    #[error("Dataset has no records to classify")]
    EmptyDataset,

    #[error("Text column '{column}' not found in dataset")]
    UnknownTextColumn { column: String },

    #[error("Unsupported input format: {path}")]
    UnsupportedFormat { path: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClassifierError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedMappingRow { .. }
            | Self::MissingColumn { .. }
            | Self::EmptyDomainMapping
            | Self::EmptyDataset
            | Self::UnknownTextColumn { .. } => ErrorCategory::Data,
            Self::UnsupportedFormat { .. }
            | Self::CsvError(_)
            | Self::SpreadsheetError(_) => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IoError(_) => ErrorSeverity::Medium,
            Self::SerializationError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::MalformedMappingRow { row, .. } => format!(
                "Fix row {} of the keyword file so it has both a category and a comma-separated keyword list",
                row
            ),
            Self::MissingColumn { column } => format!(
                "Add a '{}' column to the keyword file or point --category-field/--keywords-field at the right headers",
                column
            ),
            Self::EmptyDomainMapping => {
                "Add at least one category row to the keyword file".to_string()
            }
            Self::EmptyDataset => "Provide a data file with at least one data row".to_string(),
            Self::UnknownTextColumn { .. } => {
                "Check the column header spelling or use text_column = \"auto\"".to_string()
            }
            Self::UnsupportedFormat { .. } => {
                "Use a .csv, .xlsx, .xlsm, .xls or .ods file".to_string()
            }
            Self::CsvError(_) | Self::SpreadsheetError(_) => {
                "Make sure the file is not corrupted and has a header row".to_string()
            }
            Self::IoError(_) => "Check that the file exists and is readable".to_string(),
            Self::SerializationError(_) => "Report this as a bug".to_string(),
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Review the configuration values and try again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Data => format!("The input data could not be classified: {}", self),
            ErrorCategory::Input => format!("An input file could not be read: {}", self),
            ErrorCategory::Configuration => format!("The configuration is invalid: {}", self),
            ErrorCategory::System => format!("A system error occurred: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassifierError>;

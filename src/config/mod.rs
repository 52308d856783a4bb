pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::TextColumn;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY_FIELD: &str = "Category";
pub const DEFAULT_KEYWORDS_FIELD: &str = "Keywords";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "domain-classifier")]
#[command(about = "Predict the domain of a tabular dataset from a keyword dictionary")]
pub struct CliConfig {
    /// Dataset to classify (.csv, .xlsx, .xlsm, .xls, .ods)
    #[arg(long)]
    pub data_file: String,

    /// Category → keywords mapping file
    #[arg(long)]
    pub keyword_file: String,

    /// Column holding the text to score, or "auto" for the first textual column
    #[arg(long, default_value = "auto")]
    pub text_column: TextColumn,

    #[arg(long, default_value = DEFAULT_CATEGORY_FIELD)]
    pub category_field: String,

    #[arg(long, default_value = DEFAULT_KEYWORDS_FIELD)]
    pub keywords_field: String,

    /// Trim whitespace around each comma-separated keyword
    #[arg(long)]
    pub trim_keywords: bool,

    /// Fail when the keyword file defines no domains
    #[arg(long)]
    pub strict: bool,

    /// Directory for report files; nothing is written when omitted
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, value_delimiter = ',', default_value = "json")]
    pub output_formats: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn data_file(&self) -> &str {
        &self.data_file
    }

    fn keyword_file(&self) -> &str {
        &self.keyword_file
    }

    fn category_field(&self) -> &str {
        &self.category_field
    }

    fn keywords_field(&self) -> &str {
        &self.keywords_field
    }

    fn text_column(&self) -> TextColumn {
        self.text_column.clone()
    }

    fn trim_keywords(&self) -> bool {
        self.trim_keywords
    }

    fn strict(&self) -> bool {
        self.strict
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_file", &self.data_file)?;
        validation::validate_path("keyword_file", &self.keyword_file)?;
        validation::validate_file_extensions(
            "input_files",
            &[self.data_file.as_str(), self.keyword_file.as_str()],
            validation::SUPPORTED_INPUT_EXTENSIONS,
        )?;
        validation::validate_non_empty_string("category_field", &self.category_field)?;
        validation::validate_non_empty_string("keywords_field", &self.keywords_field)?;

        if let Some(output_path) = &self.output_path {
            validation::validate_path("output_path", output_path)?;
        }
        validation::validate_output_formats("output_formats", &self.output_formats)
    }
}

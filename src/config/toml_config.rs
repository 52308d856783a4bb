use crate::config::{DEFAULT_CATEGORY_FIELD, DEFAULT_KEYWORDS_FIELD};
use crate::core::ConfigProvider;
use crate::domain::model::TextColumn;
use crate::utils::error::{ClassifierError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub data_file: Option<String>,
    pub keyword_file: String,
    pub category_field: Option<String>,
    pub keywords_field: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub text_column: TextColumn,
    pub trim_keywords: Option<bool>,
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: Option<String>,
    #[serde(default)]
    pub output_formats: Vec<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClassifierError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClassifierError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClassifierError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let data_file = validation::validate_required_field("source.data_file", &self.source.data_file)?;
        validation::validate_path("source.data_file", data_file)?;
        validation::validate_path("source.keyword_file", &self.source.keyword_file)?;
        validation::validate_file_extensions(
            "source",
            &[data_file.as_str(), self.source.keyword_file.as_str()],
            validation::SUPPORTED_INPUT_EXTENSIONS,
        )?;
        validation::validate_non_empty_string("source.category_field", self.category_field())?;
        validation::validate_non_empty_string("source.keywords_field", self.keywords_field())?;

        if let Some(output_path) = &self.load.output_path {
            validation::validate_path("load.output_path", output_path)?;
        }
        validation::validate_output_formats("load.output_formats", &self.load.output_formats)
    }

    pub fn is_strict(&self) -> bool {
        self.classifier.strict.unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_file(&self) -> &str {
        self.source.data_file.as_deref().unwrap_or_default()
    }

    fn keyword_file(&self) -> &str {
        &self.source.keyword_file
    }

    fn category_field(&self) -> &str {
        self.source
            .category_field
            .as_deref()
            .unwrap_or(DEFAULT_CATEGORY_FIELD)
    }

    fn keywords_field(&self) -> &str {
        self.source
            .keywords_field
            .as_deref()
            .unwrap_or(DEFAULT_KEYWORDS_FIELD)
    }

    fn text_column(&self) -> TextColumn {
        self.classifier.text_column.clone()
    }

    fn trim_keywords(&self) -> bool {
        self.classifier.trim_keywords.unwrap_or(false)
    }

    fn strict(&self) -> bool {
        self.is_strict()
    }

    fn output_path(&self) -> Option<&str> {
        self.load.output_path.as_deref()
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[pipeline]
name = "hospital-domain"
description = "Classify hospital exports"
version = "1.0.0"

[source]
data_file = "Train_Data/hospital.xlsx"
keyword_file = "Keyword.xlsx"

[classifier]
text_column = "Notes"
trim_keywords = true

[load]
output_path = "./reports"
output_formats = ["json", "csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pipeline.name, "hospital-domain");
        assert_eq!(config.data_file(), "Train_Data/hospital.xlsx");
        assert_eq!(config.text_column(), TextColumn::Named("Notes".to_string()));
        assert!(config.trim_keywords());
        assert!(!config.strict());
        assert_eq!(config.category_field(), "Category");
        assert_eq!(config.output_path(), Some("./reports"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let toml_content = r#"
[pipeline]
name = "minimal"

[source]
data_file = "data.csv"
keyword_file = "keywords.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.text_column(), TextColumn::AutoDetect);
        assert_eq!(config.keywords_field(), "Keywords");
        assert!(config.output_formats().is_empty());
        assert_eq!(config.output_path(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DOMAIN_TEST_DATA_DIR", "/srv/data");

        let toml_content = r#"
[pipeline]
name = "env"

[source]
data_file = "${DOMAIN_TEST_DATA_DIR}/hospital.csv"
keyword_file = "${DOMAIN_TEST_UNSET_VAR}/Keyword.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_file(), "/srv/data/hospital.csv");
        assert_eq!(config.keyword_file(), "${DOMAIN_TEST_UNSET_VAR}/Keyword.csv");

        std::env::remove_var("DOMAIN_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[pipeline]
name = "bad"

[source]
data_file = "data.txt"
keyword_file = "keywords.csv"

[load]
output_formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_data_file_fails_validation() {
        let toml_content = r#"
[pipeline]
name = "no-data"

[source]
keyword_file = "keywords.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ClassifierError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            TomlConfig::from_toml_str("[pipeline\nname ="),
            Err(ClassifierError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[pipeline]
name = "file-test"

[source]
data_file = "data.csv"
keyword_file = "keywords.xlsx"

[classifier]
strict = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "file-test");
        assert!(config.strict());
    }
}

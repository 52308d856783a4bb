use crate::utils::error::{ClassifierError, Result};
use std::collections::HashSet;

/// Input formats the tabular reader understands.
pub const SUPPORTED_INPUT_EXTENSIONS: &[&str] = &["csv", "xlsx", "xlsm", "xls", "ods"];

/// Report formats the load phase can write.
pub const SUPPORTED_OUTPUT_FORMATS: &[&str] = &["json", "csv"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ClassifierError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ClassifierError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[&str],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => {}
            Some(extension) => {
                return Err(ClassifierError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.to_string(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(ClassifierError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.to_string(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    for format in formats {
        if !SUPPORTED_OUTPUT_FORMATS.contains(&format.as_str()) {
            return Err(ClassifierError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    SUPPORTED_OUTPUT_FORMATS.join(", ")
                ),
            });
        }
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| ClassifierError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClassifierError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data_file", "data/hospital.csv").is_ok());
        assert!(validate_path("data_file", "").is_err());
        assert!(validate_path("data_file", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        assert!(validate_file_extensions(
            "data_file",
            &["hospital.xlsx", "Keyword.CSV"],
            SUPPORTED_INPUT_EXTENSIONS
        )
        .is_ok());
        assert!(
            validate_file_extensions("data_file", &["notes.txt"], SUPPORTED_INPUT_EXTENSIONS)
                .is_err()
        );
        assert!(
            validate_file_extensions("data_file", &["README"], SUPPORTED_INPUT_EXTENSIONS)
                .is_err()
        );
    }

    #[test]
    fn test_validate_output_formats() {
        let ok = vec!["json".to_string(), "csv".to_string()];
        assert!(validate_output_formats("output_formats", &ok).is_ok());

        let bad = vec!["xml".to_string()];
        assert!(validate_output_formats("output_formats", &bad).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("Category".to_string());
        assert_eq!(
            validate_required_field("category_field", &present).unwrap(),
            "Category"
        );

        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("category_field", &missing),
            Err(ClassifierError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("keywords_field", "Keywords").is_ok());
        assert!(validate_non_empty_string("keywords_field", "   ").is_err());
    }
}

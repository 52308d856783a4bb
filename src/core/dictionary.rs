use crate::domain::model::{CellValue, Dataset};
use crate::utils::error::{ClassifierError, Result};
use std::collections::HashMap;

/// Domain name → keywords, in first-encounter order.
///
/// Keywords keep insertion order and are never deduplicated; a keyword
/// listed twice for a domain is scored twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainMapping {
    domains: Vec<(String, Vec<String>)>,
}

impl DomainMapping {
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn keywords(&self, domain: &str) -> Option<&[String]> {
        self.domains
            .iter()
            .find(|(name, _)| name == domain)
            .map(|(_, keywords)| keywords.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.domains
            .iter()
            .map(|(name, keywords)| (name.as_str(), keywords.as_slice()))
    }
}

#[derive(Debug, Default)]
pub struct DomainMappingBuilder {
    domains: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
    trim_keywords: bool,
    rows: usize,
}

impl DomainMappingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim whitespace around each comma-separated fragment.
    pub fn with_trim_keywords(mut self, trim: bool) -> Self {
        self.trim_keywords = trim;
        self
    }

    /// Add one mapping row. Rows are numbered from 1 in error messages.
    pub fn push_row(&mut self, category: Option<&str>, keywords: Option<&str>) -> Result<()> {
        self.rows += 1;
        let row = self.rows;

        let category = category.ok_or_else(|| ClassifierError::MalformedMappingRow {
            row,
            reason: "missing category".to_string(),
        })?;
        let keywords = keywords.ok_or_else(|| ClassifierError::MalformedMappingRow {
            row,
            reason: "missing keyword list".to_string(),
        })?;

        let fragments: Vec<String> = keywords
            .split(',')
            .map(|k| if self.trim_keywords { k.trim() } else { k })
            .map(str::to_string)
            .collect();

        if fragments.iter().any(|k| k.trim().is_empty()) {
            // 空關鍵字會匹配所有 token
            tracing::warn!(
                "Mapping row {} ({}) contains an empty keyword; it will match every token",
                row,
                category
            );
        }

        match self.index.get(category) {
            Some(&slot) => self.domains[slot].1.extend(fragments),
            None => {
                self.index.insert(category.to_string(), self.domains.len());
                self.domains.push((category.to_string(), fragments));
            }
        }

        Ok(())
    }

    pub fn build(self) -> DomainMapping {
        tracing::debug!(
            "Built domain mapping with {} domains from {} rows",
            self.domains.len(),
            self.rows
        );
        DomainMapping {
            domains: self.domains,
        }
    }
}

/// Build a mapping from (category, keyword-list) pairs.
pub fn build_domain_mapping<'a, I>(rows: I, trim_keywords: bool) -> Result<DomainMapping>
where
    I: IntoIterator<Item = (Option<&'a str>, Option<&'a str>)>,
{
    let mut builder = DomainMappingBuilder::new().with_trim_keywords(trim_keywords);
    for (category, keywords) in rows {
        builder.push_row(category, keywords)?;
    }
    Ok(builder.build())
}

/// Build a mapping from a table with a category column and a keyword column.
pub fn mapping_from_dataset(
    table: &Dataset,
    category_field: &str,
    keywords_field: &str,
    trim_keywords: bool,
) -> Result<DomainMapping> {
    for column in [category_field, keywords_field] {
        if !table.has_column(column) {
            return Err(ClassifierError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let mut builder = DomainMappingBuilder::new().with_trim_keywords(trim_keywords);

    for record in &table.records {
        let category = match record.get(category_field) {
            CellValue::Empty => None,
            other => Some(other.as_text()),
        };

        let keywords = match record.get(keywords_field) {
            CellValue::Text(s) => Some(s.as_str()),
            CellValue::Empty => None,
            other => {
                return Err(ClassifierError::MalformedMappingRow {
                    row: builder.rows + 1,
                    reason: format!("keyword field is not text: {}", other.as_text()),
                });
            }
        };

        builder.push_row(category.as_deref(), keywords)?;
    }

    Ok(builder.build())
}

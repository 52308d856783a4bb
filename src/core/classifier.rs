use crate::adapters::tabular::read_table;
use crate::config::{DEFAULT_CATEGORY_FIELD, DEFAULT_KEYWORDS_FIELD};
use crate::core::dictionary::{mapping_from_dataset, DomainMapping};
use crate::core::scorer::KeywordScorer;
use crate::core::vote::VoteTally;
use crate::domain::model::{ClassificationReport, Dataset, Prediction, Record, TextColumn};
use crate::utils::error::{ClassifierError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierOptions {
    pub text_column: TextColumn,
    pub trim_keywords: bool,
    /// Treat an empty domain mapping as an error instead of a warning.
    pub strict: bool,
}

pub struct DomainClassifier {
    scorer: KeywordScorer,
    text_column: TextColumn,
}

impl DomainClassifier {
    pub fn new(mapping: &DomainMapping, options: &ClassifierOptions) -> Result<Self> {
        if mapping.is_empty() {
            if options.strict {
                return Err(ClassifierError::EmptyDomainMapping);
            }
            tracing::warn!("Domain mapping is empty; every record will resolve to no domain");
        }

        Ok(Self {
            scorer: KeywordScorer::new(mapping),
            text_column: options.text_column.clone(),
        })
    }

    /// Column whose text is scored, decided once for the whole dataset.
    pub fn resolve_text_column<'a>(&self, dataset: &'a Dataset) -> Result<Option<&'a str>> {
        match &self.text_column {
            TextColumn::AutoDetect => {
                let column = dataset.first_textual_column();
                if column.is_none() {
                    tracing::warn!("No textual column found; all records score zero");
                }
                Ok(column)
            }
            TextColumn::Named(name) => dataset
                .columns
                .iter()
                .find(|c| *c == name)
                .map(|c| Some(c.as_str()))
                .ok_or_else(|| ClassifierError::UnknownTextColumn {
                    column: name.clone(),
                }),
        }
    }

    pub fn predict_record(&self, record: &Record, text_column: Option<&str>) -> Prediction {
        match text_column {
            Some(column) => self.scorer.best_domain(&record.get(column).as_text()),
            None => Prediction::Absent,
        }
    }

    pub fn classify(&self, dataset: &Dataset) -> Result<ClassificationReport> {
        let text_column = self.resolve_text_column(dataset)?;
        tracing::debug!(
            "Scoring {} records against {} domains using column {:?}",
            dataset.len(),
            self.scorer.domains().len(),
            text_column
        );

        let predictions: Vec<Prediction> = dataset
            .records
            .iter()
            .map(|record| self.predict_record(record, text_column))
            .collect();

        let tally: VoteTally = predictions.iter().collect();
        let overall = tally.winner().cloned().ok_or(ClassifierError::EmptyDataset)?;

        tracing::info!(
            "Overall prediction: {} ({} records)",
            overall,
            predictions.len()
        );

        Ok(ClassificationReport {
            text_column: text_column.map(str::to_string),
            record_count: predictions.len(),
            overall,
            votes: tally.into_counts(),
            predictions,
        })
    }
}

/// Classify a dataset file against a keyword file and return the overall label.
///
/// The keyword file needs `Category` and `Keywords` columns.
pub fn identify_most_likely_domain(
    data_file: &str,
    keyword_file: &str,
    options: &ClassifierOptions,
) -> Result<Prediction> {
    let keyword_table = read_table(keyword_file)?;
    let mapping = mapping_from_dataset(
        &keyword_table,
        DEFAULT_CATEGORY_FIELD,
        DEFAULT_KEYWORDS_FIELD,
        options.trim_keywords,
    )?;
    let dataset = read_table(data_file)?;

    let classifier = DomainClassifier::new(&mapping, options)?;
    Ok(classifier.classify(&dataset)?.overall)
}

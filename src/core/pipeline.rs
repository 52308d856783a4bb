use crate::adapters::tabular::parse_table;
use crate::core::classifier::{ClassifierOptions, DomainClassifier};
use crate::core::dictionary::mapping_from_dataset;
use crate::core::{ConfigProvider, ExtractedInput, Pipeline, Storage};
use crate::domain::model::{ClassificationReport, Prediction, VoteCount};
use crate::utils::error::{ClassifierError, Result};
use serde::Serialize;

pub const JSON_REPORT_FILE: &str = "classification.json";
pub const CSV_REPORT_FILE: &str = "predictions.csv";

/// Reads the dataset and keyword file, classifies, and writes reports.
pub struct ClassificationPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ClassificationPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn options(&self) -> ClassifierOptions {
        ClassifierOptions {
            text_column: self.config.text_column(),
            trim_keywords: self.config.trim_keywords(),
            strict: self.config.strict(),
        }
    }

    fn report_path(&self, output_dir: &str, file_name: &str) -> String {
        format!("{}/{}", output_dir.trim_end_matches('/'), file_name)
    }

    fn render_json(&self, report: &ClassificationReport) -> Result<Vec<u8>> {
        let document = ReportDocument {
            generated_at: chrono::Utc::now().to_rfc3339(),
            data_file: self.config.data_file(),
            keyword_file: self.config.keyword_file(),
            text_column: report.text_column.as_deref(),
            record_count: report.record_count,
            overall: &report.overall,
            votes: &report.votes,
            records: report
                .predictions
                .iter()
                .enumerate()
                .map(|(row, prediction)| RecordPrediction {
                    row: row + 1,
                    prediction,
                })
                .collect(),
        };
        Ok(serde_json::to_vec_pretty(&document)?)
    }

    fn render_csv(&self, report: &ClassificationReport) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["row", "prediction"])?;
        for (row, prediction) in report.predictions.iter().enumerate() {
            let label = prediction.domain().unwrap_or("");
            writer.write_record([(row + 1).to_string().as_str(), label])?;
        }
        writer
            .into_inner()
            .map_err(|e| ClassifierError::IoError(e.into_error()))
    }
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    generated_at: String,
    data_file: &'a str,
    keyword_file: &'a str,
    text_column: Option<&'a str>,
    record_count: usize,
    overall: &'a Prediction,
    votes: &'a [VoteCount],
    records: Vec<RecordPrediction<'a>>,
}

#[derive(Serialize)]
struct RecordPrediction<'a> {
    row: usize,
    prediction: &'a Prediction,
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ClassificationPipeline<S, C> {
    async fn extract(&self) -> Result<ExtractedInput> {
        tracing::debug!("Reading keyword file: {}", self.config.keyword_file());
        let keyword_bytes = self.storage.read_file(self.config.keyword_file()).await?;
        let keyword_table = parse_table(self.config.keyword_file(), keyword_bytes)?;
        let mapping = mapping_from_dataset(
            &keyword_table,
            self.config.category_field(),
            self.config.keywords_field(),
            self.config.trim_keywords(),
        )?;

        tracing::debug!("Reading data file: {}", self.config.data_file());
        let data_bytes = self.storage.read_file(self.config.data_file()).await?;
        let dataset = parse_table(self.config.data_file(), data_bytes)?;

        Ok(ExtractedInput { dataset, mapping })
    }

    async fn transform(&self, input: ExtractedInput) -> Result<ClassificationReport> {
        let classifier = DomainClassifier::new(&input.mapping, &self.options())?;
        classifier.classify(&input.dataset)
    }

    async fn load(&self, report: &ClassificationReport) -> Result<Vec<String>> {
        let output_dir = match self.config.output_path() {
            Some(dir) => dir,
            None => {
                tracing::debug!("No output path configured, skipping report files");
                return Ok(Vec::new());
            }
        };

        let mut written = Vec::new();
        for format in self.config.output_formats() {
            let (file_name, data) = match format.as_str() {
                "json" => (JSON_REPORT_FILE, self.render_json(report)?),
                "csv" => (CSV_REPORT_FILE, self.render_csv(report)?),
                other => {
                    tracing::warn!("Skipping unknown output format: {}", other);
                    continue;
                }
            };

            let path = self.report_path(output_dir, file_name);
            tracing::debug!("Writing {} ({} bytes)", path, data.len());
            self.storage.write_file(&path, &data).await?;
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TextColumn;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, path: &str, content: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), content.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ClassifierError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        output_path: Option<String>,
        output_formats: Vec<String>,
        strict: bool,
    }

    impl ConfigProvider for TestConfig {
        fn data_file(&self) -> &str {
            "hospital.csv"
        }
        fn keyword_file(&self) -> &str {
            "Keyword.csv"
        }
        fn category_field(&self) -> &str {
            "Category"
        }
        fn keywords_field(&self) -> &str {
            "Keywords"
        }
        fn text_column(&self) -> TextColumn {
            TextColumn::AutoDetect
        }
        fn trim_keywords(&self) -> bool {
            true
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

    async fn seeded_storage() -> MockStorage {
        let storage = MockStorage::new();
        storage
            .put(
                "Keyword.csv",
                "Category,Keywords\nMedical,\"surgery, patient\"\nFinance,\"bank, loan\"\n",
            )
            .await;
        storage
            .put(
                "hospital.csv",
                "id,notes\n1,patient admitted for surgery\n2,surgeries performed today\n3,loan paperwork\n",
            )
            .await;
        storage
    }

    #[tokio::test]
    async fn test_pipeline_classifies_dataset() {
        let storage = seeded_storage().await;
        let config = TestConfig {
            output_path: None,
            output_formats: vec![],
            strict: false,
        };
        let pipeline = ClassificationPipeline::new(storage, config);

        let input = pipeline.extract().await.unwrap();
        assert_eq!(input.mapping.len(), 2);
        assert_eq!(input.dataset.len(), 3);

        let report = pipeline.transform(input).await.unwrap();
        assert_eq!(report.overall, Prediction::Domain("Medical".to_string()));
        assert_eq!(report.text_column.as_deref(), Some("notes"));

        let written = pipeline.load(&report).await.unwrap();
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_writes_reports() {
        let storage = seeded_storage().await;
        let config = TestConfig {
            output_path: Some("out/".to_string()),
            output_formats: vec!["json".to_string(), "csv".to_string()],
            strict: false,
        };
        let pipeline = ClassificationPipeline::new(storage.clone(), config);

        let input = pipeline.extract().await.unwrap();
        let report = pipeline.transform(input).await.unwrap();
        let written = pipeline.load(&report).await.unwrap();

        assert_eq!(
            written,
            vec!["out/classification.json", "out/predictions.csv"]
        );

        let json = storage.get_file("out/classification.json").await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["overall"], "Medical");
        assert_eq!(value["record_count"], 3);
        assert_eq!(value["records"][2]["prediction"], "Finance");
        assert_eq!(value["votes"][0]["count"], 2);

        let csv = storage.get_file("out/predictions.csv").await.unwrap();
        let csv = String::from_utf8(csv).unwrap();
        assert_eq!(csv, "row,prediction\n1,Medical\n2,Medical\n3,Finance\n");
    }

    #[tokio::test]
    async fn test_pipeline_strict_mode_rejects_empty_mapping() {
        let storage = MockStorage::new();
        storage.put("Keyword.csv", "Category,Keywords\n").await;
        storage.put("hospital.csv", "notes\nsurgery\n").await;
        let config = TestConfig {
            output_path: None,
            output_formats: vec![],
            strict: true,
        };
        let pipeline = ClassificationPipeline::new(storage, config);

        let input = pipeline.extract().await.unwrap();
        assert!(input.mapping.is_empty());
        assert!(matches!(
            pipeline.transform(input).await,
            Err(ClassifierError::EmptyDomainMapping)
        ));
    }

    #[tokio::test]
    async fn test_pipeline_missing_input_file() {
        let config = TestConfig {
            output_path: None,
            output_formats: vec![],
            strict: false,
        };
        let pipeline = ClassificationPipeline::new(MockStorage::new(), config);

        assert!(matches!(
            pipeline.extract().await,
            Err(ClassifierError::IoError(_))
        ));
    }
}

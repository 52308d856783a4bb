use crate::core::dictionary::DomainMapping;
use crate::domain::model::{ClassificationReport, Dataset, TextColumn};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_file(&self) -> &str;
    fn keyword_file(&self) -> &str;
    fn category_field(&self) -> &str;
    fn keywords_field(&self) -> &str;
    fn text_column(&self) -> TextColumn;
    fn trim_keywords(&self) -> bool;
    fn strict(&self) -> bool;
    fn output_path(&self) -> Option<&str>;
    fn output_formats(&self) -> &[String];
}

/// Inputs gathered by the extract phase.
#[derive(Debug, Clone)]
pub struct ExtractedInput {
    pub dataset: Dataset,
    pub mapping: DomainMapping,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractedInput>;
    async fn transform(&self, input: ExtractedInput) -> Result<ClassificationReport>;
    /// Persist the report and return the paths written.
    async fn load(&self, report: &ClassificationReport) -> Result<Vec<String>>;
}

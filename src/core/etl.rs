use crate::core::{ClassificationReport, Pipeline};
use crate::utils::error::Result;

/// Outcome of a full extract → classify → load run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: ClassificationReport,
    pub written: Vec<String>,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting classification run");

        // Extract
        let input = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} records and {} domains",
            input.dataset.len(),
            input.mapping.len()
        );

        // Transform
        let report = self.pipeline.transform(input).await?;
        tracing::info!(
            "Classified {} records across {} distinct predictions",
            report.record_count,
            report.votes.len()
        );

        // Load
        let written = self.pipeline.load(&report).await?;
        for path in &written {
            tracing::info!("Report saved to: {}", path);
        }

        Ok(RunSummary { report, written })
    }
}

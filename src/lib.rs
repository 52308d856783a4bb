pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::core::{
    classifier::{identify_most_likely_domain, ClassifierOptions, DomainClassifier},
    dictionary::{build_domain_mapping, DomainMapping, DomainMappingBuilder},
    etl::{EtlEngine, RunSummary},
    pipeline::ClassificationPipeline,
};
pub use crate::domain::model::{ClassificationReport, Dataset, Prediction, TextColumn};
pub use crate::utils::error::{ClassifierError, Result};

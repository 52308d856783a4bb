pub mod classifier;
pub mod dictionary;
pub mod etl;
pub mod pipeline;
pub mod scorer;
pub mod vote;

pub use crate::domain::model::{ClassificationReport, Dataset, Prediction, Record};
pub use crate::domain::ports::{ConfigProvider, ExtractedInput, Pipeline, Storage};
pub use crate::utils::error::Result;

// Adapters layer: concrete implementations for external systems (files, storage).

pub mod storage;
pub mod tabular;

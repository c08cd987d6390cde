pub mod aggregator;
pub mod derivation;
pub mod etl;
pub mod format;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod totals;

pub use crate::domain::model::{Dataset, ReconRecord, ReconReport, ReconWarning, SourceFile};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

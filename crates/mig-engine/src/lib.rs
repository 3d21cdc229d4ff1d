mod error;
mod keywords;
mod mapper;
mod orchestrator;
mod report;


pub use error::{EngineError, EngineResult};
pub use mapper::FieldMapper;
pub use orchestrator::TransferEngine;
pub use report::TransferReport;

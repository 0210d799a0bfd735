pub mod consumer;
pub mod engine;

pub use crate::domain::model::{OrchestrationResponse, SenmlReadout, ServiceRequestForm};
pub use crate::domain::ports::{ConfigProvider, ServiceConsumer};
pub use crate::utils::error::Result;

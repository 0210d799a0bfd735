pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::file_config::FileConfig;
pub use core::{consumer::HttpConsumer, engine::ConsumerEngine};
pub use utils::error::{ConsumerError, Result};

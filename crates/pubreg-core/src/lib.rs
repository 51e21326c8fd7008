pub mod config;
pub mod error;
pub mod models;

pub use config::EngineConfig;
pub use error::{CoreError, Result};
pub use models::*;

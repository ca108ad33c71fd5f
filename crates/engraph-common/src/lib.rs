//! Common utilities and types for engraph

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{EngraphError, Result};
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use types::{FrequencyRow, FrequencyTable};

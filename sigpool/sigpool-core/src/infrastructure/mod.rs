//! Infrastructure layer: concurrent storage, configuration, and logging.

pub mod config;
pub mod logging;
pub mod storage;

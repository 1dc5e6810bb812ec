//! Utility modules: persistence and logging.

pub mod logging;
pub mod persistence;

pub use logging::init_logging;
pub use persistence::*;

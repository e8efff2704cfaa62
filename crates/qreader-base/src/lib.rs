//! Shared building blocks for the qreader crates: logging and screen geometry.

pub mod geometry;
pub mod logging;

pub use geometry::{Point, Rect, Size};
pub use logging::{
    init_file_logger, init_memory_logger, init_stdout_logger, FileLogger, MemoryLogger,
    StdoutLogger,
};

// Re-export log so downstream crates can use qreader_base::log::*
pub use log;

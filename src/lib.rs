pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod progress;
pub mod scan;
pub mod source;
pub mod workbook;

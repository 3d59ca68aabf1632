pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod parser;
pub mod prompt;
pub mod reader;
pub mod records;
pub mod session;
pub mod stats;

pub use error::{Error, Result};
pub use filter::FilterSpec;
pub use session::Session;

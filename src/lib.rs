// src/lib.rs
//! Load sketch resources (text, JSON, bytes, delimited tables) from local
//! paths or URLs.

pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod table;
pub mod unsupported;

pub use config::LoaderConfig;
pub use error::{LoadError, Result};
pub use loader::Loader;
pub use table::{make_object, parse_row, split_lines, Delimiter, Table, TableOptions, TableRow};

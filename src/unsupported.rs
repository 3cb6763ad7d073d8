// src/unsupported.rs
//! Input operations kept for API parity. Each one fails on every call.

use crate::error::{LoadError, Result};

pub fn create_input() -> Result<()> {
    Err(LoadError::Unsupported("create_input"))
}

pub fn create_reader() -> Result<()> {
    Err(LoadError::Unsupported("create_reader"))
}

pub fn parse_xml(_text: &str) -> Result<()> {
    Err(LoadError::Unsupported("parse_xml"))
}

pub fn select_folder() -> Result<()> {
    Err(LoadError::Unsupported("select_folder"))
}

pub fn select_input() -> Result<()> {
    Err(LoadError::Unsupported("select_input"))
}

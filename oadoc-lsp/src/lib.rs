//! Language server for endpoint documents.
//!
//! Validates JSON/YAML endpoint descriptions, completes their keys and values,
//! offers store-backed code actions and previews the swagger-php annotation
//! they generate.

pub mod backend;
pub mod code_actions;
pub mod commands;
pub mod completion;
pub mod config;
pub mod diagnostics;
pub mod docs;
pub mod document;
pub mod handlers;
pub mod parser;
pub mod utils;

//! Glean - translation key extractor
//!
//! Glean walks JS/JSX/TS/TSX sources, collects the keys passed to translation
//! functions (`t("home.title")`), and merges them into one JSON file per locale.
//! Existing translations are kept, missing ones fall back to the base language,
//! and calls whose key is not a string literal are listed under `__UNKNOWN`.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, reporting, exit codes)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction and merge engine

pub mod cli;
pub mod config;
pub mod core;

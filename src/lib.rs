//! xlfsync - keep XLIFF translation files in sync with Twig views
//!
//! xlfsync is a CLI tool and library that collects the translation keys used
//! by `trans` tags and filters in Twig templates (or listed in a plain text
//! file) and reconciles them with the `trans-unit` entries of an XLIFF file:
//! new keys are added with their source text, stale ones removed, and
//! existing translations left untouched.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction, reconciliation and XLIFF document editing

pub mod cli;
pub mod config;
pub mod core;

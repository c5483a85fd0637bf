//! Declarative configuration for generators

pub mod definitions;

pub use definitions::{load_definitions, load_definitions_file, OptionDefinition};

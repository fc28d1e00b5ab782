//! # AstGen Schema
//!
//! Node-type schema model for the AstGen code generator.
//!
//! This crate provides:
//! - Field, node and tree definitions
//! - Identifier rules of the generated language
//! - Schema validation
//! - XML schema file parsing

pub mod error;
pub mod naming;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use parser::{parse_schema, parse_schema_file};
pub use types::{FieldDef, NodeDef, Schema, TreeDef};
pub use validation::{
    normalize_directory, validate_directories, validate_schema, validate_tree,
    validate_tree_with_reserved,
};

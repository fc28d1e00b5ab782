//! # AstGen Codegen
//!
//! Visitor-pattern class generation from node-type schemas.
//!
//! This crate provides:
//! - Field, node class, visitor interface and base class rendering
//! - Per-file and combined output units
//! - Explicit render options for each generation pass

pub mod csharp;
pub mod error;
pub mod generator;
pub mod options;
pub mod writer;

pub use error::CodegenError;
pub use generator::{
    GeneratedFile, GeneratedTree, Generator, generate_schema, generate_schema_combined,
    select_tree,
};
pub use options::RenderOptions;

/// Generates code for every tree of an XML schema string.
///
/// # Arguments
/// * `xml` - Schema document content
/// * `options` - Render options shared by all trees
///
/// # Returns
/// One generated tree per `<tree>` element, in document order.
///
/// # Errors
/// Returns `CodegenError` if parsing or validation fails.
pub fn generate_from_xml(
    xml: &str,
    options: &RenderOptions,
) -> Result<Vec<GeneratedTree>, CodegenError> {
    let schema = astgen_schema::parse_schema(xml)?;
    generate_schema(&schema, options)
}

/// Generates code for every tree of an XML schema file.
///
/// # Arguments
/// * `path` - Path to the schema file
/// * `options` - Render options shared by all trees
///
/// # Returns
/// One generated tree per `<tree>` element, in document order.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or validation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    options: &RenderOptions,
) -> Result<Vec<GeneratedTree>, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, options)
}

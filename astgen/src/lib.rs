//! # AstGen
//!
//! Generates visitor-pattern syntax tree classes from a node-type schema.
//!
//! Each tree in the schema describes an abstract base class and the node
//! types deriving from it. For every tree AstGen writes the base class, a
//! generic visitor interface with one visit method per node type, and one
//! immutable class per node type with a constructor and an `Accept` method
//! dispatching to the visitor.
//!
//! ## Quick Start
//!
//! ```ignore
//! use astgen::prelude::*;
//!
//! let schema = parse_schema_file("schemas/giosue.xml".as_ref())?;
//! let trees = generate_schema(&schema, &RenderOptions::default())?;
//!
//! let mut prompt = AssumeYes;
//! Emitter::new(DiskFs, &mut prompt).emit(&trees, "out".as_ref())?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Node-type model, XML loading and validation
//! - [`codegen`] - Class, visitor and base class rendering
//! - [`emit`] - Writing generated trees below an output directory
//! - [`cli`] - The `astgen` command line

pub mod cli;
pub mod emit;
pub mod fs;
pub mod prelude;
pub mod prompt;

/// Node-type schema model, loading and validation.
pub mod schema {
    pub use astgen_schema::*;
}

/// Source generation from node-type schemas.
pub mod codegen {
    pub use astgen_codegen::*;
}

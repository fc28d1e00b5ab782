//! Prelude module for convenient imports.
//!
//! ```ignore
//! use astgen::prelude::*;
//! ```

// Schema types
pub use astgen_schema::{
    FieldDef, NodeDef, ParseError, Schema, SchemaError, TreeDef, parse_schema, parse_schema_file,
    validate_schema,
};

// Codegen types
pub use astgen_codegen::{
    CodegenError, GeneratedFile, GeneratedTree, Generator, RenderOptions, generate_schema,
    generate_schema_combined, select_tree,
};

// Emission
pub use crate::emit::{EmitError, EmitReport, Emitter};
pub use crate::fs::{DiskFs, OutputFs, PathKind};
pub use crate::prompt::{AssumeYes, Confirm, TerminalPrompt};

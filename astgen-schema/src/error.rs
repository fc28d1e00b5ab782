//! Error types for schema loading and validation.

use thiserror::Error;

/// Error type for schema file parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed escape sequence in an attribute or text.
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Unknown element encountered.
    #[error("unknown element '{element}' in context '{context}'")]
    UnknownElement {
        /// Element name.
        element: String,
        /// Parent context.
        context: String,
    },

    /// Invalid schema document structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an unknown element error.
    pub fn unknown_element(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
            context: context.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

/// Error type for schema validation.
///
/// Every variant names the tree, node or field that broke the rule so the
/// caller can fix the definition and retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A required name is empty.
    #[error("empty {what} in {context}")]
    EmptyName {
        /// Which name is empty (namespace, node name, ...).
        what: &'static str,
        /// Where it was found.
        context: String,
    },

    /// A name is not a valid identifier.
    #[error("invalid {what} '{name}' in {context}")]
    InvalidIdentifier {
        /// Which name is invalid.
        what: &'static str,
        /// The offending name.
        name: String,
        /// Where it was found.
        context: String,
    },

    /// Reserved word used as a constructor parameter without the `@` escape.
    #[error("parameter '{name}' of node '{node}' is a reserved word, write '@{name}'")]
    ReservedWord {
        /// Parameter name.
        name: String,
        /// Node name.
        node: String,
    },

    /// Two nodes in one tree share a name.
    #[error("duplicate node '{name}' in tree '{base}'")]
    DuplicateNode {
        /// Node name.
        name: String,
        /// Base class of the tree.
        base: String,
    },

    /// Two fields of one node share a constructor parameter name.
    #[error("duplicate parameter '{parameter}' in node '{node}'")]
    DuplicateParameter {
        /// Parameter name.
        parameter: String,
        /// Node name.
        node: String,
    },

    /// Two fields of one node share a field name.
    #[error("duplicate field '{field}' in node '{node}'")]
    DuplicateField {
        /// Field name.
        field: String,
        /// Node name.
        node: String,
    },

    /// A field has the same name as its enclosing type.
    #[error("field '{field}' of node '{node}' cannot be named after its enclosing type")]
    MemberNamedAfterType {
        /// Field name.
        field: String,
        /// Node name.
        node: String,
    },

    /// A node is named like a type the generator emits itself.
    #[error("node '{name}' in tree '{base}' clashes with a generated type name")]
    ReservedTypeName {
        /// Node name.
        name: String,
        /// Base class of the tree.
        base: String,
    },

    /// A field is named like a member the generator emits itself.
    #[error("field '{field}' of node '{node}' clashes with a generated member name")]
    ReservedMemberName {
        /// Field name.
        field: String,
        /// Node name.
        node: String,
    },

    /// A node declares a different base class than its tree.
    #[error("node '{node}' extends '{found}' but its tree extends '{expected}'")]
    BaseMismatch {
        /// Node name.
        node: String,
        /// Base class of the tree.
        expected: String,
        /// Base class of the node.
        found: String,
    },

    /// A node declares a different namespace than its tree.
    #[error("node '{node}' lives in '{found}' but its tree lives in '{expected}'")]
    NamespaceMismatch {
        /// Node name.
        node: String,
        /// Namespace of the tree.
        expected: String,
        /// Namespace of the node.
        found: String,
    },

    /// Two trees of one schema write into the same directory.
    #[error("trees '{first}' and '{second}' both write to directory '{directory}'")]
    DuplicateDirectory {
        /// Output directory.
        directory: String,
        /// Base class of the first tree.
        first: String,
        /// Base class of the second tree.
        second: String,
    },
}

impl SchemaError {
    /// Creates an empty name error.
    pub fn empty(what: &'static str, context: impl Into<String>) -> Self {
        Self::EmptyName {
            what,
            context: context.into(),
        }
    }

    /// Creates an invalid identifier error.
    pub fn invalid(
        what: &'static str,
        name: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::InvalidIdentifier {
            what,
            name: name.into(),
            context: context.into(),
        }
    }
}

//! Node-type schema definitions.
//!
//! This module contains the data structures describing the tree node types to
//! generate: fields, nodes, trees (one generation pass each) and the schema
//! document that groups them.

use crate::naming::{parameter_name_for, to_camel_case};

/// One named, typed member of a node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Semantic type, substituted verbatim (`Expression`, `List<Token>`, ...).
    pub type_name: String,
    /// Public accessor name.
    pub field_name: String,
    /// Constructor parameter name.
    pub parameter_name: String,
}

impl FieldDef {
    /// Creates a new field definition.
    #[must_use]
    pub fn new(
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        parameter_name: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: field_name.into(),
            parameter_name: parameter_name.into(),
        }
    }

    /// Creates a field whose parameter name is derived from the field name.
    #[must_use]
    pub fn with_derived_parameter(
        type_name: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        let field_name = field_name.into();
        let parameter_name = parameter_name_for(&field_name);
        Self::new(type_name, field_name, parameter_name)
    }
}

/// A concrete node type extending a base category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDef {
    /// Target namespace.
    pub namespace: String,
    /// Concrete type name.
    pub name: String,
    /// Base category name.
    pub base_class_name: String,
    /// Fields in declaration, parameter and initializer order.
    pub fields: Vec<FieldDef>,
}

impl NodeDef {
    /// Creates a new node definition.
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        base_class_name: impl Into<String>,
        fields: Vec<FieldDef>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            base_class_name: base_class_name.into(),
            fields,
        }
    }

    /// Adds a field to the node.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    /// Returns the visitor method this node dispatches to.
    #[must_use]
    pub fn visit_method_name(&self) -> String {
        format!("Visit{}{}", self.name, self.base_class_name)
    }

    /// Returns true if the node has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// All node types sharing one base category: a single generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDef {
    /// Target namespace shared by every generated type.
    pub namespace: String,
    /// Base category name.
    pub base_class_name: String,
    /// Output subdirectory, relative to the output root.
    pub directory: Option<String>,
    /// Namespaces imported at the top of every generated file.
    pub usings: Vec<String>,
    /// Node types in visitor order.
    pub nodes: Vec<NodeDef>,
}

impl TreeDef {
    /// Creates an empty tree.
    #[must_use]
    pub fn new(namespace: impl Into<String>, base_class_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            base_class_name: base_class_name.into(),
            directory: None,
            usings: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Sets the output subdirectory.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Adds a `using` directive.
    #[must_use]
    pub fn with_using(mut self, namespace: impl Into<String>) -> Self {
        self.usings.push(namespace.into());
        self
    }

    /// Adds a node extending this tree's base in this tree's namespace.
    #[must_use]
    pub fn with_node(mut self, name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        self.add_node(name, fields);
        self
    }

    /// Adds a node extending this tree's base in this tree's namespace.
    pub fn add_node(&mut self, name: impl Into<String>, fields: Vec<FieldDef>) {
        let node = NodeDef::new(
            self.namespace.clone(),
            name,
            self.base_class_name.clone(),
            fields,
        );
        self.nodes.push(node);
    }

    /// Gets a node by name.
    #[must_use]
    pub fn get_node(&self, name: &str) -> Option<&NodeDef> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Default visitor parameter name: the camel-cased base class name.
    #[must_use]
    pub fn visitor_parameter(&self) -> String {
        to_camel_case(&self.base_class_name)
    }
}

/// A schema document: an optional file header and one or more trees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Text emitted as a comment at the top of every generated file.
    pub header: Option<String>,
    /// Trees in document order.
    pub trees: Vec<TreeDef>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a tree by base class name.
    #[must_use]
    pub fn get_tree(&self, base_class_name: &str) -> Option<&TreeDef> {
        self.trees
            .iter()
            .find(|t| t.base_class_name == base_class_name)
    }

    /// Returns the total number of node types across all trees.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.trees.iter().map(|t| t.nodes.len()).sum()
    }
}

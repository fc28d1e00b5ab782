//! Schema validation utilities.
//!
//! Rendering never fails on validated input, so every structural rule is
//! checked here, before any text is produced.

use crate::error::SchemaError;
use crate::naming::{
    VERBATIM_SIGIL, is_identifier, is_namespace, is_parameter_name, is_reserved_word,
};
use crate::types::{FieldDef, NodeDef, Schema, TreeDef};
use std::collections::{HashMap, HashSet};

/// Validates every tree of a schema and checks that their output
/// directories do not overlap.
///
/// # Errors
/// Returns the first `SchemaError` found.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    for tree in &schema.trees {
        validate_tree(tree)?;
    }
    validate_directories(schema)
}

/// Checks that no two trees of a schema share an output directory.
///
/// # Errors
/// Returns `SchemaError::DuplicateDirectory` for the first clash.
pub fn validate_directories(schema: &Schema) -> Result<(), SchemaError> {
    let mut directories: HashMap<String, &str> = HashMap::new();

    for tree in &schema.trees {
        let directory = normalize_directory(tree.directory.as_deref());
        if let Some(first) = directories.insert(directory.to_lowercase(), &tree.base_class_name) {
            return Err(SchemaError::DuplicateDirectory {
                directory,
                first: first.to_string(),
                second: tree.base_class_name.clone(),
            });
        }
    }

    Ok(())
}

/// Returns the canonical form of a tree's output directory.
///
/// Empty and `.` components are dropped and a backslash separates like `/`.
/// `None`, `"."` and `"./"` all map to `""`, and `"./AST/"` maps to `"AST"`.
/// Clashes are checked on the lowercased form, since output may land on a
/// case-insensitive filesystem.
#[must_use]
pub fn normalize_directory(directory: Option<&str>) -> String {
    directory
        .unwrap_or("")
        .split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Validates a single tree.
///
/// # Errors
/// Returns the first `SchemaError` found.
pub fn validate_tree(tree: &TreeDef) -> Result<(), SchemaError> {
    validate_tree_with_reserved(tree, &[], &[])
}

/// Validates a single tree, additionally rejecting nodes named like any of
/// `reserved_types` (the visitor interface, the generic parameter) and
/// fields named like any of `reserved_members` (the dispatch method).
///
/// # Errors
/// Returns the first `SchemaError` found.
pub fn validate_tree_with_reserved(
    tree: &TreeDef,
    reserved_types: &[&str],
    reserved_members: &[&str],
) -> Result<(), SchemaError> {
    let context = format!("tree '{}'", tree.base_class_name);

    if tree.namespace.is_empty() {
        return Err(SchemaError::empty("namespace", context));
    }
    if !is_namespace(&tree.namespace) {
        return Err(SchemaError::invalid("namespace", &tree.namespace, context));
    }
    validate_type_name("base class name", &tree.base_class_name, &context)?;

    for using in &tree.usings {
        if using.trim().is_empty() {
            return Err(SchemaError::empty("using", context));
        }
        if !is_namespace(using) {
            return Err(SchemaError::invalid("using", using, context));
        }
    }

    let mut seen_names = HashSet::new();
    for node in &tree.nodes {
        if !seen_names.insert(node.name.as_str()) {
            return Err(SchemaError::DuplicateNode {
                name: node.name.clone(),
                base: tree.base_class_name.clone(),
            });
        }
        validate_node(tree, node, reserved_types, reserved_members)?;
    }

    tracing::debug!(
        base = %tree.base_class_name,
        nodes = tree.nodes.len(),
        "tree validated"
    );
    Ok(())
}

/// Validates a node against its tree.
fn validate_node(
    tree: &TreeDef,
    node: &NodeDef,
    reserved_types: &[&str],
    reserved_members: &[&str],
) -> Result<(), SchemaError> {
    let context = format!("tree '{}'", tree.base_class_name);
    validate_type_name("node name", &node.name, &context)?;

    if node.name == tree.base_class_name || reserved_types.contains(&node.name.as_str()) {
        return Err(SchemaError::ReservedTypeName {
            name: node.name.clone(),
            base: tree.base_class_name.clone(),
        });
    }

    if node.base_class_name != tree.base_class_name {
        return Err(SchemaError::BaseMismatch {
            node: node.name.clone(),
            expected: tree.base_class_name.clone(),
            found: node.base_class_name.clone(),
        });
    }

    if node.namespace != tree.namespace {
        return Err(SchemaError::NamespaceMismatch {
            node: node.name.clone(),
            expected: tree.namespace.clone(),
            found: node.namespace.clone(),
        });
    }

    let mut seen_fields = HashSet::new();
    let mut seen_parameters = HashSet::new();

    for field in &node.fields {
        validate_field(node, field)?;

        if reserved_members.contains(&field.field_name.as_str()) {
            return Err(SchemaError::ReservedMemberName {
                field: field.field_name.clone(),
                node: node.name.clone(),
            });
        }

        if !seen_fields.insert(field.field_name.as_str()) {
            return Err(SchemaError::DuplicateField {
                field: field.field_name.clone(),
                node: node.name.clone(),
            });
        }

        // `@value` and `value` name the same parameter.
        let bare = field
            .parameter_name
            .strip_prefix(VERBATIM_SIGIL)
            .unwrap_or(&field.parameter_name);
        if !seen_parameters.insert(bare) {
            return Err(SchemaError::DuplicateParameter {
                parameter: field.parameter_name.clone(),
                node: node.name.clone(),
            });
        }
    }

    Ok(())
}

/// Validates a single field.
fn validate_field(node: &NodeDef, field: &FieldDef) -> Result<(), SchemaError> {
    let node_context = format!("node '{}'", node.name);

    if field.field_name.is_empty() {
        return Err(SchemaError::empty("field name", node_context));
    }
    let context = format!("field '{}' of node '{}'", field.field_name, node.name);

    if field.type_name.trim().is_empty() {
        return Err(SchemaError::empty("type name", context));
    }

    validate_type_name("field name", &field.field_name, &node_context)?;

    if field.field_name == node.name {
        return Err(SchemaError::MemberNamedAfterType {
            field: field.field_name.clone(),
            node: node.name.clone(),
        });
    }

    if field.parameter_name.is_empty() {
        return Err(SchemaError::empty("parameter name", context));
    }
    if is_reserved_word(&field.parameter_name) {
        return Err(SchemaError::ReservedWord {
            name: field.parameter_name.clone(),
            node: node.name.clone(),
        });
    }
    if !is_parameter_name(&field.parameter_name) {
        return Err(SchemaError::invalid("parameter name", &field.parameter_name, context));
    }

    Ok(())
}

/// Checks that a type or member name is a non-empty, non-reserved identifier.
fn validate_type_name(what: &'static str, name: &str, context: &str) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::empty(what, context));
    }
    if !is_identifier(name) || is_reserved_word(name) {
        return Err(SchemaError::invalid(what, name, context));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expression_tree() -> TreeDef {
        TreeDef::new("Giosue.AST", "Expression")
            .with_node(
                "Binary",
                vec![
                    FieldDef::new("Expression", "Left", "left"),
                    FieldDef::new("Token", "Operator", "@operator"),
                    FieldDef::new("Expression", "Right", "right"),
                ],
            )
            .with_node(
                "Grouping",
                vec![FieldDef::new("Expression", "Expression", "expression")],
            )
            .with_node("Literal", vec![FieldDef::new("object", "Value", "@value")])
    }

    #[test]
    fn test_validate_valid_tree() {
        assert!(validate_tree(&expression_tree()).is_ok());
    }

    #[test]
    fn test_validate_zero_field_node() {
        let tree = TreeDef::new("Giosue.AST", "Expression").with_node("Nil", Vec::new());
        assert!(validate_tree(&tree).is_ok());
    }

    #[test]
    fn test_validate_duplicate_node_name() {
        let tree = expression_tree().with_node("Binary", Vec::new());
        let err = validate_tree(&tree).expect_err("duplicate accepted");
        assert_eq!(
            err,
            SchemaError::DuplicateNode {
                name: "Binary".to_string(),
                base: "Expression".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_duplicate_parameter() {
        let tree = TreeDef::new("N", "Expression").with_node(
            "Pair",
            vec![
                FieldDef::new("Expression", "First", "value"),
                FieldDef::new("Expression", "Second", "@value"),
            ],
        );
        let err = validate_tree(&tree).expect_err("duplicate accepted");
        assert!(matches!(err, SchemaError::DuplicateParameter { .. }));
    }

    #[test]
    fn test_validate_duplicate_field() {
        let tree = TreeDef::new("N", "Expression").with_node(
            "Pair",
            vec![
                FieldDef::new("Expression", "Value", "first"),
                FieldDef::new("Expression", "Value", "second"),
            ],
        );
        let err = validate_tree(&tree).expect_err("duplicate accepted");
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
    }

    #[test]
    fn test_validate_empty_names() {
        let tree = TreeDef::new("", "Expression");
        assert!(matches!(
            validate_tree(&tree),
            Err(SchemaError::EmptyName { what: "namespace", .. })
        ));

        let tree = TreeDef::new("N", "");
        assert!(matches!(
            validate_tree(&tree),
            Err(SchemaError::EmptyName { what: "base class name", .. })
        ));

        let tree = TreeDef::new("N", "Expression").with_node("", Vec::new());
        assert!(matches!(
            validate_tree(&tree),
            Err(SchemaError::EmptyName { what: "node name", .. })
        ));

        let tree = TreeDef::new("N", "Expression")
            .with_node("Unary", vec![FieldDef::new("Token", "", "op")]);
        assert!(matches!(
            validate_tree(&tree),
            Err(SchemaError::EmptyName { what: "field name", .. })
        ));

        let tree = TreeDef::new("N", "Expression")
            .with_node("Unary", vec![FieldDef::new("Token", "Operator", "")]);
        assert!(matches!(
            validate_tree(&tree),
            Err(SchemaError::EmptyName { what: "parameter name", .. })
        ));
    }

    #[test]
    fn test_validate_reserved_parameter() {
        let tree = TreeDef::new("N", "Expression")
            .with_node("Unary", vec![FieldDef::new("Token", "Operator", "operator")]);
        let err = validate_tree(&tree).expect_err("reserved word accepted");
        assert_eq!(
            err,
            SchemaError::ReservedWord {
                name: "operator".to_string(),
                node: "Unary".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_invalid_identifiers() {
        let tree = TreeDef::new("N", "Expression").with_node("2nd", Vec::new());
        assert!(matches!(
            validate_tree(&tree),
            Err(SchemaError::InvalidIdentifier { what: "node name", .. })
        ));

        let tree = TreeDef::new("N", "Expression")
            .with_node("Call", vec![FieldDef::new("List<Expression>", "Arguments", "arg list")]);
        assert!(matches!(
            validate_tree(&tree),
            Err(SchemaError::InvalidIdentifier { what: "parameter name", .. })
        ));

        let tree = TreeDef::new("Giosue AST", "Expression");
        assert!(matches!(
            validate_tree(&tree),
            Err(SchemaError::InvalidIdentifier { what: "namespace", .. })
        ));
    }

    #[test]
    fn test_validate_member_named_after_type() {
        let tree = TreeDef::new("Giosue.Statements", "Statement").with_node(
            "Expression",
            vec![FieldDef::new("AST.Expression", "Expression", "expression")],
        );
        let err = validate_tree(&tree).expect_err("member named after type accepted");
        assert!(matches!(err, SchemaError::MemberNamedAfterType { .. }));
    }

    #[test]
    fn test_validate_reserved_type_names() {
        let tree = TreeDef::new("N", "Expression").with_node("Expression", Vec::new());
        assert!(matches!(
            validate_tree(&tree),
            Err(SchemaError::ReservedTypeName { .. })
        ));

        let tree = TreeDef::new("N", "Expression").with_node("IVisitor", Vec::new());
        assert!(validate_tree(&tree).is_ok());
        assert!(matches!(
            validate_tree_with_reserved(&tree, &["IVisitor"], &[]),
            Err(SchemaError::ReservedTypeName { .. })
        ));

        let tree = TreeDef::new("N", "Expression").with_node("T", Vec::new());
        assert!(matches!(
            validate_tree_with_reserved(&tree, &["IVisitor", "T"], &[]),
            Err(SchemaError::ReservedTypeName { ref name, .. }) if name == "T"
        ));
    }

    #[test]
    fn test_validate_reserved_member_names() {
        let tree = TreeDef::new("N", "Expression")
            .with_node("Call", vec![FieldDef::new("Token", "Accept", "accept")]);
        assert!(validate_tree(&tree).is_ok());
        assert_eq!(
            validate_tree_with_reserved(&tree, &[], &["Accept"]),
            Err(SchemaError::ReservedMemberName {
                field: "Accept".to_string(),
                node: "Call".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_usings() {
        let tree = expression_tree().with_using("System.Collections.Generic");
        assert!(validate_tree(&tree).is_ok());

        let tree = expression_tree().with_using("  ");
        assert!(matches!(
            validate_tree(&tree),
            Err(SchemaError::EmptyName { what: "using", .. })
        ));

        let tree = expression_tree().with_using("System..Text");
        assert!(matches!(
            validate_tree(&tree),
            Err(SchemaError::InvalidIdentifier { what: "using", .. })
        ));
    }

    #[test]
    fn test_validate_mismatched_node() {
        let mut tree = expression_tree();
        tree.nodes
            .push(NodeDef::new("Giosue.AST", "Var", "Statement", Vec::new()));
        assert!(matches!(
            validate_tree(&tree),
            Err(SchemaError::BaseMismatch { .. })
        ));

        let mut tree = expression_tree();
        tree.nodes
            .push(NodeDef::new("Other", "Var", "Expression", Vec::new()));
        assert!(matches!(
            validate_tree(&tree),
            Err(SchemaError::NamespaceMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_schema_duplicate_directory() {
        let mut schema = Schema::new();
        schema.trees.push(expression_tree());
        schema.trees.push(TreeDef::new("Giosue.Statements", "Statement"));

        let err = validate_schema(&schema).expect_err("shared directory accepted");
        assert!(matches!(err, SchemaError::DuplicateDirectory { .. }));

        schema.trees[0].directory = Some("AST".to_string());
        schema.trees[1].directory = Some("Statements".to_string());
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_validate_schema_equivalent_directories() {
        let pairs = [
            (None, Some(".")),
            (Some("./"), None),
            (Some("AST"), Some("AST/")),
            (Some("AST"), Some("./AST")),
            (Some("AST"), Some("ast")),
            (Some("Out/AST"), Some("Out\\AST")),
        ];

        for (first, second) in pairs {
            let mut schema = Schema::new();
            let mut expressions = expression_tree();
            expressions.directory = first.map(str::to_string);
            let mut statements = TreeDef::new("Giosue.Statements", "Statement");
            statements.directory = second.map(str::to_string);
            schema.trees.push(expressions);
            schema.trees.push(statements);

            let err = validate_schema(&schema).expect_err("overlapping directories accepted");
            assert!(matches!(err, SchemaError::DuplicateDirectory { .. }));
        }
    }

    #[test]
    fn test_normalize_directory() {
        assert_eq!(normalize_directory(None), "");
        assert_eq!(normalize_directory(Some(".")), "");
        assert_eq!(normalize_directory(Some("./AST/")), "AST");
        assert_eq!(normalize_directory(Some("Out\\AST")), "Out/AST");
        assert_eq!(normalize_directory(Some("Out//./AST")), "Out/AST");
    }
}

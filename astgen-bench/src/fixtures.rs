//! Synthetic trees and schema documents of configurable size.

use astgen_schema::{FieldDef, TreeDef};
use std::fmt::Write;

const FIELD_TYPES: &[&str] = &["Expression", "Token", "List<Expression>", "object"];

/// Builds a tree with `nodes` node types of `fields` fields each.
#[must_use]
pub fn synthetic_tree(nodes: usize, fields: usize) -> TreeDef {
    let mut tree = TreeDef::new("Bench.Syntax", "Expression")
        .with_using("System")
        .with_using("System.Collections.Generic");

    for n in 0..nodes {
        let fields = (0..fields)
            .map(|f| {
                FieldDef::new(
                    FIELD_TYPES[f % FIELD_TYPES.len()],
                    format!("Field{f}"),
                    format!("field{f}"),
                )
            })
            .collect();
        tree.add_node(format!("Node{n}"), fields);
    }
    tree
}

/// Renders an XML schema document with `trees` trees of `nodes` node types.
#[must_use]
pub fn synthetic_schema_xml(trees: usize, nodes: usize, fields: usize) -> String {
    let mut xml = String::from("<astSchema>\n    <header>Benchmark schema</header>\n");

    for t in 0..trees {
        let _ = writeln!(
            xml,
            r#"    <tree namespace="Bench.Tree{t}" base="Base{t}" directory="Tree{t}">"#
        );
        xml.push_str("        <using>System</using>\n");
        for n in 0..nodes {
            let _ = writeln!(xml, r#"        <node name="Node{n}">"#);
            for f in 0..fields {
                let _ = writeln!(
                    xml,
                    r#"            <field type="List&lt;Base{t}&gt;" name="Field{f}"/>"#
                );
            }
            xml.push_str("        </node>\n");
        }
        xml.push_str("    </tree>\n");
    }

    xml.push_str("</astSchema>\n");
    xml
}

//! Schema file parser.
//!
//! Reads the XML description of one or more trees:
//!
//! ```xml
//! <astSchema>
//!     <header>Licence text</header>
//!     <tree namespace="Giosue.AST" base="Expression" directory="AST">
//!         <using>System</using>
//!         <node name="Binary">
//!             <field type="Expression" name="Left" parameter="left"/>
//!             <field type="Token" name="Operator"/>
//!         </node>
//!     </tree>
//! </astSchema>
//! ```
//!
//! A field without a `parameter` attribute gets one derived from its name.

use crate::error::ParseError;
use crate::types::{FieldDef, NodeDef, Schema, TreeDef};
use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::path::Path;

const ROOT: &str = "astSchema";

/// Parses a schema document from a string.
///
/// # Arguments
/// * `xml` - XML schema content
///
/// # Returns
/// Parsed schema or parse error. The schema is not validated.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains unknown elements
/// or missing attributes.
pub fn parse_schema(xml: &str) -> Result<Schema, ParseError> {
    // Text is trimmed once per element in `read_text`. Trimming each event
    // would eat the spaces around entity references.
    let mut reader = Reader::from_str(xml);

    let mut schema: Option<Schema> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = element_name(e)?;
                if name != ROOT || schema.is_some() {
                    return Err(ParseError::unknown_element(name, "document"));
                }
                schema = Some(parse_document(&mut reader)?);
            }
            Ok(Event::Empty(ref e)) => {
                let name = element_name(e)?;
                if name != ROOT || schema.is_some() {
                    return Err(ParseError::unknown_element(name, "document"));
                }
                schema = Some(Schema::new());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    schema.ok_or_else(|| ParseError::structure(format!("no {ROOT} element found")))
}

/// Reads and parses a schema file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_schema_file(path: &Path) -> Result<Schema, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    let schema = parse_schema(&xml)?;
    tracing::debug!(
        path = %path.display(),
        trees = schema.trees.len(),
        nodes = schema.node_count(),
        "schema file parsed"
    );
    Ok(schema)
}

/// Parses the children of the root element.
fn parse_document(reader: &mut Reader<&[u8]>) -> Result<Schema, ParseError> {
    let mut schema = Schema::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match element_name(e)?.as_str() {
                "header" => {
                    let text = read_text(reader)?;
                    schema.header = Some(normalize_header(&text));
                }
                "tree" => schema.trees.push(parse_tree(reader, e)?),
                other => return Err(ParseError::unknown_element(other, ROOT)),
            },
            Ok(Event::Empty(ref e)) => match element_name(e)?.as_str() {
                "header" => {}
                "tree" => schema.trees.push(parse_tree_start(e)?),
                other => return Err(ParseError::unknown_element(other, ROOT)),
            },
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(ParseError::structure(format!("unclosed {ROOT}"))),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(schema)
}

/// Parses the attributes of a tree element.
fn parse_tree_start(e: &BytesStart<'_>) -> Result<TreeDef, ParseError> {
    let mut attrs = attributes(e)?;
    let namespace = required(&mut attrs, "tree", "namespace")?;
    let base = required(&mut attrs, "tree", "base")?;

    let mut tree = TreeDef::new(namespace, base);
    tree.directory = attrs.remove("directory");
    Ok(tree)
}

/// Parses a tree element with its usings and nodes.
fn parse_tree(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<TreeDef, ParseError> {
    let mut tree = parse_tree_start(e)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match element_name(e)?.as_str() {
                "using" => tree.usings.push(read_text(reader)?),
                "node" => {
                    let node = parse_node(reader, e, &tree)?;
                    tree.nodes.push(node);
                }
                other => return Err(ParseError::unknown_element(other, "tree")),
            },
            Ok(Event::Empty(ref e)) => match element_name(e)?.as_str() {
                "node" => {
                    let node = parse_node_start(e, &tree)?;
                    tree.nodes.push(node);
                }
                other => return Err(ParseError::unknown_element(other, "tree")),
            },
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(ParseError::structure("unclosed tree")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(
        base = %tree.base_class_name,
        nodes = tree.nodes.len(),
        "tree parsed"
    );
    Ok(tree)
}

/// Parses the attributes of a node element.
fn parse_node_start(e: &BytesStart<'_>, tree: &TreeDef) -> Result<NodeDef, ParseError> {
    let mut attrs = attributes(e)?;
    let name = required(&mut attrs, "node", "name")?;

    Ok(NodeDef::new(
        tree.namespace.clone(),
        name,
        tree.base_class_name.clone(),
        Vec::new(),
    ))
}

/// Parses a node element with its fields.
fn parse_node(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    tree: &TreeDef,
) -> Result<NodeDef, ParseError> {
    let mut node = parse_node_start(e, tree)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) => match element_name(e)?.as_str() {
                "field" => node.add_field(parse_field(e)?),
                other => return Err(ParseError::unknown_element(other, "node")),
            },
            Ok(Event::Start(ref e)) => match element_name(e)?.as_str() {
                "field" => {
                    node.add_field(parse_field(e)?);
                    skip_to_end(reader)?;
                }
                other => return Err(ParseError::unknown_element(other, "node")),
            },
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(ParseError::structure("unclosed node")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(node)
}

/// Parses a field element.
fn parse_field(e: &BytesStart<'_>) -> Result<FieldDef, ParseError> {
    let mut attrs = attributes(e)?;
    let type_name = required(&mut attrs, "field", "type")?;
    let field_name = required(&mut attrs, "field", "name")?;

    Ok(match attrs.remove("parameter") {
        Some(parameter) => FieldDef::new(type_name, field_name, parameter),
        None => FieldDef::with_derived_parameter(type_name, field_name),
    })
}

/// Returns the element's qualified name.
fn element_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    Ok(std::str::from_utf8(&name_bytes)?.to_string())
}

/// Collects an element's attributes, unescaping their values.
fn attributes(e: &BytesStart<'_>) -> Result<HashMap<String, String>, ParseError> {
    let mut attrs = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        attrs.insert(key.to_string(), unescape(value)?.into_owned());
    }
    Ok(attrs)
}

/// Removes a required attribute from the map.
fn required(
    attrs: &mut HashMap<String, String>,
    element: &str,
    attribute: &str,
) -> Result<String, ParseError> {
    attrs
        .remove(attribute)
        .ok_or_else(|| ParseError::missing_attr(element, attribute))
}

/// Reads text and CDATA content up to the end of the current element.
///
/// Entity and character references arrive as separate events and are
/// resolved in place.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => {
                let raw = std::str::from_utf8(t.as_ref())?;
                text.push_str(&unescape(raw)?);
            }
            Ok(Event::CData(ref t)) => {
                text.push_str(std::str::from_utf8(t.as_ref())?);
            }
            Ok(Event::GeneralRef(ref r)) => {
                if let Some(c) = r.resolve_char_ref()? {
                    text.push(c);
                } else {
                    let name = std::str::from_utf8(r.as_ref())?;
                    let resolved = resolve_predefined_entity(name).ok_or_else(|| {
                        ParseError::structure(format!("unknown entity reference &{name};"))
                    })?;
                    text.push_str(resolved);
                }
            }
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                return Err(ParseError::unknown_element(element_name(e)?, "text"));
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(ParseError::structure("unclosed text element")),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text.trim().to_string())
}

/// Strips per-line indentation picked up from the XML layout.
fn normalize_header(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_schema;

    const SIMPLE_SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<astSchema>
    <header>
        Giosue language interpreter
        Copyright (C) 2021
    </header>
    <tree namespace="Giosue.AST" base="Expression" directory="AST">
        <using>System</using>
        <using>System.Collections.Generic</using>
        <node name="Binary">
            <field type="Expression" name="Left" parameter="left"/>
            <field type="Token" name="Operator"/>
            <field type="Expression" name="Right" parameter="right"/>
        </node>
        <node name="Call">
            <field type="List&lt;Expression&gt;" name="Arguments"/>
        </node>
        <node name="Nil"/>
    </tree>
    <tree namespace="Giosue.Statements" base="Statement" directory="Statements">
        <node name="Var">
            <field type="Token" name="Name"></field>
        </node>
    </tree>
</astSchema>"#;

    #[test]
    fn test_parse_simple_schema() {
        let schema = parse_schema(SIMPLE_SCHEMA).expect("Failed to parse schema");

        assert_eq!(schema.trees.len(), 2);
        assert_eq!(schema.node_count(), 4);
        assert_eq!(
            schema.header.as_deref(),
            Some("Giosue language interpreter\nCopyright (C) 2021")
        );
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_parse_tree() {
        let schema = parse_schema(SIMPLE_SCHEMA).expect("Failed to parse schema");
        let tree = schema.get_tree("Expression").expect("tree missing");

        assert_eq!(tree.namespace, "Giosue.AST");
        assert_eq!(tree.directory.as_deref(), Some("AST"));
        assert_eq!(tree.usings, ["System", "System.Collections.Generic"]);
        assert_eq!(tree.nodes.len(), 3);
        assert!(tree.get_node("Nil").expect("Nil missing").is_empty());
    }

    #[test]
    fn test_parse_fields() {
        let schema = parse_schema(SIMPLE_SCHEMA).expect("Failed to parse schema");
        let tree = schema.get_tree("Expression").expect("tree missing");

        let binary = tree.get_node("Binary").expect("Binary missing");
        assert_eq!(
            binary.fields,
            vec![
                FieldDef::new("Expression", "Left", "left"),
                FieldDef::new("Token", "Operator", "@operator"),
                FieldDef::new("Expression", "Right", "right"),
            ]
        );

        let call = tree.get_node("Call").expect("Call missing");
        assert_eq!(call.fields[0].type_name, "List<Expression>");
        assert_eq!(call.fields[0].parameter_name, "arguments");

        let var = schema
            .get_tree("Statement")
            .and_then(|t| t.get_node("Var"))
            .expect("Var missing");
        assert_eq!(var.base_class_name, "Statement");
        assert_eq!(var.namespace, "Giosue.Statements");
        assert_eq!(var.fields.len(), 1);
    }

    #[test]
    fn test_parse_missing_attribute() {
        let xml = r#"<astSchema><tree base="Expression"/></astSchema>"#;
        let err = parse_schema(xml).expect_err("missing namespace accepted");
        assert!(matches!(
            err,
            ParseError::MissingAttribute { ref attribute, .. } if attribute == "namespace"
        ));

        let xml = r#"<astSchema><tree namespace="N" base="E">
            <node name="A"><field name="X"/></node>
        </tree></astSchema>"#;
        let err = parse_schema(xml).expect_err("missing type accepted");
        assert!(matches!(
            err,
            ParseError::MissingAttribute { ref attribute, .. } if attribute == "type"
        ));
    }

    #[test]
    fn test_parse_malformed_attribute() {
        let xml = r#"<astSchema><tree namespace="N" base="E" directory=AST/></astSchema>"#;
        let err = parse_schema(xml).expect_err("malformed attribute accepted");
        assert!(matches!(err, ParseError::Xml(_)));

        let xml = r#"<astSchema><tree namespace="N" base="E" base="F"/></astSchema>"#;
        assert!(parse_schema(xml).is_err());
    }

    #[test]
    fn test_parse_unknown_element() {
        let xml = r#"<astSchema><tree namespace="N" base="E"><leaf name="A"/></tree></astSchema>"#;
        let err = parse_schema(xml).expect_err("unknown element accepted");
        assert!(matches!(err, ParseError::UnknownElement { .. }));

        let xml = r#"<messageSchema/>"#;
        assert!(parse_schema(xml).is_err());
    }

    #[test]
    fn test_parse_text_references() {
        let xml = r#"<astSchema>
    <header>Smith &amp; Jones &lt;x&gt; &#169; 2021</header>
    <tree namespace="N" base="E">
        <using>A&#46;B</using>
        <using><![CDATA[C<D>]]></using>
    </tree>
</astSchema>"#;
        let schema = parse_schema(xml).expect("Failed to parse schema");

        assert_eq!(schema.header.as_deref(), Some("Smith & Jones <x> \u{a9} 2021"));
        assert_eq!(schema.trees[0].usings, ["A.B", "C<D>"]);
    }

    #[test]
    fn test_parse_unknown_entity() {
        let xml = "<astSchema><header>a &nbsp; b</header></astSchema>";
        assert!(parse_schema(xml).is_err());
    }

    #[test]
    fn test_parse_no_root() {
        let err = parse_schema("").expect_err("empty document accepted");
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }

    #[test]
    fn test_parse_empty_root() {
        let schema = parse_schema("<astSchema/>").expect("Failed to parse schema");
        assert!(schema.trees.is_empty());
        assert!(schema.header.is_none());
    }

    #[test]
    fn test_parse_schema_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("tree.xml");
        std::fs::write(&path, SIMPLE_SCHEMA).expect("Failed to write schema");

        let schema = parse_schema_file(&path).expect("Failed to parse schema file");
        assert_eq!(schema.trees.len(), 2);

        let err = parse_schema_file(&dir.path().join("missing.xml")).expect_err("missing file");
        assert!(matches!(err, ParseError::Io(_)));
    }
}

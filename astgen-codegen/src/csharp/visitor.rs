//! Visitor interface generation.

use crate::options::RenderOptions;
use crate::writer::CodeWriter;
use astgen_schema::TreeDef;
use astgen_schema::naming::escape_identifier;

/// Generator for the visitor interface of a tree.
pub struct VisitorGenerator<'a> {
    tree: &'a TreeDef,
    options: &'a RenderOptions,
}

impl<'a> VisitorGenerator<'a> {
    /// Creates a new visitor generator.
    #[must_use]
    pub fn new(tree: &'a TreeDef, options: &'a RenderOptions) -> Self {
        Self { tree, options }
    }

    /// Returns the parameter name used by every visitor method.
    #[must_use]
    pub fn parameter_name(&self) -> String {
        match &self.options.visitor_parameter {
            Some(name) => name.clone(),
            None => escape_identifier(&self.tree.visitor_parameter()),
        }
    }

    /// Returns the visitor method signatures in node order.
    #[must_use]
    pub fn method_signatures(&self) -> Vec<String> {
        let generic = &self.options.generic_parameter;
        let parameter = self.parameter_name();

        self.tree
            .nodes
            .iter()
            .map(|node| {
                format!(
                    "{generic} {}({} {parameter});",
                    node.visit_method_name(),
                    node.name
                )
            })
            .collect()
    }

    /// Writes the interface into `w`.
    pub fn write_interface(&self, w: &mut CodeWriter<'_>) {
        let signature = format!("public interface {}", self.options.visitor_type());
        w.block(signature, |w| {
            for method in self.method_signatures() {
                w.line(method);
            }
        });

        tracing::debug!(
            base = %self.tree.base_class_name,
            methods = self.tree.nodes.len(),
            "rendered visitor interface"
        );
    }

    /// Generates the interface on its own, without namespace or preamble.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut w = CodeWriter::new(&self.options.indent);
        self.write_interface(&mut w);
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astgen_schema::FieldDef;

    fn statement_tree() -> TreeDef {
        TreeDef::new("Giosue.Statements", "Statement")
            .with_node(
                "Expression",
                vec![FieldDef::new("AST.Expression", "Expr", "expression")],
            )
            .with_node(
                "Var",
                vec![
                    FieldDef::new("Token", "Name", "name"),
                    FieldDef::new("AST.Expression", "Initializer", "initializer"),
                ],
            )
    }

    #[test]
    fn test_generate_statement_visitor() {
        let tree = statement_tree();
        let options = RenderOptions::default();
        let output = VisitorGenerator::new(&tree, &options).generate();

        let expected = "\
public interface IVisitor<T>
{
    T VisitExpressionStatement(Expression statement);
    T VisitVarStatement(Var statement);
}
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_each_visit_method_appears_once() {
        let tree = statement_tree();
        let options = RenderOptions::default();
        let output = VisitorGenerator::new(&tree, &options).generate();

        for node in &tree.nodes {
            assert_eq!(output.matches(&format!("{}(", node.visit_method_name())).count(), 1);
        }
    }

    #[test]
    fn test_empty_tree() {
        let tree = TreeDef::new("N", "Expression");
        let options = RenderOptions::default();
        let output = VisitorGenerator::new(&tree, &options).generate();
        assert_eq!(output, "public interface IVisitor<T>\n{\n}\n");
    }

    #[test]
    fn test_parameter_name() {
        let tree = TreeDef::new("N", "Object").with_node("Point", Vec::new());
        let options = RenderOptions::default();
        assert_eq!(VisitorGenerator::new(&tree, &options).parameter_name(), "@object");

        let options = RenderOptions::new().visitor_parameter("node");
        let generator = VisitorGenerator::new(&tree, &options);
        assert_eq!(generator.method_signatures(), ["T VisitPointObject(Point node);"]);
    }
}

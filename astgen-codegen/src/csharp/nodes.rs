//! Concrete node class generation.

use super::fields::{FieldSyntax, parameter_list};
use crate::options::RenderOptions;
use crate::writer::CodeWriter;
use astgen_schema::NodeDef;

/// Generator for one concrete node class.
///
/// The class body is laid out as declarations, constructor, dispatch method.
/// Declarations, constructor parameters and initializers all follow the
/// node's field order.
pub struct NodeGenerator<'a> {
    node: &'a NodeDef,
    options: &'a RenderOptions,
}

impl<'a> NodeGenerator<'a> {
    /// Creates a new node generator.
    #[must_use]
    pub fn new(node: &'a NodeDef, options: &'a RenderOptions) -> Self {
        Self { node, options }
    }

    /// Returns the class declaration line.
    #[must_use]
    pub fn class_signature(&self) -> String {
        format!(
            "public class {} : {}",
            self.node.name, self.node.base_class_name
        )
    }

    /// Returns the constructor declaration line.
    #[must_use]
    pub fn constructor_signature(&self) -> String {
        format!(
            "public {}({})",
            self.node.name,
            parameter_list(&self.node.fields)
        )
    }

    /// Returns the dispatch method declaration line.
    #[must_use]
    pub fn accept_signature(&self) -> String {
        let generic = &self.options.generic_parameter;
        format!(
            "public override {generic} {}<{generic}>({} visitor)",
            self.options.accept_method,
            self.options.visitor_type()
        )
    }

    /// Returns the dispatch method body statement.
    #[must_use]
    pub fn accept_body(&self) -> String {
        format!("return visitor.{}(this);", self.node.visit_method_name())
    }

    /// Writes the class into `w`.
    pub fn write_class(&self, w: &mut CodeWriter<'_>) {
        w.block(self.class_signature(), |w| {
            for field in &self.node.fields {
                w.line(field.render_declaration());
            }
            if !self.node.is_empty() {
                w.blank();
            }

            w.block(self.constructor_signature(), |w| {
                for field in &self.node.fields {
                    w.line(field.render_initializer());
                }
            });
            w.blank();

            w.block(self.accept_signature(), |w| {
                w.line(self.accept_body());
            });
        });

        tracing::debug!(
            node = %self.node.name,
            fields = self.node.fields.len(),
            "rendered node class"
        );
    }

    /// Generates the class on its own, without namespace or preamble.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut w = CodeWriter::new(&self.options.indent);
        self.write_class(&mut w);
        w.finish()
    }
}

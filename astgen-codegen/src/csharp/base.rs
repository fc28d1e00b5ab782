//! Abstract base class generation.

use crate::options::RenderOptions;
use crate::writer::CodeWriter;
use astgen_schema::TreeDef;

/// Generator for the abstract base class every node of a tree extends.
pub struct BaseClassGenerator<'a> {
    tree: &'a TreeDef,
    options: &'a RenderOptions,
}

impl<'a> BaseClassGenerator<'a> {
    /// Creates a new base class generator.
    #[must_use]
    pub fn new(tree: &'a TreeDef, options: &'a RenderOptions) -> Self {
        Self { tree, options }
    }

    /// Returns the abstract dispatch method declaration.
    #[must_use]
    pub fn accept_declaration(&self) -> String {
        let generic = &self.options.generic_parameter;
        format!(
            "public abstract {generic} {}<{generic}>({} visitor);",
            self.options.accept_method,
            self.options.visitor_type()
        )
    }

    /// Writes the base class into `w`.
    pub fn write_class(&self, w: &mut CodeWriter<'_>) {
        let signature = format!("public abstract class {}", self.tree.base_class_name);
        w.block(signature, |w| {
            w.line(self.accept_declaration());
        });
    }

    /// Generates the class on its own, without namespace or preamble.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut w = CodeWriter::new(&self.options.indent);
        self.write_class(&mut w);
        w.finish()
    }
}

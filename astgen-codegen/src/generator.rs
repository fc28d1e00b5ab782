//! Tree-level code generation.
//!
//! A [`Generator`] turns one validated tree into output units: the abstract
//! base class, the visitor interface and one class per node, either as
//! separate files or as a single combined file.

use crate::csharp::{BaseClassGenerator, NodeGenerator, VisitorGenerator};
use crate::error::CodegenError;
use crate::options::RenderOptions;
use crate::writer::CodeWriter;
use astgen_schema::{Schema, TreeDef, validate_directories, validate_tree_with_reserved};

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name, relative to the tree's output directory.
    pub file_name: String,
    /// File contents.
    pub contents: String,
}

/// All files generated for one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTree {
    /// Base class of the tree.
    pub base_class_name: String,
    /// Output subdirectory, relative to the output root.
    pub directory: Option<String>,
    /// Generated files in emission order.
    pub files: Vec<GeneratedFile>,
}

impl GeneratedTree {
    /// Gets a file by name.
    #[must_use]
    pub fn file(&self, file_name: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.file_name == file_name)
    }
}

/// Code generator for one tree.
pub struct Generator<'a> {
    tree: &'a TreeDef,
    options: &'a RenderOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(tree: &'a TreeDef, options: &'a RenderOptions) -> Self {
        Self { tree, options }
    }

    /// Checks the options and the tree.
    ///
    /// # Errors
    /// Returns `CodegenError` describing the first violated rule.
    pub fn validate(&self) -> Result<(), CodegenError> {
        self.options.validate()?;
        self.validate_tree()
    }

    /// Checks the tree against the names the options make the generator emit.
    fn validate_tree(&self) -> Result<(), CodegenError> {
        let reserved_types = [
            self.options.visitor_name.as_str(),
            self.options.generic_parameter.as_str(),
        ];
        let reserved_members = [self.options.accept_method.as_str()];
        validate_tree_with_reserved(self.tree, &reserved_types, &reserved_members)?;
        Ok(())
    }

    /// Generates one file per node plus the base class and visitor files.
    ///
    /// # Errors
    /// Returns `CodegenError` if validation fails. Nothing is rendered then.
    pub fn generate(&self) -> Result<GeneratedTree, CodegenError> {
        self.validate()?;
        Ok(self.render_files())
    }

    /// Renders one file per type. The tree must already be validated.
    fn render_files(&self) -> GeneratedTree {
        let mut files = Vec::with_capacity(self.tree.nodes.len() + 2);

        files.push(GeneratedFile {
            file_name: self.options.file_name(&self.options.visitor_name),
            contents: self.render_file(|w| {
                VisitorGenerator::new(self.tree, self.options).write_interface(w);
            }),
        });

        files.push(GeneratedFile {
            file_name: self.options.file_name(&self.tree.base_class_name),
            contents: self.render_file(|w| {
                BaseClassGenerator::new(self.tree, self.options).write_class(w);
            }),
        });

        for node in &self.tree.nodes {
            files.push(GeneratedFile {
                file_name: self.options.file_name(&node.name),
                contents: self.render_file(|w| {
                    NodeGenerator::new(node, self.options).write_class(w);
                }),
            });
        }

        tracing::debug!(
            base = %self.tree.base_class_name,
            files = files.len(),
            "generated tree"
        );

        GeneratedTree {
            base_class_name: self.tree.base_class_name.clone(),
            directory: self.tree.directory.clone(),
            files,
        }
    }

    /// Generates the whole tree as one text block.
    ///
    /// # Errors
    /// Returns `CodegenError` if validation fails.
    pub fn generate_combined(&self) -> Result<String, CodegenError> {
        self.validate()?;
        Ok(self.render_combined())
    }

    /// Renders the combined block. The tree must already be validated.
    fn render_combined(&self) -> String {
        self.render_file(|w| {
            BaseClassGenerator::new(self.tree, self.options).write_class(w);
            w.blank();
            VisitorGenerator::new(self.tree, self.options).write_interface(w);
            for node in &self.tree.nodes {
                w.blank();
                NodeGenerator::new(node, self.options).write_class(w);
            }
        })
    }

    /// Generates the combined block as a single-file tree named after the
    /// base class.
    ///
    /// # Errors
    /// Returns `CodegenError` if validation fails.
    pub fn generate_combined_tree(&self) -> Result<GeneratedTree, CodegenError> {
        self.validate()?;
        Ok(self.render_combined_tree())
    }

    fn render_combined_tree(&self) -> GeneratedTree {
        GeneratedTree {
            base_class_name: self.tree.base_class_name.clone(),
            directory: self.tree.directory.clone(),
            files: vec![GeneratedFile {
                file_name: self.options.file_name(&self.tree.base_class_name),
                contents: self.render_combined(),
            }],
        }
    }

    /// Renders the preamble and a namespace block filled by `body`.
    fn render_file(&self, body: impl FnOnce(&mut CodeWriter<'_>)) -> String {
        let mut w = CodeWriter::new(&self.options.indent);
        self.write_preamble(&mut w);
        w.block(format!("namespace {}", self.tree.namespace), body);
        w.finish()
    }

    /// Writes the header comment, banner and using directives.
    fn write_preamble(&self, w: &mut CodeWriter<'_>) {
        if let Some(header) = &self.options.header {
            for line in header.lines() {
                w.comment(line);
            }
            w.blank();
        }

        if let Some(banner) = &self.options.banner {
            w.comment(banner);
            w.blank();
        }

        if !self.tree.usings.is_empty() {
            for using in &self.tree.usings {
                w.line(format!("using {using};"));
            }
            w.blank();
        }
    }
}

/// Generates every tree of a schema, one file per type.
///
/// The schema header is used when `options` has none. All trees are
/// validated before any of them is rendered.
///
/// # Errors
/// Returns `CodegenError` if the schema or the options are invalid.
pub fn generate_schema(
    schema: &Schema,
    options: &RenderOptions,
) -> Result<Vec<GeneratedTree>, CodegenError> {
    let options = schema_options(schema, options);
    validate_all(schema, &options)?;

    Ok(schema
        .trees
        .iter()
        .map(|tree| Generator::new(tree, &options).render_files())
        .collect())
}

/// Generates every tree of a schema, one combined file per tree.
///
/// # Errors
/// Returns `CodegenError` if the schema or the options are invalid.
pub fn generate_schema_combined(
    schema: &Schema,
    options: &RenderOptions,
) -> Result<Vec<GeneratedTree>, CodegenError> {
    let options = schema_options(schema, options);
    validate_all(schema, &options)?;

    Ok(schema
        .trees
        .iter()
        .map(|tree| Generator::new(tree, &options).render_combined_tree())
        .collect())
}

/// Returns the schema restricted to the tree with the given base class.
///
/// # Errors
/// Returns `CodegenError::TreeNotFound` if no tree matches.
pub fn select_tree(schema: &Schema, base_class_name: &str) -> Result<Schema, CodegenError> {
    let tree = schema
        .get_tree(base_class_name)
        .ok_or_else(|| CodegenError::TreeNotFound {
            base: base_class_name.to_string(),
        })?;

    Ok(Schema {
        header: schema.header.clone(),
        trees: vec![tree.clone()],
    })
}

fn schema_options(schema: &Schema, options: &RenderOptions) -> RenderOptions {
    let mut options = options.clone();
    if options.header.is_none() {
        options.header = schema.header.clone();
    }
    options
}

/// Validates the options once and every tree once, then the directories.
fn validate_all(schema: &Schema, options: &RenderOptions) -> Result<(), CodegenError> {
    options.validate()?;
    for tree in &schema.trees {
        Generator::new(tree, options).validate_tree()?;
    }
    validate_directories(schema)?;
    Ok(())
}

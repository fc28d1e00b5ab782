//! Rendering configuration.

use crate::error::CodegenError;
use astgen_schema::naming::{is_identifier, is_parameter_name, is_reserved_word};

/// Banner written at the top of generated files by default.
pub const DEFAULT_BANNER: &str = "This code was generated by astgen.";

/// Naming and layout settings for one generation pass.
///
/// Passed explicitly to every generator, so separate passes (expressions,
/// statements) can use different settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// One indentation level.
    pub indent: String,
    /// Visitor interface name, without generic arguments.
    pub visitor_name: String,
    /// Generic return type parameter of the visitor.
    pub generic_parameter: String,
    /// Name of the dispatch method.
    pub accept_method: String,
    /// Parameter name of visitor methods; defaults to the camel-cased base name.
    pub visitor_parameter: Option<String>,
    /// Generated-code banner comment.
    pub banner: Option<String>,
    /// Header comment (e.g. a licence), one comment line per text line.
    pub header: Option<String>,
    /// Extension of generated files.
    pub file_extension: String,
}

impl RenderOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            indent: "    ".to_string(),
            visitor_name: "IVisitor".to_string(),
            generic_parameter: "T".to_string(),
            accept_method: "Accept".to_string(),
            visitor_parameter: None,
            banner: Some(DEFAULT_BANNER.to_string()),
            header: None,
            file_extension: "cs".to_string(),
        }
    }

    /// Sets the indentation string.
    #[must_use]
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Sets the visitor interface name.
    #[must_use]
    pub fn visitor_name(mut self, name: impl Into<String>) -> Self {
        self.visitor_name = name.into();
        self
    }

    /// Sets the generic parameter name.
    #[must_use]
    pub fn generic_parameter(mut self, name: impl Into<String>) -> Self {
        self.generic_parameter = name.into();
        self
    }

    /// Sets the dispatch method name.
    #[must_use]
    pub fn accept_method(mut self, name: impl Into<String>) -> Self {
        self.accept_method = name.into();
        self
    }

    /// Sets the visitor method parameter name.
    #[must_use]
    pub fn visitor_parameter(mut self, name: impl Into<String>) -> Self {
        self.visitor_parameter = Some(name.into());
        self
    }

    /// Sets or clears the generated-code banner.
    #[must_use]
    pub fn banner(mut self, banner: Option<String>) -> Self {
        self.banner = banner;
        self
    }

    /// Sets or clears the header comment.
    #[must_use]
    pub fn header(mut self, header: Option<String>) -> Self {
        self.header = header;
        self
    }

    /// Sets the file extension.
    #[must_use]
    pub fn file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    /// Returns the visitor type with its generic argument, e.g. `IVisitor<T>`.
    #[must_use]
    pub fn visitor_type(&self) -> String {
        format!("{}<{}>", self.visitor_name, self.generic_parameter)
    }

    /// Returns the file name for a generated type.
    #[must_use]
    pub fn file_name(&self, type_name: &str) -> String {
        format!("{}.{}", type_name, self.file_extension)
    }

    /// Checks that every configured name is usable in generated code.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidOption` naming the first bad option.
    pub fn validate(&self) -> Result<(), CodegenError> {
        let names = [
            ("visitor_name", &self.visitor_name),
            ("generic_parameter", &self.generic_parameter),
            ("accept_method", &self.accept_method),
        ];
        for (option, value) in names {
            if !is_identifier(value) || is_reserved_word(value) {
                return Err(CodegenError::invalid_option(option, value.as_str()));
            }
        }

        if let Some(parameter) = &self.visitor_parameter {
            if !is_parameter_name(parameter) {
                return Err(CodegenError::invalid_option("visitor_parameter", parameter.as_str()));
            }
        }

        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(CodegenError::invalid_option("indent", self.indent.as_str()));
        }

        if self.file_extension.is_empty() || self.file_extension.contains(&['/', '\\', '.'][..]) {
            return Err(CodegenError::invalid_option(
                "file_extension",
                self.file_extension.as_str(),
            ));
        }

        Ok(())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

//! Field member rendering.

use astgen_schema::FieldDef;

/// Renders the three code fragments a field contributes to its class.
pub trait FieldSyntax {
    /// Constructor parameter: `<type> <parameter>`.
    fn render_parameter(&self) -> String;

    /// Constructor body statement: `this.<Field> = <parameter>;`.
    fn render_initializer(&self) -> String;

    /// Read-only property: `public <type> <Field> { get; }`.
    fn render_declaration(&self) -> String;
}

impl FieldSyntax for FieldDef {
    fn render_parameter(&self) -> String {
        format!("{} {}", self.type_name, self.parameter_name)
    }

    fn render_initializer(&self) -> String {
        format!("this.{} = {};", self.field_name, self.parameter_name)
    }

    fn render_declaration(&self) -> String {
        format!("public {} {} {{ get; }}", self.type_name, self.field_name)
    }
}

/// Splits a rendered parameter back into `(type, parameter)`.
///
/// Type names may contain spaces (`Dictionary<string, Token>`), parameter
/// names never do, so the split happens at the last space.
#[must_use]
pub fn parse_parameter(text: &str) -> Option<(&str, &str)> {
    text.rsplit_once(' ')
        .filter(|(type_name, parameter)| !type_name.is_empty() && !parameter.is_empty())
}

/// Joins the parameters of `fields` into a constructor parameter list.
#[must_use]
pub fn parameter_list(fields: &[FieldDef]) -> String {
    fields
        .iter()
        .map(FieldSyntax::render_parameter)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_parameter() {
        let field = FieldDef::new("Expression", "Expression", "expression");
        assert_eq!(field.render_parameter(), "Expression expression");

        let field = FieldDef::new("Token", "Operator", "@operator");
        assert_eq!(field.render_parameter(), "Token @operator");
    }

    #[test]
    fn test_render_initializer() {
        let field = FieldDef::new("object", "Value", "@value");
        assert_eq!(field.render_initializer(), "this.Value = @value;");
    }

    #[test]
    fn test_render_declaration() {
        let field = FieldDef::new("List<Expression>", "Arguments", "arguments");
        assert_eq!(
            field.render_declaration(),
            "public List<Expression> Arguments { get; }"
        );
    }

    #[test]
    fn test_parameter_round_trip() {
        let fields = [
            FieldDef::new("Expression", "Left", "left"),
            FieldDef::new("Token", "Operator", "@operator"),
            FieldDef::new("List<Statements.Statement>", "Body", "body"),
            FieldDef::new("Dictionary<string, Token>", "Names", "names"),
        ];

        for field in &fields {
            let rendered = field.render_parameter();
            let (type_name, parameter) = parse_parameter(&rendered).expect("unparseable");
            assert_eq!(type_name, field.type_name);
            assert_eq!(parameter, field.parameter_name);
        }
    }

    #[test]
    fn test_parse_parameter_rejects_fragments() {
        assert_eq!(parse_parameter("Expression"), None);
        assert_eq!(parse_parameter(" left"), None);
        assert_eq!(parse_parameter("Expression "), None);
    }

    #[test]
    fn test_parameter_list() {
        let fields = [
            FieldDef::new("Expression", "Left", "left"),
            FieldDef::new("Token", "Operator", "@operator"),
            FieldDef::new("Expression", "Right", "right"),
        ];
        assert_eq!(
            parameter_list(&fields),
            "Expression left, Token @operator, Expression right"
        );
        assert_eq!(parameter_list(&[]), "");
    }
}

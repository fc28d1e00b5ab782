//! Identifier rules for the generated language.
//!
//! Generated classes use C#-style identifiers: letters, digits and `_`, not
//! starting with a digit. A reserved word can still be used as a parameter
//! name when prefixed with the verbatim sigil `@`.

/// Verbatim identifier sigil.
pub const VERBATIM_SIGIL: char = '@';

/// Reserved words of the generated language.
///
/// Contextual keywords (`value`, `var`, `get`, ...) are valid identifiers and
/// are not listed.
pub const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Returns true if `name` is a reserved word.
#[must_use]
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Returns true if `name` is a plain identifier (no sigil).
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Returns true if `name` is a valid constructor parameter name.
///
/// Either a non-reserved identifier, or any identifier escaped with `@`.
#[must_use]
pub fn is_parameter_name(name: &str) -> bool {
    match name.strip_prefix(VERBATIM_SIGIL) {
        Some(rest) => is_identifier(rest),
        None => is_identifier(name) && !is_reserved_word(name),
    }
}

/// Returns true if `name` is a dot-separated sequence of identifiers.
#[must_use]
pub fn is_namespace(name: &str) -> bool {
    name.split('.')
        .all(|part| is_identifier(part) && !is_reserved_word(part))
}

/// Prefixes `name` with `@` if it is a reserved word.
#[must_use]
pub fn escape_identifier(name: &str) -> String {
    if is_reserved_word(name) {
        format!("{VERBATIM_SIGIL}{name}")
    } else {
        name.to_string()
    }
}

/// Converts a PascalCase name to camelCase.
#[must_use]
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        if i == 0 {
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Derives the constructor parameter name for a field name.
///
/// `Operator` becomes `@operator`, `ThenBranch` becomes `thenBranch`.
#[must_use]
pub fn parameter_name_for(field_name: &str) -> String {
    escape_identifier(&to_camel_case(field_name))
}

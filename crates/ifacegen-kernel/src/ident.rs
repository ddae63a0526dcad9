//! Identifier validation and keyword escaping.

use regex::Regex;
use std::sync::LazyLock;

/// Reserved words that must be `@`-escaped to be used as identifiers.
/// Contextual keywords (`value`, `var`, `record`, ...) are valid as-is.
const RESERVED: &[&str] = &[
    "abstract",
    "as",
    "base",
    "bool",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "checked",
    "class",
    "const",
    "continue",
    "decimal",
    "default",
    "delegate",
    "do",
    "double",
    "else",
    "enum",
    "event",
    "explicit",
    "extern",
    "false",
    "finally",
    "fixed",
    "float",
    "for",
    "foreach",
    "goto",
    "if",
    "implicit",
    "in",
    "int",
    "interface",
    "internal",
    "is",
    "lock",
    "long",
    "namespace",
    "new",
    "null",
    "object",
    "operator",
    "out",
    "override",
    "params",
    "private",
    "protected",
    "public",
    "readonly",
    "ref",
    "return",
    "sbyte",
    "sealed",
    "short",
    "sizeof",
    "stackalloc",
    "static",
    "string",
    "struct",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "uint",
    "ulong",
    "unchecked",
    "unsafe",
    "ushort",
    "using",
    "virtual",
    "void",
    "volatile",
    "while",
];

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@?[\p{L}\p{Nl}_][\p{L}\p{Nl}\p{Nd}\p{Mn}\p{Mc}\p{Pc}\p{Cf}]*$")
        .expect("identifier pattern must compile")
});

pub fn is_reserved(word: &str) -> bool {
    RESERVED.contains(&word)
}

/// Render `name` as an identifier, escaping reserved words.
///
/// Returns `None` when `name` is not a valid identifier even after
/// escaping. A name that already carries `@` is kept verbatim.
pub fn escape_identifier(name: &str) -> Option<String> {
    if !IDENTIFIER.is_match(name) {
        return None;
    }
    if is_reserved(name) {
        Some(format!("@{name}"))
    } else {
        Some(name.to_string())
    }
}

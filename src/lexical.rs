//! Lexical predicates used by the reducer to decide when a string-key
//! property or bracketed subscript can be canonicalized into dot notation
//! or a bare identifier key.

use std::collections::HashSet;

lazy_static! {
    /// ECMA-262 §7.5.1 keywords, future-reserved words, and the three
    /// literal tokens (`true`, `false`, `null`). Unicode-escaped identifiers
    /// are not handled, so this is a plain ASCII set.
    static ref RESERVED_WORDS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for word in &[
            "break", "case", "catch", "continue", "default", "delete", "do",
            "else", "finally", "for", "function", "if", "in", "instanceof",
            "new", "return", "switch", "this", "throw", "try", "typeof",
            "var", "void", "while", "with",
            "abstract", "boolean", "byte", "char", "class", "const",
            "debugger", "double", "enum", "export", "extends", "final",
            "float", "goto", "implements", "import", "int", "interface",
            "long", "native", "package", "private", "protected", "public",
            "short", "static", "super", "synchronized", "throws",
            "transient", "volatile",
            "true", "false", "null",
        ] {
            set.insert(*word);
        }
        set
    };
}

/// True iff `c` is a legal first character of an ECMAScript 3 identifier.
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

/// True iff `c` is a legal non-initial character of an ECMAScript 3 identifier.
fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Returns true iff `s` is a syntactically valid ECMAScript 3 identifier
/// that is not a reserved word. Used by the reducer to decide whether a
/// string property key or computed subscript can be rewritten into bare
/// identifier form (`obj["foo"]` -> `obj.foo`).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_identifier_start(c) => {}
        _ => return false,
    }
    if !chars.all(is_identifier_part) {
        return false;
    }
    !RESERVED_WORDS.contains(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(is_identifier("foo"));
        assert!(is_identifier("_foo"));
        assert!(is_identifier("$foo"));
        assert!(is_identifier("foo$_1"));
    }

    #[test]
    fn rejects_empty_and_digit_leading() {
        assert!(!is_identifier(""));
        assert!(!is_identifier("2bad"));
    }

    #[test]
    fn rejects_interior_invalid_chars() {
        assert!(!is_identifier("foo-bar"));
        assert!(!is_identifier("foo bar"));
    }

    #[test]
    fn rejects_reserved_words() {
        assert!(!is_identifier("class"));
        assert!(!is_identifier("instanceof"));
        assert!(!is_identifier("true"));
        assert!(!is_identifier("null"));
    }
}

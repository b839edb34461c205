//! Lexical handling of opaque parameter expressions.
//!
//! Expressions are never parsed into a tree here. They are split into
//! identifier, literal and other lexemes so that identifier tokens can be
//! looked up and replaced while every other character is kept verbatim.
//! Sized literals such as `8'hFF` are single literal lexemes, so the `hFF`
//! part is never mistaken for an identifier.

use std::collections::HashMap;

/// The kind of a lexeme.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LexemeKind {
    /// An identifier, including system function names like `$clog2`.
    Ident,
    /// A numeric literal, sized or unsized.
    Literal,
    /// Whitespace.
    Space,
    /// Any other character sequence (operators, parentheses).
    Punct,
}

/// A slice of an expression with its kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Lexeme<'e> {
    /// The kind.
    pub kind: LexemeKind,
    /// The verbatim text.
    pub text: &'e str,
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn is_based_digit(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '?'
}

/// Splits an expression into lexemes. Concatenating all lexeme texts yields the input.
pub fn lex(expr: &str) -> Vec<Lexeme<'_>> {
    let bytes: Vec<(usize, char)> = expr.char_indices().collect();
    let mut lexemes = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let (start, c) = bytes[i];
        let (kind, mut j) = if is_ident_start(c) {
            let mut j = i + 1;
            while j < bytes.len() && is_ident_continue(bytes[j].1) {
                j += 1;
            }
            (LexemeKind::Ident, j)
        } else if c.is_ascii_digit() {
            let mut j = i + 1;
            while j < bytes.len() && (bytes[j].1.is_ascii_digit() || bytes[j].1 == '_') {
                j += 1;
            }
            (LexemeKind::Literal, j)
        } else if c == '\'' {
            (LexemeKind::Literal, i)
        } else if c.is_whitespace() {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].1.is_whitespace() {
                j += 1;
            }
            (LexemeKind::Space, j)
        } else {
            (LexemeKind::Punct, i + 1)
        };

        // Base specifier of a sized or unsized literal: 'b, 'sh, ...
        if kind == LexemeKind::Literal && j < bytes.len() && bytes[j].1 == '\'' {
            j += 1;
            if j < bytes.len() && matches!(bytes[j].1, 's' | 'S') {
                j += 1;
            }
            while j < bytes.len() && is_based_digit(bytes[j].1) {
                j += 1;
            }
        }

        let end = bytes.get(j).map_or(expr.len(), |(offset, _)| *offset);
        lexemes.push(Lexeme {
            kind,
            text: &expr[start..end],
        });
        i = j.max(i + 1);
    }

    lexemes
}

/// Returns the identifier tokens of an expression in order of appearance.
pub fn identifiers(expr: &str) -> Vec<&str> {
    lex(expr)
        .into_iter()
        .filter(|l| l.kind == LexemeKind::Ident)
        .map(|l| l.text)
        .collect()
}

/// Returns `true` if the value can be substituted into another expression
/// without parentheses.
pub fn is_simple_term(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '\'')
}

/// Wraps a value in parentheses unless it is a simple term.
pub fn parenthesize(value: &str) -> String {
    if is_simple_term(value) {
        value.to_string()
    } else {
        format!("({value})")
    }
}

/// A table replacing identifier tokens of expressions.
///
/// Keys are parameter reference ids; values are what the id is rewritten to,
/// typically a display name or an effective value.
#[derive(Clone, Debug, Default)]
pub struct Substitutions {
    map: HashMap<String, String>,
}

impl Substitutions {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the replacement of an id.
    pub fn insert(&mut self, id: impl Into<String>, replacement: impl Into<String>) {
        self.map.insert(id.into(), replacement.into());
    }

    /// Adds every entry of `other` that is not already present.
    pub fn extend_missing(&mut self, other: &Substitutions) {
        for (id, replacement) in &other.map {
            self.map
                .entry(id.clone())
                .or_insert_with(|| replacement.clone());
        }
    }

    /// Returns `true` if the id has a replacement.
    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    /// Returns the replacement of an id.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.map.get(id).map(String::as_str)
    }

    /// Rewrites every known identifier token of the expression.
    pub fn apply(&self, expr: &str) -> String {
        let mut out = String::with_capacity(expr.len());
        for lexeme in lex(expr) {
            match self.map.get(lexeme.text) {
                Some(replacement) if lexeme.kind == LexemeKind::Ident => out.push_str(replacement),
                _ => out.push_str(lexeme.text),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_reconstructs_input() {
        let expr = "uuid_a * 2 + (8'hFF - $clog2(uuid_b))";
        let joined: String = lex(expr).iter().map(|l| l.text).collect();
        assert_eq!(joined, expr);
    }

    #[test]
    fn identifiers_skip_literal_bases() {
        assert_eq!(identifiers("8'hFF + width"), vec!["width"]);
        assert_eq!(identifiers("'b1"), Vec::<&str>::new());
        assert_eq!(identifiers("4'sd3*x"), vec!["x"]);
    }

    #[test]
    fn identifiers_include_system_functions() {
        assert_eq!(identifiers("$clog2(DEPTH)"), vec!["$clog2", "DEPTH"]);
    }

    #[test]
    fn simple_terms() {
        assert!(is_simple_term("8"));
        assert!(is_simple_term("topParameter"));
        assert!(is_simple_term("4'b1010"));
        assert!(!is_simple_term("a+b"));
        assert!(!is_simple_term(""));
    }

    #[test]
    fn parenthesize_compound_values() {
        assert_eq!(parenthesize("8"), "8");
        assert_eq!(parenthesize("WIDTH-1"), "(WIDTH-1)");
    }

    #[test]
    fn apply_replaces_only_identifiers() {
        let mut subs = Substitutions::new();
        subs.insert("uuid_w", "WIDTH");
        subs.insert("hFF", "nope");
        assert_eq!(subs.apply("uuid_w-1 + 8'hFF"), "WIDTH-1 + 8'hFF");
    }

    #[test]
    fn apply_keeps_spacing_verbatim() {
        let mut subs = Substitutions::new();
        subs.insert("uuid_a", "first");
        assert_eq!(subs.apply("  uuid_a  *2 "), "  first  *2 ");
    }

    #[test]
    fn apply_does_not_touch_partial_matches() {
        let mut subs = Substitutions::new();
        subs.insert("uuid_a", "first");
        assert_eq!(subs.apply("uuid_ab+uuid_a"), "uuid_ab+first");
    }

    #[test]
    fn extend_missing_keeps_existing() {
        let mut own = Substitutions::new();
        own.insert("uuid_a", "8");
        let mut outer = Substitutions::new();
        outer.insert("uuid_a", "clash");
        outer.insert("uuid_top", "topParameter");
        own.extend_missing(&outer);
        assert_eq!(own.get("uuid_a"), Some("8"));
        assert_eq!(own.get("uuid_top"), Some("topParameter"));
        assert!(own.contains("uuid_top"));
    }
}

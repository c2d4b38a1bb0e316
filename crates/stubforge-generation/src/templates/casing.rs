//! Identifier case conversion for template tokens
//!
//! `to_class_name` and friends only force the first letter of each word to
//! uppercase (ASCII rules); interior letters keep the casing they were given,
//! so `myTHING` becomes `MyTHING`. Use [`to_snake_name`] / [`to_kebab_name`]
//! when full normalisation is wanted.

use heck::{ToKebabCase, ToSnakeCase};

use crate::models::Replacements;

/// Naming conventions a token value can be derived in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTransform {
    /// Value as given
    Verbatim,
    /// ClassName (e.g., my-thing -> MyThing)
    ClassName,
    /// variableName (e.g., my-thing -> myThing)
    VariableName,
    /// Hyphen-only PascalCase (e.g., my-plugin -> MyPlugin)
    PascalSlug,
    /// snake_case (e.g., MyThing -> my_thing)
    SnakeCase,
    /// kebab-case (e.g., MyThing -> my-thing)
    KebabCase,
}

impl CaseTransform {
    /// Apply case transformation to a string
    pub fn apply(&self, input: &str) -> String {
        match self {
            CaseTransform::Verbatim => input.to_string(),
            CaseTransform::ClassName => to_class_name(input),
            CaseTransform::VariableName => to_variable_name(input),
            CaseTransform::PascalSlug => to_pascal_slug(input),
            CaseTransform::SnakeCase => to_snake_name(input),
            CaseTransform::KebabCase => to_kebab_name(input),
        }
    }
}

/// Tokens built for every generated item, keyed by token name
pub const NAMING_TOKENS: [(&str, CaseTransform); 5] = [
    ("name", CaseTransform::Verbatim),
    ("class", CaseTransform::ClassName),
    ("variable", CaseTransform::VariableName),
    ("snake", CaseTransform::SnakeCase),
    ("kebab", CaseTransform::KebabCase),
];

/// `my-thing`, `my_thing` or `my thing` -> `MyThing`
pub fn to_class_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut word_start = true;

    for c in name.chars() {
        match c {
            '-' | '_' | ' ' => word_start = true,
            // Other whitespace still starts a word but is kept
            '\t' | '\r' | '\n' | '\x0B' | '\x0C' => {
                out.push(c);
                word_start = true;
            }
            _ => {
                out.push(if word_start { c.to_ascii_uppercase() } else { c });
                word_start = false;
            }
        }
    }

    out
}

/// Class name with its first character lowercased: `MyThing` -> `myThing`
pub fn to_variable_name(name: &str) -> String {
    lower_first(&to_class_name(name))
}

/// Split on `-` only and uppercase each piece: `my-plugin_x` -> `MyPlugin_x`
pub fn to_pascal_slug(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut word_start = true;

    for c in slug.chars() {
        if c == '-' {
            word_start = true;
        } else {
            out.push(if word_start { c.to_ascii_uppercase() } else { c });
            word_start = false;
        }
    }

    out
}

/// Fully normalised snake_case
pub fn to_snake_name(name: &str) -> String {
    name.to_snake_case()
}

/// Fully normalised kebab-case
pub fn to_kebab_name(name: &str) -> String {
    name.to_kebab_case()
}

/// The standard per-item tokens (see [`NAMING_TOKENS`]) derived from `name`
pub fn naming_tokens(name: &str) -> Replacements {
    NAMING_TOKENS
        .iter()
        .map(|(token, transform)| (token.to_string(), transform.apply(name)))
        .collect()
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(s.len());
            out.push(first.to_ascii_lowercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

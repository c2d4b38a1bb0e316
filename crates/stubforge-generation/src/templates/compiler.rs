//! Stub compilation by literal token substitution
//!
//! `{{token}}` spans are replaced by looking the token up in the call's
//! overrides, then in the compiler defaults. Unknown tokens stay verbatim and
//! inserted values are never scanned again, so a value containing `{{x}}`
//! comes out as-is.

use stubforge_config::ProjectContext;
use tracing::debug;

use crate::error::Result;
use crate::models::Replacements;
use crate::templates::casing::to_pascal_slug;
use crate::templates::store::TemplateStore;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Compiles stubs from a [`TemplateStore`] with default and per-call tokens
#[derive(Debug, Clone)]
pub struct StubCompiler {
    store: TemplateStore,
    defaults: Replacements,
}

impl StubCompiler {
    /// Create a compiler with no default tokens
    pub fn new(store: TemplateStore) -> Self {
        Self {
            store,
            defaults: Replacements::new(),
        }
    }

    /// Set the default tokens applied to every compile
    pub fn with_defaults(mut self, defaults: Replacements) -> Self {
        self.defaults = defaults;
        self
    }

    /// Template store backing this compiler
    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Default tokens
    pub fn defaults(&self) -> &Replacements {
        &self.defaults
    }

    /// Load stub `name` and substitute `overrides` layered over the defaults
    pub fn compile(&self, name: &str, overrides: &Replacements) -> Result<String> {
        let content = self.store.load(name)?;
        let compiled = self.render(&content, overrides);
        debug!(stub = name, tokens = self.defaults.len() + overrides.len(), "Compiled stub");
        Ok(compiled)
    }

    /// Compile with the tokens every project-scoped generator needs.
    ///
    /// Adds `slug`, `prefix`, `textDomain`, `namespace`, `Slug` (PascalCase
    /// slug) and `PREFIX` (uppercased prefix); entries in `extra` win.
    pub fn compile_with_context(
        &self,
        name: &str,
        project: &ProjectContext,
        extra: &Replacements,
    ) -> Result<String> {
        let mut tokens = context_tokens(project);
        tokens.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.compile(name, &tokens)
    }

    /// Substitute tokens in in-memory text
    pub fn render(&self, text: &str, overrides: &Replacements) -> String {
        let longest = longest_key(overrides).max(longest_key(&self.defaults));
        substitute_with(text, longest, |token| {
            overrides
                .get(token)
                .or_else(|| self.defaults.get(token))
                .map(String::as_str)
        })
    }
}

/// Tokens derived from a project context
pub fn context_tokens(project: &ProjectContext) -> Replacements {
    Replacements::from([
        ("slug".to_string(), project.slug.clone()),
        ("prefix".to_string(), project.prefix.clone()),
        ("textDomain".to_string(), project.text_domain.clone()),
        ("namespace".to_string(), project.namespace.clone()),
        ("Slug".to_string(), to_pascal_slug(&project.slug)),
        ("PREFIX".to_string(), project.prefix.to_ascii_uppercase()),
    ])
}

/// Substitute `{{token}}` spans in `text` from a single token set
pub fn substitute(text: &str, tokens: &Replacements) -> String {
    substitute_with(text, longest_key(tokens), |token| {
        tokens.get(token).map(String::as_str)
    })
}

fn longest_key(tokens: &Replacements) -> usize {
    tokens.keys().map(String::len).max().unwrap_or(0)
}

/// Single left-to-right pass; `lookup` decides each token's value.
///
/// A token is any text without `}}`, so a span may close at the first `}}`
/// or, inside a `}}}` run, one byte later (token `a}` in `{{a}}}`). The
/// shorter token is tried first. A `{{` that matches nothing contributes one
/// `{` and scanning resumes at the next byte, so `{{{name}}}` still matches
/// the inner span.
///
/// Candidates longer than `max_token_len` are never looked up, and the next
/// `}}` is located once per closing run rather than once per `{{`.
fn substitute_with<'a, F>(text: &str, max_token_len: usize, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut close: Option<usize> = None;

    while let Some(found) = text[pos..].find(OPEN) {
        let open = pos + found;
        let start = open + OPEN.len();
        out.push_str(&text[pos..open]);

        if close.map_or(true, |c| c < start) {
            close = text[start..].find(CLOSE).map(|c| start + c);
        }
        let Some(end) = close else {
            // Nothing closes from here on
            pos = open;
            break;
        };

        match match_span(text, start, end, max_token_len, &lookup) {
            Some((value, after)) => {
                out.push_str(value);
                pos = after;
            }
            None => {
                out.push('{');
                pos = open + 1;
            }
        }
    }

    out.push_str(&text[pos..]);
    out
}

/// Value and resume offset for the span opened at `start` whose first `}}`
/// begins at `end`
fn match_span<'a, F>(
    text: &str,
    start: usize,
    end: usize,
    max_token_len: usize,
    lookup: &F,
) -> Option<(&'a str, usize)>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let extended = (text.as_bytes().get(end + CLOSE.len()) == Some(&b'}')).then_some(end + 1);

    [Some(end), extended]
        .into_iter()
        .flatten()
        .filter(|&close| close - start <= max_token_len)
        .find_map(|close| lookup(&text[start..close]).map(|value| (value, close + CLOSE.len())))
}

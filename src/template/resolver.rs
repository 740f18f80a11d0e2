//! Template resolution.
//!
//! Applies render-local placeholders, then the global registry, then expands
//! the `%newline%`/`%nl%` escapes a bounded number of times.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::common::types::BoundValue;
use crate::config::types::DEFAULT_NEW_LINES;
use crate::placeholder::{LocalPlaceholder, Placeholder, PlaceholderRegistry, Snapshot};

/// Escape tokens rewritten into line breaks. Matched exactly.
pub const ESCAPE_TOKENS: [&str; 2] = ["%newline%", "%nl%"];

/// Resolves raw templates against local and global placeholders.
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    globals: Snapshot,
    max_passes: u32,
}

impl TemplateResolver {
    /// Build a resolver over the registry's current contents.
    ///
    /// Taking the snapshot seals the registry.
    pub fn new(registry: &PlaceholderRegistry, max_passes: u32) -> Self {
        Self {
            globals: registry.snapshot(),
            max_passes,
        }
    }

    /// A resolver with no global placeholders.
    pub fn standalone() -> Self {
        Self {
            globals: Vec::<Arc<Placeholder>>::new().into(),
            max_passes: DEFAULT_NEW_LINES,
        }
    }

    pub fn max_passes(&self) -> u32 {
        self.max_passes
    }

    pub fn globals(&self) -> &[Arc<Placeholder>] {
        &self.globals
    }

    /// Resolve `raw` into final text.
    ///
    /// Locals are applied in ascending priority (stable), so they always win
    /// over a global placeholder with the same token. Globals needing a value
    /// only fire when `default` is present and of a compatible kind.
    pub fn resolve(
        &self,
        raw: &str,
        locals: &[LocalPlaceholder],
        default: Option<&BoundValue>,
    ) -> String {
        let mut ordered: Vec<&LocalPlaceholder> = locals.iter().collect();
        ordered.sort_by_key(|local| local.placeholder.priority());

        let mut text = raw.to_string();
        for local in ordered {
            text = apply(&text, &local.placeholder, local.value.as_ref());
        }

        for global in self.globals.iter() {
            if !global.accepts(default) {
                continue;
            }
            text = apply(&text, global, default);
        }

        expand_escapes(&text, self.max_passes).0
    }

    /// Resolve each line independently with the same inputs.
    pub fn resolve_lines<S: AsRef<str>>(
        &self,
        lines: &[S],
        locals: &[LocalPlaceholder],
        default: Option<&BoundValue>,
    ) -> Vec<String> {
        lines
            .iter()
            .map(|line| self.resolve(line.as_ref(), locals, default))
            .collect()
    }
}

/// Substitute every token of `placeholder` present in `text`.
///
/// The replacement is computed at most once, and only if a token occurs.
fn apply(text: &str, placeholder: &Placeholder, value: Option<&BoundValue>) -> String {
    let mut text = text.to_string();
    let mut replacement: Option<Option<String>> = None;

    for token in placeholder.tokens() {
        if !token.occurs_in(&text) {
            continue;
        }
        let resolved = replacement.get_or_insert_with(|| match placeholder.resolve(value) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Skipping placeholder: {}", e);
                None
            }
        });
        match resolved {
            Some(resolved) => text = token.replace_in(&text, resolved),
            // No value for this render; leave every token in place.
            None => break,
        }
    }

    text
}

/// Rewrite escape tokens into `\n`, at most `max_passes` times.
///
/// Returns the text and the number of passes performed.
pub fn expand_escapes(text: &str, max_passes: u32) -> (String, u32) {
    let mut text = text.to_string();
    let mut passes = 0;

    while passes < max_passes && ESCAPE_TOKENS.iter().any(|token| text.contains(token)) {
        for token in ESCAPE_TOKENS {
            text = text.replace(token, "\n");
        }
        passes += 1;
    }

    if passes == max_passes && ESCAPE_TOKENS.iter().any(|token| text.contains(token)) {
        debug!("Escape expansion stopped after {} passes", passes);
    }

    (text, passes)
}

//! Scientific-name canonicalization
//!
//! The indexes store canonical name forms (authorship and rank markers
//! stripped) so exact-match queries hit regardless of how a source
//! cited the author. Parsing is deliberately forgiving: anything that
//! does not look like a Linnaean name passes through unchanged.

/// Capability to reduce a name string to its canonical form.
///
/// Implementations must be total and idempotent; a name that cannot be
/// parsed is returned verbatim.
pub trait Canonicalizer {
    fn canonical(&self, name: &str) -> String;
}

/// Token-level parser for Linnaean name strings.
///
/// Recognizes `Genus`, `Genus epithet`, `Genus epithet infraepithet`,
/// an optional parenthesized subgenus, and infraspecific rank markers
/// (`subsp.`, `var.`, ...). Everything after the epithets - authorship,
/// year, annotations - is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScientificNameParser;

impl ScientificNameParser {
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, name: &str) -> Option<String> {
        let mut tokens = name.split_whitespace().peekable();
        let genus = tokens.next()?;
        if !is_genus_token(genus) {
            return None;
        }
        let mut parts: Vec<&str> = vec![genus];
        let mut seen_subgenus = false;
        while let Some(&tok) = tokens.peek() {
            if !seen_subgenus && parts.len() == 1 && is_subgenus_token(tok) {
                // subgenus is cited but not part of the canonical form
                seen_subgenus = true;
                tokens.next();
            } else if is_rank_marker(tok) || tok == "\u{d7}" {
                tokens.next();
            } else if parts.len() < 3 && is_epithet_token(tok) {
                parts.push(tok);
                tokens.next();
            } else {
                // authorship starts here; drop the remainder
                break;
            }
        }
        Some(parts.join(" "))
    }
}

impl Canonicalizer for ScientificNameParser {
    fn canonical(&self, name: &str) -> String {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return name.to_string();
        }
        self.parse(trimmed).unwrap_or_else(|| name.to_string())
    }
}

/// Capitalized Latin word, e.g. `Felis`
fn is_genus_token(tok: &str) -> bool {
    let mut chars = tok.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    tok.len() >= 2 && chars.all(|c| c.is_ascii_lowercase())
}

/// Parenthesized capitalized word, e.g. `(Felis)`
fn is_subgenus_token(tok: &str) -> bool {
    tok.strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .is_some_and(is_genus_token)
}

/// Lowercase epithet, e.g. `catus` or `novae-zelandiae`
fn is_epithet_token(tok: &str) -> bool {
    tok.len() >= 2 && tok.chars().all(|c| c.is_ascii_lowercase() || c == '-')
}

fn is_rank_marker(tok: &str) -> bool {
    matches!(
        tok.trim_end_matches('.'),
        "subsp" | "ssp" | "var" | "subvar" | "f" | "forma" | "cv" | "nothovar" | "sect" | "subg"
    )
}

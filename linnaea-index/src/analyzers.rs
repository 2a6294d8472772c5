//! Tokenizers for the exact-match indexes
//!
//! All Linnaea indexes are keyword indexes: a field value is one term.
//! The loading and vernacular indexes match case-sensitively; the
//! search and homonym indexes lower-case terms so that name queries are
//! case-insensitive.

use tantivy::tokenizer::{LowerCaser, RawTokenizer, TextAnalyzer};
use tantivy::Index;

/// Case-sensitive keyword tokenizer (tantivy's built-in `raw`)
pub const KEYWORD: &str = "raw";

/// Case-insensitive keyword tokenizer, registered by [`register`]
pub const LOWERCASE_KEYWORD: &str = "lowercase_keyword";

/// Register the lower-case keyword analyzer on an index. Must be called
/// on every index handle before writing or querying lower-cased fields.
pub fn register(index: &Index) {
    index.tokenizers().register(
        LOWERCASE_KEYWORD,
        TextAnalyzer::builder(RawTokenizer::default())
            .filter(LowerCaser)
            .build(),
    );
}

/// Normalize a query value for a lower-case keyword field. Term queries
/// bypass analysis, so callers must fold case themselves.
pub fn lowercase_term(value: &str) -> String {
    value.to_lowercase()
}

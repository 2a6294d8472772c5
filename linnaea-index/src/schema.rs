//! Schemas for the four indexes the build produces

use tantivy::schema::{
    IndexRecordOption, Schema, TextFieldIndexing, TextOptions, FAST, INDEXED, STORED,
};

use crate::analyzers;
use crate::fields;

/// Indexed-and-stored keyword field with the given tokenizer
fn keyword(tokenizer: &str) -> TextOptions {
    TextOptions::default()
        .set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(tokenizer)
                .set_index_option(IndexRecordOption::Basic),
        )
        .set_stored()
}

/// Schema of the temporary loading index.
///
/// Identifiers and flags are exact terms; the name parts are stored for
/// retrieval but not searchable.
pub fn loading_schema() -> Schema {
    let mut builder = Schema::builder();
    let kw = keyword(analyzers::KEYWORD);

    builder.add_text_field(fields::ID, kw.clone());
    builder.add_text_field(fields::LSID, kw.clone());
    builder.add_text_field(fields::PARENT_ID, kw.clone());
    builder.add_text_field(fields::ACCEPTED, kw.clone());

    builder.add_text_field(fields::NAME, STORED);
    builder.add_text_field(fields::AUTHOR, STORED);
    builder.add_text_field(fields::GENUS, STORED);
    builder.add_text_field(fields::SPECIFIC, STORED);
    builder.add_text_field(fields::INFRA_SPECIFIC, STORED);

    builder.add_text_field(fields::RANK, kw.clone());
    builder.add_i64_field(fields::RANK_ID, INDEXED | STORED);
    builder.add_text_field(fields::IS_SYNONYM, kw.clone());
    builder.add_text_field(fields::ROOT, kw);

    builder.build()
}

/// Schema of the main search index (accepted concepts and synonyms).
///
/// Name and identifier fields are case-insensitive exact terms; the
/// nested-set bounds are numeric so ancestry checks are range queries.
pub fn search_schema() -> Schema {
    let mut builder = Schema::builder();
    let kw = keyword(analyzers::LOWERCASE_KEYWORD);

    builder.add_text_field(fields::NAME, kw.clone());
    builder.add_text_field(fields::ID, kw.clone());
    builder.add_text_field(fields::LSID, kw.clone());
    builder.add_text_field(fields::AUTHOR, STORED);
    builder.add_text_field(fields::RANK, kw.clone());
    builder.add_i64_field(fields::RANK_ID, INDEXED | STORED);

    builder.add_u64_field(fields::LEFT, INDEXED | STORED | FAST);
    builder.add_u64_field(fields::RIGHT, INDEXED | STORED | FAST);

    for slot in [
        fields::KINGDOM,
        fields::PHYLUM,
        fields::CLASS,
        fields::ORDER,
        fields::FAMILY,
        fields::GENUS,
        fields::SPECIES,
    ] {
        builder.add_text_field(slot, kw.clone());
    }
    for slot_id in [
        fields::KINGDOM_ID,
        fields::PHYLUM_ID,
        fields::CLASS_ID,
        fields::ORDER_ID,
        fields::FAMILY_ID,
        fields::GENUS_ID,
        fields::SPECIES_ID,
    ] {
        builder.add_text_field(slot_id, STORED);
    }

    // synonym documents resolve to their accepted concept at query time
    builder.add_text_field(fields::ACCEPTED, kw.clone());
    builder.add_text_field(fields::ACCEPTED_LSID, kw);
    builder.add_text_field(fields::STATUS, STORED);

    builder.build()
}

/// Schema of the vernacular sub-index. Common-name matching is
/// case-sensitive string equality.
pub fn vernacular_schema() -> Schema {
    let mut builder = Schema::builder();
    let kw = keyword(analyzers::KEYWORD);

    builder.add_text_field(fields::COMMON_NAME, kw.clone());
    builder.add_text_field(fields::NAME, STORED);
    builder.add_text_field(fields::LSID, kw);

    builder.build()
}

/// Schema of the IRMNG homonym sub-index
pub fn homonym_schema() -> Schema {
    let mut builder = Schema::builder();
    let kw = keyword(analyzers::LOWERCASE_KEYWORD);

    builder.add_text_field(fields::NAME, kw.clone());
    builder.add_text_field(fields::LSID, kw.clone());
    builder.add_text_field(fields::RANK, kw);
    builder.add_i64_field(fields::RANK_ID, INDEXED | STORED);

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_schema_fields_resolve() {
        let schema = loading_schema();
        for name in [
            fields::ID,
            fields::LSID,
            fields::PARENT_ID,
            fields::ACCEPTED,
            fields::NAME,
            fields::RANK,
            fields::RANK_ID,
            fields::IS_SYNONYM,
            fields::ROOT,
        ] {
            assert!(schema.get_field(name).is_ok(), "missing field {}", name);
        }
    }

    #[test]
    fn test_search_schema_has_classification_slots() {
        let schema = search_schema();
        for name in [
            fields::KINGDOM,
            fields::KINGDOM_ID,
            fields::SPECIES,
            fields::SPECIES_ID,
            fields::LEFT,
            fields::RIGHT,
        ] {
            assert!(schema.get_field(name).is_ok(), "missing field {}", name);
        }
    }
}

//! IRMNG homonym sub-index
//!
//! The homonym sub-index under `<target>/irmng` is a plain exact-match
//! index over the IRMNG export, used downstream to detect cross-kingdom
//! homonyms. It reuses the writer machinery; there is no enrichment.

use std::path::Path;

use linnaea_bio::{Canonicalizer, DwcArchive};
use linnaea_core::types::Rank;
use linnaea_core::LinnaeaResult;
use tantivy::TantivyDocument;
use tracing::info;

use crate::fields;
use crate::schema;
use crate::store::IndexWriterHandle;

/// Write one document per IRMNG concept into the homonym sub-index at
/// `dir`. Returns the number of documents written.
pub fn build_homonym_index(
    archive: &DwcArchive,
    canonicalizer: &dyn Canonicalizer,
    dir: &Path,
    heap_bytes: usize,
) -> LinnaeaResult<u64> {
    info!("starting to load the IRMNG homonym export");
    let mut writer = IndexWriterHandle::create(dir, schema::homonym_schema(), heap_bytes)?;
    let f_name = writer.field(fields::NAME)?;
    let f_lsid = writer.field(fields::LSID)?;
    let f_rank = writer.field(fields::RANK)?;
    let f_rank_id = writer.field(fields::RANK_ID)?;

    let mut count = 0u64;
    for concept in archive.concepts()? {
        let mut doc = TantivyDocument::default();
        doc.add_text(f_name, canonicalizer.canonical(&concept.scientific_name));
        doc.add_text(f_lsid, concept.lsid_or_id());
        match Rank::from_str_rank(&concept.rank_string) {
            Some(rank) => {
                doc.add_text(f_rank, rank.label());
                doc.add_i64(f_rank_id, rank.id());
            }
            None if !concept.rank_string.trim().is_empty() => {
                // keep the raw rank string, but mark the id as unranked
                doc.add_text(f_rank, &concept.rank_string);
                doc.add_i64(f_rank_id, Rank::Unranked.id());
            }
            None => {
                doc.add_text(f_rank, "unknown");
                doc.add_i64(f_rank_id, Rank::Unranked.id());
            }
        }
        writer.add(doc)?;
        count += 1;
    }

    writer.commit()?;
    writer.force_merge()?;
    writer.close()?;
    info!(concepts = count, "finished the homonym sub-index");
    Ok(count)
}

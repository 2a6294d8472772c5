//! Loading-index construction
//!
//! The loading index is a temporary exact-term index over the raw
//! archive rows. The hierarchy walk and the vernacular join query it
//! by id, lsid, parent id and root flag; it is written once per run
//! and read-only afterwards.

use std::path::Path;

use linnaea_bio::DwcArchive;
use linnaea_core::types::{Concept, Rank};
use linnaea_core::{IndexerConfig, LinnaeaResult};
use tantivy::schema::Field;
use tantivy::TantivyDocument;
use tracing::{debug, info, warn};

use crate::fields;
use crate::schema;
use crate::store::IndexWriterHandle;

/// Counters from a loading-index build
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadStats {
    pub concepts: u64,
    pub skipped: u64,
}

struct LoadingFields {
    id: Field,
    lsid: Field,
    parent_id: Field,
    accepted: Field,
    name: Field,
    author: Field,
    genus: Field,
    specific: Field,
    infra_specific: Field,
    rank: Field,
    rank_id: Field,
    is_synonym: Field,
    root: Field,
}

impl LoadingFields {
    fn resolve(writer: &IndexWriterHandle) -> LinnaeaResult<Self> {
        Ok(Self {
            id: writer.field(fields::ID)?,
            lsid: writer.field(fields::LSID)?,
            parent_id: writer.field(fields::PARENT_ID)?,
            accepted: writer.field(fields::ACCEPTED)?,
            name: writer.field(fields::NAME)?,
            author: writer.field(fields::AUTHOR)?,
            genus: writer.field(fields::GENUS)?,
            specific: writer.field(fields::SPECIFIC)?,
            infra_specific: writer.field(fields::INFRA_SPECIFIC)?,
            rank: writer.field(fields::RANK)?,
            rank_id: writer.field(fields::RANK_ID)?,
            is_synonym: writer.field(fields::IS_SYNONYM)?,
            root: writer.field(fields::ROOT)?,
        })
    }
}

/// Builds the temporary loading index that drives the hierarchy walk
pub struct LoadingIndexBuilder {
    config: IndexerConfig,
}

impl LoadingIndexBuilder {
    pub fn new(config: IndexerConfig) -> Self {
        Self { config }
    }

    /// Stream every concept of `archive` into a fresh loading index at
    /// `dir`, then commit, force-merge to one segment and close.
    pub fn build(&self, archive: &DwcArchive, dir: &Path) -> LinnaeaResult<LoadStats> {
        info!("creating the temporary loading index");
        let mut writer =
            IndexWriterHandle::create(dir, schema::loading_schema(), self.config.writer_heap_bytes)?;
        let f = LoadingFields::resolve(&writer)?;

        let mut stats = LoadStats::default();
        for concept in archive.concepts()? {
            match document_for(&concept, &f) {
                Some(doc) => {
                    writer.add(doc)?;
                    stats.concepts += 1;
                }
                None => stats.skipped += 1,
            }
            let total = stats.concepts + stats.skipped;
            if self.config.log_interval > 0 && total % self.config.log_interval == 0 {
                debug!(concepts = total, "loading index progress");
            }
        }

        writer.commit()?;
        writer.force_merge()?;
        writer.close()?;
        info!(
            concepts = stats.concepts,
            skipped = stats.skipped,
            "finished creating the temporary load index"
        );
        Ok(stats)
    }
}

fn add_if_present(doc: &mut TantivyDocument, field: Field, value: &str) {
    if !value.trim().is_empty() {
        doc.add_text(field, value);
    }
}

/// Build the loading document for one concept, applying the field
/// policy: identifiers and flags as terms, name parts stored only.
/// Returns `None` for rows with no usable identifier.
fn document_for(concept: &Concept, f: &LoadingFields) -> Option<TantivyDocument> {
    let lsid = concept.lsid_or_id();
    if lsid.trim().is_empty() {
        warn!(name = %concept.scientific_name, "skipping concept with no id or lsid");
        return None;
    }

    let mut doc = TantivyDocument::default();
    doc.add_text(f.id, &concept.id);
    doc.add_text(f.lsid, lsid);
    add_if_present(&mut doc, f.parent_id, &concept.parent_id);
    add_if_present(&mut doc, f.accepted, &concept.accepted_id);
    add_if_present(&mut doc, f.name, &concept.scientific_name);
    add_if_present(&mut doc, f.author, &concept.authorship);
    add_if_present(&mut doc, f.genus, &concept.genus);
    add_if_present(&mut doc, f.specific, &concept.specific_epithet);
    add_if_present(&mut doc, f.infra_specific, &concept.infraspecific_epithet);

    match Rank::from_str_rank(&concept.rank_string) {
        Some(rank) => {
            doc.add_text(f.rank, rank.label());
            doc.add_i64(f.rank_id, rank.id());
        }
        None if !concept.rank_string.trim().is_empty() => {
            // keep the raw rank string, but mark the id as unranked
            doc.add_text(f.rank, &concept.rank_string);
            doc.add_i64(f.rank_id, Rank::Unranked.id());
        }
        None => {
            doc.add_text(f.rank, "unknown");
            doc.add_i64(f.rank_id, Rank::Unranked.id());
        }
    }

    if concept.is_accepted() {
        doc.add_text(f.is_synonym, fields::FLAG_FALSE);
        if concept.is_root() {
            doc.add_text(f.root, fields::FLAG_TRUE);
        }
    } else {
        doc.add_text(f.is_synonym, fields::FLAG_TRUE);
    }

    Some(doc)
}

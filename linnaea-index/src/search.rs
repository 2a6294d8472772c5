//! Search-index emission
//!
//! The search index under `<target>/cb` holds one document per accepted
//! concept (canonical name, identifiers, rank, nested-set interval and
//! the seven classification slots) and one per synonym (own and
//! accepted identifiers, no classification). Name and identifier terms
//! are lower-cased so queries are case-insensitive.

use std::path::Path;

use linnaea_bio::{Canonicalizer, DwcArchive};
use linnaea_core::types::{Classification, NamedTaxon};
use linnaea_core::LinnaeaResult;
use tantivy::schema::Field;
use tantivy::TantivyDocument;
use tracing::{debug, info};

use crate::fields;
use crate::schema;
use crate::store::IndexWriterHandle;

/// Counters from the synonym phase
#[derive(Debug, Clone, Copy, Default)]
pub struct SynonymStats {
    pub scanned: u64,
    pub synonyms: u64,
}

struct SearchFields {
    name: Field,
    id: Field,
    lsid: Field,
    author: Field,
    rank: Field,
    rank_id: Field,
    left: Field,
    right: Field,
    kingdom: Field,
    kingdom_id: Field,
    phylum: Field,
    phylum_id: Field,
    class: Field,
    class_id: Field,
    order: Field,
    order_id: Field,
    family: Field,
    family_id: Field,
    genus: Field,
    genus_id: Field,
    species: Field,
    species_id: Field,
    accepted: Field,
    accepted_lsid: Field,
    status: Field,
}

impl SearchFields {
    fn resolve(writer: &IndexWriterHandle) -> LinnaeaResult<Self> {
        Ok(Self {
            name: writer.field(fields::NAME)?,
            id: writer.field(fields::ID)?,
            lsid: writer.field(fields::LSID)?,
            author: writer.field(fields::AUTHOR)?,
            rank: writer.field(fields::RANK)?,
            rank_id: writer.field(fields::RANK_ID)?,
            left: writer.field(fields::LEFT)?,
            right: writer.field(fields::RIGHT)?,
            kingdom: writer.field(fields::KINGDOM)?,
            kingdom_id: writer.field(fields::KINGDOM_ID)?,
            phylum: writer.field(fields::PHYLUM)?,
            phylum_id: writer.field(fields::PHYLUM_ID)?,
            class: writer.field(fields::CLASS)?,
            class_id: writer.field(fields::CLASS_ID)?,
            order: writer.field(fields::ORDER)?,
            order_id: writer.field(fields::ORDER_ID)?,
            family: writer.field(fields::FAMILY)?,
            family_id: writer.field(fields::FAMILY_ID)?,
            genus: writer.field(fields::GENUS)?,
            genus_id: writer.field(fields::GENUS_ID)?,
            species: writer.field(fields::SPECIES)?,
            species_id: writer.field(fields::SPECIES_ID)?,
            accepted: writer.field(fields::ACCEPTED)?,
            accepted_lsid: writer.field(fields::ACCEPTED_LSID)?,
            status: writer.field(fields::STATUS)?,
        })
    }
}

/// Writer for the main search index
pub struct SearchIndexWriter {
    writer: IndexWriterHandle,
    f: SearchFields,
}

impl SearchIndexWriter {
    /// Create a fresh search index at `dir` (normally `<target>/cb`)
    pub fn create(dir: &Path, heap_bytes: usize) -> LinnaeaResult<Self> {
        let writer = IndexWriterHandle::create(dir, schema::search_schema(), heap_bytes)?;
        let f = SearchFields::resolve(&writer)?;
        Ok(Self { writer, f })
    }

    /// Emit one fully enriched accepted-concept document
    #[allow(clippy::too_many_arguments)]
    pub fn emit_accepted(
        &mut self,
        canonical_name: &str,
        id: &str,
        lsid: &str,
        author: Option<&str>,
        rank: &str,
        rank_id: i64,
        left: u64,
        right: u64,
        classification: &Classification,
    ) -> LinnaeaResult<()> {
        let f = &self.f;
        let mut doc = TantivyDocument::default();
        doc.add_text(f.name, canonical_name);
        doc.add_text(f.id, id);
        doc.add_text(f.lsid, lsid);
        if let Some(author) = author {
            doc.add_text(f.author, author);
        }
        doc.add_text(f.rank, rank);
        doc.add_i64(f.rank_id, rank_id);
        doc.add_u64(f.left, left);
        doc.add_u64(f.right, right);

        let slots: [(&Option<NamedTaxon>, Field, Field); 7] = [
            (&classification.kingdom, f.kingdom, f.kingdom_id),
            (&classification.phylum, f.phylum, f.phylum_id),
            (&classification.class, f.class, f.class_id),
            (&classification.order, f.order, f.order_id),
            (&classification.family, f.family, f.family_id),
            (&classification.genus, f.genus, f.genus_id),
            (&classification.species, f.species, f.species_id),
        ];
        for (slot, name_field, id_field) in slots {
            if let Some(taxon) = slot {
                doc.add_text(name_field, &taxon.name);
                doc.add_text(id_field, &taxon.lsid);
            }
        }

        self.writer.add(doc)
    }

    /// Emit one synonym document. Synonyms carry no classification;
    /// consumers follow the accepted identifiers at query time.
    #[allow(clippy::too_many_arguments)]
    pub fn emit_synonym(
        &mut self,
        scientific_name: &str,
        authorship: Option<&str>,
        id: &str,
        lsid: &str,
        accepted_lsid: &str,
        accepted_id: &str,
        status: Option<&str>,
    ) -> LinnaeaResult<()> {
        let f = &self.f;
        let mut doc = TantivyDocument::default();
        doc.add_text(f.name, scientific_name);
        if let Some(authorship) = authorship {
            doc.add_text(f.author, authorship);
        }
        doc.add_text(f.id, id);
        doc.add_text(f.lsid, lsid);
        doc.add_text(f.accepted_lsid, accepted_lsid);
        doc.add_text(f.accepted, accepted_id);
        if let Some(status) = status {
            doc.add_text(f.status, status);
        }
        self.writer.add(doc)
    }

    /// Commit, force-merge to one segment and close. The index only
    /// becomes visible to readers once this returns.
    pub fn finish(mut self) -> LinnaeaResult<()> {
        self.writer.commit()?;
        self.writer.force_merge()?;
        self.writer.close()
    }
}

/// Re-stream the archive and emit one synonym document per concept
/// whose accepted reference points at a different concept.
pub fn add_synonyms(
    writer: &mut SearchIndexWriter,
    archive: &DwcArchive,
    canonicalizer: &dyn Canonicalizer,
) -> LinnaeaResult<SynonymStats> {
    let mut stats = SynonymStats::default();
    for concept in archive.concepts()? {
        stats.scanned += 1;
        if concept.is_synonym() {
            stats.synonyms += 1;
            writer.emit_synonym(
                &canonicalizer.canonical(&concept.scientific_name),
                (!concept.authorship.is_empty()).then_some(concept.authorship.as_str()),
                &concept.id,
                concept.lsid_or_id(),
                &concept.accepted_id,
                &concept.accepted_id,
                (!concept.taxonomic_status.is_empty()).then_some(concept.taxonomic_status.as_str()),
            )?;
        }
        if stats.scanned % 1000 == 0 {
            debug!(
                scanned = stats.scanned,
                synonyms = stats.synonyms,
                "synonym phase progress"
            );
        }
    }
    info!(
        scanned = stats.scanned,
        synonyms = stats.synonyms,
        "finished adding synonyms"
    );
    Ok(stats)
}

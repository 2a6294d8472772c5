//! Thin storage layer over tantivy
//!
//! Everything the pipeline needs from the index library is exact-term
//! writing and reading: add documents, commit, force-merge to a single
//! segment, and run term queries that return stored documents. The
//! handles here wrap tantivy to exactly that surface.

use std::path::Path;

use linnaea_core::{LinnaeaError, LinnaeaResult};
use tantivy::collector::{DocSetCollector, TopDocs};
use tantivy::query::{AllQuery, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Schema, Value};
use tantivy::{Document, Index, IndexReader, IndexWriter, TantivyDocument, Term};

use crate::analyzers;

fn index_err(e: tantivy::TantivyError) -> LinnaeaError {
    LinnaeaError::Index(e.to_string())
}

/// Write handle for one index directory.
///
/// Uses a single indexing thread so document order in the merged
/// segment is insertion order, which keeps rebuilds reproducible and
/// the hierarchy walk deterministic.
pub struct IndexWriterHandle {
    index: Index,
    writer: IndexWriter,
    schema: Schema,
}

impl IndexWriterHandle {
    /// Create a fresh index at `dir`, replacing any index left by a
    /// previous run.
    pub fn create(dir: &Path, schema: Schema, heap_bytes: usize) -> LinnaeaResult<Self> {
        if dir.join("meta.json").exists() {
            std::fs::remove_dir_all(dir)?;
        }
        std::fs::create_dir_all(dir)?;
        let index = Index::create_in_dir(dir, schema.clone()).map_err(index_err)?;
        analyzers::register(&index);
        let writer = index
            .writer_with_num_threads(1, heap_bytes)
            .map_err(index_err)?;
        Ok(Self {
            index,
            writer,
            schema,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Resolve a field handle by name
    pub fn field(&self, name: &str) -> LinnaeaResult<Field> {
        self.schema.get_field(name).map_err(index_err)
    }

    pub fn add(&mut self, doc: TantivyDocument) -> LinnaeaResult<()> {
        self.writer.add_document(doc).map_err(index_err)?;
        Ok(())
    }

    pub fn commit(&mut self) -> LinnaeaResult<()> {
        self.writer.commit().map_err(index_err)?;
        Ok(())
    }

    /// Merge all committed segments into one
    pub fn force_merge(&mut self) -> LinnaeaResult<()> {
        let segments = self.index.searchable_segment_ids().map_err(index_err)?;
        if segments.len() > 1 {
            self.writer.merge(&segments).wait().map_err(index_err)?;
        }
        Ok(())
    }

    /// Close the writer, waiting for background merge threads
    pub fn close(self) -> LinnaeaResult<()> {
        self.writer.wait_merging_threads().map_err(index_err)?;
        Ok(())
    }
}

/// Read handle for a committed index directory
pub struct IndexReaderHandle {
    reader: IndexReader,
    schema: Schema,
}

impl IndexReaderHandle {
    /// Open the index at `dir`. Fails with `NotFound` when no committed
    /// index exists there.
    pub fn open(dir: &Path) -> LinnaeaResult<Self> {
        if !dir.join("meta.json").exists() {
            return Err(LinnaeaError::NotFound(format!(
                "no index at {}",
                dir.display()
            )));
        }
        let index = Index::open_in_dir(dir).map_err(index_err)?;
        analyzers::register(&index);
        let schema = index.schema();
        let reader = index.reader().map_err(index_err)?;
        Ok(Self { reader, schema })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Documents whose `field` holds the exact term `value`, up to
    /// `limit`, in index (insertion) order.
    pub fn term_query(
        &self,
        field: &str,
        value: &str,
        limit: usize,
    ) -> LinnaeaResult<Vec<StoredDoc>> {
        let field = self.schema.get_field(field).map_err(index_err)?;
        let query = TermQuery::new(Term::from_field_text(field, value), IndexRecordOption::Basic);
        let searcher = self.reader.searcher();
        let hits = searcher
            .search(&query, &TopDocs::with_limit(limit))
            .map_err(index_err)?;
        let mut addresses: Vec<_> = hits.into_iter().map(|(_, addr)| addr).collect();
        addresses.sort_unstable();
        self.fetch(&addresses)
    }

    /// Every document matching the exact term, in index order. Child
    /// fan-out in real archives can exceed any fixed page size, so the
    /// complete matching doc set is collected rather than a bounded
    /// page.
    pub fn term_query_all(&self, field: &str, value: &str) -> LinnaeaResult<Vec<StoredDoc>> {
        let field = self.schema.get_field(field).map_err(index_err)?;
        let query = TermQuery::new(Term::from_field_text(field, value), IndexRecordOption::Basic);
        self.collect_all(&query)
    }

    /// Every document in the index, in index order
    pub fn all_docs(&self) -> LinnaeaResult<Vec<StoredDoc>> {
        self.collect_all(&AllQuery)
    }

    fn collect_all(&self, query: &dyn tantivy::query::Query) -> LinnaeaResult<Vec<StoredDoc>> {
        let searcher = self.reader.searcher();
        let hits = searcher
            .search(query, &DocSetCollector)
            .map_err(index_err)?;
        let mut addresses: Vec<_> = hits.into_iter().collect();
        addresses.sort_unstable();
        self.fetch(&addresses)
    }

    fn fetch(&self, addresses: &[tantivy::DocAddress]) -> LinnaeaResult<Vec<StoredDoc>> {
        let searcher = self.reader.searcher();
        addresses
            .iter()
            .map(|&addr| {
                let doc = searcher
                    .doc::<TantivyDocument>(addr)
                    .map_err(index_err)?;
                Ok(StoredDoc {
                    doc,
                    schema: self.schema.clone(),
                })
            })
            .collect()
    }
}

/// A retrieved document with schema-aware field access
pub struct StoredDoc {
    doc: TantivyDocument,
    schema: Schema,
}

impl StoredDoc {
    /// First text value of `field`, when present
    pub fn text(&self, field: &str) -> Option<&str> {
        let field = self.schema.get_field(field).ok()?;
        self.doc.get_first(field).and_then(|v| v.as_str())
    }

    /// First text value of `field`, or the empty string
    pub fn text_or_empty(&self, field: &str) -> &str {
        self.text(field).unwrap_or("")
    }

    pub fn i64_value(&self, field: &str) -> Option<i64> {
        let field = self.schema.get_field(field).ok()?;
        self.doc.get_first(field).and_then(|v| v.as_i64())
    }

    pub fn u64_value(&self, field: &str) -> Option<u64> {
        let field = self.schema.get_field(field).ok()?;
        self.doc.get_first(field).and_then(|v| v.as_u64())
    }

    /// Render all stored fields as pretty JSON, for diagnostics
    pub fn to_named_json(&self) -> LinnaeaResult<String> {
        let named = self.doc.to_named_doc(&self.schema);
        Ok(serde_json::to_string_pretty(&named)?)
    }
}

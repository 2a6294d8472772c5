//! Darwin Core Archive reading
//!
//! An archive is an unzipped directory holding a `meta.xml` descriptor
//! and the core data file it points at. Only the taxon core rows are
//! consumed; extensions are ignored.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use linnaea_core::types::Concept;
use linnaea_core::{LinnaeaError, LinnaeaResult};
use serde::Deserialize;
use tracing::warn;

/// Darwin Core term local names consumed by the indexer
const TERM_TAXON_ID: &str = "taxonID";
const TERM_PARENT: &str = "parentNameUsageID";
const TERM_ACCEPTED: &str = "acceptedNameUsageID";
const TERM_NAME: &str = "scientificName";
const TERM_AUTHOR: &str = "scientificNameAuthorship";
const TERM_GENUS: &str = "genus";
const TERM_SPECIFIC: &str = "specificEpithet";
const TERM_INFRA_SPECIFIC: &str = "infraspecificEpithet";
const TERM_RANK: &str = "taxonRank";
const TERM_STATUS: &str = "taxonomicStatus";

#[derive(Debug, Deserialize)]
struct ArchiveMeta {
    core: CoreMeta,
}

#[derive(Debug, Deserialize)]
struct CoreMeta {
    #[serde(rename = "@fieldsTerminatedBy")]
    fields_terminated_by: Option<String>,
    #[serde(rename = "@fieldsEnclosedBy")]
    fields_enclosed_by: Option<String>,
    #[serde(rename = "@ignoreHeaderLines")]
    ignore_header_lines: Option<u32>,
    files: FilesMeta,
    id: Option<IdMeta>,
    #[serde(rename = "field", default)]
    fields: Vec<FieldMeta>,
}

#[derive(Debug, Deserialize)]
struct FilesMeta {
    #[serde(rename = "location")]
    locations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct IdMeta {
    #[serde(rename = "@index")]
    index: usize,
}

#[derive(Debug, Deserialize)]
struct FieldMeta {
    #[serde(rename = "@index")]
    index: Option<usize>,
    #[serde(rename = "@term")]
    term: String,
}

/// Decode a separator attribute, which may carry escape sequences
/// (`\t`) rather than the literal character.
fn decode_separator(raw: Option<&str>) -> u8 {
    match raw.unwrap_or("\\t") {
        "" | "\\t" | "\t" => b'\t',
        s => s.as_bytes()[0],
    }
}

/// An opened Darwin Core Archive, ready to stream concept rows.
#[derive(Debug, Clone)]
pub struct DwcArchive {
    core_path: PathBuf,
    delimiter: u8,
    quote: Option<u8>,
    header_lines: u32,
    id_index: usize,
    term_index: HashMap<String, usize>,
    expected_columns: usize,
}

impl DwcArchive {
    /// Open the archive at `dir` by parsing its `meta.xml` descriptor.
    pub fn open(dir: &Path) -> LinnaeaResult<Self> {
        let meta_path = dir.join("meta.xml");
        if !meta_path.exists() {
            return Err(LinnaeaError::Configuration(format!(
                "no meta.xml descriptor in {}",
                dir.display()
            )));
        }
        let xml = std::fs::read_to_string(&meta_path)?;
        let meta: ArchiveMeta = quick_xml::de::from_str(&xml)
            .map_err(|e| LinnaeaError::Parse(format!("invalid meta.xml: {}", e)))?;
        let core = meta.core;

        let location = core
            .files
            .locations
            .first()
            .ok_or_else(|| LinnaeaError::Archive("meta.xml core has no file location".into()))?;
        let core_path = dir.join(location);
        if !core_path.exists() {
            return Err(LinnaeaError::Configuration(format!(
                "core file {} missing from archive",
                core_path.display()
            )));
        }

        let quote = match core.fields_enclosed_by.as_deref() {
            None => Some(b'"'),
            Some("") => None,
            Some(s) => Some(s.as_bytes()[0]),
        };

        // Index fields by the local part of their term URI
        let mut term_index = HashMap::new();
        for field in &core.fields {
            if let Some(index) = field.index {
                let local = field.term.rsplit('/').next().unwrap_or(&field.term);
                term_index.insert(local.to_string(), index);
            }
        }

        let id_index = core.id.map(|i| i.index).unwrap_or(0);
        // a row must at least cover every column the descriptor declares
        let expected_columns = term_index
            .values()
            .copied()
            .chain(std::iter::once(id_index))
            .max()
            .unwrap_or(0)
            + 1;

        Ok(Self {
            core_path,
            delimiter: decode_separator(core.fields_terminated_by.as_deref()),
            quote,
            header_lines: core.ignore_header_lines.unwrap_or(0),
            id_index,
            term_index,
            expected_columns,
        })
    }

    /// Lazily stream the concept rows of the core file. Each call
    /// re-opens the file, so the archive can be scanned more than once.
    pub fn concepts(&self) -> LinnaeaResult<ConceptIter> {
        let file = File::open(&self.core_path)?;
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true);
        match self.quote {
            Some(q) => {
                builder.quote(q);
            }
            None => {
                builder.quoting(false);
            }
        }
        let mut records = builder.from_reader(BufReader::new(file)).into_records();
        for _ in 0..self.header_lines {
            records.next();
        }
        Ok(ConceptIter {
            records,
            id_index: self.id_index,
            term_index: self.term_index.clone(),
            expected_columns: self.expected_columns,
            row: self.header_lines as u64,
        })
    }
}

/// Streaming iterator over the concept rows of an archive.
///
/// Malformed rows are logged and skipped rather than terminating the
/// stream.
pub struct ConceptIter {
    records: csv::StringRecordsIntoIter<BufReader<File>>,
    id_index: usize,
    term_index: HashMap<String, usize>,
    expected_columns: usize,
    row: u64,
}

impl ConceptIter {
    fn column<'r>(&self, record: &'r csv::StringRecord, term: &str) -> &'r str {
        self.term_index
            .get(term)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
            .trim()
    }
}

impl Iterator for ConceptIter {
    type Item = Concept;

    fn next(&mut self) -> Option<Concept> {
        loop {
            self.row += 1;
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => {
                    warn!(row = self.row, error = %e, "skipping malformed archive row");
                    continue;
                }
            };
            if record.len() < self.expected_columns {
                warn!(
                    row = self.row,
                    columns = record.len(),
                    expected = self.expected_columns,
                    "skipping archive row with missing columns"
                );
                continue;
            }

            let id = record.get(self.id_index).unwrap_or("").trim().to_string();
            let taxon_id = self.column(&record, TERM_TAXON_ID);
            let lsid = if taxon_id.is_empty() {
                id.clone()
            } else {
                taxon_id.to_string()
            };

            return Some(Concept {
                id,
                lsid,
                parent_id: self.column(&record, TERM_PARENT).to_string(),
                accepted_id: self.column(&record, TERM_ACCEPTED).to_string(),
                scientific_name: self.column(&record, TERM_NAME).to_string(),
                authorship: self.column(&record, TERM_AUTHOR).to_string(),
                genus: self.column(&record, TERM_GENUS).to_string(),
                specific_epithet: self.column(&record, TERM_SPECIFIC).to_string(),
                infraspecific_epithet: self.column(&record, TERM_INFRA_SPECIFIC).to_string(),
                rank_string: self.column(&record, TERM_RANK).to_string(),
                taxonomic_status: self.column(&record, TERM_STATUS).to_string(),
            });
        }
    }
}

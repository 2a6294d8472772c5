//! Vernacular (common name) file reading
//!
//! The vernacular file is tab-delimited with `"` quoting and `\`
//! escapes, no header row, six columns:
//! taxonID, taxonLsid, scientificName, vernacularName, languageCode,
//! countryCode. The last two are carried but unused downstream.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use linnaea_core::LinnaeaResult;
use tracing::warn;

/// One row of the vernacular file
#[derive(Debug, Clone, PartialEq)]
pub struct VernacularRow {
    pub taxon_id: String,
    pub lsid: String,
    pub scientific_name: String,
    pub vernacular_name: String,
    pub language: String,
    pub country: String,
}

impl VernacularRow {
    /// The identifier to join against the loading index: the lsid when
    /// present, the taxon id otherwise.
    pub fn lookup_lsid(&self) -> &str {
        if self.lsid.trim().is_empty() {
            &self.taxon_id
        } else {
            &self.lsid
        }
    }
}

/// Reader for the vernacular file
pub struct VernacularReader {
    records: csv::StringRecordsIntoIter<BufReader<File>>,
    row: u64,
}

impl VernacularReader {
    pub fn open(path: &Path) -> LinnaeaResult<Self> {
        let file = File::open(path)?;
        let records = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quote(b'"')
            .escape(Some(b'\\'))
            .double_quote(false)
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(file))
            .into_records();
        Ok(Self { records, row: 0 })
    }
}

impl Iterator for VernacularReader {
    type Item = VernacularRow;

    fn next(&mut self) -> Option<VernacularRow> {
        loop {
            self.row += 1;
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => {
                    warn!(row = self.row, error = %e, "skipping malformed vernacular row");
                    continue;
                }
            };
            if record.len() != 6 {
                warn!(
                    row = self.row,
                    columns = record.len(),
                    first = record.get(0).unwrap_or(""),
                    "issue on vernacular row, expected 6 columns"
                );
                continue;
            }
            return Some(VernacularRow {
                taxon_id: record[0].to_string(),
                lsid: record[1].to_string(),
                scientific_name: record[2].to_string(),
                vernacular_name: record[3].to_string(),
                language: record[4].to_string(),
                country: record[5].to_string(),
            });
        }
    }
}

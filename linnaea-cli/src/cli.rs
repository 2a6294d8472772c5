use clap::Parser;
use std::path::PathBuf;

/// Build the Linnaea name-matching indexes from a Darwin Core Archive.
///
/// The build runs in two phases: a temporary loading index over the raw
/// concepts, then the search index with nested-set labels and higher
/// classification. When no phase flag is given both phases run.
#[derive(Parser)]
#[command(
    name = "linnaea",
    version,
    about = "Taxonomic name indexer for Darwin Core Archives",
    long_about = "Linnaea ingests a Darwin Core Archive of scientific names and produces \
                  exact-match search indexes for name-to-concept resolution, including \
                  nested-set ancestry labels, higher classification, synonyms, vernacular \
                  names and IRMNG homonyms."
)]
pub struct Cli {
    /// Generate the load index and the search index
    #[arg(long)]
    pub all: bool,

    /// Generate the load index only. The load index is a temporary
    /// index generated from the raw data files, used to build the main
    /// search index
    #[arg(long)]
    pub load: bool,

    /// Generate the search index only. A load index must already exist
    /// for this to run
    #[arg(long)]
    pub search: bool,

    /// The unzipped DwCA directory for the scientific names
    #[arg(long, value_name = "DIR")]
    pub dwca: Option<PathBuf>,

    /// The unzipped IRMNG DwCA used to detect homonyms. When absent no
    /// homonym index is created
    #[arg(long, value_name = "DIR")]
    pub irmng: Option<PathBuf>,

    /// The common (vernacular) name file. When absent no vernacular
    /// index is created
    #[arg(long, value_name = "FILE")]
    pub common: Option<PathBuf>,

    /// The target directory to write the name index to
    #[arg(long, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// The directory for the temporary load index
    #[arg(long, value_name = "DIR")]
    pub tmp: Option<PathBuf>,

    /// Debug a name search against the built target index, print the
    /// matching record and exit
    #[arg(long = "test-search", value_name = "NAME")]
    pub test_search: Option<String>,
}

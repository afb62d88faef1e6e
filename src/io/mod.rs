//! Routines for loading ontology data.
pub mod obographs;

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{ParseIssue, Result};
use crate::predicate::{EdgeType, PredicateValue};
use crate::property::PropertyKind;
use crate::term::Term;
use crate::term_id::TermId;

/// A relationship between two ontology classes, by term id.
///
/// Edges are produced by the parser; resolution to graph indices happens
/// during ontology assembly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: TermId,
    pub edge_type: EdgeType,
    pub destination: TermId,
}

impl Edge {
    pub fn new(source: TermId, edge_type: EdgeType, destination: TermId) -> Self {
        Edge {
            source,
            edge_type,
            destination,
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -[{:?}]-> {}",
            self.source, self.edge_type, self.destination
        )
    }
}

/// Everything a parser extracts from an ontology document.
///
/// The data is assembled into a queryable graph by
/// [`crate::ontology::CsrOntology`].
pub struct OntologyData {
    /// The identifier of the parsed graph, e.g. `http://purl.obolibrary.org/obo/hp.json`.
    pub ontology_id: Option<String>,
    pub terms: Vec<Term>,
    pub edges: Vec<Edge>,
    /// Ontology-level property assertions.
    pub predicate_values: Vec<PredicateValue>,
    /// Annotation properties defined by the document.
    pub properties: Vec<PropertyKind>,
    /// Non-fatal problems encountered during the parse, for QC reporting.
    pub issues: Vec<ParseIssue>,
}

/// Ontology data parsers read [`OntologyData`] from some input.
pub trait OntologyDataParser {
    /// Load ontology data from a buffered reader.
    fn load_from_buf_read<R>(&self, read: R) -> Result<OntologyData>
    where
        R: BufRead;
}

/// [`OntologyLoader`] parses the input into [`OntologyData`] using the
/// supplied [`OntologyDataParser`] and then assembles the data into an
/// ontology.
///
/// Use [`OntologyLoaderBuilder`] to configure the loader, then load from a
/// path, a reader, or a buffered reader.
pub struct OntologyLoader<P> {
    parser: P,
}

impl<P> OntologyLoader<P> {
    fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<P> OntologyLoader<P>
where
    P: OntologyDataParser,
{
    /// Load an ontology from a path.
    pub fn load_from_path<O, Q>(&self, path: Q) -> Result<O>
    where
        Q: AsRef<Path>,
        O: TryFrom<OntologyData, Error = crate::error::PhenographError>,
    {
        self.load_from_read(File::open(path)?)
    }

    /// Load an ontology from a reader.
    pub fn load_from_read<O, R>(&self, read: R) -> Result<O>
    where
        R: Read,
        O: TryFrom<OntologyData, Error = crate::error::PhenographError>,
    {
        self.load_from_buf_read(BufReader::new(read))
    }

    /// Load an ontology from a buffered reader.
    pub fn load_from_buf_read<O, R>(&self, read: R) -> Result<O>
    where
        R: BufRead,
        O: TryFrom<OntologyData, Error = crate::error::PhenographError>,
    {
        let data = self.parser.load_from_buf_read(read)?;
        O::try_from(data)
    }

    /// Parse the input without assembling an ontology.
    pub fn load_data_from_buf_read<R>(&self, read: R) -> Result<OntologyData>
    where
        R: BufRead,
    {
        self.parser.load_from_buf_read(read)
    }
}

pub struct Uninitialized;

pub struct WithParser<P> {
    parser: P,
}

/// A builder for configuring [`OntologyLoader`].
pub struct OntologyLoaderBuilder<State> {
    state: State,
}

/// Creates a new "blank" builder.
impl Default for OntologyLoaderBuilder<Uninitialized> {
    fn default() -> Self {
        Self {
            state: Uninitialized,
        }
    }
}

impl OntologyLoaderBuilder<Uninitialized> {
    pub fn new() -> Self {
        OntologyLoaderBuilder::default()
    }

    /// Set the [`OntologyDataParser`] for parsing ontology data.
    #[must_use]
    pub fn parser<P>(self, parser: P) -> OntologyLoaderBuilder<WithParser<P>>
    where
        P: OntologyDataParser,
    {
        OntologyLoaderBuilder {
            state: WithParser { parser },
        }
    }
}

impl<P> OntologyLoaderBuilder<WithParser<P>> {
    /// Finish the build and get the ontology loader.
    pub fn build(self) -> OntologyLoader<P> {
        OntologyLoader::new(self.state.parser)
    }
}

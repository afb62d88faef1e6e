//! The list of recommended imports for using the library.
pub use crate::annotations::analysis::AnnotationAnalysis;
pub use crate::annotations::date::DateWindow;
pub use crate::annotations::hpoa::HpoaAnnotation;

pub use crate::error::{IssueSink, ParseIssue, PhenographError, Severity};

pub use crate::io::{Edge, OntologyData, OntologyLoader, OntologyLoaderBuilder};

pub use crate::ontology::{CsrOntology, DefaultCsrOntology, Index, TopLevelCategorizer};

pub use crate::predicate::{EdgeType, Predicate, PredicateValue};

pub use crate::term::Term;
pub use crate::term_id::{Identified, TermId};

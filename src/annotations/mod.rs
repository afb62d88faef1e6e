//! Loading and analysis of disease-to-phenotype annotations.
//!
//! [`hpoa`] parses the tab-separated corpus, [`date`] supplies the inclusive
//! curation-date windows, and [`analysis`] joins the records to a loaded
//! ontology to answer the temporal and hierarchical questions.
pub mod analysis;
pub mod date;
pub mod hpoa;

pub use analysis::{AnnotationAnalysis, DescendantsSummary, ToplevelSummary};
pub use date::{parse_iso_date, DateWindow};
pub use hpoa::{
    parse_hpoa_path, parse_hpoa_read, Biocuration, Database, EvidenceCode, HpoaAnnotation,
};

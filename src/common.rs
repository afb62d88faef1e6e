//! Constants for working with well-known ontologies.

/// Constants for working with Human Phenotype Ontology (HPO).
pub mod hpo {
    use once_cell::sync::Lazy;

    use crate::term_id::TermId;

    /// [All (HP:0000001)](http://purl.obolibrary.org/obo/HP_0000001)
    /// is the root of all terms in the HPO.
    pub static ALL: Lazy<TermId> = Lazy::new(|| TermId::from(("HP", "0000001")));

    /// [Phenotypic abnormality (HP:0000118)](http://purl.obolibrary.org/obo/HP_0000118)
    /// is the root of the phenotypic abnormality sub-module of the HPO;
    /// its direct children are the top-level categories.
    pub static PHENOTYPIC_ABNORMALITY: Lazy<TermId> =
        Lazy::new(|| TermId::from(("HP", "0000118")));

    /// [Clinical modifier (HP:0012823)](http://purl.obolibrary.org/obo/HP_0012823)
    /// is the root of HPO's submodule with terms that specify the phenotypic
    /// abnormalities with respect to severity, laterality, and other aspects.
    pub static CLINICAL_MODIFIER: Lazy<TermId> = Lazy::new(|| TermId::from(("HP", "0012823")));
}

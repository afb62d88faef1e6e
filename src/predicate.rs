//! Closed vocabularies for edge and metadata predicates.
//!
//! Both registries map the final path segment of an OBO-graph `pred` IRI to a
//! closed enum. The tables are process-wide constants built once on first use
//! and immutable afterwards.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::warn;

/// The relationship carried by an ontology graph edge.
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeType {
    IsA,
    /// Synthesized reverse of [`EdgeType::IsA`]; never present in the input.
    IsAInverse,
    DiseaseHasBasisInDysfunctionOf,
    DiseaseHasBasisInDisruptionOf,
    DiseaseHasBasisInFeature,
    DiseasesCausesDisruptionOf,
    DiseaseHasLocation,
    DiseaseHasInflammationSite,
    RealizedInResponseToStimulus,
    DiseaseHasFeature,
    DiseaseArisesFromStructure,
    RealizedInResponseTo,
    HasModifier,
    TransmittedBy,
    RealizedIn,
    PredisposesTowards,
    DiseaseHasMajorFeature,
    DiseaseCausesFeature,
    DiseaseRespondsTo,
    DiseaseSharesFeaturesOf,
    DiseaseHasBasisInDevelopmentOf,
}

static EDGE_TYPE_REGISTRY: Lazy<HashMap<&'static str, EdgeType>> = Lazy::new(|| {
    HashMap::from([
        ("is_a", EdgeType::IsA),
        ("RO_0004020", EdgeType::DiseaseHasBasisInDysfunctionOf),
        ("RO_0004021", EdgeType::DiseaseHasBasisInDisruptionOf),
        ("RO_0004022", EdgeType::DiseaseHasBasisInFeature),
        ("RO_0004024", EdgeType::DiseasesCausesDisruptionOf),
        ("RO_0004026", EdgeType::DiseaseHasLocation),
        ("RO_0004027", EdgeType::DiseaseHasInflammationSite),
        ("RO_0004028", EdgeType::RealizedInResponseToStimulus),
        ("RO_0004029", EdgeType::DiseaseHasFeature),
        ("RO_0004030", EdgeType::DiseaseArisesFromStructure),
        ("RO_0009501", EdgeType::RealizedInResponseTo),
        ("RO_0002573", EdgeType::HasModifier),
        ("RO_0002451", EdgeType::TransmittedBy),
        ("BFO_0000054", EdgeType::RealizedIn),
        ("mondo#predisposes_towards", EdgeType::PredisposesTowards),
        ("mondo#disease_has_major_feature", EdgeType::DiseaseHasMajorFeature),
        ("mondo#disease_causes_feature", EdgeType::DiseaseCausesFeature),
        ("mondo#disease_responds_to", EdgeType::DiseaseRespondsTo),
        ("mondo#disease_shares_features_of", EdgeType::DiseaseSharesFeaturesOf),
        (
            "mondo#disease_has_basis_in_development_of",
            EdgeType::DiseaseHasBasisInDevelopmentOf,
        ),
    ])
});

impl EdgeType {
    /// Look up an edge type by the final path segment of the `pred` IRI.
    ///
    /// Returns `None` for predicates outside the registry; the loader turns
    /// that into a fatal parse error.
    pub fn from_key(key: &str) -> Option<EdgeType> {
        EDGE_TYPE_REGISTRY.get(key).copied()
    }

    pub fn is_is_a(&self) -> bool {
        matches!(self, EdgeType::IsA)
    }
}

/// The predicate of a term- or ontology-level `basicPropertyValues` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Predicate {
    CreatedBy,
    CreationDate,
    HasOboNamespace,
    HasAlternativeId,
    IsClassLevel,
    IsAnonymous,
    Consider,
    DefaultNamespace,
    LogicalDefinitionViewRelation,
    SavedBy,
    IsMetadataTag,
    Shorthand,
    HasOboFormatVersion,
    CloseMatch,
    ExactMatch,
    BroadMatch,
    NarrowMatch,
    RdfSchemaComment,
    SeeAlso,
    Related,
    ExcludedSubclassOf,
    Pathogenesis,
    Date,
    OwlDeprecated,
    EditorNotes,
    Creator,
    Description,
    License,
    Rights,
    Subject,
    Title,
    TermReplacedBy,
    NeverInTaxon,
    InTaxon,
    ExcludedSynonym,
    Source,
    Homepage,
    /// Anything outside the registry. Tolerated, but logged.
    Unknown,
}

static PREDICATE_REGISTRY: Lazy<HashMap<&'static str, Predicate>> = Lazy::new(|| {
    HashMap::from([
        ("oboInOwl#created_by", Predicate::CreatedBy),
        ("oboInOwl#creation_date", Predicate::CreationDate),
        ("oboInOwl#hasOBONamespace", Predicate::HasOboNamespace),
        ("oboInOwl#hasAlternativeId", Predicate::HasAlternativeId),
        ("oboInOwl#is_class_level", Predicate::IsClassLevel),
        ("oboInOwl#is_anonymous", Predicate::IsAnonymous),
        ("oboInOwl#consider", Predicate::Consider),
        ("oboInOwl#default-namespace", Predicate::DefaultNamespace),
        (
            "oboInOwl#logical-definition-view-relation",
            Predicate::LogicalDefinitionViewRelation,
        ),
        ("oboInOwl#saved-by", Predicate::SavedBy),
        ("oboInOwl#is_metadata_tag", Predicate::IsMetadataTag),
        ("oboInOwl#shorthand", Predicate::Shorthand),
        ("oboInOwl#hasOBOFormatVersion", Predicate::HasOboFormatVersion),
        ("core#closeMatch", Predicate::CloseMatch),
        ("core#exactMatch", Predicate::ExactMatch),
        ("core#broadMatch", Predicate::BroadMatch),
        ("core#narrowMatch", Predicate::NarrowMatch),
        ("rdf-schema#comment", Predicate::RdfSchemaComment),
        ("rdf-schema#seeAlso", Predicate::SeeAlso),
        ("mondo#related", Predicate::Related),
        ("mondo#excluded_subClassOf", Predicate::ExcludedSubclassOf),
        ("mondo#pathogenesis", Predicate::Pathogenesis),
        ("date", Predicate::Date),
        ("owl#deprecated", Predicate::OwlDeprecated),
        ("hsapdv#editor_notes", Predicate::EditorNotes),
        ("creator", Predicate::Creator),
        ("description", Predicate::Description),
        ("license", Predicate::License),
        ("rights", Predicate::Rights),
        ("subject", Predicate::Subject),
        ("title", Predicate::Title),
        ("IAO_0100001", Predicate::TermReplacedBy),
        ("RO_0002161", Predicate::NeverInTaxon),
        ("RO_0002162", Predicate::InTaxon),
        ("mondo#excluded_synonym", Predicate::ExcludedSynonym),
        ("source", Predicate::Source),
        ("homepage", Predicate::Homepage),
    ])
});

impl Predicate {
    /// Look up a metadata predicate by the final path segment of the `pred` IRI.
    ///
    /// Unknown keys decode to [`Predicate::Unknown`].
    pub fn from_key(key: &str) -> Predicate {
        match PREDICATE_REGISTRY.get(key) {
            Some(predicate) => *predicate,
            None => {
                warn!("unrecognized property: {key}");
                Predicate::Unknown
            }
        }
    }
}

/// A `(predicate, value)` assertion from a `basicPropertyValues` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateValue {
    pub predicate: Predicate,
    pub value: String,
}

impl PredicateValue {
    pub fn new(predicate: Predicate, value: impl Into<String>) -> Self {
        PredicateValue {
            predicate,
            value: value.into(),
        }
    }
}

impl std::fmt::Display for PredicateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.predicate, self.value)
    }
}

/// The final path segment of an IRI, i.e. the registry key of a `pred` value.
pub(crate) fn pred_key(pred: &str) -> &str {
    match pred.rfind('/') {
        Some(i) => &pred[i + 1..],
        None => pred,
    }
}

//! The registry of annotation properties defined by `PROPERTY` nodes.
//!
//! Unlike [`crate::predicate::Predicate`], these do not describe the ontology
//! itself; they are vocabulary the ontology defines for describing other
//! elements (e.g. `UK spelling` qualifies synonyms).

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use once_cell::sync::Lazy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyKind {
    UkSpelling,
    Abbreviation,
    PluralForm,
    LaypersonTerm,
    SecondaryConsequence,
    DisplayLabel,
    HpoSlim,
    ObsoleteSynonym,
    Dubious,
    MayBeMergedInto,
    NeverInTaxon,
    InTaxon,
}

static PROPERTY_REGISTRY: Lazy<HashMap<&'static str, PropertyKind>> = Lazy::new(|| {
    HashMap::from([
        ("UK spelling", PropertyKind::UkSpelling),
        ("HP_0045076", PropertyKind::UkSpelling),
        ("abbreviation", PropertyKind::Abbreviation),
        ("HP_0045077", PropertyKind::Abbreviation),
        ("plural form", PropertyKind::PluralForm),
        ("HP_0045078", PropertyKind::PluralForm),
        ("layperson term", PropertyKind::LaypersonTerm),
        ("hp.owl#layperson", PropertyKind::LaypersonTerm),
        ("hp#secondary_consequence", PropertyKind::SecondaryConsequence),
        (
            "Consequence of a disorder in another organ system.",
            PropertyKind::SecondaryConsequence,
        ),
        ("display label", PropertyKind::DisplayLabel),
        ("HP_0031940", PropertyKind::DisplayLabel),
        ("hp#hposlim_core", PropertyKind::HpoSlim),
        ("HP_0031859", PropertyKind::ObsoleteSynonym),
        ("mondo#DUBIOUS", PropertyKind::Dubious),
        ("mondo#may_be_merged_into", PropertyKind::MayBeMergedInto),
        ("RO_0002161", PropertyKind::NeverInTaxon),
        ("RO_0002162", PropertyKind::InTaxon),
    ])
});

impl PropertyKind {
    /// Look up a property by the final path segment of its node id, or by its
    /// label.
    pub fn from_key(key: &str) -> Option<PropertyKind> {
        PROPERTY_REGISTRY.get(key).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyKind::UkSpelling => "UK spelling",
            PropertyKind::Abbreviation => "abbreviation",
            PropertyKind::PluralForm => "plural form",
            PropertyKind::LaypersonTerm => "layperson term",
            PropertyKind::SecondaryConsequence => "secondary consequence",
            PropertyKind::DisplayLabel => "display label",
            PropertyKind::HpoSlim => "hpo slim",
            PropertyKind::ObsoleteSynonym => "obsolete synonym",
            PropertyKind::Dubious => "dubious",
            PropertyKind::MayBeMergedInto => "may be merged into",
            PropertyKind::NeverInTaxon => "never in taxon",
            PropertyKind::InTaxon => "in taxon",
        }
    }
}

impl Display for PropertyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod test_property {
    use super::PropertyKind;

    #[test]
    fn from_key_accepts_id_and_label() {
        assert_eq!(PropertyKind::from_key("HP_0045076"), Some(PropertyKind::UkSpelling));
        assert_eq!(PropertyKind::from_key("UK spelling"), Some(PropertyKind::UkSpelling));
        assert_eq!(PropertyKind::from_key("hp#hposlim_core"), Some(PropertyKind::HpoSlim));
        assert_eq!(PropertyKind::from_key("whatever"), None);
    }

    #[test]
    fn labels() {
        assert_eq!(PropertyKind::PluralForm.to_string(), "plural form");
        assert_eq!(PropertyKind::Dubious.to_string(), "dubious");
    }
}

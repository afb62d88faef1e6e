//! Ontology term model.
//!
//! The structs in this module are produced by the loader and frozen inside
//! the ontology afterwards.

use chrono::NaiveDate;

use crate::annotations::date::parse_iso_date;
use crate::error::Result;
use crate::predicate::{Predicate, PredicateValue};
use crate::term_id::{Identified, TermId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SynonymType {
    Exact,
    Broad,
    Narrow,
    Related,
}

impl SynonymType {
    /// Decode the final path segment of a synonym `pred`,
    /// e.g. `hasExactSynonym`.
    pub fn from_key(key: &str) -> Option<SynonymType> {
        match key {
            "hasExactSynonym" => Some(SynonymType::Exact),
            "hasBroadSynonym" => Some(SynonymType::Broad),
            "hasNarrowSynonym" => Some(SynonymType::Narrow),
            "hasRelatedSynonym" => Some(SynonymType::Related),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synonym {
    pub label: String,
    pub synonym_type: SynonymType,
}

/// A term definition with the identifiers of its supporting references.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Definition {
    pub text: String,
    pub xrefs: Vec<TermId>,
}

/// An ontology class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    id: TermId,
    label: String,
    definition: Option<Definition>,
    xrefs: Vec<TermId>,
    alternative_ids: Vec<TermId>,
    predicate_values: Vec<PredicateValue>,
    synonyms: Vec<Synonym>,
    is_obsolete: bool,
}

impl Term {
    pub fn new(id: TermId, label: impl Into<String>) -> Self {
        Term {
            id,
            label: label.into(),
            definition: None,
            xrefs: Vec::new(),
            alternative_ids: Vec::new(),
            predicate_values: Vec::new(),
            synonyms: Vec::new(),
            is_obsolete: false,
        }
    }

    pub(crate) fn set_obsolete(&mut self, is_obsolete: bool) {
        self.is_obsolete = is_obsolete;
    }

    pub(crate) fn set_definition(&mut self, definition: Definition) {
        self.definition = Some(definition);
    }

    pub(crate) fn add_xref(&mut self, xref: TermId) {
        self.xrefs.push(xref);
    }

    pub(crate) fn add_synonym(&mut self, synonym: Synonym) {
        self.synonyms.push(synonym);
    }

    /// Attach a predicate-value to this term.
    ///
    /// `hasAlternativeId` values encode alternative term ids and go into their
    /// own list; everything else stays in the generic predicate-value list.
    pub(crate) fn add_predicate_value(&mut self, pv: PredicateValue) -> Result<()> {
        if pv.predicate == Predicate::HasAlternativeId {
            self.alternative_ids.push(pv.value.parse()?);
        } else {
            self.predicate_values.push(pv);
        }
        Ok(())
    }

    pub fn id(&self) -> &TermId {
        &self.id
    }

    /// The name of the term, e.g. `Seizure` for
    /// [HP:0001250](https://hpo.jax.org/browse/term/HP:0001250).
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn definition(&self) -> Option<&Definition> {
        self.definition.as_ref()
    }

    pub fn xrefs(&self) -> &[TermId] {
        &self.xrefs
    }

    pub fn alternative_ids(&self) -> &[TermId] {
        &self.alternative_ids
    }

    pub fn predicate_values(&self) -> &[PredicateValue] {
        &self.predicate_values
    }

    pub fn synonyms(&self) -> &[Synonym] {
        &self.synonyms
    }

    pub fn is_obsolete(&self) -> bool {
        self.is_obsolete
    }

    /// Test if the term is *primary*, i.e. not obsolete.
    pub fn is_current(&self) -> bool {
        !self.is_obsolete
    }

    /// Test if `tid` is one of the alternative ids of this term.
    pub fn is_alternative_id(&self, tid: &TermId) -> bool {
        self.alternative_ids.contains(tid)
    }

    pub fn contains_xref_with_prefix(&self, prefix: &str) -> bool {
        self.xrefs.iter().any(|xref| xref.prefix() == prefix)
    }

    /// The creation date recorded in the term's predicate values, if any.
    ///
    /// Looks for `creation_date` first and falls back to `date`; at most one
    /// such entry per term is assumed.
    pub fn creation_date(&self) -> Option<NaiveDate> {
        self.predicate_values
            .iter()
            .find(|pv| matches!(pv.predicate, Predicate::CreationDate | Predicate::Date))
            .and_then(|pv| parse_iso_date(&pv.value).ok())
    }
}

impl Identified for Term {
    fn identifier(&self) -> &TermId {
        &self.id
    }
}

#[cfg(test)]
mod test_term {
    use super::*;

    fn arachnodactyly() -> Term {
        Term::new("HP:0001166".parse().unwrap(), "Arachnodactyly")
    }

    #[test]
    fn alternative_ids_are_routed_out_of_the_predicate_values() {
        let mut term = arachnodactyly();
        term.add_predicate_value(PredicateValue {
            predicate: Predicate::HasAlternativeId,
            value: "HP:0001505".into(),
        })
        .unwrap();
        term.add_predicate_value(PredicateValue {
            predicate: Predicate::CreatedBy,
            value: "doelleman".into(),
        })
        .unwrap();

        assert_eq!(term.alternative_ids(), ["HP:0001505".parse::<TermId>().unwrap()]);
        assert_eq!(term.predicate_values().len(), 1);
        assert!(term.is_alternative_id(&"HP:0001505".parse().unwrap()));
    }

    #[test]
    fn unparsable_alternative_id_is_an_error() {
        let mut term = arachnodactyly();
        let outcome = term.add_predicate_value(PredicateValue {
            predicate: Predicate::HasAlternativeId,
            value: "nonsense".into(),
        });
        assert!(outcome.is_err());
    }

    #[test]
    fn creation_date_is_read_from_predicate_values() {
        let mut term = arachnodactyly();
        term.add_predicate_value(PredicateValue {
            predicate: Predicate::CreationDate,
            value: "2008-02-27T02:20:00Z".into(),
        })
        .unwrap();

        assert_eq!(
            term.creation_date(),
            Some(NaiveDate::from_ymd_opt(2008, 2, 27).unwrap())
        );
    }

    #[test]
    fn xref_prefix_scan() {
        let mut term = arachnodactyly();
        term.add_xref("UMLS:C0003706".parse().unwrap());
        assert!(term.contains_xref_with_prefix("UMLS"));
        assert!(!term.contains_xref_with_prefix("MSH"));
    }
}

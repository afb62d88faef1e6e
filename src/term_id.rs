//! The base building blocks for working with ontology data.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::PhenographError;

/// `Identified` is implemented by entities that have a [`TermId`] as an identifier.
pub trait Identified {
    fn identifier(&self) -> &TermId;
}

/// Identifier of an ontology concept.
///
/// A `TermId` keeps the canonical `PREFIX:LOCAL` form as a single string
/// together with the offset of the separator, so that `prefix()` and `id()`
/// are cheap slices.
///
/// ## Examples
///
/// Create a `TermId` from a CURIE `str` or from a *prefix*/*id* tuple:
///
/// ```
/// use phenograph::TermId;
///
/// let a: TermId = "HP:0001250".parse().expect("value is a valid CURIE");
/// let b = TermId::from(("HP", "0001250"));
///
/// assert_eq!(a, b);
/// ```
///
/// Underscore-delimited forms and IRIs whose final path segment is CURIE-like
/// are normalized:
///
/// ```
/// use phenograph::TermId;
///
/// let term_id: TermId = "http://purl.obolibrary.org/obo/HP_0000118".parse().unwrap();
/// assert_eq!(term_id.to_string(), "HP:0000118");
/// ```
///
/// ## Errors
///
/// Parsing fails with [`PhenographError::MalformedId`] if no delimiter and no
/// special form (`hgnc/…`, `ICD10…`, `orcid.org/…`) applies:
///
/// ```
/// use phenograph::TermId;
///
/// let term_id: Result<TermId, _> = "HP0001166".parse();
/// assert!(term_id.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TermId {
    value: Box<str>,
    /// Length of the prefix, i.e. the offset of `:` in `value`.
    separator: u8,
}

impl TermId {
    fn with_separator(value: String, separator: usize) -> Result<Self, PhenographError> {
        match u8::try_from(separator) {
            Ok(separator) => Ok(TermId {
                value: value.into_boxed_str(),
                separator,
            }),
            Err(_) => Err(PhenographError::MalformedId(value)),
        }
    }

    /// Parse a term id out of an IRI, e.g.
    /// `http://purl.obolibrary.org/obo/HP_0000118`.
    ///
    /// The special `…hgnc/<N>` form maps to `HGNC:<N>`; any other input must
    /// contain at least one `/` and its final path segment is parsed as a
    /// CURIE.
    pub fn from_url(s: &str) -> Result<Self, PhenographError> {
        if let Some(i) = s.find("hgnc/") {
            let local = &s[i + 5..];
            return TermId::with_separator(format!("HGNC:{local}"), 4);
        }
        match s.rfind('/') {
            Some(i) => s[i + 1..]
                .parse()
                .map_err(|_| PhenographError::MalformedId(s.to_string())),
            None => Err(PhenographError::MalformedId(s.to_string())),
        }
    }

    /// Get the prefix, e.g. `HP` for `HP:0001250`.
    pub fn prefix(&self) -> &str {
        &self.value[..self.separator as usize]
    }

    /// Get the local part, e.g. `0001250` for `HP:0001250`.
    pub fn id(&self) -> &str {
        &self.value[self.separator as usize + 1..]
    }

    /// Get the canonical `PREFIX:LOCAL` form.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Try to convert a `str` into a `TermId`.
///
/// The candidates are tried in order: the tail after the final `/`, a
/// `:`-delimited CURIE, a `_`-delimited CURIE (the delimiter is upgraded to
/// `:`), and last the `hgnc`/`ICD10`/`orcid.org` special forms.
impl FromStr for TermId {
    type Err = PhenographError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tail = match s.rfind('/') {
            Some(i) => &s[i + 1..],
            None => s,
        };
        if let Some(i) = tail.find(':') {
            return TermId::with_separator(tail.to_string(), i);
        }
        if let Some(i) = tail.find('_') {
            let mut value = tail.to_string();
            value.replace_range(i..=i, ":");
            return TermId::with_separator(value, i);
        }
        if s.contains("hgnc") {
            return TermId::with_separator(format!("HGNC:{tail}"), 4);
        }
        if let Some(code) = tail.strip_prefix("ICD10") {
            if !code.is_empty() {
                return TermId::with_separator(format!("ICD10:{code}"), 5);
            }
        }
        if s.contains("orcid.org/") {
            return TermId::with_separator(format!("ORCID:{tail}"), 5);
        }
        Err(PhenographError::MalformedId(s.to_string()))
    }
}

/// Convert a tuple with *prefix* and *id* into a `TermId`.
///
/// ## Panics
///
/// Conversion panics if *prefix* includes more than 255 characters.
impl From<(&str, &str)> for TermId {
    fn from(value: (&str, &str)) -> Self {
        let (prefix, id) = value;
        TermId::with_separator(format!("{prefix}:{id}"), prefix.len())
            .expect("CURIE prefix should not be longer than 255 chars")
    }
}

/// Test if a tuple with *prefix* and *id* is equal to a term ID.
///
/// ```
/// use phenograph::TermId;
///
/// assert_eq!(TermId::from(("HP", "0001250")), ("HP", "0001250"));
/// ```
impl PartialEq<(&str, &str)> for TermId {
    fn eq(&self, other: &(&str, &str)) -> bool {
        self.prefix() == other.0 && self.id() == other.1
    }
}

impl PartialEq<(&str, &str)> for &TermId {
    fn eq(&self, other: &(&str, &str)) -> bool {
        (*self).eq(other)
    }
}

impl PartialEq for TermId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for TermId {}

impl PartialOrd for TermId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Term ids order lexicographically on the canonical form.
impl Ord for TermId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for TermId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl Display for TermId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl Identified for TermId {
    fn identifier(&self) -> &TermId {
        self
    }
}


#[cfg(test)]
mod test_comparison_and_ordering {
    use std::cmp::Ordering;
    use std::str::FromStr;

    use super::TermId;

    macro_rules! term_ids_compare_to_ordering {
        ($left_curie: literal, $right_curie: literal, $val: expr) => {
            let left = TermId::from_str($left_curie).expect("Left CURIE is invalid!");
            let right = TermId::from_str($right_curie).expect("Right CURIE is invalid!");
            assert_eq!(left.cmp(&right), $val);
        };
    }

    #[test]
    fn ordering_is_lexicographic() {
        term_ids_compare_to_ordering!("HP:0000001", "HP:0000001", Ordering::Equal);
        term_ids_compare_to_ordering!("HP:0000001", "HP:0000118", Ordering::Less);
        term_ids_compare_to_ordering!("HP:0001250", "HP:0000118", Ordering::Greater);
        term_ids_compare_to_ordering!("HP:0000118", "OMIM:256000", Ordering::Less);
    }

    #[test]
    fn delimiter_does_not_matter() {
        term_ids_compare_to_ordering!("HP:0000001", "HP_0000001", Ordering::Equal);
    }
}

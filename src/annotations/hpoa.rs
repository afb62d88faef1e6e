//! Loading of the disease-to-phenotype annotation corpus (`phenotype.hpoa`).
//!
//! The corpus is tab-separated with a fixed 12-column schema and `#`-prefixed
//! comment lines. The columns consumed here: 0 disease id, 1 disease name,
//! 2 negation flag, 3 phenotype term id, 5 evidence code, 11 biocurations.

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

use crate::annotations::date::{distant_past, parse_iso_date};
use crate::error::{IssueSink, ParseIssue, PhenographError, Result};
use crate::term_id::TermId;

const EXPECTED_FIELD_COUNT: usize = 12;

/// The provenance class of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EvidenceCode {
    /// Inferred from electronic annotation.
    Iea,
    /// Traceable author statement.
    Tas,
    /// Published clinical study.
    Pcs,
}

impl EvidenceCode {
    /// Decode an evidence token.
    ///
    /// Legacy files carry tokens outside the vocabulary; those decode to
    /// [`EvidenceCode::Iea`] with a warning rather than failing the row.
    pub fn parse_lenient(token: &str) -> EvidenceCode {
        match token {
            "IEA" => EvidenceCode::Iea,
            "TAS" => EvidenceCode::Tas,
            "PCS" => EvidenceCode::Pcs,
            _ => {
                warn!("malformed evidence type string {token:?}, defaulting to IEA");
                EvidenceCode::Iea
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceCode::Iea => "IEA",
            EvidenceCode::Tas => "TAS",
            EvidenceCode::Pcs => "PCS",
        }
    }
}

impl Display for EvidenceCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The source database of a disease id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Database {
    Omim,
    Orpha,
    Decipher,
}

impl Database {
    pub fn from_prefix(prefix: &str) -> Option<Database> {
        match prefix {
            "OMIM" => Some(Database::Omim),
            "ORPHA" => Some(Database::Orpha),
            "DECIPHER" => Some(Database::Decipher),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Database::Omim => "OMIM",
            Database::Orpha => "ORPHA",
            Database::Decipher => "DECIPHER",
        }
    }
}

impl Display for Database {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A curator stamp, e.g. `HPO:skoehler[2017-04-01]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Biocuration {
    pub curator: String,
    pub date: NaiveDate,
}

impl Biocuration {
    /// Parse a single `curator[date]` item.
    ///
    /// An item without brackets keeps its payload as an `n/a` curator stamped
    /// with the distant past; a bracket with an unparsable date falls back to
    /// the distant past as well.
    pub fn parse(item: &str) -> Biocuration {
        match item.find('[') {
            Some(open) => {
                let close = item.rfind(']').unwrap_or(item.len());
                let payload = item.get(open + 1..close).unwrap_or("");
                let date = parse_iso_date(payload).unwrap_or_else(|_| {
                    warn!("malformed biocuration date in {item:?}");
                    distant_past()
                });
                Biocuration {
                    curator: item[..open].to_string(),
                    date,
                }
            }
            None => Biocuration {
                curator: "n/a".to_string(),
                date: distant_past(),
            },
        }
    }
}

impl Display for Biocuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.curator, self.date.format("%Y-%m-%d"))
    }
}

/// One disease-to-phenotype assertion of the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HpoaAnnotation {
    disease_id: TermId,
    disease_name: String,
    negated: bool,
    phenotype_id: TermId,
    evidence: EvidenceCode,
    biocurations: Vec<Biocuration>,
}

impl HpoaAnnotation {
    fn from_record(record: &StringRecord, row: u64, sink: &mut dyn IssueSink) -> Result<Self> {
        if record.len() != EXPECTED_FIELD_COUNT {
            return Err(PhenographError::MalformedAnnotationRow {
                row,
                fields: record.len(),
            });
        }

        let disease_id: TermId = record[0].parse()?;
        if Database::from_prefix(disease_id.prefix()).is_none() {
            sink.report(ParseIssue::warn(
                "unknown_database",
                format!("row {row}: malformed database prefix {}", disease_id.prefix()),
            ));
        }

        Ok(HpoaAnnotation {
            disease_id,
            disease_name: record[1].to_string(),
            negated: record[2].starts_with("NOT"),
            phenotype_id: record[3].parse()?,
            evidence: EvidenceCode::parse_lenient(&record[5]),
            biocurations: record[11].split(';').map(Biocuration::parse).collect(),
        })
    }

    pub fn disease_id(&self) -> &TermId {
        &self.disease_id
    }

    pub fn disease_name(&self) -> &str {
        &self.disease_name
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// The negation flag the way the corpus spells it.
    pub fn negated_label(&self) -> &'static str {
        if self.negated {
            "NOT"
        } else {
            ""
        }
    }

    pub fn phenotype_id(&self) -> &TermId {
        &self.phenotype_id
    }

    pub fn evidence(&self) -> EvidenceCode {
        self.evidence
    }

    pub fn biocurations(&self) -> &[Biocuration] {
        &self.biocurations
    }

    pub fn database(&self) -> Option<Database> {
        Database::from_prefix(self.disease_id.prefix())
    }

    pub fn is_omim(&self) -> bool {
        self.database() == Some(Database::Omim)
    }

    /// The canonical curation date of the record: the oldest biocuration
    /// date. Most records carry a single stamp; some carry several.
    pub fn curation_date(&self) -> NaiveDate {
        self.biocurations
            .iter()
            .map(|biocuration| biocuration.date)
            .min()
            .unwrap_or_else(distant_past)
    }

    pub fn biocuration_string(&self) -> String {
        self.biocurations
            .iter()
            .map(Biocuration::to_string)
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl Display for HpoaAnnotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.disease_id,
            self.disease_name,
            self.phenotype_id,
            self.negated_label(),
            self.biocuration_string()
        )
    }
}

/// Parse the annotation corpus from a reader.
///
/// A row with the wrong field count fails the entire load; row-level
/// anomalies (unknown database prefix) go to the issue sink and the row is
/// kept.
pub fn parse_hpoa_read<R>(read: R, sink: &mut dyn IssueSink) -> Result<Vec<HpoaAnnotation>>
where
    R: Read,
{
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .has_headers(false)
        .flexible(true)
        .from_reader(read);

    let mut annotations = Vec::new();
    for (nth, record) in reader.records().enumerate() {
        let record = record?;
        let row = record
            .position()
            .map(|position| position.line())
            .unwrap_or(nth as u64 + 1);
        annotations.push(HpoaAnnotation::from_record(&record, row, sink)?);
    }
    Ok(annotations)
}

/// Parse the annotation corpus from a file path.
pub fn parse_hpoa_path<P>(path: P, sink: &mut dyn IssueSink) -> Result<Vec<HpoaAnnotation>>
where
    P: AsRef<Path>,
{
    parse_hpoa_read(File::open(path)?, sink)
}

#[cfg(test)]
mod test_hpoa {
    use super::*;

    fn row(fields: &[&str]) -> String {
        fields.join("\t")
    }

    fn omim_row(biocuration: &str) -> String {
        row(&[
            "OMIM:154700",
            "Marfan syndrome",
            "",
            "HP:0001166",
            "",
            "TAS",
            "",
            "",
            "",
            "",
            "",
            biocuration,
        ])
    }

    #[test]
    fn parse_single_row() {
        let payload = format!(
            "#disease-db comment line\n{}\n",
            omim_row("HPO:probinson[2009-02-17]")
        );
        let mut issues = Vec::new();
        let annotations = parse_hpoa_read(payload.as_bytes(), &mut issues).unwrap();

        assert_eq!(annotations.len(), 1);
        let ann = &annotations[0];
        assert_eq!(ann.disease_id(), ("OMIM", "154700"));
        assert_eq!(ann.disease_name(), "Marfan syndrome");
        assert!(!ann.is_negated());
        assert_eq!(ann.phenotype_id(), ("HP", "0001166"));
        assert_eq!(ann.evidence(), EvidenceCode::Tas);
        assert_eq!(
            ann.curation_date(),
            NaiveDate::from_ymd_opt(2009, 2, 17).unwrap()
        );
        assert!(ann.is_omim());
        assert!(issues.is_empty());
    }

    #[test]
    fn wrong_field_count_fails_the_load() {
        let payload = row(&[
            "OMIM:154700",
            "Marfan syndrome",
            "",
            "HP:0001166",
            "",
            "TAS",
            "",
            "",
            "",
            "",
            "HPO:probinson[2009-02-17]",
        ]);
        let mut issues = Vec::new();
        let outcome = parse_hpoa_read(payload.as_bytes(), &mut issues);

        assert!(matches!(
            outcome,
            Err(PhenographError::MalformedAnnotationRow { row: 1, fields: 11 })
        ));
    }

    #[test]
    fn oldest_biocuration_date_wins() {
        let payload = omim_row("HPO:user[2017-04-01];HPO:other[2015-02-02]");
        let mut issues = Vec::new();
        let annotations = parse_hpoa_read(payload.as_bytes(), &mut issues).unwrap();

        assert_eq!(
            annotations[0].curation_date(),
            NaiveDate::from_ymd_opt(2015, 2, 2).unwrap()
        );
        assert_eq!(
            annotations[0].biocuration_string(),
            "HPO:user[2017-04-01];HPO:other[2015-02-02]"
        );
    }

    #[test]
    fn biocuration_without_brackets_defaults() {
        let biocuration = Biocuration::parse("HPO:iea");
        assert_eq!(biocuration.curator, "n/a");
        assert_eq!(biocuration.date, distant_past());
    }

    #[test]
    fn unknown_evidence_defaults_to_iea() {
        let payload = row(&[
            "OMIM:154700",
            "Marfan syndrome",
            "",
            "HP:0001166",
            "",
            "WTF",
            "",
            "",
            "",
            "",
            "",
            "HPO:probinson[2009-02-17]",
        ]);
        let mut issues = Vec::new();
        let annotations = parse_hpoa_read(payload.as_bytes(), &mut issues).unwrap();
        assert_eq!(annotations[0].evidence(), EvidenceCode::Iea);
    }

    #[test]
    fn unknown_database_prefix_warns_but_keeps_the_row() {
        let payload = row(&[
            "MIM:154700",
            "Marfan syndrome",
            "",
            "HP:0001166",
            "",
            "TAS",
            "",
            "",
            "",
            "",
            "",
            "HPO:probinson[2009-02-17]",
        ]);
        let mut issues = Vec::new();
        let annotations = parse_hpoa_read(payload.as_bytes(), &mut issues).unwrap();

        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].database(), None);
        assert!(issues.iter().any(|issue| issue.code == "unknown_database"));
    }

    #[test]
    fn negated_flag() {
        let payload = row(&[
            "OMIM:154700",
            "Marfan syndrome",
            "NOT",
            "HP:0001166",
            "",
            "TAS",
            "",
            "",
            "",
            "",
            "",
            "HPO:probinson[2009-02-17]",
        ]);
        let mut issues = Vec::new();
        let annotations = parse_hpoa_read(payload.as_bytes(), &mut issues).unwrap();
        assert!(annotations[0].is_negated());
        assert_eq!(annotations[0].negated_label(), "NOT");
    }
}

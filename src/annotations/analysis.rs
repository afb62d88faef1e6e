//! Temporal and hierarchical analyses over the annotation corpus.

use std::collections::{BTreeMap, HashSet};
use std::io::Write;

use tracing::warn;

use crate::annotations::date::DateWindow;
use crate::annotations::hpoa::{Database, HpoaAnnotation};
use crate::error::{IssueSink, ParseIssue, PhenographError, Result};
use crate::ontology::{CsrOntology, Index, TopLevelCategorizer};
use crate::term_id::TermId;

/// Counters reported by the descendants analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescendantsSummary {
    /// OMIM annotations to terms descending from the target.
    pub total: usize,
    /// The subset whose curation date falls into the window.
    pub in_window: usize,
}

/// Counters reported by the top-level categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToplevelSummary {
    pub total: usize,
    pub in_window: usize,
    pub categorized: usize,
}

/// Joins a loaded annotation corpus to an ontology handle.
///
/// Both analyses stream through the annotations in input order; the output
/// ordering matches the input ordering. The output stream is owned by the
/// caller.
pub struct AnnotationAnalysis<'a, I>
where
    I: Index,
{
    ontology: &'a CsrOntology<I>,
    annotations: &'a [HpoaAnnotation],
    window: DateWindow,
}

impl<'a, I> AnnotationAnalysis<'a, I>
where
    I: Index,
{
    pub fn new(
        ontology: &'a CsrOntology<I>,
        annotations: &'a [HpoaAnnotation],
        window: DateWindow,
    ) -> Self {
        AnnotationAnalysis {
            ontology,
            annotations,
            window,
        }
    }

    /// Run whichever analysis the configuration selects: a target term means
    /// the descendants analysis, otherwise a top-level root must be given.
    pub fn run<W>(
        &self,
        target: Option<&TermId>,
        toplevel_root: Option<&TermId>,
        out: &mut W,
        sink: &mut dyn IssueSink,
    ) -> Result<()>
    where
        W: Write,
    {
        match (target, toplevel_root) {
            (Some(target), _) => {
                self.write_descendants_of(target, out)?;
            }
            (None, Some(root)) => {
                let categorizer = TopLevelCategorizer::new(self.ontology, root)?;
                self.write_toplevel_categories(&categorizer, out, sink)?;
            }
            (None, None) => return Err(PhenographError::MissingTarget),
        }
        Ok(())
    }

    /// Report the OMIM annotations attached to descendants of `target`,
    /// printing those curated inside the window.
    pub fn write_descendants_of<W>(
        &self,
        target: &TermId,
        out: &mut W,
    ) -> Result<DescendantsSummary>
    where
        W: Write,
    {
        let term = self
            .ontology
            .term_by_id(target)
            .ok_or_else(|| PhenographError::UnknownTermId(target.clone()))?;

        writeln!(out, "#{} ({})", target, term.label())?;

        let mut summary = DescendantsSummary {
            total: 0,
            in_window: 0,
        };
        for annotation in self.annotations {
            if !annotation.is_omim() {
                continue;
            }
            if !self.ontology.exists_path(annotation.phenotype_id(), target) {
                continue;
            }
            summary.total += 1;
            if self.window.contains(annotation.curation_date()) {
                summary.in_window += 1;
                writeln!(out, "{annotation}")?;
            }
        }

        writeln!(
            out,
            "#total annotations to terms descending from {}:{}",
            term.label(),
            summary.total
        )?;
        writeln!(
            out,
            "#total annotations newer than {}:{}",
            self.window.lower(),
            summary.in_window
        )?;
        Ok(summary)
    }

    /// Pair each in-window OMIM annotation with its top-level category.
    ///
    /// Annotations to unknown terms and terms without a resolvable category
    /// are reported to the sink and skipped.
    pub fn write_toplevel_categories<W>(
        &self,
        categorizer: &TopLevelCategorizer<'_, I>,
        out: &mut W,
        sink: &mut dyn IssueSink,
    ) -> Result<ToplevelSummary>
    where
        W: Write,
    {
        let mut summary = ToplevelSummary {
            total: 0,
            in_window: 0,
            categorized: 0,
        };
        for annotation in self.annotations {
            if !annotation.is_omim() {
                continue;
            }
            let phenotype_id = annotation.phenotype_id();
            if self.ontology.term_by_id(phenotype_id).is_none() {
                sink.report(ParseIssue::error(
                    "unknown_term",
                    format!("could not retrieve term for id: {phenotype_id}"),
                ));
                continue;
            }
            summary.total += 1;
            if !self.window.contains(annotation.curation_date()) {
                continue;
            }
            summary.in_window += 1;
            match categorizer.categorize(phenotype_id) {
                Some(category) => {
                    summary.categorized += 1;
                    writeln!(out, "{phenotype_id}\t{category}")?;
                }
                None => sink.report(ParseIssue::error(
                    "unresolved_toplevel",
                    format!("could not identify top-level id for {phenotype_id}"),
                )),
            }
        }
        Ok(summary)
    }

    /// Write counts of annotation sources by database and evidence code.
    ///
    /// This is a pure aggregation over the corpus; the ontology plays no
    /// role.
    pub fn write_statistics<W>(&self, out: &mut W) -> std::io::Result<()>
    where
        W: Write,
    {
        let mut tallies: BTreeMap<Database, DatabaseTally> = BTreeMap::new();
        let mut total_terms: HashSet<&TermId> = HashSet::new();

        for annotation in self.annotations {
            match annotation.database() {
                Some(database) => {
                    let tally = tallies.entry(database).or_default();
                    *tally
                        .evidence_counts
                        .entry(annotation.evidence().as_str())
                        .or_insert(0) += 1;
                    tally.terms.insert(annotation.phenotype_id());
                    total_terms.insert(annotation.phenotype_id());
                }
                None => warn!(
                    "malformed database prefix: {}",
                    annotation.disease_id().prefix()
                ),
            }
        }

        for (database, tally) in &tallies {
            let denominator: usize = tally.evidence_counts.values().sum();
            for (evidence, count) in &tally.evidence_counts {
                let percent = 100.0 * *count as f64 / denominator as f64;
                writeln!(out, "{database}/{evidence}: {count} ({percent:.1}%)")?;
            }
            writeln!(out, "{database} (total): {denominator}")?;
        }
        writeln!(out, "Total annotations: {}", self.annotations.len())?;
        writeln!(out, "HPO terms used for annotations:")?;
        for (database, tally) in &tallies {
            writeln!(out, "{database}: n={}", tally.terms.len())?;
        }
        writeln!(out, "Total: n={}", total_terms.len())?;
        Ok(())
    }
}

#[derive(Default)]
struct DatabaseTally<'a> {
    evidence_counts: BTreeMap<&'static str, usize>,
    terms: HashSet<&'a TermId>,
}

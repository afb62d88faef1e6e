//! The CSR-backed implementation of the ontology graph.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use tracing::{info, warn};

use crate::error::{ParseIssue, PhenographError, Result};
use crate::io::OntologyData;
use crate::ontology::Index;
use crate::predicate::{EdgeType, PredicateValue};
use crate::property::PropertyKind;
use crate::term::Term;
use crate::term_id::TermId;

/// An ontology backed by a term arena and a CSR adjacency matrix.
///
/// The arena keeps the *current* terms first, sorted by term id; their
/// positions are the graph vertex indices. Obsolete terms follow and are
/// reachable through lookups only, never through edges. `term_id_to_idx`
/// resolves primary and alternative ids of every term to its arena slot, so
/// the single owned `Term` is shared by all of its ids.
///
/// Once constructed the ontology is frozen: every query takes `&self`, holds
/// no locks, and is safe to call from concurrent readers.
pub struct CsrOntology<I>
where
    I: Index,
{
    ontology_id: Option<String>,
    terms: Box<[Term]>,
    term_id_to_idx: HashMap<TermId, I>,
    current_count: usize,
    /// Out-edges of vertex `v` occupy `adjacent[offsets[v]..offsets[v + 1]]`.
    offsets: Box<[usize]>,
    adjacent: Box<[I]>,
    edge_types: Box<[EdgeType]>,
    predicate_values: Vec<PredicateValue>,
    properties: Vec<PropertyKind>,
    issues: Vec<ParseIssue>,
    original_edge_count: usize,
    is_a_edge_count: usize,
    skipped_edge_count: usize,
}

/// The index type is comfortable for any ontology that fits in memory.
pub type DefaultCsrOntology = CsrOntology<u32>;

impl<I> CsrOntology<I>
where
    I: Index,
{
    /// Assemble an ontology from parsed data.
    ///
    /// Under `lenient` edge discipline, an edge whose endpoint does not
    /// resolve to a current term is dropped and counted; under strict
    /// discipline it fails the assembly with
    /// [`PhenographError::InvalidEdge`].
    pub fn from_data(data: OntologyData, lenient: bool) -> Result<Self> {
        let OntologyData {
            ontology_id,
            terms,
            edges,
            predicate_values,
            properties,
            issues,
        } = data;

        let (mut current, obsolete): (Vec<_>, Vec<_>) =
            terms.into_iter().partition(Term::is_current);
        current.sort_unstable_by(|a, b| a.id().cmp(b.id()));
        let current_count = current.len();

        let mut arena = current;
        arena.extend(obsolete);
        let terms = arena.into_boxed_slice();

        let mut term_id_to_idx = HashMap::with_capacity(terms.len());
        for (idx, term) in terms.iter().enumerate() {
            term_id_to_idx.insert(term.id().clone(), I::new(idx));
        }
        // Aliases must not shadow a primary id.
        for (idx, term) in terms.iter().enumerate() {
            for alt in term.alternative_ids() {
                term_id_to_idx.entry(alt.clone()).or_insert_with(|| I::new(idx));
            }
        }

        let resolve = |id: &TermId| -> Option<usize> {
            term_id_to_idx
                .get(id)
                .map(|idx| idx.index())
                .filter(|&idx| idx < current_count)
        };

        let original_edge_count = edges.len();
        let mut is_a_edge_count = 0;
        let mut skipped_edge_count = 0;
        let mut indexed: Vec<(usize, usize, EdgeType)> = Vec::with_capacity(2 * edges.len());

        for edge in &edges {
            match (resolve(&edge.source), resolve(&edge.destination)) {
                (Some(src), Some(dst)) => {
                    indexed.push((src, dst, edge.edge_type));
                    if edge.edge_type.is_is_a() {
                        is_a_edge_count += 1;
                        // synthesize the inverse; no other predicate is inverted
                        indexed.push((dst, src, EdgeType::IsAInverse));
                    }
                }
                _ => {
                    skipped_edge_count += 1;
                    if !lenient {
                        return Err(PhenographError::InvalidEdge(edge.to_string()));
                    }
                }
            }
        }

        indexed.sort_unstable_by_key(|&(src, dst, _)| (src, dst));

        let mut offsets = vec![0usize; current_count + 1];
        for &(src, _, _) in &indexed {
            offsets[src + 1] += 1;
        }
        for v in 0..current_count {
            offsets[v + 1] += offsets[v];
        }
        let adjacent: Box<[I]> = indexed.iter().map(|&(_, dst, _)| I::new(dst)).collect();
        let edge_types: Box<[EdgeType]> = indexed.iter().map(|&(_, _, et)| et).collect();

        info!(
            terms = current_count,
            edges = original_edge_count,
            supplemented = adjacent.len(),
            "assembled ontology graph"
        );
        if skipped_edge_count > 0 {
            warn!("skipped {skipped_edge_count} edges with unresolvable endpoints");
        }

        Ok(Self {
            ontology_id,
            terms,
            term_id_to_idx,
            current_count,
            offsets: offsets.into_boxed_slice(),
            adjacent,
            edge_types,
            predicate_values,
            properties,
            issues,
            original_edge_count,
            is_a_edge_count,
            skipped_edge_count,
        })
    }

    /// The arena index of `id`, whether current or obsolete.
    fn index_of(&self, id: &TermId) -> Option<usize> {
        self.term_id_to_idx.get(id).map(|idx| idx.index())
    }

    /// The vertex index of `id`; `None` for obsolete and unknown ids.
    fn vertex_of(&self, id: &TermId) -> Option<usize> {
        self.index_of(id).filter(|&idx| idx < self.current_count)
    }

    /// The out-edges of vertex `v` as `(destination, edge type)` pairs.
    fn out_edges(&self, v: usize) -> impl Iterator<Item = (usize, EdgeType)> + '_ {
        let span = self.offsets[v]..self.offsets[v + 1];
        self.adjacent[span.clone()]
            .iter()
            .map(|idx| idx.index())
            .zip(self.edge_types[span].iter().copied())
    }

    /// Get the term for `id`.
    ///
    /// Alternative ids resolve to the primary term; unknown ids yield `None`.
    pub fn term_by_id(&self, id: &TermId) -> Option<&Term> {
        self.index_of(id).map(|idx| &self.terms[idx])
    }

    /// Get the primary term id for any (primary or alternative) id.
    pub fn primary_term_id(&self, id: &TermId) -> Option<&TermId> {
        self.term_by_id(id).map(Term::id)
    }

    pub fn current_term_count(&self) -> usize {
        self.current_count
    }

    /// The number of ids that resolve to a term, including obsolete primary
    /// ids and alternative ids.
    pub fn total_term_id_count(&self) -> usize {
        self.term_id_to_idx.len()
    }

    /// Iterate the current terms in term-id order.
    pub fn iter_current_terms(&self) -> impl Iterator<Item = &Term> {
        self.terms[..self.current_count].iter()
    }

    /// Iterate the current term ids in order.
    pub fn iter_current_term_ids(&self) -> impl Iterator<Item = &TermId> {
        self.iter_current_terms().map(Term::id)
    }

    /// The direct neighbors of `id` along edges of the given type.
    ///
    /// An unknown or obsolete `id` yields an empty list.
    pub fn parents_of(&self, id: &TermId, edge_type: EdgeType) -> Vec<&TermId> {
        match self.vertex_of(id) {
            Some(v) => self
                .out_edges(v)
                .filter(|&(_, et)| et == edge_type)
                .map(|(dst, _)| self.terms[dst].id())
                .collect(),
            None => Vec::new(),
        }
    }

    /// The direct `is_a` parents of `id`.
    pub fn isa_parents_of(&self, id: &TermId) -> Vec<&TermId> {
        self.parents_of(id, EdgeType::IsA)
    }

    /// The direct `is_a` children of `id`.
    pub fn children_of(&self, id: &TermId) -> Vec<&TermId> {
        self.parents_of(id, EdgeType::IsAInverse)
    }

    /// Test whether a path of `is_a` edges leads from `source` to
    /// `destination`.
    pub fn exists_path(&self, source: &TermId, destination: &TermId) -> bool {
        self.exists_path_with(source, destination, EdgeType::IsA)
    }

    /// Test whether a path of edges of the given type leads from `source` to
    /// `destination`. Unknown endpoints yield `false`.
    pub fn exists_path_with(
        &self,
        source: &TermId,
        destination: &TermId,
        edge_type: EdgeType,
    ) -> bool {
        let (src, dst) = match (self.vertex_of(source), self.vertex_of(destination)) {
            (Some(src), Some(dst)) => (src, dst),
            _ => return false,
        };

        let mut stack = vec![src];
        let mut visited = HashSet::new();
        while let Some(v) = stack.pop() {
            for (next, et) in self.out_edges(v) {
                if et != edge_type {
                    continue;
                }
                if next == dst {
                    return true;
                }
                if visited.insert(next) {
                    stack.push(next);
                }
            }
        }
        false
    }

    /// The set of ids reachable from `id` along edges of the given type,
    /// including `id` itself.
    ///
    /// Unlike the other queries, this raises on an unknown id because it is
    /// used as a building block.
    pub fn ancestors_of(&self, id: &TermId, edge_type: EdgeType) -> Result<HashSet<&TermId>> {
        let start = self
            .vertex_of(id)
            .ok_or_else(|| PhenographError::UnknownTermId(id.clone()))?;

        let mut visited = HashSet::from([start]);
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            for (next, et) in self.out_edges(v) {
                if et == edge_type && visited.insert(next) {
                    stack.push(next);
                }
            }
        }
        Ok(visited.into_iter().map(|v| self.terms[v].id()).collect())
    }

    /// The `is_a` ancestors of `id`, including `id` itself.
    pub fn isa_ancestors_of(&self, id: &TermId) -> Result<HashSet<&TermId>> {
        self.ancestors_of(id, EdgeType::IsA)
    }

    /// All current ids whose `is_a` path reaches `id`, including `id` itself.
    ///
    /// Implemented as a traversal of the synthesized inverse edges, so the
    /// cost is proportional to the descendant count rather than to the term
    /// count. An unknown id yields an empty list.
    pub fn descendants_of(&self, id: &TermId) -> Vec<&TermId> {
        let start = match self.vertex_of(id) {
            Some(v) => v,
            None => return Vec::new(),
        };

        let mut visited = HashSet::from([start]);
        let mut stack = vec![start];
        let mut descendants = vec![self.terms[start].id()];
        while let Some(v) = stack.pop() {
            for (next, et) in self.out_edges(v) {
                if et == EdgeType::IsAInverse && visited.insert(next) {
                    descendants.push(self.terms[next].id());
                    stack.push(next);
                }
            }
        }
        descendants
    }

    /// Test whether `t1` and `t2` share an ancestor below `root`.
    ///
    /// The ancestor set of `t1` is collected first (with `root` excluded),
    /// then a second traversal from `t2` stops at `root` and succeeds on the
    /// first vertex found in the set. If either term *is* the root, there is
    /// no non-root common ancestor by definition.
    pub fn have_common_ancestor(&self, t1: &TermId, t2: &TermId, root: &TermId) -> Result<bool> {
        if t1 == root || t2 == root {
            return Ok(false);
        }
        let unknown = |id: &TermId| PhenographError::UnknownTermId(id.clone());
        let t1_idx = self.vertex_of(t1).ok_or_else(|| unknown(t1))?;
        let t2_idx = self.vertex_of(t2).ok_or_else(|| unknown(t2))?;
        let root_idx = self.vertex_of(root).ok_or_else(|| unknown(root))?;

        let mut t1_ancestors = HashSet::from([t1_idx]);
        let mut stack = vec![t1_idx];
        while let Some(v) = stack.pop() {
            for (next, et) in self.out_edges(v) {
                if et == EdgeType::IsA && next != root_idx && t1_ancestors.insert(next) {
                    stack.push(next);
                }
            }
        }

        let mut visited = HashSet::from([t2_idx]);
        let mut stack = vec![t2_idx];
        while let Some(v) = stack.pop() {
            if t1_ancestors.contains(&v) {
                return Ok(true);
            }
            for (next, et) in self.out_edges(v) {
                if et == EdgeType::IsA && next != root_idx && visited.insert(next) {
                    stack.push(next);
                }
            }
        }
        Ok(false)
    }

    pub fn ontology_id(&self) -> Option<&str> {
        self.ontology_id.as_deref()
    }

    /// Ontology-level property assertions.
    pub fn predicate_values(&self) -> &[PredicateValue] {
        &self.predicate_values
    }

    /// Annotation properties defined by the document.
    pub fn properties(&self) -> &[PropertyKind] {
        &self.properties
    }

    /// Non-fatal problems reported during the parse.
    pub fn parse_issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// The number of edges in the input document.
    pub fn original_edge_count(&self) -> usize {
        self.original_edge_count
    }

    /// The number of stored edges, including the synthesized inverses.
    pub fn edge_count_with_supplemental(&self) -> usize {
        self.adjacent.len()
    }

    pub fn is_a_edge_count(&self) -> usize {
        self.is_a_edge_count
    }

    pub fn skipped_edge_count(&self) -> usize {
        self.skipped_edge_count
    }

    /// Write basic descriptive statistics about the ontology.
    pub fn write_statistics<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "id: {}", self.ontology_id().unwrap_or("n/a"))?;
        for pv in &self.predicate_values {
            writeln!(out, "{pv}")?;
        }
        writeln!(out, "current term count: {}", self.current_term_count())?;
        writeln!(
            out,
            "term id count (including obsolete/alternative term ids): {}",
            self.total_term_id_count()
        )?;
        writeln!(out, "is_a edge count: {}", self.is_a_edge_count())?;
        writeln!(
            out,
            "total original edge count: {}",
            self.original_edge_count()
        )?;
        writeln!(
            out,
            "edge count with supplemental edges: {}",
            self.edge_count_with_supplemental()
        )?;
        writeln!(out, "skipped edge count: {}", self.skipped_edge_count())?;
        writeln!(out, "property count: {}", self.properties.len())?;
        for property in &self.properties {
            writeln!(out, "{property}")?;
        }
        Ok(())
    }
}

/// `CsrOntology` can be built from [`OntologyData`] with the default lenient
/// edge discipline.
impl<I> TryFrom<OntologyData> for CsrOntology<I>
where
    I: Index,
{
    type Error = PhenographError;

    fn try_from(data: OntologyData) -> Result<Self> {
        CsrOntology::from_data(data, true)
    }
}

/// Assigns terms to the coarsest classification buckets of an ontology.
///
/// The buckets are the direct `is_a` children of the configured root, kept in
/// vertex-index order; when a term descends from several buckets, the first
/// one in that order wins. The list is built once at startup.
pub struct TopLevelCategorizer<'o, I>
where
    I: Index,
{
    ontology: &'o CsrOntology<I>,
    categories: Vec<TermId>,
}

impl<'o, I> TopLevelCategorizer<'o, I>
where
    I: Index,
{
    /// Capture the direct children of `root` as the category list.
    pub fn new(ontology: &'o CsrOntology<I>, root: &TermId) -> Result<Self> {
        if ontology.vertex_of(root).is_none() {
            return Err(PhenographError::UnknownTermId(root.clone()));
        }
        let categories = ontology
            .children_of(root)
            .into_iter()
            .cloned()
            .collect();
        Ok(TopLevelCategorizer {
            ontology,
            categories,
        })
    }

    pub fn categories(&self) -> &[TermId] {
        &self.categories
    }

    /// The first category that `query` equals or descends from.
    pub fn categorize(&self, query: &TermId) -> Option<&TermId> {
        let query_idx = self.ontology.vertex_of(query)?;
        self.categories.iter().find(|category| {
            self.ontology.vertex_of(category) == Some(query_idx)
                || self.ontology.exists_path(query, category)
        })
    }
}

//! Load ontology data from the OBO-graph JSON format.
//!
//! The serde model below covers the subtree of the format the crate consumes:
//! `graphs[0]` with its `nodes`, `edges`, and graph-level
//! `meta.basicPropertyValues`. Only the first graph of a document is
//! processed.

use std::io::BufRead;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{IssueSink, ParseIssue, PhenographError, Result};
use crate::io::{Edge, OntologyData, OntologyDataParser, OntologyLoaderBuilder, Uninitialized, WithParser};
use crate::predicate::{pred_key, EdgeType, Predicate, PredicateValue};
use crate::property::PropertyKind;
use crate::term::{Definition, Synonym, SynonymType, Term};
use crate::term_id::TermId;

#[derive(Debug, Deserialize)]
struct GraphDocument {
    #[serde(default)]
    graphs: Vec<Graph>,
}

#[derive(Debug, Deserialize)]
struct Graph {
    id: Option<String>,
    meta: Option<GraphMeta>,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
struct GraphMeta {
    #[serde(rename = "basicPropertyValues", default)]
    basic_property_values: Vec<RawPropertyValue>,
}

#[derive(Debug, Deserialize)]
struct Node {
    id: Option<String>,
    #[serde(rename = "type")]
    node_type: Option<String>,
    lbl: Option<String>,
    meta: Option<NodeMeta>,
}

#[derive(Debug, Deserialize, Default)]
struct NodeMeta {
    definition: Option<RawDefinition>,
    #[serde(default)]
    xrefs: Vec<RawXref>,
    #[serde(default)]
    synonyms: Vec<RawSynonym>,
    #[serde(rename = "basicPropertyValues", default)]
    basic_property_values: Vec<RawPropertyValue>,
    #[serde(default)]
    deprecated: bool,
}

#[derive(Debug, Deserialize)]
struct RawDefinition {
    val: Option<String>,
    #[serde(default)]
    xrefs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawXref {
    val: String,
}

#[derive(Debug, Deserialize)]
struct RawSynonym {
    pred: String,
    val: String,
}

#[derive(Debug, Deserialize)]
struct RawPropertyValue {
    pred: String,
    val: String,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    sub: String,
    pred: String,
    obj: String,
}

/// Parser of OBO-graph JSON documents.
///
/// Per-node problems (a node without a label, an unparsable cross-reference)
/// are recorded as issues and the offending element is skipped. Structural
/// problems and edges with predicates outside the registry abort the load.
#[derive(Default)]
pub struct ObographsParser;

impl ObographsParser {
    pub fn new() -> Self {
        ObographsParser
    }

    fn parse_graph(&self, graph: Graph) -> Result<OntologyData> {
        let mut issues: Vec<ParseIssue> = Vec::new();
        let mut terms = Vec::new();
        let mut properties = Vec::new();

        for node in graph.nodes {
            match node.node_type.as_deref() {
                Some("CLASS") => {
                    if let Some(term) = parse_class(node, &mut issues) {
                        terms.push(term);
                    }
                }
                Some("PROPERTY") => {
                    if let Some(property) = parse_property(&node) {
                        properties.push(property);
                    } else {
                        issues.report(ParseIssue::warn(
                            "unknown_property",
                            format!("property node {:?} not in registry", node.id),
                        ));
                    }
                }
                _ => issues.report(ParseIssue::warn(
                    "unsupported_node_type",
                    format!("skipping node {:?} of type {:?}", node.id, node.node_type),
                )),
            }
        }

        let mut edges = Vec::with_capacity(graph.edges.len());
        for raw in graph.edges {
            let key = pred_key(&raw.pred);
            let edge_type = EdgeType::from_key(key)
                .ok_or_else(|| PhenographError::UnknownPredicate(raw.pred.clone()))?;
            let source = match TermId::from_url(&raw.sub) {
                Ok(term_id) => term_id,
                Err(e) => {
                    issues.report(ParseIssue::error("malformed_edge_endpoint", e.to_string()));
                    continue;
                }
            };
            let destination = match TermId::from_url(&raw.obj) {
                Ok(term_id) => term_id,
                Err(e) => {
                    issues.report(ParseIssue::error("malformed_edge_endpoint", e.to_string()));
                    continue;
                }
            };
            edges.push(Edge::new(source, edge_type, destination));
        }

        let predicate_values = graph
            .meta
            .map(|meta| meta.basic_property_values)
            .unwrap_or_default()
            .into_iter()
            .map(|rpv| PredicateValue::new(Predicate::from_key(pred_key(&rpv.pred)), rpv.val))
            .collect();

        debug!(
            terms = terms.len(),
            edges = edges.len(),
            issues = issues.len(),
            "parsed ontology graph"
        );

        Ok(OntologyData {
            ontology_id: graph.id,
            terms,
            edges,
            predicate_values,
            properties,
            issues,
        })
    }
}

fn parse_class(node: Node, issues: &mut Vec<ParseIssue>) -> Option<Term> {
    let raw_id = match node.id {
        Some(raw_id) => raw_id,
        None => {
            issues.report(ParseIssue::error("node_missing_id", "class node without id"));
            return None;
        }
    };
    let term_id: TermId = match raw_id.parse() {
        Ok(term_id) => term_id,
        Err(e) => {
            issues.report(ParseIssue::error("malformed_node_id", e.to_string()));
            return None;
        }
    };
    let label = match node.lbl {
        Some(label) if !label.is_empty() => label,
        _ => {
            issues.report(ParseIssue::error(
                "node_missing_label",
                format!("class node {term_id} without label"),
            ));
            return None;
        }
    };

    let mut term = Term::new(term_id, label);
    let meta = match node.meta {
        Some(meta) => meta,
        None => return Some(term),
    };

    term.set_obsolete(meta.deprecated);

    if let Some(raw) = meta.definition {
        if let Some(text) = raw.val {
            let mut xrefs = Vec::with_capacity(raw.xrefs.len());
            for xref in raw.xrefs {
                // xrefs in definitions are plain CURIEs
                match xref.parse() {
                    Ok(term_id) => xrefs.push(term_id),
                    Err(_) => issues.report(ParseIssue::warn(
                        "malformed_definition_xref",
                        format!("{}: {xref}", term.id()),
                    )),
                }
            }
            term.set_definition(Definition { text, xrefs });
        }
    }

    for xref in meta.xrefs {
        match xref.val.parse() {
            Ok(term_id) => term.add_xref(term_id),
            Err(_) => issues.report(ParseIssue::warn(
                "malformed_term_xref",
                format!("{}: {}", term.id(), xref.val),
            )),
        }
    }

    for synonym in meta.synonyms {
        match SynonymType::from_key(pred_key(&synonym.pred)) {
            Some(synonym_type) => term.add_synonym(Synonym {
                label: synonym.val,
                synonym_type,
            }),
            None => {
                warn!("could not determine synonym type for {}", synonym.pred);
                issues.report(ParseIssue::warn("unknown_synonym_type", synonym.pred));
            }
        }
    }

    for bpv in meta.basic_property_values {
        let predicate = Predicate::from_key(pred_key(&bpv.pred));
        if let Err(e) = term.add_predicate_value(PredicateValue::new(predicate, bpv.val)) {
            issues.report(ParseIssue::warn(
                "malformed_alternative_id",
                format!("{}: {e}", term.id()),
            ));
        }
    }

    Some(term)
}

fn parse_property(node: &Node) -> Option<PropertyKind> {
    if let Some(id) = &node.id {
        if let Some(property) = PropertyKind::from_key(pred_key(id)) {
            return Some(property);
        }
    }
    node.lbl.as_deref().and_then(PropertyKind::from_key)
}

impl OntologyDataParser for ObographsParser {
    fn load_from_buf_read<R>(&self, read: R) -> Result<OntologyData>
    where
        R: BufRead,
    {
        let mut document: GraphDocument = serde_json::from_reader(read)
            .map_err(|e| PhenographError::MalformedDocument(e.to_string()))?;
        if document.graphs.is_empty() {
            return Err(PhenographError::MalformedDocument(
                "document contains no `graphs` element".into(),
            ));
        }
        // Only the first graph carries the ontology.
        self.parse_graph(document.graphs.swap_remove(0))
    }
}

/// Add a convenience function for using [`ObographsParser`] to
/// [`OntologyLoaderBuilder`].
impl OntologyLoaderBuilder<Uninitialized> {
    /// Configure the loader for OBO-graph JSON input.
    ///
    /// ```
    /// use phenograph::io::OntologyLoaderBuilder;
    ///
    /// let loader = OntologyLoaderBuilder::new()
    ///                 .obographs_parser()
    ///                 .build();
    /// ```
    #[must_use]
    pub fn obographs_parser(self) -> OntologyLoaderBuilder<WithParser<ObographsParser>> {
        self.parser(ObographsParser::new())
    }
}

#[cfg(test)]
mod test_obographs {
    use super::*;

    fn parse(payload: &str) -> Result<OntologyData> {
        ObographsParser::new().load_from_buf_read(payload.as_bytes())
    }

    const TINY: &str = r#"{
      "graphs": [{
        "id": "http://purl.obolibrary.org/obo/hp.json",
        "meta": {
          "basicPropertyValues": [
            {"pred": "http://purl.org/dc/elements/1.1/creator",
             "val": "Human Phenotype Ontology Consortium"}
          ]
        },
        "nodes": [
          {"id": "http://purl.obolibrary.org/obo/HP_0000001", "type": "CLASS", "lbl": "All"},
          {
            "id": "http://purl.obolibrary.org/obo/HP_0001166",
            "type": "CLASS",
            "lbl": "Arachnodactyly",
            "meta": {
              "definition": {
                "val": "Abnormally long and slender fingers.",
                "xrefs": ["HP:0001166"]
              },
              "xrefs": [{"val": "UMLS:C0003706"}],
              "synonyms": [
                {"pred": "hasExactSynonym", "val": "Spider fingers"},
                {"pred": "hasFunkySynonym", "val": "Nope"}
              ],
              "basicPropertyValues": [
                {"pred": "http://www.geneontology.org/formats/oboInOwl#hasAlternativeId",
                 "val": "HP:0001505"},
                {"pred": "http://www.geneontology.org/formats/oboInOwl#created_by",
                 "val": "doelleman"}
              ]
            }
          },
          {
            "id": "http://purl.obolibrary.org/obo/HP_0000489",
            "type": "CLASS",
            "lbl": "Abnormality of globe location",
            "meta": {"deprecated": true}
          },
          {"id": "http://purl.obolibrary.org/obo/HP_0045076", "type": "PROPERTY", "lbl": "UK spelling"}
        ],
        "edges": [
          {"sub": "http://purl.obolibrary.org/obo/HP_0001166",
           "pred": "is_a",
           "obj": "http://purl.obolibrary.org/obo/HP_0000001"}
        ]
      }]
    }"#;

    #[test]
    fn parse_tiny_document() {
        let data = parse(TINY).expect("document should parse");

        assert_eq!(
            data.ontology_id.as_deref(),
            Some("http://purl.obolibrary.org/obo/hp.json")
        );
        assert_eq!(data.terms.len(), 3);
        assert_eq!(data.edges.len(), 1);
        assert_eq!(data.properties, vec![PropertyKind::UkSpelling]);
        assert_eq!(data.predicate_values.len(), 1);
        assert_eq!(data.predicate_values[0].predicate, Predicate::Creator);
    }

    #[test]
    fn class_meta_is_parsed() {
        let data = parse(TINY).unwrap();
        let term = data
            .terms
            .iter()
            .find(|t| t.id() == ("HP", "0001166"))
            .unwrap();

        assert_eq!(term.label(), "Arachnodactyly");
        assert_eq!(
            term.definition().unwrap().text,
            "Abnormally long and slender fingers."
        );
        assert_eq!(term.xrefs(), ["UMLS:C0003706".parse::<TermId>().unwrap()]);
        assert_eq!(term.alternative_ids(), ["HP:0001505".parse::<TermId>().unwrap()]);
        assert_eq!(term.synonyms().len(), 1);
        assert_eq!(term.synonyms()[0].synonym_type, SynonymType::Exact);
        // created_by stays in the generic list, the alt id does not
        assert_eq!(term.predicate_values().len(), 1);
    }

    #[test]
    fn deprecated_node_is_marked_obsolete() {
        let data = parse(TINY).unwrap();
        let term = data
            .terms
            .iter()
            .find(|t| t.id() == ("HP", "0000489"))
            .unwrap();
        assert!(term.is_obsolete());
    }

    #[test]
    fn unknown_synonym_type_is_reported_not_fatal() {
        let data = parse(TINY).unwrap();
        assert!(data
            .issues
            .iter()
            .any(|issue| issue.code == "unknown_synonym_type"));
    }

    #[test]
    fn missing_graphs_is_malformed_document() {
        let outcome = parse(r#"{"nodes": []}"#);
        assert!(matches!(
            outcome,
            Err(PhenographError::MalformedDocument(_))
        ));
    }

    #[test]
    fn non_array_nodes_is_malformed_document() {
        let outcome = parse(r#"{"graphs": [{"id": "x", "nodes": {}}]}"#);
        assert!(matches!(
            outcome,
            Err(PhenographError::MalformedDocument(_))
        ));
    }

    #[test]
    fn unknown_edge_predicate_aborts_the_load() {
        let payload = r#"{
          "graphs": [{
            "id": "x",
            "nodes": [
              {"id": "http://purl.obolibrary.org/obo/HP_1", "type": "CLASS", "lbl": "a"},
              {"id": "http://purl.obolibrary.org/obo/HP_2", "type": "CLASS", "lbl": "b"}
            ],
            "edges": [
              {"sub": "http://purl.obolibrary.org/obo/HP_1",
               "pred": "never_heard_of_it",
               "obj": "http://purl.obolibrary.org/obo/HP_2"}
            ]
          }]
        }"#;
        let outcome = parse(payload);
        assert!(matches!(
            outcome,
            Err(PhenographError::UnknownPredicate(p)) if p == "never_heard_of_it"
        ));
    }

    #[test]
    fn node_without_label_is_skipped_with_issue() {
        let payload = r#"{
          "graphs": [{
            "id": "x",
            "nodes": [{"id": "http://purl.obolibrary.org/obo/HP_1", "type": "CLASS"}]
          }]
        }"#;
        let data = parse(payload).unwrap();
        assert!(data.terms.is_empty());
        assert!(data.issues.iter().any(|i| i.code == "node_missing_label"));
    }
}

use phenograph::ontology::DefaultCsrOntology;
use phenograph::prelude::*;
use phenograph::property::PropertyKind;

const TOY_ONTOLOGY: &str = "tests/data/hp.toy.json";

fn load_toy_ontology() -> DefaultCsrOntology {
    let loader = OntologyLoaderBuilder::new().obographs_parser().build();
    loader
        .load_from_path(TOY_ONTOLOGY)
        .expect("toy ontology should be loadable")
}

fn tid(curie: &str) -> TermId {
    curie.parse().expect("test CURIE should be valid")
}

#[test]
fn load_toy_ontology_counts() {
    let ontology = load_toy_ontology();

    // 6 current terms, 1 obsolete, 1 alternative id
    assert_eq!(ontology.current_term_count(), 6);
    assert_eq!(ontology.total_term_id_count(), 8);

    // 6 input edges, 1 dangling; 5 valid is_a edges + 5 synthesized inverses
    assert_eq!(ontology.original_edge_count(), 6);
    assert_eq!(ontology.is_a_edge_count(), 5);
    assert_eq!(ontology.skipped_edge_count(), 1);
    assert_eq!(ontology.edge_count_with_supplemental(), 10);
}

#[test]
fn ontology_metadata_is_parsed() {
    let ontology = load_toy_ontology();

    assert_eq!(
        ontology.ontology_id(),
        Some("http://purl.obolibrary.org/obo/hp.toy.json")
    );
    assert_eq!(ontology.predicate_values().len(), 2);
    assert!(ontology
        .predicate_values()
        .iter()
        .any(|pv| pv.predicate == Predicate::Creator));
    assert_eq!(ontology.properties(), [PropertyKind::UkSpelling]);
}

#[test]
fn every_primary_id_resolves_to_itself() {
    let ontology = load_toy_ontology();
    for term in ontology.iter_current_terms() {
        assert_eq!(ontology.term_by_id(term.id()).unwrap().id(), term.id());
    }
}

#[test]
fn term_meta_is_attached() {
    let ontology = load_toy_ontology();
    let seizure = ontology.term_by_id(&tid("HP:0001250")).unwrap();

    assert_eq!(seizure.label(), "Seizure");
    assert!(seizure
        .definition()
        .map(|d| d.text.starts_with("A seizure"))
        .unwrap_or(false));
    assert_eq!(seizure.synonyms().len(), 1);
    assert_eq!(seizure.xrefs(), [tid("UMLS:C0036572")]);
    assert!(seizure.creation_date().is_some());
}

#[test]
fn alternative_id_resolves_to_the_primary_term() {
    let ontology = load_toy_ontology();
    let via_alias = ontology.term_by_id(&tid("HP:0009999")).unwrap();
    assert_eq!(via_alias.id(), &tid("HP:0001250"));
}

#[test]
fn obsolete_term_is_not_current() {
    let ontology = load_toy_ontology();
    let obsolete = tid("HP:0000489");

    assert!(ontology.term_by_id(&obsolete).unwrap().is_obsolete());
    assert!(!ontology.iter_current_term_ids().any(|id| id == &obsolete));
    assert!(ontology.isa_parents_of(&obsolete).is_empty());
}

#[test]
fn hierarchy_queries_on_the_toy_ontology() {
    let ontology = load_toy_ontology();
    let root = tid("HP:0000001");
    let phenotypic_abnormality = tid("HP:0000118");
    let seizure = tid("HP:0001250");
    let heart = tid("HP:0001627");

    assert!(ontology.exists_path(&seizure, &root));
    assert!(ontology.exists_path(&seizure, &phenotypic_abnormality));
    assert!(!ontology.exists_path(&phenotypic_abnormality, &seizure));
    assert!(!ontology.exists_path(&seizure, &heart));

    let descendants = ontology.descendants_of(&phenotypic_abnormality);
    assert_eq!(descendants.len(), 5);

    let ancestors = ontology.isa_ancestors_of(&seizure).unwrap();
    assert_eq!(ancestors.len(), 4);
}

#[test]
fn toy_parse_has_no_issues() {
    let ontology = load_toy_ontology();
    assert!(ontology.parse_issues().is_empty());
}

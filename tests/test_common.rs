use phenograph::common::hpo;

#[test]
fn hpo_commons_are_accessible() {
    assert_eq!(&*hpo::ALL, ("HP", "0000001"));
    assert_eq!(&*hpo::PHENOTYPIC_ABNORMALITY, ("HP", "0000118"));
    assert_eq!(&*hpo::CLINICAL_MODIFIER, ("HP", "0012823"));
}

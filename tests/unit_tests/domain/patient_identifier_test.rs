use medisync::domain::{ObjectKey, PatientIdentifier};

#[test]
fn given_output_key_when_extracting_then_token_is_first_segment() {
    let key = ObjectKey::new("patientA@example.com/output/result.json");

    let patient = PatientIdentifier::from_key(&key).unwrap();

    assert_eq!(patient.as_str(), "patientA@example.com");
}

#[test]
fn given_key_with_leading_slash_when_extracting_then_no_identifier() {
    let key = ObjectKey::new("/output/result.json");

    assert!(PatientIdentifier::from_key(&key).is_none());
}

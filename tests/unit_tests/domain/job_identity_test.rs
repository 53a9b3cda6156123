use medisync::domain::{JobIdentity, ObjectKey};

#[test]
fn given_nested_audio_key_when_deriving_then_prefix_and_name_are_parent_path() {
    let identity = JobIdentity::derive(&ObjectKey::new("patientA/input/audio1.mp3"));

    assert_eq!(identity.output_prefix, "patientA/input");
    assert_eq!(identity.job_name, "patientA/input");
}

#[test]
fn given_same_key_when_deriving_twice_then_identities_are_equal() {
    let key = ObjectKey::new("clinic-7/visits/2025-03-22.wav");

    assert_eq!(JobIdentity::derive(&key), JobIdentity::derive(&key));
}

#[test]
fn given_prefix_with_separator_edges_when_deriving_then_name_is_trimmed() {
    let identity = JobIdentity::derive(&ObjectKey::new("--patient-b/input-/rec.mp3"));

    assert_eq!(identity.output_prefix, "--patient-b/input-");
    assert_eq!(identity.job_name, "patient-b/input");
}

#[test]
fn given_root_level_key_when_deriving_then_identity_is_not_nameable() {
    let identity = JobIdentity::derive(&ObjectKey::new("audio.mp3"));

    assert_eq!(identity.output_prefix, "");
    assert!(!identity.is_nameable());
}

#[test]
fn given_different_folders_when_deriving_then_names_differ() {
    let a = JobIdentity::derive(&ObjectKey::new("a/input/x.mp3"));
    let b = JobIdentity::derive(&ObjectKey::new("b/input/x.mp3"));

    assert_ne!(a.job_name, b.job_name);
}

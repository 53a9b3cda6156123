use medisync::presentation::Environment;

#[test]
fn given_known_aliases_when_parsing_environment_then_maps_to_stage() {
    assert_eq!(
        Environment::try_from("production".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(
        Environment::try_from("DEV".to_string()),
        Ok(Environment::Local)
    );
    assert_eq!(Environment::try_from("test".to_string()), Ok(Environment::Test));
}

#[test]
fn given_unknown_stage_when_parsing_environment_then_returns_error() {
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_stage_when_resolving_settings_file_then_uses_stage_suffix() {
    assert_eq!(Environment::Prod.settings_file(), "appsettings.prod");
}

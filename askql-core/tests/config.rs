use askql_core::config::{AskqlConfig, ConfigError, ConfigProperties, ConfigValue, DefaultSecretResolver};

const APPLICATION_YAML: &str = r#"
llm:
  model: "gemini-1.5-flash"
database:
  url: "sqlite://data/askql.db"
  connect_timeout_secs: 10
logging:
  file: app.log
  console: false
"#;

#[test]
fn missing_key_is_not_found() {
    let err = AskqlConfig::empty().get::<String>("database.url").unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(key) if key == "database.url"));
}

#[test]
fn yaml_document_is_flattened() {
    let config = AskqlConfig::from_yaml_str(APPLICATION_YAML, "test").unwrap();
    assert_eq!(config.get::<String>("llm.model").unwrap(), "gemini-1.5-flash");
    assert_eq!(config.get::<String>("database.url").unwrap(), "sqlite://data/askql.db");
    assert!(!config.get::<bool>("logging.console").unwrap());
    assert_eq!(config.profile(), "test");
}

#[test]
fn dashes_underscores_and_case_are_interchangeable() {
    let config = AskqlConfig::from_yaml_str(APPLICATION_YAML, "test").unwrap();
    for spelling in [
        "database.connect-timeout-secs",
        "database.connect_timeout_secs",
        "DATABASE_CONNECT_TIMEOUT_SECS",
    ] {
        assert_eq!(config.get::<u64>(spelling).unwrap(), 10, "{spelling}");
        assert!(config.contains_key(spelling));
    }
}

#[test]
fn set_overrides_and_converts() {
    let mut config = AskqlConfig::from_yaml_str(APPLICATION_YAML, "test").unwrap();
    config.set("DATABASE_CONNECT_TIMEOUT_SECS", ConfigValue::Text("45".into()));
    config.set("logging.file", ConfigValue::Null);
    config.set("llm.temperature", ConfigValue::Float(0.5));

    assert_eq!(config.get::<u64>("database.connect-timeout-secs").unwrap(), 45);
    assert_eq!(config.get::<Option<String>>("logging.file").unwrap(), None);
    assert_eq!(config.get::<f64>("llm.temperature").unwrap(), 0.5);
    assert_eq!(config.get::<String>("database.connect-timeout-secs").unwrap(), "45");
}

#[test]
fn unparsable_number_is_type_mismatch() {
    let mut config = AskqlConfig::empty();
    config.set("database.connect-timeout-secs", ConfigValue::Text("soon".into()));
    match config.get::<u64>("database.connect-timeout-secs") {
        Err(ConfigError::TypeMismatch { expected, .. }) => assert_eq!(expected, "u64"),
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
    assert_eq!(config.get_or("database.connect-timeout-secs", 30u64), 30);
}

#[test]
fn malformed_yaml_is_load_error() {
    let result = AskqlConfig::from_yaml_str("database: [unclosed", "test");
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
fn directory_layers_profile_dotenv_and_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("application.yaml"), APPLICATION_YAML).unwrap();
    std::fs::write(
        dir.path().join("application-staging.yaml"),
        "logging:\n  file: staging.log\ndatabase:\n  url: \"mysql://app:${ASKQLTEST_DB_PASSWORD}@db/MIS\"\n",
    )
    .unwrap();
    std::fs::write(dir.path().join(".env.staging"), "ASKQLTEST_DB_PASSWORD=hunter2\n").unwrap();

    let config =
        AskqlConfig::load_from_dir(dir.path(), "staging", &DefaultSecretResolver).unwrap();

    assert_eq!(config.get::<String>("llm.model").unwrap(), "gemini-1.5-flash");
    assert_eq!(config.get::<String>("logging.file").unwrap(), "staging.log");
    assert_eq!(config.get::<String>("database.url").unwrap(), "mysql://app:hunter2@db/MIS");
    // the process environment is overlaid as well
    assert_eq!(config.get::<String>("askqltest.db.password").unwrap(), "hunter2");
}

struct TimeoutSection {
    secs: u64,
}

impl ConfigProperties for TimeoutSection {
    fn prefix() -> &'static str {
        "database"
    }

    fn from_config(config: &AskqlConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            secs: config.get_or("database.connect-timeout-secs", 30),
        })
    }
}

#[test]
fn sections_apply_their_defaults() {
    let config = AskqlConfig::from_yaml_str(APPLICATION_YAML, "test").unwrap();
    assert_eq!(config.section::<TimeoutSection>().unwrap().secs, 10);
    assert_eq!(AskqlConfig::empty().section::<TimeoutSection>().unwrap().secs, 30);
    assert_eq!(TimeoutSection::prefix(), "database");
}

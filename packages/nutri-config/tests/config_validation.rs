use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use nutri_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let mut table = root.as_table_mut().expect("Template config must be a table.");

	for part in section.split('.') {
		table = table
			.get_mut(part)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Template config must include [{section}]."));
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn sample_toml_without(section: &str) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");

	root.as_table_mut().expect("Template config must be a table.").remove(section);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("nutri_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> nutri_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = nutri_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn expect_validation_message(payload: String, expected: &str) {
	let err = load_payload(payload).expect_err("Expected validation error.");
	let message = err.to_string();
	let Error::Validation { field, .. } = &err else {
		panic!("Unexpected error kind: {err:?}");
	};

	assert!(expected.starts_with(*field), "Field {field} does not lead {expected:?}.");
	assert!(message.contains(expected), "Unexpected error message: {message}");
}

#[test]
fn sample_config_loads() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string()).expect("Failed to load.");

	assert_eq!(cfg.storage.neo4j.database, "test");
	assert_eq!(cfg.storage.neo4j.query_timeout_ms, 5_000);
	assert_eq!(cfg.resolver.ingredient_list_limit, 10);
}

#[test]
fn resolver_section_is_optional() {
	let cfg = load_payload(sample_toml_without("resolver")).expect("Failed to load.");

	assert_eq!(cfg.resolver.ingredient_list_limit, 10);
	assert_eq!(cfg.resolver.ingredient_benefit_limit, 5);
	assert_eq!(cfg.resolver.diagnostic_chars, 100);
}

#[test]
fn blank_database_falls_back_to_default() {
	let payload = sample_toml_with("storage.neo4j", "database", Value::String("  ".to_string()));
	let cfg = load_payload(payload).expect("Failed to load.");

	assert_eq!(cfg.storage.neo4j.database, nutri_config::DEFAULT_DATABASE);
}

#[test]
fn uri_is_trimmed_before_validation() {
	let payload = sample_toml_with(
		"storage.neo4j",
		"uri",
		Value::String("  bolt://localhost:7687 ".to_string()),
	);
	let cfg = load_payload(payload).expect("Failed to load.");

	assert_eq!(cfg.storage.neo4j.uri, "bolt://localhost:7687");
}

#[test]
fn password_must_be_non_empty() {
	let payload = sample_toml_with("storage.neo4j", "password", Value::String(String::new()));

	expect_validation_message(payload, "storage.neo4j.password must be non-empty.");
}

#[test]
fn uri_scheme_must_be_supported() {
	let payload = sample_toml_with(
		"storage.neo4j",
		"uri",
		Value::String("http://127.0.0.1:7474".to_string()),
	);

	expect_validation_message(payload, "storage.neo4j.uri must use one of");
}

#[test]
fn query_timeout_must_be_positive() {
	let payload = sample_toml_with("storage.neo4j", "query_timeout_ms", Value::Integer(0));

	expect_validation_message(payload, "storage.neo4j.query_timeout_ms must be greater than zero.");
}

#[test]
fn max_connections_must_be_positive() {
	let payload = sample_toml_with("storage.neo4j", "max_connections", Value::Integer(0));

	expect_validation_message(payload, "storage.neo4j.max_connections must be greater than zero.");
}

#[test]
fn ingredient_list_limit_must_be_positive() {
	let payload = sample_toml_with("resolver", "ingredient_list_limit", Value::Integer(0));

	expect_validation_message(payload, "resolver.ingredient_list_limit must be greater than zero.");
}

#[test]
fn validation_error_names_the_field() {
	let payload = sample_toml_with("storage.neo4j", "fetch_size", Value::Integer(0));
	let err = load_payload(payload).expect_err("Expected validation error.");

	match err {
		Error::Validation { field, message } => {
			assert_eq!(field, "storage.neo4j.fetch_size");
			assert_eq!(message, "must be greater than zero.");
		},
		other => panic!("Unexpected error kind: {other:?}"),
	}
}

#[test]
fn missing_file_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("nutri_config_test_missing_file.toml");

	let err = nutri_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error kind: {err:?}");
}

#[test]
fn malformed_file_reports_parse_error() {
	let err = load_payload("[service\nhttp_bind =".to_string()).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error kind: {err:?}");
}

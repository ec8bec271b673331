mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Neo4j, Resolver, Service, Storage};

use std::{fs, path::Path};

pub const DEFAULT_DATABASE: &str = "neo4j";

const SUPPORTED_URI_SCHEMES: [&str; 6] =
	["neo4j://", "neo4j+s://", "neo4j+ssc://", "bolt://", "bolt+s://", "bolt+ssc://"];

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let neo4j = &cfg.storage.neo4j;

	for (field, value) in [
		("service.http_bind", &cfg.service.http_bind),
		("service.admin_bind", &cfg.service.admin_bind),
		("service.log_level", &cfg.service.log_level),
		("storage.neo4j.uri", &neo4j.uri),
		("storage.neo4j.user", &neo4j.user),
		("storage.neo4j.password", &neo4j.password),
	] {
		if value.trim().is_empty() {
			return Err(invalid(field, "must be non-empty."));
		}
	}

	if !SUPPORTED_URI_SCHEMES.iter().any(|scheme| neo4j.uri.starts_with(scheme)) {
		return Err(invalid(
			"storage.neo4j.uri",
			"must use one of the neo4j, neo4j+s, neo4j+ssc, bolt, bolt+s, or bolt+ssc schemes.",
		));
	}

	for (field, value) in [
		("storage.neo4j.max_connections", neo4j.max_connections as u64),
		("storage.neo4j.fetch_size", neo4j.fetch_size as u64),
		("storage.neo4j.query_timeout_ms", neo4j.query_timeout_ms),
		("resolver.ingredient_list_limit", cfg.resolver.ingredient_list_limit as u64),
	] {
		if value == 0 {
			return Err(invalid(field, "must be greater than zero."));
		}
	}

	Ok(())
}

fn invalid(field: &'static str, message: &str) -> Error {
	Error::Validation { field, message: message.to_string() }
}

fn normalize(cfg: &mut Config) {
	let neo4j = &mut cfg.storage.neo4j;

	neo4j.uri = neo4j.uri.trim().to_string();
	neo4j.user = neo4j.user.trim().to_string();
	neo4j.database = neo4j.database.trim().to_string();

	if neo4j.database.is_empty() {
		neo4j.database = DEFAULT_DATABASE.to_string();
	}

	cfg.service.log_level = cfg.service.log_level.trim().to_string();
}

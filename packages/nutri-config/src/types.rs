use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub resolver: Resolver,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub neo4j: Neo4j,
}

#[derive(Debug, Deserialize)]
pub struct Neo4j {
	/// Bolt or routing URI, e.g. "neo4j://127.0.0.1:7687".
	pub uri: String,
	pub user: String,
	pub password: String,
	/// Empty means the server default database.
	#[serde(default)]
	pub database: String,
	#[serde(default = "default_max_connections")]
	pub max_connections: usize,
	#[serde(default = "default_fetch_size")]
	pub fetch_size: usize,
	/// Upper bound for a single graph round trip, including session acquisition.
	#[serde(default = "default_query_timeout_ms")]
	pub query_timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Resolver {
	#[serde(default = "default_ingredient_list_limit")]
	pub ingredient_list_limit: usize,
	#[serde(default = "default_ingredient_benefit_limit")]
	pub ingredient_benefit_limit: usize,
	/// Characters of diagnostic detail appended to user-facing failure messages.
	#[serde(default = "default_diagnostic_chars")]
	pub diagnostic_chars: usize,
}
impl Default for Resolver {
	fn default() -> Self {
		Self {
			ingredient_list_limit: default_ingredient_list_limit(),
			ingredient_benefit_limit: default_ingredient_benefit_limit(),
			diagnostic_chars: default_diagnostic_chars(),
		}
	}
}

fn default_max_connections() -> usize {
	8
}

fn default_fetch_size() -> usize {
	200
}

fn default_query_timeout_ms() -> u64 {
	5_000
}

fn default_ingredient_list_limit() -> usize {
	10
}

fn default_ingredient_benefit_limit() -> usize {
	5
}

fn default_diagnostic_chars() -> usize {
	100
}

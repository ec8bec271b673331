pub mod cypher;
pub mod models;
pub mod neo4j;
pub mod query;

mod error;

pub use error::Error;
pub use models::{GraphStatistics, RawRecord};
pub use neo4j::Neo4jGraph;
pub use query::{GraphQuery, QueryKind};

use std::{future::Future, pin::Pin};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only access to the nutrition graph.
pub trait GraphReader
where
	Self: Send + Sync,
{
	/// Cheap round trip used to detect an unreachable store before any strategy runs.
	fn ping<'a>(&'a self) -> BoxFuture<'a, Result<()>>;

	/// Every ingredient name, lowercased.
	fn ingredient_names<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>>>;

	fn run<'a>(
		&'a self,
		graph_query: &'a GraphQuery,
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<RawRecord>>>;

	fn sample_dish_names<'a>(&'a self, limit: usize) -> BoxFuture<'a, Result<Vec<String>>>;

	fn statistics<'a>(&'a self) -> BoxFuture<'a, Result<GraphStatistics>>;
}

use std::{future::Future, time::Duration};

use neo4rs::{ConfigBuilder, Graph, Query, query};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
	BoxFuture, Error, GraphReader, Result, cypher,
	models::{DishRow, GraphStatistics, IngredientMacroRow, RawRecord},
	query::GraphQuery,
};

#[derive(Deserialize)]
struct NameRow {
	name: Option<String>,
}

#[derive(Deserialize)]
struct CountRow {
	count: i64,
}

#[derive(Deserialize)]
struct LabelCountRow {
	label: String,
	count: i64,
}

/// Bolt-backed [`GraphReader`]. The driver pools sessions; each call borrows one for the span of
/// a single statement and returns it when the row stream is dropped.
pub struct Neo4jGraph {
	graph: Graph,
	query_timeout: Duration,
}
impl Neo4jGraph {
	pub async fn connect(cfg: &nutri_config::Neo4j) -> Result<Self> {
		let config = ConfigBuilder::default()
			.uri(cfg.uri.as_str())
			.user(cfg.user.as_str())
			.password(cfg.password.as_str())
			.db(cfg.database.as_str())
			.fetch_size(cfg.fetch_size)
			.max_connections(cfg.max_connections)
			.build()
			.map_err(|err| Error::InvalidArgument(err.to_string()))?;
		let graph =
			Graph::connect(config).await.map_err(|err| Error::Unavailable(err.to_string()))?;

		Ok(Self { graph, query_timeout: Duration::from_millis(cfg.query_timeout_ms) })
	}

	/// Runs one statement within the query budget. Running out of time before the driver hands back
	/// a row stream means no session could be acquired, so that case is reported as unavailable.
	async fn fetch<T>(&self, statement: Query) -> Result<Vec<T>>
	where
		T: DeserializeOwned,
	{
		let mut acquired = false;
		let result = with_timeout(self.query_timeout, async {
			let mut stream = self.graph.execute(statement).await?;

			acquired = true;

			let mut rows = Vec::new();

			while let Some(row) = stream.next().await? {
				rows.push(row.to::<T>().map_err(|err| Error::Decode(err.to_string()))?);
			}

			Ok::<_, Error>(rows)
		})
		.await;

		match result {
			Err(Error::Timeout { timeout_ms }) if !acquired => Err(Error::Unavailable(format!(
				"No graph session acquired within {timeout_ms} ms."
			))),
			other => other,
		}
	}

	async fn count(&self, statement: &'static str) -> Result<u64> {
		let rows: Vec<CountRow> = self.fetch(query(statement)).await?;

		Ok(rows.first().map(|row| row.count.max(0) as u64).unwrap_or(0))
	}
}
impl GraphReader for Neo4jGraph {
	fn ping<'a>(&'a self) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			// A failed probe means the store is out of reach, whatever the driver reported.
			self.fetch::<CountRow>(query(cypher::PING))
				.await
				.map_err(|err| match err {
					Error::Unavailable(_) => err,
					other => Error::Unavailable(other.to_string()),
				})?;

			Ok(())
		})
	}

	fn ingredient_names<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(async move {
			let rows: Vec<NameRow> = self.fetch(query(cypher::INGREDIENT_NAMES)).await?;

			Ok(rows.into_iter().filter_map(|row| row.name).collect())
		})
	}

	fn run<'a>(
		&'a self,
		graph_query: &'a GraphQuery,
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<RawRecord>>> {
		Box::pin(async move {
			graph_query.validate()?;

			let statement = cypher::bind(graph_query, limit);
			let records = match graph_query {
				GraphQuery::IngredientMacros { .. } => self
					.fetch::<IngredientMacroRow>(statement)
					.await?
					.into_iter()
					.map(RawRecord::Ingredient)
					.collect::<Vec<_>>(),
				_ => self
					.fetch::<DishRow>(statement)
					.await?
					.into_iter()
					.map(RawRecord::Dish)
					.collect::<Vec<_>>(),
			};

			tracing::debug!(
				query = graph_query.kind().as_str(),
				rows = records.len(),
				"Graph query completed."
			);

			Ok(records)
		})
	}

	fn sample_dish_names<'a>(&'a self, limit: usize) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(async move {
			let limit = i64::try_from(limit).unwrap_or(i64::MAX);
			let rows: Vec<NameRow> =
				self.fetch(query(cypher::SAMPLE_DISH_NAMES).param("limit", limit)).await?;

			Ok(rows.into_iter().filter_map(|row| row.name).collect())
		})
	}

	fn statistics<'a>(&'a self) -> BoxFuture<'a, Result<GraphStatistics>> {
		Box::pin(async move {
			let labels: Vec<LabelCountRow> = self.fetch(query(cypher::LABEL_COUNTS)).await?;
			let nodes = self.count(cypher::NODE_COUNT).await?;
			let relationships = self.count(cypher::RELATIONSHIP_COUNT).await?;

			Ok(GraphStatistics::from_label_counts(
				labels.into_iter().map(|row| (row.label, row.count.max(0) as u64)),
				nodes,
				relationships,
			))
		})
	}
}

/// Bounds one graph round trip. Expiry becomes [`Error::Timeout`].
pub async fn with_timeout<F, T>(limit: Duration, work: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);

	tokio::time::timeout(limit, work).await.map_err(|_| Error::Timeout { timeout_ms })?
}

#[cfg(test)]
mod tests {
	use std::future;

	use super::*;

	#[tokio::test(start_paused = true)]
	async fn stalled_round_trip_times_out() {
		let result: Result<()> =
			with_timeout(Duration::from_millis(250), future::pending::<Result<()>>()).await;

		assert!(matches!(result, Err(Error::Timeout { timeout_ms: 250 })));
	}

	#[tokio::test(start_paused = true)]
	async fn prompt_round_trip_passes_through() {
		let result = with_timeout(Duration::from_millis(250), async {
			tokio::time::sleep(Duration::from_millis(100)).await;

			Ok::<_, Error>(7)
		})
		.await;

		assert_eq!(result.ok(), Some(7));
	}

	#[tokio::test(start_paused = true)]
	async fn inner_errors_are_kept() {
		let result: Result<()> = with_timeout(Duration::from_millis(250), async {
			Err(Error::Decode("bad row".to_string()))
		})
		.await;

		assert!(matches!(result, Err(Error::Decode(_))));
	}
}

use std::sync::Arc;

use nutri_service::NutriService;
use nutri_storage::{GraphReader, Neo4jGraph};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<NutriService>,
}
impl AppState {
	/// Connects to the graph and refuses to start when it does not answer the probe.
	pub async fn new(config: nutri_config::Config) -> color_eyre::Result<Self> {
		let graph = Neo4jGraph::connect(&config.storage.neo4j).await?;

		graph.ping().await?;

		match graph.statistics().await {
			Ok(stats) => {
				tracing::info!(
					nodes = stats.nodes,
					relationships = stats.relationships,
					labels = ?stats.labels,
					"Connected to nutrition graph."
				);
			},
			Err(err) => {
				tracing::warn!(error = %err, "Failed to read graph statistics at startup.");
			},
		}

		Ok(Self::with_graph(config.resolver, Arc::new(graph)))
	}

	pub fn with_graph(resolver: nutri_config::Resolver, graph: Arc<dyn GraphReader>) -> Self {
		Self { service: Arc::new(NutriService::new(resolver, graph)) }
	}
}

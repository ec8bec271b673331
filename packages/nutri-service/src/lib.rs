pub mod format;
pub mod normalize;
pub mod rank;
pub mod resolve;
pub mod strategy;
pub mod vocabulary;

mod error;

pub use error::{Error, Result};
pub use normalize::{DishRecord, IngredientRecord, IngredientUse, Record};
pub use resolve::{Outcome, ResolveRequest, ResolveResponse, StrategyReport};
pub use strategy::StrategyKind;

use std::sync::Arc;

use serde::Serialize;

use nutri_storage::{GraphReader, GraphStatistics};
use vocabulary::VocabularyCache;

#[derive(Debug, Clone, Serialize)]
pub struct VocabularyReport {
	pub ingredients: usize,
}

pub struct NutriService {
	pub cfg: nutri_config::Resolver,
	pub graph: Arc<dyn GraphReader>,
	vocabulary: VocabularyCache,
}
impl NutriService {
	pub fn new(cfg: nutri_config::Resolver, graph: Arc<dyn GraphReader>) -> Self {
		Self { cfg, graph, vocabulary: VocabularyCache::default() }
	}

	/// The named capability: free text in, presentable text out. Never fails; errors become a
	/// friendly message with a short diagnostic tail.
	pub async fn advise(&self, query: &str) -> String {
		match self.resolve(ResolveRequest { query: query.to_string() }).await {
			Ok(response) => format::render(&response, &self.cfg),
			Err(err) => {
				tracing::warn!(error = %err, "Nutrition query failed.");

				format::failure_message(&err, self.cfg.diagnostic_chars)
			},
		}
	}

	/// Forces a vocabulary rebuild. Unlike lookups, a failed rebuild is reported.
	pub async fn refresh_vocabulary(&self) -> Result<VocabularyReport> {
		let names = self.vocabulary.refresh(self.graph.as_ref()).await?;

		Ok(VocabularyReport { ingredients: names.len() })
	}

	/// Ingredient names as currently cached, loading them on first use.
	pub async fn vocabulary(&self) -> Arc<Vec<String>> {
		self.vocabulary.get(self.graph.as_ref(), false).await
	}

	pub async fn statistics(&self) -> Result<GraphStatistics> {
		Ok(self.graph.statistics().await?)
	}
}

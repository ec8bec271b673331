use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use nutri_storage::GraphReader;

use crate::Result;

/// Process-wide ingredient vocabulary. Readers clone the current snapshot; a refresh builds a
/// complete replacement before swapping it in, so no reader ever sees a partial list.
#[derive(Default)]
pub struct VocabularyCache {
	snapshot: RwLock<Arc<Vec<String>>>,
	refresh: Mutex<()>,
}
impl VocabularyCache {
	pub fn current(&self) -> Arc<Vec<String>> {
		self.snapshot.read().unwrap_or_else(|err| err.into_inner()).clone()
	}

	/// Serves the cached names, loading them when forced or when nothing is cached. A failed load
	/// keeps and returns the previous snapshot.
	pub async fn get(&self, graph: &dyn GraphReader, force_refresh: bool) -> Arc<Vec<String>> {
		if !force_refresh {
			let current = self.current();

			if !current.is_empty() {
				return current;
			}
		}

		let _guard = self.refresh.lock().await;

		if !force_refresh {
			let current = self.current();

			// Another caller finished the load while this one waited.
			if !current.is_empty() {
				return current;
			}
		}

		match self.reload(graph).await {
			Ok(fresh) => fresh,
			Err(err) => {
				tracing::warn!(
					error = %err,
					"Failed to load ingredient vocabulary. Serving previous snapshot."
				);

				self.current()
			},
		}
	}

	/// Rebuilds the vocabulary and reports failures instead of masking them.
	pub async fn refresh(&self, graph: &dyn GraphReader) -> Result<Arc<Vec<String>>> {
		let _guard = self.refresh.lock().await;

		self.reload(graph).await
	}

	async fn reload(&self, graph: &dyn GraphReader) -> Result<Arc<Vec<String>>> {
		let mut names: Vec<String> = graph
			.ingredient_names()
			.await?
			.into_iter()
			.map(|name| name.trim().to_lowercase())
			.filter(|name| !name.is_empty())
			.collect();

		names.sort();
		names.dedup();

		let fresh = Arc::new(names);

		*self.snapshot.write().unwrap_or_else(|err| err.into_inner()) = fresh.clone();

		tracing::info!(ingredients = fresh.len(), "Ingredient vocabulary loaded.");

		Ok(fresh)
	}
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nutri_domain::{Extraction, PRESENTATION_LIMIT, STRATEGY_RESULT_CAP, extract, normalize_query};

use crate::{
	Error, NutriService, Result,
	normalize::{self, Record},
	rank::{self, StrategyOutcome},
	strategy::{self, PlannedStrategy, StrategyKind},
};

const DISH_SAMPLE_SIZE: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
	pub query: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
	Found,
	NoResults,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
	pub kind: StrategyKind,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub concept: Option<String>,
	pub records: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}
impl From<&StrategyOutcome> for StrategyReport {
	fn from(outcome: &StrategyOutcome) -> Self {
		Self {
			kind: outcome.kind,
			concept: outcome.concept.clone(),
			records: outcome.record_count(),
			error: outcome.result.as_ref().err().map(ToString::to_string),
		}
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolveResponse {
	pub trace_id: Uuid,
	pub outcome: Outcome,
	pub extraction: Extraction,
	pub strategies: Vec<StrategyReport>,
	pub records: Vec<Record>,
}

impl NutriService {
	/// Runs every activated strategy once, in order, and reduces their pooled records.
	///
	/// Only an unreachable store fails the call. A strategy whose query errors is logged and
	/// contributes nothing.
	pub async fn resolve(&self, req: ResolveRequest) -> Result<ResolveResponse> {
		let query = normalize_query(&req.query);

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
		}

		let trace_id = Uuid::new_v4();

		self.graph.ping().await.map_err(|err| Error::StoreUnavailable {
			message: err.to_string(),
		})?;

		let vocabulary = self.vocabulary.get(self.graph.as_ref(), false).await;
		let extraction = extract::extract(&query, &vocabulary);

		tracing::debug!(
			trace_id = %trace_id,
			dish_keyword = ?extraction.dish_keyword,
			ingredients = extraction.ingredient_matches.len(),
			benefits = extraction.benefit_keywords.len(),
			"Query entities extracted."
		);

		let mut outcomes = Vec::new();

		if let Some(planned) = strategy::name_match(&extraction) {
			outcomes.push(self.execute(trace_id, planned).await?);
		}
		if extraction.intents.broad_dish_term
			&& outcomes.iter().all(|outcome| outcome.record_count() == 0)
		{
			let fallback_count = match strategy::fallback(&extraction, &query) {
				Some(planned) => {
					let outcome = self.execute(trace_id, planned).await?;
					let count = outcome.record_count();

					outcomes.push(outcome);

					count
				},
				None => 0,
			};

			if fallback_count == 0 {
				self.log_dish_sample(trace_id).await;
			}
		}

		for planned in strategy::secondary(&extraction, &query) {
			outcomes.push(self.execute(trace_id, planned).await?);
		}

		let records = rank::merge(&outcomes, PRESENTATION_LIMIT);
		let outcome = if records.is_empty() { Outcome::NoResults } else { Outcome::Found };

		tracing::info!(
			trace_id = %trace_id,
			strategies = outcomes.len(),
			records = records.len(),
			outcome = ?outcome,
			"Nutrition query resolved."
		);

		Ok(ResolveResponse {
			trace_id,
			outcome,
			extraction,
			strategies: outcomes.iter().map(StrategyReport::from).collect(),
			records,
		})
	}

	/// Runs one strategy. Query failures become a failed outcome; only a lost store aborts.
	async fn execute(&self, trace_id: Uuid, planned: PlannedStrategy) -> Result<StrategyOutcome> {
		let PlannedStrategy { kind, concept, query } = planned;
		let result = match self.graph.run(&query, STRATEGY_RESULT_CAP).await {
			Ok(raw) => {
				let records: Vec<Record> = raw.into_iter().filter_map(normalize::normalize).collect();

				tracing::debug!(
					trace_id = %trace_id,
					strategy = kind.as_str(),
					records = records.len(),
					"Strategy completed."
				);

				Ok(records)
			},
			Err(err) if err.is_unavailable() => return Err(err.into()),
			Err(err) => {
				tracing::warn!(
					trace_id = %trace_id,
					strategy = kind.as_str(),
					error = %err,
					"Strategy failed. Continuing with remaining strategies."
				);

				Err(err.into())
			},
		};

		Ok(StrategyOutcome { kind, concept, result })
	}

	async fn log_dish_sample(&self, trace_id: Uuid) {
		match self.graph.sample_dish_names(DISH_SAMPLE_SIZE).await {
			Ok(names) if names.is_empty() => {
				tracing::warn!(
					trace_id = %trace_id,
					"Dish lookup found nothing and the graph holds no Dish nodes."
				);
			},
			Ok(names) => {
				tracing::info!(
					trace_id = %trace_id,
					sample = ?names,
					"Dish lookup found nothing. Sample of stored dish names attached."
				);
			},
			Err(err) => {
				tracing::warn!(trace_id = %trace_id, error = %err, "Failed to sample dish names.");
			},
		}
	}
}

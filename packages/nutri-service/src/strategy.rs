use serde::Serialize;

use nutri_domain::{
	CALORIE_TOLERANCE, Extraction, MAX_LOW_CALORIES, MIN_HIGH_PROTEIN_G, extract, keywords,
};
use nutri_storage::GraphQuery;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
	NameMatch,
	FallbackMatch,
	IngredientDiscovery,
	CalorieRange,
	ProteinThreshold,
	LowCalorie,
	BenefitKeyword,
	IngredientMacro,
}
impl StrategyKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::NameMatch => "name_match",
			Self::FallbackMatch => "fallback_match",
			Self::IngredientDiscovery => "ingredient_discovery",
			Self::CalorieRange => "calorie_range",
			Self::ProteinThreshold => "protein_threshold",
			Self::LowCalorie => "low_calorie",
			Self::BenefitKeyword => "benefit_keyword",
			Self::IngredientMacro => "ingredient_macro",
		}
	}
}

/// One activated strategy and the lookup it will issue.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedStrategy {
	pub kind: StrategyKind,
	/// Benefit concept label for [`StrategyKind::BenefitKeyword`].
	pub concept: Option<String>,
	pub query: GraphQuery,
}
impl PlannedStrategy {
	fn new(kind: StrategyKind, query: GraphQuery) -> Self {
		Self { kind, concept: None, query }
	}
}

pub fn name_match(extraction: &Extraction) -> Option<PlannedStrategy> {
	let keyword = extraction.dish_keyword.clone()?;

	Some(PlannedStrategy::new(StrategyKind::NameMatch, GraphQuery::DishesByName { keyword }))
}

/// Coarser retry for when the name match came back empty. `None` when the query has no broad
/// dish term or the coarser keyword is the one already tried.
pub fn fallback(extraction: &Extraction, query: &str) -> Option<PlannedStrategy> {
	if !extraction.intents.broad_dish_term {
		return None;
	}

	let keyword = extract::fallback_keyword(query)?;

	if extraction.dish_keyword.as_deref() == Some(keyword) {
		return None;
	}

	Some(PlannedStrategy::new(
		StrategyKind::FallbackMatch,
		GraphQuery::DishesByName { keyword: keyword.to_string() },
	))
}

/// Strategies that do not depend on the name match, in execution order. Threshold strategies
/// precede benefit lookups.
pub fn secondary(extraction: &Extraction, query: &str) -> Vec<PlannedStrategy> {
	let mut planned = Vec::new();

	if extraction.intents.ingredient_discovery && !extraction.ingredient_matches.is_empty() {
		planned.push(PlannedStrategy::new(
			StrategyKind::IngredientDiscovery,
			GraphQuery::DishesByIngredients { names: extraction.ingredient_matches.clone() },
		));
	}
	if let Some(target) = extraction.calorie_target() {
		planned.push(PlannedStrategy::new(
			StrategyKind::CalorieRange,
			GraphQuery::DishesByCalorieRange { target, tolerance: CALORIE_TOLERANCE },
		));
	}
	if extraction.intents.high_protein {
		planned.push(PlannedStrategy::new(
			StrategyKind::ProteinThreshold,
			GraphQuery::DishesByMinProtein { min_protein: MIN_HIGH_PROTEIN_G },
		));
	}
	if extraction.intents.low_calorie {
		planned.push(PlannedStrategy::new(
			StrategyKind::LowCalorie,
			GraphQuery::DishesByMaxCalories { max_calories: MAX_LOW_CALORIES },
		));
	}

	for concept in &extraction.benefit_keywords {
		let Some(synonyms) = keywords::benefit_synonyms(concept) else {
			continue;
		};

		planned.push(PlannedStrategy {
			kind: StrategyKind::BenefitKeyword,
			concept: Some(concept.clone()),
			query: GraphQuery::DishesByBenefitTerms {
				terms: synonyms.iter().map(|term| term.to_string()).collect(),
			},
		});
	}

	if extraction.intents.composition {
		let terms = if extraction.ingredient_matches.is_empty() {
			vec![query.trim().to_string()]
		} else {
			extraction.ingredient_matches.clone()
		};

		planned.push(PlannedStrategy::new(
			StrategyKind::IngredientMacro,
			GraphQuery::IngredientMacros { terms },
		));
	}

	planned
}

#[cfg(test)]
mod tests {
	use super::*;

	fn vocabulary() -> Vec<String> {
		vec!["trứng".to_string(), "cà chua".to_string()]
	}

	fn kinds(planned: &[PlannedStrategy]) -> Vec<StrategyKind> {
		planned.iter().map(|strategy| strategy.kind).collect()
	}

	#[test]
	fn name_match_uses_the_longest_keyword() {
		let extraction = extract::extract("phở bò có bao nhiêu calories", &[]);
		let planned = name_match(&extraction).expect("Expected a name match.");

		assert_eq!(planned.query, GraphQuery::DishesByName { keyword: "phở bò".to_string() });
	}

	#[test]
	fn fallback_needs_a_coarser_keyword() {
		let query = "phở bò tái";
		let extraction = extract::extract(query, &[]);
		let planned = fallback(&extraction, query).expect("Expected a fallback.");

		assert_eq!(planned.query, GraphQuery::DishesByName { keyword: "phở".to_string() });

		let query = "bánh mì pate";
		let extraction = extract::extract(query, &[]);

		assert_eq!(fallback(&extraction, query), None);
	}

	#[test]
	fn high_protein_question_runs_threshold_before_benefit() {
		let query = "món nào nhiều protein";
		let planned = secondary(&extract::extract(query, &vocabulary()), query);

		assert_eq!(kinds(&planned), vec![
			StrategyKind::ProteinThreshold,
			StrategyKind::BenefitKeyword
		]);
		assert_eq!(planned[1].concept.as_deref(), Some("tăng cơ"));
	}

	#[test]
	fn every_concept_gets_its_own_lookup() {
		let query = "món tốt cho tim mạch và miễn dịch";
		let planned = secondary(&extract::extract(query, &[]), query);

		assert_eq!(planned.len(), 2);
		assert_eq!(planned[0].concept.as_deref(), Some("tim mạch"));
		assert_eq!(planned[1].concept.as_deref(), Some("miễn dịch"));
	}

	#[test]
	fn macro_lookup_prefers_ingredient_names() {
		let query = "thành phần dinh dưỡng của trứng";
		let planned = secondary(&extract::extract(query, &vocabulary()), query);

		assert_eq!(planned.last().map(|strategy| strategy.query.clone()), Some(
			GraphQuery::IngredientMacros { terms: vec!["trứng".to_string()] }
		));
	}

	#[test]
	fn calorie_target_builds_a_band() {
		let query = "gợi ý món khoảng 400 cal";
		let planned = secondary(&extract::extract(query, &[]), query);

		assert_eq!(planned[0].query, GraphQuery::DishesByCalorieRange {
			target: 400.0,
			tolerance: CALORIE_TOLERANCE
		});
	}
}

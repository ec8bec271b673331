use neo4rs::{Query, query};

use crate::query::GraphQuery;

// Shared dish expansion. The head of each statement binds `d`, `matched_ingredients`, and
// `match_count`, already limited; this tail left-joins cuisine, dish benefits, and ingredients
// with their own benefits.
macro_rules! dish_expansion {
	() => {
		"
OPTIONAL MATCH (d)-[:BELONGS_TO]->(c:Cuisine)
OPTIONAL MATCH (d)-[:HAS_BENEFIT]->(b:Benefit)
WITH d, matched_ingredients, match_count, c, collect(DISTINCT b.name) AS benefits
OPTIONAL MATCH (d)-[rel:CONTAINS]->(i:Ingredient)
OPTIONAL MATCH (i)-[:PROVIDES_BENEFIT]->(ib:Benefit)
WITH d, matched_ingredients, match_count, c, benefits, i, rel, collect(DISTINCT ib.name) AS ingredient_benefits
WITH d, matched_ingredients, match_count, c, benefits,
	collect({name: i.name, quantity: rel.quantity_g, benefits: ingredient_benefits}) AS ingredients
RETURN
	d.name AS dish_name,
	d.calories AS calories,
	d.protein_g AS protein,
	d.carbs_g AS carbs,
	d.fat_g AS fat,
	c.name AS cuisine,
	benefits,
	ingredients,
	matched_ingredients,
	match_count"
	};
}

pub const PING: &str = "RETURN 1 AS count";

pub const INGREDIENT_NAMES: &str = "\
MATCH (i:Ingredient)
WHERE i.name IS NOT NULL
RETURN DISTINCT toLower(i.name) AS name
ORDER BY name";

pub const SAMPLE_DISH_NAMES: &str = "\
MATCH (d:Dish)
WHERE d.name IS NOT NULL
RETURN d.name AS name
ORDER BY name
LIMIT $limit";

pub const LABEL_COUNTS: &str = "\
MATCH (n)
UNWIND labels(n) AS label
RETURN label, count(*) AS count";

pub const NODE_COUNT: &str = "MATCH (n) RETURN count(n) AS count";

pub const RELATIONSHIP_COUNT: &str = "MATCH ()-[r]->() RETURN count(r) AS count";

const DISHES_BY_NAME: &str = concat!(
	"\
MATCH (d:Dish)
WHERE toLower(d.name) CONTAINS $keyword
WITH d, [] AS matched_ingredients, null AS match_count
ORDER BY d.name
LIMIT $limit",
	dish_expansion!(),
	"
ORDER BY dish_name"
);

const DISHES_BY_INGREDIENTS: &str = concat!(
	"\
MATCH (d:Dish)-[:CONTAINS]->(m:Ingredient)
WHERE toLower(m.name) IN $names
WITH d, collect(DISTINCT toLower(m.name)) AS matched_ingredients, count(DISTINCT m) AS match_count
ORDER BY match_count DESC, d.calories ASC, d.name
LIMIT $limit",
	dish_expansion!(),
	"
ORDER BY match_count DESC, calories ASC, dish_name"
);

const DISHES_BY_CALORIE_RANGE: &str = concat!(
	"\
MATCH (d:Dish)
WHERE d.calories >= $min_calories AND d.calories <= $max_calories
WITH d, [] AS matched_ingredients, null AS match_count
ORDER BY abs(d.calories - $target), d.name
LIMIT $limit",
	dish_expansion!(),
	"
ORDER BY abs(calories - $target), dish_name"
);

const DISHES_BY_BENEFIT_TERMS: &str = concat!(
	"\
MATCH (d:Dish)-[:HAS_BENEFIT]->(hb:Benefit)
WHERE any(term IN $terms WHERE toLower(hb.name) CONTAINS term)
WITH DISTINCT d
WITH d, [] AS matched_ingredients, null AS match_count
ORDER BY d.name
LIMIT $limit",
	dish_expansion!(),
	"
ORDER BY dish_name"
);

const DISHES_BY_MIN_PROTEIN: &str = concat!(
	"\
MATCH (d:Dish)
WHERE d.protein_g >= $min_protein
WITH d, [] AS matched_ingredients, null AS match_count
ORDER BY d.protein_g DESC, d.name
LIMIT $limit",
	dish_expansion!(),
	"
ORDER BY protein DESC, dish_name"
);

const DISHES_BY_MAX_CALORIES: &str = concat!(
	"\
MATCH (d:Dish)
WHERE d.calories <= $max_calories
WITH d, [] AS matched_ingredients, null AS match_count
ORDER BY d.calories ASC, d.name
LIMIT $limit",
	dish_expansion!(),
	"
ORDER BY calories ASC, dish_name"
);

const INGREDIENT_MACROS: &str = "\
MATCH (i:Ingredient)
WHERE any(term IN $terms WHERE toLower(i.name) CONTAINS term)
MATCH (i)-[:HAS_MACRO]->(m:Macro)
RETURN
	i.name AS name,
	m.calories_per_100g AS calories,
	m.protein_g_per_100g AS protein,
	m.carbs_g_per_100g AS carbs,
	m.fat_g_per_100g AS fat
ORDER BY name
LIMIT $limit";

pub fn statement(graph_query: &GraphQuery) -> &'static str {
	match graph_query {
		GraphQuery::DishesByName { .. } => DISHES_BY_NAME,
		GraphQuery::DishesByIngredients { .. } => DISHES_BY_INGREDIENTS,
		GraphQuery::DishesByCalorieRange { .. } => DISHES_BY_CALORIE_RANGE,
		GraphQuery::DishesByBenefitTerms { .. } => DISHES_BY_BENEFIT_TERMS,
		GraphQuery::DishesByMinProtein { .. } => DISHES_BY_MIN_PROTEIN,
		GraphQuery::DishesByMaxCalories { .. } => DISHES_BY_MAX_CALORIES,
		GraphQuery::IngredientMacros { .. } => INGREDIENT_MACROS,
	}
}

/// Builds the parameterised statement. Search terms are lowercased to match `toLower(...)`.
pub fn bind(graph_query: &GraphQuery, limit: usize) -> Query {
	let limit = i64::try_from(limit).unwrap_or(i64::MAX);
	let base = query(statement(graph_query)).param("limit", limit);

	match graph_query {
		GraphQuery::DishesByName { keyword } => base.param("keyword", keyword.trim().to_lowercase()),
		GraphQuery::DishesByIngredients { names } => base.param("names", lowered(names)),
		GraphQuery::DishesByCalorieRange { target, tolerance } => base
			.param("target", *target)
			.param("min_calories", target - tolerance)
			.param("max_calories", target + tolerance),
		GraphQuery::DishesByBenefitTerms { terms } | GraphQuery::IngredientMacros { terms } =>
			base.param("terms", lowered(terms)),
		GraphQuery::DishesByMinProtein { min_protein } => base.param("min_protein", *min_protein),
		GraphQuery::DishesByMaxCalories { max_calories } =>
			base.param("max_calories", *max_calories),
	}
}

fn lowered(terms: &[String]) -> Vec<String> {
	terms
		.iter()
		.map(|term| term.trim().to_lowercase())
		.filter(|term| !term.is_empty())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dish_statements_share_the_expansion() {
		for graph_query in [
			GraphQuery::DishesByName { keyword: "phở".to_string() },
			GraphQuery::DishesByIngredients { names: vec!["trứng".to_string()] },
			GraphQuery::DishesByCalorieRange { target: 400.0, tolerance: 50.0 },
			GraphQuery::DishesByBenefitTerms { terms: vec!["tim mạch".to_string()] },
			GraphQuery::DishesByMinProtein { min_protein: 20.0 },
			GraphQuery::DishesByMaxCalories { max_calories: 250.0 },
		] {
			let text = statement(&graph_query);

			assert!(text.contains("OPTIONAL MATCH (d)-[:BELONGS_TO]->(c:Cuisine)"));
			assert!(text.contains("rel.quantity_g"));
			assert!(text.contains("LIMIT $limit"));
			assert!(text.contains("AS match_count"));
		}
	}

	#[test]
	fn ingredient_discovery_orders_by_match_count_then_calories() {
		let text = statement(&GraphQuery::DishesByIngredients { names: vec![] });

		assert!(text.ends_with("ORDER BY match_count DESC, calories ASC, dish_name"));
	}

	#[test]
	fn protein_threshold_orders_descending() {
		let text = statement(&GraphQuery::DishesByMinProtein { min_protein: 20.0 });

		assert!(text.contains("WHERE d.protein_g >= $min_protein"));
		assert!(text.ends_with("ORDER BY protein DESC, dish_name"));
	}

	#[test]
	fn macro_lookup_joins_macro_nodes() {
		let text = statement(&GraphQuery::IngredientMacros { terms: vec![] });

		assert!(text.contains("\nMATCH (i)-[:HAS_MACRO]->(m:Macro)"));
		assert!(!text.contains("OPTIONAL"));
		assert!(!text.contains("Dish"));
	}

	#[test]
	fn terms_are_lowercased_and_blank_terms_dropped() {
		let terms = vec![" Tim Mạch ".to_string(), "  ".to_string()];

		assert_eq!(lowered(&terms), vec!["tim mạch".to_string()]);
	}
}

use serde::Serialize;

use crate::{
	extract::contains_word,
	keywords::{
		COMPOSITION_TERMS, COOKING_TERMS, DISH_TERM, FALLBACK_TRIGGER_TERMS, HIGH_AMOUNT_TERMS,
		INGREDIENT_INTENT_TERMS, LOW_CALORIE_TERMS, PROTEIN_TERM,
	},
};

/// Keyword-level intents read from a normalized query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Intents {
	pub ingredient_discovery: bool,
	pub high_protein: bool,
	pub low_calorie: bool,
	pub composition: bool,
	pub broad_dish_term: bool,
}
impl Intents {
	pub fn detect(query: &str, ingredient_match_count: usize) -> Self {
		Self {
			ingredient_discovery: wants_ingredient_discovery(query, ingredient_match_count),
			high_protein: mentions_high_protein(query),
			low_calorie: mentions_low_calorie(query),
			composition: mentions_composition(query),
			broad_dish_term: mentions_broad_dish_term(query),
		}
	}
}

/// Two or more named ingredients, an explicit recipe request, or "món ... với/từ/..." with at
/// least one named ingredient.
pub fn wants_ingredient_discovery(query: &str, ingredient_match_count: usize) -> bool {
	if ingredient_match_count >= 2 {
		return true;
	}
	if INGREDIENT_INTENT_TERMS.iter().any(|term| query.contains(term)) {
		return true;
	}

	ingredient_match_count >= 1
		&& contains_word(query, DISH_TERM)
		&& COOKING_TERMS.iter().any(|term| contains_word(query, term))
}

pub fn mentions_high_protein(query: &str) -> bool {
	query.contains(PROTEIN_TERM) && HIGH_AMOUNT_TERMS.iter().any(|term| contains_word(query, term))
}

pub fn mentions_low_calorie(query: &str) -> bool {
	LOW_CALORIE_TERMS.iter().any(|term| query.contains(term))
}

pub fn mentions_composition(query: &str) -> bool {
	COMPOSITION_TERMS.iter().any(|term| query.contains(term))
}

pub fn mentions_broad_dish_term(query: &str) -> bool {
	FALLBACK_TRIGGER_TERMS.iter().any(|term| query.contains(term))
}

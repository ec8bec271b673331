use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::{
	intent::Intents,
	keywords::{self, BENEFIT_CONCEPTS, DISH_KEYWORDS, FALLBACK_KEYWORDS},
};

static NUMERIC_TARGET: LazyLock<Option<Regex>> = LazyLock::new(|| {
	Regex::new(
		r"(?:(?P<grouped>\d{1,3}(?:[.,]\d{3})+)|(?P<decimal>\d+(?:[.,]\d+)?))\s*(?P<unit>kcal|calories|calorie|calo|cal|grams|gram|gam|g)\b",
	)
	.ok()
});

/// Synonyms at least this long match anywhere in the query.
const WHOLE_WORD_SYNONYM_CHARS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericUnit {
	Calories,
	Grams,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NumericTarget {
	pub value: f64,
	pub unit: NumericUnit,
}

/// Structured search terms pulled out of one query.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Extraction {
	pub dish_keyword: Option<String>,
	/// Vocabulary hits in match order, without duplicates.
	pub ingredient_matches: Vec<String>,
	pub numeric_targets: Vec<NumericTarget>,
	/// Activated benefit concept labels, in table order.
	pub benefit_keywords: Vec<String>,
	pub intents: Intents,
}
impl Extraction {
	/// The first calorie-valued number in the query.
	pub fn calorie_target(&self) -> Option<f64> {
		self.numeric_targets
			.iter()
			.find(|target| target.unit == NumericUnit::Calories)
			.map(|target| target.value)
	}
}

/// NFC, lowercase, single-spaced, trimmed.
pub fn normalize_query(raw: &str) -> String {
	let composed: String = raw.nfc().collect::<String>().to_lowercase();

	composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts every entity kind from `raw`. Never fails; missing patterns leave fields empty.
pub fn extract(raw: &str, vocabulary: &[String]) -> Extraction {
	let query = normalize_query(raw);
	let ingredient_matches = ingredient_matches(&query, vocabulary);
	let intents = Intents::detect(&query, ingredient_matches.len());

	Extraction {
		dish_keyword: dish_keyword(&query).map(str::to_string),
		numeric_targets: numeric_targets(&query),
		benefit_keywords: benefit_concepts(&query).into_iter().map(str::to_string).collect(),
		ingredient_matches,
		intents,
	}
}

/// Longest curated dish fragment contained in `query`.
pub fn dish_keyword(query: &str) -> Option<&'static str> {
	keywords::longest_first(DISH_KEYWORDS).into_iter().find(|keyword| query.contains(keyword))
}

/// Coarser keyword used when the name match comes back empty.
pub fn fallback_keyword(query: &str) -> Option<&'static str> {
	keywords::longest_first(FALLBACK_KEYWORDS).into_iter().find(|keyword| query.contains(keyword))
}

/// Greedy longest-first vocabulary match. Each hit is blanked out of a scratch copy so shorter
/// names cannot re-match inside it.
pub fn ingredient_matches(query: &str, vocabulary: &[String]) -> Vec<String> {
	let mut names: Vec<String> = vocabulary
		.iter()
		.map(|name| normalize_query(name))
		.filter(|name| !name.is_empty())
		.collect();

	names.sort_by(|lhs, rhs| {
		rhs.chars().count().cmp(&lhs.chars().count()).then_with(|| lhs.cmp(rhs))
	});
	names.dedup();

	let mut scratch = query.to_string();
	let mut matches = Vec::new();

	for name in names {
		if !scratch.contains(name.as_str()) {
			continue;
		}

		scratch = scratch.replace(name.as_str(), " ");

		matches.push(name);
	}

	matches
}

pub fn numeric_targets(query: &str) -> Vec<NumericTarget> {
	let Some(pattern) = NUMERIC_TARGET.as_ref() else {
		return Vec::new();
	};

	pattern
		.captures_iter(query)
		.filter_map(|caps| {
			let value = match (caps.name("grouped"), caps.name("decimal")) {
				(Some(grouped), _) => grouped.as_str().replace(['.', ','], "").parse::<f64>().ok()?,
				(None, Some(decimal)) => decimal.as_str().replace(',', ".").parse::<f64>().ok()?,
				(None, None) => return None,
			};
			let unit = match caps.name("unit")?.as_str() {
				"grams" | "gram" | "gam" | "g" => NumericUnit::Grams,
				_ => NumericUnit::Calories,
			};

			Some(NumericTarget { value, unit })
		})
		.collect()
}

/// Concept labels with at least one synonym present in `query`.
pub fn benefit_concepts(query: &str) -> Vec<&'static str> {
	BENEFIT_CONCEPTS
		.iter()
		.filter(|(_, synonyms)| synonyms.iter().any(|synonym| mentions_synonym(query, synonym)))
		.map(|(label, _)| *label)
		.collect()
}

/// Plain containment, except that synonyms shorter than [`WHOLE_WORD_SYNONYM_CHARS`] must stand
/// alone ("da" is not found in "dai").
pub fn mentions_synonym(query: &str, synonym: &str) -> bool {
	if synonym.chars().count() < WHOLE_WORD_SYNONYM_CHARS {
		contains_word(query, synonym)
	} else {
		query.contains(synonym)
	}
}

/// Substring match that also requires non-alphanumeric neighbours on both sides.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
	if needle.is_empty() {
		return false;
	}

	haystack.match_indices(needle).any(|(start, matched)| {
		let before = haystack[..start].chars().next_back();
		let after = haystack[start + matched.len()..].chars().next();

		!before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
	})
}

use std::{collections::BTreeMap, fmt};

use serde::{
	Deserialize, Deserializer, Serialize,
	de::{self, Visitor},
};

/// Node labels reported by [`GraphStatistics`], zero-filled when absent.
pub const TRACKED_LABELS: [&str; 6] = ["Dish", "Cuisine", "Tag", "Ingredient", "Macro", "Benefit"];

/// One row of a dish query. Left joins surface as `None` fields and as list entries whose
/// fields are all `None`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct DishRow {
	#[serde(default)]
	pub dish_name: Option<String>,
	#[serde(default, deserialize_with = "optional_number")]
	pub calories: Option<f64>,
	#[serde(default, deserialize_with = "optional_number")]
	pub protein: Option<f64>,
	#[serde(default, deserialize_with = "optional_number")]
	pub carbs: Option<f64>,
	#[serde(default, deserialize_with = "optional_number")]
	pub fat: Option<f64>,
	#[serde(default)]
	pub cuisine: Option<String>,
	#[serde(default)]
	pub benefits: Option<Vec<Option<String>>>,
	#[serde(default)]
	pub ingredients: Option<Vec<Option<RawIngredient>>>,
	#[serde(default)]
	pub matched_ingredients: Option<Vec<Option<String>>>,
	#[serde(default, deserialize_with = "optional_number")]
	pub match_count: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawIngredient {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default, deserialize_with = "optional_number")]
	pub quantity: Option<f64>,
	#[serde(default)]
	pub benefits: Option<Vec<Option<String>>>,
}

/// Per-100g macro facts for one ingredient.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct IngredientMacroRow {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default, deserialize_with = "optional_number")]
	pub calories: Option<f64>,
	#[serde(default, deserialize_with = "optional_number")]
	pub protein: Option<f64>,
	#[serde(default, deserialize_with = "optional_number")]
	pub carbs: Option<f64>,
	#[serde(default, deserialize_with = "optional_number")]
	pub fat: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RawRecord {
	Dish(DishRow),
	Ingredient(IngredientMacroRow),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
	pub labels: BTreeMap<String, u64>,
	pub nodes: u64,
	pub relationships: u64,
}
impl GraphStatistics {
	pub fn from_label_counts<I>(counts: I, nodes: u64, relationships: u64) -> Self
	where
		I: IntoIterator<Item = (String, u64)>,
	{
		let mut labels: BTreeMap<String, u64> =
			TRACKED_LABELS.iter().map(|label| (label.to_string(), 0)).collect();

		for (label, count) in counts {
			if let Some(slot) = labels.get_mut(&label) {
				*slot += count;
			}
		}

		Self { labels, nodes, relationships }
	}
}

/// Accepts integers, floats, numeric strings, and nulls. Anything else decodes as `None`.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	deserializer.deserialize_any(OptionalNumberVisitor)
}

struct OptionalNumberVisitor;
impl<'de> Visitor<'de> for OptionalNumberVisitor {
	type Value = Option<f64>;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		formatter.write_str("a number or null")
	}

	fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(Some(value as f64))
	}

	fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(Some(value as f64))
	}

	fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(value.is_finite().then_some(value))
	}

	fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(value.trim().parse::<f64>().ok().filter(|value| value.is_finite()))
	}

	fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(None)
	}

	fn visit_none<E>(self) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(None)
	}

	fn visit_unit<E>(self) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(None)
	}

	fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn statistics_zero_fill_tracked_labels() {
		let stats = GraphStatistics::from_label_counts(
			vec![("Dish".to_string(), 12), ("Unrelated".to_string(), 3)],
			40,
			90,
		);

		assert_eq!(stats.labels.len(), TRACKED_LABELS.len());
		assert_eq!(stats.labels["Dish"], 12);
		assert_eq!(stats.labels["Tag"], 0);
		assert!(!stats.labels.contains_key("Unrelated"));
	}
}

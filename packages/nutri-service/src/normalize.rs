use serde::Serialize;

use nutri_storage::{
	RawRecord,
	models::{DishRow, IngredientMacroRow, RawIngredient},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
	Dish,
	Ingredient,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
	Dish(DishRecord),
	Ingredient(IngredientRecord),
}
impl Record {
	pub fn kind(&self) -> RecordKind {
		match self {
			Self::Dish(_) => RecordKind::Dish,
			Self::Ingredient(_) => RecordKind::Ingredient,
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Dish(dish) => &dish.name,
			Self::Ingredient(ingredient) => &ingredient.name,
		}
	}

	/// Identity used for deduplication: kind plus case-folded, trimmed name.
	pub fn key(&self) -> (RecordKind, String) {
		(self.kind(), self.name().trim().to_lowercase())
	}
}

/// Aggregate dish facts. Unknown numbers stay `None`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DishRecord {
	pub name: String,
	pub calories: Option<f64>,
	pub protein: Option<f64>,
	pub carbs: Option<f64>,
	pub fat: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cuisine: Option<String>,
	pub benefits: Vec<String>,
	pub ingredients: Vec<IngredientUse>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub matched_ingredients: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub match_count: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IngredientUse {
	pub name: String,
	pub quantity_g: Option<f64>,
	pub benefits: Vec<String>,
}

/// Per-100g macro facts for one ingredient.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IngredientRecord {
	pub name: String,
	pub calories: Option<f64>,
	pub protein: Option<f64>,
	pub carbs: Option<f64>,
	pub fat: Option<f64>,
}

/// Converts one raw row. Rows without a usable name carry no identity and are dropped.
pub fn normalize(raw: RawRecord) -> Option<Record> {
	match raw {
		RawRecord::Dish(row) => normalize_dish(row).map(Record::Dish),
		RawRecord::Ingredient(row) => normalize_ingredient(row).map(Record::Ingredient),
	}
}

fn normalize_dish(row: DishRow) -> Option<DishRecord> {
	let name = present(row.dish_name)?;
	let matched_ingredients = names(row.matched_ingredients);
	let match_count = row
		.match_count
		.filter(|count| *count >= 0.0)
		.map(|count| count.round() as u64)
		.or_else(|| (!matched_ingredients.is_empty()).then_some(matched_ingredients.len() as u64));
	let ingredients = row
		.ingredients
		.unwrap_or_default()
		.into_iter()
		.flatten()
		.filter_map(ingredient_use)
		.collect();

	Some(DishRecord {
		name,
		calories: row.calories,
		protein: row.protein,
		carbs: row.carbs,
		fat: row.fat,
		cuisine: present(row.cuisine),
		benefits: names(row.benefits),
		ingredients,
		matched_ingredients: (!matched_ingredients.is_empty()).then_some(matched_ingredients),
		match_count,
	})
}

fn normalize_ingredient(row: IngredientMacroRow) -> Option<IngredientRecord> {
	Some(IngredientRecord {
		name: present(row.name)?,
		calories: row.calories,
		protein: row.protein,
		carbs: row.carbs,
		fat: row.fat,
	})
}

fn ingredient_use(raw: RawIngredient) -> Option<IngredientUse> {
	Some(IngredientUse {
		name: present(raw.name)?,
		quantity_g: raw.quantity,
		benefits: names(raw.benefits),
	})
}

fn present(value: Option<String>) -> Option<String> {
	value.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

/// Drops null and blank entries and repeats, keeping first-seen order.
fn names(values: Option<Vec<Option<String>>>) -> Vec<String> {
	let mut out: Vec<String> = Vec::new();

	for value in values.unwrap_or_default().into_iter().filter_map(present) {
		if !out.contains(&value) {
			out.push(value);
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bare_dish_normalizes_to_empty_collections() {
		let row = DishRow {
			dish_name: Some("Trà Đá".to_string()),
			benefits: Some(vec![None]),
			ingredients: Some(vec![
				Some(RawIngredient { name: None, quantity: None, benefits: Some(vec![]) }),
				None,
			]),
			..Default::default()
		};
		let Some(Record::Dish(dish)) = normalize(RawRecord::Dish(row)) else {
			panic!("Expected a dish record.");
		};

		assert_eq!(dish.cuisine, None);
		assert!(dish.benefits.is_empty());
		assert!(dish.ingredients.is_empty());
		assert_eq!(dish.calories, None);
		assert_eq!(dish.matched_ingredients, None);
		assert_eq!(dish.match_count, None);
	}

	#[test]
	fn nested_ingredient_benefits_are_null_filtered() {
		let row = DishRow {
			dish_name: Some("Phở Bò".to_string()),
			ingredients: Some(vec![Some(RawIngredient {
				name: Some("thịt bò".to_string()),
				quantity: Some(100.0),
				benefits: Some(vec![None, Some("Tăng cơ".to_string()), Some(" ".to_string())]),
			})]),
			..Default::default()
		};
		let Some(Record::Dish(dish)) = normalize(RawRecord::Dish(row)) else {
			panic!("Expected a dish record.");
		};

		assert_eq!(dish.ingredients, vec![IngredientUse {
			name: "thịt bò".to_string(),
			quantity_g: Some(100.0),
			benefits: vec!["Tăng cơ".to_string()],
		}]);
	}

	#[test]
	fn nameless_rows_are_dropped() {
		assert_eq!(normalize(RawRecord::Dish(DishRow::default())), None);
		assert_eq!(normalize(RawRecord::Ingredient(IngredientMacroRow::default())), None);
	}

	#[test]
	fn keys_fold_case_and_whitespace() {
		let record = Record::Ingredient(IngredientRecord {
			name: "Trứng ".to_string(),
			calories: None,
			protein: None,
			carbs: None,
			fat: None,
		});

		assert_eq!(record.key(), (RecordKind::Ingredient, "trứng".to_string()));
	}
}

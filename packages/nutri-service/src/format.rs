use std::fmt::Write as _;

use nutri_config::Resolver;

use crate::{
	Error,
	normalize::{DishRecord, IngredientRecord, IngredientUse, Record},
	resolve::{Outcome, ResolveResponse},
};

pub const HEADER: &str = "🍜 **TƯ VẤN DINH DƯỠNG MÓN ĂN VIỆT NAM (GraphRAG):**";
pub const CLOSING_HINT: &str =
	"💡 **Gợi ý:** Dựa trên thông tin GraphRAG, bạn có thể chọn món phù hợp với mục tiêu của mình.";
pub const NO_RESULTS_MESSAGE: &str =
	"❌ Không tìm thấy thông tin phù hợp. Hãy thử hỏi về tên món ăn, calories, protein, hoặc benefits.";
pub const UNKNOWN: &str = "không rõ";

/// Renders the answer block handed back to the conversational caller.
pub fn render(response: &ResolveResponse, cfg: &Resolver) -> String {
	if response.outcome == Outcome::NoResults {
		return NO_RESULTS_MESSAGE.to_string();
	}

	let mut out = format!("{HEADER}\n\n");

	for (index, record) in response.records.iter().enumerate() {
		match record {
			Record::Dish(dish) => render_dish(&mut out, index + 1, dish, cfg),
			Record::Ingredient(ingredient) => render_ingredient(&mut out, index + 1, ingredient),
		}
	}

	out.push_str(CLOSING_HINT);

	out
}

/// Friendly message for a failed resolution, with a truncated diagnostic tail for operators.
pub fn failure_message(err: &Error, diagnostic_chars: usize) -> String {
	match err {
		Error::InvalidRequest { .. } => NO_RESULTS_MESSAGE.to_string(),
		Error::StoreUnavailable { message } | Error::Storage { message } => {
			let detail: String = message.chars().take(diagnostic_chars).collect();

			format!(
				"❌ Xin lỗi, có lỗi khi truy vấn GraphRAG database. Lỗi: {detail}. Hãy thử lại với câu hỏi khác hoặc kiểm tra kết nối Neo4j."
			)
		},
	}
}

/// `name (200g; lợi ích: a, b)` entries, capped at `ingredient_list_limit` with a trailing `...`.
pub fn ingredient_list(ingredients: &[IngredientUse], cfg: &Resolver) -> String {
	let mut parts: Vec<String> = ingredients
		.iter()
		.take(cfg.ingredient_list_limit)
		.map(|ingredient| {
			let mut details = Vec::new();

			if let Some(quantity) = ingredient.quantity_g {
				details.push(format!("{}g", number(quantity)));
			}
			if !ingredient.benefits.is_empty() {
				let benefits: Vec<&str> = ingredient
					.benefits
					.iter()
					.take(cfg.ingredient_benefit_limit)
					.map(String::as_str)
					.collect();

				details.push(format!("lợi ích: {}", benefits.join(", ")));
			}

			if details.is_empty() {
				ingredient.name.clone()
			} else {
				format!("{} ({})", ingredient.name, details.join("; "))
			}
		})
		.collect();

	if ingredients.len() > cfg.ingredient_list_limit {
		parts.push("...".to_string());
	}

	parts.join(", ")
}

fn render_dish(out: &mut String, position: usize, dish: &DishRecord, cfg: &Resolver) {
	let _ = writeln!(out, "**{position}. {}**", dish.name);
	let _ = writeln!(
		out,
		"   📊 Calories: {} | Protein: {} | Carbs: {} | Fat: {}",
		amount(dish.calories, ""),
		amount(dish.protein, "g"),
		amount(dish.carbs, "g"),
		amount(dish.fat, "g"),
	);

	if let Some(cuisine) = &dish.cuisine {
		let _ = writeln!(out, "   🗺️ Cuisine: {cuisine}");
	}
	if !dish.benefits.is_empty() {
		let _ = writeln!(out, "   ✨ Benefits: {}", dish.benefits.join(", "));
	}
	if let Some(matched) = dish.matched_ingredients.as_ref().filter(|names| !names.is_empty()) {
		let _ = writeln!(
			out,
			"   ✅ Nguyên liệu khớp: {}",
			ingredient_list(&matched_uses(dish, matched), cfg)
		);
	}
	if !dish.ingredients.is_empty() {
		let _ = writeln!(out, "   🥘 Ingredients: {}", ingredient_list(&dish.ingredients, cfg));
	}

	out.push('\n');
}

/// Matched names in match order, carrying the quantity and benefits the dish records for them.
fn matched_uses(dish: &DishRecord, matched: &[String]) -> Vec<IngredientUse> {
	matched
		.iter()
		.map(|name| {
			dish.ingredients
				.iter()
				.find(|ingredient| ingredient.name.to_lowercase() == name.to_lowercase())
				.cloned()
				.unwrap_or_else(|| IngredientUse {
					name: name.clone(),
					quantity_g: None,
					benefits: Vec::new(),
				})
		})
		.collect()
}

fn render_ingredient(out: &mut String, position: usize, ingredient: &IngredientRecord) {
	let _ = writeln!(out, "**{position}. Nguyên liệu: {}**", ingredient.name);
	let _ = writeln!(
		out,
		"   📊 (per 100g) Calories: {} | Protein: {} | Carbs: {} | Fat: {}\n",
		amount(ingredient.calories, ""),
		amount(ingredient.protein, "g"),
		amount(ingredient.carbs, "g"),
		amount(ingredient.fat, "g"),
	);
}

fn amount(value: Option<f64>, unit: &str) -> String {
	match value {
		Some(value) => format!("{}{unit}", number(value)),
		None => UNKNOWN.to_string(),
	}
}

/// Whole numbers without a fraction, everything else with at most one decimal.
fn number(value: f64) -> String {
	if value.fract() == 0.0 {
		format!("{value:.0}")
	} else {
		let rendered = format!("{value:.1}");

		rendered.strip_suffix(".0").map(str::to_string).unwrap_or(rendered)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ingredient(name: &str, quantity: Option<f64>, benefits: &[&str]) -> IngredientUse {
		IngredientUse {
			name: name.to_string(),
			quantity_g: quantity,
			benefits: benefits.iter().map(|benefit| benefit.to_string()).collect(),
		}
	}

	#[test]
	fn ingredient_details_join_quantity_and_benefits() {
		let list = ingredient_list(
			&[
				ingredient("thịt bò", Some(100.0), &["Tăng cơ"]),
				ingredient("gừng", None, &[]),
				ingredient("hành lá", Some(7.5), &[]),
			],
			&Resolver::default(),
		);

		assert_eq!(list, "thịt bò (100g; lợi ích: Tăng cơ), gừng, hành lá (7.5g)");
	}

	#[test]
	fn ingredient_list_is_capped_with_ellipsis() {
		let cfg = Resolver { ingredient_list_limit: 2, ..Resolver::default() };
		let list = ingredient_list(
			&[ingredient("a", None, &[]), ingredient("b", None, &[]), ingredient("c", None, &[])],
			&cfg,
		);

		assert_eq!(list, "a, b, ...");
	}

	#[test]
	fn ingredient_benefits_are_capped() {
		let cfg = Resolver { ingredient_benefit_limit: 1, ..Resolver::default() };
		let list = ingredient_list(&[ingredient("tôm", None, &["Tăng cơ", "Khớp"])], &cfg);

		assert_eq!(list, "tôm (lợi ích: Tăng cơ)");
	}

	#[test]
	fn matched_ingredients_carry_dish_details() {
		let dish = DishRecord {
			name: "Trứng Chiên Cà Chua".to_string(),
			calories: Some(220.0),
			protein: None,
			carbs: None,
			fat: None,
			cuisine: None,
			benefits: Vec::new(),
			ingredients: vec![
				ingredient("Trứng", Some(100.0), &["Tăng cơ"]),
				ingredient("cà chua", Some(100.0), &[]),
				ingredient("hành lá", Some(10.0), &[]),
			],
			matched_ingredients: Some(vec!["trứng".to_string(), "tiêu".to_string()]),
			match_count: Some(2),
		};
		let mut out = String::new();

		render_dish(&mut out, 1, &dish, &Resolver::default());

		assert!(
			out.contains("   ✅ Nguyên liệu khớp: Trứng (100g; lợi ích: Tăng cơ), tiêu\n"),
			"Unexpected block: {out}"
		);
	}

	#[test]
	fn unknown_amounts_render_as_unknown() {
		assert_eq!(amount(None, "g"), UNKNOWN);
		assert_eq!(amount(Some(15.0), "g"), "15g");
		assert_eq!(amount(Some(0.3), "g"), "0.3g");
	}

	#[test]
	fn diagnostic_detail_is_truncated() {
		let err = Error::Storage { message: "x".repeat(500) };
		let message = failure_message(&err, 100);

		assert!(message.starts_with("❌ Xin lỗi"));
		assert!(message.contains(&format!("Lỗi: {}.", "x".repeat(100))));
		assert!(!message.contains(&"x".repeat(101)));
	}
}

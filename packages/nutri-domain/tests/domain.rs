use nutri_domain::{Extraction, NumericUnit, extract, keywords};

fn vocabulary() -> Vec<String> {
	["trứng", "cà chua", "thịt bò", "bánh phở", "hành lá", "gừng", "đậu phụ"]
		.iter()
		.map(|name| name.to_string())
		.collect()
}

#[test]
fn bun_bo_shadows_bun() {
	let extraction = extract("Bún bò Huế với bún chả, món nào ít calo hơn?", &vocabulary());

	assert_eq!(extraction.dish_keyword.as_deref(), Some("bún chả"));

	let extraction = extract("cho mình hỏi bún bò", &vocabulary());

	assert_eq!(extraction.dish_keyword.as_deref(), Some("bún bò"));
}

#[test]
fn pho_bo_calorie_question() {
	let extraction = extract("phở bò có bao nhiêu calories", &vocabulary());

	assert_eq!(extraction.dish_keyword.as_deref(), Some("phở bò"));
	assert!(extraction.ingredient_matches.is_empty());
	assert!(extraction.numeric_targets.is_empty());
	assert!(extraction.benefit_keywords.is_empty());
	assert!(extraction.intents.broad_dish_term);
}

#[test]
fn two_ingredients_activate_discovery() {
	let extraction = extract("tôi có trứng và cà chua", &vocabulary());

	assert_eq!(extraction.dish_keyword, None);
	assert_eq!(extraction.ingredient_matches, vec!["cà chua".to_string(), "trứng".to_string()]);
	assert!(extraction.intents.ingredient_discovery);
}

#[test]
fn calorie_target_and_goal_are_both_read() {
	let extraction = extract("món khoảng 400 cal giúp tăng cơ", &vocabulary());

	assert_eq!(extraction.calorie_target(), Some(400.0));
	assert_eq!(extraction.numeric_targets[0].unit, NumericUnit::Calories);
	assert_eq!(extraction.benefit_keywords, vec!["tăng cơ".to_string()]);
}

#[test]
fn unrelated_query_is_empty() {
	let extraction = extract("thời tiết hôm nay thế nào", &vocabulary());

	assert_eq!(extraction, Extraction::default());
}

#[test]
fn extraction_serializes_with_snake_case_units() {
	let extraction = extract("món 300 kcal", &[]);
	let value = serde_json::to_value(&extraction).expect("Failed to serialize extraction.");

	assert_eq!(value["numeric_targets"][0]["unit"], "calories");
	assert_eq!(value["numeric_targets"][0]["value"], 300.0);
	assert_eq!(value["dish_keyword"], serde_json::Value::Null);
	assert_eq!(value["intents"]["low_calorie"], false);
}

#[test]
fn every_dish_keyword_is_normalized() {
	for keyword in keywords::DISH_KEYWORDS {
		assert_eq!(nutri_domain::normalize_query(keyword), *keyword);
	}
}

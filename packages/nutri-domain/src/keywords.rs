//! Curated lookup tables consulted by the extractor.
//!
//! All tables hold lowercase, NFC-normalized Vietnamese or English fragments. Order inside a
//! table carries no meaning; callers that need longest-first matching sort at use.

/// Dish-name fragments recognised by the primary name match.
pub const DISH_KEYWORDS: &[&str] = &[
	"phở bò",
	"phở gà",
	"phở",
	"bún bò",
	"bún chả",
	"bún",
	"cơm tấm",
	"cơm",
	"bánh mì",
	"bánh cuốn",
	"bánh tét",
	"bánh",
	"gỏi cuốn",
	"gỏi",
	"chả cá",
	"chả",
	"canh chua",
	"canh",
	"thịt kho",
	"thịt",
	"gà luộc",
	"gà",
	"cháo gà",
	"cháo",
	"nem nướng",
	"nem",
	"bò lúc lắc",
	"bò",
	"chè đậu",
	"chè",
	"nước mía",
	"nước",
	"trà đá",
	"trà",
	"cà phê",
	"tôm rang",
	"tôm",
];

/// Coarse dish terms; any of them in a query arms the fallback substring match.
pub const FALLBACK_TRIGGER_TERMS: &[&str] = &[
	"phở", "bún", "cơm", "bánh", "gỏi", "chả", "canh", "thịt", "gà", "cháo", "nem", "bò", "chè",
	"nước", "trà", "cà phê", "tôm",
];

/// Keyword list the fallback re-derives its search term from. It drops the meat-specific
/// "phở" variants so the retry searches every phở dish.
pub const FALLBACK_KEYWORDS: &[&str] = &[
	"phở",
	"bún bò",
	"bún chả",
	"bún",
	"cơm tấm",
	"cơm",
	"bánh mì",
	"bánh cuốn",
	"bánh tét",
	"bánh",
	"gỏi cuốn",
	"gỏi",
	"chả cá",
	"chả",
	"canh chua",
	"canh",
	"thịt kho",
	"thịt",
	"gà luộc",
	"gà",
	"cháo gà",
	"cháo",
	"nem nướng",
	"nem",
	"bò lúc lắc",
	"bò",
	"chè đậu",
	"chè",
	"nước mía",
	"nước",
	"trà đá",
	"trà",
	"cà phê",
	"tôm rang",
	"tôm",
];

/// User-facing benefit concept and the synonyms searched against `Benefit.name`.
pub const BENEFIT_CONCEPTS: &[(&str, &[&str])] = &[
	("tăng cơ", &["tăng cơ", "protein cao", "protein"]),
	("giảm cân", &["giảm cân", "ít calories", "rau xanh"]),
	("khớp", &["khớp", "collagen", "da"]),
	("tim mạch", &["tim mạch", "omega-3", "não bộ"]),
	("miễn dịch", &["miễn dịch", "vitamin c"]),
	("năng lượng", &["năng lượng", "pre-workout", "caffeine"]),
	("tiêu hóa", &["tiêu hóa", "dễ tiêu"]),
];

/// Explicit requests to reason from ingredients or recipes.
pub const INGREDIENT_INTENT_TERMS: &[&str] =
	&["nguyên liệu", "ingredient", "recipe", "công thức"];

/// Ingredient/composition questions that ask for per-100g macro facts.
pub const COMPOSITION_TERMS: &[&str] = &["ingredient", "nguyên liệu", "thành phần"];

/// "món" paired with one of these reads as "which dish can I make with ...".
pub const DISH_TERM: &str = "món";
pub const COOKING_TERMS: &[&str] = &["có", "làm", "nấu", "từ", "với"];

pub const PROTEIN_TERM: &str = "protein";
pub const HIGH_AMOUNT_TERMS: &[&str] = &["cao", "nhiều"];

pub const LOW_CALORIE_TERMS: &[&str] =
	&["ít calo", "ít cal", "low calorie", "low-calorie", "giảm cân"];

/// Concept labels of [`BENEFIT_CONCEPTS`], in table order.
pub fn benefit_concept_labels() -> impl Iterator<Item = &'static str> {
	BENEFIT_CONCEPTS.iter().map(|(label, _)| *label)
}

/// Synonyms registered for a concept label.
pub fn benefit_synonyms(label: &str) -> Option<&'static [&'static str]> {
	BENEFIT_CONCEPTS.iter().find(|(concept, _)| *concept == label).map(|(_, terms)| *terms)
}

/// `terms` sorted longest-first by character count, ties alphabetical.
pub fn longest_first<'a>(terms: &[&'a str]) -> Vec<&'a str> {
	let mut sorted = terms.to_vec();

	sorted.sort_by(|lhs, rhs| {
		rhs.chars().count().cmp(&lhs.chars().count()).then_with(|| lhs.cmp(rhs))
	});

	sorted
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn longest_first_orders_by_char_count() {
		let sorted = longest_first(&["bún", "bún bò", "bò"]);

		assert_eq!(sorted, vec!["bún bò", "bún", "bò"]);
	}

	#[test]
	fn every_fallback_keyword_is_armed_by_a_trigger_term() {
		for keyword in FALLBACK_KEYWORDS {
			assert!(
				FALLBACK_TRIGGER_TERMS.iter().any(|term| keyword.contains(term)),
				"Fallback keyword {keyword:?} can never be reached."
			);
		}
	}

	#[test]
	fn benefit_synonyms_include_the_concept_label() {
		for label in benefit_concept_labels() {
			let synonyms = benefit_synonyms(label).expect("Concept must have synonyms.");

			assert!(synonyms.contains(&label), "Concept {label:?} must search for itself.");
		}
	}
}

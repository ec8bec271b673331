use crate::{FixtureDish, FixtureIngredient, FixtureMacro};

const VIETNAMESE: &str = "Việt Nam";

pub(crate) fn dishes() -> Vec<FixtureDish> {
	vec![
		dish(
			"Phở Bò",
			[Some(350.0), Some(15.0), Some(45.0), Some(12.0)],
			&[("bánh phở", 200.0), ("thịt bò", 100.0), ("hành lá", 10.0), ("gừng", 5.0)],
			&["Năng lượng", "Tăng cơ"],
		),
		dish(
			"Phở Gà",
			[Some(320.0), Some(18.0), Some(44.0), Some(8.0)],
			&[("bánh phở", 200.0), ("thịt gà", 100.0), ("hành lá", 10.0)],
			&["Năng lượng", "Dễ tiêu"],
		),
		dish(
			"Gà Luộc",
			[Some(240.0), Some(30.0), Some(0.0), Some(13.0)],
			&[("thịt gà", 200.0), ("gừng", 5.0)],
			&["Tăng cơ", "Protein cao"],
		),
		dish(
			"Bò Lúc Lắc",
			[Some(420.0), Some(26.0), Some(12.0), Some(28.0)],
			&[("thịt bò", 150.0), ("hành lá", 20.0)],
			&["Tăng cơ"],
		),
		dish(
			"Cơm Tấm Sườn",
			[Some(600.0), Some(22.0), Some(75.0), Some(20.0)],
			&[("gạo", 200.0), ("sườn heo", 120.0), ("trứng", 50.0)],
			&["Năng lượng"],
		),
		dish(
			"Trứng Chiên Cà Chua",
			[Some(220.0), Some(13.0), Some(8.0), Some(15.0)],
			&[("trứng", 100.0), ("cà chua", 100.0), ("hành lá", 10.0)],
			&["Tăng cơ", "Miễn dịch"],
		),
		dish(
			"Canh Chua Cá Lóc",
			[Some(150.0), Some(14.0), Some(12.0), Some(4.0)],
			&[("cà chua", 80.0), ("cá lóc", 150.0), ("dứa", 50.0)],
			&["Tim mạch", "Tiêu hóa"],
		),
		dish("Trứng Luộc", [Some(155.0), Some(13.0), Some(1.0), Some(11.0)], &[("trứng", 100.0)], &[
			"Tăng cơ",
		]),
		dish(
			"Gỏi Cuốn Tôm",
			[Some(180.0), Some(12.0), Some(25.0), Some(3.0)],
			&[("tôm", 60.0), ("bún tươi", 50.0), ("rau sống", 40.0)],
			&["Giảm cân", "Ít calories"],
		),
		dish(
			"Đậu Phụ Sốt Cà Chua",
			[Some(170.0), Some(10.0), Some(8.0), Some(10.0)],
			&[("đậu phụ", 150.0), ("cà chua", 100.0)],
			&["Tăng cơ", "Giảm cân"],
		),
		dish(
			"Bún Chả",
			[Some(550.0), Some(25.0), Some(60.0), Some(22.0)],
			&[("bún tươi", 200.0), ("thịt heo", 120.0), ("rau sống", 50.0)],
			&["Năng lượng"],
		),
		dish(
			"Bún Bò Huế",
			[Some(480.0), Some(24.0), Some(55.0), Some(16.0)],
			&[("bún tươi", 200.0), ("thịt bò", 100.0), ("gừng", 5.0)],
			&["Năng lượng"],
		),
		dish("Chè Đậu Xanh", [Some(230.0), Some(6.0), Some(45.0), Some(3.0)], &[], &["Năng lượng"]),
		dish(
			"Cháo Gà",
			[Some(210.0), Some(21.0), Some(28.0), Some(5.0)],
			&[("gạo", 60.0), ("thịt gà", 80.0), ("gừng", 5.0)],
			&["Dễ tiêu", "Miễn dịch"],
		),
		// Bare node: no cuisine, ingredients, benefits, or macros.
		FixtureDish {
			name: "Trà Đá".to_string(),
			calories: None,
			protein: None,
			carbs: None,
			fat: None,
			cuisine: None,
			ingredients: Vec::new(),
			benefits: Vec::new(),
		},
	]
}

pub(crate) fn ingredients() -> Vec<FixtureIngredient> {
	vec![
		ingredient("bánh phở", &["Năng lượng"], Some([143.0, 3.2, 32.0, 0.4])),
		ingredient("thịt bò", &["Tăng cơ"], Some([250.0, 26.0, 0.0, 15.0])),
		ingredient("hành lá", &["Miễn dịch"], Some([32.0, 1.8, 7.3, 0.2])),
		ingredient("gừng", &["Tiêu hóa"], Some([80.0, 1.8, 18.0, 0.8])),
		ingredient("thịt gà", &["Tăng cơ"], Some([239.0, 27.0, 0.0, 14.0])),
		ingredient("trứng", &["Tăng cơ"], Some([155.0, 13.0, 1.1, 11.0])),
		ingredient("cà chua", &["Miễn dịch", "Tim mạch"], Some([18.0, 0.9, 3.9, 0.2])),
		ingredient("cá lóc", &["Tim mạch"], Some([97.0, 18.0, 0.0, 2.7])),
		ingredient("dứa", &["Tiêu hóa"], None),
		ingredient("gạo", &["Năng lượng"], Some([130.0, 2.7, 28.0, 0.3])),
		ingredient("sườn heo", &["Tăng cơ"], Some([277.0, 17.0, 0.0, 23.0])),
		ingredient("bún tươi", &["Năng lượng"], Some([110.0, 1.7, 25.0, 0.1])),
		ingredient("tôm", &["Tăng cơ", "Khớp"], Some([99.0, 24.0, 0.2, 0.3])),
		ingredient("rau sống", &["Giảm cân", "Tiêu hóa"], Some([20.0, 1.5, 3.5, 0.2])),
		ingredient("đậu phụ", &["Tăng cơ"], Some([76.0, 8.0, 1.9, 4.8])),
		ingredient("thịt heo", &["Năng lượng"], Some([242.0, 27.0, 0.0, 14.0])),
	]
}

fn dish(
	name: &str,
	[calories, protein, carbs, fat]: [Option<f64>; 4],
	ingredients: &[(&str, f64)],
	benefits: &[&str],
) -> FixtureDish {
	FixtureDish {
		name: name.to_string(),
		calories,
		protein,
		carbs,
		fat,
		cuisine: Some(VIETNAMESE.to_string()),
		ingredients: ingredients
			.iter()
			.map(|(name, quantity)| (name.to_string(), Some(*quantity)))
			.collect(),
		benefits: benefits.iter().map(|benefit| benefit.to_string()).collect(),
	}
}

fn ingredient(name: &str, benefits: &[&str], macros: Option<[f64; 4]>) -> FixtureIngredient {
	FixtureIngredient {
		name: name.to_string(),
		benefits: benefits.iter().map(|benefit| benefit.to_string()).collect(),
		macros: macros.map(|[calories, protein, carbs, fat]| FixtureMacro {
			calories: Some(calories),
			protein: Some(protein),
			carbs: Some(carbs),
			fat: Some(fat),
		}),
	}
}

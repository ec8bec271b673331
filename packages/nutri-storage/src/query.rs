use serde::Serialize;

/// A read-only graph lookup. Every variant except [`GraphQuery::IngredientMacros`] yields dish
/// rows.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQuery {
	/// Case-insensitive substring match on `Dish.name`.
	DishesByName { keyword: String },
	/// Dishes containing any of the lowercased ingredient names, most matches first, then
	/// fewest calories.
	DishesByIngredients { names: Vec<String> },
	/// `Dish.calories` within `target ± tolerance`, closest first.
	DishesByCalorieRange { target: f64, tolerance: f64 },
	/// Dishes with a benefit whose name contains any term.
	DishesByBenefitTerms { terms: Vec<String> },
	/// `Dish.protein_g >= min_protein`, highest first.
	DishesByMinProtein { min_protein: f64 },
	/// `Dish.calories <= max_calories`, lowest first.
	DishesByMaxCalories { max_calories: f64 },
	/// Ingredients whose name contains any term, with their per-100g macros.
	IngredientMacros { terms: Vec<String> },
}
impl GraphQuery {
	pub fn kind(&self) -> QueryKind {
		match self {
			Self::DishesByName { .. } => QueryKind::DishesByName,
			Self::DishesByIngredients { .. } => QueryKind::DishesByIngredients,
			Self::DishesByCalorieRange { .. } => QueryKind::DishesByCalorieRange,
			Self::DishesByBenefitTerms { .. } => QueryKind::DishesByBenefitTerms,
			Self::DishesByMinProtein { .. } => QueryKind::DishesByMinProtein,
			Self::DishesByMaxCalories { .. } => QueryKind::DishesByMaxCalories,
			Self::IngredientMacros { .. } => QueryKind::IngredientMacros,
		}
	}

	/// Rejects lookups that cannot match anything meaningful.
	pub fn validate(&self) -> crate::Result<()> {
		let empty = match self {
			Self::DishesByName { keyword } => keyword.trim().is_empty(),
			Self::DishesByIngredients { names } => names.iter().all(|name| name.trim().is_empty()),
			Self::DishesByBenefitTerms { terms } | Self::IngredientMacros { terms } =>
				terms.iter().all(|term| term.trim().is_empty()),
			Self::DishesByCalorieRange { target, tolerance } =>
				!target.is_finite() || !tolerance.is_finite() || *tolerance < 0.0,
			Self::DishesByMinProtein { min_protein: value }
			| Self::DishesByMaxCalories { max_calories: value } => !value.is_finite(),
		};

		if empty {
			return Err(crate::Error::InvalidArgument(format!(
				"{} needs at least one usable search term.",
				self.kind().as_str()
			)));
		}

		Ok(())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
	DishesByName,
	DishesByIngredients,
	DishesByCalorieRange,
	DishesByBenefitTerms,
	DishesByMinProtein,
	DishesByMaxCalories,
	IngredientMacros,
}
impl QueryKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::DishesByName => "dishes_by_name",
			Self::DishesByIngredients => "dishes_by_ingredients",
			Self::DishesByCalorieRange => "dishes_by_calorie_range",
			Self::DishesByBenefitTerms => "dishes_by_benefit_terms",
			Self::DishesByMinProtein => "dishes_by_min_protein",
			Self::DishesByMaxCalories => "dishes_by_max_calories",
			Self::IngredientMacros => "ingredient_macros",
		}
	}
}

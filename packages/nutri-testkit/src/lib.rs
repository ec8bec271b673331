mod dataset;

use std::{
	cmp::Ordering as CmpOrdering,
	collections::HashMap,
	env,
	sync::{
		Mutex,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
};

use nutri_storage::{
	BoxFuture, Error, GraphQuery, GraphReader, GraphStatistics, QueryKind, RawRecord, Result,
	models::{DishRow, IngredientMacroRow, RawIngredient},
};

pub fn env_neo4j_uri() -> Option<String> {
	env::var("NUTRI_NEO4J_URI").ok()
}

pub fn env_neo4j_user() -> String {
	env::var("NUTRI_NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string())
}

pub fn env_neo4j_password() -> Option<String> {
	env::var("NUTRI_NEO4J_PASSWORD").ok()
}

#[derive(Clone, Debug)]
pub struct FixtureDish {
	pub name: String,
	pub calories: Option<f64>,
	pub protein: Option<f64>,
	pub carbs: Option<f64>,
	pub fat: Option<f64>,
	pub cuisine: Option<String>,
	/// Ingredient name and `quantity_g`.
	pub ingredients: Vec<(String, Option<f64>)>,
	pub benefits: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct FixtureMacro {
	pub calories: Option<f64>,
	pub protein: Option<f64>,
	pub carbs: Option<f64>,
	pub fat: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct FixtureIngredient {
	pub name: String,
	pub benefits: Vec<String>,
	pub macros: Option<FixtureMacro>,
}

/// Failure a [`FixtureGraph`] injects into one query kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
	/// A row the decoder rejects.
	Decode,
	/// A round trip that outlived the query budget.
	Timeout,
	/// The driver losing its connection mid-request.
	Disconnect,
}
impl Fault {
	fn error(self, kind: QueryKind) -> Error {
		match self {
			Self::Decode => Error::Decode(format!("Injected failure for {}.", kind.as_str())),
			Self::Timeout => Error::Timeout { timeout_ms: 5_000 },
			Self::Disconnect => neo4rs::Error::ConnectionError.into(),
		}
	}
}

/// In-memory graph answering [`GraphQuery`] the way the Cypher statements do, including the
/// all-null maps a left join leaves behind.
pub struct FixtureGraph {
	dishes: Vec<FixtureDish>,
	ingredients: Vec<FixtureIngredient>,
	failing: Mutex<HashMap<QueryKind, Fault>>,
	offline: AtomicBool,
	vocabulary_offline: AtomicBool,
	vocabulary_loads: AtomicUsize,
	executed: Mutex<Vec<QueryKind>>,
}
impl FixtureGraph {
	pub fn new(dishes: Vec<FixtureDish>, ingredients: Vec<FixtureIngredient>) -> Self {
		Self {
			dishes,
			ingredients,
			failing: Mutex::new(HashMap::new()),
			offline: AtomicBool::new(false),
			vocabulary_offline: AtomicBool::new(false),
			vocabulary_loads: AtomicUsize::new(0),
			executed: Mutex::new(Vec::new()),
		}
	}

	/// A small Vietnamese menu covering every relationship kind.
	pub fn vietnamese() -> Self {
		Self::new(dataset::dishes(), dataset::ingredients())
	}

	pub fn empty() -> Self {
		Self::new(Vec::new(), Vec::new())
	}

	/// Makes every later query of `kind` fail with a decode error.
	pub fn fail_query(&self, kind: QueryKind) {
		self.fail_query_with(kind, Fault::Decode);
	}

	pub fn fail_query_with(&self, kind: QueryKind, fault: Fault) {
		self.failing.lock().unwrap_or_else(|err| err.into_inner()).insert(kind, fault);
	}

	/// Makes every call fail as if the store were unreachable.
	pub fn set_offline(&self, offline: bool) {
		self.offline.store(offline, Ordering::SeqCst);
	}

	/// Makes only vocabulary loads fail.
	pub fn set_vocabulary_offline(&self, offline: bool) {
		self.vocabulary_offline.store(offline, Ordering::SeqCst);
	}

	pub fn vocabulary_loads(&self) -> usize {
		self.vocabulary_loads.load(Ordering::SeqCst)
	}

	/// Query kinds in execution order, failed ones included.
	pub fn executed(&self) -> Vec<QueryKind> {
		self.executed.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	fn check_online(&self) -> Result<()> {
		if self.offline.load(Ordering::SeqCst) {
			return Err(Error::Unavailable("Fixture graph is offline.".to_string()));
		}

		Ok(())
	}

	fn answer(&self, graph_query: &GraphQuery, limit: usize) -> Result<Vec<RawRecord>> {
		let kind = graph_query.kind();

		self.executed.lock().unwrap_or_else(|err| err.into_inner()).push(kind);
		self.check_online()?;
		graph_query.validate()?;

		if let Some(fault) = self.failing.lock().unwrap_or_else(|err| err.into_inner()).get(&kind) {
			return Err(fault.error(kind));
		}

		let records = match graph_query {
			GraphQuery::IngredientMacros { terms } => {
				let terms = lowered(terms);
				let mut rows: Vec<&FixtureIngredient> = self
					.ingredients
					.iter()
					.filter(|ingredient| ingredient.macros.is_some())
					.filter(|ingredient| {
						let name = ingredient.name.to_lowercase();

						terms.iter().any(|term| name.contains(term.as_str()))
					})
					.collect();

				rows.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name));

				rows.into_iter()
					.take(limit)
					.map(|ingredient| RawRecord::Ingredient(macro_row(ingredient)))
					.collect()
			},
			_ => self
				.select_dishes(graph_query)
				.into_iter()
				.take(limit)
				.map(|(dish, matched)| RawRecord::Dish(self.dish_row(dish, matched)))
				.collect(),
		};

		Ok(records)
	}

	fn select_dishes(&self, graph_query: &GraphQuery) -> Vec<(&FixtureDish, Option<Vec<String>>)> {
		let mut selected: Vec<(&FixtureDish, Option<Vec<String>>)> = match graph_query {
			GraphQuery::DishesByName { keyword } => {
				let keyword = keyword.trim().to_lowercase();

				self.dishes
					.iter()
					.filter(|dish| dish.name.to_lowercase().contains(keyword.as_str()))
					.map(|dish| (dish, None))
					.collect()
			},
			GraphQuery::DishesByIngredients { names } => {
				let names = lowered(names);

				self.dishes
					.iter()
					.filter_map(|dish| {
						let mut matched: Vec<String> = dish
							.ingredients
							.iter()
							.map(|(name, _)| name.to_lowercase())
							.filter(|name| names.contains(name))
							.collect();

						matched.dedup();

						(!matched.is_empty()).then_some((dish, Some(matched)))
					})
					.collect()
			},
			GraphQuery::DishesByCalorieRange { target, tolerance } => self
				.dishes
				.iter()
				.filter(|dish| {
					dish.calories.is_some_and(|calories| (calories - target).abs() <= *tolerance)
				})
				.map(|dish| (dish, None))
				.collect(),
			GraphQuery::DishesByBenefitTerms { terms } => {
				let terms = lowered(terms);

				self.dishes
					.iter()
					.filter(|dish| {
						dish.benefits.iter().any(|benefit| {
							let benefit = benefit.to_lowercase();

							terms.iter().any(|term| benefit.contains(term.as_str()))
						})
					})
					.map(|dish| (dish, None))
					.collect()
			},
			GraphQuery::DishesByMinProtein { min_protein } => self
				.dishes
				.iter()
				.filter(|dish| dish.protein.is_some_and(|protein| protein >= *min_protein))
				.map(|dish| (dish, None))
				.collect(),
			GraphQuery::DishesByMaxCalories { max_calories } => self
				.dishes
				.iter()
				.filter(|dish| dish.calories.is_some_and(|calories| calories <= *max_calories))
				.map(|dish| (dish, None))
				.collect(),
			GraphQuery::IngredientMacros { .. } => Vec::new(),
		};

		selected.sort_by(|(lhs, lhs_matched), (rhs, rhs_matched)| match graph_query {
			GraphQuery::DishesByIngredients { .. } => {
				let lhs_count = lhs_matched.as_ref().map_or(0, Vec::len);
				let rhs_count = rhs_matched.as_ref().map_or(0, Vec::len);

				rhs_count
					.cmp(&lhs_count)
					.then_with(|| ascending_nulls_last(lhs.calories, rhs.calories))
					.then_with(|| lhs.name.cmp(&rhs.name))
			},
			GraphQuery::DishesByCalorieRange { target, .. } => {
				let distance =
					|dish: &FixtureDish| dish.calories.map(|calories| (calories - target).abs());

				ascending_nulls_last(distance(lhs), distance(rhs))
					.then_with(|| lhs.name.cmp(&rhs.name))
			},
			GraphQuery::DishesByMinProtein { .. } => ascending_nulls_last(rhs.protein, lhs.protein)
				.then_with(|| lhs.name.cmp(&rhs.name)),
			GraphQuery::DishesByMaxCalories { .. } => ascending_nulls_last(lhs.calories, rhs.calories)
				.then_with(|| lhs.name.cmp(&rhs.name)),
			_ => lhs.name.cmp(&rhs.name),
		});

		selected
	}

	fn dish_row(&self, dish: &FixtureDish, matched: Option<Vec<String>>) -> DishRow {
		let ingredients = if dish.ingredients.is_empty() {
			vec![Some(RawIngredient { name: None, quantity: None, benefits: Some(Vec::new()) })]
		} else {
			dish.ingredients
				.iter()
				.map(|(name, quantity)| {
					let benefits = self
						.ingredients
						.iter()
						.find(|ingredient| ingredient.name == *name)
						.map(|ingredient| {
							ingredient.benefits.iter().cloned().map(Some).collect::<Vec<_>>()
						})
						.unwrap_or_default();

					Some(RawIngredient {
						name: Some(name.clone()),
						quantity: *quantity,
						benefits: Some(benefits),
					})
				})
				.collect()
		};
		let match_count = matched.as_ref().map(|names| names.len() as f64);

		DishRow {
			dish_name: Some(dish.name.clone()),
			calories: dish.calories,
			protein: dish.protein,
			carbs: dish.carbs,
			fat: dish.fat,
			cuisine: dish.cuisine.clone(),
			benefits: Some(dish.benefits.iter().cloned().map(Some).collect()),
			ingredients: Some(ingredients),
			matched_ingredients: Some(matched.unwrap_or_default().into_iter().map(Some).collect()),
			match_count,
		}
	}
}
impl GraphReader for FixtureGraph {
	fn ping<'a>(&'a self) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { self.check_online() })
	}

	fn ingredient_names<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(async move {
			self.vocabulary_loads.fetch_add(1, Ordering::SeqCst);
			self.check_online()?;

			if self.vocabulary_offline.load(Ordering::SeqCst) {
				return Err(Error::Unavailable("Fixture vocabulary is offline.".to_string()));
			}

			let mut names: Vec<String> = self
				.ingredients
				.iter()
				.map(|ingredient| ingredient.name.to_lowercase())
				.collect();

			names.sort();
			names.dedup();

			Ok(names)
		})
	}

	fn run<'a>(
		&'a self,
		graph_query: &'a GraphQuery,
		limit: usize,
	) -> BoxFuture<'a, Result<Vec<RawRecord>>> {
		Box::pin(async move { self.answer(graph_query, limit) })
	}

	fn sample_dish_names<'a>(&'a self, limit: usize) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(async move {
			self.check_online()?;

			let mut names: Vec<String> = self.dishes.iter().map(|dish| dish.name.clone()).collect();

			names.sort();
			names.truncate(limit);

			Ok(names)
		})
	}

	fn statistics<'a>(&'a self) -> BoxFuture<'a, Result<GraphStatistics>> {
		Box::pin(async move {
			self.check_online()?;

			let mut cuisines: Vec<&str> =
				self.dishes.iter().filter_map(|dish| dish.cuisine.as_deref()).collect();
			let mut benefits: Vec<&str> = self
				.dishes
				.iter()
				.flat_map(|dish| dish.benefits.iter())
				.chain(self.ingredients.iter().flat_map(|ingredient| ingredient.benefits.iter()))
				.map(String::as_str)
				.collect();

			cuisines.sort_unstable();
			cuisines.dedup();
			benefits.sort_unstable();
			benefits.dedup();

			let macros =
				self.ingredients.iter().filter(|ingredient| ingredient.macros.is_some()).count();
			let counts = [
				("Dish".to_string(), self.dishes.len() as u64),
				("Cuisine".to_string(), cuisines.len() as u64),
				("Ingredient".to_string(), self.ingredients.len() as u64),
				("Macro".to_string(), macros as u64),
				("Benefit".to_string(), benefits.len() as u64),
			];
			let nodes = counts.iter().map(|(_, count)| count).sum();
			let relationships = self
				.dishes
				.iter()
				.map(|dish| {
					dish.cuisine.iter().count() + dish.ingredients.len() + dish.benefits.len()
				})
				.chain(self.ingredients.iter().map(|ingredient| {
					ingredient.benefits.len() + ingredient.macros.iter().count()
				}))
				.sum::<usize>() as u64;

			Ok(GraphStatistics::from_label_counts(counts, nodes, relationships))
		})
	}
}

fn macro_row(ingredient: &FixtureIngredient) -> IngredientMacroRow {
	let macros = ingredient.macros.clone();

	IngredientMacroRow {
		name: Some(ingredient.name.clone()),
		calories: macros.as_ref().and_then(|m| m.calories),
		protein: macros.as_ref().and_then(|m| m.protein),
		carbs: macros.as_ref().and_then(|m| m.carbs),
		fat: macros.as_ref().and_then(|m| m.fat),
	}
}

fn lowered(terms: &[String]) -> Vec<String> {
	terms
		.iter()
		.map(|term| term.trim().to_lowercase())
		.filter(|term| !term.is_empty())
		.collect()
}

fn ascending_nulls_last(lhs: Option<f64>, rhs: Option<f64>) -> CmpOrdering {
	match (lhs, rhs) {
		(Some(lhs), Some(rhs)) => lhs.total_cmp(&rhs),
		(Some(_), None) => CmpOrdering::Less,
		(None, Some(_)) => CmpOrdering::Greater,
		(None, None) => CmpOrdering::Equal,
	}
}

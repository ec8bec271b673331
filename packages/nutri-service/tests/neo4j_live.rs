use std::sync::Arc;

use nutri_config::{Neo4j, Resolver};
use nutri_service::{NutriService, ResolveRequest};
use nutri_storage::{GraphQuery, GraphReader, Neo4jGraph};

fn live_config() -> Option<Neo4j> {
	let uri = nutri_testkit::env_neo4j_uri()?;
	let password = nutri_testkit::env_neo4j_password()?;

	Some(Neo4j {
		uri,
		user: nutri_testkit::env_neo4j_user(),
		password,
		database: nutri_config::DEFAULT_DATABASE.to_string(),
		max_connections: 2,
		fetch_size: 100,
		query_timeout_ms: 10_000,
	})
}

#[tokio::test]
#[ignore = "Requires external Neo4j. Set NUTRI_NEO4J_URI and NUTRI_NEO4J_PASSWORD to run."]
async fn live_graph_answers_every_query_shape() {
	let Some(cfg) = live_config() else {
		eprintln!(
			"Skipping live_graph_answers_every_query_shape; set NUTRI_NEO4J_URI and NUTRI_NEO4J_PASSWORD to run this test."
		);

		return;
	};
	let graph = Neo4jGraph::connect(&cfg).await.expect("Failed to connect to Neo4j.");

	graph.ping().await.expect("Failed to ping Neo4j.");

	for graph_query in [
		GraphQuery::DishesByName { keyword: "phở".to_string() },
		GraphQuery::DishesByIngredients { names: vec!["trứng".to_string()] },
		GraphQuery::DishesByCalorieRange { target: 400.0, tolerance: 50.0 },
		GraphQuery::DishesByBenefitTerms { terms: vec!["tăng cơ".to_string()] },
		GraphQuery::DishesByMinProtein { min_protein: 20.0 },
		GraphQuery::DishesByMaxCalories { max_calories: 250.0 },
		GraphQuery::IngredientMacros { terms: vec!["trứng".to_string()] },
	] {
		let rows = graph.run(&graph_query, 5).await.expect("Failed to run graph query.");

		assert!(rows.len() <= 5, "Query {:?} exceeded its cap.", graph_query.kind());
	}

	let stats = graph.statistics().await.expect("Failed to read graph statistics.");

	assert!(stats.labels.contains_key("Dish"));
}

#[tokio::test]
#[ignore = "Requires external Neo4j. Set NUTRI_NEO4J_URI and NUTRI_NEO4J_PASSWORD to run."]
async fn live_resolution_never_exceeds_the_presentation_limit() {
	let Some(cfg) = live_config() else {
		eprintln!(
			"Skipping live_resolution_never_exceeds_the_presentation_limit; set NUTRI_NEO4J_URI and NUTRI_NEO4J_PASSWORD to run this test."
		);

		return;
	};
	let graph = Neo4jGraph::connect(&cfg).await.expect("Failed to connect to Neo4j.");
	let service = NutriService::new(Resolver::default(), Arc::new(graph));
	let response = service
		.resolve(ResolveRequest { query: "món nào nhiều protein giúp tăng cơ".to_string() })
		.await
		.expect("Failed to resolve query.");

	assert!(response.records.len() <= nutri_domain::PRESENTATION_LIMIT);
}

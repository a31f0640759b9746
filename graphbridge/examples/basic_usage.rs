//! Basic usage example for GraphBridge
//!
//! This example demonstrates:
//! - Wrapping a blocking engine
//! - Building and rendering queries
//! - Counting and paging
//! - Reading mapped containers
//! - Classified engine errors
//!
//! The engine here is a toy that understands just enough text to answer
//! the queries below.
//!
//! Run with: cargo run --example basic_usage

use graphbridge::{
    AsyncEngine, BlockingGraphEngine, Database, DatabaseConfig, EngineError, Error, MappedValue,
    NativeEntity, NativeValue, OrderBy, Params, QueryResponse,
};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug)]
struct Person {
    id: i64,
    name: &'static str,
    age: i64,
}

impl NativeEntity for Person {
    fn id(&self) -> i64 {
        self.id
    }

    fn labels(&self) -> Vec<String> {
        vec!["User".to_string()]
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(json!(self.name)),
            "age" => Some(json!(self.age)),
            _ => None,
        }
    }

    fn properties(&self) -> Vec<(String, Value)> {
        vec![
            ("name".to_string(), json!(self.name)),
            ("age".to_string(), json!(self.age)),
        ]
    }

    fn has_property(&self, name: &str) -> bool {
        matches!(name, "name" | "age")
    }
}

struct ToyEngine {
    people: Vec<Arc<Person>>,
}

impl BlockingGraphEngine for ToyEngine {
    fn run_query(&self, text: &str, _params: &Params) -> Result<QueryResponse, EngineError> {
        if text.contains("COUNT(") {
            let count = self.people.len() as i64;
            return Ok(QueryResponse::new(vec!["count".into()]).with_row(vec![count.into()]));
        }
        if text.starts_with("MATCH (user:User)") {
            let mut response = QueryResponse::new(vec!["user".into()]);
            for person in self.people.iter().skip(1).take(2) {
                response = response.with_row(vec![NativeValue::Entity(person.clone())]);
            }
            return Ok(response);
        }
        Err(EngineError::new(format!(
            "org.neo4j.cypher.SyntaxException: failed\n\
             Caused by: org.neo4j.cypher.internal.ParseException: cannot parse {:?}",
            text
        )))
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    graphbridge::logging::init_verbose(false);
    println!("=== GraphBridge Basic Usage Example ===\n");

    // 1. Wrap the engine
    println!("1. Opening database...");
    let people = ["Homer", "Marge", "Bart", "Lisa"]
        .iter()
        .zip(0..)
        .map(|(name, id)| {
            Arc::new(Person {
                id,
                name: *name,
                age: 10 + id * 9,
            })
        })
        .collect();
    let db = Database::with_config(
        AsyncEngine::new(ToyEngine { people }),
        DatabaseConfig::new().with_debug(true),
    );
    println!("   ✓ Database ready\n");

    // 2. Build a paged query
    println!("2. Building query...");
    let mut query = db.query_builder();
    query
        .match_pattern("(user:User)")
        .where_clause("user.name =~ {pattern}")
        .returns("user")
        .order_by(OrderBy::asc("user.name"))
        .skip_limit(1, 2);
    println!("   query: {}", query);
    println!("   count: {}\n", query.render_count());

    // 3. Count and fetch a page
    println!("3. Executing...");
    let mut params = Params::new();
    params.insert("pattern".into(), json!(".*"));

    let total = query.get_count(&params).await?;
    let page = query.execute(&params).await?;
    println!("   Showing {} of {} users:", page.len(), total);
    for row in &page {
        if let Some(user) = row.get("user").and_then(MappedValue::as_container) {
            println!(
                "   - #{} {} ({})",
                user.id(),
                user.property_or("name", Value::Null),
                user.property_or("age", Value::Null)
            );
        }
    }
    println!();

    // 4. Errors come back classified
    println!("4. Sending a broken query...");
    match db.query("RETRUN 1", &Params::new()).await {
        Err(Error::Engine(error)) => {
            println!("   class:   {}", error.class_name().unwrap_or("<none>"));
            println!("   message: {}\n", error.message());
        }
        Err(other) => return Err(other),
        Ok(_) => println!("   unexpectedly succeeded\n"),
    }

    println!("=== Done ===");
    Ok(())
}

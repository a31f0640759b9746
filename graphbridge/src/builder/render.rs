// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query text rendering
//!
//! Clause order is fixed:
//!
//! ```text
//! START, MATCH, WHERE, OPTIONAL MATCH*, then one branch:
//!   [WITH <returns> <child>] [ORDER BY] [SKIP] [LIMIT]  (child only with returns)
//!   RETURN COUNT(..) as count                          (count mode)
//!   [CREATE|CREATE UNIQUE] [DELETE] [SET] [RETURN] [ORDER BY] [SKIP] [LIMIT] [UNION <child>]
//! ```

use super::QueryBuilder;

impl QueryBuilder {
    pub(super) fn build(&self, count_mode: bool) -> String {
        let mut query: Vec<String> = Vec::new();

        if !self.start_points.is_empty() {
            let points: Vec<String> = self
                .start_points
                .iter()
                .map(|(key, expression)| format!("{}={}", key, expression))
                .collect();
            query.push(format!("START {}", points.join(", ")));
        }

        if !self.clauses.matches.is_empty() {
            query.push(format!("MATCH {}", self.clauses.matches.join(", ")));
        }

        if !self.clauses.wheres.is_empty() {
            query.push(format!("WHERE {}", self.clauses.wheres.join(" AND ")));
        }

        for pattern in &self.clauses.optional_matches {
            query.push(format!("OPTIONAL MATCH {}", pattern));
        }

        if let Some(with) = &self.with {
            // Nothing is passed on without returns, so the stage is dropped
            if !self.clauses.returns.is_empty() {
                query.push(format!("WITH {}", self.clauses.returns.join(", ")));
                query.push(with.build(count_mode));
            }
            self.push_paging(&mut query);
        } else if count_mode {
            match &self.counter {
                Some(counter) => query.push(format!("RETURN COUNT({}) as count", counter)),
                None => query.push("RETURN COUNT(*) as count".to_string()),
            }
        } else {
            if let Some(create) = &self.create {
                query.push(format!("CREATE {}", create));
            } else if let Some(create_unique) = &self.create_unique {
                query.push(format!("CREATE UNIQUE {}", create_unique));
            }

            if !self.clauses.deletes.is_empty() {
                query.push(format!("DELETE {}", self.clauses.deletes.join(", ")));
            }

            if !self.clauses.sets.is_empty() {
                query.push(format!("SET {}", self.clauses.sets.join(", ")));
            }

            if !self.clauses.returns.is_empty() {
                query.push(format!("RETURN {}", self.clauses.returns.join(", ")));
            }

            self.push_paging(&mut query);

            if let Some(union) = &self.union {
                query.push(format!("UNION {}", union.build(false)));
            }
        }

        query.retain(|clause| !clause.is_empty());
        query.join(" ")
    }

    fn push_paging(&self, query: &mut Vec<String>) {
        if !self.clauses.order_by.is_empty() {
            let order: Vec<String> = self.clauses.order_by.iter().map(|o| o.to_string()).collect();
            query.push(format!("ORDER BY {}", order.join(", ")));
        }

        if let Some(limit) = self.limit {
            if limit.skip > 0 {
                query.push(format!("SKIP {}", limit.skip));
            }
            query.push(format!("LIMIT {}", limit.count));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{Direction, OrderBy, QueryBuilder};

    #[test]
    fn test_match_return() {
        let mut query = QueryBuilder::new();
        query.match_pattern("(n)").returns("n");
        assert_eq!(query.render(), "MATCH (n) RETURN n");
    }

    #[test]
    fn test_empty_builder_renders_empty() {
        assert_eq!(QueryBuilder::new().render(), "");
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut query = QueryBuilder::new();
        query
            .start_at([("u", "node:Users(\"name: Homer\")")])
            .match_pattern("(u)-[:KNOWS]->(f)")
            .returns("u, f")
            .skip_limit(10, 5);
        let first = query.render();
        assert_eq!(first, query.render());
        assert_eq!(first, query.to_string());
    }

    #[test]
    fn test_full_clause_order() {
        let mut query = QueryBuilder::new();
        query
            .start_at([("b", "node:Users(\"*:*\")"), ("a", "node:Users(\"name: Homer\")")])
            .match_pattern(["(a)-[:KNOWS]->(b)", "(b)-[:LIKES]->(c)"])
            .where_clause(["a.age > 30", "b.age < 20"])
            .optional_match(["(c)-[:OWNS]->(d)", "(d)-[:IN]->(e)"])
            .create("(a)-[:MET]->(b)")
            .deletes("x, y")
            .set(["a.seen = true", "b.seen = true"])
            .returns("a, b")
            .order_by([OrderBy::desc("a.name"), OrderBy::from("b.name")])
            .skip_limit(20, 10);

        assert_eq!(
            query.render(),
            "START a=node:Users(\"name: Homer\"), b=node:Users(\"*:*\") \
             MATCH (a)-[:KNOWS]->(b), (b)-[:LIKES]->(c) \
             WHERE a.age > 30 AND b.age < 20 \
             OPTIONAL MATCH (c)-[:OWNS]->(d) OPTIONAL MATCH (d)-[:IN]->(e) \
             CREATE (a)-[:MET]->(b) DELETE x, y SET a.seen = true, b.seen = true \
             RETURN a, b ORDER BY a.name DESC, b.name ASC SKIP 20 LIMIT 10"
        );
    }

    #[test]
    fn test_create_wins_over_create_unique() {
        let mut query = QueryBuilder::new();
        query.create_unique("(a)-[:R]->(b)").create("(c)").returns("c");
        assert_eq!(query.render(), "CREATE (c) RETURN c");

        let mut unique = QueryBuilder::new();
        unique
            .start_at([("n", "node:Users(\"name: Homer\")")])
            .create_unique("(n)-[:KNOWS]->(m {name: \"Ned Flanders\"})")
            .returns("n, m");
        assert_eq!(
            unique.render(),
            "START n=node:Users(\"name: Homer\") \
             CREATE UNIQUE (n)-[:KNOWS]->(m {name: \"Ned Flanders\"}) RETURN n, m"
        );
    }

    #[test]
    fn test_skip_only_emitted_when_positive() {
        let mut query = QueryBuilder::new();
        query.match_pattern("(n)").returns("n").limit(5);
        assert_eq!(query.render(), "MATCH (n) RETURN n LIMIT 5");
        query.skip_limit(0, 5);
        assert_eq!(query.render(), "MATCH (n) RETURN n LIMIT 5");
    }

    #[test]
    fn test_with_branch() {
        let mut child = QueryBuilder::new();
        child.where_clause("homers > 1").returns("person.name");
        let child_text = child.render();

        let mut query = QueryBuilder::new();
        query
            .match_pattern("(person:Person)")
            .returns("person, count(person.name) as homers")
            .order_by(("person.name", Direction::Desc))
            .skip_limit(2, 3);
        query.with_builder(child);

        assert_eq!(
            query.render(),
            format!(
                "MATCH (person:Person) WITH person, count(person.name) as homers {} \
                 ORDER BY person.name DESC SKIP 2 LIMIT 3",
                child_text
            )
        );
    }

    #[test]
    fn test_with_suppresses_normal_branch() {
        let mut query = QueryBuilder::new();
        query
            .match_pattern("(n)")
            .create("(m)")
            .deletes("n")
            .set("n.x = 1")
            .returns("n");
        query.union().match_pattern("(u)").returns("u");
        query.with().returns("n");

        assert_eq!(query.render(), "MATCH (n) WITH n RETURN n");
    }

    #[test]
    fn test_with_without_returns_drops_stage() {
        let mut query = QueryBuilder::new();
        query.match_pattern("(n)").limit(3);
        query.with().match_pattern("(m)").returns("m");
        assert_eq!(query.render(), "MATCH (n) LIMIT 3");
        assert_eq!(query.render_count(), "MATCH (n) LIMIT 3");
    }

    #[test]
    fn test_union_branch() {
        let mut query = QueryBuilder::new();
        query
            .match_pattern("(p:Person)")
            .where_clause("p.age < 30")
            .returns("p.name");
        query
            .union()
            .match_pattern("(p:Person)")
            .where_clause("p.age > 40")
            .returns("p.name");

        assert_eq!(
            query.render(),
            "MATCH (p:Person) WHERE p.age < 30 RETURN p.name \
             UNION MATCH (p:Person) WHERE p.age > 40 RETURN p.name"
        );
    }

    #[test]
    fn test_union_chain() {
        let mut query = QueryBuilder::new();
        query.match_pattern("(a)").returns("a");
        query
            .union()
            .match_pattern("(b)")
            .returns("b")
            .union()
            .match_pattern("(c)")
            .returns("c");
        assert_eq!(
            query.render(),
            "MATCH (a) RETURN a UNION MATCH (b) RETURN b UNION MATCH (c) RETURN c"
        );
    }

    #[test]
    fn test_count_mode_default() {
        let mut query = QueryBuilder::new();
        query
            .match_pattern("(n:User)")
            .where_clause("n.active = true")
            .create("(x)")
            .deletes("n")
            .set("n.x = 1")
            .returns("n")
            .order_by("n.name")
            .skip_limit(10, 10);
        query.union().match_pattern("(m)").returns("m");

        assert_eq!(
            query.render_count(),
            "MATCH (n:User) WHERE n.active = true RETURN COUNT(*) as count"
        );
    }

    #[test]
    fn test_count_mode_override() {
        let mut query = QueryBuilder::new();
        query
            .start_at([("u", "node:Users(\"*: *\")")])
            .returns("DISTINCT(u.surname) as surnames")
            .count("DISTINCT(u.surname)");
        assert_eq!(
            query.render_count(),
            "START u=node:Users(\"*: *\") RETURN COUNT(DISTINCT(u.surname)) as count"
        );
        assert_eq!(query.counter(), Some("DISTINCT(u.surname)"));
    }

    #[test]
    fn test_count_mode_forwarded_into_with_child() {
        let mut query = QueryBuilder::new();
        query.match_pattern("(n)").returns("n").limit(50);
        query.with().where_clause("n.x > 1").returns("n.x");

        assert_eq!(
            query.render_count(),
            "MATCH (n) WITH n WHERE n.x > 1 RETURN COUNT(*) as count LIMIT 50"
        );
        assert_eq!(query.render(), "MATCH (n) WITH n WHERE n.x > 1 RETURN n.x LIMIT 50");
    }

    #[test]
    fn test_union_child_renders_its_own_paging() {
        let mut query = QueryBuilder::new();
        query.match_pattern("(a)").returns("a").limit(5);
        query.union_builder(QueryBuilder::new()).match_pattern("(b)").returns("b");
        assert_eq!(query.render(), "MATCH (a) RETURN a LIMIT 5 UNION MATCH (b) RETURN b");
    }
}

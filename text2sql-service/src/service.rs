//! Query pipeline.
//!
//! Each request runs the same sequential flow: open a database handle,
//! ask the model which tables matter, probe their schemas, ask the model
//! for SQL, execute it. No stage is retried, cached, or parallelized;
//! the first failure aborts the request.

use std::sync::Arc;
use std::time::Duration;

use common::errors::AppResult;
use common::models::query::{ConnectionInfo, QueryOutcome};
use common::models::schema::SchemaDescription;

use crate::db::{self, Execution};
use crate::llm::ChatModel;

const TABLES_INSTRUCTION: &str =
    "Extract table names used in the prompt. Comma-separated, no explanation.";

/// Orchestrates the prompt-to-result flow for one request.
pub struct QueryPipeline {
    llm: Arc<dyn ChatModel>,
    connect_timeout: Duration,
}

impl QueryPipeline {
    /// Creates a pipeline using the given chat model.
    pub fn new(llm: Arc<dyn ChatModel>, connect_timeout: Duration) -> Self {
        Self {
            llm,
            connect_timeout,
        }
    }

    /// Runs the full pipeline for one prompt against one database.
    pub async fn run(&self, prompt: &str, connection: &ConnectionInfo) -> AppResult<QueryOutcome> {
        let pool = db::connect(connection, self.connect_timeout).await?;

        let tables = self.resolve_tables(prompt).await?;
        tracing::info!(tables = ?tables, "resolved tables from prompt");

        // First failing probe aborts the request; no partial schema is used.
        let mut described = Vec::with_capacity(tables.len());
        for table in &tables {
            described.push(db::probe_table(&pool, table).await?);
        }
        let schema = SchemaDescription::new(described);

        let sql = self.synthesize_sql(prompt, &schema.render()).await?;
        tracing::info!(sql = %sql, "synthesized statement");

        let outcome = match db::execute(&pool, &sql).await? {
            Execution::Rows(data) => {
                tracing::info!(rows = data.len(), "read query returned");
                QueryOutcome::Rows { sql, data }
            }
            Execution::Affected(rows) => {
                tracing::info!(rows, "write statement applied");
                QueryOutcome::affected(sql, rows)
            }
        };

        Ok(outcome)
    }

    /// Asks the model for the tables the prompt refers to.
    async fn resolve_tables(&self, prompt: &str) -> AppResult<Vec<String>> {
        let response = self.llm.complete(TABLES_INSTRUCTION, prompt).await?;
        Ok(parse_table_list(&response))
    }

    /// Asks the model for a single SQL statement over the given schema.
    async fn synthesize_sql(&self, prompt: &str, schema: &str) -> AppResult<String> {
        let instruction = synthesis_instruction(schema);
        let response = self.llm.complete(&instruction, prompt).await?;
        Ok(response.trim().to_string())
    }
}

/// Builds the synthesis instruction with the schema embedded.
fn synthesis_instruction(schema: &str) -> String {
    format!(
        "You are a MySQL expert.\n\
         Use the schema below to write a valid SQL query for the user's prompt.\n\
         \n\
         {schema}\n\
         \n\
         Return only the SQL query, nothing else.\n"
    )
}

/// Splits a comma-separated model response into trimmed table names.
/// No existence check, no deduplication, no limit on count.
pub fn parse_table_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Chat model that always answers with a fixed string.
    struct FixedModel(&'static str);

    #[async_trait]
    impl ChatModel for FixedModel {
        async fn complete(&self, _system: &str, _user: &str) -> AppResult<String> {
            Ok(self.0.to_string())
        }
    }

    fn pipeline(answer: &'static str) -> QueryPipeline {
        QueryPipeline::new(Arc::new(FixedModel(answer)), Duration::from_secs(1))
    }

    #[test]
    fn table_parsing_ignores_whitespace_variation() {
        assert_eq!(parse_table_list("users, orders"), vec!["users", "orders"]);
        assert_eq!(parse_table_list("users,orders"), vec!["users", "orders"]);
        assert_eq!(parse_table_list(" users ,\n orders "), vec!["users", "orders"]);
    }

    #[test]
    fn table_parsing_keeps_duplicates_and_drops_empty_segments() {
        assert_eq!(parse_table_list("users,users"), vec!["users", "users"]);
        assert_eq!(parse_table_list("users,,orders,"), vec!["users", "orders"]);
        assert!(parse_table_list("").is_empty());
    }

    #[tokio::test]
    async fn resolver_splits_the_model_response() {
        let tables = pipeline("users, orders")
            .resolve_tables("show orders per user")
            .await
            .unwrap();
        assert_eq!(tables, vec!["users", "orders"]);
    }

    #[tokio::test]
    async fn synthesizer_trims_the_model_response() {
        let sql = pipeline("  SELECT * FROM users\n")
            .synthesize_sql("all users", "users(id int)")
            .await
            .unwrap();
        assert_eq!(sql, "SELECT * FROM users");
    }

    #[test]
    fn synthesis_instruction_embeds_the_schema() {
        let instruction = synthesis_instruction("users(id int)");
        assert!(instruction.contains("users(id int)"));
        assert!(instruction.contains("Return only the SQL query, nothing else."));
    }
}

use std::sync::{Arc, Mutex};

use askql_core::SqlDialect;
use askql_llm::{LanguageModel, LlmError, PromptBuilder, SqlGenerator, SAMPLE_DATA};
use askql_observability::{Logging, LoggingConfig};

/// Replies with a canned completion and remembers what it was asked.
#[derive(Default)]
struct CannedModel {
    reply: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl CannedModel {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            calls: Mutex::default(),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl LanguageModel for CannedModel {
    async fn complete(&self, prompt: &str, question: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), question.to_string()));
        self.reply.clone().ok_or(LlmError::Status {
            status: 403,
            message: "API key not valid".into(),
        })
    }
}

fn generator(model: Arc<CannedModel>) -> SqlGenerator<Arc<CannedModel>> {
    SqlGenerator::new(model, PromptBuilder::new(SAMPLE_DATA, SqlDialect::MySql))
}

#[tokio::test]
async fn sends_prompt_and_raw_question() {
    let model = CannedModel::replying("SELECT * FROM Sample_Data");
    generator(model.clone()).generate("Who lives in Paris?").await.unwrap();

    let calls = model.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (prompt, question) = &calls[0];
    assert_eq!(question, "Who lives in Paris?");
    assert!(prompt.contains("The user asked: \"Who lives in Paris?\""));
}

#[tokio::test]
async fn fenced_completion_is_normalized() {
    let model = CannedModel::replying(
        "```sql\nSELECT ID, Name, Age, City, Salary, Join_Date FROM Sample_Data WHERE City = \"Lyon\";\n```",
    );
    let sql = generator(model).generate("people in Lyon").await.unwrap().unwrap();
    assert_eq!(
        sql.as_str(),
        "SELECT ID, Name, Age, City, Salary, Join_Date FROM Sample_Data WHERE City = 'Lyon';"
    );
}

#[tokio::test]
async fn doubled_apostrophe_passes_through() {
    let model = CannedModel::replying(
        "SELECT ID, Name, Age, City, Salary, Join_Date FROM Sample_Data WHERE Name = 'O''Brien';",
    );
    let sql = generator(model).generate("Find O'Brien").await.unwrap().unwrap();
    assert!(sql.as_str().contains("'O''Brien'"));
}

#[tokio::test]
async fn non_query_answer_yields_none() {
    let model = CannedModel::replying("I'm sorry, I can only answer questions about the table.");
    let result = generator(model).generate("write me a poem").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn model_failure_propagates() {
    let result = generator(CannedModel::failing()).generate("anything").await;
    match result {
        Err(LlmError::Status { status, .. }) => assert_eq!(status, 403),
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn logs_generated_and_rejected_statements() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let dispatch = Logging::new(LoggingConfig::file_only(&path)).dispatch().unwrap();
    let _guard = tracing::dispatcher::set_default(&dispatch);

    generator(CannedModel::replying("SELECT COUNT(*) FROM Sample_Data;"))
        .generate("how many records?")
        .await
        .unwrap();
    generator(CannedModel::replying("No idea."))
        .generate("??")
        .await
        .unwrap();

    let log = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(" - INFO - Generated SQL Query: SELECT COUNT(*) FROM Sample_Data;"));
    assert!(lines[1].ends_with(" - WARNING - Invalid SQL query generated: No idea."));
}

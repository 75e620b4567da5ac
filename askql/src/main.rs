use askql::{router, serve, AppState, QueryPipeline, ServerConfig};
use askql_core::AskqlConfig;
use askql_data::{DatabaseConfig, DatabaseGateway};
use askql_llm::{GeminiClient, LlmConfig, PromptBuilder, SqlGenerator, SAMPLE_DATA};
use askql_observability::{Logging, LoggingConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AskqlConfig::load("dev")?;
    Logging::new(config.section::<LoggingConfig>()?).init()?;

    let gateway = DatabaseGateway::new(config.section::<DatabaseConfig>()?)?;
    let model = GeminiClient::new(config.section::<LlmConfig>()?);
    let generator = SqlGenerator::new(model, PromptBuilder::new(SAMPLE_DATA, gateway.dialect()));
    tracing::debug!(dialect = %gateway.dialect(), model = %generator.model().config().model, "pipeline ready");

    let state = AppState::new(QueryPipeline::new(generator, gateway));
    let server = config.section::<ServerConfig>()?;
    serve(router(state), server.bind).await?;
    Ok(())
}

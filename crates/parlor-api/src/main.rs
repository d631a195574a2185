use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parlor_api::{build_router, config::Config, state::AppState};
use parlor_chat::ChatOrchestrator;
use parlor_llm::{AssistantsClient, OpenAIAssistantsClient};
use parlor_persist::ConversationStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting Parlor API server");
    tracing::info!(
        environment = %config.environment,
        "Config loaded: {}:{}",
        config.server.host,
        config.server.port
    );

    if !config.is_development() && config.uses_default_jwt_secret() {
        tracing::warn!("JWT_SECRET is not set; using the built-in default secret");
    }

    // Provider client
    let client: Arc<dyn AssistantsClient> =
        Arc::new(OpenAIAssistantsClient::from_config(config.assistants_config())?);

    {
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            if client.check_credentials().await {
                tracing::info!("OpenAI credentials verified");
            } else {
                tracing::error!("OpenAI credentials could not be verified");
            }
        });
    }

    let chat = ChatOrchestrator::builder()
        .client(client)
        .config(config.chat_config())
        .build()?;

    let store = connect_store(&config).await;

    let state = Arc::new(AppState::new(config.clone(), chat, store));
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Connect to MongoDB, running without history when it is unreachable
#[cfg(feature = "mongodb")]
async fn connect_store(config: &Config) -> Option<Arc<dyn ConversationStore>> {
    if !config.mongodb.enabled {
        tracing::info!("Persistence disabled");
        return None;
    }

    tracing::info!("Connecting to MongoDB");
    let timeout = std::time::Duration::from_millis(config.mongodb.timeout_ms);
    let store = match parlor_persist::MongoConversationStore::connect(
        &config.database_url,
        &config.mongodb.database,
        timeout,
    )
    .await
    {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("MongoDB connection error: {}", e);
            return None;
        }
    };

    if let Err(e) = store.ping().await {
        tracing::error!("MongoDB is unreachable, continuing without history: {}", e);
        return None;
    }

    tracing::info!("Connected to MongoDB");
    Some(Arc::new(store))
}

#[cfg(not(feature = "mongodb"))]
async fn connect_store(_config: &Config) -> Option<Arc<dyn ConversationStore>> {
    tracing::info!("Built without MongoDB support; keeping history in memory");
    Some(Arc::new(parlor_persist::InMemoryConversationStore::new()))
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exercise_api::config::Config;
use exercise_api::handlers::exercises;
use exercise_api::repositories::ExerciseRepository;
use exercise_api::{db, migrations, routes, version};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "exercise_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing::info!(
        "exercise-api {} connecting to database: {}",
        version::GIT_VERSION,
        config.database_url
    );

    let pool = db::create_pool(&config.database_url)?;
    migrations::run_migrations(&pool)?;

    let exercises_state = exercises::ExercisesState {
        exercise_repo: ExerciseRepository::new(pool),
    };

    let app = routes::create_router(exercises_state);

    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::api::{
    ApiAnalyzeRequest, ApiAnalyzeResponse, ApiMetricsResponse, ApiPostRequest, ApiPostResponse,
    ApiPostsResponse,
};
use impact_engine::config::EngineConfig;
use impact_engine::remote::RemoteAnalysisClient;
use impact_engine::scoring::{ImpactScorer, SeededRandom};
use impact_engine::store::PostStore;
use impact_engine::{aggregate, derive_post_id, ImpactAnalysis, Post};

#[derive(Clone)]
struct AppState {
    store: Arc<PostStore>,
    scorer: ImpactScorer,
    remote: Option<RemoteAnalysisClient>,
}

pub async fn serve(args: crate::ServeArgs, config: EngineConfig) -> Result<(), String> {
    let store = PostStore::load(config.store.path.clone()).await?;
    let remote = RemoteAnalysisClient::from_config(&config)?;
    let state = AppState {
        store: Arc::new(store),
        scorer: ImpactScorer::new(config.scorer.clone()),
        remote,
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .route(
            "/api/posts",
            get(list_posts_handler).post(create_post_handler),
        )
        .route("/api/metrics", get(metrics_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    info!("impact engine listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiAnalyzeRequest>,
) -> Result<Json<ApiAnalyzeResponse>, (StatusCode, String)> {
    let input = request
        .into_input()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let mut warnings = Vec::new();
    let (analysis, source) = run_analysis(
        &state,
        input.caption.as_deref(),
        &input.tags,
        input.seed,
        input.use_remote,
        &mut warnings,
    )
    .await;

    Ok(Json(ApiAnalyzeResponse::from_analysis(
        analysis, source, warnings,
    )))
}

async fn create_post_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiPostRequest>,
) -> Result<(StatusCode, Json<ApiPostResponse>), (StatusCode, String)> {
    let input = request
        .into_input()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let mut warnings = Vec::new();
    let (analysis, source) = run_analysis(
        &state,
        input.caption.as_deref(),
        &input.tags,
        input.seed,
        input.use_remote,
        &mut warnings,
    )
    .await;

    let created_at = Utc::now();
    let post = Post {
        id: derive_post_id(&input.author_id, input.caption.as_deref(), created_at),
        author_id: input.author_id,
        image_ref: input.image_ref,
        caption: input.caption,
        tags: input.tags,
        category: analysis.category,
        impact_score: analysis.score,
        created_at,
        likes: 0,
        comments: 0,
        shares: 0,
    };

    let stored = state.store.add(post).await.map_err(|err| {
        error!("failed to store post: {}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, err)
    })?;

    info!("stored post {} with score {}", stored.id, stored.impact_score);
    Ok((
        StatusCode::CREATED,
        Json(ApiPostResponse::from_post(stored, analysis, source, warnings)),
    ))
}

async fn list_posts_handler(State(state): State<AppState>) -> Json<ApiPostsResponse> {
    let posts = state.store.list().await;
    let total = posts.len();
    Json(ApiPostsResponse { posts, total })
}

async fn metrics_handler(State(state): State<AppState>) -> Json<ApiMetricsResponse> {
    let posts = state.store.list().await;
    let now = Utc::now();
    let metrics = aggregate(&posts, now);
    Json(ApiMetricsResponse::from_metrics(metrics, now))
}

// Remote analysis is best effort. Any failure falls back to the local
// scorer and surfaces in the response warnings.
async fn run_analysis(
    state: &AppState,
    caption: Option<&str>,
    tags: &[String],
    seed: Option<u64>,
    use_remote: bool,
    warnings: &mut Vec<String>,
) -> (ImpactAnalysis, &'static str) {
    if use_remote {
        match &state.remote {
            Some(client) => match client.analyze(caption, tags, Utc::now()).await {
                Ok(analysis) => return (analysis, "remote"),
                Err(err) => {
                    error!("remote analysis failed: {}", err);
                    warnings.push(format!("remote analysis failed: {}", err));
                }
            },
            None => {
                warnings.push("remote analysis not configured: set IMPACT_API_URL".to_string());
            }
        }
    }

    let mut rng = match seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    (state.scorer.analyze(caption, tags, &mut rng), "local")
}

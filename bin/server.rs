// Personal Finance Calculators - Web Server
// JSON API with Axum

use anyhow::{Context, Result};
use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use fincalc::{
    budget, emi, savings, split, AppConfig, BudgetLine, BudgetSummary, CalculatorState,
    LoanInput, LoanResult, Notice, ProjectionPoint, SavingsInput, SavingsResult, SplitInput,
    SplitResult,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
struct AppState {
    config: Arc<AppConfig>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct SavingsResponse {
    result: SavingsResult,
    projection: Vec<ProjectionPoint>,
}

/// Calculator state travels with each request; the server keeps none.
#[derive(Deserialize)]
struct KeyRequest {
    #[serde(default)]
    state: Option<CalculatorState>,
    key: String,
    #[serde(default)]
    ctrl: bool,
}

#[derive(Serialize)]
struct KeyResponse {
    state: CalculatorState,
    notices: Vec<Notice>,
}

#[derive(Serialize)]
struct BudgetResponse {
    summary: BudgetSummary,
    lines: Vec<BudgetLine>,
    unbudgeted: Vec<String>,
}

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "OK",
        version: fincalc::VERSION,
    }))
}

async fn post_savings(
    State(state): State<AppState>,
    Json(input): Json<SavingsInput>,
) -> impl IntoResponse {
    let result = savings::project(&input);
    let projection = savings::monthly_projection(&input, state.config.projection_months);
    tracing::debug!(future_value = result.future_value, "savings projected");
    Json(ApiResponse::ok(SavingsResponse { result, projection }))
}

async fn post_emi(
    State(state): State<AppState>,
    Json(input): Json<LoanInput>,
) -> impl IntoResponse {
    let result: LoanResult = emi::calculate(&input, state.config.schedule_periods);
    tracing::debug!(emi = result.monthly_installment, "installment calculated");
    Json(ApiResponse::ok(result))
}

async fn post_split(Json(input): Json<SplitInput>) -> impl IntoResponse {
    let result: SplitResult = split::split(&input);
    Json(ApiResponse::ok(result))
}

async fn post_calculator_key(
    State(state): State<AppState>,
    Json(request): Json<KeyRequest>,
) -> impl IntoResponse {
    Json(ApiResponse::ok(press_key(&state.config, request)))
}

async fn get_budget(State(state): State<AppState>) -> impl IntoResponse {
    let config = &state.config;
    let unbudgeted = budget::unbudgeted_categories(&config.categories, &config.budgets)
        .into_iter()
        .map(String::from)
        .collect();
    let lines = config.budgets.clone();
    let summary = budget::summarize(&lines);
    Json(ApiResponse::ok(BudgetResponse {
        summary,
        lines,
        unbudgeted,
    }))
}

fn press_key(config: &AppConfig, request: KeyRequest) -> KeyResponse {
    // The history bound always comes from server config
    let current = request
        .state
        .unwrap_or_default()
        .with_history_limit(config.calculator.history_limit);
    let mut notices: Vec<Notice> = Vec::new();
    let state = fincalc::handle_key(&current, &request.key, request.ctrl, &mut notices);
    KeyResponse { state, notices }
}

fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/savings", post(post_savings))
        .route("/emi", post(post_emi))
        .route("/split", post(post_split))
        .route("/calculator/key", post(post_calculator_key))
        .route("/budget", get(get_budget))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("🌐 Personal Finance Calculators - Web Server v{}", fincalc::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config_path = std::env::var_os("FINCALC_CONFIG").map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    fincalc::logging::init_with_config(&config.logging);

    if let Some(path) = &config_path {
        println!("✓ Config loaded: {:?}", path);
    }

    let port = std::env::var("FINCALC_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);

    let app = router(AppState {
        config: Arc::new(config),
    });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!("\n🚀 Server running on http://localhost:{}", port);
    println!("   API: http://localhost:{}/api/health", port);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_key_starts_from_fresh_state() {
        let config = AppConfig::default();
        let response = press_key(
            &config,
            KeyRequest {
                state: None,
                key: "7".to_string(),
                ctrl: false,
            },
        );
        assert_eq!(response.state.display, "7");
        assert!(response.notices.is_empty());
    }

    #[test]
    fn test_press_key_threads_state_and_collects_notices() {
        let config = AppConfig::default();
        let first = press_key(
            &config,
            KeyRequest {
                state: None,
                key: "4".to_string(),
                ctrl: false,
            },
        );
        let second = press_key(
            &config,
            KeyRequest {
                state: Some(first.state),
                key: "m".to_string(),
                ctrl: true,
            },
        );

        assert_eq!(second.state.memory, 4.0);
        assert_eq!(second.notices.len(), 1);
        assert_eq!(second.notices[0].message, "Added 4 to memory");
    }

    #[test]
    fn test_client_cannot_raise_history_limit() {
        let config = AppConfig::default();
        let mut state: Option<CalculatorState> = serde_json::from_str(
            r#"{"display":"0","previous_value":null,"pending_operator":null,"memory":0.0,
                "history":[],"mode":"Entering","history_limit":1000}"#,
        )
        .unwrap();

        for _ in 0..20 {
            for key in ["+", "1", "="] {
                let response = press_key(
                    &config,
                    KeyRequest {
                        state: state.take(),
                        key: key.to_string(),
                        ctrl: false,
                    },
                );
                state = Some(response.state);
            }
        }

        let state = state.unwrap();
        assert_eq!(state.display, "20");
        assert_eq!(state.history.len(), config.calculator.history_limit);
        assert_eq!(state.history[0], "19 + 1 = 20");
    }

    #[test]
    fn test_oversized_history_is_trimmed() {
        let mut config = AppConfig::default();
        config.calculator.history_limit = 2;
        let mut state = CalculatorState::default();
        state.history = vec!["a".into(), "b".into(), "c".into()];

        let response = press_key(
            &config,
            KeyRequest {
                state: Some(state),
                key: "Escape".to_string(),
                ctrl: false,
            },
        );
        assert_eq!(response.state.history, vec!["a", "b"]);
    }

    #[test]
    fn test_key_request_accepts_missing_fields() {
        let request: KeyRequest = serde_json::from_str(r#"{"key": "Escape"}"#).unwrap();
        assert!(request.state.is_none());
        assert!(!request.ctrl);
    }
}

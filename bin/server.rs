// HomeHub - API Server
// Every panel as JSON, plus the advisor pass-through

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use homehub::home::{self, CompHome, ValueDriver, ValuePoint};
use homehub::maintenance::{Checklist, MaintenanceTask, TaskFilter};
use homehub::mortgage::{EquityBreakdown, MortgageDetails, MARKET_RATE_PCT};
use homehub::renovation::{self, RenovationEstimate, RenovationProject};
use homehub::rental::{self, parse_numeric_input, CashFlow, RentalComps, RentalInputs};
use homehub::selling::{self, Agent, ChecklistStep, MarketTiming};
use homehub::{logging, Advisor, AppConfig, HomeProfile};

/// Shared application state
#[derive(Clone)]
struct AppState {
    home: Arc<HomeProfile>,
    checklist: Arc<Mutex<Checklist>>,
    mortgage: Arc<MortgageDetails>,
    advisor: Advisor,
}

impl AppState {
    fn new(home: HomeProfile, advisor: Advisor) -> Self {
        Self {
            home: Arc::new(home),
            checklist: Arc::new(Mutex::new(Checklist::sample())),
            mortgage: Arc::new(MortgageDetails::sample()),
            advisor,
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// Response bodies
// ============================================================================

#[derive(Serialize)]
struct HomeResponse {
    profile: HomeProfile,
    value_low: f64,
    value_high: f64,
    one_year_change_pct: f64,
    appreciation: f64,
    price_per_sqft: f64,
    value_history: Vec<ValuePoint>,
    value_drivers: Vec<ValueDriver>,
    comps: Vec<CompHome>,
}

#[derive(Serialize)]
struct MaintenanceResponse {
    filter: TaskFilter,
    health_score: f64,
    completed: usize,
    total: usize,
    pending_cost: f64,
    tasks: Vec<MaintenanceTask>,
}

#[derive(Serialize)]
struct MortgageResponse {
    details: MortgageDetails,
    breakdown: EquityBreakdown,
    market_rate: f64,
    refinance: String,
}

#[derive(Serialize)]
struct EstimateResponse {
    project: RenovationProject,
    budget: f64,
    budget_min: f64,
    budget_max: f64,
    value_added: f64,
    new_home_value: f64,
    tip: String,
}

#[derive(Serialize)]
struct RentalResponse {
    inputs: RentalInputs,
    mortgage_payment: f64,
    cash_flow: CashFlow,
    monthly_display: String,
    nearby: RentalComps,
}

#[derive(Serialize)]
struct SellingResponse {
    checklist: Vec<ChecklistStep>,
    agent: Agent,
    market_timing: MarketTiming,
}

#[derive(Deserialize)]
struct FilterQuery {
    filter: Option<String>,
}

#[derive(Deserialize)]
struct BudgetQuery {
    budget: Option<String>,
}

/// Query values stay strings so bad input degrades to zero instead of a 400
#[derive(Deserialize, Default)]
struct RentalQuery {
    rent: Option<String>,
    vacancy: Option<String>,
    management_fee: Option<String>,
    maintenance: Option<String>,
}

impl RentalQuery {
    fn to_inputs(&self) -> RentalInputs {
        let defaults = RentalInputs::default();
        let pick = |raw: &Option<String>, default: f64| raw.as_deref().map(parse_numeric_input).unwrap_or(default);

        RentalInputs {
            monthly_rent: pick(&self.rent, defaults.monthly_rent),
            vacancy_pct: pick(&self.vacancy, defaults.vacancy_pct),
            management_fee_pct: pick(&self.management_fee, defaults.management_fee_pct),
            maintenance: pick(&self.maintenance, defaults.maintenance),
        }
    }
}

#[derive(Deserialize)]
struct AdviceRequest {
    question: String,
}

#[derive(Serialize)]
struct AdviceResponse {
    reply: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/home - Dashboard panel
async fn get_home(State(state): State<AppState>) -> impl IntoResponse {
    let profile = (*state.home).clone();
    let (value_low, value_high) = profile.value_range();

    Json(ApiResponse::ok(HomeResponse {
        value_low,
        value_high,
        one_year_change_pct: profile.one_year_change_pct(),
        appreciation: profile.appreciation(),
        price_per_sqft: profile.price_per_sqft(),
        value_history: home::value_history(),
        value_drivers: home::value_drivers(),
        comps: home::sample_comps(),
        profile,
    }))
}

fn maintenance_snapshot(checklist: &Checklist, filter: TaskFilter) -> MaintenanceResponse {
    MaintenanceResponse {
        filter,
        health_score: checklist.health_score(),
        completed: checklist.completed_count(),
        total: checklist.tasks().len(),
        pending_cost: checklist.pending_cost(),
        tasks: checklist.filtered(filter).into_iter().cloned().collect(),
    }
}

fn lock_checklist(state: &AppState) -> std::sync::MutexGuard<'_, Checklist> {
    // A panic mid-toggle leaves the list valid; keep serving it
    state.checklist.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// GET /api/maintenance?filter=pending
async fn get_maintenance(State(state): State<AppState>, Query(query): Query<FilterQuery>) -> impl IntoResponse {
    let filter = query.filter.as_deref().map(TaskFilter::parse).unwrap_or_default();
    let checklist = lock_checklist(&state);
    Json(ApiResponse::ok(maintenance_snapshot(&checklist, filter)))
}

/// POST /api/maintenance/:id/toggle
async fn toggle_task(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let mut checklist = lock_checklist(&state);

    if checklist.toggle(&id) {
        (StatusCode::OK, Json(ApiResponse::ok(maintenance_snapshot(&checklist, TaskFilter::All)))).into_response()
    } else {
        tracing::warn!(task_id = %id, "toggle requested for unknown task");
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<MaintenanceResponse>::err(format!("No task with id {}", id))),
        )
            .into_response()
    }
}

/// GET /api/mortgage
async fn get_mortgage(State(state): State<AppState>) -> impl IntoResponse {
    let details = (*state.mortgage).clone();
    Json(ApiResponse::ok(MortgageResponse {
        breakdown: details.breakdown(state.home.current_value),
        market_rate: MARKET_RATE_PCT,
        refinance: details.refinance_outlook(MARKET_RATE_PCT).message(),
        details,
    }))
}

/// GET /api/renovation/projects
async fn get_projects() -> impl IntoResponse {
    Json(ApiResponse::ok(renovation::catalog()))
}

/// GET /api/renovation/:id/estimate?budget=30000
async fn get_estimate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<BudgetQuery>,
) -> impl IntoResponse {
    let projects = renovation::catalog();
    let project = match renovation::find_project(&projects, &id) {
        Some(project) => project.clone(),
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<EstimateResponse>::err(format!("No project with id {}", id))),
            )
                .into_response()
        }
    };

    let mut estimate = RenovationEstimate::select(project);
    if let Some(raw) = query.budget.as_deref() {
        estimate.set_budget(parse_numeric_input(raw));
    }

    let response = EstimateResponse {
        budget: estimate.budget(),
        budget_min: estimate.project.budget_floor(),
        budget_max: estimate.project.budget_max(),
        value_added: estimate.value_added(),
        new_home_value: estimate.new_home_value(state.home.current_value),
        tip: estimate.tip(),
        project: estimate.project.clone(),
    };

    (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
}

/// GET /api/rental?rent=2800&vacancy=5&management_fee=8&maintenance=150
async fn get_rental(State(state): State<AppState>, Query(query): Query<RentalQuery>) -> impl IntoResponse {
    let inputs = query.to_inputs();
    let cash_flow = rental::calculate(&inputs, state.mortgage.monthly_payment);

    Json(ApiResponse::ok(RentalResponse {
        inputs,
        mortgage_payment: state.mortgage.monthly_payment,
        monthly_display: cash_flow.monthly_display(),
        cash_flow,
        nearby: rental::nearby_rentals(),
    }))
}

/// GET /api/selling
async fn get_selling() -> impl IntoResponse {
    Json(ApiResponse::ok(SellingResponse {
        checklist: selling::presale_checklist(),
        agent: Agent::sample(),
        market_timing: selling::market_timing(),
    }))
}

/// POST /api/advice - {"question": "..."}
async fn post_advice(
    State(state): State<AppState>,
    payload: Result<Json<AdviceRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected advice body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<AdviceResponse>::err(rejection.body_text())),
            )
                .into_response();
        }
    };

    if request.question.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AdviceResponse>::err("Question must not be empty")),
        )
            .into_response();
    }

    let reply = state.advisor.ask(&request.question).await;
    (StatusCode::OK, Json(ApiResponse::ok(AdviceResponse { reply }))).into_response()
}

fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/home", get(get_home))
        .route("/maintenance", get(get_maintenance))
        .route("/maintenance/:id/toggle", post(toggle_task))
        .route("/mortgage", get(get_mortgage))
        .route("/renovation/projects", get(get_projects))
        .route("/renovation/:id/estimate", get(get_estimate))
        .route("/rental", get(get_rental))
        .route("/selling", get(get_selling))
        .route("/advice", post(post_advice))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;

    logging::init_stderr_logging()?;
    let config = AppConfig::from_env();

    println!("🌐 HomeHub - API Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let home = HomeProfile::sample();
    let advisor = Advisor::from_config(&config.advisor, &home);
    let state = AppState::new(home, advisor);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    tracing::info!(bind = %config.bind, "server listening");
    println!("\n🚀 Server running on http://{}", config.bind);
    println!("   API: http://{}/api/home", config.bind);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, router(state))
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}

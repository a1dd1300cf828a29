// HTTP request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use super::error::ApiError;
use super::AppState;
use crate::coach::{AdviceResponse, CoachRequest, SavingGoal, UserBehavior};
use crate::insights::{
    self, IncomeAnalysis, LiteracyRecommendation, SavingsUpdate, SpendingReview,
};

/// Build the router. Insight routes are only mounted when enabled.
pub fn create_router(state: AppState, insights_enabled: bool) -> Router {
    let mut router = Router::new()
        .route("/financial-coach", post(handle_financial_coach))
        .route("/health", get(health_check));

    if insights_enabled {
        router = router
            .route("/tips", post(handle_tips))
            .route("/income-analysis", post(handle_income_analysis))
            .route("/savings-monitor", post(handle_savings_monitor))
            .route("/spending-review", post(handle_spending_review))
            .route("/literacy-recommender", post(handle_literacy_recommender));
    }

    router.with_state(state)
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn handle_financial_coach(
    State(state): State<AppState>,
    payload: Result<Json<CoachRequest>, JsonRejection>,
) -> Result<Json<AdviceResponse>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(
        user_id = %request.user.user_id,
        transactions = request.user.recent_transactions.len(),
        income = request.user.recent_income.len(),
        "Coaching request"
    );

    let advice = state.coach.advise(&request.user, &request.question).await?;
    Ok(Json(advice))
}

pub async fn handle_tips(
    State(state): State<AppState>,
    payload: Result<Json<UserBehavior>, JsonRejection>,
) -> Result<Json<AdviceResponse>, ApiError> {
    let Json(user) = payload?;
    let tips = state.coach.tips(&user).await?;
    Ok(Json(tips))
}

pub async fn handle_income_analysis(
    payload: Result<Json<UserBehavior>, JsonRejection>,
) -> Result<Json<IncomeAnalysis>, ApiError> {
    let Json(user) = payload?;
    Ok(Json(insights::analyze_income(&user)))
}

pub async fn handle_savings_monitor(
    payload: Result<Json<SavingGoal>, JsonRejection>,
) -> Result<Json<SavingsUpdate>, ApiError> {
    let Json(goal) = payload?;
    Ok(Json(insights::monitor_goal(&goal)?))
}

pub async fn handle_spending_review(
    payload: Result<Json<UserBehavior>, JsonRejection>,
) -> Result<Json<SpendingReview>, ApiError> {
    let Json(user) = payload?;
    Ok(Json(insights::review_spending(&user)))
}

pub async fn handle_literacy_recommender(
    payload: Result<Json<UserBehavior>, JsonRejection>,
) -> Result<Json<LiteracyRecommendation>, ApiError> {
    let Json(user) = payload?;
    Ok(Json(insights::recommend_lessons(&user)))
}

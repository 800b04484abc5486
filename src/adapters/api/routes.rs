//! Contest API Routes - HTTP Surface of the Engine
//!
//! Wires the use cases into an axum router implementing the external
//! contracts: posts, suggestions, votes, winner selection, leaderboard,
//! and the reminder sweep trigger. Transport concerns only — every
//! decision lives in the use cases and the store.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::adapters::metrics::EngineMetrics;
use crate::ports::contest_repository::ContestRepository;
use crate::usecases::contest_service::{ContestService, CreatePostRequest, LeaderboardMode};
use crate::usecases::reminder_scheduler::ReminderScheduler;
use crate::usecases::winner_resolver::WinnerResolver;

use super::types::{
    AddSuggestionBody, ApiError, CallerQuery, CastVoteBody, CreatePostBody, LeaderboardEnvelope,
    LeaderboardQuery, ListPostsQuery, OkEnvelope, PostEnvelope, PostScopeQuery, PostsEnvelope,
    SelectWinnerBody, SuggestionEnvelope, SuggestionsEnvelope, SweepEnvelope, VoteEnvelope,
    VotesEnvelope,
};

/// Shared handler state: use cases plus the metrics registry.
pub struct AppState<R: ContestRepository> {
    /// Contest lifecycle orchestrator.
    pub service: Arc<ContestService<R>>,
    /// Winner commitment use case.
    pub resolver: Arc<WinnerResolver<R>>,
    /// Reminder sweep use case (for the manual trigger route).
    pub scheduler: Arc<ReminderScheduler<R>>,
    /// Metrics registry.
    pub metrics: Arc<EngineMetrics>,
}

impl<R: ContestRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            resolver: Arc::clone(&self.resolver),
            scheduler: Arc::clone(&self.scheduler),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Build the contest API router.
pub fn router<R: ContestRepository>(state: AppState<R>) -> Router {
    Router::new()
        .route("/posts", post(create_post::<R>).get(list_posts::<R>))
        .route("/posts/:id", delete(delete_post::<R>))
        .route(
            "/suggestions",
            post(add_suggestion::<R>).get(list_suggestions::<R>),
        )
        .route("/votes", post(cast_vote::<R>).get(list_votes::<R>))
        .route("/winner", post(select_winner::<R>))
        .route("/leaderboard", get(leaderboard::<R>))
        // GET alias kept for manual triggering from a browser.
        .route(
            "/jobs/notify",
            post(run_reminder_sweep::<R>).get(run_reminder_sweep::<R>),
        )
        .with_state(state)
}

async fn create_post<R: ContestRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<CreatePostBody>,
) -> Result<impl IntoResponse, ApiError> {
    let timer = state
        .metrics
        .request_latency
        .with_label_values(&["create_post"])
        .start_timer();

    let result = state
        .service
        .create_post(CreatePostRequest {
            creator: body.creator,
            title: body.title,
            description: body.description,
            image_url: body.image_url,
            prize_amount: body.prize_amount,
        })
        .await;
    timer.observe_duration();

    match result {
        Ok(post) => {
            state.metrics.posts_created.inc();
            Ok((StatusCode::CREATED, Json(PostEnvelope { post })))
        }
        Err(e) => {
            state
                .metrics
                .writes_rejected
                .with_label_values(&["create_post"])
                .inc();
            Err(e.into())
        }
    }
}

async fn list_posts<R: ContestRepository>(
    State(state): State<AppState<R>>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<PostsEnvelope>, ApiError> {
    let posts = state.service.list_posts(query.include_deleted).await?;
    Ok(Json(PostsEnvelope { posts }))
}

async fn delete_post<R: ContestRepository>(
    State(state): State<AppState<R>>,
    Path(post_id): Path<String>,
    Query(query): Query<CallerQuery>,
) -> Result<Json<OkEnvelope>, ApiError> {
    state.service.delete_post(&post_id, &query.caller).await?;
    Ok(Json(OkEnvelope { ok: true }))
}

async fn add_suggestion<R: ContestRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<AddSuggestionBody>,
) -> Result<impl IntoResponse, ApiError> {
    let suggestion = state
        .service
        .add_suggestion(&body.post_id, &body.author, &body.text)
        .await?;
    state.metrics.suggestions_created.inc();
    Ok((StatusCode::CREATED, Json(SuggestionEnvelope { suggestion })))
}

async fn list_suggestions<R: ContestRepository>(
    State(state): State<AppState<R>>,
    Query(query): Query<PostScopeQuery>,
) -> Result<Json<SuggestionsEnvelope>, ApiError> {
    let suggestions = state
        .service
        .list_suggestions(query.post_id.as_ref())
        .await?;
    Ok(Json(SuggestionsEnvelope { suggestions }))
}

async fn cast_vote<R: ContestRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<CastVoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    match state
        .service
        .cast_vote(&body.post_id, &body.suggestion_id, &body.voter)
        .await
    {
        Ok(vote) => {
            state.metrics.votes_cast.inc();
            Ok((StatusCode::CREATED, Json(VoteEnvelope { vote })))
        }
        Err(e) => {
            let reason = match &e {
                crate::domain::error::EngineError::DuplicateVote => "duplicate_vote",
                _ => "other",
            };
            state
                .metrics
                .writes_rejected
                .with_label_values(&[reason])
                .inc();
            Err(e.into())
        }
    }
}

async fn list_votes<R: ContestRepository>(
    State(state): State<AppState<R>>,
    Query(query): Query<PostScopeQuery>,
) -> Result<Json<VotesEnvelope>, ApiError> {
    let votes = state.service.list_votes(query.post_id.as_ref()).await?;
    Ok(Json(VotesEnvelope { votes }))
}

async fn select_winner<R: ContestRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<SelectWinnerBody>,
) -> Result<Json<PostEnvelope>, ApiError> {
    let post = state
        .resolver
        .select_winner(&body.post_id, &body.winner_suggestion_id, &body.caller)
        .await?;
    state.metrics.winners_selected.inc();
    Ok(Json(PostEnvelope { post }))
}

async fn leaderboard<R: ContestRepository>(
    State(state): State<AppState<R>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardEnvelope>, ApiError> {
    let mode = match query.mode.as_deref() {
        Some("trending") => LeaderboardMode::Trending,
        // "all" and anything else default to the all-time board.
        _ => LeaderboardMode::AllTime,
    };
    let entries = state.service.leaderboard(mode, Utc::now()).await?;
    Ok(Json(match mode {
        LeaderboardMode::AllTime => LeaderboardEnvelope {
            all_time: Some(entries),
            trending: None,
        },
        LeaderboardMode::Trending => LeaderboardEnvelope {
            all_time: None,
            trending: Some(entries),
        },
    }))
}

async fn run_reminder_sweep<R: ContestRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<SweepEnvelope>, ApiError> {
    let report = state.scheduler.sweep(Utc::now()).await?;
    state
        .metrics
        .reminders_emitted
        .inc_by(report.count as u64);
    Ok(Json(SweepEnvelope {
        count: report.count,
        reminders: report.reminders,
    }))
}

//! Handler tests over in-memory services.

use super::{
    ApiError, AppState, CompleteTaskRequest, CompleteTaskResponse, CurrentUser, ErrorBody,
    ForwardedUserHeader, IdentityError, IdentityResolver, LeaderboardEntryResponse,
    LeaderboardQuery, SharedLeaderboardService, SharedStreakService, handlers,
};
use crate::{
    calendar::CalendarZone,
    clock::ManualClock,
    daily_task::{
        adapters::memory::{InMemoryDailyTaskStore, InMemoryProgressTracker},
        domain::POINTS_PER_TASK,
        ports::{DailyTaskStore, ProgressTracker},
        services::{DailyTaskEngine, SharedDailyTaskEngine},
    },
    points::{
        adapters::memory::InMemoryAccountStore,
        domain::UserAccount,
        ports::{LeaderboardRepository, PointsLedger},
        services::LeaderboardService,
    },
    streak::{
        adapters::memory::InMemoryStreakRepository, ports::StreakRepository,
        services::StreakService,
    },
    user::UserId,
};
use axum::Json;
use axum::body::to_bytes;
use axum::extract::{FromRequestParts, Query, State};
use axum::http::{HeaderName, Request, StatusCode, header, request::Parts};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde::de::DeserializeOwned;
use std::sync::Arc;

struct Api {
    clock: ManualClock,
    accounts: Arc<InMemoryAccountStore>,
    state: AppState,
    user_id: UserId,
}

impl Api {
    fn caller(&self) -> CurrentUser {
        CurrentUser(self.user_id)
    }

    async fn first_task_id(&self) -> String {
        let Json(daily) = handlers::daily_tasks(State(self.state.clone()), self.caller())
            .await
            .expect("daily tasks");
        daily
            .tasks
            .first()
            .map(|task| task.id.clone())
            .expect("at least one task")
    }

    async fn complete(&self, task_id: &str) -> Result<Json<CompleteTaskResponse>, ApiError> {
        let request = CompleteTaskRequest {
            task_id: Some(task_id.to_owned()),
        };
        handlers::complete_task(State(self.state.clone()), self.caller(), Ok(Json(request))).await
    }
}

#[fixture]
fn api() -> Api {
    let start: DateTime<Utc> = "2026-03-10T09:00:00Z".parse().expect("valid timestamp");
    let clock = ManualClock::new(start);
    let accounts = Arc::new(InMemoryAccountStore::new());
    let user_id = UserId::new();
    accounts
        .register(UserAccount::new(user_id, "ada", "ada@example.com"))
        .expect("register caller");

    let ledger: Arc<dyn PointsLedger> = accounts.clone();
    let ranking: Arc<dyn LeaderboardRepository> = accounts.clone();
    let shared_clock: Arc<dyn Clock + Send + Sync> = Arc::new(clock.clone());
    let tasks: Arc<dyn DailyTaskStore> = Arc::new(InMemoryDailyTaskStore::new());
    let progress: Arc<dyn ProgressTracker> = Arc::new(InMemoryProgressTracker::new());
    let streak_repository: Arc<dyn StreakRepository> = Arc::new(InMemoryStreakRepository::new());

    let engine: SharedDailyTaskEngine = DailyTaskEngine::new(
        tasks,
        progress,
        Arc::clone(&ledger),
        Arc::clone(&shared_clock),
        CalendarZone::utc(),
    );
    let leaderboard: SharedLeaderboardService = LeaderboardService::new(ranking);
    let streaks: SharedStreakService =
        StreakService::new(streak_repository, ledger, shared_clock, CalendarZone::utc());
    let state = AppState::new(
        Arc::new(engine),
        Arc::new(leaderboard),
        Arc::new(streaks),
        Arc::new(ForwardedUserHeader::default()),
    );
    Api {
        clock,
        accounts,
        state,
        user_id,
    }
}

async fn json_body<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}

fn parts_with(header_value: Option<&str>) -> Parts {
    let mut builder = Request::builder().uri("/api/tasks/daily");
    if let Some(value) = header_value {
        builder = builder.header("x-user-id", value);
    }
    builder.body(()).expect("valid request").into_parts().0
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_reports_receipt_and_credits_points(api: Api) {
    let task_id = api.first_task_id().await;

    let Json(receipt) = api.complete(&task_id).await.expect("completion succeeds");

    assert!(receipt.success);
    assert!(receipt.task.completed);
    assert_eq!(receipt.completed_count, 1);
    assert_eq!(receipt.points_awarded, POINTS_PER_TASK);
    assert_eq!(
        receipt.cooldown_until,
        api.clock.utc() + TimeDelta::minutes(5)
    );
    assert_eq!(
        api.accounts.points_of(api.user_id).expect("lookup"),
        Some(POINTS_PER_TASK)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_inside_cooldown_is_429_with_remaining_seconds(api: Api) {
    let Json(daily) = handlers::daily_tasks(State(api.state.clone()), api.caller())
        .await
        .expect("daily tasks");
    let first = daily.tasks.first().map(|task| task.id.clone()).expect("first");
    let second = daily.tasks.get(1).map(|task| task.id.clone()).expect("second");
    api.complete(&first).await.expect("first completion");
    api.clock.advance(TimeDelta::minutes(2));

    let err = api.complete(&second).await.expect_err("cooldown rejects");

    assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: ErrorBody = json_body(err.into_response()).await;
    assert_eq!(body.remaining_seconds, Some(180));
}

#[rstest]
#[case(None, "taskId required")]
#[case(Some(""), "taskId required")]
#[case(Some("   "), "taskId required")]
#[case(Some("not-a-task"), "invalid task id format")]
#[tokio::test(flavor = "multi_thread")]
async fn completion_rejects_bad_task_ids(
    api: Api,
    #[case] task_id: Option<&str>,
    #[case] expected_prefix: &str,
) {
    let request = CompleteTaskRequest {
        task_id: task_id.map(str::to_owned),
    };

    let err = handlers::complete_task(State(api.state.clone()), api.caller(), Ok(Json(request)))
        .await
        .expect_err("rejected");

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(
        err.body().error.starts_with(expected_prefix),
        "unexpected message: {}",
        err.body().error
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_task_twice_is_a_conflict(api: Api) {
    let task_id = api.first_task_id().await;
    api.complete(&task_id).await.expect("first completion");
    api.clock.advance(TimeDelta::minutes(6));

    let err = api.complete(&task_id).await.expect_err("second completion");

    assert_eq!(err, ApiError::Conflict("task already completed".to_owned()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_task_is_not_found(api: Api) {
    let task_id = api.first_task_id().await;
    let other = CurrentUser(UserId::new());
    let request = CompleteTaskRequest {
        task_id: Some(task_id),
    };

    let err = handlers::complete_task(State(api.state.clone()), other, Ok(Json(request)))
        .await
        .expect_err("foreign task");

    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cooldown_endpoint_reports_idle_state(api: Api) {
    let Json(status) = handlers::cooldown_status(State(api.state.clone()), api.caller())
        .await
        .expect("cooldown status");

    assert!(!status.is_cooldown_active);
    assert_eq!(status.remaining_seconds, 0);
    assert_eq!(status.completed_count, 0);
    assert_eq!(status.last_completed_at, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn leaderboard_is_uncached_and_ranked(api: Api) {
    api.accounts
        .register(UserAccount::new(UserId::new(), "grace", "grace@example.com").with_points(40))
        .expect("register rival");

    let response = handlers::leaderboard(
        State(api.state.clone()),
        api.caller(),
        Ok(Query(LeaderboardQuery { limit: Some(1) })),
    )
    .await
    .expect("leaderboard")
    .into_response();

    assert_eq!(
        response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok()),
        Some("no-cache, no-store, must-revalidate")
    );
    let rows: Vec<LeaderboardEntryResponse> = json_body(response).await;
    assert_eq!(rows.len(), 1);
    let top = rows.first().expect("one row");
    assert_eq!(top.username, "grace");
    assert_eq!(top.rank, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn my_rank_for_unknown_account_is_not_found(api: Api) {
    let err = handlers::my_rank(State(api.state.clone()), CurrentUser(UserId::new()))
        .await
        .map(IntoResponse::into_response)
        .expect_err("unknown account");

    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn check_in_marks_today_once(api: Api) {
    let Json(first) = handlers::check_in(State(api.state.clone()), api.caller())
        .await
        .expect("first check-in");
    let Json(second) = handlers::check_in(State(api.state.clone()), api.caller())
        .await
        .expect("repeat check-in");
    let Json(count) = handlers::streak_count(State(api.state.clone()), api.caller())
        .await
        .expect("count");

    assert!(first.recorded);
    assert!(first.streak.tue);
    assert_eq!(first.points_awarded, 5);
    assert!(!second.recorded);
    assert_eq!(second.points_awarded, 0);
    assert_eq!(count.count, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn extractor_resolves_forwarded_user(api: Api) {
    let mut parts = parts_with(Some(&api.user_id.to_string()));

    let CurrentUser(resolved) = CurrentUser::from_request_parts(&mut parts, &api.state)
        .await
        .expect("authenticated");

    assert_eq!(resolved, api.user_id);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn extractor_rejects_anonymous_request(api: Api) {
    let mut parts = parts_with(None);

    let err = CurrentUser::from_request_parts(&mut parts, &api.state)
        .await
        .expect_err("anonymous");

    assert_eq!(err, ApiError::Unauthorized);
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(None, IdentityError::Missing)]
#[case(Some(" "), IdentityError::Missing)]
#[case(Some("42"), IdentityError::Malformed)]
fn forwarded_header_rejects_unusable_values(
    #[case] value: Option<&str>,
    #[case] expected: IdentityError,
) {
    let resolver = ForwardedUserHeader::default();

    let err = resolver
        .current_user_id(&parts_with(value))
        .expect_err("rejected");

    assert_eq!(err, expected);
}

#[test]
fn forwarded_header_reads_configured_name() {
    let resolver = ForwardedUserHeader::new(HeaderName::from_static("x-auth-subject"));
    let user_id = UserId::new();
    let parts = Request::builder()
        .header("x-auth-subject", user_id.to_string())
        .body(())
        .expect("valid request")
        .into_parts()
        .0;

    assert_eq!(resolver.current_user_id(&parts), Ok(user_id));
}

#[tokio::test]
async fn health_reports_ok() {
    assert_eq!(handlers::health().await, "ok");
}

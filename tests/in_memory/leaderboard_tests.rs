//! Leaderboard ranking over balances credited by completions.

use super::helpers::{Backend, backend};
use rewardpage::points::{domain::DEFAULT_LEADERBOARD_LIMIT, services::LeaderboardError};
use rewardpage::user::UserId;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_moves_user_up_the_board(backend: Backend) {
    let leader = backend.register("leader", 15);
    let climber = backend.register("climber", 0);

    let task_id = backend.task_id(climber, 1).await;
    backend
        .engine
        .complete_task(climber, &task_id)
        .await
        .expect("completion succeeds");

    let board = backend.leaderboard.top(None).await.expect("leaderboard");
    let order: Vec<(UserId, u64)> = board.iter().map(|row| (row.user_id, row.rank)).collect();
    assert_eq!(order, vec![(climber, 1), (leader, 2)]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn default_board_is_capped(backend: Backend) {
    for index in 0..15 {
        backend.register(&format!("user{index}"), index);
    }

    let board = backend.leaderboard.top(Some(0)).await.expect("leaderboard");

    assert_eq!(board.len(), DEFAULT_LEADERBOARD_LIMIT);
    assert_eq!(board.first().map(|row| row.points), Some(14));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tied_users_share_a_rank(backend: Backend) {
    backend.register("first", 50);
    let tied_a = backend.register("tied-a", 30);
    let tied_b = backend.register("tied-b", 30);

    let rank_a = backend.leaderboard.rank_of(tied_a).await.expect("rank a");
    let rank_b = backend.leaderboard.rank_of(tied_b).await.expect("rank b");

    assert_eq!(rank_a.rank, 2);
    assert_eq!(rank_b.rank, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_user_has_no_rank(backend: Backend) {
    let missing = UserId::new();

    let result = backend.leaderboard.rank_of(missing).await;

    assert!(matches!(result, Err(LeaderboardError::UserNotFound(id)) if id == missing));
}

// Moves, rotations and state reads through GameService.

use spinfour_backend::domain::{Cell, Color, Direction, GameStatus, Winner};
use spinfour_backend::errors::{DomainError, InvalidMoveKind, NotFoundKind};

use crate::common::{harness, start_game};

fn invalid_kind(err: &DomainError) -> Option<InvalidMoveKind> {
    err.invalid_move_kind()
}

#[tokio::test]
async fn red_wins_vertically_in_column_three() {
    let h = harness().await;
    let game = start_game(&h.state, "red", "yellow").await;
    let id = game.id();

    for yellow_col in [0, 1, 0] {
        h.state.games.make_move(id, "red", 3).await.unwrap();
        h.state.games.make_move(id, "yellow", yellow_col).await.unwrap();
    }
    let outcome = h.state.games.make_move(id, "red", 3).await.unwrap();

    assert_eq!(outcome.record.column, Some(3));
    assert_eq!(outcome.record.row, Some(2));
    assert_eq!(outcome.game.status(), GameStatus::Finished);
    assert_eq!(outcome.game.winner(), Some(Winner::Red));
    for row in 2..6 {
        assert_eq!(outcome.game.board().get(row, 3), Cell::Red);
    }

    // Finished games leave the active set.
    let err = h.state.games.state(id).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    assert_eq!(h.ranking.wins(), vec!["Red Player".to_string()]);
}

#[tokio::test]
async fn turns_alternate_and_stones_stack() {
    let h = harness().await;
    let game = start_game(&h.state, "red", "yellow").await;

    let first = h.state.games.make_move(game.id(), "red", 4).await.unwrap();
    assert_eq!(first.record.row, Some(5));
    assert_eq!(first.record.color, Color::Red);
    assert_eq!(first.game.current_player(), Color::Yellow);

    let second = h.state.games.make_move(game.id(), "yellow", 4).await.unwrap();
    assert_eq!(second.record.row, Some(4));
    assert_eq!(second.game.current_player(), Color::Red);

    let stored = h.state.games.state(game.id()).unwrap();
    assert_eq!(stored, second.game);
    assert!(h.ranking.wins().is_empty());
}

#[tokio::test]
async fn rejected_moves_leave_the_game_untouched() {
    let h = harness().await;
    let game = start_game(&h.state, "red", "yellow").await;
    let id = game.id();

    let cases = [
        ("yellow", 0, InvalidMoveKind::OutOfTurn),
        ("stranger", 0, InvalidMoveKind::NotAPlayer),
        ("red", 7, InvalidMoveKind::ColumnOutOfRange),
        ("red", -1, InvalidMoveKind::ColumnOutOfRange),
    ];
    for (player, column, kind) in cases {
        let err = h.state.games.make_move(id, player, column).await.unwrap_err();
        assert_eq!(invalid_kind(&err), Some(kind), "{player} -> {column}");
    }

    assert_eq!(h.state.games.state(id).unwrap(), game);
}

#[tokio::test]
async fn full_column_is_rejected() {
    let h = harness().await;
    let game = start_game(&h.state, "red", "yellow").await;
    let id = game.id();

    // Alternating colours never make four in the column.
    for _ in 0..3 {
        h.state.games.make_move(id, "red", 0).await.unwrap();
        h.state.games.make_move(id, "yellow", 0).await.unwrap();
    }

    let err = h.state.games.make_move(id, "red", 0).await.unwrap_err();
    assert_eq!(invalid_kind(&err), Some(InvalidMoveKind::ColumnFull));
    assert_eq!(
        h.state.games.state(id).unwrap().current_player(),
        Color::Red
    );
}

#[tokio::test]
async fn rotation_swaps_dimensions_and_settles() {
    let h = harness().await;
    let game = start_game(&h.state, "red", "yellow").await;
    let id = game.id();

    h.state.games.make_move(id, "red", 0).await.unwrap();
    let outcome = h
        .state
        .games
        .rotate(id, "yellow", Direction::Right)
        .await
        .unwrap();

    assert!(outcome.record.rotated);
    assert_eq!(outcome.record.direction, Some(Direction::Right));
    assert_eq!(outcome.record.color, Color::Yellow);
    assert_eq!(outcome.record.column, None);

    // Bottom-left stone ends up top-left after a clockwise turn...
    let rotated = outcome.rotated_board.expect("rotations carry the raw grid");
    assert_eq!((rotated.rows(), rotated.cols()), (7, 6));
    assert_eq!(rotated.get(0, 0), Cell::Red);

    // ...and falls to the new floor.
    let board = outcome.game.board();
    assert_eq!((board.rows(), board.cols()), (7, 6));
    assert_eq!(board.get(6, 0), Cell::Red);
    assert_eq!(board.count(Color::Red), 1);
    assert_eq!(outcome.game.current_player(), Color::Red);
}

#[tokio::test]
async fn rotation_can_hand_the_win_to_the_opponent() {
    let h = harness().await;
    let game = start_game(&h.state, "red", "yellow").await;
    let id = game.id();

    // Red's lowest-left stones form a staircase (rows 5..2 start at columns
    // 0, 2, 3, 4) with no four of either colour on the board.
    let script = [
        ("red", 0),
        ("yellow", 2),
        ("red", 6),
        ("yellow", 3),
        ("red", 6),
        ("yellow", 3),
        ("red", 2),
        ("yellow", 4),
        ("red", 6),
        ("yellow", 4),
        ("red", 3),
        ("yellow", 4),
        ("red", 4),
    ];
    for (player, column) in script {
        let outcome = h.state.games.make_move(id, player, column).await.unwrap();
        assert_eq!(outcome.game.status(), GameStatus::Playing);
    }

    // Turning left lays each row's leftmost stone on the new floor.
    let outcome = h
        .state
        .games
        .rotate(id, "yellow", Direction::Left)
        .await
        .unwrap();

    let board = outcome.game.board();
    assert_eq!((board.rows(), board.cols()), (7, 6));
    for col in 2..6 {
        assert_eq!(board.get(6, col), Cell::Red, "bottom row, column {col}");
    }
    assert_eq!(outcome.record.color, Color::Yellow);
    assert_eq!(outcome.game.status(), GameStatus::Finished);
    assert_eq!(outcome.game.winner(), Some(Winner::Red));
    assert_eq!(h.ranking.wins(), vec!["Red Player".to_string()]);
}

#[tokio::test]
async fn unknown_game_and_blank_ids() {
    let h = harness().await;

    let err = h.state.games.make_move("nope", "red", 0).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));

    let err = h.state.games.state("  ").unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = h
        .state
        .games
        .rotate("nope", "", Direction::Left)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn game_expires_after_inactivity() {
    let h = harness().await;
    let game = start_game(&h.state, "red", "yellow").await;

    h.clock.advance(std::time::Duration::from_secs(200));
    h.state.games.make_move(game.id(), "red", 0).await.unwrap();
    h.clock.advance(std::time::Duration::from_secs(200));
    assert!(h.state.games.state(game.id()).is_ok());

    h.clock.advance(std::time::Duration::from_secs(101));
    let err = h.state.games.state(game.id()).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
}

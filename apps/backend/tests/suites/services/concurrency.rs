// Per-game and queue serialization under concurrent callers.

use std::collections::HashSet;

use backend_test_support::unique_helpers::unique_str;
use spinfour_backend::domain::Color;
use spinfour_backend::errors::InvalidMoveKind;
use spinfour_backend::services::TicketStatus;

use crate::common::{harness, start_game};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_moves_on_one_game_serialize() {
    let h = harness().await;
    let game = start_game(&h.state, "red", "yellow").await;

    let mut handles = Vec::new();
    for column in 0..4 {
        let games = h.state.games.clone();
        let id = game.id().to_string();
        handles.push(tokio::spawn(async move {
            games.make_move(&id, "red", column).await
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(err) => assert_eq!(err.invalid_move_kind(), Some(InvalidMoveKind::OutOfTurn)),
        }
    }
    assert_eq!(accepted, 1);

    let stored = h.state.games.state(game.id()).unwrap();
    assert_eq!(stored.board().count(Color::Red), 1);
    assert_eq!(stored.current_player(), Color::Yellow);
    // game.start plus exactly one game.move
    assert_eq!(h.notifier.names(), vec!["game.start", "game.move"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_find_match_pairs_everyone_once() {
    let h = harness().await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let matches = h.state.matches.clone();
        let player_id = unique_str("player");
        handles.push(tokio::spawn(async move {
            matches.find_match(&player_id, None).await
        }));
    }

    let mut waiting_games = HashSet::new();
    let mut paired_games = HashSet::new();
    for handle in handles {
        let ticket = handle.await.unwrap().unwrap();
        match ticket.status {
            TicketStatus::Waiting => assert!(waiting_games.insert(ticket.game_id)),
            TicketStatus::Tentative => assert!(paired_games.insert(ticket.game_id)),
        }
    }

    // Pop-or-append is atomic: every queued game is claimed by exactly one newcomer.
    assert_eq!(waiting_games.len(), 5);
    assert_eq!(waiting_games, paired_games);
    assert!(h.state.store.waiting_players().is_empty());
}

#[tokio::test]
async fn different_games_do_not_block_each_other() {
    let h = harness().await;
    let first = start_game(&h.state, "a-red", "a-yellow").await;
    let second = start_game(&h.state, "b-red", "b-yellow").await;

    // Hold one game's lock while the other game moves.
    let guard = h.state.store.lock_game(first.id()).await;
    let outcome = h.state.games.make_move(second.id(), "b-red", 3).await.unwrap();
    assert_eq!(outcome.record.row, Some(5));
    drop(guard);

    h.state.games.make_move(first.id(), "a-red", 3).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn leave_racing_find_match_leaves_no_orphan_pairing() {
    for _ in 0..50 {
        let h = harness().await;
        let leaver = unique_str("leaver");
        let ticket = h.state.matches.find_match(&leaver, None).await.unwrap();

        let matches = h.state.matches.clone();
        let (game_id, id) = (ticket.game_id.clone(), leaver.clone());
        let leaving = tokio::spawn(async move { matches.leave(&game_id, &id).await });
        let matches = h.state.matches.clone();
        let joiner = unique_str("joiner");
        let joining = tokio::spawn(async move { matches.find_match(&joiner, None).await });

        leaving.await.unwrap().unwrap();
        let joined = joining.await.unwrap().unwrap();

        assert!(h.state.store.tentative(&ticket.game_id).is_none());
        assert!(h
            .state
            .store
            .waiting_players()
            .iter()
            .all(|w| w.player_id != leaver));
        if joined.status == TicketStatus::Waiting {
            assert_ne!(joined.game_id, ticket.game_id);
        }
    }
}

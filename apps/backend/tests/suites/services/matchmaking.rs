// Waiting -> tentative -> playing lifecycle and leave.

use std::time::Duration;

use spinfour_backend::domain::{Color, GameStatus, WaitingPlayer};
use spinfour_backend::errors::{DomainError, NotFoundKind};
use spinfour_backend::realtime::GameEvent;
use spinfour_backend::services::{Confirmation, TicketStatus};

use crate::common::{harness, start_game};

fn waiting(player_id: &str, game_id: &str, joined_at: time::OffsetDateTime) -> WaitingPlayer {
    WaitingPlayer {
        player_id: player_id.to_string(),
        player_name: player_id.to_uppercase(),
        game_id: game_id.to_string(),
        joined_at,
    }
}

#[tokio::test]
async fn second_player_is_paired_with_the_first() {
    let h = harness().await;

    let first = h.state.matches.find_match("alice", Some("Alice")).await.unwrap();
    assert_eq!(first.status, TicketStatus::Waiting);
    assert!(first.opponent_id.is_none());
    assert!(uuid::Uuid::parse_str(&first.game_id).is_ok());

    let second = h.state.matches.find_match("bob", Some("Bob")).await.unwrap();
    assert_eq!(second.status, TicketStatus::Tentative);
    assert_eq!(second.game_id, first.game_id);
    assert_eq!(second.opponent_id.as_deref(), Some("alice"));
    assert_eq!(second.opponent_name.as_deref(), Some("Alice"));

    assert!(h.state.store.waiting_players().is_empty());
    assert!(h.state.store.tentative(&first.game_id).is_some());
}

#[tokio::test]
async fn pairing_takes_the_longest_waiting_player() {
    let h = harness().await;
    let now = h.state.store.now();
    h.state.store.set_waiting_players(vec![
        waiting("late", "g-late", now - Duration::from_secs(5)),
        waiting("early", "g-early", now - Duration::from_secs(20)),
    ]);

    let ticket = h.state.matches.find_match("carol", None).await.unwrap();
    assert_eq!(ticket.status, TicketStatus::Tentative);
    assert_eq!(ticket.game_id, "g-early");
    assert_eq!(ticket.opponent_id.as_deref(), Some("early"));

    let remaining = h.state.store.waiting_players();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].player_id, "late");
}

#[tokio::test]
async fn stale_waiting_players_are_skipped() {
    let h = harness().await;
    let now = h.state.store.now();
    h.state
        .store
        .set_waiting_players(vec![waiting("ghost", "g-ghost", now - Duration::from_secs(31))]);

    let ticket = h.state.matches.find_match("dave", None).await.unwrap();
    assert_eq!(ticket.status, TicketStatus::Waiting);
    assert_ne!(ticket.game_id, "g-ghost");

    let queue = h.state.store.waiting_players();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].player_id, "dave");
}

#[tokio::test]
async fn queue_expires_when_nobody_polls() {
    let h = harness().await;
    h.state.matches.find_match("alice", None).await.unwrap();

    h.clock.advance(Duration::from_secs(31));
    let ticket = h.state.matches.find_match("bob", None).await.unwrap();
    assert_eq!(ticket.status, TicketStatus::Waiting);
}

#[tokio::test]
async fn repolling_keeps_the_game_id() {
    let h = harness().await;
    let first = h.state.matches.find_match("alice", None).await.unwrap();

    h.clock.advance(Duration::from_secs(20));
    let again = h.state.matches.find_match("alice", Some("Alice")).await.unwrap();
    assert_eq!(again.status, TicketStatus::Waiting);
    assert_eq!(again.game_id, first.game_id);

    // The refresh restarts the wait, so the entry survives past the first 30s.
    h.clock.advance(Duration::from_secs(20));
    let queue = h.state.store.waiting_players();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].player_name, "Alice");
}

#[tokio::test]
async fn missing_name_defaults_and_blank_id_is_rejected() {
    let h = harness().await;
    h.state.matches.find_match("alice", Some("   ")).await.unwrap();
    let ticket = h.state.matches.find_match("bob", None).await.unwrap();
    assert_eq!(ticket.opponent_name.as_deref(), Some("Player"));

    let err = h.state.matches.find_match(" ", None).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn both_confirmations_start_the_game() {
    let h = harness().await;
    let first = h.state.matches.find_match("alice", Some("Alice")).await.unwrap();
    h.state.matches.find_match("bob", Some("Bob")).await.unwrap();
    let game_id = first.game_id.as_str();

    let pending = h.state.matches.confirm_match(game_id, "bob").await.unwrap();
    assert_eq!(
        pending,
        Confirmation::Pending {
            game_id: game_id.to_string()
        }
    );
    assert!(h.notifier.events().is_empty());

    let game = match h.state.matches.confirm_match(game_id, "alice").await.unwrap() {
        Confirmation::Started { game } => game,
        other => panic!("expected start, got {other:?}"),
    };
    assert_eq!(game.id(), game_id);
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.current_player(), Color::Red);
    assert_eq!(game.players()[0].player_id, "alice");
    assert_eq!(game.players()[0].color, Color::Red);
    assert_eq!(game.players()[1].player_id, "bob");
    assert_eq!((game.board().rows(), game.board().cols()), (6, 7));

    assert!(h.state.store.tentative(game_id).is_none());
    assert_eq!(h.state.games.state(game_id).unwrap(), game);

    let events = h.notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, game_id);
    assert_eq!(events[0].1, GameEvent::GameStart { game: game.clone() });

    // A late repeat is answered from the live game without a second event.
    let again = h.state.matches.confirm_match(game_id, "bob").await.unwrap();
    assert_eq!(again, Confirmation::Started { game });
    assert_eq!(h.notifier.events().len(), 1);
}

#[tokio::test]
async fn confirm_rejects_unknown_pairings_and_strangers() {
    let h = harness().await;

    let err = h.state.matches.confirm_match("missing", "alice").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Match, _)));

    let first = h.state.matches.find_match("alice", None).await.unwrap();
    h.state.matches.find_match("bob", None).await.unwrap();
    let err = h
        .state
        .matches
        .confirm_match(&first.game_id, "mallory")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let game = start_game(&h.state, "carol", "dave").await;
    let err = h
        .state
        .matches
        .confirm_match(game.id(), "mallory")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn unconfirmed_pairing_expires() {
    let h = harness().await;
    let first = h.state.matches.find_match("alice", None).await.unwrap();
    h.state.matches.find_match("bob", None).await.unwrap();

    h.clock.advance(Duration::from_secs(31));
    let err = h
        .state
        .matches
        .confirm_match(&first.game_id, "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Match, _)));
}

#[tokio::test]
async fn leaving_an_active_game_removes_it_and_notifies() {
    let h = harness().await;
    let game = start_game(&h.state, "alice", "bob").await;

    h.state.matches.leave(game.id(), "bob").await.unwrap();

    let err = h.state.games.state(game.id()).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    assert_eq!(h.notifier.names(), vec!["game.start", "player.left"]);
    assert_eq!(
        h.notifier.events()[1].1,
        GameEvent::PlayerLeft {
            player_id: "bob".to_string()
        }
    );

    // Leaving twice is harmless and silent.
    h.state.matches.leave(game.id(), "bob").await.unwrap();
    assert_eq!(h.notifier.events().len(), 2);
}

#[tokio::test]
async fn leaving_a_game_also_drops_an_old_queue_entry() {
    let h = harness().await;
    let game = start_game(&h.state, "alice", "bob").await;
    let now = h.state.store.now();
    h.state
        .store
        .set_waiting_players(vec![waiting("bob", "g-old", now)]);

    h.state.matches.leave(game.id(), "bob").await.unwrap();

    assert!(h.state.store.game(game.id()).is_none());
    assert!(h.state.store.waiting_players().is_empty());
    assert_eq!(h.notifier.names(), vec!["game.start", "player.left"]);
}

#[tokio::test]
async fn leaving_the_queue_prevents_pairing() {
    let h = harness().await;
    let ticket = h.state.matches.find_match("alice", None).await.unwrap();

    h.state.matches.leave(&ticket.game_id, "alice").await.unwrap();
    assert!(h.state.store.waiting_players().is_empty());
    assert!(h.notifier.events().is_empty());

    let next = h.state.matches.find_match("bob", None).await.unwrap();
    assert_eq!(next.status, TicketStatus::Waiting);
    assert_ne!(next.game_id, ticket.game_id);
}

#[tokio::test]
async fn leaving_a_tentative_pairing_cancels_it() {
    let h = harness().await;
    let first = h.state.matches.find_match("alice", None).await.unwrap();
    h.state.matches.find_match("bob", None).await.unwrap();

    h.state.matches.leave(&first.game_id, "alice").await.unwrap();
    assert_eq!(h.notifier.names(), vec!["player.left"]);

    let err = h
        .state
        .matches
        .confirm_match(&first.game_id, "bob")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Match, _)));
}

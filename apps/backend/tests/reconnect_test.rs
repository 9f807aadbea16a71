//! Reconnect mid-hand: a disconnected seat is auto-played, and the same
//! name reattaches to the same seat with the same cards.

use backend::domain::state::Phase;
use backend::domain::transitions::begin_match;
use backend::domain::Room;
use backend::services::auto_advance::execute_step;
use backend::services::rooms::{mark_connected, reserve_seat};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

#[test]
fn reconnect_restores_seat_and_hand() {
    let mut room = Room::new("table", None, "tok".into());
    let creator = reserve_seat(&mut room, "alice", None, true).unwrap();
    mark_connected(&mut room, &creator.player_id, true);
    let mut others = Vec::new();
    for name in ["bob", "carol", "dave"] {
        let outcome = reserve_seat(&mut room, name, None, false).unwrap();
        mark_connected(&mut room, &outcome.player_id, true);
        others.push(outcome.player_id);
    }

    let mut rng = ChaCha12Rng::seed_from_u64(99);
    begin_match(&mut room, &mut rng).unwrap();
    assert_eq!(room.game.as_ref().unwrap().phase, Phase::BiddingRound1);

    // Dealer is seat 0, so bob (seat 1) holds the first turn. He vanishes.
    let bob_id = others[0].clone();
    let bob_hand = room.player_by_id(&bob_id).unwrap().hand.clone();
    assert_eq!(room.game.as_ref().unwrap().turn_seat, 1);
    mark_connected(&mut room, &bob_id, false);

    // The scheduler passes for him and moves on.
    let events = execute_step(&mut room, &mut rng).unwrap().unwrap();
    assert!(events[0].starts_with("bob"));
    assert_eq!(room.game.as_ref().unwrap().turn_seat, 2);

    // Reconnection by (case-insensitive) name rebinds the same player.
    let back = reserve_seat(&mut room, "BOB", None, false).unwrap();
    assert_eq!(back.player_id, bob_id);
    assert!(!back.newly_seated);
    mark_connected(&mut room, &bob_id, true);

    let bob = room.player_by_id(&bob_id).unwrap();
    assert_eq!(bob.seat_index, 1);
    assert!(bob.connected);
    assert_eq!(bob.hand, bob_hand, "hand survives the disconnect");

    // With bob back, nothing is automated at his next turn.
    // (carol and dave still connected; turn is carol's, a human.)
    assert_eq!(execute_step(&mut room, &mut rng).unwrap(), None);
}

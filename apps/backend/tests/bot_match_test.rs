//! Bot-only progression: the scheduler drives a whole match to game-over
//! with three bots and one disconnected human, without any client actions.

use backend::domain::state::{BotDifficulty, Phase, Player, Room};
use backend::domain::transitions::begin_match;
use backend::services::auto_advance::execute_step;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

fn bot_room(difficulty: BotDifficulty) -> Room {
    let mut room = Room::new("bots", None, "tok".into());
    // The creator went away; their seat is auto-played.
    room.players.push(Player::new_human("creator", 0));
    for n in 1..4u8 {
        room.players.push(Player::new_bot(format!("Bot {n}"), n));
    }
    room.creator_player_id = Some(room.players[0].id.clone());
    room.bot_difficulty = difficulty;
    room
}

#[test]
fn medium_bots_drive_a_match_to_game_over() {
    let mut rng = ChaCha12Rng::seed_from_u64(2024);
    let mut room = bot_room(BotDifficulty::Medium);
    begin_match(&mut room, &mut rng).unwrap();

    let mut last_score = (0u16, 0u16);
    let mut steps = 0usize;
    loop {
        match execute_step(&mut room, &mut rng).expect("scheduler step") {
            Some(_) => {
                steps += 1;
                assert!(steps < 20_000, "match failed to terminate");
                // Scores never decrease.
                let score = (room.score.team0, room.score.team1);
                assert!(score.0 >= last_score.0 && score.1 >= last_score.1);
                last_score = score;
            }
            None => break,
        }
    }

    let game = room.game.as_ref().expect("game present");
    assert_eq!(game.phase, Phase::GameOver);
    assert!(
        room.score.team0 >= 10 || room.score.team1 >= 10,
        "someone must reach the target score, got {:?}",
        room.score
    );
}

#[test]
fn scheduler_is_idle_once_the_match_ends() {
    let mut rng = ChaCha12Rng::seed_from_u64(7);
    let mut room = bot_room(BotDifficulty::Easy);
    begin_match(&mut room, &mut rng).unwrap();
    room.game.as_mut().unwrap().phase = Phase::GameOver;

    assert_eq!(execute_step(&mut room, &mut rng).unwrap(), None);
    assert_eq!(execute_step(&mut room, &mut rng).unwrap(), None);
}

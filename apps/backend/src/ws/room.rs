//! The per-room single-writer actor.
//!
//! Every mutation of a room — client actions, session attach/detach,
//! auto-advance ticks, deletion — flows through this actor's mailbox, which
//! serializes them into a total order. After each committed mutation the
//! actor persists the room, broadcasts personalized snapshots, and
//! schedules the auto-advance timer. At most one advance timer is in
//! flight; re-entry is coalesced and each firing re-derives what to do from
//! current state, so stale wakeups are harmless.

use std::collections::HashMap;

use actix::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::state::BotDifficulty;
use crate::domain::{transitions, Room};
use crate::errors::domain::{AuthKind, DomainError, ValidationKind};
use crate::protocol::{snapshot_for, summarize, RoomSummary};
use crate::services::auto_advance::{self, MAX_ITERATIONS};
use crate::services::rooms::{self, ReserveOutcome};
use crate::state::AppState;
use crate::ws::protocol::{ActionMsg, ServerMsg};

/// Push channel into one websocket session.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub enum SessionCommand {
    Frame(String),
    /// Close with the given websocket code and stop the session.
    Close(u16),
}

pub const CLOSE_GOING_AWAY: u16 = 1001;

#[derive(Message)]
#[rtype(result = "Result<ReserveOutcome, DomainError>")]
pub struct Reserve {
    pub name: String,
    pub password: Option<String>,
    pub as_creator: bool,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Attach {
    pub conn_id: Uuid,
    pub player_id: String,
    pub recipient: Recipient<SessionCommand>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Detach {
    pub conn_id: Uuid,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct ClientAction {
    pub conn_id: Uuid,
    pub action: ActionMsg,
}

/// Summary for `GET /rooms`; None when the room has outlived its TTL.
#[derive(Message)]
#[rtype(result = "Option<RoomSummary>")]
pub struct Summarize;

/// Equality check for the creator capability on the connect path.
#[derive(Message)]
#[rtype(result = "bool")]
pub struct CheckCreatorToken {
    pub token: String,
}

#[derive(Message)]
#[rtype(result = "Result<(), DomainError>")]
pub struct DeleteRoom {
    pub creator_token: String,
}

/// TTL reap: close sessions and drop the room without a token.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Expire;

struct SessionHandle {
    player_id: String,
    recipient: Recipient<SessionCommand>,
}

pub struct RoomActor {
    room: Room,
    app: AppState,
    sessions: HashMap<Uuid, SessionHandle>,
    advance_pending: bool,
    rng: ChaCha12Rng,
}

impl RoomActor {
    pub fn new(room: Room, app: AppState) -> Self {
        Self {
            room,
            app,
            sessions: HashMap::new(),
            advance_pending: false,
            rng: ChaCha12Rng::seed_from_u64(rand::rng().random()),
        }
    }

    fn expired(&self) -> bool {
        let age = OffsetDateTime::now_utc() - self.room.created_at;
        age >= self.app.pacing().room_ttl
    }

    fn persist(&self) {
        if let Err(err) = self.app.store().persist(&self.room) {
            warn!(room = %self.room.name, error = %err, "failed to persist room");
        }
    }

    fn send_to(handle: &SessionHandle, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => handle.recipient.do_send(SessionCommand::Frame(payload)),
            Err(err) => warn!(error = %err, "failed to serialize outbound frame"),
        }
    }

    fn send_error(&self, conn_id: Uuid, message: String) {
        if let Some(handle) = self.sessions.get(&conn_id) {
            Self::send_to(handle, &ServerMsg::Error { message });
        }
    }

    fn broadcast_info(&self, events: &[String]) {
        for event in events {
            let msg = ServerMsg::Info {
                message: event.clone(),
            };
            for handle in self.sessions.values() {
                Self::send_to(handle, &msg);
            }
        }
    }

    fn broadcast_state(&self) {
        for handle in self.sessions.values() {
            let snapshot = snapshot_for(&self.room, Some(&handle.player_id));
            Self::send_to(handle, &ServerMsg::State { state: snapshot });
        }
    }

    /// Persist + broadcast a committed mutation, then keep automation going.
    fn commit(&mut self, ctx: &mut Context<Self>, events: Vec<String>, iterations: u8) {
        self.room.touch();
        self.persist();
        self.broadcast_info(&events);
        self.broadcast_state();
        self.schedule_advance(ctx, iterations);
    }

    /// Arm the auto-advance timer if an automated seat is up. One timer at
    /// a time; the firing recomputes everything from current state.
    fn schedule_advance(&mut self, ctx: &mut Context<Self>, iterations: u8) {
        if self.advance_pending {
            return;
        }
        if iterations >= MAX_ITERATIONS {
            warn!(room = %self.room.name, "auto-advance iteration cap reached");
            return;
        }
        let Some(delay) = auto_advance::next_delay(&self.room, &self.app.pacing()) else {
            return;
        };
        self.advance_pending = true;
        ctx.run_later(delay, move |actor, ctx| {
            actor.advance_pending = false;
            match auto_advance::execute_step(&mut actor.room, &mut actor.rng) {
                Ok(Some(events)) => actor.commit(ctx, events, iterations + 1),
                Ok(None) => {}
                Err(err) => {
                    warn!(room = %actor.room.name, error = %err, "auto-advance step failed");
                }
            }
        });
    }

    fn shutdown(&mut self, ctx: &mut Context<Self>, close_code: u16, drop_record: bool) {
        for handle in self.sessions.values() {
            handle.recipient.do_send(SessionCommand::Close(close_code));
        }
        self.sessions.clear();
        self.app.remove_room(&self.room.name);
        if drop_record {
            if let Err(err) = self.app.store().remove(&self.room.name) {
                warn!(room = %self.room.name, error = %err, "failed to remove room record");
            }
        }
        ctx.stop();
    }

    fn apply_action(
        &mut self,
        player_id: &str,
        action: ActionMsg,
    ) -> Result<Vec<String>, DomainError> {
        let seat = self.room.seat_of(player_id).ok_or_else(|| {
            DomainError::not_found(
                crate::errors::domain::NotFoundKind::Player,
                "You are not seated in this room",
            )
        })?;
        let room = &mut self.room;
        match action {
            ActionMsg::Pass => transitions::pass(room, seat, &mut self.rng),
            ActionMsg::OrderUp { alone } => transitions::order_up(room, seat, alone),
            ActionMsg::ChooseTrump { suit, alone } => {
                transitions::choose_trump(room, seat, suit, alone)
            }
            ActionMsg::Discard { card_id } => transitions::dealer_discard(room, seat, &card_id),
            ActionMsg::PlayCard { card_id } => transitions::play_card(room, seat, &card_id),
            ActionMsg::StartNextHand => transitions::start_next_hand(room, &mut self.rng),
            ActionMsg::RestartMatch => transitions::restart_match(room, &mut self.rng),
            ActionMsg::AddBot => rooms::add_bot(room, player_id),
            ActionMsg::RemoveBot => rooms::remove_bot(room, player_id),
            ActionMsg::SetSeat {
                target_player_id,
                seat_index,
            } => rooms::set_seat(room, player_id, &target_player_id, seat_index),
            ActionMsg::SetBotDifficulty { bot_difficulty } => {
                let difficulty = BotDifficulty::parse(&bot_difficulty).ok_or_else(|| {
                    DomainError::validation(
                        ValidationKind::BadDifficulty,
                        format!("Unknown difficulty: {bot_difficulty}"),
                    )
                })?;
                rooms::set_bot_difficulty(room, player_id, difficulty)
            }
            ActionMsg::StartRoom => rooms::start_room(room, player_id, &mut self.rng),
        }
    }
}

impl Actor for RoomActor {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(room = %self.room.name, "room actor started");
        // A restored room may owe the table automation (bot seats mid-hand).
        self.schedule_advance(ctx, 0);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(room = %self.room.name, "room actor stopped");
    }
}

impl Handler<Reserve> for RoomActor {
    type Result = Result<ReserveOutcome, DomainError>;

    fn handle(&mut self, msg: Reserve, _ctx: &mut Self::Context) -> Self::Result {
        let outcome = rooms::reserve_seat(
            &mut self.room,
            &msg.name,
            msg.password.as_deref(),
            msg.as_creator,
        )?;
        self.room.touch();
        self.persist();
        Ok(outcome)
    }
}

impl Handler<Attach> for RoomActor {
    type Result = ();

    fn handle(&mut self, msg: Attach, ctx: &mut Self::Context) {
        let event = rooms::mark_connected(&mut self.room, &msg.player_id, true);
        self.sessions.insert(
            msg.conn_id,
            SessionHandle {
                player_id: msg.player_id,
                recipient: msg.recipient,
            },
        );
        self.commit(ctx, event.into_iter().collect(), 0);
    }
}

impl Handler<Detach> for RoomActor {
    type Result = ();

    fn handle(&mut self, msg: Detach, ctx: &mut Self::Context) {
        let Some(handle) = self.sessions.remove(&msg.conn_id) else {
            return;
        };
        // The seat stays reserved; only mark it disconnected when no other
        // session is bound to the same player.
        let still_bound = self
            .sessions
            .values()
            .any(|h| h.player_id == handle.player_id);
        if still_bound {
            return;
        }
        let event = rooms::mark_connected(&mut self.room, &handle.player_id, false);
        self.commit(ctx, event.into_iter().collect(), 0);
    }
}

impl Handler<ClientAction> for RoomActor {
    type Result = ();

    fn handle(&mut self, msg: ClientAction, ctx: &mut Self::Context) {
        let Some(player_id) = self
            .sessions
            .get(&msg.conn_id)
            .map(|h| h.player_id.clone())
        else {
            return;
        };
        match self.apply_action(&player_id, msg.action) {
            Ok(events) => self.commit(ctx, events, 0),
            // The offender alone hears about it; state is untouched.
            Err(err) => self.send_error(msg.conn_id, err.message().to_string()),
        }
    }
}

impl Handler<Summarize> for RoomActor {
    type Result = Option<RoomSummary>;

    fn handle(&mut self, _msg: Summarize, _ctx: &mut Self::Context) -> Self::Result {
        if self.expired() {
            return None;
        }
        Some(summarize(&self.room))
    }
}

impl Handler<CheckCreatorToken> for RoomActor {
    type Result = bool;

    fn handle(&mut self, msg: CheckCreatorToken, _ctx: &mut Self::Context) -> Self::Result {
        msg.token == self.room.creator_token
    }
}

impl Handler<DeleteRoom> for RoomActor {
    type Result = Result<(), DomainError>;

    fn handle(&mut self, msg: DeleteRoom, ctx: &mut Self::Context) -> Self::Result {
        if msg.creator_token != self.room.creator_token {
            return Err(DomainError::unauthorized(
                AuthKind::TokenMismatch,
                "Creator token mismatch",
            ));
        }
        info!(room = %self.room.name, "room deleted by creator");
        self.shutdown(ctx, CLOSE_GOING_AWAY, true);
        Ok(())
    }
}

impl Handler<Expire> for RoomActor {
    type Result = ();

    fn handle(&mut self, _msg: Expire, ctx: &mut Self::Context) {
        info!(room = %self.room.name, "room expired; reaping");
        self.shutdown(ctx, CLOSE_GOING_AWAY, true);
    }
}

//! Per-connection websocket session actor.
//!
//! The session parses client frames and forwards actions to its room
//! actor; it answers `{type:"ping"}` itself so keepalives never wake the
//! room. Protocol-level ping/pong heartbeats guard against dead peers.

use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ws::protocol::{ClientMsg, ServerMsg};
use crate::ws::room::{Attach, ClientAction, Detach, RoomActor, SessionCommand};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

const CLOSE_POLICY: ws::CloseCode = ws::CloseCode::Policy;

pub struct WsSession {
    conn_id: Uuid,
    player_id: String,
    room: Addr<RoomActor>,
    last_heartbeat: Instant,
}

impl WsSession {
    pub fn new(conn_id: Uuid, player_id: String, room: Addr<RoomActor>) -> Self {
        Self {
            conn_id,
            player_id,
            room,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "failed to serialize outbound message"),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, player_id = %self.player_id, "session started");
        self.room.do_send(Attach {
            conn_id: self.conn_id,
            player_id: self.player_id.clone(),
            recipient: ctx.address().recipient(),
        });
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.room.do_send(Detach {
            conn_id: self.conn_id,
        });
        info!(conn_id = %self.conn_id, player_id = %self.player_id, "session stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                let parsed: Result<ClientMsg, _> = serde_json::from_str(&text);
                match parsed {
                    Ok(ClientMsg::Ping) => {
                        // Answered here; the room actor never wakes.
                        Self::send_json(ctx, &ServerMsg::Pong);
                    }
                    Ok(ClientMsg::Action(action)) => {
                        self.room.do_send(ClientAction {
                            conn_id: self.conn_id,
                            action,
                        });
                    }
                    Err(_) => {
                        Self::send_json(
                            ctx,
                            &ServerMsg::Error {
                                message: "Malformed JSON".to_string(),
                            },
                        );
                        ctx.close(Some(ws::CloseReason::from(CLOSE_POLICY)));
                        ctx.stop();
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_json(
                    ctx,
                    &ServerMsg::Error {
                        message: "Binary frames are not supported".to_string(),
                    },
                );
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "websocket protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<SessionCommand> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: SessionCommand, ctx: &mut Self::Context) {
        match msg {
            SessionCommand::Frame(payload) => ctx.text(payload),
            SessionCommand::Close(code) => {
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::from(code))));
                ctx.stop();
            }
        }
    }
}

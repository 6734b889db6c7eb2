use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::GameError;
use crate::extractors::connection_context::HandshakeClaims;
use crate::services::game_flow::{ConnectionContext, GameFlowService};
use crate::state::app_state::AppState;
use crate::ws::hub::{ConnectionSink, DeliveryError, OutboundFrame};
use crate::ws::protocol::{Action, ClientMsg, ServerMsg, GUESS_ACTION};
use crate::AppError;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

/// Upgrade handler. Rejects the handshake before any socket exists when the
/// identity, session or role does not check out.
pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    claims: HandshakeClaims,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let flow = app_state.game_flow();
    let ctx = flow
        .authorize(&claims.user, &claims.session_id, claims.role)
        .map_err(AppError::from)?;

    let session = WsSession::new(Uuid::new_v4(), ctx, flow);
    ws::start(session, &req, stream)
}

/// Asks a connection to close after the hub dropped it.
#[derive(Message)]
#[rtype(result = "()")]
struct Evict;

/// Hub-facing handle to one `WsSession` actor.
struct ActorSink(Addr<WsSession>);

impl ConnectionSink for ActorSink {
    fn deliver(&self, frame: OutboundFrame) -> Result<(), DeliveryError> {
        Ok(self.0.try_send(frame)?)
    }

    fn evict(&self) {
        // `do_send` ignores the mailbox bound.
        self.0.do_send(Evict);
    }
}

/// One live WebSocket. The bound context never changes after the handshake;
/// inbound `session_id` fields are ignored.
pub struct WsSession {
    conn_id: Uuid,
    ctx: ConnectionContext,
    flow: Arc<GameFlowService>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: Uuid, ctx: ConnectionContext, flow: Arc<GameFlowService>) -> Self {
        Self {
            conn_id,
            ctx,
            flow,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(&self, ctx: &mut ws::WebsocketContext<Self>, err: &GameError) {
        Self::send_json(ctx, &ServerMsg::error(self.ctx.session_id.clone(), err));
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    session_id = %actor.ctx.session_id,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_text(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let msg: ClientMsg = match serde_json::from_str(text) {
            Ok(msg) => msg,
            Err(err) => {
                debug!(conn_id = %self.conn_id, error = %err, "[WS SESSION] ignoring malformed message");
                return;
            }
        };

        if msg.action != GUESS_ACTION {
            debug!(conn_id = %self.conn_id, action = %msg.action, "[WS SESSION] ignoring unknown action");
            return;
        }

        let flow = self.flow.clone();
        let bound = self.ctx.clone();
        let payload = msg.payload;

        // `wait` keeps this connection's guesses strictly ordered.
        ctx.wait(
            async move { flow.submit_guess(&bound, &payload).await }
                .into_actor(self)
                .map(|res, actor, ctx| {
                    if let Err(err) = res {
                        debug!(
                            conn_id = %actor.conn_id,
                            session_id = %actor.ctx.session_id,
                            error = %err,
                            "[WS SESSION] guess rejected"
                        );
                        actor.send_error(ctx, &err);
                    }
                }),
        );
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            session_id = %self.ctx.session_id,
            role = ?self.ctx.role,
            "[WS SESSION] started"
        );

        let sink: Arc<dyn ConnectionSink> = Arc::new(ActorSink(ctx.address()));
        match self.flow.attach(&self.ctx, self.conn_id, sink) {
            Ok(view) => {
                let msg = ServerMsg::with_state(self.ctx.session_id.clone(), Action::State, view);
                Self::send_json(ctx, &msg);
            }
            Err(err) => {
                // Evicted between handshake and start.
                self.send_error(ctx, &err);
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Policy)));
                ctx.stop();
                return;
            }
        }

        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.flow.detach(&self.ctx, self.conn_id);
        info!(
            conn_id = %self.conn_id,
            session_id = %self.ctx.session_id,
            "[WS SESSION] stopped"
        );
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
                self.handle_text(&text, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                debug!(conn_id = %self.conn_id, "[WS SESSION] ignoring binary frame");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    session_id = %self.ctx.session_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<OutboundFrame> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: OutboundFrame, ctx: &mut Self::Context) -> Self::Result {
        ctx.text(msg.0);
    }
}

impl Handler<Evict> for WsSession {
    type Result = ();

    fn handle(&mut self, _msg: Evict, ctx: &mut Self::Context) -> Self::Result {
        warn!(
            conn_id = %self.conn_id,
            session_id = %self.ctx.session_id,
            "[WS SESSION] evicted by hub, mailbox full"
        );
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Again)));
        ctx.stop();
    }
}

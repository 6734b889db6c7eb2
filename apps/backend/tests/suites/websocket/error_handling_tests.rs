// Rejected guesses stay private to the sender

use std::time::Duration;

use crate::common::test_state;
use crate::support::websocket::{start_test_server, wait_for_connections, ws_url};
use crate::support::websocket_client::WebSocketClient;

const WAIT: Duration = Duration::from_secs(5);
const QUIET: Duration = Duration::from_millis(200);

#[tokio::test]
async fn rejections_reach_only_the_sender() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _) = test_state();
    let flow = state.game_flow();
    let registry = state.connections();
    let created = flow.create_session("alice", None, None, false).await?;
    let sid = created.session_id.to_string();
    flow.join(&created.session_id, "bob")?;

    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut alice =
        WebSocketClient::connect_retry(&ws_url(addr, "alice", &sid, Some("A")), Duration::from_secs(1))
            .await?;
    let mut bob =
        WebSocketClient::connect_retry(&ws_url(addr, "bob", &sid, Some("B")), Duration::from_secs(1))
            .await?;
    let _ = alice.recv_json_timeout(WAIT).await?;
    let _ = bob.recv_json_timeout(WAIT).await?;
    wait_for_connections(&registry, 2, Duration::from_secs(1)).await?;

    // Out of turn
    bob.guess("e").await?;
    let err = bob.recv_json_timeout(WAIT).await?.expect("error");
    assert_eq!(err["action"], "error");
    assert_eq!(err["code"], "OUT_OF_TURN");
    alice.assert_silent(QUIET).await;

    // Not a letter
    alice.guess("ab").await?;
    let err = alice.recv_json_timeout(WAIT).await?.expect("error");
    assert_eq!(err["code"], "INVALID_LETTER");
    bob.assert_silent(QUIET).await;

    // Accepted, then repeated by the other side
    alice.guess("x").await?;
    let _ = alice.recv_json_timeout(WAIT).await?.expect("alice update");
    let _ = bob.recv_json_timeout(WAIT).await?.expect("bob update");
    bob.guess("X").await?;
    let err = bob.recv_json_timeout(WAIT).await?.expect("error");
    assert_eq!(err["code"], "ALREADY_GUESSED");
    assert_eq!(err["payload"], "Letter 'x' has already been guessed.");
    alice.assert_silent(QUIET).await;

    alice.close().await?;
    bob.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[tokio::test]
async fn guess_before_opponent_joins_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _) = test_state();
    let flow = state.game_flow();
    let created = flow.create_session("alice", None, None, false).await?;
    let sid = created.session_id.to_string();

    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut alice =
        WebSocketClient::connect_retry(&ws_url(addr, "alice", &sid, Some("A")), Duration::from_secs(1))
            .await?;
    let _ = alice.recv_json_timeout(WAIT).await?;

    alice.guess("e").await?;
    let err = alice.recv_json_timeout(WAIT).await?.expect("error");
    assert_eq!(err["code"], "AWAITING_OPPONENT");

    alice.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[tokio::test]
async fn malformed_and_unknown_frames_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let (state, _) = test_state();
    let flow = state.game_flow();
    let created = flow.create_session("alice", None, None, true).await?;
    let sid = created.session_id.to_string();

    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let mut alice =
        WebSocketClient::connect_retry(&ws_url(addr, "alice", &sid, Some("A")), Duration::from_secs(1))
            .await?;
    let _ = alice.recv_json_timeout(WAIT).await?;

    alice.send("not json").await?;
    alice.send(r#"{"action":"chat","payload":"hi"}"#).await?;
    alice.assert_silent(QUIET).await;

    // The connection is still usable afterwards.
    alice.guess("a").await?;
    let msg = alice.recv_json_timeout(WAIT).await?.expect("state");
    assert_eq!(msg["action"], "state");

    alice.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

/**
 * Competition WebSocket Endpoint
 *
 * Handles the duplex endpoint at `GET /competitions/ws`. The client sends a
 * registration message `{"telegram_id": <id>}` after connecting; the server
 * registers the connection handle and pushes room events until the
 * transport closes. No response to the registration message is required.
 *
 * # Connection Anatomy
 *
 * The socket is split into reader and writer halves. The writer half is
 * owned by a spawned task fed from an unbounded mpsc channel, so any
 * component holding the registry can push messages to this client. The
 * reader half runs in the handler task and only parses registration
 * messages.
 *
 * # Disconnect
 *
 * When the transport signals closure (close frame, stream end, or error),
 * the handle is unregistered and presence cleanup runs: the user's current
 * room is resolved through the membership index, their presence flips to
 * offline, and the room is told they left.
 */
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::backend::server::state::AppState;

/// Registration message sent by the client after connecting.
#[derive(Debug, Deserialize)]
struct RegisterConnection {
    telegram_id: i64,
}

/// Upgrade handler for `GET /competitions/ws`.
pub async fn competition_socket(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (ws_sender, mut ws_receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel::<Message>();

    // Writer task owns the sink; everything outbound goes through the channel.
    let writer = tokio::spawn(writer_task(ws_sender, rx));

    let mut registered: Option<i64> = None;

    loop {
        match ws_receiver.next().await {
            Some(Ok(Message::Text(text))) => {
                match serde_json::from_str::<RegisterConnection>(&text) {
                    Ok(registration) => {
                        state.registry.register(registration.telegram_id, tx.clone());
                        registered = Some(registration.telegram_id);
                        tracing::info!(
                            telegram_id = registration.telegram_id,
                            "websocket connection registered"
                        );
                    }
                    Err(e) => {
                        tracing::debug!("ignoring unrecognized client message: {e}");
                    }
                }
            }
            Some(Ok(Message::Close(frame))) => {
                tracing::info!(telegram_id = ?registered, reason = ?frame, "client closed websocket");
                break;
            }
            // Pings are answered by axum; other frames carry nothing for us.
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                tracing::warn!(telegram_id = ?registered, error = %e, "websocket receive error");
                break;
            }
            None => {
                tracing::info!(telegram_id = ?registered, "websocket stream ended");
                break;
            }
        }
    }

    writer.abort();

    if let Some(telegram_id) = registered {
        state.registry.unregister(telegram_id);
        if let Err(e) = state.lifecycle.change_presence_on_disconnect(telegram_id).await {
            tracing::error!(telegram_id, error = %e, "disconnect presence cleanup failed");
        }
    }
}

/// Forwards channel messages to the WebSocket sink until either side closes.
async fn writer_task(
    mut ws_sender: futures_util::stream::SplitSink<WebSocket, Message>,
    mut rx: mpsc::UnboundedReceiver<Message>,
) {
    while let Some(msg) = rx.recv().await {
        if ws_sender.send(msg).await.is_err() {
            break;
        }
    }
}

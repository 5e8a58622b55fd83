//! Minimal Matrix client-server API client (single room-message send).

use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::message::RoomMessage;

#[derive(Debug, Clone)]
pub struct MatrixClient {
    http: Client,
    base_url: Url,
    user_id: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    event_id: String,
}

impl MatrixClient {
    /// Build a client bound to a homeserver, user and access token.
    ///
    /// Fails on an unparseable server URL or empty credentials; delivery
    /// problems only surface on the actual send.
    pub fn new(server: &str, username: &str, token: &str) -> Result<Self> {
        if username.trim().is_empty() {
            return Err(Error::Client("username is empty".to_string()));
        }
        if token.trim().is_empty() {
            return Err(Error::Client("access token is empty".to_string()));
        }

        let base_url = Url::parse(server)
            .map_err(|e| Error::Client(format!("invalid server URL '{}': {}", server, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Client(format!(
                "invalid server URL '{}': not an HTTP(S) base",
                server
            )));
        }

        let http = Client::builder()
            .user_agent(format!("trixping/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Client(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            user_id: username.to_string(),
            token: token.to_string(),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Send one `m.room.message` event to a room. Exactly one attempt.
    ///
    /// Returns the event id assigned by the server.
    pub async fn send_room_message(&self, room: &str, message: &RoomMessage) -> Result<String> {
        let txn_id = Uuid::new_v4().to_string();
        let mut url = self.base_url.clone();
        // Room ids and aliases go in as path segments so that characters
        // with URL syntax meaning ('#' in aliases) get percent-encoded.
        url.path_segments_mut()
            .map_err(|_| Error::Client(format!("invalid server URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend([
                "_matrix",
                "client",
                "r0",
                "rooms",
                room,
                "send",
                "m.room.message",
                txn_id.as_str(),
            ]);

        debug!(%url, user_id = %self.user_id, "sending room message");

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(message)
            .send()
            .await
            .map_err(|e| Error::Send(format!("failed to reach server: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Send(format!("failed to read server response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::Send(format!(
                "server returned HTTP {}: {}",
                status.as_u16(),
                text
            )));
        }

        let parsed: SendResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Send(format!("server returned non-JSON response: {} ({})", text, e))
        })?;

        Ok(parsed.event_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn setup_client(server: &MockServer) -> MatrixClient {
        MatrixClient::new(&server.url(""), "@pinger:example.org", "secret").expect("client")
    }

    fn ping() -> RoomMessage {
        RoomMessage::plain("ping")
    }

    #[test]
    fn new_rejects_empty_username() {
        let err = MatrixClient::new("https://matrix.example.org", "  ", "token").unwrap_err();
        assert!(format!("{err}").contains("username is empty"));
    }

    #[test]
    fn new_rejects_empty_token() {
        let err = MatrixClient::new("https://matrix.example.org", "@u:x", "").unwrap_err();
        assert!(format!("{err}").contains("access token is empty"));
    }

    #[test]
    fn new_rejects_malformed_server_url() {
        let err = MatrixClient::new("not a url", "@u:x", "token").unwrap_err();
        assert!(matches!(err, Error::Client(_)));
        assert!(format!("{err}").contains("invalid server URL"));
    }

    #[test]
    fn new_rejects_non_base_server_url() {
        let err = MatrixClient::new("mailto:user@example.org", "@u:x", "token").unwrap_err();
        assert!(matches!(err, Error::Client(_)));
        assert!(format!("{err}").contains("not an HTTP(S) base"));
    }

    #[tokio::test]
    async fn send_puts_payload_with_bearer_token() {
        let server = MockServer::start_async().await;

        let send_mock = server.mock(|when, then| {
            when.method(PUT)
                .path_includes("/_matrix/client/r0/rooms/!room:example.org/send/m.room.message/")
                .header("authorization", "Bearer secret")
                .json_body(serde_json::json!({
                    "msgtype": "m.text",
                    "format": "org.matrix.custom.html",
                    "body": "ping",
                    "formatted_body": "ping"
                }));
            then.status(200)
                .json_body(serde_json::json!({ "event_id": "$evt1" }));
        });

        let client = setup_client(&server);
        let event_id = client
            .send_room_message("!room:example.org", &ping())
            .await
            .expect("send");

        assert_eq!(event_id, "$evt1");
        send_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn send_escapes_room_alias_in_path() {
        let server = MockServer::start_async().await;

        // '#' must travel as %23; unescaped it would be parsed as a
        // fragment and the path would collapse to /rooms/.
        let send_mock = server.mock(|when, then| {
            when.method(PUT)
                .path_includes("/_matrix/client/r0/rooms/%23alias:example.org/send/m.room.message/");
            then.status(200)
                .json_body(serde_json::json!({ "event_id": "$evt3" }));
        });

        let client = setup_client(&server);
        let event_id = client
            .send_room_message("#alias:example.org", &ping())
            .await
            .expect("send");

        assert_eq!(event_id, "$evt3");
        send_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn send_surfaces_http_error_status() {
        let server = MockServer::start_async().await;

        let send_mock = server.mock(|when, then| {
            when.method(PUT);
            then.status(403)
                .body("{\"errcode\":\"M_FORBIDDEN\"}");
        });

        let client = setup_client(&server);
        let err = client
            .send_room_message("!room:example.org", &ping())
            .await
            .unwrap_err();

        let msg = format!("{err}");
        assert!(msg.contains("HTTP 403"));
        assert!(msg.contains("M_FORBIDDEN"));
        send_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn send_rejects_non_json_success_body() {
        let server = MockServer::start_async().await;

        let send_mock = server.mock(|when, then| {
            when.method(PUT);
            then.status(200).body("not-json");
        });

        let client = setup_client(&server);
        let err = client
            .send_room_message("!room:example.org", &ping())
            .await
            .unwrap_err();

        assert!(format!("{err}").contains("non-JSON response"));
        send_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn send_makes_exactly_one_attempt_on_failure() {
        let server = MockServer::start_async().await;

        let send_mock = server.mock(|when, then| {
            when.method(PUT);
            then.status(500).body("boom");
        });

        let client = setup_client(&server);
        let _ = client
            .send_room_message("!room:example.org", &ping())
            .await
            .unwrap_err();

        send_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn server_path_prefix_is_preserved() {
        let server = MockServer::start_async().await;

        let send_mock = server.mock(|when, then| {
            when.method(PUT).path_includes("/prefix/_matrix/client/r0/rooms/");
            then.status(200)
                .json_body(serde_json::json!({ "event_id": "$evt2" }));
        });

        let client = MatrixClient::new(&server.url("/prefix"), "@u:x", "secret").expect("client");
        let event_id = client
            .send_room_message("!room:example.org", &ping())
            .await
            .expect("send");

        assert_eq!(event_id, "$evt2");
        send_mock.assert_calls(1);
    }
}

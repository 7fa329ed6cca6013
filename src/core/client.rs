// src/core/client.rs

use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

use crate::core::chat::ChatTransport;
use crate::core::config::Config;
use crate::core::error::TransportError;
use crate::core::models::{ChatReply, ChatRequest};

/// Path of the unauthenticated chat endpoint.
pub const CHAT_ENDPOINT: &str = "/api/chat/send_public";

/// Talks to the TruthGuard chat endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpChatClient {
    /// Builds a client for the server named in `config`.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;
        let endpoint = config.base_url.join(CHAT_ENDPOINT)?;
        debug!(endpoint = %endpoint, "Chat client ready.");
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ChatTransport for HttpChatClient {
    /// Posts `{"message": ...}` and decodes the JSON reply.
    ///
    /// The HTTP status is not inspected: error replies carry their reason in
    /// the body, which `ChatReply` already models.
    async fn send(&self, message: &str) -> Result<ChatReply, TransportError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.endpoint, error = %e, "Chat request failed.");
                e
            })?;

        info!(status = %response.status(), "Received chat response.");
        let reply = response.json::<ChatReply>().await?;
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves one canned HTTP response and hands back the raw request it received.
    async fn serve_once(status: &str, body: &str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });

        (Url::parse(&format!("http://{}/", addr)).unwrap(), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    /// Same as `HttpChatClient::new`, minus any proxy configured in the environment.
    fn client_for(base_url: Url) -> HttpChatClient {
        HttpChatClient {
            http: reqwest::Client::builder().no_proxy().build().unwrap(),
            endpoint: base_url.join(CHAT_ENDPOINT).unwrap(),
        }
    }

    #[test]
    fn endpoint_is_resolved_against_base_url() {
        let config = Config::default()
            .with_base_url(Some(Url::parse("https://tg.example/app/").unwrap()));
        let client = HttpChatClient::new(&config).unwrap();
        assert_eq!(client.endpoint().as_str(), "https://tg.example/api/chat/send_public");
    }

    #[tokio::test]
    async fn posts_json_message_and_decodes_reply() {
        let (base, server) = serve_once("200 OK", r#"{"success": true, "response": "Hi there"}"#).await;

        let reply = client_for(base).send("hello").await.unwrap();
        assert_eq!(reply.display_text(), "Hi there");

        let request = server.await.unwrap();
        let lowered = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /api/chat/send_public HTTP/1.1"));
        assert!(lowered.contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"message":"hello"}"#));
    }

    #[tokio::test]
    async fn error_status_still_yields_body() {
        let (base, server) =
            serve_once("429 Too Many Requests", r#"{"success": false, "error": "rate limited"}"#).await;

        let reply = client_for(base).send("hello").await.unwrap();
        assert_eq!(reply.display_text(), "Error: rate limited");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn non_json_body_is_a_transport_error() {
        let (base, server) = serve_once("200 OK", "<html>oops</html>").await;

        let err = client_for(base).send("hello").await.unwrap_err();
        assert!(matches!(err, TransportError::Http(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = Url::parse(&format!("http://{}/", addr)).unwrap();
        let err = client_for(base).send("hello").await.unwrap_err();
        assert!(matches!(err, TransportError::Http(_)));
    }
}

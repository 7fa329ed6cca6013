// src/core/chat.rs

//! The chat widget controller.
//!
//! `ChatWidget` owns everything the floating chat panel shows: whether the
//! panel is open, the input line, and the message log. Views only read it.
//! Sending is split in two halves so the network call can run off the UI
//! loop: `submit` prepares a request and `resolve` applies its outcome.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::controls::InputField;
use crate::core::error::TransportError;
use crate::core::models::{ChatReply, Role};

/// Text of the bot message shown while a request is in flight.
pub const PLACEHOLDER_TEXT: &str = "Typing...";

/// Identifies one submission, from `submit` until its reply is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    /// Set on the placeholder of the request it stands for.
    pub request: Option<RequestId>,
}

/// A message ready to be sent to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: RequestId,
    pub message: String,
}

/// The outcome of one submission, delivered back to the UI loop.
#[derive(Debug)]
pub struct ChatEvent {
    pub id: RequestId,
    pub outcome: Result<ChatReply, TransportError>,
}

/// Something that can deliver a chat message to the server.
pub trait ChatTransport: Send + Sync + 'static {
    fn send(
        &self,
        message: &str,
    ) -> impl Future<Output = Result<ChatReply, TransportError>> + Send;
}

#[derive(Debug, Default)]
pub struct ChatWidget {
    panel: PanelState,
    input: InputField,
    messages: Vec<ChatMessage>,
    in_flight: HashSet<RequestId>,
    next_request: u64,
    /// Lines scrolled up from the newest message.
    scroll_back: u16,
}

impl ChatWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.panel == PanelState::Open
    }

    /// The toggle control. It only ever opens the panel.
    pub fn open_panel(&mut self) {
        if self.panel == PanelState::Closed {
            debug!("Chat panel opened.");
        }
        self.panel = PanelState::Open;
    }

    /// The close control.
    pub fn close_panel(&mut self) {
        if self.panel == PanelState::Open {
            debug!("Chat panel closed.");
        }
        self.panel = PanelState::Closed;
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputField {
        &mut self.input
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_in_flight(&self, id: RequestId) -> bool {
        self.in_flight.contains(&id)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn scroll_back(&self) -> u16 {
        self.scroll_back
    }

    pub fn scroll_up(&mut self) {
        self.scroll_back = self.scroll_back.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_back = self.scroll_back.saturating_sub(1);
    }

    /// Takes the current input and turns it into a submission.
    ///
    /// Blank input is ignored. Otherwise the user's message is echoed to the
    /// log, the input is cleared, and a placeholder tagged with the new
    /// request id is appended.
    pub fn submit(&mut self) -> Option<Submission> {
        let text = self.input.value().trim().to_string();
        if text.is_empty() {
            debug!("Ignoring blank chat submission.");
            return None;
        }

        self.append(Role::User, text.clone(), None);
        self.input.clear();

        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.append(Role::Bot, PLACEHOLDER_TEXT.to_string(), Some(id));
        self.in_flight.insert(id);

        info!(request = %id, chars = text.chars().count(), "Chat message submitted.");
        Some(Submission { id, message: text })
    }

    /// Applies the outcome of a submission to the log.
    ///
    /// A decoded reply replaces that submission's own placeholder. A transport
    /// failure appends an error and leaves the placeholder where it is.
    pub fn resolve(&mut self, event: ChatEvent) {
        if !self.in_flight.remove(&event.id) {
            warn!(request = %event.id, "Reply for a request that is not in flight.");
        }

        match event.outcome {
            Ok(reply) => {
                if let Some(pos) = self
                    .messages
                    .iter()
                    .rposition(|m| m.request == Some(event.id))
                {
                    self.messages.remove(pos);
                }
                debug!(request = %event.id, success = reply.success, "Chat reply received.");
                self.append(Role::Bot, reply.display_text(), None);
            }
            Err(err) => {
                warn!(request = %event.id, error = %err, "Chat request failed.");
                for message in self.messages.iter_mut() {
                    if message.request == Some(event.id) {
                        message.request = None;
                    }
                }
                self.append(Role::Bot, format!("Network error: {}", err), None);
            }
        }
    }

    fn append(&mut self, role: Role, text: String, request: Option<RequestId>) {
        debug!(role = %role, placeholder = request.is_some(), "Chat message appended.");
        self.messages.push(ChatMessage { role, text, request });
        self.scroll_back = 0;
    }
}

/// Sends a submission on a background task and reports the outcome on `tx`.
pub fn spawn_exchange<T, E>(
    transport: Arc<T>,
    submission: Submission,
    tx: mpsc::Sender<E>,
) -> JoinHandle<()>
where
    T: ChatTransport,
    E: From<ChatEvent> + Send + 'static,
{
    tokio::spawn(async move {
        let outcome = transport.send(&submission.message).await;
        let event = ChatEvent { id: submission.id, outcome };
        if tx.send(event.into()).await.is_err() {
            debug!(request = %submission.id, "UI loop gone, dropping chat reply.");
        }
    })
}

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::app_mode::AppMode;
use super::message::Message;
use super::user_input::UserInput;
use crate::analytics::{AnalyticsApi, ChatReply, ChatRequest, DownloadRequest};
use crate::error::Result;
use crate::report::{self, DownloadOutcome, ReportSink};

/// First message of every conversation.
pub const GREETING: &str = "Hello! I can analyze real estate trends for you. Ask me about locations like 'Wakad' or 'Aundh'.";

/// Bot message appended when a chat request fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Identifies one outstanding chat request.
///
/// Tickets increase monotonically within a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A chat call handed out by [`ConversationView::begin_send`], to be settled
/// with [`ConversationView::settle_chat`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChat {
    pub ticket: RequestTicket,
    pub request: ChatRequest,
}

/// What the caller must do after a send.
#[derive(Debug, Clone, PartialEq)]
pub enum SendAction {
    /// Blank input; nothing changed.
    Ignored,
    /// Issue the chat call and settle it afterwards.
    Chat(PendingChat),
    /// Run a download for these areas. No chat call is made.
    Download(DownloadRequest),
}

/// Result of the one-shot [`ConversationView::send_message`].
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    Ignored,
    /// A bot message (reply or fallback) was appended.
    Replied,
    Downloaded(DownloadOutcome),
}

/// Owned state of one conversation.
///
/// Holds the message log, the pending input text, the loading mode and the
/// active areas. All mutation goes through the action methods below; the log
/// is append-only.
///
/// Overlapping chat calls are allowed. Each settled call appends its own bot
/// message in settlement order, a reply carrying `context.areas` replaces the
/// active areas (so the last one to settle wins), and the view stays in
/// `Loading` until every outstanding call has settled.
#[derive(Debug, Clone)]
pub struct ConversationView {
    messages: Vec<Message>,
    input: String,
    active_areas: Vec<String>,
    mode: AppMode,
    next_ticket: u64,
    in_flight: BTreeSet<RequestTicket>,
}

impl Default for ConversationView {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationView {
    /// Creates a conversation seeded with the greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::bot(GREETING)],
            input: String::new(),
            active_areas: Vec::new(),
            mode: AppMode::Idle,
            next_ticket: 0,
            in_flight: BTreeSet::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn active_areas(&self) -> &[String] {
        &self.active_areas
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.mode == AppMode::Loading
    }

    /// Number of chat calls that have not settled yet.
    pub fn pending_requests(&self) -> usize {
        self.in_flight.len()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Sends the pending input text.
    pub fn submit(&mut self) -> SendAction {
        let text = self.input.clone();
        self.begin_send(&text)
    }

    /// Starts a send.
    ///
    /// Blank input is ignored without touching any state. Otherwise the user
    /// message is appended and the input cleared. Text mentioning "download"
    /// yields a download of the current areas and leaves the mode alone;
    /// anything else enters `Loading` and yields a chat call.
    pub fn begin_send(&mut self, text: &str) -> SendAction {
        let Some(input) = UserInput::parse(text) else {
            return SendAction::Ignored;
        };

        self.messages.push(Message::user(input.text()));
        self.input.clear();

        match input {
            UserInput::Download(_) => {
                info!(areas = ?self.active_areas, "Download requested from chat input");
                SendAction::Download(self.download_request())
            }
            UserInput::Dialogue(text) => {
                let ticket = RequestTicket(self.next_ticket);
                self.next_ticket += 1;
                self.in_flight.insert(ticket);
                self.mode = AppMode::Loading;

                debug!(ticket = ticket.value(), areas = ?self.active_areas, "Chat request started");
                SendAction::Chat(PendingChat {
                    ticket,
                    request: ChatRequest::new(text, self.active_areas.clone()),
                })
            }
        }
    }

    /// Applies the outcome of a chat call and returns the appended bot message.
    ///
    /// A failed call appends [`FALLBACK_REPLY`] and keeps the active areas.
    pub fn settle_chat(&mut self, ticket: RequestTicket, result: Result<ChatReply>) -> &Message {
        if !self.in_flight.remove(&ticket) {
            warn!(ticket = ticket.value(), "Settling a chat request that was not outstanding");
        }

        let message = match result {
            Ok(reply) => {
                if let Some(areas) = reply.updated_areas() {
                    info!(areas = ?areas, "Active areas replaced");
                    self.active_areas = areas.to_vec();
                }
                Message::from_reply(reply)
            }
            Err(err) => {
                warn!(ticket = ticket.value(), error = %err, "Chat request failed");
                Message::bot(FALLBACK_REPLY)
            }
        };
        self.messages.push(message);

        if self.in_flight.is_empty() {
            self.mode = AppMode::Idle;
        }

        &self.messages[self.messages.len() - 1]
    }

    /// Download request for the current active areas.
    pub fn download_request(&self) -> DownloadRequest {
        DownloadRequest {
            areas: self.active_areas.clone(),
        }
    }

    /// Sends `text` and waits for the outcome.
    pub async fn send_message(
        &mut self,
        api: &dyn AnalyticsApi,
        sink: &dyn ReportSink,
        text: &str,
    ) -> SendOutcome {
        match self.begin_send(text) {
            SendAction::Ignored => SendOutcome::Ignored,
            SendAction::Download(request) => {
                SendOutcome::Downloaded(report::download_report(api, sink, request).await)
            }
            SendAction::Chat(PendingChat { ticket, request }) => {
                let result = api.chat(&request).await;
                self.settle_chat(ticket, result);
                SendOutcome::Replied
            }
        }
    }

    /// Downloads the report for the current areas without touching the log.
    pub async fn handle_download(
        &self,
        api: &dyn AnalyticsApi,
        sink: &dyn ReportSink,
    ) -> DownloadOutcome {
        report::download_report(api, sink, self.download_request()).await
    }
}

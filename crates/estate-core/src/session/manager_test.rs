use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use super::app_mode::AppMode;
use super::manager::{ConversationView, FALLBACK_REPLY, GREETING, SendAction, SendOutcome};
use super::message::Sender;
use crate::analytics::{AnalyticsApi, ChatReply, ChatRequest, DownloadRequest, ReplyContext};
use crate::error::{EstateError, Result};
use crate::report::{DOWNLOAD_ALERT, DownloadOutcome, ReportSink};
use crate::view::{Chart, Dataset, Growth};

// Mock analytics service recording every call
struct MockApi {
    chat_result: Result<ChatReply>,
    download_result: Result<Vec<u8>>,
    chat_calls: Mutex<Vec<ChatRequest>>,
    download_calls: Mutex<Vec<DownloadRequest>>,
}

impl MockApi {
    fn replying(reply: ChatReply) -> Self {
        Self {
            chat_result: Ok(reply),
            download_result: Ok(b"year,final location\n2024,Wakad\n".to_vec()),
            chat_calls: Mutex::new(Vec::new()),
            download_calls: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            chat_result: Err(EstateError::chat_failed("connection refused")),
            download_result: Err(EstateError::download_failed("HTTP 404")),
            chat_calls: Mutex::new(Vec::new()),
            download_calls: Mutex::new(Vec::new()),
        }
    }

    fn chat_calls(&self) -> Vec<ChatRequest> {
        self.chat_calls.lock().unwrap().clone()
    }

    fn download_calls(&self) -> Vec<DownloadRequest> {
        self.download_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalyticsApi for MockApi {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        self.chat_calls.lock().unwrap().push(request.clone());
        self.chat_result.clone()
    }

    async fn download(&self, request: &DownloadRequest) -> Result<Vec<u8>> {
        self.download_calls.lock().unwrap().push(request.clone());
        self.download_result.clone()
    }
}

#[derive(Default)]
struct MockSink {
    saved: Mutex<Vec<(String, usize)>>,
    fail: bool,
}

impl ReportSink for MockSink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        if self.fail {
            return Err(EstateError::io("disk full"));
        }
        self.saved
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes.len()));
        Ok(PathBuf::from("/reports").join(filename))
    }
}

fn reply_with_areas(summary: &str, areas: &[&str]) -> ChatReply {
    ChatReply {
        summary: summary.to_string(),
        context: Some(ReplyContext {
            areas: Some(areas.iter().map(|a| a.to_string()).collect()),
        }),
        ..Default::default()
    }
}

#[test]
fn test_new_view_is_idle_with_greeting() {
    let view = ConversationView::new();

    assert_eq!(view.mode(), AppMode::Idle);
    assert_eq!(view.messages().len(), 1);
    assert_eq!(view.messages()[0].sender, Sender::Bot);
    assert_eq!(view.messages()[0].text, GREETING);
    assert!(view.active_areas().is_empty());
}

#[test]
fn test_chat_send_transitions_idle_loading_idle() {
    let mut view = ConversationView::new();
    view.set_input("Compare Wakad and Aundh");

    let SendAction::Chat(pending) = view.submit() else {
        panic!("expected a chat action");
    };

    assert_eq!(view.mode(), AppMode::Loading);
    assert_eq!(view.messages().len(), 2);
    assert_eq!(view.last_message().unwrap().sender, Sender::User);
    assert_eq!(view.input(), "");
    assert_eq!(pending.request.message, "Compare Wakad and Aundh");

    let reply = ChatReply {
        summary: "Wakad is cheaper".to_string(),
        chart: Some(Chart::new(vec!["2023".to_string()], vec![Dataset::new("Wakad", [6100.0])])),
        growth: Some(Growth {
            trend: "increasing".to_string(),
            initial: 10.0,
            final_value: 15.0,
            percent_change: 50.0,
        }),
        ..Default::default()
    };
    let message = view.settle_chat(pending.ticket, Ok(reply)).clone();

    assert_eq!(view.mode(), AppMode::Idle);
    assert_eq!(view.messages().len(), 3);
    assert_eq!(message.sender, Sender::Bot);
    assert_eq!(message.text, "Wakad is cheaper");
    assert!(message.chart.is_some());
    assert!(message.growth.is_some());
    assert!(message.table.is_none());
}

#[test]
fn test_blank_input_is_a_strict_noop() {
    let mut view = ConversationView::new();
    view.set_input("   ");

    assert_eq!(view.submit(), SendAction::Ignored);
    assert_eq!(view.begin_send("\t\n"), SendAction::Ignored);
    assert_eq!(view.messages().len(), 1);
    assert_eq!(view.mode(), AppMode::Idle);
    assert_eq!(view.pending_requests(), 0);
}

#[test]
fn test_download_text_never_enters_loading() {
    let mut view = ConversationView::new();

    let action = view.begin_send("could you DOWNLOAD this for me");

    assert_eq!(action, SendAction::Download(DownloadRequest { areas: vec![] }));
    assert_eq!(view.mode(), AppMode::Idle);
    assert_eq!(view.messages().len(), 2);
    assert_eq!(view.last_message().unwrap().text, "could you DOWNLOAD this for me");
    assert_eq!(view.pending_requests(), 0);
}

#[tokio::test]
async fn test_send_message_download_issues_no_chat_call() {
    let api = MockApi::replying(ChatReply::default());
    let sink = MockSink::default();
    let mut view = ConversationView::new();

    let outcome = view.send_message(&api, &sink, "Download data").await;

    assert!(matches!(outcome, SendOutcome::Downloaded(DownloadOutcome::Saved { .. })));
    assert!(api.chat_calls().is_empty());
    assert_eq!(api.download_calls().len(), 1);
    assert_eq!(view.messages().len(), 2);
    assert_eq!(view.mode(), AppMode::Idle);
    assert_eq!(
        sink.saved.lock().unwrap().as_slice(),
        &[("Real_Estate_Full_Report.csv".to_string(), 31)]
    );
}

#[tokio::test]
async fn test_reply_context_is_used_by_next_download() {
    let api = MockApi::replying(reply_with_areas("Comparing", &["Wakad", "Aundh"]));
    let sink = MockSink::default();
    let mut view = ConversationView::new();

    let outcome = view.send_message(&api, &sink, "Compare Wakad and Aundh").await;
    assert_eq!(outcome, SendOutcome::Replied);
    assert_eq!(view.active_areas(), ["Wakad".to_string(), "Aundh".to_string()]);

    let outcome = view.handle_download(&api, &sink).await;

    assert_eq!(
        outcome,
        DownloadOutcome::Saved {
            path: PathBuf::from("/reports/Report_Wakad_Aundh.csv"),
            bytes: 31,
        }
    );
    assert_eq!(api.download_calls()[0].areas, vec!["Wakad", "Aundh"]);
}

#[tokio::test]
async fn test_active_areas_sent_with_next_chat() {
    let api = MockApi::replying(reply_with_areas("Baner looks good", &["Baner"]));
    let sink = MockSink::default();
    let mut view = ConversationView::new();

    view.send_message(&api, &sink, "How is Baner?").await;
    view.send_message(&api, &sink, "and the price trend?").await;

    let calls = api.chat_calls();
    assert_eq!(calls[0].context.as_ref().unwrap().areas, Vec::<String>::new());
    assert_eq!(calls[1].context.as_ref().unwrap().areas, vec!["Baner"]);
}

#[tokio::test]
async fn test_failed_chat_appends_fallback_and_keeps_areas() {
    let sink = MockSink::default();
    let mut view = ConversationView::new();
    let ok_api = MockApi::replying(reply_with_areas("Wakad", &["Wakad"]));
    view.send_message(&ok_api, &sink, "Tell me about Wakad").await;

    let failing = MockApi::failing();
    let before = view.messages().len();
    let outcome = view.send_message(&failing, &sink, "and demand?").await;

    assert_eq!(outcome, SendOutcome::Replied);
    assert_eq!(view.messages().len(), before + 2);
    assert_eq!(view.last_message().unwrap().text, FALLBACK_REPLY);
    assert_eq!(view.last_message().unwrap().sender, Sender::Bot);
    assert_eq!(view.active_areas(), ["Wakad".to_string()]);
    assert_eq!(view.mode(), AppMode::Idle);
}

#[tokio::test]
async fn test_reply_without_context_keeps_areas() {
    let sink = MockSink::default();
    let mut view = ConversationView::new();
    view.send_message(&MockApi::replying(reply_with_areas("ok", &["Aundh"])), &sink, "Aundh")
        .await;

    let bare = ChatReply {
        summary: "I couldn't identify which locations you want to analyze.".to_string(),
        context: Some(ReplyContext { areas: None }),
        ..Default::default()
    };
    view.send_message(&MockApi::replying(bare), &sink, "hmm").await;

    assert_eq!(view.active_areas(), ["Aundh".to_string()]);
}

#[tokio::test]
async fn test_failed_download_alerts_without_messages() {
    let api = MockApi::failing();
    let sink = MockSink::default();
    let view = ConversationView::new();

    let outcome = view.handle_download(&api, &sink).await;

    assert_eq!(
        outcome,
        DownloadOutcome::Failed {
            alert: DOWNLOAD_ALERT.to_string()
        }
    );
    assert_eq!(view.messages().len(), 1);
    assert!(sink.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_save_is_reported_as_download_failure() {
    let api = MockApi::replying(ChatReply::default());
    let sink = MockSink {
        fail: true,
        ..Default::default()
    };
    let view = ConversationView::new();

    let outcome = view.handle_download(&api, &sink).await;

    assert!(!outcome.is_saved());
}

#[test]
fn test_overlapping_chats_last_settled_wins() {
    let mut view = ConversationView::new();

    let SendAction::Chat(first) = view.begin_send("Wakad?") else {
        panic!("expected chat");
    };
    let SendAction::Chat(second) = view.begin_send("Aundh?") else {
        panic!("expected chat");
    };
    assert!(first.ticket < second.ticket);
    assert_eq!(view.pending_requests(), 2);

    view.settle_chat(second.ticket, Ok(reply_with_areas("Aundh", &["Aundh"])));
    assert_eq!(view.mode(), AppMode::Loading);

    view.settle_chat(first.ticket, Ok(reply_with_areas("Wakad", &["Wakad"])));
    assert_eq!(view.mode(), AppMode::Idle);

    let texts: Vec<&str> = view.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts[1..], ["Wakad?", "Aundh?", "Aundh", "Wakad"]);
    assert_eq!(view.active_areas(), ["Wakad".to_string()]);
}

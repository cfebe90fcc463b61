use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::{Mutex, mpsc};

use estate_core::analytics::{AnalyticsApi, ChatReply};
use estate_core::quick_action::QuickActionConfig;
use estate_core::report::{self, DownloadOutcome, ReportSink};
use estate_core::session::{ConversationView, PendingChat, RequestTicket, SendAction};
use estate_interaction::{AnalyticsClient, ConfigOverrides, DirectoryReportSink, load_client_config};

mod logging;
mod render;

const COMMANDS: [&str; 7] = [
    "/help",
    "/context",
    "/download",
    "/suggestions",
    "/ask",
    "/history",
    "/quit",
];

#[derive(Parser)]
#[command(name = "estate")]
#[command(about = "Estate - chat with the real-estate analytics service", long_about = None)]
struct Cli {
    /// Base URL of the analytics service (overrides ESTATE_API_BASE_URL and config.toml)
    #[arg(long)]
    base_url: Option<String>,

    /// Directory where downloaded reports are written
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Per-request timeout in seconds; unset waits as long as the transport does
    #[arg(long)]
    timeout: Option<u64>,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Results of background calls, delivered to the response handler.
enum ReplEvent {
    ChatSettled {
        ticket: RequestTicket,
        result: estate_core::error::Result<ChatReply>,
    },
    DownloadFinished(DownloadOutcome),
}

/// Shared handles needed to run a send in the background.
#[derive(Clone)]
struct Backend {
    api: Arc<dyn AnalyticsApi>,
    sink: Arc<dyn ReportSink>,
    events: mpsc::Sender<ReplEvent>,
}

impl Backend {
    /// Spawns the network call an action asks for.
    fn dispatch(&self, action: SendAction) {
        match action {
            SendAction::Ignored => {}
            SendAction::Chat(PendingChat { ticket, request }) => {
                println!("{}", "Analyzing market data...".italic().bright_black());
                let api = Arc::clone(&self.api);
                let tx = self.events.clone();
                tokio::spawn(async move {
                    let result = api.chat(&request).await;
                    let _ = tx.send(ReplEvent::ChatSettled { ticket, result }).await;
                });
            }
            SendAction::Download(request) => {
                println!("{}", "Preparing report...".italic().bright_black());
                let api = Arc::clone(&self.api);
                let sink = Arc::clone(&self.sink);
                let tx = self.events.clone();
                tokio::spawn(async move {
                    let outcome = report::download_report(api.as_ref(), sink.as_ref(), request).await;
                    let _ = tx.send(ReplEvent::DownloadFinished(outcome)).await;
                });
            }
        }
    }
}

/// The main entry point for the estate REPL.
///
/// Chat and download calls run as background tasks; their results come back
/// over a channel to a single response handler, which is the only place chat
/// replies are settled into the conversation.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{}", format!("Logging disabled: {e}").yellow());
            None
        }
    };

    // ===== Backend Initialization =====
    let overrides = ConfigOverrides {
        api_base_url: cli.base_url,
        download_dir: cli.download_dir,
        request_timeout_secs: cli.timeout,
    };
    let config = load_client_config(&overrides)?;
    tracing::info!(base_url = %config.api_base_url, "Starting estate REPL");

    let (event_tx, mut event_rx) = mpsc::channel::<ReplEvent>(32);
    let backend = Backend {
        api: Arc::new(AnalyticsClient::from_config(&config)?),
        sink: Arc::new(DirectoryReportSink::new(config.download_dir())),
        events: event_tx,
    };
    let view = Arc::new(Mutex::new(ConversationView::new()));
    let quick_actions = QuickActionConfig::default();

    // Spawn response handler task
    let handler_view = Arc::clone(&view);
    let response_handler = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                ReplEvent::ChatSettled { ticket, result } => {
                    let mut view = handler_view.lock().await;
                    let message = view.settle_chat(ticket, result);
                    render::print_message(message);
                }
                ReplEvent::DownloadFinished(outcome) => render::print_download(&outcome),
            }
        }
    });

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Real Estate Assistant ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Connected to {}. Type '/help' for commands or 'quit' to exit.", config.api_base_url)
            .bright_black()
    );
    println!();
    for message in view.lock().await.messages() {
        render::print_message(message);
    }
    print_suggestions(&quick_actions);

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                // Handle quit command
                if trimmed == "quit" || trimmed == "exit" || trimmed == "/quit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                // Skip empty lines
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if trimmed.starts_with('/') {
                    handle_command(trimmed, &view, &backend, &quick_actions).await;
                    continue;
                }

                let action = {
                    let mut view = view.lock().await;
                    if view.is_loading() {
                        println!("{}", "Still analyzing, please wait for the reply.".yellow());
                        continue;
                    }
                    view.set_input(trimmed);
                    let action = view.submit();
                    if let Some(message) = view.last_message().filter(|_| action != SendAction::Ignored) {
                        render::print_message(message);
                    }
                    action
                };
                backend.dispatch(action);
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // Pending replies are not waited for; there is no cancellation to wait on.
    let pending = view.lock().await.pending_requests();
    drop(backend);
    if pending == 0 {
        let _ = response_handler.await;
    } else {
        tracing::info!(pending, "Exiting with chat requests still outstanding");
        response_handler.abort();
    }

    Ok(())
}

async fn handle_command(
    input: &str,
    view: &Arc<Mutex<ConversationView>>,
    backend: &Backend,
    quick_actions: &QuickActionConfig,
) {
    let mut parts = input.splitn(2, ' ');
    let command = parts.next().unwrap_or_default();
    let argument = parts.next().map(str::trim).unwrap_or_default();

    match command {
        "/help" => print_help(),
        "/context" => {
            let view = view.lock().await;
            if view.active_areas().is_empty() {
                println!("{}", "Context: none (downloads cover the full dataset)".bright_black());
            } else {
                println!(
                    "{} {}",
                    "Context:".bright_black(),
                    view.active_areas().join(", ").bold()
                );
            }
        }
        "/download" => {
            let request = view.lock().await.download_request();
            backend.dispatch(SendAction::Download(request));
        }
        "/suggestions" => print_suggestions(quick_actions),
        "/ask" => {
            let Some(action) = argument.parse::<usize>().ok().and_then(|n| quick_actions.get(n)) else {
                println!("{}", "Usage: /ask <number> (see /suggestions)".yellow());
                return;
            };
            // Shortcuts stay available while a reply is pending.
            let action = {
                let mut view = view.lock().await;
                let sent = view.begin_send(&action.prompt);
                if let Some(message) = view.last_message() {
                    render::print_message(message);
                }
                sent
            };
            backend.dispatch(action);
        }
        "/history" => {
            for message in view.lock().await.messages() {
                render::print_message(message);
            }
        }
        _ => println!("{}", "Unknown command".bright_black()),
    }
}

fn print_help() {
    println!("{}", "Ask about locations in plain language, e.g. 'Compare Wakad and Aundh'.".bright_black());
    println!("{}", "Any message mentioning 'download' saves a CSV report instead.".bright_black());
    println!();
    for (command, description) in [
        ("/context", "show the locations the conversation is scoped to"),
        ("/download", "save a CSV report for the current context"),
        ("/suggestions", "list quick prompts"),
        ("/ask <n>", "send quick prompt number n"),
        ("/history", "show the whole conversation again"),
        ("/quit", "exit"),
    ] {
        println!("  {:<14} {}", command.bright_cyan(), description);
    }
}

fn print_suggestions(quick_actions: &QuickActionConfig) {
    let chips: Vec<String> = quick_actions
        .chips()
        .iter()
        .map(|a| format!("[{}] {}", a.slot, a.prompt))
        .collect();
    println!("{} {}", "Try:".bright_black(), chips.join("  ").cyan());
    for action in quick_actions.downloads() {
        println!(
            "{} {}",
            "    ".bright_black(),
            format!("[{}] {}", action.slot, action.prompt).bright_yellow()
        );
    }
    println!();
}

//! Terminal view
//!
//! Line-oriented front end over a [`SessionHandle`]. It owns the citation
//! disclosure state and re-renders from the conversation log; it holds no
//! conversation state of its own.

use crate::conversation::{Sender, Turn};
use crate::disclosure::DisclosureState;
use crate::runtime::{SessionEvent, SessionHandle, SubmitOutcome};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::{Display, Write as _};
use std::io;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

const BOT_NAME: &str = "Buho";

const HELP: &str = "\
Type a question and press Enter.
  /sources N   show or hide the sources of message N
  /history     print the whole conversation again
  /help        show this help
  /quit        leave";

/// One line of user input, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Message(String),
    /// Zero-based turn index
    ToggleSources(usize),
    History,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return Input::Message(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("sources" | "fuentes"), Some(n), None) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Input::ToggleSources(n - 1),
            _ => Input::Unknown(trimmed.to_string()),
        },
        (Some("history"), None, None) => Input::History,
        (Some("help"), None, None) => Input::Help,
        (Some("quit" | "exit"), None, None) => Input::Quit,
        _ => Input::Unknown(trimmed.to_string()),
    }
}

/// 12-hour clock, e.g. `9:05 PM`
pub fn format_timestamp<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format("%-I:%M %p").to_string()
}

/// Render one turn, including its citations when disclosed
pub fn render_turn(index: usize, turn: &Turn, disclosure: &DisclosureState) -> String {
    let number = index + 1;
    let time = format_timestamp(&turn.timestamp().with_timezone(&Local));
    let who = match (turn.sender(), turn.is_error()) {
        (Sender::User, _) => "You".to_string(),
        (Sender::Bot, false) => BOT_NAME.to_string(),
        (Sender::Bot, true) => format!("{BOT_NAME} (error)"),
    };

    let mut out = format!("[#{number} {time}] {who}: {}", turn.text());
    if turn.has_citations() {
        let count = turn.citations().len();
        if disclosure.is_open(index) {
            out.push_str("\n    Sources:");
            for citation in turn.citations() {
                let _ = write!(out, "\n    - {citation}");
            }
        } else {
            let noun = if count == 1 { "source" } else { "sources" };
            let _ = write!(out, "\n    ({count} {noun}, /sources {number})");
        }
    }
    out
}

/// Interactive view state
pub struct TerminalView {
    handle: SessionHandle,
    disclosure: DisclosureState,
}

impl TerminalView {
    pub fn new(handle: SessionHandle) -> Self {
        Self {
            handle,
            disclosure: DisclosureState::new(),
        }
    }

    pub async fn run(mut self) -> io::Result<()> {
        println!("{BOT_NAME} is ready. /help for commands.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut events = self.handle.subscribe();

        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if !self.handle_input(parse_input(&line)).await {
                            break;
                        }
                    }
                    None => break,
                },
                event = events.recv() => match event {
                    Ok(event) => self.show_event(event),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "View fell behind, re-rendering");
                        self.show_history().await;
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
        Ok(())
    }

    fn show_event(&self, event: SessionEvent) {
        match event {
            SessionEvent::TurnAppended { index, turn } => {
                println!("{}", render_turn(index, &turn, &self.disclosure));
            }
            SessionEvent::PendingChanged { pending: true } => {
                println!("{BOT_NAME} is typing…");
            }
            SessionEvent::PendingChanged { pending: false } => {}
        }
    }

    /// Returns false when the user asked to leave
    async fn handle_input(&mut self, input: Input) -> bool {
        match input {
            Input::Message(text) => {
                // Input is disabled while an answer is on its way
                if self.handle.is_pending() {
                    println!("Still waiting for the previous answer…");
                    return true;
                }
                match self.handle.submit(text).await {
                    SubmitOutcome::Accepted | SubmitOutcome::Skipped => {}
                    SubmitOutcome::Rejected => println!("Still waiting for the previous answer…"),
                }
            }
            Input::ToggleSources(index) => {
                let log = self.handle.snapshot().await;
                match log.get(index) {
                    Some(turn) if turn.has_citations() => {
                        self.disclosure.toggle(index);
                        println!("{}", render_turn(index, turn, &self.disclosure));
                    }
                    _ => println!("Message #{} has no sources.", index + 1),
                }
            }
            Input::History => self.show_history().await,
            Input::Help => println!("{HELP}"),
            Input::Quit => return false,
            Input::Unknown(command) => println!("Unknown command {command}. /help for commands."),
        }
        true
    }

    async fn show_history(&self) {
        let log = self.handle.snapshot().await;
        if log.is_empty() {
            println!("No messages yet.");
        }
        for (index, turn) in log.iter().enumerate() {
            println!("{}", render_turn(index, turn, &self.disclosure));
        }
    }
}

/// Ask a single question, print the answer with its sources, and return
pub async fn ask_once(handle: &SessionHandle, question: &str) -> io::Result<()> {
    if handle.submit(question).await != SubmitOutcome::Accepted {
        return Ok(());
    }
    handle.wait_until_idle().await;

    let log = handle.snapshot().await;
    if let Some(index) = log.len().checked_sub(1) {
        let mut disclosure = DisclosureState::new();
        disclosure.toggle(index);
        if let Some(turn) = log.get(index) {
            println!("{}", render_turn(index, turn, &disclosure));
        }
    }
    Ok(())
}

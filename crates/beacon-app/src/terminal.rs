//! Terminal chat surface.
//!
//! Reads lines from stdin, feeds them to a [`ChatSession`], and prints the
//! transcript as it grows. `**bold**` markup becomes ANSI bold when stdout
//! is a terminal and is stripped otherwise.

use std::io::{self, IsTerminal, Write};

use beacon_chat::markup::{segments, to_plain, Segment};
use beacon_chat::{ChatError, ChatSession};
use beacon_core::{Role, Turn};
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};

const EXIT_COMMANDS: &[&str] = &["/quit", "/exit"];

/// Render reply text with emphasis as ANSI bold.
pub fn render_styled(text: &str) -> String {
    text.lines()
        .map(|line| {
            segments(line)
                .into_iter()
                .map(|seg| match seg {
                    Segment::Plain(t) => t.to_string(),
                    Segment::Emphasis(t) => t.bold().to_string(),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_turn(turn: &Turn, styled: bool) -> String {
    let body = if styled {
        render_styled(&turn.text)
    } else {
        to_plain(&turn.text)
    };
    match (turn.role, styled) {
        (Role::Assistant, true) => format!("{} {}", "beacon>".bright_cyan(), body),
        (Role::Assistant, false) => format!("beacon> {}", body),
        (Role::User, true) => format!("{} {}", "you>".bright_yellow(), body),
        (Role::User, false) => format!("you> {}", body),
    }
}

/// Run an interactive session until EOF or `/quit`.
pub async fn run(session: ChatSession) -> Result<(), Box<dyn std::error::Error>> {
    let styled = io::stdout().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    for turn in session.turns() {
        println!("{}\n", render_turn(&turn, styled));
    }

    loop {
        if styled {
            print!("{} ", "you>".bright_yellow());
        } else {
            print!("you> ");
        }
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if EXIT_COMMANDS.contains(&line.trim()) {
            break;
        }

        let handle = match session.submit(&line) {
            Ok(handle) => handle,
            Err(e) if e.is_ignorable() => continue,
            Err(ChatError::SessionClosed) => break,
            Err(e) => return Err(e.into()),
        };

        if session.is_composing() && styled {
            print!("{}", "beacon is typing...".dimmed());
            io::stdout().flush()?;
        }
        handle.await?;
        if styled {
            // Clear the typing indicator.
            print!("\r\x1b[2K");
        }

        if let Some(reply) = session.turns().last() {
            println!("{}\n", render_turn(reply, styled));
        }
    }

    session.close();
    tracing::debug!(turns = session.turn_count(), "Terminal chat ended");
    Ok(())
}

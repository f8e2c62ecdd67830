use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use challengly_core::{Assistant, SystemClock};

use super::{open_lifecycle, print_json, resolve_index, CliResult};

#[derive(Subcommand)]
pub enum ChatAction {
    /// Send a message to the assistant
    Send {
        /// Message text
        message: String,
        /// Conversation to use (defaults to today's challenge)
        #[arg(long)]
        index: Option<usize>,
    },
    /// Show the conversation
    History {
        #[arg(long)]
        index: Option<usize>,
    },
    /// Show the current quick-reply suggestions
    Suggestions {
        #[arg(long)]
        index: Option<usize>,
    },
    /// Forget the conversation
    Clear {
        #[arg(long)]
        index: Option<usize>,
    },
}

pub fn run(action: ChatAction) -> CliResult {
    let (lifecycle, config) = open_lifecycle()?;
    let clock = SystemClock;

    match action {
        ChatAction::Send { message, index } => {
            let index = resolve_index(&lifecycle, index, &clock)?;
            let mut assistant = Assistant::new(lifecycle.into_store(), index);
            if config.assistant.typing_delay_ms > 0 {
                eprintln!("assistant is typing...");
                std::thread::sleep(Duration::from_millis(config.assistant.typing_delay_ms));
            }
            let reply = assistant.send(&message, Utc::now())?;
            print_json(&reply)?;
        }
        ChatAction::History { index } => {
            let index = resolve_index(&lifecycle, index, &clock)?;
            let assistant = Assistant::new(lifecycle.into_store(), index);
            print_json(&assistant.transcript(Utc::now())?)?;
        }
        ChatAction::Suggestions { index } => {
            let index = resolve_index(&lifecycle, index, &clock)?;
            let assistant = Assistant::new(lifecycle.into_store(), index);
            let set = assistant.suggestions(Utc::now())?;
            print_json(&set.suggestions())?;
        }
        ChatAction::Clear { index } => {
            let index = resolve_index(&lifecycle, index, &clock)?;
            let mut assistant = Assistant::new(lifecycle.into_store(), index);
            assistant.clear()?;
            eprintln!("conversation {index} cleared");
        }
    }
    Ok(())
}

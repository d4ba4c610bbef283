//! Line-based chat loop.

#![expect(clippy::print_stdout, reason = "the chat is conducted on stdout")]

use cairn_agent::{Action, ActionObservation, Agent, format_action_args};
use cairn_models::llm::UsageCounter;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const LONG_TEXT_LIMIT: usize = 100;

const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Shortens `text` to at most `limit` characters and puts it on one line.
#[must_use]
pub fn truncate(text: &str, limit: usize) -> String {
    let short = if text.chars().count() > limit {
        let head: String = text.chars().take(limit.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        text.to_string()
    };
    short.replace('\n', " ")
}

/// Renders one action as `tool://name?arg=value&...`.
#[must_use]
pub fn action_url(action: &Action) -> String {
    format!("tool://{}?{}", action.name, format_action_args(&action.args))
}

/// Renders a finished step: the reasoning, then each action and what it observed.
#[must_use]
pub fn format_step(reasoning: &str, observations: &[ActionObservation]) -> String {
    let mut out = format!("\t{YELLOW}{}{RESET}\n", truncate(reasoning, LONG_TEXT_LIMIT));
    for ao in observations {
        out.push_str(&format!("\t$ {BLUE}{}{RESET}\n", action_url(&ao.action)));
        out.push_str(&format!(
            "\t> {MAGENTA}{}{RESET}\n",
            truncate(&ao.observation.observed, LONG_TEXT_LIMIT)
        ));
    }
    out
}

/// Returns whether `line` ends the session.
#[must_use]
pub fn is_exit(line: &str) -> bool {
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

/// Installs hooks that print progress and stream the final answer to stdout.
pub fn attach_printing_hooks(agent: &mut Agent) {
    agent.set_on_step_complete(Arc::new(|reasoning: &str, observations: &[ActionObservation]| {
        print!("{}", format_step(reasoning, observations));
    }));
    agent.set_on_final_answer_begin(Arc::new(|| {
        print!("{GREEN}Agent:{RESET} ");
        std::io::stdout().flush().ok();
    }));
    agent.set_on_final_answer_chunk(Arc::new(|chunk: &str| {
        print!("{chunk}");
        std::io::stdout().flush().ok();
    }));
}

/// Runs the chat loop until `exit`, `quit` or end of input.
///
/// A failed answer is reported and the loop continues; the failed query is
/// not added to the conversation.
///
/// # Errors
///
/// Returns an error only if reading `input` fails.
pub async fn run<R>(agent: &mut Agent, usage: &UsageCounter, input: R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    println!("Chat started. Type 'exit' or 'quit' to end.");
    println!();

    let mut lines = input.lines();
    loop {
        print!("{CYAN}You:{RESET} ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_exit(line) {
            println!("Goodbye!");
            break;
        }

        match agent.answer(line).await {
            Ok(_) => println!("\n"),
            Err(err) => {
                tracing::error!(error = %err, "answer failed");
                println!("\nerror: {err}\n");
            }
        }

        let totals = usage.snapshot();
        println!(
            "{DIM}[{} model calls, {} input tokens, {} output tokens]{RESET}\n",
            usage.calls(),
            totals.input_tokens.unwrap_or(0),
            totals.output_tokens.unwrap_or(0),
        );
    }
    Ok(())
}

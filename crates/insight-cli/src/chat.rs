//! Interactive chat loop

use insight_market::prompts::QUICK_QUESTIONS;
use insight_market::{MarketDesk, MarketError};
use std::io::{self, BufRead, Write};

use crate::render;

const HELP: &str = "Commands:
  /quotes      - Refresh and show the watchlist
  /summary     - Market summary
  /quick [N]   - List quick questions, or ask question N
  /help        - Show this help
  /exit        - Exit

Anything else is sent as a question.";

#[derive(Debug, PartialEq, Eq)]
enum ChatInput {
    Question(String),
    Quotes,
    Summary,
    Quick(Option<usize>),
    Help,
    Exit,
    Unknown(String),
}

fn parse_input(line: &str) -> Option<ChatInput> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(command) = line.strip_prefix('/') else {
        return Some(ChatInput::Question(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let input = match parts.next().unwrap_or_default() {
        "quotes" => ChatInput::Quotes,
        "summary" => ChatInput::Summary,
        "quick" => ChatInput::Quick(parts.next().and_then(|n| n.parse().ok())),
        "help" => ChatInput::Help,
        "exit" | "quit" => ChatInput::Exit,
        other => ChatInput::Unknown(other.to_string()),
    };
    Some(input)
}

fn quick_question(number: usize) -> Option<&'static str> {
    number
        .checked_sub(1)
        .and_then(|index| QUICK_QUESTIONS.get(index))
        .copied()
}

async fn answer(desk: &MarketDesk, question: &str) {
    match desk.ask(question).await {
        Ok(response) => println!("{response}\n"),
        Err(MarketError::EmptyQuestion) => eprintln!("Message cannot be empty\n"),
        Err(e) => eprintln!("Error: {e}\n"),
    }
}

/// Run the REPL until `/exit` or end of input
pub async fn run(desk: &MarketDesk) -> io::Result<()> {
    println!("Market Insight chat. Type /help for commands.\n");

    println!("Loading quotes...");
    let batch = desk.refresh_quotes().await;
    println!("{}\n", render::quotes_table(&batch));

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!("\nGoodbye!");
            break;
        }

        let Some(input) = parse_input(&line) else {
            continue;
        };

        match input {
            ChatInput::Question(question) => answer(desk, &question).await,
            ChatInput::Quotes => {
                let batch = desk.refresh_quotes().await;
                println!("{}\n", render::quotes_table(&batch));
            }
            ChatInput::Summary => println!("{}\n", desk.market_summary().await),
            ChatInput::Quick(None) => {
                for (i, question) in QUICK_QUESTIONS.iter().enumerate() {
                    println!("  {}. {question}", i + 1);
                }
                println!();
            }
            ChatInput::Quick(Some(number)) => match quick_question(number) {
                Some(question) => {
                    println!("> {question}");
                    answer(desk, question).await;
                }
                None => eprintln!("No quick question {number}\n"),
            },
            ChatInput::Help => println!("{HELP}\n"),
            ChatInput::Exit => {
                println!("Goodbye!");
                break;
            }
            ChatInput::Unknown(command) => eprintln!("Unknown command /{command}. Type /help.\n"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_question() {
        assert_eq!(
            parse_input("  How is AAPL doing?\n"),
            Some(ChatInput::Question("How is AAPL doing?".to_string()))
        );
    }

    #[test]
    fn test_blank_line_ignored() {
        assert_eq!(parse_input("   \n"), None);
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_input("/quotes"), Some(ChatInput::Quotes));
        assert_eq!(parse_input("/summary"), Some(ChatInput::Summary));
        assert_eq!(parse_input("/quick"), Some(ChatInput::Quick(None)));
        assert_eq!(parse_input("/quick 2"), Some(ChatInput::Quick(Some(2))));
        assert_eq!(parse_input("/quit"), Some(ChatInput::Exit));
        assert_eq!(parse_input("/"), Some(ChatInput::Unknown(String::new())));
        assert_eq!(parse_input("/buy"), Some(ChatInput::Unknown("buy".to_string())));
    }

    #[test]
    fn test_quick_question_numbering() {
        assert_eq!(quick_question(1), Some("What's your market outlook?"));
        assert_eq!(quick_question(3), Some("What are the current market risks?"));
        assert_eq!(quick_question(0), None);
        assert_eq!(quick_question(4), None);
    }
}

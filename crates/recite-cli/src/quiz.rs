//! Terminal recall exchange: show the meaning and a blanked example,
//! collect a typed answer one keystroke at a time.
//!
//! Shortcuts: `h` reveals the answer (counts as a fail), `s` replays
//! the speech cue. Three wrong attempts also reveal and fail.

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use recite_core::{Example, Item, MASTERY_THRESHOLD, RecallExchange};

use crate::speech::Speech;

const MAX_ATTEMPTS: u32 = 3;

// ---------------------------------------------------------------------------
// Pure helpers (no I/O, fully unit-testable)
// ---------------------------------------------------------------------------

/// Replace the first case-insensitive occurrence of `term` in
/// `sentence` with `____(len)` blanks. A sentence without the term is
/// returned unchanged.
pub fn blank_term(sentence: &str, term: &str) -> String {
    let term_chars: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    if term_chars.is_empty() {
        return sentence.to_string();
    }

    let chars: Vec<char> = sentence.chars().collect();
    let lower: Vec<char> = chars.iter().flat_map(|c| c.to_lowercase()).collect();

    // Lowercasing is length-preserving for the inputs we care about;
    // bail out of blanking rather than guess when it is not.
    if lower.len() != chars.len() || term_chars.len() > chars.len() {
        return sentence.to_string();
    }

    for start in 0..=(chars.len() - term_chars.len()) {
        if lower[start..start + term_chars.len()] == term_chars[..] {
            let blank = format!("{}({})", "_".repeat(term_chars.len()), term_chars.len());
            let mut out: String = chars[..start].iter().collect();
            out.push_str(&blank);
            out.extend(&chars[start + term_chars.len()..]);
            return out;
        }
    }
    sentence.to_string()
}

/// Whether a typed answer matches the term, ignoring case and
/// surrounding whitespace.
pub fn answer_matches(answer: &str, term: &str) -> bool {
    answer.trim().eq_ignore_ascii_case(term.trim())
}

// ---------------------------------------------------------------------------
// Keystroke input
// ---------------------------------------------------------------------------

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Option<Self> {
        terminal::enable_raw_mode().ok().map(|_| RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Read one answer, echoing keystrokes and handling backspace. Falls
/// back to plain line input when the terminal has no raw mode (pipes,
/// tests). Ctrl-C aborts the attempt, which resolves like `h`.
fn read_answer() -> io::Result<String> {
    let Some(_guard) = RawModeGuard::enable() else {
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        return Ok(line.trim().to_string());
    };

    let mut answer = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => break,
            KeyCode::Backspace => {
                if answer.pop().is_some() {
                    print!("\x08 \x08");
                    io::stdout().flush()?;
                }
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                answer = "h".to_string();
                break;
            }
            KeyCode::Char(c) => {
                answer.push(c);
                print!("{c}");
                io::stdout().flush()?;
            }
            _ => {}
        }
    }
    println!();
    Ok(answer.trim().to_string())
}

// ---------------------------------------------------------------------------
// The exchange
// ---------------------------------------------------------------------------

pub struct TerminalQuiz {
    speech: Speech,
    remaining: usize,
}

impl TerminalQuiz {
    pub fn new(total: usize, speech: Speech) -> Self {
        Self {
            speech,
            remaining: total,
        }
    }
}

impl RecallExchange for TerminalQuiz {
    fn present_and_collect(&mut self, item: &Item, example: &Example) -> bool {
        println!("\n{}", "━".repeat(30));
        if self.remaining > 0 {
            println!("⏳ {} word(s) left in this pass", self.remaining);
            self.remaining -= 1;
        }
        println!("🔔 progress: {}/{}", item.success_count, MASTERY_THRESHOLD);
        println!("📖 meaning: {}", item.translation);
        println!("📝 example: {}", blank_term(&example.sentence, &item.term));
        if !example.translation.is_empty() {
            println!("🌏 example translation: {}", example.translation);
        }

        let mut attempts = 0;
        while attempts < MAX_ATTEMPTS {
            print!("type the word (h=reveal, s=speech): ");
            let _ = io::stdout().flush();
            let answer = match read_answer() {
                Ok(a) => a.to_lowercase(),
                Err(e) => {
                    tracing::warn!("input error, counting as reveal: {e}");
                    "h".to_string()
                }
            };

            match answer.as_str() {
                "h" => {
                    println!("📢 answer: {}", item.term);
                    return false;
                }
                "s" => {
                    self.speech.speak(&example.sentence);
                    continue;
                }
                _ if answer_matches(&answer, &item.term) => {
                    println!("✅ correct!");
                    self.speech.speak(&example.sentence);
                    return true;
                }
                _ => {
                    attempts += 1;
                    println!("❌ wrong ({} attempt(s) left)", MAX_ATTEMPTS - attempts);
                }
            }
        }

        println!("📢 answer: {}", item.term);
        false
    }
}

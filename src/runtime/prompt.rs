use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::catalog::{ChangeSummary, Confirm, Decision};
use crate::error::{CatalogError, Result};

use super::modes::{ArtistChoice, ArtistGate};

/// Single-key prompts on the controlling terminal.
///
/// `Esc` and `Ctrl-C` answer "no".
pub struct ConsolePrompt;

/// Block until one of `keys` (case-insensitive) is pressed; `None` on cancel.
fn wait_for_key(keys: &[char]) -> io::Result<Option<char>> {
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Esc => return Ok(None),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None);
            }
            KeyCode::Char(c) => {
                let c = c.to_ascii_lowercase();
                if keys.contains(&c) {
                    return Ok(Some(c));
                }
            }
            _ => {}
        }
    }
}

fn ask(question: &str, keys: &[char]) -> Result<Option<char>> {
    let mut stdout = io::stdout();
    write!(stdout, "{question} ").map_err(CatalogError::Prompt)?;
    stdout.flush().map_err(CatalogError::Prompt)?;

    enable_raw_mode().map_err(CatalogError::Prompt)?;
    let answer = wait_for_key(keys);
    disable_raw_mode().map_err(CatalogError::Prompt)?;

    let answer = answer.map_err(CatalogError::Prompt)?;
    let echo = answer.map(String::from).unwrap_or_default();
    writeln!(stdout, "{echo}").map_err(CatalogError::Prompt)?;
    Ok(answer)
}

impl Confirm for ConsolePrompt {
    fn confirm(&mut self, summary: &ChangeSummary) -> Result<Decision> {
        println!("\n{summary}\n");
        match ask(&format!("Rewrite the {} table? [y/n]", summary.label), &['y', 'n'])? {
            Some('y') => Ok(Decision::Approve),
            _ => Ok(Decision::Reject),
        }
    }
}

impl ArtistGate for ConsolePrompt {
    fn choose(&mut self, artist: &str) -> Result<ArtistChoice> {
        match ask(
            &format!("\nFound artist {artist}. Process it? [y/n/a = all remaining]"),
            &['y', 'n', 'a'],
        )? {
            Some('y') => Ok(ArtistChoice::Process),
            Some('a') => Ok(ArtistChoice::ProcessAll),
            _ => Ok(ArtistChoice::Skip),
        }
    }
}

//! Parser for the restricted automation script language.
//!
//! Scripts are line-oriented text exposing exactly three commands, one
//! per scheduling primitive:
//!
//! ```text
//! # comments and blank lines are ignored
//! delay 0:10:00
//! set ch4_mfc "Setpoint (sccm)" 42.0
//! set ch4_mfc Mode Setpoint noconfirm
//! call log_baseline
//! ```
//!
//! Tokens are whitespace-separated; a double-quoted token may contain
//! spaces. Parsing is purely syntactic: nickname, field, and callback
//! names are validated by the loader against the live panel and
//! callback registry, so that a bad reference still rejects the whole
//! script at load time.

use crate::error::ScriptError;
use crate::hms;

/// One parsed script line, mirroring the three scheduling primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// `delay H:M:S`: accrue seconds toward the next scheduled action.
    Delay(u64),
    /// `set <nickname> <field> <value> [noconfirm]`
    SetField {
        target: String,
        field: String,
        value: String,
        confirm: bool,
    },
    /// `call <callback>`
    Invoke { callback: String },
}

/// Parse script text into commands.
///
/// # Errors
///
/// Returns the first [`ScriptError`] encountered; the caller treats any
/// error as fatal to the whole load.
pub fn parse(source: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    let mut commands = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw_line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let tokens = tokenize(text, line)?;
        let Some((command, args)) = tokens.split_first() else {
            continue;
        };

        match command.as_str() {
            "delay" => {
                let [duration] = args else {
                    return Err(ScriptError::Syntax {
                        line,
                        message: "delay expects exactly one H:M:S duration".to_string(),
                    });
                };
                commands.push(ScriptCommand::Delay(hms::parse(duration)?));
            }
            "set" => commands.push(parse_set(args, line)?),
            "call" => {
                let [callback] = args else {
                    return Err(ScriptError::Syntax {
                        line,
                        message: "call expects exactly one callback name".to_string(),
                    });
                };
                commands.push(ScriptCommand::Invoke {
                    callback: callback.clone(),
                });
            }
            other => {
                return Err(ScriptError::UnknownCommand {
                    line,
                    command: other.to_string(),
                });
            }
        }
    }

    Ok(commands)
}

fn parse_set(args: &[String], line: usize) -> Result<ScriptCommand, ScriptError> {
    let (confirm, args) = match args {
        [rest @ .., last] if last.as_str() == "noconfirm" => (false, rest),
        _ => (true, args),
    };
    let [target, field, value] = args else {
        return Err(ScriptError::Syntax {
            line,
            message: "set expects a nickname, a field, and a value, optionally \
                      followed by noconfirm"
                .to_string(),
        });
    };
    Ok(ScriptCommand::SetField {
        target: target.clone(),
        field: field.clone(),
        value: value.clone(),
        confirm,
    })
}

/// Split a line into tokens, honoring double quotes around tokens that
/// contain spaces.
fn tokenize(text: &str, line: usize) -> Result<Vec<String>, ScriptError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut saw_token = false;

    for ch in text.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                saw_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if saw_token {
                    tokens.push(std::mem::take(&mut current));
                    saw_token = false;
                }
            }
            c => {
                current.push(c);
                saw_token = true;
            }
        }
    }
    if in_quotes {
        return Err(ScriptError::Syntax {
            line,
            message: "unterminated quote".to_string(),
        });
    }
    if saw_token {
        tokens.push(current);
    }
    Ok(tokens)
}

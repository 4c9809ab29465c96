//! Line-oriented session scripts replayed by the `carousel-player` binary.
//!
//! ```text
//! # comments and blank lines are skipped
//! next
//! key right
//! swipe 300 200
//! resize 320 6
//! wait 5s
//! state
//! ```

use std::time::Duration;

use carousel_core::{InputEvent, Key};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Input(InputEvent),
    /// Touch-start at `from` followed by touch-end at `to`.
    Swipe { from: f32, to: f32 },
    /// New first-slide width, optionally with a new slide count.
    Resize { width: f32, count: Option<usize> },
    Wait(Duration),
    State,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: '{command}' expects {expected}")]
    MissingArgument {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },
    #[error("line {line}: invalid {what} '{value}'")]
    InvalidArgument {
        line: usize,
        what: &'static str,
        value: String,
    },
}

pub fn parse_script(source: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        if let Some(command) = parse_line(idx + 1, raw)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

pub fn parse_line(
    line: usize,
    raw: &str,
) -> Result<Option<ScriptCommand>, ScriptError> {
    let text = raw.split('#').next().unwrap_or_default().trim();
    let mut words = text.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };

    let command = match head {
        "next" => ScriptCommand::Input(InputEvent::NextControl),
        "prev" => ScriptCommand::Input(InputEvent::PreviousControl),
        "enter" => ScriptCommand::Input(InputEvent::PointerEnter),
        "leave" => ScriptCommand::Input(InputEvent::PointerLeave),
        "key" => {
            let name = words.next().ok_or(ScriptError::MissingArgument {
                line,
                command: "key",
                expected: "a key name",
            })?;
            let Ok(key) = name.parse::<Key>();
            ScriptCommand::Input(InputEvent::KeyDown(key))
        }
        "touch" => ScriptCommand::Input(InputEvent::TouchStart {
            x: coordinate(line, "touch", words.next())?,
        }),
        "release" => ScriptCommand::Input(InputEvent::TouchEnd {
            x: coordinate(line, "release", words.next())?,
        }),
        "swipe" => ScriptCommand::Swipe {
            from: coordinate(line, "swipe", words.next())?,
            to: coordinate(line, "swipe", words.next())?,
        },
        "resize" => {
            let width = coordinate(line, "resize", words.next())?;
            let count = words
                .next()
                .map(|raw| {
                    raw.parse::<usize>().map_err(|_| {
                        ScriptError::InvalidArgument {
                            line,
                            what: "slide count",
                            value: raw.to_string(),
                        }
                    })
                })
                .transpose()?;
            ScriptCommand::Resize { width, count }
        }
        "wait" => {
            let raw = words.next().ok_or(ScriptError::MissingArgument {
                line,
                command: "wait",
                expected: "a duration such as 5s or 250ms",
            })?;
            let duration = humantime_duration(raw).ok_or_else(|| {
                ScriptError::InvalidArgument {
                    line,
                    what: "duration",
                    value: raw.to_string(),
                }
            })?;
            ScriptCommand::Wait(duration)
        }
        "state" => ScriptCommand::State,
        "quit" => ScriptCommand::Quit,
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };

    Ok(Some(command))
}

fn coordinate(
    line: usize,
    command: &'static str,
    raw: Option<&str>,
) -> Result<f32, ScriptError> {
    let raw = raw.ok_or(ScriptError::MissingArgument {
        line,
        command,
        expected: "a pixel coordinate",
    })?;
    raw.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScriptError::InvalidArgument {
            line,
            what: "pixel value",
            value: raw.to_string(),
        })
}

/// Accepts `5s`, `250ms`, or bare milliseconds.
fn humantime_duration(raw: &str) -> Option<Duration> {
    if let Ok(ms) = raw.parse::<u64>() {
        return Some(Duration::from_millis(ms));
    }
    humantime::parse_duration(raw).ok()
}

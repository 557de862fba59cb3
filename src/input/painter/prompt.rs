//! Modal prompt state machine.
//!
//! Operations that need user text (save filename, color literal, quit
//! confirmation) suspend as an explicit request/response state machine
//! instead of a coroutine: the controller opens a prompt, key events feed
//! it, and it resolves to either a submitted string or a distinct
//! cancellation. Cancellation is a no-op for the caller, never an error.

use crate::input::events::Key;

/// What the open prompt is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Export file name; resolved against the export directory.
    SaveFilename,
    /// Color name, `#rrggbb` literal or single color key.
    ColorLiteral,
    /// Quit confirmation while unsaved changes exist.
    ConfirmQuit,
}

/// Result of feeding one key into a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// Still collecting input.
    Pending,
    /// User submitted the buffered text.
    Submitted(String),
    /// User dismissed the prompt; callers must treat this as a no-op.
    Cancelled,
}

/// An open modal prompt.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub kind: PromptKind,
    pub buffer: String,
}

impl Prompt {
    pub fn new(kind: PromptKind, initial: impl Into<String>) -> Self {
        Self {
            kind,
            buffer: initial.into(),
        }
    }

    /// Prompt label shown in front of the input line.
    pub fn label(&self) -> &'static str {
        match self.kind {
            PromptKind::SaveFilename => "save as",
            PromptKind::ColorLiteral => "color",
            PromptKind::ConfirmQuit => "unsaved changes, quit? [y/n]",
        }
    }

    /// Feeds one key into the prompt.
    pub fn handle_key(&mut self, key: Key) -> PromptEvent {
        if self.kind == PromptKind::ConfirmQuit {
            return match key {
                Key::Char('y') | Key::Char('Y') | Key::Return => {
                    PromptEvent::Submitted("y".into())
                }
                Key::Char('n') | Key::Char('N') | Key::Escape => PromptEvent::Cancelled,
                _ => PromptEvent::Pending,
            };
        }

        match key {
            Key::Char(c) => {
                self.buffer.push(c);
                PromptEvent::Pending
            }
            Key::Space => {
                self.buffer.push(' ');
                PromptEvent::Pending
            }
            Key::Backspace => {
                self.buffer.pop();
                PromptEvent::Pending
            }
            Key::Return => PromptEvent::Submitted(self.buffer.clone()),
            Key::Escape => PromptEvent::Cancelled,
            _ => PromptEvent::Pending,
        }
    }
}

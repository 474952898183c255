//! Clipboard backends for the terminal host.
//!
//! - `SystemClipboard`: the OS clipboard via `arboard`.
//! - `Osc52Clipboard`: asks the terminal to set the clipboard with an
//!   OSC 52 escape sequence (works over SSH), wrapped for tmux when needed.
//! - `AutoClipboard`: system first, OSC 52 when the system clipboard is
//!   unreachable.
//! - `NoClipboard`: always unavailable.

use std::io::{self, Write};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use clap::ValueEnum;

use crate::host::{Clipboard, ClipboardError};

/// Largest base64 payload most terminals accept in one OSC 52 sequence.
pub const DEFAULT_MAX_OSC52_PAYLOAD: usize = 74_994;

/// Backend selection, as exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ClipboardChoice {
    #[default]
    Auto,
    System,
    Osc52,
    #[value(name = "none")]
    Disabled,
}

/// Opens the backend for `choice`.
pub fn open(choice: ClipboardChoice) -> Box<dyn Clipboard> {
    tracing::info!(?choice, "clipboard backend");
    match choice {
        ClipboardChoice::Auto => Box::new(AutoClipboard::new()),
        ClipboardChoice::System => Box::new(SystemClipboard::new()),
        ClipboardChoice::Osc52 => Box::new(Osc52Clipboard::stdout()),
        ClipboardChoice::Disabled => Box::new(NoClipboard),
    }
}

/// OS clipboard. The handle is kept open: on X11 and Wayland the owning
/// process serves the contents, so dropping it would drop the copy.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(map_arboard_error)?;
            self.inner = Some(clipboard);
        }
        self.inner.as_mut().ok_or(ClipboardError::Unavailable)
    }
}

impl Clipboard for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.handle()?
            .set_text(text.to_string())
            .map_err(map_arboard_error)
    }
}

fn map_arboard_error(err: arboard::Error) -> ClipboardError {
    match err {
        arboard::Error::ClipboardNotSupported => ClipboardError::Unavailable,
        arboard::Error::ClipboardOccupied => ClipboardError::PermissionDenied,
        other => ClipboardError::Write(other.to_string()),
    }
}

/// OSC 52 clipboard writing to `out` (the terminal).
pub struct Osc52Clipboard<W: Write> {
    out: W,
    max_payload: usize,
    tmux_passthrough: bool,
}

impl Osc52Clipboard<io::Stdout> {
    /// Writes to stdout, with tmux passthrough when running inside tmux.
    pub fn stdout() -> Self {
        let in_tmux = std::env::var_os("TMUX").is_some();
        Self::new(io::stdout()).with_tmux_passthrough(in_tmux)
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            max_payload: DEFAULT_MAX_OSC52_PAYLOAD,
            tmux_passthrough: false,
        }
    }

    pub fn with_tmux_passthrough(mut self, enabled: bool) -> Self {
        self.tmux_passthrough = enabled;
        self
    }

    pub fn with_max_payload(mut self, max_payload: usize) -> Self {
        self.max_payload = max_payload;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Builds the escape sequence for `text`.
    fn sequence(&self, text: &str) -> Result<String, ClipboardError> {
        let payload = STANDARD.encode(text.as_bytes());
        if payload.len() > self.max_payload {
            return Err(ClipboardError::Write(format!(
                "payload of {} bytes exceeds the OSC 52 limit of {}",
                payload.len(),
                self.max_payload
            )));
        }
        let osc = format!("\x1b]52;c;{payload}\x07");
        if self.tmux_passthrough {
            // tmux DCS passthrough: ESC P tmux; <seq with ESC doubled> ESC \
            Ok(format!("\x1bPtmux;{}\x1b\\", osc.replace('\x1b', "\x1b\x1b")))
        } else {
            Ok(osc)
        }
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        let sequence = self.sequence(text)?;
        self.out
            .write_all(sequence.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// System clipboard with OSC 52 as the fallback.
pub struct AutoClipboard {
    system: SystemClipboard,
    osc52: Osc52Clipboard<io::Stdout>,
}

impl AutoClipboard {
    pub fn new() -> Self {
        Self {
            system: SystemClipboard::new(),
            osc52: Osc52Clipboard::stdout(),
        }
    }
}

impl Default for AutoClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for AutoClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        match self.system.write(text) {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::debug!(%err, "system clipboard failed, falling back to OSC 52");
                self.osc52.write(text)
            }
        }
    }
}

/// A host without a clipboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}

#[cfg(test)]
#[path = "clipboard_tests.rs"]
mod tests;

//! Clipboard access for text-editing controls.
//!
//! The core itself never touches the clipboard; the trait exists so that
//! text widgets built on Casement share one host primitive instead of each
//! linking a platform crate.

use parking_lot::Mutex;

/// Plain-text clipboard read/write.
pub trait Clipboard {
    /// Read the clipboard's text content, if any.
    fn text(&mut self) -> Option<String>;

    /// Replace the clipboard's content. Returns `false` if the platform
    /// refused the write.
    fn set_text(&mut self, text: &str) -> bool;
}

/// The system clipboard.
pub struct SystemClipboard {
    inner: Mutex<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Connect to the system clipboard.
    ///
    /// Returns `None` on headless systems where no clipboard service is
    /// reachable; callers degrade to a [`MemoryClipboard`].
    pub fn new() -> Option<Self> {
        match arboard::Clipboard::new() {
            Ok(inner) => Some(Self {
                inner: Mutex::new(inner),
            }),
            Err(err) => {
                tracing::warn!("system clipboard unavailable: {err}");
                None
            }
        }
    }
}

impl Clipboard for SystemClipboard {
    fn text(&mut self) -> Option<String> {
        self.inner.lock().get_text().ok()
    }

    fn set_text(&mut self, text: &str) -> bool {
        self.inner.lock().set_text(text.to_owned()).is_ok()
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

/// An in-process clipboard, for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    content: Option<String>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn text(&mut self) -> Option<String> {
        self.content.clone()
    }

    fn set_text(&mut self, text: &str) -> bool {
        self.content = Some(text.to_owned());
        true
    }
}

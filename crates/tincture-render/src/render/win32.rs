//! Windows console rendering.
//!
//! Legacy Windows consoles do not interpret escape sequences. Effects are
//! applied by setting the console's text attribute before each write and
//! restoring the original attribute afterwards.
//!
//! Text that already carries ECMA-48 SGR sequences (for instance output
//! captured from a buffer while styles were applied) is split at each
//! sequence. Every parameter is translated to the console attribute with the
//! same visible meaning; parameters the console cannot express are skipped.

use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::effect::win32 as codes;
use crate::{ColorError, EffectSequence};

/// Access to a console's text attribute.
pub trait Console: Send {
    fn text_attribute(&self) -> io::Result<u16>;
    fn set_text_attribute(&mut self, attr: u16) -> io::Result<()>;
}

/// Returns the console attached to stdout, if there is one.
pub fn system_console() -> Option<Box<dyn Console>> {
    #[cfg(windows)]
    {
        let console = system::SystemConsole;
        match console.text_attribute() {
            Ok(_) => return Some(Box::new(console)),
            Err(err) => tracing::debug!(%err, "no console attached to stdout"),
        }
    }
    None
}

#[cfg(windows)]
mod system {
    use std::io;

    use windows_sys::Win32::Foundation::{HANDLE, INVALID_HANDLE_VALUE};
    use windows_sys::Win32::System::Console::{
        GetConsoleScreenBufferInfo, GetStdHandle, SetConsoleTextAttribute,
        CONSOLE_SCREEN_BUFFER_INFO, STD_OUTPUT_HANDLE,
    };

    use super::Console;

    /// The console attached to the process's stdout.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct SystemConsole;

    fn stdout_handle() -> io::Result<HANDLE> {
        // SAFETY: GetStdHandle has no preconditions.
        let handle = unsafe { GetStdHandle(STD_OUTPUT_HANDLE) };
        if handle.is_null() || handle == INVALID_HANDLE_VALUE {
            return Err(io::Error::last_os_error());
        }
        Ok(handle)
    }

    impl Console for SystemConsole {
        fn text_attribute(&self) -> io::Result<u16> {
            let handle = stdout_handle()?;
            // SAFETY: the struct is plain data and is fully written on success.
            let mut info: CONSOLE_SCREEN_BUFFER_INFO = unsafe { std::mem::zeroed() };
            if unsafe { GetConsoleScreenBufferInfo(handle, &mut info) } == 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(info.wAttributes)
        }

        fn set_text_attribute(&mut self, attr: u16) -> io::Result<()> {
            let handle = stdout_handle()?;
            // SAFETY: handle was checked above.
            if unsafe { SetConsoleTextAttribute(handle, attr) } == 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        }
    }
}

/// In-memory console for tests. Clones share the attribute history.
#[derive(Debug, Clone, Default)]
pub struct MockConsole {
    attribute: Option<u16>,
    history: std::sync::Arc<Mutex<Vec<u16>>>,
}

impl MockConsole {
    pub fn new(attribute: u16) -> Self {
        Self {
            attribute: Some(attribute),
            history: Default::default(),
        }
    }

    /// A console whose attribute cannot be read, like a redirected stdout.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Every attribute set so far, in order.
    pub fn history(&self) -> Vec<u16> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Console for MockConsole {
    fn text_attribute(&self) -> io::Result<u16> {
        self.attribute
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no console"))
    }

    fn set_text_attribute(&mut self, attr: u16) -> io::Result<()> {
        self.attribute = Some(attr);
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(attr);
        Ok(())
    }
}

/// Writes labeled text to a Windows console.
pub struct Win32Renderer {
    console: Mutex<Box<dyn Console>>,
    original: u16,
}

impl std::fmt::Debug for Win32Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Win32Renderer")
            .field("original", &format_args!("{:#06x}", self.original))
            .finish_non_exhaustive()
    }
}

impl Win32Renderer {
    /// Wraps `console`, remembering its current attribute as the one to
    /// restore after every write.
    pub fn new(console: Box<dyn Console>) -> Result<Self, ColorError> {
        let original = console.text_attribute().map_err(ColorError::Console)?;
        Ok(Self {
            console: Mutex::new(console),
            original,
        })
    }

    pub fn original_attribute(&self) -> u16 {
        self.original
    }

    /// The attribute produced by applying `effects` to the original one.
    /// Effects without a console equivalent are skipped.
    pub fn attribute_for(&self, effects: &EffectSequence) -> u16 {
        effects
            .iter()
            .filter_map(codes::code)
            .fold(self.original, |attr, code| {
                codes::apply(code, attr, self.original)
            })
    }

    /// Writes `text` through `sink` with `effects` applied.
    ///
    /// The console attribute is set before each piece of text is handed to
    /// `sink`, so the sink must flush before returning. The original
    /// attribute is restored when this returns, whether or not a write failed.
    pub fn write(
        &self,
        text: &str,
        effects: &EffectSequence,
        sink: &mut dyn FnMut(&str) -> io::Result<()>,
    ) -> io::Result<()> {
        let mut guard = AttributeGuard {
            console: self.console.lock().unwrap_or_else(PoisonError::into_inner),
            original: self.original,
        };
        let mut attr = self.attribute_for(effects);

        for (params, segment) in AnsiSegments::new(text) {
            attr = params
                .into_iter()
                .filter_map(codes::from_ecma48)
                .fold(attr, |attr, code| codes::apply(code, attr, self.original));
            if segment.is_empty() {
                continue;
            }
            guard.console.set_text_attribute(attr)?;
            sink(segment)?;
        }
        Ok(())
    }
}

/// Restores the original console attribute on drop.
struct AttributeGuard<'a> {
    console: MutexGuard<'a, Box<dyn Console>>,
    original: u16,
}

impl Drop for AttributeGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.console.set_text_attribute(self.original) {
            tracing::debug!(%err, "failed to restore console attribute");
        }
    }
}

/// Splits text at ECMA-48 SGR sequences.
///
/// Yields the parameters of the sequence preceding each run of text. The
/// first run has no sequence unless the text starts with one.
struct AnsiSegments<'a> {
    rest: &'a str,
}

impl<'a> AnsiSegments<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for AnsiSegments<'a> {
    type Item = (Vec<u8>, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let (params, end) = match split_sgr(self.rest) {
            Some((params, after)) => {
                self.rest = after;
                let params = params.split(';').filter_map(|p| p.parse().ok()).collect();
                (params, self.rest.find("\x1b[").unwrap_or(self.rest.len()))
            }
            // an escape that does not start a valid sequence is plain text
            None => (Vec::new(), text_end(self.rest)),
        };
        let (segment, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some((params, segment))
    }
}

/// Splits `ESC[<params>m` off the front of `s`.
fn split_sgr(s: &str) -> Option<(&str, &str)> {
    let body = s.strip_prefix("\x1b[")?;
    let end = body.find(|c: char| !(c.is_ascii_digit() || c == ';'))?;
    if body[end..].starts_with('m') {
        Some((&body[..end], &body[end + 1..]))
    } else {
        None
    }
}

/// End of the text run at the front of `s`, which always includes its
/// first character.
fn text_end(s: &str) -> usize {
    let first = s.chars().next().map_or(0, char::len_utf8);
    s[first..].find("\x1b[").map_or(s.len(), |i| first + i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::win32::{BACKGROUND_BLUE, FOREGROUND_INTENSITY, FOREGROUND_RED};

    fn segments(text: &str) -> Vec<(Vec<u8>, &str)> {
        AnsiSegments::new(text).collect()
    }

    fn sequence(effects: &str) -> EffectSequence {
        effects.split_whitespace().collect()
    }

    fn render(console: &MockConsole, text: &str, effects: &str) -> Vec<(u16, String)> {
        let renderer = Win32Renderer::new(Box::new(console.clone())).unwrap();
        let mut written = Vec::new();
        renderer
            .write(text, &sequence(effects), &mut |s| {
                written.push(s.to_string());
                Ok(())
            })
            .unwrap();
        let history = console.history();
        written
            .into_iter()
            .zip(history)
            .map(|(s, attr)| (attr, s))
            .collect()
    }

    #[test]
    fn test_plain_text_is_one_segment() {
        assert_eq!(segments("hello"), vec![(vec![], "hello")]);
    }

    #[test]
    fn test_segments_split_at_sgr() {
        assert_eq!(
            segments("a\x1b[1;31mb\x1b[0mc"),
            vec![(vec![], "a"), (vec![1, 31], "b"), (vec![0], "c")]
        );
    }

    #[test]
    fn test_adjacent_sequences() {
        assert_eq!(
            segments("\x1b[1m\x1b[31mx"),
            vec![(vec![1], ""), (vec![31], "x")]
        );
    }

    #[test]
    fn test_stray_escape_is_text() {
        assert_eq!(segments("\x1b[?25hé"), vec![(vec![], "\x1b[?25hé")]);
        assert_eq!(segments("é\x1b["), vec![(vec![], "é"), (vec![], "\x1b[")]);
    }

    #[test]
    fn test_bold_red_label() {
        let console = MockConsole::new(0x07);
        let writes = render(&console, "error", "bold red");
        assert_eq!(writes, vec![(FOREGROUND_INTENSITY | FOREGROUND_RED, "error".to_string())]);
        assert_eq!(console.history().last(), Some(&0x07));
    }

    #[test]
    fn test_embedded_sgr_is_translated() {
        let console = MockConsole::new(0x07);
        let writes = render(&console, "a\x1b[0;31;44mb\x1b[0mc", "");
        assert_eq!(
            writes,
            vec![
                (0x07, "a".to_string()),
                (FOREGROUND_RED | BACKGROUND_BLUE, "b".to_string()),
                (0x07, "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_unsupported_effects_are_skipped() {
        let console = MockConsole::new(0x07);
        let renderer = Win32Renderer::new(Box::new(console)).unwrap();
        assert_eq!(renderer.attribute_for(&sequence("italic blink")), 0x07);
    }

    #[test]
    fn test_restores_after_sink_error() {
        let console = MockConsole::new(0x1e);
        let renderer = Win32Renderer::new(Box::new(console.clone())).unwrap();
        let result = renderer.write("x", &sequence("red"), &mut |_| {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        });
        assert!(result.is_err());
        assert_eq!(console.history().last(), Some(&0x1e));
    }

    #[test]
    fn test_unavailable_console() {
        let err = Win32Renderer::new(Box::new(MockConsole::unavailable())).unwrap_err();
        assert!(matches!(err, ColorError::Console(_)));
    }
}

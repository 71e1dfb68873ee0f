//! The host output interface and its styling decorator.
//!
//! Every piece of host output goes through [`Ui::write`] or
//! [`Ui::write_err`] together with a label string. [`PlainUi`] ignores the
//! labels; [`StyledUi`] wraps any other `Ui` and applies the
//! [`ColorContext`] resolved for the command before passing text on.
//!
//! ```rust
//! use tincture::{PlainUi, StyledUi, Ui};
//! use tincture_render::{ColorContext, EffectRegistry, Mode, StyleTable};
//!
//! let ctx = ColorContext::new(Mode::Ansi, EffectRegistry::Ecma48, StyleTable::defaults());
//! let plain: PlainUi<Vec<u8>, Vec<u8>> = PlainUi::new(Vec::new(), Vec::new());
//! let mut ui = StyledUi::new(plain, ctx);
//! ui.write("+added\n", "diff.inserted").unwrap();
//!
//! let (out, _) = ui.into_inner().into_parts();
//! assert_eq!(String::from_utf8(out).unwrap(), "\x1b[0;32m+added\x1b[0m\n");
//! ```

use std::io::{self, Write};

use tincture_render::{ColorContext, StyleTable};

/// Host output channel.
pub trait Ui {
    /// Writes `text` to the output stream.
    fn write(&mut self, text: &str, label: &str) -> io::Result<()>;

    /// Writes `text` to the error stream.
    fn write_err(&mut self, text: &str, label: &str) -> io::Result<()>;

    /// Writes a prompt. Prompts are never buffered.
    fn prompt(&mut self, msg: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    /// Starts capturing output instead of writing it.
    ///
    /// With `capture_stderr`, error output is captured too. With
    /// `apply_labels`, captured text is styled as if it had been written.
    fn push_buffer(&mut self, capture_stderr: bool, apply_labels: bool);

    /// Stops the innermost capture and returns what it collected.
    fn pop_buffer(&mut self) -> String;

    /// Returns `msg` styled for `label` without writing it.
    fn label(&self, msg: &str, _label: &str) -> String {
        msg.to_string()
    }

    /// Reports a warning on the error stream.
    fn warn(&mut self, msg: &str) -> io::Result<()> {
        tracing::warn!("{}", msg.trim_end());
        self.write_err(msg, "ui.warning")
    }
}

/// One level of output capture.
#[derive(Debug, Default)]
struct Buffer {
    text: String,
    capture_stderr: bool,
    apply_labels: bool,
}

#[derive(Debug, Default)]
struct BufferStack(Vec<Buffer>);

impl BufferStack {
    fn push(&mut self, capture_stderr: bool, apply_labels: bool) {
        self.0.push(Buffer {
            text: String::new(),
            capture_stderr,
            apply_labels,
        });
    }

    fn pop(&mut self) -> String {
        self.0.pop().map(|b| b.text).unwrap_or_default()
    }

    fn top(&mut self) -> Option<&mut Buffer> {
        self.0.last_mut()
    }

    fn captures_stderr(&self) -> bool {
        self.0.last().is_some_and(|b| b.capture_stderr)
    }
}

/// A `Ui` writing straight to two byte streams.
#[derive(Debug)]
pub struct PlainUi<W, E> {
    out: W,
    err: E,
    buffers: BufferStack,
}

impl PlainUi<io::Stdout, io::Stderr> {
    /// A `Ui` on the process's stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> PlainUi<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self {
            out,
            err,
            buffers: BufferStack::default(),
        }
    }

    /// Returns the output and error streams.
    pub fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl<W: Write, E: Write> Ui for PlainUi<W, E> {
    fn write(&mut self, text: &str, _label: &str) -> io::Result<()> {
        if let Some(buffer) = self.buffers.top() {
            buffer.text.push_str(text);
            return Ok(());
        }
        self.out.write_all(text.as_bytes())
    }

    fn write_err(&mut self, text: &str, label: &str) -> io::Result<()> {
        if self.buffers.captures_stderr() {
            return self.write(text, label);
        }
        self.out.flush()?;
        self.err.write_all(text.as_bytes())?;
        self.err.flush()
    }

    fn prompt(&mut self, msg: &str) -> io::Result<()> {
        self.out.write_all(msg.as_bytes())?;
        self.out.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }

    fn push_buffer(&mut self, capture_stderr: bool, apply_labels: bool) {
        self.buffers.push(capture_stderr, apply_labels);
    }

    fn pop_buffer(&mut self) -> String {
        self.buffers.pop()
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Out,
    Err,
}

/// Decorates a `Ui` with label styling.
#[derive(Debug)]
pub struct StyledUi<U> {
    inner: U,
    ctx: ColorContext,
    buffers: BufferStack,
}

impl<U: Ui> StyledUi<U> {
    pub fn new(inner: U, ctx: ColorContext) -> Self {
        Self {
            inner,
            ctx,
            buffers: BufferStack::default(),
        }
    }

    pub fn context(&self) -> &ColorContext {
        &self.ctx
    }

    pub fn into_inner(self) -> U {
        self.inner
    }

    /// Runs `f` with `styles` installed in place of the current style
    /// table, then puts the original back.
    pub fn with_styles<R>(&mut self, styles: StyleTable, f: impl FnOnce(&mut Self) -> R) -> R {
        let original = self.ctx.replace_styles(styles);
        let result = f(self);
        self.ctx.replace_styles(original);
        result
    }

    fn emit(&mut self, stream: Stream, text: &str, label: &str) -> io::Result<()> {
        let inner = &mut self.inner;
        let Some(renderer) = self.ctx.win32() else {
            let styled = self.ctx.label(text, label);
            return match stream {
                Stream::Out => inner.write(&styled, label),
                Stream::Err => inner.write_err(&styled, label),
            };
        };

        let effects = self.ctx.resolve(label);
        tracing::trace!(label, %effects, "console write");
        renderer.write(text, &effects, &mut |segment: &str| {
            match stream {
                Stream::Out => inner.write(segment, label)?,
                Stream::Err => inner.write_err(segment, label)?,
            }
            inner.flush()
        })
    }
}

impl<U: Ui> Ui for StyledUi<U> {
    fn write(&mut self, text: &str, label: &str) -> io::Result<()> {
        if let Some(buffer) = self.buffers.top() {
            if buffer.apply_labels {
                buffer.text.push_str(&self.ctx.label(text, label));
            } else {
                buffer.text.push_str(text);
            }
            return Ok(());
        }
        self.emit(Stream::Out, text, label)
    }

    fn write_err(&mut self, text: &str, label: &str) -> io::Result<()> {
        if self.buffers.captures_stderr() {
            return self.write(text, label);
        }
        self.emit(Stream::Err, text, label)
    }

    fn prompt(&mut self, msg: &str) -> io::Result<()> {
        if self.ctx.win32().is_some() {
            return self.emit(Stream::Out, msg, "ui.prompt");
        }
        self.inner.prompt(&self.ctx.label(msg, "ui.prompt"))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    fn push_buffer(&mut self, capture_stderr: bool, apply_labels: bool) {
        self.buffers.push(capture_stderr, apply_labels);
    }

    fn pop_buffer(&mut self) -> String {
        self.buffers.pop()
    }

    fn label(&self, msg: &str, label: &str) -> String {
        self.ctx.label(msg, label)
    }
}

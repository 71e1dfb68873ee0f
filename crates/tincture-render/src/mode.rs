use std::fmt;

/// The rendering backend active for one command invocation.
///
/// Chosen once by mode resolution and fixed afterwards.
///
/// # Variants
///
/// - `Disabled` - No styling; text passes through untouched
/// - `Ansi` - ECMA-48 SGR escape codes
/// - `Terminfo` - Escape sequences looked up in the terminal's capability database
/// - `Win32` - Console text attributes set around each write
/// - `Debug` - Labels shown literally as `[label|text]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Disabled,
    Ansi,
    Terminfo,
    Win32,
    Debug,
}

impl Mode {
    /// Returns true unless color is disabled.
    pub fn is_active(&self) -> bool {
        !matches!(self, Mode::Disabled)
    }

    /// Returns true for the modes that produce real terminal effects.
    pub fn is_styled(&self) -> bool {
        matches!(self, Mode::Ansi | Mode::Terminfo | Mode::Win32)
    }

    /// Returns true if this is debug mode.
    pub fn is_debug(&self) -> bool {
        matches!(self, Mode::Debug)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Disabled => "disabled",
            Mode::Ansi => "ansi",
            Mode::Terminfo => "terminfo",
            Mode::Win32 => "win32",
            Mode::Debug => "debug",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_is_default() {
        assert_eq!(Mode::default(), Mode::Disabled);
        assert!(!Mode::Disabled.is_active());
    }

    #[test]
    fn test_styled_modes() {
        assert!(Mode::Ansi.is_styled());
        assert!(Mode::Terminfo.is_styled());
        assert!(Mode::Win32.is_styled());
        assert!(!Mode::Debug.is_styled());
        assert!(Mode::Debug.is_active());
    }

    #[test]
    fn test_display() {
        assert_eq!(Mode::Win32.to_string(), "win32");
        assert_eq!(Mode::Disabled.to_string(), "disabled");
    }
}

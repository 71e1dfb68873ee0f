//! End-to-end tests for tincture.
//!
//! Commands are parsed with clap and run against in-memory streams, with
//! mock terminfo databases and consoles standing in for the terminal.

use std::io::Write;

use clap::Parser;
use tincture::cli::{run, Cli};
use tincture::env::MockEnv;
use tincture::{Backends, PlainUi, TerminalProbe};
use tincture_render::{MockConsole, MockTerminfo, Mode};

type TestUi = PlainUi<Vec<u8>, Vec<u8>>;

struct Outcome {
    mode: Mode,
    stdout: String,
    stderr: String,
}

fn tty() -> TerminalProbe {
    TerminalProbe {
        term: Some("xterm".into()),
        formatted: true,
        ..Default::default()
    }
}

fn invoke(args: &[&str], probe: &TerminalProbe, backends: Backends) -> Outcome {
    let cli = Cli::try_parse_from(std::iter::once("tincture").chain(args.iter().copied())).unwrap();
    let ui: TestUi = PlainUi::new(Vec::new(), Vec::new());
    let ui = run(&cli, ui, probe, backends).unwrap();
    let mode = ui.context().mode();
    let (out, err) = ui.into_inner().into_parts();
    Outcome {
        mode,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

// ============================================================================
// Mode selection
// ============================================================================

#[test]
fn never_disables_regardless_of_config() {
    let outcome = invoke(
        &["--color", "never", "--set", "color.mode=ansi", "label", "-l", "bold", "x"],
        &tty(),
        Backends::none(),
    );
    assert_eq!(outcome.mode, Mode::Disabled);
    assert_eq!(outcome.stdout, "x\n");
}

#[test]
fn auto_on_pipe_is_plain() {
    let probe = TerminalProbe {
        formatted: false,
        ..tty()
    };
    let outcome = invoke(&["label", "-l", "diff.inserted", "+x"], &probe, Backends::none());
    assert_eq!(outcome.mode, Mode::Disabled);
    assert_eq!(outcome.stdout, "+x\n");
}

#[test]
fn auto_on_terminal_is_ansi() {
    let outcome = invoke(&["label", "-l", "diff.inserted", "+x"], &tty(), Backends::none());
    assert_eq!(outcome.mode, Mode::Ansi);
    assert_eq!(outcome.stdout, "\x1b[0;32m+x\x1b[0m\n");
}

#[test]
fn always_with_unusable_terminfo_reverts_to_ansi() {
    let outcome = invoke(
        &["--color", "always", "--set", "color.mode=terminfo", "label", "-l", "bold", "x"],
        &tty(),
        Backends::none().with_terminfo(MockTerminfo::broken()),
    );
    assert_eq!(outcome.mode, Mode::Ansi);
    assert_eq!(outcome.stdout, "\x1b[0;1mx\x1b[0m\n");
    assert_eq!(outcome.stderr, "warning: failed to set color mode to terminfo\n");
}

#[test]
fn plain_environment_skips_color() {
    let env = MockEnv::new().with_var("TINCTURE_PLAIN", "1");
    let probe = TerminalProbe {
        formatted: true,
        ..TerminalProbe::detect(&env, false)
    };
    let outcome = invoke(&["--color", "always", "label", "-l", "bold", "x"], &probe, Backends::none());
    assert_eq!(outcome.mode, Mode::Disabled);
    assert_eq!(outcome.stdout, "x\n");
}

// ============================================================================
// Rendering through each backend
// ============================================================================

#[test]
fn configured_style_renders_ansi() {
    let outcome = invoke(
        &[
            "--color",
            "always",
            "--set",
            "color.status.modified=blue bold underline red_background",
            "label",
            "-l",
            "status.modified",
            "M",
            "README",
        ],
        &tty(),
        Backends::none(),
    );
    assert_eq!(outcome.stdout, "\x1b[0;34;1;4;41mM README\x1b[0m\n");
}

#[test]
fn empty_styles_leave_text_unchanged() {
    let outcome = invoke(
        &["--color", "always", "label", "-l", "changeset.secret changeset:", "changeset:", "1"],
        &tty(),
        Backends::none(),
    );
    assert_eq!(outcome.stdout, "changeset: 1\n");
}

#[test]
fn debug_mode_shows_labels() {
    let outcome = invoke(
        &["--color", "debug", "label", "-l", "log.changeset", "22611:6f0a53c8f587"],
        &TerminalProbe::default(),
        Backends::none(),
    );
    assert_eq!(outcome.stdout, "[log.changeset|22611:6f0a53c8f587]\n");
}

#[test]
fn terminfo_backend_uses_capabilities() {
    let outcome = invoke(
        &[
            "--color",
            "always",
            "--set",
            "color.mode=terminfo",
            "--set",
            "color.color.orange=208",
            "--set",
            "color.log.changeset=orange",
            "label",
            "-l",
            "log.changeset",
            "abc",
        ],
        &tty(),
        Backends::none().with_terminfo(MockTerminfo::xterm()),
    );
    assert_eq!(outcome.mode, Mode::Terminfo);
    assert_eq!(outcome.stdout, "\x1b(B\x1b[m\x1b[3208mabc\x1b(B\x1b[m\n");
    assert!(outcome.stderr.is_empty());
}

#[test]
fn win32_backend_sets_console_attributes() {
    let console = MockConsole::new(0x07);
    let outcome = invoke(
        &[
            "--color",
            "always",
            "--set",
            "color.mode=win32",
            "--set",
            "color.status.removed=bold red",
            "label",
            "-l",
            "status.removed",
            "R",
            "gone",
        ],
        &tty(),
        Backends::none().with_console(console.clone()),
    );
    assert_eq!(outcome.mode, Mode::Win32);
    assert_eq!(outcome.stdout, "R gone\n");
    assert_eq!(console.history(), vec![0x0c, 0x07]);
}

#[test]
fn unknown_configured_effect_warns() {
    let outcome = invoke(
        &["--color", "always", "--set", "color.diff.inserted=green glitter", "label", "-l", "diff.inserted", "+"],
        &tty(),
        Backends::none(),
    );
    assert_eq!(outcome.stdout, "\x1b[0;32m+\x1b[0m\n");
    assert_eq!(
        outcome.stderr,
        "ignoring unknown color/effect 'glitter' (configured in color.diff.inserted)\n"
    );
}

// ============================================================================
// Config files and commands
// ============================================================================

#[test]
fn config_file_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "color:\n  mode: ansi\n  diff.inserted: cyan").unwrap();
    let path = file.path().to_str().unwrap();

    let outcome = invoke(
        &["--color", "always", "--config", path, "label", "-l", "diff.inserted", "+"],
        &tty(),
        Backends::none(),
    );
    assert_eq!(outcome.stdout, "\x1b[0;36m+\x1b[0m\n");
}

#[test]
fn missing_config_file_fails() {
    let cli = Cli::try_parse_from(["tincture", "--config", "/nonexistent/tincture.yaml", "debugcolor"]).unwrap();
    let ui: TestUi = PlainUi::new(Vec::new(), Vec::new());
    let err = run(&cli, ui, &tty(), Backends::none()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read"));
}

#[test]
fn debugcolor_reports_mode_first() {
    let outcome = invoke(&["--color", "never", "debugcolor"], &tty(), Backends::none());
    assert!(outcome.stdout.starts_with("color mode: disabled\navailable colors:\n"));
    assert!(outcome.stdout.contains("\nred\n"));
}

#[test]
fn debugcolor_style_lists_defaults() {
    let outcome = invoke(&["--color", "debug", "debugcolor", "--style"], &tty(), Backends::none());
    assert!(outcome.stdout.starts_with("color mode: debug\navailable style:\n"));
    assert!(outcome.stdout.contains("[diff.inserted|diff.inserted]:"));
}

#[test]
fn git_diff_gets_color_when_active() {
    let outcome = invoke(&["--color", "always", "git-args", "diff", "--stat"], &tty(), Backends::none());
    assert_eq!(outcome.stdout, "diff --color --stat\n");

    let outcome = invoke(&["--color", "never", "git-args", "diff", "--stat"], &tty(), Backends::none());
    assert_eq!(outcome.stdout, "diff --stat\n");
}

#[test]
fn label_to_stderr() {
    let outcome = invoke(
        &["--color", "always", "label", "--stderr", "-l", "diff.deleted", "removed"],
        &tty(),
        Backends::none(),
    );
    assert!(outcome.stdout.is_empty());
    assert_eq!(outcome.stderr, "\x1b[0;31mremoved\x1b[0m\n");
}

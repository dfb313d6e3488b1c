//! Syntax highlighting and terminal colors for tpview.
//!
//! This crate provides syntax-highlighted output of assertion payloads and configuration,
//! and a [`Palette`] for styled terminal output that can be switched off for plain text.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use tpview_report::Status;
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Separator between breadcrumb entries.
pub const BREADCRUMB_SEPARATOR: &str = " › ";

/// A syntax highlighter that can highlight code for terminal output.
pub struct Highlighter {
    /// The syntax set containing language definitions (including TOML and JSON).
    syntax_set: SyntaxSet,
    /// The theme set containing color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme to use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a new highlighter with the default theme (Dracula).
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content for terminal output.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights JSON content for terminal output.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights content with the specified syntax for terminal output.
    ///
    /// If the syntax is not found, the content is highlighted as plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (for passes).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text (for failures).
    pub const RED: &str = "\x1b[31m";
    /// Magenta text (for errors).
    pub const MAGENTA: &str = "\x1b[35m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Text styling that is either colored or plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Whether to emit ANSI codes.
    color: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self::colored()
    }
}

impl Palette {
    /// A palette that emits ANSI codes.
    pub fn colored() -> Self {
        Self { color: true }
    }

    /// A palette that returns text unchanged.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// A palette chosen by flag.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Whether ANSI codes are emitted.
    pub fn is_colored(self) -> bool {
        self.color
    }

    /// Wraps `text` in the given codes.
    fn paint(self, codes: &[&str], text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("{}{text}{}", codes.concat(), colors::RESET)
    }

    /// Formats a header with bold cyan styling.
    pub fn header(self, text: &str) -> String {
        self.paint(&[colors::BOLD, colors::CYAN], text)
    }

    /// Formats text as a subheader (bold).
    pub fn subheader(self, text: &str) -> String {
        self.paint(&[colors::BOLD], text)
    }

    /// Formats text as dimmed/less important.
    pub fn dim(self, text: &str) -> String {
        self.paint(&[colors::DIM], text)
    }

    /// Formats text as a success message (green).
    pub fn success(self, text: &str) -> String {
        self.paint(&[colors::GREEN], text)
    }

    /// Formats text as a warning (yellow).
    pub fn warning(self, text: &str) -> String {
        self.paint(&[colors::YELLOW], text)
    }

    /// Formats text as an error (red).
    pub fn error(self, text: &str) -> String {
        self.paint(&[colors::RED], text)
    }

    /// Colors a status name by severity.
    pub fn status(self, status: Status) -> String {
        let code = match status {
            Status::Error => colors::MAGENTA,
            Status::Failed => colors::RED,
            Status::Incomplete => colors::YELLOW,
            Status::Passed => colors::GREEN,
            Status::Skipped => colors::DIM,
        };
        self.paint(&[code], status.as_str())
    }

    /// Formats passed/failed counts as `passed/failed`, each in its color.
    ///
    /// A zero count is dimmed.
    pub fn counts(self, passed: usize, failed: usize) -> String {
        let passed_text = passed.to_string();
        let failed_text = failed.to_string();
        let passed = if passed == 0 {
            self.dim(&passed_text)
        } else {
            self.success(&passed_text)
        };
        let failed = if failed == 0 {
            self.dim(&failed_text)
        } else {
            self.error(&failed_text)
        };
        format!("{passed}/{failed}")
    }

    /// Joins breadcrumb entries with dimmed separators.
    pub fn breadcrumb<S: AsRef<str>>(self, parts: &[S]) -> String {
        let separator = self.dim(BREADCRUMB_SEPARATOR);
        parts
            .iter()
            .map(|part| part.as_ref())
            .collect::<Vec<&str>>()
            .join(&separator)
    }

    /// Returns a dimmed horizontal rule for visual separation.
    pub fn rule(self, width: usize) -> String {
        self.dim(&"─".repeat(width))
    }
}

/// Indents every line of `content` by four spaces.
pub fn indent_content(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("    {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

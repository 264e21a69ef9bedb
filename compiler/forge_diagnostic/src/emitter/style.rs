//! Presentation roles and their terminal styles.

/// What a piece of rendered text is, independent of how it looks.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Role {
    /// `error[<code>]`
    Header,
    /// The `file:line:col` position.
    File,
    /// The `hint:` label.
    Hint,
    /// The caret run.
    Underline,
    /// Gutter bars, line numbers and the `-->` arrow.
    Dim,
}

/// An ANSI escape sequence pair. Empty strings mean "unstyled".
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Style {
    pub open: &'static str,
    pub close: &'static str,
}

impl Style {
    pub const PLAIN: Style = Style { open: "", close: "" };

    pub const fn ansi(open: &'static str) -> Self {
        Style {
            open,
            close: "\x1b[0m",
        }
    }
}

/// Style lookup keyed by [`Role`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct StyleTable {
    pub header: Style,
    pub file: Style,
    pub hint: Style,
    pub underline: Style,
    pub dim: Style,
}

impl StyleTable {
    /// No escape sequences at all.
    pub const fn plain() -> Self {
        StyleTable {
            header: Style::PLAIN,
            file: Style::PLAIN,
            hint: Style::PLAIN,
            underline: Style::PLAIN,
            dim: Style::PLAIN,
        }
    }

    /// Default colour scheme.
    pub const fn ansi() -> Self {
        StyleTable {
            header: Style::ansi("\x1b[1;31m"),    // Bold red
            file: Style::ansi("\x1b[1m"),         // Bold
            hint: Style::ansi("\x1b[1;36m"),      // Bold cyan
            underline: Style::ansi("\x1b[1;31m"), // Bold red
            dim: Style::ansi("\x1b[1;34m"),       // Bold blue
        }
    }

    /// Pick a table for the given colour mode.
    pub fn for_mode(mode: ColorMode, is_tty: bool) -> Self {
        if mode.should_use_colors(is_tty) {
            Self::ansi()
        } else {
            Self::plain()
        }
    }

    pub fn get(&self, role: Role) -> Style {
        match role {
            Role::Header => self.header,
            Role::File => self.file,
            Role::Hint => self.hint,
            Role::Underline => self.underline,
            Role::Dim => self.dim,
        }
    }

    /// Wrap `text` in the style for `role`.
    pub fn paint(&self, role: Role, text: &str) -> String {
        let style = self.get(role);
        if style.open.is_empty() {
            return text.to_string();
        }
        format!("{}{text}{}", style.open, style.close)
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::plain()
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// For `Auto` mode, `is_tty` determines whether colors should be used.
    /// This parameter is ignored for `Always` and `Never` modes.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

//! Console line formatting for multiplexed process output.

use project_layout::ServiceRole;

/// ANSI reset sequence appended to every rendered line.
pub const ANSI_RESET: &str = "\x1b[0m";
/// Cyan, used for the frontend.
pub const ANSI_CYAN: &str = "\x1b[36m";
/// Yellow, used for the backend.
pub const ANSI_YELLOW: &str = "\x1b[33m";

/// Per-source label and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputStyle {
    pub prefix: &'static str,
    pub color: &'static str,
}

impl OutputStyle {
    /// The fixed style of a role. Prefixes are padded to equal width.
    pub fn for_role(role: ServiceRole) -> Self {
        match role {
            ServiceRole::Frontend => Self {
                prefix: "[Frontend] ",
                color: ANSI_CYAN,
            },
            ServiceRole::Backend => Self {
                prefix: "[Backend]  ",
                color: ANSI_YELLOW,
            },
        }
    }

    /// `<color><prefix><text><reset>`
    pub fn render(&self, text: &str) -> String {
        format!("{}{}{}{}", self.color, self.prefix, text, ANSI_RESET)
    }
}

/// One line of child output, tagged with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub role: ServiceRole,
    pub text: String,
}

impl LogLine {
    /// Build a line from raw bytes read up to (and possibly including) `\n`.
    ///
    /// Bytes are decoded lossily and the line terminator (`\n` or `\r\n`) is
    /// stripped. Returns `None` for whitespace-only lines.
    pub fn from_raw(role: ServiceRole, raw: &[u8]) -> Option<Self> {
        let decoded = String::from_utf8_lossy(raw);
        let text = decoded.trim_end_matches('\n').trim_end_matches('\r');
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            role,
            text: text.to_string(),
        })
    }

    /// Console rendering with the role's prefix and color.
    pub fn render(&self) -> String {
        OutputStyle::for_role(self.role).render(&self.text)
    }
}

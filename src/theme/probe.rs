//! System colour-scheme detection.

/// Environment variable overriding the detected colour scheme (`dark` or `light`).
pub const COLOR_SCHEME_ENV: &str = "TOOLSHELF_COLOR_SCHEME";

/// Answers "does the system prefer a dark colour scheme?".
///
/// Queried on every apply, so a change in the system setting shows up on the
/// next apply rather than live.
pub trait ColorSchemeProbe {
    /// `None` when the system gives no answer.
    fn prefers_dark(&self) -> Option<bool>;
}

/// Probe with a fixed answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedProbe(pub Option<bool>);

impl ColorSchemeProbe for FixedProbe {
    fn prefers_dark(&self) -> Option<bool> {
        self.0
    }
}

/// Probe reading the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProbe;

impl EnvProbe {
    /// Detect from an arbitrary variable lookup.
    pub fn detect_with(lookup: impl Fn(&str) -> Option<String>) -> Option<bool> {
        if let Some(value) = lookup(COLOR_SCHEME_ENV) {
            match value.trim().to_ascii_lowercase().as_str() {
                "dark" => return Some(true),
                "light" => return Some(false),
                other => log::warn!("Ignoring {}={}", COLOR_SCHEME_ENV, other),
            }
        }

        // GTK exposes dark variants as e.g. "Adwaita:dark"
        lookup("GTK_THEME").map(|theme| theme.to_ascii_lowercase().ends_with(":dark"))
    }
}

impl ColorSchemeProbe for EnvProbe {
    fn prefers_dark(&self) -> Option<bool> {
        Self::detect_with(|key| std::env::var(key).ok())
    }
}

//! Light/dark/auto theme handling
//!
//! `preference` holds the pure core (values and transitions); `controller`
//! wires it to a `PreferenceStore`, a `ColorSchemeProbe` and the document.

pub mod controller;
pub mod preference;
pub mod probe;
pub mod storage;

pub use controller::{ThemeController, ThemeSettings};
pub use preference::{ResolvedTheme, ThemePreference, ThemeState};
pub use probe::{ColorSchemeProbe, EnvProbe, FixedProbe};
pub use storage::{FileStore, MemoryStore, PreferenceStore};

//! Configuration — project settings loaded from `.quill.toml`.

pub mod settings;

pub use settings::Settings;

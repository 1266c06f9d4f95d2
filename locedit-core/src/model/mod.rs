pub mod entry;
pub mod progress;
pub mod settings;

pub mod encoding;
pub mod export;
pub mod files;
pub mod paths;
pub mod progress;
pub mod prompt;
pub mod session;
pub mod settings;

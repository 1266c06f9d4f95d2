pub mod config;
pub mod error;
pub mod model;
pub mod parsers;
pub mod protocol;
pub mod services;

pub use config::CoreConfig;
pub use error::{EditorError, Result};
pub use model::entry::TranslationEntry;
pub use protocol::{Core, Request};
pub use services::session::Session;

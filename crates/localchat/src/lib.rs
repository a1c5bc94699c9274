mod error;
pub mod utils;
pub use error::{Error, Result};

pub mod chat_completions;
pub mod clients;

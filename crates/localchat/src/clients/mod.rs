#[cfg(feature = "openai_client")]
pub mod openai;

use crate::chat_completions::ChatCompletion;
use dyn_clone::DynClone;

/// A provider that can be held as `Box<dyn Client>` and swapped at runtime.
pub trait Client: DynClone + ChatCompletion + Send + Sync {}

dyn_clone::clone_trait_object!(Client);

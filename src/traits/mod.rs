//! Protocolo de traits para la primitiva de input.

pub mod keys;
pub mod state;

pub use keys::{KeyExt, KeyStateExt};
pub use state::InputStateExt;

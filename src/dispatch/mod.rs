//! Registro de bindings y loop de despacho.

mod binding;
mod dispatcher;
mod shared;
mod trigger;

pub use binding::ArgValue;
pub use dispatcher::{CommandDispatcher, TickReport};
pub use shared::SharedDispatcher;
pub use trigger::TriggerMode;

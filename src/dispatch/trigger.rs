use std::hash::Hash;

use crate::traits::InputStateExt;

/// Modo de activación de un binding.
///
/// | Modo | Verdadero cuando |
/// |---|---|
/// | `Pressed` | la tecla bajó en este tick (flanco) |
/// | `Released` | la tecla subió en este tick (flanco) |
/// | `Held` | la tecla está abajo (nivel, todos los ticks) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriggerMode {
    #[default]
    Pressed,
    Released,
    Held,
}

impl TriggerMode {
    /// Evalúa la condición de disparo de `key` contra el estado actual.
    ///
    /// Hace exactamente una consulta a la primitiva de input.
    pub fn evaluate<K, S, I>(self, input: &I, key: K) -> bool
    where
        K: Copy + PartialEq + Hash,
        S: Copy + PartialEq,
        I: InputStateExt<K, S> + ?Sized,
    {
        match self {
            TriggerMode::Pressed => input.is_just_press(key),
            TriggerMode::Released => input.is_just_released(key),
            TriggerMode::Held => input.is_pressed(key),
        }
    }
}

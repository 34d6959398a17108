use std::hash::Hash;

/// # Trait `InputStateExt`
///
/// Define la interfaz del **estado vivo del input** en un frame determinado.
///
/// Es la primitiva de sondeo que consume el
/// [`CommandDispatcher`](crate::CommandDispatcher): por cada binding y por
/// cada tick se consulta exactamente una de
/// [`is_just_press`](Self::is_just_press),
/// [`is_just_released`](Self::is_just_released) o
/// [`is_pressed`](Self::is_pressed), según el
/// [`TriggerMode`](crate::TriggerMode) del binding. El despachador nunca
/// cachea ni agrupa estas consultas.
///
/// ## Parámetros genéricos
/// - `K`: Tipo de tecla (por ejemplo, [`KeyCode`](crate::KeyCode)).
/// - `S`: Tipo de estado (por ejemplo, [`KeyState`](crate::KeyState)).
///
/// ## Ejemplo de uso
/// ```rust
/// use orbit_input_commands::{FrameInput, InputStateExt, KeyCode, KeyState};
///
/// let mut input: FrameInput = FrameInput::new();
/// input.set_key(KeyCode::Space, KeyState::Pressed);
///
/// assert!(input.is_just_press(KeyCode::Space));
/// assert!(input.is_pressed(KeyCode::Space));
/// ```
pub trait InputStateExt<K, S>
where
    K: Copy + PartialEq + Hash,
    S: Copy + PartialEq,
{
    /// Establece o actualiza el estado de una tecla.
    ///
    /// Normalmente llamado por el runtime cuando detecta un evento de entrada.
    fn set_key(&mut self, key: K, state: S);

    /// Retorna `true` si la tecla fue presionada **en este frame**.
    ///
    /// Solo es `true` en el frame exacto de la transición, no mientras se
    /// mantiene presionada.
    fn is_just_press(&self, key: K) -> bool;

    /// Retorna `true` si la tecla está actualmente **presionada o mantenida**.
    fn is_pressed(&self, key: K) -> bool;

    /// Retorna `true` si la tecla está **completamente liberada**.
    fn is_released(&self, key: K) -> bool {
        !self.is_pressed(key)
    }

    /// Retorna `true` si la tecla fue **liberada en este frame específico**.
    fn is_just_released(&self, key: K) -> bool;

    /// Retorna `true` si **cualquier tecla** se encuentra presionada.
    fn any_pressed(&self) -> bool;

    /// Retorna todas las teclas actualmente presionadas.
    fn keys_pressed(&self) -> Vec<K>;

    /// Resetea el estado actual (por ejemplo, al cambiar de escena o al pausar el juego).
    fn reset(&mut self);
}

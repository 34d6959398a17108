//! Implementación de referencia de [`InputStateExt`] basada en frames.

use std::collections::HashSet;
use std::hash::Hash;

use crate::keyboard::{KeyCode, KeyState};
use crate::traits::{InputStateExt, KeyExt, KeyStateExt};

/// Estado de teclado por frame.
///
/// Guarda el conjunto de teclas abajo en el frame actual y en el anterior;
/// las consultas de flanco (`is_just_press`, `is_just_released`) se derivan
/// comparando ambos conjuntos. El game loop llama a [`end_frame`](Self::end_frame)
/// después de despachar los comandos del frame.
///
/// Una tecla que baja y sube dentro del mismo frame no produce flanco.
///
/// ```rust
/// use orbit_input_commands::{FrameInput, InputStateExt, KeyCode, KeyState};
///
/// let mut input: FrameInput = FrameInput::new();
/// input.set_key(KeyCode::F, KeyState::Pressed);
/// assert!(input.is_just_press(KeyCode::F));
///
/// input.end_frame();
/// assert!(!input.is_just_press(KeyCode::F));
/// assert!(input.is_pressed(KeyCode::F));
/// ```
#[derive(Debug, Clone)]
pub struct FrameInput<K = KeyCode> {
    current: HashSet<K>,
    previous: HashSet<K>,
    frame: u64,
}

impl<K> Default for FrameInput<K> {
    fn default() -> Self {
        Self {
            current: HashSet::new(),
            previous: HashSet::new(),
            frame: 0,
        }
    }
}

impl<K> FrameInput<K>
where
    K: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Cierra el frame actual: el estado actual pasa a ser el anterior.
    pub fn end_frame(&mut self) {
        self.previous.clone_from(&self.current);
        self.frame += 1;
    }

    /// Número de frames cerrados con [`end_frame`](Self::end_frame).
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Ingresa un evento nativo de un backend, traduciéndolo con
    /// [`KeyExt`] y [`KeyStateExt`].
    pub fn apply_backend<B, I>(&mut self, key: B, state: I)
    where
        B: KeyExt<B, K> + Copy + PartialEq,
        I: KeyStateExt<I, KeyState> + Copy + PartialEq,
    {
        let key = B::from_backend_key(key);
        let state = I::from_external_state(state);
        self.set_key(key, state);
    }
}

impl<K> InputStateExt<K, KeyState> for FrameInput<K>
where
    K: Copy + Eq + Hash,
{
    fn set_key(&mut self, key: K, state: KeyState) {
        if state.is_down() {
            self.current.insert(key);
        } else {
            self.current.remove(&key);
        }
    }

    fn is_just_press(&self, key: K) -> bool {
        self.current.contains(&key) && !self.previous.contains(&key)
    }

    fn is_pressed(&self, key: K) -> bool {
        self.current.contains(&key)
    }

    fn is_just_released(&self, key: K) -> bool {
        self.previous.contains(&key) && !self.current.contains(&key)
    }

    fn any_pressed(&self) -> bool {
        !self.current.is_empty()
    }

    fn keys_pressed(&self) -> Vec<K> {
        self.current.iter().copied().collect()
    }

    fn reset(&mut self) {
        self.current.clear();
        self.previous.clear();
    }
}

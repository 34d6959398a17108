//! Tipos normalizados de teclado usados por el despachador de comandos.
//!
//! [`KeyCode`] identifica una tecla física (o botón de mouse) sin depender de
//! ningún backend concreto, y [`KeyState`] el estado reportado para ella en
//! un frame. Los backends traducen sus tipos nativos a estos mediante
//! [`KeyExt`](crate::KeyExt) y [`KeyStateExt`](crate::KeyStateExt).

use serde::{Deserialize, Serialize};

/// Código de tecla normalizado.
///
/// Los nombres siguen la posición física en un layout QWERTY (US).
/// Los botones del mouse se incluyen aquí porque los comandos de selección
/// y movimiento suelen estar asignados a ellos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum KeyCode {
    // Letras
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Fila numérica
    Alpha0,
    Alpha1,
    Alpha2,
    Alpha3,
    Alpha4,
    Alpha5,
    Alpha6,
    Alpha7,
    Alpha8,
    Alpha9,

    // Funciones
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Modificadores
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    // Flechas
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Comunes
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    // Mouse
    Mouse0,
    Mouse1,
    Mouse2,

    /// Tecla que el backend no supo traducir.
    Unknown,
}

impl KeyCode {
    /// Tecla de la fila numérica para el dígito `n` (`0..=9`).
    ///
    /// Retorna `None` para cualquier otro valor.
    pub fn alpha(n: u8) -> Option<Self> {
        const DIGITS: [KeyCode; 10] = [
            KeyCode::Alpha0,
            KeyCode::Alpha1,
            KeyCode::Alpha2,
            KeyCode::Alpha3,
            KeyCode::Alpha4,
            KeyCode::Alpha5,
            KeyCode::Alpha6,
            KeyCode::Alpha7,
            KeyCode::Alpha8,
            KeyCode::Alpha9,
        ];
        DIGITS.get(usize::from(n)).copied()
    }

    /// `true` si el código corresponde a un botón de mouse.
    pub fn is_mouse(self) -> bool {
        matches!(self, KeyCode::Mouse0 | KeyCode::Mouse1 | KeyCode::Mouse2)
    }
}

/// Estado normalizado de una tecla tal como lo reporta un backend.
///
/// - `Pressed`: la tecla bajó en este evento.
/// - `Active`: la tecla sigue abajo (autorepeat o mantenida).
/// - `Release`: la tecla subió.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyState {
    Pressed,
    Active,
    Release,
}

impl KeyState {
    /// `true` si la tecla está abajo en este estado.
    pub fn is_down(self) -> bool {
        !matches!(self, KeyState::Release)
    }
}

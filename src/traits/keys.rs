//! Traits de conversión entre teclas/estados nativos de un backend y los
//! tipos normalizados de [`keyboard`](crate::keyboard).
//!
//! # Convenciones de tipos genéricos
//!
//! - **`KeyExt<B, N>`**: Conversión de teclas
//!   - `B` = **B**ackend (tipo nativo del sistema o del backend usado)
//!   - `N` = **N**ormalized (tipo normalizado, normalmente [`KeyCode`](crate::KeyCode))
//!
//! - **`KeyStateExt<I, O>`**: Conversión de estados
//!   - `I` = **I**nput (estado externo/nativo)
//!   - `O` = **O**utput (estado normalizado, normalmente [`KeyState`](crate::KeyState))
//!
//! Estas conversiones son las que usa [`FrameInput::apply_backend`](crate::FrameInput::apply_backend)
//! para alimentar el estado de frame desde cualquier fuente de eventos.

/// Convierte entre códigos de tecla nativos de un backend (`B`) y un tipo
/// de tecla normalizado (`N`).
///
/// # Ejemplo: backend con códigos numéricos
/// ```rust
/// use orbit_input_commands::{KeyCode, KeyExt};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct ScanCode(u16);
///
/// impl KeyExt<ScanCode, KeyCode> for ScanCode {
///     fn from_backend_key(key: ScanCode) -> KeyCode {
///         match key.0 {
///             0x10 => KeyCode::Q,
///             0x1F => KeyCode::S,
///             _ => KeyCode::Unknown,
///         }
///     }
///
///     fn to_backend_key(code: KeyCode) -> ScanCode {
///         match code {
///             KeyCode::Q => ScanCode(0x10),
///             KeyCode::S => ScanCode(0x1F),
///             _ => ScanCode(0),
///         }
///     }
/// }
///
/// assert_eq!(ScanCode::from_backend_key(ScanCode(0x10)), KeyCode::Q);
/// ```
///
/// # Reglas de implementación
/// - Las conversiones deben ser **deterministas** y **simétricas** (cuando sea posible).
/// - Teclas sin equivalente se mapean a un valor centinela (`KeyCode::Unknown`).
pub trait KeyExt<B, N>
where
    B: Copy + PartialEq,
    N: Copy + PartialEq,
{
    /// Convierte una tecla del backend (`B`) a su representación normalizada (`N`).
    fn from_backend_key(key: B) -> N;

    /// Convierte una tecla normalizada (`N`) a su equivalente nativo del backend (`B`).
    fn to_backend_key(code: N) -> B;
}

/// Traduce entre estados de tecla nativos (`I`) y un estado normalizado (`O`).
///
/// # Ejemplo
/// ```rust
/// use orbit_input_commands::{KeyState, KeyStateExt};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct RawState(u8);
///
/// impl KeyStateExt<RawState, KeyState> for RawState {
///     fn from_external_state(state: RawState) -> KeyState {
///         match state.0 {
///             1 => KeyState::Pressed,
///             2 => KeyState::Active,
///             _ => KeyState::Release,
///         }
///     }
///
///     fn to_external_state(state: KeyState) -> RawState {
///         match state {
///             KeyState::Pressed => RawState(1),
///             KeyState::Active => RawState(2),
///             KeyState::Release => RawState(0),
///         }
///     }
/// }
///
/// assert_eq!(RawState::from_external_state(RawState(2)), KeyState::Active);
/// ```
pub trait KeyStateExt<I, O>
where
    I: Copy + PartialEq,
    O: Copy + PartialEq,
{
    /// Convierte un estado nativo del backend (`I`) a su representación interna (`O`).
    fn from_external_state(state: I) -> O;

    /// Convierte un estado interno (`O`) a su equivalente nativo del backend (`I`).
    fn to_external_state(state: O) -> I;
}

//! # Crate `orbit_input_commands`
//!
//! **Capa de comandos** para el sistema de input de **Orbit Engine**.
//!
//! Este crate asocia **comandos con nombre** a disparadores físicos (una tecla más un
//! modo de activación) y a la lógica del usuario. Una vez por frame, el game loop
//! llama a [`CommandDispatcher::tick`] y cada binding cuya condición se cumple se ejecuta.
//!
//! ---
//!
//! ## Conceptos
//!
//! ### 🎯 Bindings
//! Un binding une un nombre, una tecla, un [`TriggerMode`] y un callback:
//!
//! - **Sin parámetro** — `FnMut()`.
//! - **Con parámetro** — `FnMut(T)` más un generador `FnMut() -> T` que produce el
//!   argumento en cada disparo. Los bindings de tipos distintos viven en la misma
//!   tabla con el tipo borrado ([`ArgValue`]) y se recupera el tipo al invocar.
//!
//! ### ⏱️ Modos de activación
//! - [`TriggerMode::Pressed`] — flanco: solo el frame en que la tecla baja.
//! - [`TriggerMode::Released`] — flanco: solo el frame en que la tecla sube.
//! - [`TriggerMode::Held`] — nivel: todos los frames mientras está abajo.
//!
//! ### 🧱 Frontera de fallos
//! Un binding que hace panic, o cuyo generador produce un valor de tipo
//! incompatible, **nunca** interrumpe el tick: el fallo se registra con
//! `tracing::warn!` y se devuelve en el [`TickReport`].
//!
//! ---
//!
//! ## Ejemplo
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use orbit_input_commands::{
//!     CommandDispatcher, FrameInput, InputStateExt, KeyBindingsConfig, KeyCode, KeyState, TriggerMode,
//! };
//!
//! let config = KeyBindingsConfig::default();
//! let casts = Arc::new(Mutex::new(Vec::new()));
//!
//! let mut dispatcher = CommandDispatcher::new();
//! let log = Arc::clone(&casts);
//! dispatcher.register_param_command(
//!     "Cast",
//!     config.ability_hotkeys[0],
//!     TriggerMode::Pressed,
//!     move |target: u32| log.lock().unwrap().push(target),
//!     || 5,
//! );
//!
//! let mut input: FrameInput = FrameInput::new();
//! input.set_key(KeyCode::Q, KeyState::Pressed);
//! let report = dispatcher.tick(&input);
//! input.end_frame();
//!
//! assert!(report.is_clean());
//! assert_eq!(*casts.lock().unwrap(), vec![5]);
//! ```
//!
//! ---
//!
//! ## Primitiva de input
//!
//! El despachador no lee dispositivos: consulta cualquier tipo que implemente
//! [`InputStateExt`]. [`FrameInput`] es la implementación de referencia; los
//! backends propios traducen sus eventos con [`KeyExt`] y [`KeyStateExt`].
//!
//! ---
//!
//! ## Features
//!
//! - `std_lock` (por defecto): [`SharedDispatcher`] usa `std::sync::Mutex`.
//! - `parking_lot`: [`SharedDispatcher`] usa `parking_lot::Mutex`.
//!
//! ---
//!
//! ## Módulos
//!
//! - [`traits`]: Protocolo de la primitiva de input
//! - [`dispatch`]: Registro de bindings y loop de despacho
//! - [`keyboard`]: Teclas y estados normalizados
//! - [`frame`]: Estado de input por frame
//! - [`config`]: Perfil de teclas por defecto
//! - [`error`]: Errores del crate

pub mod config;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod keyboard;
pub mod traits;

pub use config::KeyBindingsConfig;
pub use dispatch::{ArgValue, CommandDispatcher, SharedDispatcher, TickReport, TriggerMode};
pub use error::{ConfigError, DispatchError};
pub use frame::FrameInput;
pub use keyboard::{KeyCode, KeyState};
pub use traits::{InputStateExt, KeyExt, KeyStateExt};

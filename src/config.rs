//! Configuración de teclas por defecto para un esquema de control tipo MOBA/RTS.
//!
//! El despachador nunca lee esta configuración: los sitios de registro toman
//! las teclas de aquí al crear sus bindings.
//!
//! ```rust
//! use orbit_input_commands::{CommandDispatcher, KeyBindingsConfig, TriggerMode};
//!
//! let config = KeyBindingsConfig::default();
//! let mut dispatcher = CommandDispatcher::new();
//! dispatcher.register_command("Stop", config.stop_key, TriggerMode::Pressed, || {});
//! for (slot, key) in config.ability_hotkeys.iter().enumerate() {
//!     dispatcher.register_param_command(format!("Ability{slot}"), *key, TriggerMode::Pressed, |_: usize| {}, move || slot);
//! }
//! assert_eq!(dispatcher.len(), 13);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::keyboard::KeyCode;

/// Teclas por defecto de un perfil de control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindingsConfig {
    /// Identificador del perfil.
    #[serde(default)]
    pub id: String,
    /// Selección de unidades.
    #[serde(default = "default_select_key")]
    pub select_key: KeyCode,
    /// Orden de movimiento.
    #[serde(default = "default_move_key")]
    pub move_key: KeyCode,
    /// Orden de detenerse.
    #[serde(default = "default_stop_key")]
    pub stop_key: KeyCode,
    /// Orden de mantener posición.
    #[serde(default = "default_hold_key")]
    pub hold_key: KeyCode,
    /// Atajos de habilidades, en orden de ranura.
    #[serde(default = "default_ability_hotkeys")]
    pub ability_hotkeys: Vec<KeyCode>,
    /// Atajos de grupos de control.
    #[serde(default = "default_control_group_keys")]
    pub control_group_keys: Vec<KeyCode>,
    /// Distancia mínima de arrastre para iniciar una selección por caja.
    #[serde(default = "default_min_selection_distance")]
    pub min_selection_distance: f32,
}

fn default_select_key() -> KeyCode {
    KeyCode::Mouse0
}

fn default_move_key() -> KeyCode {
    KeyCode::Mouse1
}

fn default_stop_key() -> KeyCode {
    KeyCode::S
}

fn default_hold_key() -> KeyCode {
    KeyCode::H
}

fn default_ability_hotkeys() -> Vec<KeyCode> {
    use KeyCode::*;
    vec![Q, W, E, R, D, F, G, Z, X, C, V, B]
}

fn default_control_group_keys() -> Vec<KeyCode> {
    vec![KeyCode::Alpha1, KeyCode::Alpha2, KeyCode::Alpha3]
}

fn default_min_selection_distance() -> f32 {
    10.0
}

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            select_key: default_select_key(),
            move_key: default_move_key(),
            stop_key: default_stop_key(),
            hold_key: default_hold_key(),
            ability_hotkeys: default_ability_hotkeys(),
            control_group_keys: default_control_group_keys(),
            min_selection_distance: default_min_selection_distance(),
        }
    }
}

impl KeyBindingsConfig {
    /// Carga y valida un perfil desde un archivo JSON.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parsea y valida un perfil JSON. Los campos ausentes toman su valor por defecto.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_selection_distance.is_finite() || self.min_selection_distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_selection_distance must be a finite non-negative number, got {}",
                self.min_selection_distance
            )));
        }
        Ok(())
    }

    /// Tecla de la ranura de habilidad `slot`, si existe.
    pub fn ability_hotkey(&self, slot: usize) -> Option<KeyCode> {
        self.ability_hotkeys.get(slot).copied()
    }

    /// Tecla del grupo de control `group`, si existe.
    pub fn control_group_key(&self, group: usize) -> Option<KeyCode> {
        self.control_group_keys.get(group).copied()
    }
}

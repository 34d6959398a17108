//! Bindings almacenados por el registro.
//!
//! Los bindings con parámetro guardan su callback y su generador detrás de
//! closures que solo conocen [`ArgValue`]; el tipo concreto del argumento
//! queda fijado al registrar y se comprueba dinámicamente al invocar.

use std::any::{Any, TypeId, type_name};
use std::fmt;

use super::TriggerMode;

/// Valor de argumento con el tipo borrado.
///
/// Conserva el nombre del tipo original para poder reportar
/// incompatibilidades con un mensaje útil.
pub struct ArgValue {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl ArgValue {
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Nombre del tipo concreto contenido.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `true` si el valor contenido es de tipo `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Recupera el valor concreto, o devuelve `self` intacto si el tipo no coincide.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        match self.value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Self { value, type_name }),
        }
    }
}

impl fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgValue").field("type", &self.type_name).finish_non_exhaustive()
    }
}

pub(crate) type Callback = Box<dyn FnMut() + Send>;
type ErasedCallback = Box<dyn FnMut(ArgValue) -> Result<(), ArgValue> + Send>;
type ErasedGenerator = Box<dyn FnMut() -> ArgValue + Send>;

/// Binding sin parámetro.
pub(crate) struct Binding<K> {
    pub(crate) key: K,
    pub(crate) mode: TriggerMode,
    callback: Callback,
}

impl<K> Binding<K> {
    pub(crate) fn new(key: K, mode: TriggerMode, callback: Callback) -> Self {
        Self { key, mode, callback }
    }

    pub(crate) fn invoke(&mut self) {
        (self.callback)();
    }
}

/// Binding con un parámetro de tipo borrado.
pub(crate) struct ParamBinding<K> {
    pub(crate) key: K,
    pub(crate) mode: TriggerMode,
    arg_type: TypeId,
    arg_type_name: &'static str,
    callback: ErasedCallback,
    generator: ErasedGenerator,
}

impl<K> ParamBinding<K> {
    /// Encapsula `callback` y `generator` cerrando sobre el tipo `T`.
    ///
    /// El generador ya produce [`ArgValue`]; los generadores tipados se
    /// envuelven antes de llegar aquí.
    pub(crate) fn new<T, F, G>(key: K, mode: TriggerMode, mut callback: F, generator: G) -> Self
    where
        T: Any + Send,
        F: FnMut(T) + Send + 'static,
        G: FnMut() -> ArgValue + Send + 'static,
    {
        let callback = move |arg: ArgValue| -> Result<(), ArgValue> {
            let value = arg.downcast::<T>()?;
            callback(value);
            Ok(())
        };
        Self {
            key,
            mode,
            arg_type: TypeId::of::<T>(),
            arg_type_name: type_name::<T>(),
            callback: Box::new(callback),
            generator: Box::new(generator),
        }
    }

    pub(crate) fn accepts<T: Any>(&self) -> bool {
        self.arg_type == TypeId::of::<T>()
    }

    pub(crate) fn arg_type_name(&self) -> &'static str {
        self.arg_type_name
    }

    /// Llama al generador y pasa su resultado al callback.
    ///
    /// Devuelve el valor generado si su tipo no es el que espera el callback.
    pub(crate) fn invoke_generated(&mut self) -> Result<(), ArgValue> {
        let arg = (self.generator)();
        (self.callback)(arg)
    }

    pub(crate) fn invoke_with(&mut self, arg: ArgValue) -> Result<(), ArgValue> {
        (self.callback)(arg)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::KeyCode;

    #[test]
    fn arg_value_downcast_roundtrip_and_mismatch() {
        let arg = ArgValue::new(5_i32);
        assert!(arg.is::<i32>());
        assert_eq!(arg.type_name(), "i32");

        let arg = arg.downcast::<String>().unwrap_err();
        assert_eq!(arg.type_name(), "i32");
        assert_eq!(arg.downcast::<i32>().unwrap(), 5);
    }

    #[test]
    fn param_binding_rejects_foreign_value() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut binding = ParamBinding::new(
            KeyCode::Q,
            TriggerMode::Pressed,
            move |v: i32| sink.lock().unwrap().push(v),
            || ArgValue::new("not a number"),
        );

        assert!(binding.accepts::<i32>());
        assert!(!binding.accepts::<&str>());
        assert_eq!(binding.arg_type_name(), "i32");

        let rejected = binding.invoke_generated().unwrap_err();
        assert_eq!(rejected.type_name(), "&str");
        assert!(seen.lock().unwrap().is_empty());

        binding.invoke_with(ArgValue::new(7_i32)).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }
}

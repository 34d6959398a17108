use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, trace, warn};

use super::binding::{ArgValue, Binding, ParamBinding};
use super::TriggerMode;
use crate::error::DispatchError;
use crate::keyboard::KeyCode;
use crate::traits::InputStateExt;

/// Resultado de un [`tick`](CommandDispatcher::tick).
#[derive(Debug, Default)]
pub struct TickReport {
    /// Callbacks que se ejecutaron hasta el final.
    pub fired: usize,
    /// Fallos capturados en la frontera de cada binding.
    pub failures: Vec<DispatchError>,
}

impl TickReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// # `CommandDispatcher`
///
/// Registro de comandos con nombre y loop de despacho por tick.
///
/// Cada comando asocia un nombre con una tecla, un [`TriggerMode`] y un
/// callback. Hay dos espacios de nombres independientes:
///
/// - **sin parámetro**: `FnMut()`.
/// - **con parámetro**: `FnMut(T)` más un generador que produce el `T` en
///   cada disparo. Se almacenan con el tipo borrado, de modo que bindings de
///   tipos distintos conviven en la misma tabla.
///
/// Un mismo nombre puede existir en ambos espacios a la vez; son bindings
/// independientes. [`is_registered`](Self::is_registered) solo consulta el
/// espacio sin parámetro.
///
/// ## Políticas
/// - Registrar un nombre existente **reemplaza** el binding completo y emite
///   un `warn!`. La última registración gana.
/// - Nombres inexistentes son un no-op en `unregister_*` y `execute_*`.
/// - Un fallo dentro de un binding (panic, o tipo incompatible entre
///   generador y callback) nunca sale de [`tick`](Self::tick): se registra
///   como `warn!` y se devuelve en el [`TickReport`].
/// - Capturar un panic no silencia el panic hook del proceso: el hook por
///   defecto sigue escribiendo en stderr (con backtrace si `RUST_BACKTRACE`
///   está activo) en cada tick en que el binding falla. Un binding `Held`
///   que falla lo hace en cada frame. El host que quiera una salida limpia
///   instala su propio hook con [`std::panic::set_hook`].
///
/// ## Ejemplo
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use orbit_input_commands::{CommandDispatcher, FrameInput, InputStateExt, KeyCode, KeyState, TriggerMode};
///
/// let fired = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&fired);
///
/// let mut dispatcher = CommandDispatcher::new();
/// dispatcher.register_command("Fire", KeyCode::F, TriggerMode::Pressed, move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// let mut input: FrameInput = FrameInput::new();
/// input.set_key(KeyCode::F, KeyState::Pressed);
/// dispatcher.tick(&input);
/// assert_eq!(fired.load(Ordering::SeqCst), 1);
/// ```
pub struct CommandDispatcher<K = KeyCode> {
    commands: HashMap<String, Binding<K>>,
    param_commands: HashMap<String, ParamBinding<K>>,
}

impl<K> Default for CommandDispatcher<K> {
    fn default() -> Self {
        Self {
            commands: HashMap::new(),
            param_commands: HashMap::new(),
        }
    }
}

impl<K> CommandDispatcher<K>
where
    K: Copy + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== REGISTRO ====================

    /// Registra un comando sin parámetro.
    ///
    /// Si `name` ya existía en el espacio sin parámetro, se reemplaza
    /// (tecla, modo y callback) y se emite una advertencia.
    pub fn register_command<F>(
        &mut self,
        name: impl Into<String>,
        key: K,
        mode: TriggerMode,
        callback: F,
    ) where
        F: FnMut() + Send + 'static,
    {
        let name = name.into();
        let binding = Binding::new(key, mode, Box::new(callback));
        if self.commands.insert(name.clone(), binding).is_some() {
            warn!(command = %name, "command already registered, overwriting");
        } else {
            debug!(command = %name, ?key, ?mode, "command registered");
        }
    }

    /// Registra un comando con un parámetro de tipo `T`.
    ///
    /// `generator` se invoca en cada disparo de [`tick`](Self::tick) y su
    /// resultado se pasa a `callback`. Misma política de sobrescritura que
    /// [`register_command`](Self::register_command), limitada al espacio con
    /// parámetro.
    pub fn register_param_command<T, F, G>(
        &mut self,
        name: impl Into<String>,
        key: K,
        mode: TriggerMode,
        callback: F,
        mut generator: G,
    ) where
        T: Any + Send,
        F: FnMut(T) + Send + 'static,
        G: FnMut() -> T + Send + 'static,
    {
        let binding = ParamBinding::new(key, mode, callback, move || ArgValue::new(generator()));
        self.insert_param(name.into(), binding);
    }

    /// Registra un comando con parámetro cuyo generador produce un valor de
    /// tipo conocido solo en tiempo de ejecución (scripts, configuración).
    ///
    /// No se comprueba nada al registrar: si el generador produce algo que no
    /// es `T`, cada disparo en [`tick`](Self::tick) falla con
    /// [`DispatchError::TypeMismatch`] sin invocar el callback.
    pub fn register_dyn_command<T, F, G>(
        &mut self,
        name: impl Into<String>,
        key: K,
        mode: TriggerMode,
        callback: F,
        generator: G,
    ) where
        T: Any + Send,
        F: FnMut(T) + Send + 'static,
        G: FnMut() -> ArgValue + Send + 'static,
    {
        let binding = ParamBinding::new(key, mode, callback, generator);
        self.insert_param(name.into(), binding);
    }

    fn insert_param(&mut self, name: String, binding: ParamBinding<K>) {
        let (key, mode, arg) = (binding.key, binding.mode, binding.arg_type_name());
        if self.param_commands.insert(name.clone(), binding).is_some() {
            warn!(command = %name, "parameterized command already registered, overwriting");
        } else {
            debug!(command = %name, ?key, ?mode, arg, "parameterized command registered");
        }
    }

    /// Elimina `name` de ambos espacios. Idempotente.
    pub fn unregister_command(&mut self, name: &str) {
        let removed = self.commands.remove(name).is_some() | self.param_commands.remove(name).is_some();
        if removed {
            debug!(command = %name, "command unregistered");
        }
    }

    /// Aplica [`unregister_command`](Self::unregister_command) a cada nombre.
    pub fn unregister_commands<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.unregister_command(name.as_ref());
        }
    }

    /// `true` si `name` existe en el espacio **sin parámetro**.
    ///
    /// Los comandos con parámetro no se consideran; para ellos usar
    /// [`is_param_registered`](Self::is_param_registered).
    pub fn is_registered(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn is_param_registered(&self, name: &str) -> bool {
        self.param_commands.contains_key(name)
    }

    /// Total de bindings en ambos espacios.
    pub fn len(&self) -> usize {
        self.commands.len() + self.param_commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.param_commands.is_empty()
    }

    /// Nombres registrados, sin orden garantizado. Un nombre presente en
    /// ambos espacios aparece dos veces.
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().chain(self.param_commands.keys()).map(String::as_str)
    }

    /// Elimina todos los bindings.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.param_commands.clear();
    }

    // ==================== DESPACHO ====================

    /// Evalúa cada binding una vez contra `input` e invoca los que cumplen
    /// su condición de disparo.
    ///
    /// Cada invocación corre dentro de su propia frontera de fallos: un
    /// panic o una incompatibilidad de tipos se registra y se reporta, y el
    /// resto de bindings se evalúa normalmente.
    pub fn tick<S, I>(&mut self, input: &I) -> TickReport
    where
        S: Copy + PartialEq,
        I: InputStateExt<K, S> + ?Sized,
    {
        let mut report = TickReport::default();

        for (name, binding) in &mut self.commands {
            if !binding.mode.evaluate(input, binding.key) {
                continue;
            }
            trace!(command = %name, "command triggered");
            match panic::catch_unwind(AssertUnwindSafe(|| binding.invoke())) {
                Ok(()) => report.fired += 1,
                Err(payload) => report.fail(DispatchError::Panicked {
                    command: name.clone(),
                    message: panic_message(payload.as_ref()),
                }),
            }
        }

        for (name, binding) in &mut self.param_commands {
            if !binding.mode.evaluate(input, binding.key) {
                continue;
            }
            trace!(command = %name, "parameterized command triggered");
            match panic::catch_unwind(AssertUnwindSafe(|| binding.invoke_generated())) {
                Ok(Ok(())) => report.fired += 1,
                Ok(Err(rejected)) => report.fail(DispatchError::TypeMismatch {
                    command: name.clone(),
                    expected: binding.arg_type_name(),
                    found: rejected.type_name().to_owned(),
                }),
                Err(payload) => report.fail(DispatchError::Panicked {
                    command: name.clone(),
                    message: panic_message(payload.as_ref()),
                }),
            }
        }

        report
    }

    /// Invoca explícitamente el comando sin parámetro `name`, solo si su
    /// condición de disparo se cumple ahora.
    ///
    /// Devuelve `true` si el callback se ejecutó. Un nombre inexistente o una
    /// condición falsa no hacen nada.
    pub fn execute_command<S, I>(&mut self, name: &str, input: &I) -> bool
    where
        S: Copy + PartialEq,
        I: InputStateExt<K, S> + ?Sized,
    {
        match self.commands.get_mut(name) {
            Some(binding) if binding.mode.evaluate(input, binding.key) => {
                binding.invoke();
                true
            }
            _ => false,
        }
    }

    /// Invoca explícitamente el comando con parámetro `name` usando `value`
    /// en lugar del generador.
    ///
    /// Solo invoca si la condición de disparo se cumple **y** el callback
    /// acepta exactamente `T`. A diferencia de [`tick`](Self::tick), una
    /// incompatibilidad de tipos aquí es silenciosa: no se registra nada.
    pub fn execute_param_command<T, S, I>(&mut self, name: &str, value: T, input: &I) -> bool
    where
        T: Any + Send,
        S: Copy + PartialEq,
        I: InputStateExt<K, S> + ?Sized,
    {
        match self.param_commands.get_mut(name) {
            Some(binding) if binding.mode.evaluate(input, binding.key) && binding.accepts::<T>() => {
                binding.invoke_with(ArgValue::new(value)).is_ok()
            }
            _ => false,
        }
    }
}

impl TickReport {
    fn fail(&mut self, error: DispatchError) {
        warn!(command = %error.command(), %error, "command failed");
        self.failures.push(error);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{FrameInput, KeyState};

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn pressed(key: KeyCode) -> FrameInput {
        let mut input: FrameInput = FrameInput::new();
        input.set_key(key, KeyState::Pressed);
        input
    }

    #[test]
    fn register_and_query() {
        let mut d = CommandDispatcher::new();
        assert!(d.is_empty());

        d.register_command("Stop", KeyCode::S, TriggerMode::Pressed, || {});
        d.register_param_command("Cast", KeyCode::Q, TriggerMode::Pressed, |_: i32| {}, || 5);

        assert!(d.is_registered("Stop"));
        assert!(!d.is_registered("Cast"));
        assert!(d.is_param_registered("Cast"));
        assert_eq!(d.len(), 2);

        let mut names: Vec<_> = d.command_names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["Cast", "Stop"]);
    }

    #[test]
    fn duplicate_registration_replaces_whole_binding() {
        let (first, cb1) = counter();
        let (second, cb2) = counter();
        let mut d = CommandDispatcher::new();
        d.register_command("Fire", KeyCode::F, TriggerMode::Pressed, cb1);
        d.register_command("Fire", KeyCode::G, TriggerMode::Held, cb2);
        assert_eq!(d.len(), 1);

        d.tick(&pressed(KeyCode::F));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 0);

        d.tick(&pressed(KeyCode::G));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unregister_removes_both_namespaces_and_is_idempotent() {
        let (count, cb) = counter();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&hits);

        let mut d = CommandDispatcher::new();
        d.register_command("Dual", KeyCode::D, TriggerMode::Pressed, cb);
        d.register_param_command(
            "Dual",
            KeyCode::D,
            TriggerMode::Pressed,
            move |v: u8| sink.lock().unwrap().push(v),
            || 1,
        );
        assert_eq!(d.len(), 2);

        d.unregister_command("Dual");
        d.unregister_command("Dual");
        assert!(d.is_empty());

        let report = d.tick(&pressed(KeyCode::D));
        assert_eq!(report.fired, 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(hits.lock().unwrap().is_empty());
    }

    #[test]
    fn unregister_batch() {
        let mut d = CommandDispatcher::new();
        for name in ["A", "B", "C"] {
            d.register_command(name, KeyCode::A, TriggerMode::Held, || {});
        }
        d.unregister_commands(["A", "C", "missing"]);
        assert!(!d.is_registered("A"));
        assert!(d.is_registered("B"));
        assert!(!d.is_registered("C"));

        d.unregister_commands(vec![String::from("B")]);
        assert!(d.is_empty());
    }

    #[test]
    fn same_name_in_both_namespaces_fires_twice() {
        let (count, cb) = counter();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&hits);

        let mut d = CommandDispatcher::new();
        d.register_command("Attack", KeyCode::A, TriggerMode::Pressed, cb);
        d.register_param_command(
            "Attack",
            KeyCode::A,
            TriggerMode::Pressed,
            move |s: String| sink.lock().unwrap().push(s),
            || "target".to_string(),
        );

        let report = d.tick(&pressed(KeyCode::A));
        assert_eq!(report.fired, 2);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(*hits.lock().unwrap(), vec!["target".to_string()]);
    }

    #[test]
    fn type_mismatch_is_reported_and_isolated() {
        let (count, cb) = counter();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&hits);

        let mut d = CommandDispatcher::new();
        d.register_command("Ok", KeyCode::Q, TriggerMode::Pressed, cb);
        d.register_dyn_command(
            "Broken",
            KeyCode::Q,
            TriggerMode::Pressed,
            move |v: i32| sink.lock().unwrap().push(v),
            || ArgValue::new(2.5_f32),
        );

        let report = d.tick(&pressed(KeyCode::Q));
        assert_eq!(report.fired, 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(hits.lock().unwrap().is_empty());
        assert_eq!(
            report.failures,
            vec![DispatchError::TypeMismatch {
                command: "Broken".into(),
                expected: "i32",
                found: "f32".into(),
            }]
        );
    }

    #[test]
    fn panicking_callbacks_do_not_abort_tick() {
        let (count, cb) = counter();
        let mut d = CommandDispatcher::new();
        d.register_command("Boom", KeyCode::B, TriggerMode::Held, || panic!("kaboom"));
        d.register_param_command(
            "BoomGen",
            KeyCode::B,
            TriggerMode::Held,
            |_: u32| {},
            || -> u32 { panic!("bad generator") },
        );
        d.register_command("Fine", KeyCode::B, TriggerMode::Held, cb);

        let input = pressed(KeyCode::B);
        for _ in 0..2 {
            let report = d.tick(&input);
            assert_eq!(report.fired, 1);
            assert_eq!(report.failures.len(), 2);
        }
        assert_eq!(count.load(Ordering::SeqCst), 2);

        let report = d.tick(&input);
        let mut messages: Vec<_> = report.failures.iter().map(ToString::to_string).collect();
        messages.sort();
        assert_eq!(
            messages,
            vec![
                "command 'Boom' panicked: kaboom".to_string(),
                "command 'BoomGen' panicked: bad generator".to_string(),
            ]
        );
    }

    #[test]
    fn execute_command_respects_trigger_condition() {
        let (count, cb) = counter();
        let mut d = CommandDispatcher::new();
        d.register_command("Stop", KeyCode::S, TriggerMode::Pressed, cb);

        let idle: FrameInput = FrameInput::new();
        assert!(!d.execute_command("Stop", &idle));
        assert!(!d.execute_command("Missing", &pressed(KeyCode::S)));
        assert!(d.execute_command("Stop", &pressed(KeyCode::S)));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn execute_param_command_checks_type_and_skips_generator() {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&hits);
        let generated = Arc::new(AtomicUsize::new(0));
        let gen_count = Arc::clone(&generated);

        let mut d = CommandDispatcher::new();
        d.register_param_command(
            "Cast",
            KeyCode::Q,
            TriggerMode::Pressed,
            move |v: i32| sink.lock().unwrap().push(v),
            move || {
                gen_count.fetch_add(1, Ordering::SeqCst);
                5
            },
        );

        let input = pressed(KeyCode::Q);
        assert!(d.execute_param_command("Cast", 42_i32, &input));
        assert!(!d.execute_param_command("Cast", 42_i64, &input));
        assert!(!d.execute_param_command("Cast", "42", &input));
        assert!(!d.execute_param_command("Nope", 1_i32, &input));
        let idle: FrameInput = FrameInput::new();
        assert!(!d.execute_param_command("Cast", 1_i32, &idle));

        assert_eq!(*hits.lock().unwrap(), vec![42]);
        assert_eq!(generated.load(Ordering::SeqCst), 0);
    }
}

//! Despachador compartido entre hilos.
//!
//! [`CommandDispatcher`] no tiene concurrencia interna y se muta con
//! `&mut self`. Cuando el registro se hace desde un hilo distinto al que
//! llama a `tick`, [`SharedDispatcher`] lo envuelve en un lock exclusivo:
//!
//! - feature `std_lock` (por defecto): `std::sync::Mutex`.
//! - feature `parking_lot`: `parking_lot::Mutex` (tiene prioridad si ambos
//!   features están activos).
//!
//! Los callbacks se ejecutan con el lock tomado: llamar al mismo
//! `SharedDispatcher` desde dentro de un callback bloquea el hilo.

use std::any::Any;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use super::{ArgValue, CommandDispatcher, TickReport, TriggerMode};
use crate::keyboard::KeyCode;
use crate::traits::InputStateExt;

#[cfg(feature = "parking_lot")]
type Lock<T> = parking_lot::Mutex<T>;

#[cfg(not(feature = "parking_lot"))]
type Lock<T> = std::sync::Mutex<T>;

/// [`CommandDispatcher`] detrás de `Arc<Mutex<_>>`.
///
/// Clonar un `SharedDispatcher` comparte el mismo registro.
pub struct SharedDispatcher<K = KeyCode> {
    inner: Arc<Lock<CommandDispatcher<K>>>,
}

impl<K> Clone for SharedDispatcher<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> Default for SharedDispatcher<K> {
    fn default() -> Self {
        Self::from(CommandDispatcher::default())
    }
}

impl<K> From<CommandDispatcher<K>> for SharedDispatcher<K> {
    fn from(dispatcher: CommandDispatcher<K>) -> Self {
        Self {
            inner: Arc::new(Lock::new(dispatcher)),
        }
    }
}

impl<K> SharedDispatcher<K>
where
    K: Copy + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Ejecuta `f` con acceso exclusivo al despachador.
    ///
    /// El lock no es reentrante. Llamar a este mismo `SharedDispatcher`
    /// desde dentro de `f` bloquea el hilo para siempre.
    pub fn with<R>(&self, f: impl FnOnce(&mut CommandDispatcher<K>) -> R) -> R {
        #[cfg(feature = "parking_lot")]
        let mut guard = self.inner.lock();

        // El registro sigue consistente tras un panic con el lock tomado.
        #[cfg(not(feature = "parking_lot"))]
        let mut guard = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        f(&mut *guard)
    }

    pub fn register_command<F>(
        &self,
        name: impl Into<String>,
        key: K,
        mode: TriggerMode,
        callback: F,
    ) where
        F: FnMut() + Send + 'static,
    {
        self.with(|d| d.register_command(name, key, mode, callback));
    }

    pub fn register_param_command<T, F, G>(
        &self,
        name: impl Into<String>,
        key: K,
        mode: TriggerMode,
        callback: F,
        generator: G,
    ) where
        T: Any + Send,
        F: FnMut(T) + Send + 'static,
        G: FnMut() -> T + Send + 'static,
    {
        self.with(|d| d.register_param_command(name, key, mode, callback, generator));
    }

    pub fn register_dyn_command<T, F, G>(
        &self,
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
        self.with(|d| d.register_dyn_command(name, key, mode, callback, generator));
    }

    pub fn unregister_command(&self, name: &str) {
        self.with(|d| d.unregister_command(name));
    }

    pub fn unregister_commands<I>(&self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.with(|d| d.unregister_commands(names));
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.with(|d| d.is_registered(name))
    }

    /// Evalúa todos los bindings, ver [`CommandDispatcher::tick`].
    ///
    /// Los callbacks corren con el lock tomado. Un callback que llama a este
    /// mismo `SharedDispatcher` (por ejemplo, un comando de un solo uso que
    /// se desregistra a sí mismo) bloquea el hilo para siempre. El callback
    /// debe marcar el cambio y el host aplicarlo cuando `tick` retorna.
    pub fn tick<S, I>(&self, input: &I) -> TickReport
    where
        S: Copy + PartialEq,
        I: InputStateExt<K, S> + ?Sized,
    {
        self.with(|d| d.tick(input))
    }

    pub fn execute_command<S, I>(&self, name: &str, input: &I) -> bool
    where
        S: Copy + PartialEq,
        I: InputStateExt<K, S> + ?Sized,
    {
        self.with(|d| d.execute_command(name, input))
    }

    pub fn execute_param_command<T, S, I>(&self, name: &str, value: T, input: &I) -> bool
    where
        T: Any + Send,
        S: Copy + PartialEq,
        I: InputStateExt<K, S> + ?Sized,
    {
        self.with(|d| d.execute_param_command(name, value, input))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::thread;

    use super::*;
    use crate::{FrameInput, KeyState};

    #[test]
    fn registration_from_another_thread_is_visible_to_tick() {
        let shared: SharedDispatcher = SharedDispatcher::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let handle = {
            let shared = shared.clone();
            let fired = Arc::clone(&fired);
            thread::spawn(move || {
                shared.register_command("Hold", KeyCode::H, TriggerMode::Held, move || {
                    fired.fetch_add(1, Ordering::SeqCst);
                });
            })
        };
        handle.join().unwrap();
        assert!(shared.is_registered("Hold"));

        let mut input: FrameInput = FrameInput::new();
        input.set_key(KeyCode::H, KeyState::Pressed);
        let report = shared.tick(&input);
        assert_eq!(report.fired, 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        shared.unregister_commands(["Hold"]);
        assert_eq!(shared.tick(&input).fired, 0);
    }

    #[test]
    fn shared_param_paths() {
        let shared: SharedDispatcher = SharedDispatcher::new();
        let total = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&total);
        shared.register_param_command(
            "Group",
            KeyCode::Alpha1,
            TriggerMode::Pressed,
            move |n: usize| {
                sink.fetch_add(n, Ordering::SeqCst);
            },
            || 1_usize,
        );

        let mut input: FrameInput = FrameInput::new();
        input.set_key(KeyCode::Alpha1, KeyState::Pressed);
        assert!(shared.execute_param_command("Group", 10_usize, &input));
        assert!(!shared.execute_command("Group", &input));
        shared.tick(&input);
        assert_eq!(total.load(Ordering::SeqCst), 11);
        assert_eq!(shared.with(|d| d.len()), 1);

        shared.unregister_command("Group");
        assert_eq!(shared.with(|d| d.len()), 0);
    }

    #[test]
    fn one_shot_command_is_unregistered_after_tick() {
        let shared: SharedDispatcher = SharedDispatcher::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let done = Arc::new(AtomicBool::new(false));
        {
            let fired = Arc::clone(&fired);
            let done = Arc::clone(&done);
            shared.register_command("Once", KeyCode::E, TriggerMode::Held, move || {
                fired.fetch_add(1, Ordering::SeqCst);
                done.store(true, Ordering::SeqCst);
            });
        }

        let mut input: FrameInput = FrameInput::new();
        input.set_key(KeyCode::E, KeyState::Pressed);
        for _ in 0..2 {
            shared.tick(&input);
            if done.swap(false, Ordering::SeqCst) {
                shared.unregister_command("Once");
            }
            input.end_frame();
        }

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!shared.is_registered("Once"));
    }
}

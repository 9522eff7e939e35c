//! Global keyboard shortcuts.
//!
//! A shortcut maps a key chord (key plus exact modifier set) to a
//! callback, matched against every key press independently of focus.
//! Re-registering a chord replaces the previous entry. A chord registered
//! as *strong* fires even while the focused control overrides shortcut
//! handling (the escape hatch for things like a global quit chord against
//! a text input that captures Ctrl+C).

use std::collections::HashMap;

use casement_core::logging::targets;

use super::events::{Key, KeyboardModifiers};

/// A key plus the exact modifier set that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// The primary key.
    pub key: Key,
    /// The modifiers that must match exactly.
    pub modifiers: KeyboardModifiers,
}

impl KeyChord {
    /// Create a chord from a key and modifiers.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self { key, modifiers }
    }

    /// A bare key with no modifiers.
    pub fn key_only(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::NONE)
    }

    /// A Ctrl+key chord.
    pub fn ctrl(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::CTRL)
    }

    /// A Ctrl+Shift+key chord.
    pub fn ctrl_shift(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::CTRL_SHIFT)
    }

    /// Whether this chord matches a key press. Modifiers must match
    /// exactly; Ctrl+S does not fire on Ctrl+Shift+S.
    pub fn matches(&self, key: Key, modifiers: KeyboardModifiers) -> bool {
        self.key == key && self.modifiers == modifiers
    }
}

struct ShortcutEntry {
    strong: bool,
    callback: Box<dyn FnMut()>,
}

/// The chord-to-callback table of one GUI root.
#[derive(Default)]
pub struct ShortcutMap {
    entries: HashMap<KeyChord, ShortcutEntry>,
}

impl ShortcutMap {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for a chord, replacing any existing entry.
    ///
    /// `strong` shortcuts fire even when the focused control overrides
    /// shortcut handling.
    pub fn register<F>(&mut self, chord: KeyChord, strong: bool, callback: F)
    where
        F: FnMut() + 'static,
    {
        let replaced = self
            .entries
            .insert(
                chord,
                ShortcutEntry {
                    strong,
                    callback: Box::new(callback),
                },
            )
            .is_some();
        tracing::trace!(target: targets::SHORTCUT, ?chord, strong, replaced, "shortcut registered");
    }

    /// Remove a chord. Returns `false` if it was never registered.
    pub fn unregister(&mut self, chord: KeyChord) -> bool {
        let removed = self.entries.remove(&chord).is_some();
        if !removed {
            tracing::warn!(target: targets::SHORTCUT, ?chord, "unregister of unknown chord");
        }
        removed
    }

    /// Whether a chord is registered.
    pub fn contains(&self, chord: KeyChord) -> bool {
        self.entries.contains_key(&chord)
    }

    /// Number of registered chords.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Match a key press against the table and fire the callback.
    ///
    /// With `only_strong` set (the focused control overrides shortcuts),
    /// weak entries are passed over. Returns whether a callback fired.
    pub fn dispatch(&mut self, key: Key, modifiers: KeyboardModifiers, only_strong: bool) -> bool {
        let chord = KeyChord::new(key, modifiers);
        match self.entries.get_mut(&chord) {
            Some(entry) if entry.strong || !only_strong => {
                (entry.callback)();
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for ShortcutMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcutMap")
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn chord_requires_exact_modifiers() {
        let chord = KeyChord::ctrl(Key::S);
        assert!(chord.matches(Key::S, KeyboardModifiers::CTRL));
        assert!(!chord.matches(Key::S, KeyboardModifiers::CTRL_SHIFT));
        assert!(!chord.matches(Key::S, KeyboardModifiers::NONE));
        assert!(!chord.matches(Key::A, KeyboardModifiers::CTRL));
    }

    #[test]
    fn dispatch_fires_matching_entry() {
        let mut map = ShortcutMap::new();
        let fired = Rc::new(Cell::new(0));

        let f = Rc::clone(&fired);
        map.register(KeyChord::ctrl(Key::S), false, move || f.set(f.get() + 1));

        assert!(map.dispatch(Key::S, KeyboardModifiers::CTRL, false));
        assert!(!map.dispatch(Key::S, KeyboardModifiers::NONE, false));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn reregistration_replaces() {
        let mut map = ShortcutMap::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let f = Rc::clone(&first);
        map.register(KeyChord::ctrl(Key::S), false, move || f.set(f.get() + 1));
        let s = Rc::clone(&second);
        map.register(KeyChord::ctrl(Key::S), false, move || s.set(s.get() + 1));

        assert_eq!(map.len(), 1);
        map.dispatch(Key::S, KeyboardModifiers::CTRL, false);
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn unregister_unknown_chord_fails() {
        let mut map = ShortcutMap::new();
        assert!(!map.unregister(KeyChord::key_only(Key::F5)));

        map.register(KeyChord::key_only(Key::F5), false, || {});
        assert!(map.unregister(KeyChord::key_only(Key::F5)));
        assert!(!map.unregister(KeyChord::key_only(Key::F5)));
    }

    #[test]
    fn override_suppresses_weak_but_not_strong() {
        let mut map = ShortcutMap::new();
        let weak = Rc::new(Cell::new(0));
        let strong = Rc::new(Cell::new(0));

        let w = Rc::clone(&weak);
        map.register(KeyChord::ctrl(Key::C), false, move || w.set(w.get() + 1));
        let s = Rc::clone(&strong);
        map.register(KeyChord::ctrl(Key::Q), true, move || s.set(s.get() + 1));

        // Focused control overrides shortcuts: weak chord is passed over.
        assert!(!map.dispatch(Key::C, KeyboardModifiers::CTRL, true));
        assert!(map.dispatch(Key::Q, KeyboardModifiers::CTRL, true));
        assert_eq!(weak.get(), 0);
        assert_eq!(strong.get(), 1);
    }
}

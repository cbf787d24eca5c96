//! Composition state store
//!
//! Owns the current composition for one editing session. Every change
//! replaces the whole value at once, so a reader never observes a
//! half-applied mutation.

use super::composition::Composition;

/// Session-owned holder of the current composition
#[derive(Debug, Clone, Default)]
pub struct CompositionStore {
    /// Current composition
    current: Composition,
    /// Bumped on every change
    revision: u64,
}

impl CompositionStore {
    /// Create a store holding `initial`
    pub fn new(initial: Composition) -> Self {
        Self {
            current: initial,
            revision: 0,
        }
    }

    /// Get the current composition
    pub fn get(&self) -> &Composition {
        &self.current
    }

    /// Replace the composition with `updater(current)`
    ///
    /// Returns whether the value changed. The revision only advances when
    /// it did.
    pub fn set(&mut self, updater: impl FnOnce(&Composition) -> Composition) -> bool {
        let next = updater(&self.current);
        if next == self.current {
            return false;
        }

        self.current = next;
        self.revision += 1;
        true
    }

    /// Number of changes applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Take ownership of the final composition
    pub fn into_inner(self) -> Composition {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comp::composition::Build;

    #[test]
    fn test_set_replaces_value() {
        let mut store = CompositionStore::default();
        let changed = store.set(|comp| comp.update(&"pos1".into(), |_| Build::with_character("1")));

        assert!(changed);
        assert_eq!(store.revision(), 1);
        assert!(store.get().get(&"pos1".into()).unwrap().is_occupied());
    }

    #[test]
    fn test_unchanged_set_keeps_revision() {
        let mut store = CompositionStore::default();
        assert!(!store.set(|comp| comp.clone()));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_into_inner() {
        let initial = Composition::default().update(&"pos2".into(), |_| Build::with_character("2"));
        let store = CompositionStore::new(initial.clone());
        assert_eq!(store.into_inner(), initial);
    }
}

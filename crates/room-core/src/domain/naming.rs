//! Default-name allocation for doors and windows.
//!
//! Doors and windows share one flat namespace with furniture.  Each category
//! keeps its own monotonically increasing counter; a candidate that is already
//! taken is skipped by probing the next number, so allocation never fails.
//! Counters are never rewound by deletions, only by [`NameAllocator::reset`]
//! (new room / load).

use tracing::debug;

use crate::domain::entities::OpeningKind;

/// Per-category counters for `"Door {n}"` / `"Window {n}"` names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameAllocator {
    door: u32,
    window: u32,
}

impl NameAllocator {
    /// Creates an allocator with both counters at 1.
    pub fn new() -> Self {
        Self { door: 1, window: 1 }
    }

    /// Returns the first free name for `kind` without consuming it.
    ///
    /// Taken numbers are skipped permanently, so a later call never goes back
    /// below a name that was seen in use.  `is_taken` is a membership query
    /// over every current furniture and opening name.
    pub fn suggest(&mut self, kind: OpeningKind, is_taken: impl Fn(&str) -> bool) -> String {
        let label = kind.label();
        let counter = self.counter_mut(kind);
        loop {
            let candidate = format!("{label} {counter}");
            if !is_taken(&candidate) {
                return candidate;
            }
            debug!(name = %candidate, "default name in use, probing next");
            *counter = counter.saturating_add(1);
        }
    }

    /// Allocates the first free name for `kind` and advances past it.
    ///
    /// The returned name is guaranteed absent from `is_taken` at call time.
    pub fn next_name(&mut self, kind: OpeningKind, is_taken: impl Fn(&str) -> bool) -> String {
        let name = self.suggest(kind, is_taken);
        self.advance(kind);
        name
    }

    /// Consumes one number for `kind`.  Called for every opening created
    /// under a caller-chosen name, so a suggestion that was accepted is
    /// never offered again.
    pub fn advance(&mut self, kind: OpeningKind) {
        let counter = self.counter_mut(kind);
        *counter = counter.saturating_add(1);
    }

    /// Rewinds both counters to 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn counter_mut(&mut self, kind: OpeningKind) -> &mut u32 {
        match kind {
            OpeningKind::Door => &mut self.door,
            OpeningKind::Window => &mut self.window,
        }
    }
}

impl Default for NameAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_first_names_start_at_one() {
        let mut names = NameAllocator::new();
        assert_eq!(names.next_name(OpeningKind::Door, |_| false), "Door 1");
        assert_eq!(names.next_name(OpeningKind::Window, |_| false), "Window 1");
    }

    #[test]
    fn test_counters_are_per_category() {
        let mut names = NameAllocator::new();
        names.next_name(OpeningKind::Door, |_| false);
        names.next_name(OpeningKind::Door, |_| false);
        assert_eq!(names.next_name(OpeningKind::Window, |_| false), "Window 1");
        assert_eq!(names.next_name(OpeningKind::Door, |_| false), "Door 3");
    }

    #[test]
    fn test_taken_names_are_skipped() {
        let taken: HashSet<&str> = ["Door 1", "Door 2"].into_iter().collect();
        let mut names = NameAllocator::new();
        assert_eq!(names.next_name(OpeningKind::Door, |n| taken.contains(n)), "Door 3");
    }

    #[test]
    fn test_counter_is_not_reused_after_deletion() {
        let mut names = NameAllocator::new();
        let first = names.next_name(OpeningKind::Door, |_| false);
        // "Door 1" was deleted; the lookup no longer contains it.
        let second = names.next_name(OpeningKind::Door, |_| false);
        assert_eq!(first, "Door 1");
        assert_eq!(second, "Door 2");
    }

    #[test]
    fn test_suggest_does_not_consume() {
        let mut names = NameAllocator::new();
        assert_eq!(names.suggest(OpeningKind::Window, |_| false), "Window 1");
        assert_eq!(names.suggest(OpeningKind::Window, |_| false), "Window 1");
        assert_eq!(names.next_name(OpeningKind::Window, |_| false), "Window 1");
        assert_eq!(names.suggest(OpeningKind::Window, |_| false), "Window 2");
    }

    #[test]
    fn test_advance_moves_past_accepted_suggestion() {
        let mut names = NameAllocator::new();
        let offered = names.suggest(OpeningKind::Door, |_| false);
        names.advance(OpeningKind::Door);
        // The accepted "Door 1" was deleted again; the lookup no longer has it.
        assert_eq!(offered, "Door 1");
        assert_eq!(names.suggest(OpeningKind::Door, |_| false), "Door 2");
        assert_eq!(names.suggest(OpeningKind::Window, |_| false), "Window 1");
    }

    #[test]
    fn test_reset_rewinds_counters() {
        let mut names = NameAllocator::new();
        names.next_name(OpeningKind::Door, |_| false);
        names.next_name(OpeningKind::Window, |_| false);
        names.reset();
        assert_eq!(names.next_name(OpeningKind::Door, |_| false), "Door 1");
    }

    #[test]
    fn test_interleaved_allocation_never_returns_taken_name() {
        let mut taken: HashSet<String> = HashSet::new();
        taken.insert("Door 2".to_string());
        taken.insert("Window 1".to_string());
        taken.insert("Door 5".to_string());
        let mut names = NameAllocator::new();
        for i in 0..20 {
            let kind = if i % 3 == 0 { OpeningKind::Window } else { OpeningKind::Door };
            let name = names.next_name(kind, |n| taken.contains(n));
            assert!(!taken.contains(&name), "{name} was already taken");
            taken.insert(name);
        }
    }
}

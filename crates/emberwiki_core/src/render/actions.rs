//! Registry of named zero-argument render actions.
//!
//! # Responsibility
//! - Hold the fixed table of actions invocable by `@macro <name>` lines.
//! - Let callers choose between the stock built-ins and an empty table.
//!
//! # Invariants
//! - The table is fixed at construction; there is no public registration
//!   API, so the set of runnable actions is closed.
//! - Actions take no arguments and return nothing.

use std::collections::BTreeMap;

type Action = Box<dyn Fn() + Send + Sync>;

/// Fixed table of named zero-argument actions, injected into `render`.
///
/// Passing the registry explicitly (instead of a process-wide table) keeps
/// side-effect-free rendering one constructor away: use `empty()`.
#[derive(Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, Action>,
}

impl ActionRegistry {
    /// Returns a registry with no actions; rendering with it is pure.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the stock built-in actions.
    pub fn builtin() -> Self {
        let mut actions: BTreeMap<String, Action> = BTreeMap::new();
        actions.insert(
            "hello".to_string(),
            Box::new(|| println!("Hello from macro!")),
        );
        actions.insert(
            "date".to_string(),
            Box::new(|| println!("This is a simple macro example.")),
        );
        Self { actions }
    }

    #[cfg(test)]
    pub(crate) fn with_actions(actions: BTreeMap<String, Action>) -> Self {
        Self { actions }
    }

    /// Returns whether an action with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Returns the registered action names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.actions.keys().map(String::as_str).collect()
    }

    /// Runs the named action; returns whether one ran.
    pub(crate) fn run(&self, name: &str) -> bool {
        match self.actions.get(name) {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ActionRegistry;

    #[test]
    fn builtin_table_is_fixed_and_sorted() {
        let registry = ActionRegistry::builtin();
        assert_eq!(registry.names(), vec!["date", "hello"]);
        assert!(registry.contains("hello"));
        assert!(!registry.contains("greet"));
    }

    #[test]
    fn empty_registry_runs_nothing() {
        let registry = ActionRegistry::empty();
        assert!(!registry.run("hello"));
        assert!(registry.names().is_empty());
    }
}

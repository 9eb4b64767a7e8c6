use std::fmt::Display;

use crate::Show;

/// Identifies a [`State`] within an [`Automaton`](crate::Automaton). Identifiers are handed out
/// sequentially by the automaton and are never reused, even after the state they referred to
/// has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub usize);

impl StateId {
    /// Returns the underlying number.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl Show for StateId {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl From<usize> for StateId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// A single state of an automaton. Besides its identity, a state knows whether it is initial
/// or accepting and it may carry a custom label that is used for presentation instead of the
/// default label, which is derived from the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    id: StateId,
    custom_label: Option<String>,
    pub(crate) initial: bool,
    pub(crate) accepting: bool,
}

impl State {
    pub(crate) fn new(id: StateId) -> Self {
        Self {
            id,
            custom_label: None,
            initial: false,
            accepting: false,
        }
    }

    /// Returns the identifier of `self`.
    pub fn id(&self) -> StateId {
        self.id
    }

    /// The label that is derived from the identifier, i.e. `q0`, `q1`, ...
    pub fn default_label(&self) -> String {
        self.id.to_string()
    }

    /// The custom label of `self`, if one has been set.
    pub fn custom_label(&self) -> Option<&str> {
        self.custom_label.as_deref()
    }

    /// Returns the custom label if there is one and the default label otherwise.
    pub fn label(&self) -> String {
        self.custom_label
            .clone()
            .unwrap_or_else(|| self.default_label())
    }

    /// Whether `self` is the initial state.
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Whether `self` is accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub(crate) fn set_custom_label(&mut self, label: Option<String>) {
        self.custom_label = label;
    }

    /// Creates a copy of `self` that carries the identifier `id`, but keeps flags and labels.
    pub(crate) fn with_id(&self, id: StateId) -> Self {
        Self {
            id,
            custom_label: self.custom_label.clone(),
            initial: self.initial,
            accepting: self.accepting,
        }
    }
}

impl Show for State {
    fn show(&self) -> String {
        self.label()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn custom_labels_take_precedence() {
        let mut aut = Automaton::new();
        let plain = aut.add_state();
        let named = aut.add_state_with(false, Some("sink".into()));
        assert_eq!(plain.show(), "q0");
        assert_eq!(aut.state(plain).unwrap().show(), "q0");
        assert_eq!(aut.state(named).unwrap().show(), "sink");
        assert_eq!(aut.state(named).unwrap().default_label(), "q1");
    }
}

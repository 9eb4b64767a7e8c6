use std::collections::BTreeSet;

use itertools::Itertools;

use crate::{Show, StateId};

/// The reserved symbol which denotes the empty word. A transition labeled with it
/// can be taken without consuming any input.
pub const EPSILON: char = 'ε';

/// An edge between two states. It is labeled with a set of symbols, taking the transition
/// is possible on each of them. In an [`Automaton`](crate::Automaton) there is at most one
/// transition for each pair of origin and target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    origin: StateId,
    target: StateId,
    symbols: BTreeSet<char>,
}

impl Transition {
    pub(crate) fn new<I: IntoIterator<Item = char>>(
        origin: StateId,
        symbols: I,
        target: StateId,
    ) -> Self {
        Self {
            origin,
            target,
            symbols: symbols.into_iter().collect(),
        }
    }

    /// The state from which the transition leaves.
    pub fn origin(&self) -> StateId {
        self.origin
    }

    /// The state at which the transition arrives.
    pub fn target(&self) -> StateId {
        self.target
    }

    /// The symbols on which the transition can be taken, possibly including [`EPSILON`].
    pub fn symbols(&self) -> &BTreeSet<char> {
        &self.symbols
    }

    /// Returns true if the transition can be taken on `symbol`.
    pub fn has_symbol(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Returns true if the transition can be taken without consuming input.
    pub fn is_epsilon(&self) -> bool {
        self.has_symbol(EPSILON)
    }

    pub(crate) fn symbols_mut(&mut self) -> &mut BTreeSet<char> {
        &mut self.symbols
    }

    pub(crate) fn remap(&self, origin: StateId, target: StateId) -> Self {
        Self {
            origin,
            target,
            symbols: self.symbols.clone(),
        }
    }
}

impl Show for Transition {
    fn show(&self) -> String {
        format!(
            "({}, {}, {})",
            self.origin,
            self.symbols.iter().join("|"),
            self.target
        )
    }
}

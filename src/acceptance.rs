use std::collections::BTreeMap;

use tracing::trace;

use crate::{Automaton, Show, StateId, StateSet, EPSILON};

/// Computes the epsilon-closure of every state through a depth-first search along
/// epsilon transitions. Every search keeps its own visited set, which guarantees termination
/// on cycles of epsilon transitions.
pub(crate) fn compute_epsilon_closures(aut: &Automaton) -> BTreeMap<StateId, StateSet> {
    aut.state_ids()
        .map(|q| (q, epsilon_closure(aut, q)))
        .collect()
}

fn epsilon_closure(aut: &Automaton, origin: StateId) -> StateSet {
    let mut visited = StateSet::new();
    let mut stack = vec![origin];
    while let Some(q) = stack.pop() {
        if !visited.insert(q) {
            continue;
        }
        if let Some(targets) = aut.successors(q, EPSILON) {
            stack.extend(targets.iter().filter(|p| !visited.contains(p)));
        }
    }
    visited
}

/// A single step of a [`Run`]: the set of states that are active after `consumed` has been
/// read. The first step of every run has not consumed anything and holds the epsilon-closure
/// of the state the run starts in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The states that are active after this step.
    pub active: StateSet,
    /// The symbol that was consumed to reach this step.
    pub consumed: Option<char>,
}

/// The result of simulating an automaton on a finite input, consisting of the verdict and a
/// trace of the active state sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Whether the input is accepted.
    pub accepted: bool,
    /// The sequence of steps that was taken. If the set of active states became empty, the run
    /// stops early and the last step holds the empty set.
    pub trace: Vec<Step>,
}

impl Run {
    fn rejected() -> Self {
        Self {
            accepted: false,
            trace: vec![],
        }
    }

    /// The number of symbols that were consumed before the run ended.
    pub fn consumed(&self) -> usize {
        self.trace.iter().filter(|s| s.consumed.is_some()).count()
    }
}

impl Show for Run {
    fn show(&self) -> String {
        let steps: Vec<String> = self
            .trace
            .iter()
            .map(|step| {
                let set = itertools::Itertools::join(&mut step.active.iter(), ", ");
                match step.consumed {
                    Some(sym) => format!("-{sym}-> {{{set}}}"),
                    None => format!("{{{set}}}"),
                }
            })
            .collect();
        format!(
            "{} {}",
            steps.join(" "),
            if self.accepted { "accept" } else { "reject" }
        )
    }
}

impl Automaton {
    /// Returns the set of states that are reachable from `state` using only epsilon transitions.
    /// This always includes `state` itself, provided it exists.
    pub fn closure_of(&self, state: StateId) -> StateSet {
        self.epsilon_closures()
            .get(&state)
            .cloned()
            .unwrap_or_default()
    }

    /// Computes the union of the epsilon-closures of all states that are reachable from a state
    /// in `active` with a single transition on `symbol`. [`EPSILON`] denotes the empty word and
    /// cannot be read as an input symbol, so stepping on it yields the empty set.
    pub fn step(&self, active: &StateSet, symbol: char) -> StateSet {
        if symbol == EPSILON {
            return StateSet::new();
        }
        let closures = self.epsilon_closures();
        active
            .iter()
            .filter_map(|q| self.successors(*q, symbol))
            .flatten()
            .flat_map(|p| closures.get(p).into_iter().flatten().copied())
            .collect()
    }

    /// Simulates `self` on `input`, starting in `origin`, and records the active sets. An input
    /// that contains [`EPSILON`] is rejected once the run reaches that character, see
    /// [`Automaton::step`].
    pub fn run_from(&self, origin: StateId, input: &str) -> Run {
        if !self.contains(origin) {
            return Run::rejected();
        }
        let mut active = self.closure_of(origin);
        let mut trace = vec![Step {
            active: active.clone(),
            consumed: None,
        }];

        for sym in input.chars() {
            active = self.step(&active, sym);
            trace.push(Step {
                active: active.clone(),
                consumed: Some(sym),
            });
            if active.is_empty() {
                trace!("no active state left after reading {sym}, rejecting");
                return Run {
                    accepted: false,
                    trace,
                };
            }
        }

        Run {
            accepted: self.any_accepting(&active),
            trace,
        }
    }

    /// Simulates `self` on `input` from the initial state. If there is no initial state, the
    /// input is rejected and the trace is empty.
    pub fn run(&self, input: &str) -> Run {
        match self.initial() {
            Some(initial) => self.run_from(initial, input),
            None => Run::rejected(),
        }
    }

    /// Decides whether `input` is accepted when starting in `origin` instead of the initial state.
    /// In contrast to [`Automaton::run_from`], no trace is recorded. Inputs containing
    /// [`EPSILON`] are rejected.
    pub fn accepts_from(&self, origin: StateId, input: &str) -> bool {
        if !self.contains(origin) {
            return false;
        }
        let mut active = self.closure_of(origin);
        for sym in input.chars() {
            active = self.step(&active, sym);
            if active.is_empty() {
                return false;
            }
        }
        self.any_accepting(&active)
    }

    /// Decides whether `input` is accepted. The empty input is accepted if and only if the
    /// epsilon-closure of the initial state contains an accepting state. An automaton without
    /// initial state accepts nothing, and neither does any input containing [`EPSILON`].
    pub fn accepts(&self, input: &str) -> bool {
        self.initial()
            .map(|initial| self.accepts_from(initial, input))
            .unwrap_or(false)
    }
}

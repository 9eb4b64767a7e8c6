use std::fmt::Display;

use itertools::Itertools;
use owo_colors::OwoColorize;

use super::{Automaton, StateSet, EPSILON};

impl Automaton {
    /// Renders the transition function as a table. Each row corresponds to a state, each column
    /// to a symbol of the alphabet (and one for [`EPSILON`] if the automaton has epsilon
    /// transitions). The initial state is marked with `→`, accepting states with `*`.
    pub fn build_transition_table(&self) -> String {
        let mut columns: Vec<char> = self.alphabet().iter().copied().collect();
        if self
            .transitions()
            .iter()
            .any(|t| t.is_epsilon())
        {
            columns.push(EPSILON);
        }

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(columns.iter().map(|c| c.to_string())),
        );
        for state in self.states() {
            let marker = match (state.is_initial(), state.is_accepting()) {
                (true, true) => "→*",
                (true, false) => "→",
                (false, true) => "*",
                (false, false) => "",
            };
            let label = if state.is_accepting() {
                format!("{marker}{}", state.label().bold())
            } else {
                format!("{marker}{}", state.label())
            };
            let mut row = vec![label];
            for sym in &columns {
                row.push(match self.successors(state.id(), *sym) {
                    Some(targets) if !targets.is_empty() => self.show_set(targets),
                    _ => "-".to_string(),
                });
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }

    /// Displays a set of states through their labels, e.g. `{q0, q2}`.
    pub fn show_set(&self, set: &StateSet) -> String {
        format!(
            "{{{}}}",
            set.iter()
                .map(|q| self
                    .state(*q)
                    .map(|s| s.label())
                    .unwrap_or_else(|| q.to_string()))
                .join(", ")
        )
    }
}

impl Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} with {} states\n{}", self.kind(), self.size(), self.build_transition_table())
    }
}

use tracing::debug;

use crate::{Automaton, StateId, EPSILON};

/// Returns the first `symbols` letters of the latin alphabet, starting with `a`.
pub fn letters(symbols: usize) -> Vec<char> {
    ('a'..='z').take(symbols).collect()
}

fn add_random_states(aut: &mut Automaton, size: usize) -> Vec<StateId> {
    let states: Vec<StateId> = (0..size.max(1))
        .map(|_| aut.add_state_with(fastrand::bool(), None))
        .collect();
    aut.mark_initial(states[0]);
    states
}

/// Generate a random automaton with `size` states over an alphabet of `symbols` letters, see
/// [`letters`]. State 0 is initial, every state is accepting with probability one half.
/// For every pair of states and every letter, a transition is inserted with probability
/// `probability`, and an epsilon transition is inserted with probability `epsilon_probability`.
/// Depending on the draw, the result may be a DFA, an NFA or an epsilon-NFA.
pub fn generate_random_nfa(
    symbols: usize,
    size: usize,
    probability: f64,
    epsilon_probability: f64,
) -> Automaton {
    let alphabet = letters(symbols);
    let mut aut = Automaton::new();
    let states = add_random_states(&mut aut, size);

    for p in &states {
        for q in &states {
            let mut label: Vec<char> = alphabet
                .iter()
                .copied()
                .filter(|_| fastrand::f64() < probability)
                .collect();
            if p != q && fastrand::f64() < epsilon_probability {
                label.push(EPSILON);
            }
            if !label.is_empty() {
                aut.merge_transition(*p, label, *q);
            }
        }
    }
    debug!("generated random {} with {} states", aut.kind(), aut.size());
    aut
}

/// Generate a random total DFA of size `size` by drawing, for each state and each of the
/// `symbols` letters, a target state uniformly. State 0 is initial and each state is accepting
/// with probability one half. Note that depending on the draw, there may be unreachable states.
pub fn generate_random_dfa(symbols: usize, size: usize) -> Automaton {
    let alphabet = letters(symbols);
    let mut aut = Automaton::new();
    let states = add_random_states(&mut aut, size);

    for p in &states {
        for sym in &alphabet {
            let q = states[fastrand::usize(..states.len())];
            aut.merge_transition(*p, [*sym], q);
        }
    }
    aut
}

/// Generate a random `String` over `alphabet`.
/// The length of the `String` is drawn uniformly from the range `min_len..=max_len`. If
/// `max_len` is smaller than `min_len`, the word has exactly `min_len` symbols.
pub fn generate_random_word(alphabet: &[char], min_len: usize, max_len: usize) -> String {
    if alphabet.is_empty() {
        return String::new();
    }
    let length = fastrand::usize(min_len..=max_len.max(min_len));
    (0..length)
        .map(|_| alphabet[fastrand::usize(..alphabet.len())])
        .collect()
}

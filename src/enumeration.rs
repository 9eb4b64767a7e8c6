use tracing::trace;

/// Enumerates the words over a finite alphabet in shortlex order, i.e. ordered first by length
/// and then, within each length, in the order in which the strings are built: every word of the
/// next length is obtained by prefixing each symbol (in the given order) to each word of the
/// current length. Over the alphabet `[a, b]` and starting at length zero, this yields
/// `"", "a", "b", "aa", "ba", "ab", "bb", "aaa", ...`.
///
/// The enumerator holds the most recently completed layer (all words of some length) and builds
/// the next layer incrementally, one word per call to [`Iterator::next`]. The next layer is
/// only materialized once the current one is used up, earlier layers are never regenerated.
///
/// The enumerator is a stateful, forward-only cursor. It cannot be rewound, and since every
/// call advances the shared position it must not be consumed from several places at once. If
/// the alphabet is empty, the only word is the empty one.
///
/// ```
/// use fsmlab::SigmaStarEnumerator;
///
/// let words: Vec<String> = SigmaStarEnumerator::new(['a', 'b'], 0).take(7).collect();
/// assert_eq!(words, ["", "a", "b", "aa", "ba", "ab", "bb"]);
/// ```
#[derive(Debug, Clone)]
pub struct SigmaStarEnumerator {
    alphabet: Vec<char>,
    completed: Vec<String>,
    building: Vec<String>,
    word_position: usize,
    symbol_position: usize,
    emit_empty: bool,
}

impl SigmaStarEnumerator {
    /// Creates a new enumerator over `alphabet` whose first word has length `starting_length`.
    /// All shorter words are silently skipped.
    pub fn new<I: IntoIterator<Item = char>>(alphabet: I, starting_length: usize) -> Self {
        let alphabet: Vec<char> = alphabet.into_iter().collect();
        let mut completed = vec![String::new()];
        for _ in 1..starting_length {
            completed = Self::expand(&alphabet, &completed);
        }
        trace!(
            "enumerating words of length {starting_length} and longer over {} symbols",
            alphabet.len()
        );
        Self {
            alphabet,
            completed,
            building: Vec::new(),
            word_position: 0,
            symbol_position: 0,
            emit_empty: starting_length == 0,
        }
    }

    fn expand(alphabet: &[char], layer: &[String]) -> Vec<String> {
        layer
            .iter()
            .flat_map(|word| alphabet.iter().map(move |sym| Self::prefix(*sym, word)))
            .collect()
    }

    fn prefix(symbol: char, word: &str) -> String {
        let mut out = String::with_capacity(word.len() + symbol.len_utf8());
        out.push(symbol);
        out.push_str(word);
        out
    }

    /// The length of the words that the next call to [`Iterator::next`] produces.
    pub fn next_length(&self) -> usize {
        if self.emit_empty {
            return 0;
        }
        let completed_length = self
            .completed
            .first()
            .map(|w| w.chars().count())
            .unwrap_or(0);
        if self.word_position < self.completed.len() {
            completed_length + 1
        } else {
            completed_length + 2
        }
    }
}

impl Iterator for SigmaStarEnumerator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emit_empty {
            self.emit_empty = false;
            return Some(String::new());
        }
        if self.alphabet.is_empty() {
            return None;
        }
        if self.word_position >= self.completed.len() {
            self.completed = std::mem::take(&mut self.building);
            self.word_position = 0;
        }

        let word = Self::prefix(
            self.alphabet[self.symbol_position],
            &self.completed[self.word_position],
        );
        self.building.push(word.clone());

        self.symbol_position += 1;
        if self.symbol_position == self.alphabet.len() {
            self.symbol_position = 0;
            self.word_position += 1;
        }
        Some(word)
    }
}

#[cfg(test)]
mod tests {
    use super::SigmaStarEnumerator;

    #[test_log::test]
    fn shortlex_order() {
        let words: Vec<_> = SigmaStarEnumerator::new(['a', 'b'], 0).take(15).collect();
        assert_eq!(
            words,
            vec![
                "", "a", "b", "aa", "ba", "ab", "bb", "aaa", "baa", "aba", "bba", "aab", "bab",
                "abb", "bbb"
            ]
        );
    }

    #[test_log::test]
    fn starting_length_skips_shorter_words() {
        let mut it = SigmaStarEnumerator::new(['0', '1', '2'], 2);
        assert_eq!(it.next_length(), 2);
        let layer: Vec<_> = it.by_ref().take(9).collect();
        assert_eq!(layer[0], "00");
        assert_eq!(layer[1], "10");
        assert_eq!(layer[8], "22");
        assert!(layer.iter().all(|w| w.len() == 2));
        assert_eq!(it.next_length(), 3);
        assert_eq!(it.next().as_deref(), Some("000"));

        let mut it = SigmaStarEnumerator::new(['x'], 1);
        assert_eq!(it.next().as_deref(), Some("x"));
        assert_eq!(it.next().as_deref(), Some("xx"));
    }

    #[test_log::test]
    fn every_word_appears_once() {
        let words: Vec<_> = SigmaStarEnumerator::new(['a', 'b', 'c'], 0)
            .take(1 + 3 + 9 + 27)
            .collect();
        let unique: std::collections::BTreeSet<_> = words.iter().collect();
        assert_eq!(unique.len(), words.len());
        assert!(words
            .windows(2)
            .all(|w| w[0].chars().count() <= w[1].chars().count()));
        assert_eq!(words.last().unwrap().len(), 3);
    }

    #[test_log::test]
    fn empty_alphabet() {
        let words: Vec<_> = SigmaStarEnumerator::new(std::iter::empty(), 0).take(5).collect();
        assert_eq!(words, vec![String::new()]);
        assert_eq!(SigmaStarEnumerator::new(std::iter::empty(), 3).next(), None);
    }
}

/// The number of distinct labels that [`alphabetic_label`] can produce: 26 single letters
/// followed by 26 * 26 pairs of letters.
pub const ALPHABETIC_LABELS: usize = 26 + 26 * 26;

/// Returns a compact alphabetic label for the `n`-th generated state, counting from zero. The
/// labels run `A, B, ..., Z, AA, AB, ..., ZZ`, past that `None` is returned.
pub fn alphabetic_label(n: usize) -> Option<String> {
    let letter = |i: usize| char::from(b'A' + i as u8);
    match n {
        n if n < 26 => Some(letter(n).to_string()),
        n if n < ALPHABETIC_LABELS => {
            let n = n - 26;
            Some([letter(n / 26), letter(n % 26)].iter().collect())
        }
        _ => None,
    }
}

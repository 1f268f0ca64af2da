/// Letters with their own row and column in the transition matrix.
pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Letters plus the catch-all bucket.
pub const ALPHABET_SIZE: usize = LETTERS.len() + 1;

/// Index shared by every character outside `LETTERS`.
pub const OTHER_INDEX: usize = ALPHABET_SIZE - 1;

/// Maps a character to its matrix index, case-insensitively.
pub fn index_of(c: char) -> usize {
    match c.to_ascii_lowercase() {
        lower @ 'a'..='z' => (lower as u8 - b'a') as usize,
        _ => OTHER_INDEX,
    }
}

/// Iterates over the matrix indices of a string's characters.
pub fn indices(s: &str) -> impl Iterator<Item = usize> + '_ {
    s.chars().map(index_of)
}

/// Iterates over adjacent (prev, next) index pairs.
pub fn pairs(s: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    indices(s).zip(indices(s).skip(1))
}

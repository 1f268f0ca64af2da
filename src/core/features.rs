use crate::domain::model::DomainRecord;
use std::collections::HashMap;

const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyz";

/// Shannon entropy, in bits, of the character distribution of `s`.
pub fn shannon_entropy(s: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in s.chars() {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    let entropy: f64 = counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum();
    // A single distinct character gives -0.0.
    entropy.max(0.0)
}

/// Number of consonant letters in `s`, case-insensitive.
pub fn count_consonants(s: &str) -> usize {
    s.chars()
        .filter(|c| CONSONANTS.contains(c.to_ascii_lowercase()))
        .count()
}

/// Computes the lexical features of a normalized label.
pub fn extract(label: &str) -> DomainRecord {
    DomainRecord {
        label: label.to_string(),
        entropy: shannon_entropy(label),
        consonants: count_consonants(label),
        length: label.chars().count(),
    }
}

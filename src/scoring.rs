use std::collections::HashMap;

use counter::Counter;

use crate::bitmask::{CanRepresentLetterBitmask, LetterBitmask};
use crate::roster::CandidatePtr;

/// Exponent applied to letter frequencies when deriving rarity weights.
///
/// Large values make a single rare letter outweigh any combination of common
/// ones, which front-loads high-value candidates and tightens pruning early.
/// Any exponent >= 1 yields the same final teams, only at a different speed.
pub const RARITY_EXPONENT: f64 = 100.0;

/// Count, per letter, how many candidates contain it at least once.
/// Repeats within a name contribute nothing extra.
pub fn letter_frequencies(candidates: &[CandidatePtr]) -> Counter<char> {
    candidates
        .iter()
        .flat_map(|candidate| candidate.letters().iter_letters())
        .collect()
}

/// Derive per-letter rarity weights from frequencies. Letters absent from
/// every candidate get no entry.
pub fn rarity_weights(frequencies: &Counter<char>, exponent: f64) -> HashMap<char, f64> {
    frequencies
        .iter()
        .map(|(&ch, &freq)| (ch, 1.0 / (freq as f64).powf(exponent)))
        .collect()
}

/// Summed rarity weight of every letter in `mask`.
pub fn rarity_score(mask: LetterBitmask, weights: &HashMap<char, f64>) -> f64 {
    mask.iter_letters()
        .map(|ch| weights.get(&ch).copied().unwrap_or_default())
        .sum()
}

/// Order candidates so the search visits rare letters first. The sort is
/// stable, so equally scored candidates keep their input order.
pub fn rank_by_rarity(
    candidates: Vec<CandidatePtr>,
    weights: &HashMap<char, f64>,
) -> Vec<CandidatePtr> {
    let mut scored: Vec<(f64, CandidatePtr)> = candidates
        .into_iter()
        .map(|candidate| (rarity_score(candidate.letters(), weights), candidate))
        .collect();

    scored.sort_by(|(s1, _), (s2, _)| s2.total_cmp(s1));

    scored.into_iter().map(|(_, candidate)| candidate).collect()
}

//! Canonical minimizer selection over a raw sequence window
//!
//! The minimizer of a window of `SSL` characters is the lexicographically
//! smallest k-mer substring among the `SSL - K + 1` forward substrings and the
//! `SSL - K + 1` substrings of the window's reverse complement. Candidates are
//! examined by increasing offset, forward before reverse at the same offset,
//! and the running minimum only moves on a strictly smaller string, so the
//! earliest occurrence wins.
//!
//! Characters are compared by raw byte value. The forward strand keeps the
//! window's bytes as given, while the reverse complement is always uppercase
//! with `N` for anything outside A/C/G/T. A lowercase forward k-mer therefore
//! ranks after every uppercase reverse k-mer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::base::reverse_complement_chars;
use crate::error::KmerResult;
use crate::kmer::{encode, Encoded, K};

/// Window length used when nothing else is configured
pub const DEFAULT_SSL: usize = 40;

/// Strand a minimizer was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// A single-base substitution inside a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    /// Index into the window (forward orientation)
    pub position: usize,
    /// Substituted base
    pub base: u8,
}

impl Variant {
    pub fn new(position: usize, base: u8) -> Self {
        Self { position, base }
    }
}

/// The selected k-mer substring and where it was found
///
/// The derived ordering is the selection order: smaller string first, then
/// smaller offset, then forward before reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Minimizer {
    bases: [u8; K],
    /// Start offset in the forward window or in its reverse complement
    pub offset: u32,
    pub strand: Strand,
}

impl Minimizer {
    /// The k-mer substring, in the case it had in the window (reverse strand is uppercase)
    pub fn bases(&self) -> &[u8; K] {
        &self.bases
    }

    /// Encode the substring; check `contains_n` before using the value
    pub fn encode(&self) -> KmerResult<Encoded> {
        encode(&self.bases)
    }

    fn from_slice(candidate: &[u8], offset: usize, strand: Strand) -> Self {
        let mut bases = [0u8; K];
        bases.copy_from_slice(candidate);
        Self {
            bases,
            offset: offset as u32,
            strand,
        }
    }
}

impl fmt::Display for Minimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bases))
    }
}

/// Both strands of a window
struct Strands {
    forward: Vec<u8>,
    reverse: Vec<u8>,
}

impl Strands {
    fn new(window: &[u8]) -> Self {
        Self {
            forward: window.to_vec(),
            reverse: reverse_complement_chars(window),
        }
    }

    fn candidate(&self, offset: usize, strand: Strand) -> &[u8] {
        let seq = match strand {
            Strand::Forward => &self.forward,
            Strand::Reverse => &self.reverse,
        };
        &seq[offset..offset + K]
    }

    /// Replace `best` if the candidate at (`offset`, `strand`) precedes it
    fn offer(&self, best: &mut Minimizer, offset: usize, strand: Strand) {
        let candidate = self.candidate(offset, strand);
        if (candidate, offset as u32, strand) < (&best.bases[..], best.offset, best.strand) {
            *best = Minimizer::from_slice(candidate, offset, strand);
        }
    }
}

fn check_window(window: &[u8]) {
    assert!(
        window.len() >= K,
        "window of {} bases is shorter than k = {}",
        window.len(),
        K
    );
    assert!(window.len() <= u32::MAX as usize, "window too long");
}

/// Minimizer of a window of at least `K` characters.
///
/// # Panics
/// If the window is shorter than `K`.
pub fn minimizer(window: &[u8]) -> Minimizer {
    check_window(window);
    let strands = Strands::new(window);

    let mut best = Minimizer::from_slice(strands.candidate(0, Strand::Forward), 0, Strand::Forward);
    for offset in 0..=window.len() - K {
        strands.offer(&mut best, offset, Strand::Forward);
        strands.offer(&mut best, offset, Strand::Reverse);
    }
    best
}

/// Minimizer of the window with `variant` applied.
///
/// # Panics
/// If the window is shorter than `K` or the variant lies outside it.
pub fn minimizer_with_variant(window: &[u8], variant: Variant) -> Minimizer {
    minimizer(&apply_variant(window, variant))
}

/// Variant-aware minimizer that reuses the known minimizer of the unmutated window.
///
/// Only candidates whose span covers the variant are rebuilt from the mutated
/// window; every other candidate is unchanged and `unmutated` already ranks
/// them. If `unmutated` itself covers the variant the whole window is
/// recomputed. The result always equals [`minimizer_with_variant`].
///
/// # Panics
/// If the window is shorter than `K` or the variant lies outside it.
pub fn minimizer_with_variant_from(
    window: &[u8],
    unmutated: &Minimizer,
    variant: Variant,
) -> Minimizer {
    check_window(window);
    assert!(
        variant.position < window.len(),
        "variant position {} outside window of {}",
        variant.position,
        window.len()
    );
    debug_assert_eq!(*unmutated, minimizer(window), "stale unmutated minimizer");

    let forward_range = covering_offsets(window.len(), variant.position);
    let reverse_range = covering_offsets(window.len(), window.len() - 1 - variant.position);

    let known = match unmutated.strand {
        Strand::Forward => &forward_range,
        Strand::Reverse => &reverse_range,
    };
    if known.contains(&(unmutated.offset as usize)) {
        log::trace!(
            "Variant at {} overlaps minimizer at {}{}; recomputing window",
            variant.position,
            unmutated.offset,
            unmutated.strand
        );
        return minimizer_with_variant(window, variant);
    }

    let strands = Strands::new(&apply_variant(window, variant));
    let mut best = *unmutated;
    for offset in forward_range {
        strands.offer(&mut best, offset, Strand::Forward);
    }
    for offset in reverse_range {
        strands.offer(&mut best, offset, Strand::Reverse);
    }
    best
}

/// Offsets of the k-mers in a window of `len` that contain position `pos`
fn covering_offsets(len: usize, pos: usize) -> std::ops::RangeInclusive<usize> {
    pos.saturating_sub(K - 1)..=pos.min(len - K)
}

fn apply_variant(window: &[u8], variant: Variant) -> Vec<u8> {
    assert!(
        variant.position < window.len(),
        "variant position {} outside window of {}",
        variant.position,
        window.len()
    );
    let mut mutated = window.to_vec();
    mutated[variant.position] = variant.base;
    mutated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat(parts: &[(u8, usize)]) -> Vec<u8> {
        parts
            .iter()
            .flat_map(|&(b, n)| std::iter::repeat(b).take(n))
            .collect()
    }

    #[test]
    fn test_uniform_window() {
        let window = vec![b'A'; DEFAULT_SSL];
        let m = minimizer(&window);
        assert_eq!(m.bases(), &[b'A'; K]);
        assert_eq!(m.offset, 0);
        assert_eq!(m.strand, Strand::Forward);
    }

    #[test]
    fn test_window_of_exactly_k() {
        let window = repeat(&[(b'T', K)]);
        let m = minimizer(&window);
        assert_eq!(m.bases(), &[b'A'; K]);
        assert_eq!(m.offset, 0);
        assert_eq!(m.strand, Strand::Reverse);
    }

    #[test]
    fn test_repeated_minimum_takes_first_offset() {
        let window = repeat(&[(b'A', 33), (b'G', 7)]);
        let m = minimizer(&window);
        assert_eq!(m.bases(), &[b'A'; K]);
        assert_eq!(m.offset, 0);
    }

    #[test]
    fn test_forward_wins_tie_at_same_offset() {
        // T*32 G*8 A*32: all-A at forward offset 40 and reverse offset 40
        let window = repeat(&[(b'T', 32), (b'G', 8), (b'A', 32)]);
        let m = minimizer(&window);
        assert_eq!(m.bases(), &[b'A'; K]);
        assert_eq!(m.offset, 40);
        assert_eq!(m.strand, Strand::Forward);
    }

    #[test]
    fn test_earlier_reverse_offset_wins() {
        // forward all-A at 4, reverse all-A at 0
        let window = repeat(&[(b'G', 4), (b'A', 32), (b'C', 4), (b'T', 32)]);
        let m = minimizer(&window);
        assert_eq!(m.bases(), &[b'A'; K]);
        assert_eq!(m.offset, 0);
        assert_eq!(m.strand, Strand::Reverse);
    }

    #[test]
    fn test_lowercase_forward_loses_to_reverse() {
        let m = minimizer(&[b'a'; DEFAULT_SSL]);
        assert_eq!(m.bases(), &[b'T'; K]);
        assert_eq!(m.offset, 0);
        assert_eq!(m.strand, Strand::Reverse);

        let m = minimizer(&repeat(&[(b'c', 20), (b'C', 20)]));
        assert_eq!(m.bases(), &[b'G'; K]);
        assert_eq!(m.offset, 0);
        assert_eq!(m.strand, Strand::Reverse);
    }

    #[test]
    fn test_case_is_preserved() {
        let m = minimizer(&repeat(&[(b'A', 20), (b'a', 20)]));
        assert_eq!(m.bases().to_vec(), repeat(&[(b'A', 20), (b'a', 12)]));
        assert_eq!(m.offset, 0);
        assert_eq!(m.strand, Strand::Forward);
    }

    #[test]
    fn test_uppercase_beats_earlier_lowercase() {
        // same letters at offsets 0 and 4, only offset 4 is all uppercase
        let m = minimizer(&repeat(&[(b'a', 4), (b'A', 32), (b'T', 4)]));
        assert_eq!(m.bases(), &[b'A'; K]);
        assert_eq!(m.offset, 4);
        assert_eq!(m.strand, Strand::Forward);
    }

    #[test]
    #[should_panic]
    fn test_short_window_panics() {
        let _ = minimizer(b"ACGT");
    }

    #[test]
    fn test_variant_away_from_minimizer_keeps_result() {
        let window = repeat(&[(b'A', 32), (b'C', 8)]);
        let plain = minimizer(&window);
        let variant = Variant::new(39, b'G');
        assert_eq!(minimizer_with_variant(&window, variant), plain);
        assert_eq!(minimizer_with_variant_from(&window, &plain, variant), plain);
    }

    #[test]
    fn test_variant_creates_smaller_kmer() {
        let window = vec![b'C'; DEFAULT_SSL];
        let plain = minimizer(&window);
        let variant = Variant::new(20, b'A');

        let mut mutated = window.clone();
        mutated[20] = b'A';
        let expected = minimizer(&mutated);

        assert_eq!(expected.offset, 8);
        assert_eq!(expected.strand, Strand::Forward);
        assert_eq!(expected.bases()[12], b'A');
        assert_eq!(minimizer_with_variant(&window, variant), expected);
        assert_eq!(minimizer_with_variant_from(&window, &plain, variant), expected);
    }

    #[test]
    fn test_variant_destroying_minimizer_recomputes() {
        let window = repeat(&[(b'A', 32), (b'C', 8)]);
        let plain = minimizer(&window);
        let variant = Variant::new(5, b'T');
        let result = minimizer_with_variant_from(&window, &plain, variant);
        assert_eq!(result, minimizer_with_variant(&window, variant));
        assert_ne!(result, plain);
    }

    #[test]
    fn test_covering_offsets() {
        assert_eq!(covering_offsets(40, 0), 0..=0);
        assert_eq!(covering_offsets(40, 20), 0..=8);
        assert_eq!(covering_offsets(40, 39), 8..=8);
        assert_eq!(covering_offsets(72, 40), 9..=40);
    }

    #[test]
    fn test_minimizer_encode() {
        let m = minimizer(&vec![b'A'; DEFAULT_SSL]);
        let encoded = m.encode().unwrap();
        assert!(!encoded.contains_n);
        assert_eq!(encoded.kmer.bits(), 0);
        assert_eq!(m.to_string(), "A".repeat(K));
    }
}

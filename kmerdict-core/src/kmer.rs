//! 2-bit k-mer codec
//!
//! A [`Kmer`] packs exactly [`K`] bases into a `u64`. The base at string
//! position `i` lives in bits `[2i, 2i+1]`, so position 0 is the least
//! significant pair and position 31 the most significant one. Rolling a k-mer
//! forward ([`shift`]) therefore drops the low bits and inserts at the top.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::base::{char_of, code_of, is_ambiguous};
use crate::error::{KmerError, KmerResult};

/// K-mer length in bases
pub const K: usize = 32;

/// An encoded 32-mer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kmer(u64);

/// Result of [`encode`]
///
/// When `contains_n` is set the `kmer` value carries no meaning and must not
/// be used as a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    pub kmer: Kmer,
    pub contains_n: bool,
}

impl Encoded {
    /// `None` when the source string had an `N`
    pub fn into_option(self) -> Option<Kmer> {
        if self.contains_n {
            None
        } else {
            Some(self.kmer)
        }
    }
}

impl Kmer {
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Strict encoding: an `N` is reported as [`KmerError::AmbiguousBase`]
    pub fn from_bases(sequence: &[u8]) -> KmerResult<Self> {
        if sequence.len() != K {
            return Err(KmerError::InvalidLength {
                expected: K,
                actual: sequence.len(),
            });
        }
        encode(sequence)?.into_option().ok_or(KmerError::AmbiguousBase)
    }

    #[inline]
    pub fn shift(self, next_base: u8) -> KmerResult<Self> {
        shift(self, next_base)
    }

    #[inline]
    pub fn base_at(self, position: usize) -> u8 {
        base_at(self, position)
    }

    #[inline]
    pub fn reverse_complement(self) -> Self {
        crate::revcomp::reverse_complement(self)
    }

    #[inline]
    pub fn canonical(self) -> Self {
        crate::revcomp::canonical(self)
    }

    pub fn decode(self) -> [u8; K] {
        decode(self)
    }
}

impl From<u64> for Kmer {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<Kmer> for u64 {
    fn from(kmer: Kmer) -> Self {
        kmer.0
    }
}

impl fmt::Display for Kmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bases = decode(*self);
        // decode only ever emits ASCII A/C/G/T
        f.write_str(&String::from_utf8_lossy(&bases))
    }
}

impl FromStr for Kmer {
    type Err = KmerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bases(s.as_bytes())
    }
}

/// Encode a 32-base string.
///
/// `N`/`n` sets [`Encoded::contains_n`]; any other non-ACGT byte is an error.
///
/// # Panics
/// If `sequence` is not exactly [`K`] bytes long.
pub fn encode(sequence: &[u8]) -> KmerResult<Encoded> {
    assert_eq!(sequence.len(), K, "k-mer must be exactly {} bases", K);

    let mut bits = 0u64;
    let mut contains_n = false;
    for (i, &b) in sequence.iter().enumerate() {
        match code_of(b) {
            Some(code) => bits |= (code as u64) << (2 * i),
            None if is_ambiguous(b) => contains_n = true,
            None => return Err(KmerError::invalid_base(b)),
        }
    }

    if contains_n {
        bits = 0;
    }
    Ok(Encoded {
        kmer: Kmer(bits),
        contains_n,
    })
}

/// Decode a k-mer back to its 32 bases. Never fails.
pub fn decode(kmer: Kmer) -> [u8; K] {
    let mut out = [0u8; K];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = char_of(base_at(kmer, i));
    }
    out
}

/// Drop the base at position 0 and append `next_base` at position 31.
///
/// Unlike [`encode`], `N` is rejected here.
#[inline]
pub fn shift(kmer: Kmer, next_base: u8) -> KmerResult<Kmer> {
    let code = code_of(next_base).ok_or_else(|| KmerError::invalid_base(next_base))?;
    Ok(Kmer((kmer.0 >> 2) | ((code as u64) << 62)))
}

/// 2-bit code of the base at `position`.
///
/// # Panics
/// If `position >= K`.
#[inline]
pub fn base_at(kmer: Kmer, position: usize) -> u8 {
    assert!(position < K, "base position {} out of range", position);
    let s = 2 * position;
    ((kmer.0 >> s) & 0b11) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACGT8: &[u8; 32] = b"ACGTACGTACGTACGTACGTACGTACGTACGT";

    #[test]
    fn test_bit_layout() {
        let mut seq = [b'A'; K];
        seq[0] = b'C';
        assert_eq!(encode(&seq).unwrap().kmer.bits(), 1);

        let mut seq = [b'A'; K];
        seq[31] = b'T';
        assert_eq!(encode(&seq).unwrap().kmer.bits(), 3u64 << 62);
    }

    #[test]
    fn test_encode_decode() {
        let encoded = encode(ACGT8).unwrap();
        assert!(!encoded.contains_n);
        assert_eq!(&decode(encoded.kmer), ACGT8);
        assert_eq!(encoded.kmer.to_string().as_bytes(), ACGT8);
    }

    #[test]
    fn test_encode_lowercase() {
        let lower = ACGT8.to_ascii_lowercase();
        assert_eq!(encode(&lower).unwrap(), encode(ACGT8).unwrap());
    }

    #[test]
    fn test_encode_flags_n() {
        let mut seq = *ACGT8;
        seq[17] = b'n';
        let encoded = encode(&seq).unwrap();
        assert!(encoded.contains_n);
        assert_eq!(encoded.into_option(), None);
    }

    #[test]
    fn test_encode_rejects_invalid() {
        let mut seq = *ACGT8;
        seq[3] = b'X';
        assert!(matches!(encode(&seq), Err(KmerError::InvalidBase('X'))));
    }

    #[test]
    #[should_panic]
    fn test_encode_wrong_length_panics() {
        let _ = encode(b"ACGT");
    }

    #[test]
    fn test_shift() {
        let kmer = encode(ACGT8).unwrap().kmer;
        let shifted = shift(kmer, b'g').unwrap();
        assert_eq!(&decode(shifted), b"CGTACGTACGTACGTACGTACGTACGTACGTG");
        assert!(matches!(shift(kmer, b'N'), Err(KmerError::InvalidBase('N'))));
    }

    #[test]
    fn test_base_at() {
        let kmer = encode(ACGT8).unwrap().kmer;
        assert_eq!(base_at(kmer, 0), 0);
        assert_eq!(base_at(kmer, 1), 1);
        assert_eq!(base_at(kmer, 2), 2);
        assert_eq!(base_at(kmer, 31), 3);
    }

    #[test]
    fn test_from_str() {
        let kmer: Kmer = "ACGTACGTACGTACGTACGTACGTACGTACGT".parse().unwrap();
        assert_eq!(kmer, encode(ACGT8).unwrap().kmer);
        assert!(matches!(
            "ACGTACGTACGTACGTNCGTACGTACGTACGT".parse::<Kmer>(),
            Err(KmerError::AmbiguousBase)
        ));
        assert!(matches!(
            "ACGT".parse::<Kmer>(),
            Err(KmerError::InvalidLength { expected: 32, actual: 4 })
        ));
    }
}

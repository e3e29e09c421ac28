//! Nucleotide <-> 2-bit code mapping
//!
//! Codes: A=0, C=1, G=2, T=3. `N` and anything else has no code.

/// Encode a nucleotide to its 2-bit representation
#[inline]
pub fn code_of(base: u8) -> Option<u8> {
    match base {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' => Some(3),
        _ => None,
    }
}

/// Complement of a 2-bit code (A<->T, C<->G)
#[inline]
pub fn complement_code(code: u8) -> u8 {
    debug_assert!(code < 4, "not a base code: {}", code);
    3 - code
}

/// Inverse of [`code_of`] for codes 0..=3
#[inline]
pub fn char_of(code: u8) -> u8 {
    const BASES: [u8; 4] = *b"ACGT";
    BASES[(code & 0b11) as usize]
}

/// True for `N`/`n`
#[inline]
pub fn is_ambiguous(base: u8) -> bool {
    matches!(base, b'N' | b'n')
}

/// DNA complement at the character level. Output is uppercase, non-ACGT maps to `N`.
#[inline]
pub fn complement_char(base: u8) -> u8 {
    match code_of(base) {
        Some(code) => char_of(complement_code(code)),
        None => b'N',
    }
}

/// Character-level reverse complement of a sequence
pub fn reverse_complement_chars(sequence: &[u8]) -> Vec<u8> {
    sequence.iter().rev().map(|&b| complement_char(b)).collect()
}

//! Reverse complement of encoded k-mers
//!
//! The word is handled as four 16-bit chunks of 8 bases each. A 65536-entry
//! table maps a chunk to its reverse-complemented chunk; the whole word is then
//! reassembled with the chunks in reverse order. The table is built lazily,
//! once per process, and is read-only afterwards.

use std::sync::OnceLock;

use crate::kmer::Kmer;

const CHUNK_BITS: u32 = 16;
const CHUNKS: u32 = 64 / CHUNK_BITS;
const TABLE_LEN: usize = 1 << CHUNK_BITS;

static TABLE: OnceLock<Box<[u16]>> = OnceLock::new();

fn build_table() -> Box<[u16]> {
    let table: Box<[u16]> = (0..TABLE_LEN)
        .map(|chunk| {
            let mut src = chunk as u16;
            let mut out = 0u16;
            for _ in 0..8 {
                out = (out << 2) | (3 - (src & 0b11));
                src >>= 2;
            }
            out
        })
        .collect();
    log::debug!("Built reverse-complement table ({} entries)", table.len());
    table
}

#[inline]
fn table() -> &'static [u16] {
    TABLE.get_or_init(build_table)
}

/// Reverse complement of a k-mer: complement every base and reverse all 32 positions
pub fn reverse_complement(kmer: Kmer) -> Kmer {
    let table = table();
    let word = kmer.bits();

    let mut out = 0u64;
    for i in 0..CHUNKS {
        let chunk = (word >> (CHUNK_BITS * (CHUNKS - 1 - i))) & 0xFFFF;
        out |= (table[chunk as usize] as u64) << (CHUNK_BITS * i);
    }
    Kmer::from_bits(out)
}

/// Numerically smaller of a k-mer and its reverse complement
#[inline]
pub fn canonical(kmer: Kmer) -> Kmer {
    kmer.min(reverse_complement(kmer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::reverse_complement_chars;
    use crate::kmer::{decode, encode};

    #[test]
    fn test_all_a_becomes_all_t() {
        let kmer = encode(&[b'A'; 32]).unwrap().kmer;
        assert_eq!(&decode(reverse_complement(kmer)), &[b'T'; 32]);
    }

    #[test]
    fn test_matches_character_reverse_complement() {
        let seq = b"AACCGGTTACGTTTGCAAGCTAGCTAGGATCC";
        let kmer = encode(seq).unwrap().kmer;
        let expected = reverse_complement_chars(seq);
        assert_eq!(decode(reverse_complement(kmer)).to_vec(), expected);
    }

    #[test]
    fn test_involution_on_edge_values() {
        for bits in [0u64, u64::MAX, 1, 1 << 63, 0x0123_4567_89AB_CDEF] {
            let kmer = Kmer::from_bits(bits);
            assert_eq!(reverse_complement(reverse_complement(kmer)), kmer);
        }
    }

    #[test]
    fn test_table_chunk() {
        // "CAAAAAAA": C at chunk position 0 -> "TTTTTTTG", G at position 7
        let t = table();
        assert_eq!(t[0x0001], 0b1011_1111_1111_1111);
        assert_eq!(t.len(), TABLE_LEN);
    }

    #[test]
    fn test_canonical_is_strand_independent() {
        let kmer = encode(b"GATTACAGATTACAGATTACAGATTACAGATT").unwrap().kmer;
        assert_eq!(canonical(kmer), canonical(reverse_complement(kmer)));
        assert!(canonical(kmer) <= kmer);
    }

    #[test]
    fn test_concurrent_first_use() {
        let handles: Vec<_> = (0..8u64)
            .map(|i| {
                std::thread::spawn(move || {
                    let kmer = Kmer::from_bits(i.wrapping_mul(0x9E37_79B9_7F4A_7C15));
                    reverse_complement(reverse_complement(kmer)) == kmer
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
    }
}

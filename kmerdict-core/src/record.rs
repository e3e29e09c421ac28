//! K-mer records and their total order
//!
//! Dictionaries are kept sorted by the numeric value of the encoded k-mer so
//! they can be binary searched. Only the k-mer takes part in the order; the
//! variant id of a [`VariantKmerRecord`] is payload.

use std::cmp::Ordering;
use std::io::{Read, Write};

use crate::binio::{read_u32, read_u64, write_u32, write_u64};
use crate::error::KmerResult;
use crate::kmer::Kmer;

/// Anything ordered by an encoded k-mer
pub trait KmerKey {
    fn kmer(&self) -> Kmer;
}

impl KmerKey for Kmer {
    fn kmer(&self) -> Kmer {
        *self
    }
}

/// Plain dictionary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KmerRecord {
    pub kmer: Kmer,
}

/// Dictionary entry for a k-mer created by a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VariantKmerRecord {
    pub kmer: Kmer,
    pub variant_id: u32,
}

impl KmerKey for KmerRecord {
    fn kmer(&self) -> Kmer {
        self.kmer
    }
}

impl KmerKey for VariantKmerRecord {
    fn kmer(&self) -> Kmer {
        self.kmer
    }
}

impl KmerRecord {
    /// Bytes per record on disk
    pub const SIZE: usize = 8;

    pub fn new(kmer: Kmer) -> Self {
        Self { kmer }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> KmerResult<()> {
        write_u64(writer, self.kmer.bits())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> KmerResult<Self> {
        Ok(Self {
            kmer: Kmer::from_bits(read_u64(reader)?),
        })
    }
}

impl VariantKmerRecord {
    /// Bytes per record on disk
    pub const SIZE: usize = 12;

    pub fn new(kmer: Kmer, variant_id: u32) -> Self {
        Self { kmer, variant_id }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> KmerResult<()> {
        write_u64(writer, self.kmer.bits())?;
        write_u32(writer, self.variant_id)
    }

    pub fn read_from<R: Read>(reader: &mut R) -> KmerResult<Self> {
        let kmer = Kmer::from_bits(read_u64(reader)?);
        let variant_id = read_u32(reader)?;
        Ok(Self { kmer, variant_id })
    }
}

/// Compare two records by encoded k-mer value
#[inline]
pub fn compare<T: KmerKey>(a: &T, b: &T) -> Ordering {
    a.kmer().cmp(&b.kmer())
}

/// Sort records by k-mer. Stable, so equal k-mers keep their input order.
pub fn sort_records<T: KmerKey>(records: &mut [T]) {
    records.sort_by(compare);
}

/// Index of a record holding `kmer` in a slice sorted by [`sort_records`]
pub fn find_record<T: KmerKey>(records: &[T], kmer: Kmer) -> Option<usize> {
    records.binary_search_by(|r| r.kmer().cmp(&kmer)).ok()
}

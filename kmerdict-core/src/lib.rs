//! kmerdict core library
//!
//! 2-bit k-mer codec, table-driven reverse complement, canonical minimizer
//! selection (with and without a point variant) and the fixed-width record
//! plumbing used by persisted k-mer dictionaries.

pub mod base;
pub mod binio;
pub mod error;
pub mod fields;
pub mod kmer;
pub mod minimizer;
pub mod record;
pub mod revcomp;

// Re-export commonly used types and functions
pub use error::{KmerError, KmerResult};
pub use kmer::{base_at, decode, encode, shift, Encoded, Kmer, K};
pub use minimizer::{
    minimizer, minimizer_with_variant, minimizer_with_variant_from, Minimizer, Strand, Variant,
    DEFAULT_SSL,
};
pub use record::{compare, find_record, sort_records, KmerKey, KmerRecord, VariantKmerRecord};
pub use revcomp::{canonical, reverse_complement};

/// Version information for the kmerdict core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

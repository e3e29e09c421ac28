//! encode / decode / revcomp commands

use anyhow::{Context, Result};
use kmerdict_core::{Kmer, K};
use serde::Serialize;

use super::{emit, Row};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct KmerRow {
    pub sequence: String,
    /// `None` when the input held an N
    pub code: Option<u64>,
}

impl Row for KmerRow {
    fn tsv(&self) -> String {
        match self.code {
            Some(code) => format!("{}\t{}", self.sequence, code),
            None => format!("{}\tambiguous", self.sequence),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RevcompRow {
    pub sequence: String,
    pub code: u64,
    pub reverse_complement: String,
    pub reverse_complement_code: u64,
    pub canonical_code: u64,
}

impl Row for RevcompRow {
    fn tsv(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.sequence,
            self.code,
            self.reverse_complement,
            self.reverse_complement_code,
            self.canonical_code
        )
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal k-mer code
pub fn parse_code(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed.map_err(|e| format!("invalid k-mer code {:?}: {}", s, e))
}

fn check_length(sequence: &str) -> Result<(), CliError> {
    if sequence.len() != K {
        return Err(CliError::invalid_argument(format!(
            "k-mer must be {} bases, got {}",
            K,
            sequence.len()
        )));
    }
    Ok(())
}

pub fn encode_row(sequence: &str) -> Result<KmerRow> {
    check_length(sequence)?;
    let encoded = kmerdict_core::encode(sequence.as_bytes())
        .with_context(|| format!("Failed to encode {}", sequence))?;
    if encoded.contains_n {
        log::warn!("K-mer {} contains an N; it has no code", sequence);
    }
    Ok(KmerRow {
        sequence: sequence.to_string(),
        code: encoded.into_option().map(Kmer::bits),
    })
}

pub fn encode(sequence: &str, json: bool) -> Result<()> {
    let row = encode_row(sequence)?;
    emit(&mut std::io::stdout().lock(), &row, json)
}

pub fn decode(code: u64, json: bool) -> Result<()> {
    let kmer = Kmer::from_bits(code);
    let row = KmerRow {
        sequence: kmer.to_string(),
        code: Some(code),
    };
    emit(&mut std::io::stdout().lock(), &row, json)
}

pub fn revcomp_row(sequence: &str) -> Result<RevcompRow> {
    check_length(sequence)?;
    let kmer: Kmer = sequence
        .parse()
        .with_context(|| format!("Failed to encode {}", sequence))?;
    let rc = kmer.reverse_complement();
    Ok(RevcompRow {
        sequence: kmer.to_string(),
        code: kmer.bits(),
        reverse_complement: rc.to_string(),
        reverse_complement_code: rc.bits(),
        canonical_code: kmer.canonical().bits(),
    })
}

pub fn revcomp(sequence: &str, json: bool) -> Result<()> {
    let row = revcomp_row(sequence)?;
    emit(&mut std::io::stdout().lock(), &row, json)
}

//! dump command - list a binary record file

use anyhow::{anyhow, Context, Result};
use kmerdict_core::{sort_records, KmerRecord, VariantKmerRecord};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{emit, Row};

#[derive(Debug, Serialize)]
pub struct RecordRow {
    pub code: u64,
    pub kmer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<u32>,
}

impl Row for RecordRow {
    fn tsv(&self) -> String {
        match self.variant_id {
            Some(id) => format!("{}\t{}\t{}", self.code, self.kmer, id),
            None => format!("{}\t{}", self.code, self.kmer),
        }
    }
}

fn record_count(len: u64, size: usize) -> Result<usize> {
    if len % size as u64 != 0 {
        return Err(anyhow!(
            "File size {} is not a multiple of the {}-byte record size",
            len,
            size
        ));
    }
    Ok((len / size as u64) as usize)
}

/// Read `count` records and return them in k-mer order
pub fn read_rows<R: Read>(
    reader: &mut R,
    count: usize,
    variant: bool,
) -> Result<Vec<RecordRow>> {
    let rows = if variant {
        let mut records = (0..count)
            .map(|i| {
                VariantKmerRecord::read_from(&mut *reader)
                    .with_context(|| format!("Failed to read record {}", i))
            })
            .collect::<Result<Vec<_>>>()?;
        sort_records(&mut records);
        records
            .iter()
            .map(|r| RecordRow {
                code: r.kmer.bits(),
                kmer: r.kmer.to_string(),
                variant_id: Some(r.variant_id),
            })
            .collect()
    } else {
        let mut records = (0..count)
            .map(|i| {
                KmerRecord::read_from(&mut *reader)
                    .with_context(|| format!("Failed to read record {}", i))
            })
            .collect::<Result<Vec<_>>>()?;
        sort_records(&mut records);
        records
            .iter()
            .map(|r| RecordRow {
                code: r.kmer.bits(),
                kmer: r.kmer.to_string(),
                variant_id: None,
            })
            .collect()
    };
    Ok(rows)
}

pub fn execute(path: &Path, variant: bool, json: bool) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let len = file.metadata()?.len();
    let size = if variant {
        VariantKmerRecord::SIZE
    } else {
        KmerRecord::SIZE
    };
    let count = record_count(len, size)?;
    log::info!("Reading {} records from {}", count, path.display());

    let rows = read_rows(&mut BufReader::new(file), count, variant)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for row in &rows {
        emit(&mut out, row, json)?;
    }
    Ok(())
}

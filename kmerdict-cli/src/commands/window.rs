//! minimizer / scan commands

use anyhow::{Context, Result};
use kmerdict_core::fields::{first_token, split_fields};
use kmerdict_core::{
    minimizer as select_minimizer, minimizer_with_variant_from, Minimizer, Strand, Variant, K,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use super::{emit, Row};
use crate::config::Config;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct MinimizerRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Window start within the scanned sequence
    pub start: usize,
    pub offset: u32,
    pub strand: Strand,
    pub minimizer: String,
    /// `None` when the minimizer holds an N or another non-ACGT character
    pub code: Option<u64>,
}

impl MinimizerRow {
    fn new(name: Option<&str>, start: usize, m: &Minimizer) -> Self {
        let code = match m.encode() {
            Ok(encoded) => encoded.into_option().map(|k| k.bits()),
            Err(e) => {
                log::debug!("Minimizer {} has no code: {}", m, e);
                None
            }
        };
        Self {
            name: name.map(str::to_string),
            start,
            offset: m.offset,
            strand: m.strand,
            minimizer: m.to_string(),
            code,
        }
    }
}

impl Row for MinimizerRow {
    fn tsv(&self) -> String {
        let code = self
            .code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "ambiguous".to_string());
        let fields = format!(
            "{}\t{}\t{}\t{}\t{}",
            self.start, self.offset, self.strand, self.minimizer, code
        );
        match &self.name {
            Some(name) => format!("{}\t{}", name, fields),
            None => fields,
        }
    }
}

/// Parse `POSITION:BASE`, e.g. `12:T`
pub fn parse_variant(s: &str) -> Result<Variant, String> {
    let (pos, base) = s
        .split_once(':')
        .ok_or_else(|| format!("expected POSITION:BASE, got {:?}", s))?;
    let position = pos
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid variant position {:?}: {}", pos, e))?;
    match base.trim().as_bytes() {
        [b] if b"ACGTNacgtn".contains(b) => Ok(Variant::new(position, *b)),
        _ => Err(format!("variant base must be one of A, C, G, T, N; got {:?}", base)),
    }
}

pub fn minimizer_row(window: &str, variant: Option<Variant>) -> Result<MinimizerRow> {
    let window = window.as_bytes();
    if window.len() < K {
        return Err(CliError::invalid_argument(format!(
            "window must be at least {} bases, got {}",
            K,
            window.len()
        ))
        .into());
    }

    let plain = select_minimizer(window);
    let m = match variant {
        Some(v) => {
            if v.position >= window.len() {
                return Err(CliError::invalid_argument(format!(
                    "variant position {} outside window of {}",
                    v.position,
                    window.len()
                ))
                .into());
            }
            log::debug!("Unmutated minimizer {} at {}{}", plain, plain.offset, plain.strand);
            minimizer_with_variant_from(window, &plain, v)
        }
        None => plain,
    };
    Ok(MinimizerRow::new(None, 0, &m))
}

pub fn minimizer(window: &str, variant: Option<Variant>, json: bool) -> Result<()> {
    let row = minimizer_row(window, variant)?;
    emit(&mut std::io::stdout().lock(), &row, json)
}

/// Minimizers of the windows of `sequence` starting every `stride` bases
pub fn scan_sequence(
    name: &str,
    sequence: &[u8],
    ssl: usize,
    stride: usize,
    skip_ambiguous: bool,
) -> Result<Vec<MinimizerRow>> {
    if sequence.len() < ssl {
        log::debug!(
            "Skipping {}: {} bases is shorter than ssl {}",
            name,
            sequence.len(),
            ssl
        );
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    for start in (0..=sequence.len() - ssl).step_by(stride) {
        let m = select_minimizer(&sequence[start..start + ssl]);
        let row = MinimizerRow::new(Some(name), start, &m);
        if skip_ambiguous && row.code.is_none() {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

pub fn scan(
    config: &Config,
    input: &Path,
    ssl: Option<usize>,
    stride: Option<usize>,
    json: bool,
) -> Result<()> {
    let ssl = ssl.unwrap_or(config.minimizer.ssl);
    let stride = stride.unwrap_or(config.scan.stride);
    if ssl < K {
        return Err(CliError::invalid_argument(format!("--ssl must be at least {}", K)).into());
    }
    if stride == 0 {
        return Err(CliError::invalid_argument("--stride must be positive").into());
    }

    log::info!("Scanning {} (ssl={}, stride={})", input.display(), ssl, stride);
    let reader = BufReader::new(
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?,
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut sequences = 0usize;
    let mut windows = 0usize;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", input.display()))?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields = split_fields(&line);
        if fields.len() < 2 {
            log::warn!("Line {}: expected name<TAB>sequence, skipping", line_no + 1);
            continue;
        }

        let name = first_token(fields[0]);
        let sequence = fields[1].trim().as_bytes();
        let rows = scan_sequence(name, sequence, ssl, stride, config.scan.skip_ambiguous)?;
        sequences += 1;
        windows += rows.len();
        for row in &rows {
            emit(&mut out, row, json)?;
        }
    }
    out.flush()?;

    log::info!("Reported {} windows from {} sequences", windows, sequences);
    Ok(())
}

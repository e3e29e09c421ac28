//! Command implementations for the kmerdict CLI

pub mod codec;
pub mod dump;
pub mod window;

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

/// One line of command output
pub trait Row: Serialize {
    fn tsv(&self) -> String;
}

/// Write a row to stdout as JSON or tab-separated text
pub fn emit<R: Row, W: Write>(out: &mut W, row: &R, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(row).context("Failed to serialize output row")?;
        writeln!(out, "{}", line)?;
    } else {
        writeln!(out, "{}", row.tsv())?;
    }
    Ok(())
}

//! Fixed-width integer I/O for persisted dictionaries
//!
//! Integers are written in the host's native byte order with no padding. The
//! format does not describe its own endianness, so files are only portable
//! between machines of the same byte order.

use std::io::{ErrorKind, Read, Write};

use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{KmerError, KmerResult};

fn read_error(err: std::io::Error, expected: usize) -> KmerError {
    match err.kind() {
        ErrorKind::UnexpectedEof => KmerError::ShortRead { expected },
        _ => KmerError::Io(err),
    }
}

fn write_error(err: std::io::Error, expected: usize) -> KmerError {
    match err.kind() {
        ErrorKind::WriteZero => KmerError::ShortWrite { expected },
        _ => KmerError::Io(err),
    }
}

pub fn write_u8<W: Write>(writer: &mut W, x: u8) -> KmerResult<()> {
    writer.write_u8(x).map_err(|e| write_error(e, 1))
}

pub fn write_u32<W: Write>(writer: &mut W, x: u32) -> KmerResult<()> {
    writer.write_u32::<NativeEndian>(x).map_err(|e| write_error(e, 4))
}

pub fn write_u64<W: Write>(writer: &mut W, x: u64) -> KmerResult<()> {
    writer.write_u64::<NativeEndian>(x).map_err(|e| write_error(e, 8))
}

pub fn read_u8<R: Read>(reader: &mut R) -> KmerResult<u8> {
    reader.read_u8().map_err(|e| read_error(e, 1))
}

pub fn read_u32<R: Read>(reader: &mut R) -> KmerResult<u32> {
    reader.read_u32::<NativeEndian>().map_err(|e| read_error(e, 4))
}

pub fn read_u64<R: Read>(reader: &mut R) -> KmerResult<u64> {
    reader.read_u64::<NativeEndian>().map_err(|e| read_error(e, 8))
}

//! Low-level bit packing primitives for the deltapack codec.
//!
//! This crate provides [`BitWriter`] and [`BitReader`] over caller-owned byte
//! buffers. Both track a cumulative overflow flag instead of returning
//! per-call errors: a write past the end of the buffer is dropped, a read past
//! the end yields zeros, and the flag records that it happened. Callers check
//! [`BitWriter::is_overflowed`] / [`BitReader::is_overflowed`] once per
//! message, after the whole message has been processed.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Infallible hot path** - No `Result` on per-field operations; exhaustion
//!   is a sticky flag checked once per message.
//! - **No domain knowledge** - This crate knows nothing about values, schemes,
//!   or replication.
//!
//! # Bit order
//!
//! Bits are packed least-significant-first into consecutive bytes, which is
//! equivalent to filling little-endian 32-bit words LSB-first. This ordering
//! is part of the wire contract shared by every encoder and decoder pair.
//!
//! # Example
//!
//! ```
//! use bitstream::{BitReader, BitWriter};
//!
//! let mut buf = [0u8; 8];
//! let mut writer = BitWriter::new(&mut buf);
//! writer.write_bits(1, 1);
//! writer.write_bits(42, 7);
//! writer.write_alignment_bits();
//! assert!(!writer.is_overflowed());
//! let used = writer.bytes_written();
//!
//! let mut reader = BitReader::new(&buf[..used]);
//! assert_eq!(reader.read_bits(1), 1);
//! assert_eq!(reader.read_bits(7), 42);
//! reader.read_alignment_bits();
//! assert!(!reader.is_overflowed());
//! ```

mod reader;
mod writer;

pub use reader::BitReader;
pub use writer::BitWriter;

//! Byte cursor and byte sink capabilities.
//!
//! The reader only needs "give me the next byte" with one byte of
//! lookahead; the writer only needs "append this". Input is always fully
//! buffered before a parse starts.

mod read;
mod write;

pub use read::{FileReadStream, ReadStream, StringReadStream};
pub use write::{FileWriteStream, StringWriteStream, WriteStream};

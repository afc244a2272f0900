//! evjson - an event-driven JSON codec.
//!
//! The crate is built around one event interface, [`Handler`], with three
//! parties on either side of it:
//!
//! - [`Reader`] parses text from a [`ReadStream`] and emits events.
//! - [`Document`] folds events into a [`Value`] tree.
//! - [`Writer`] turns events into compact text on a [`WriteStream`].
//!
//! A [`Value`] replays itself as events through [`Value::write_to`], so the
//! same writer serves both SAX-style (parser straight into writer) and
//! DOM-style (parse, edit, serialize) pipelines.
//!
//! # Extensions
//!
//! Beyond strict JSON the reader accepts `NaN`, `Infinity` and `-Infinity`,
//! and integer literals with an explicit `i32` / `i64` width suffix. The
//! writer emits the non-finite tokens but never the suffixes.
//!
//! # Errors
//!
//! Malformed input yields an [`ErrorCode`] with a fixed lookup string.
//! API misuse (accessing the wrong kind, duplicate keys) panics; see
//! [`error`].

// Library code propagates errors; contract violations go through one helper.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod conformance;
pub mod document;
pub mod error;
pub mod handler;
pub mod reader;
pub mod stream;
pub mod value;
pub mod writer;

pub use document::Document;
pub use error::{parse_error_str, ErrorCode, ParseResult};
pub use handler::Handler;
pub use reader::{Limits, Reader};
pub use stream::{FileReadStream, FileWriteStream, ReadStream, StringReadStream, StringWriteStream, WriteStream};
pub use value::{Member, Value, ValueType};
pub use writer::Writer;

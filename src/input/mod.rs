//! Terminal input: key events and the byte-stream decoder.

pub mod decoder;
pub mod key;

pub use decoder::{ByteSource, Decoded, Decoder, DecoderContext, SliceSource, StdinSource};
pub use key::{Key, KeyCode, Modifiers};

//! Terminal output layer.
//!
//! The renderer knows nothing about menus, info boxes or keys. It provides
//! the escape-sequence vocabulary ([`ansi`]) and the single buffered stream
//! ([`OutputBuffer`]) everything above writes through.

pub mod ansi;
pub mod output;

pub use output::OutputBuffer;

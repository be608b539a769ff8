//! Error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generator run.
#[derive(Debug, Error)]
pub enum Error {
    /// The definition has no usable `MCU <family> <variant>` line.
    #[error("Missing MCU type in config")]
    MissingMcu,
    /// Reading the definition or writing a header failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// File that could not be read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a pin definition line is skipped.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PinLineError {
    /// A pin line needs at least a pin name, a label and a type.
    #[error("expected `P<port><index> <label> <type>`")]
    TooFewTokens,
    /// The characters after the port letter are not a pin number.
    #[error("invalid pin index in {0:?}")]
    BadIndex(String),
    /// The port has no slot for the given index.
    #[error("pin P{port}{index} is outside port {port} ({width} pins)")]
    IndexOutOfRange {
        /// Port letter
        port: char,
        /// Requested index
        index: u16,
        /// Number of pins on the port
        width: u8,
    },
}

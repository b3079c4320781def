//! The error types for `zonedata` operations.

use core::fmt;

#[cfg(feature = "std")]
use std::io;

/// A section of a version 1 TZif block.
///
/// Used to report where decoding stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    TransitionTimes,
    TransitionTypes,
    LocalTimeTypes,
    Designations,
    LeapSeconds,
    StandardWallIndicators,
    UtLocalIndicators,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Header => "header",
            Self::TransitionTimes => "transition times",
            Self::TransitionTypes => "transition types",
            Self::LocalTimeTypes => "local time types",
            Self::Designations => "time zone designations",
            Self::LeapSeconds => "leap second records",
            Self::StandardWallIndicators => "standard/wall indicators",
            Self::UtLocalIndicators => "UT/local indicators",
        })
    }
}

/// The table an out of range index pointed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTable {
    /// A transition type index into the local time type records.
    LocalTimeTypes,
    /// A local time type's designation index into the abbreviation bytes.
    Designations,
}

impl fmt::Display for IndexTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LocalTimeTypes => "local time type",
            Self::Designations => "designation",
        })
    }
}

/// An error encountered while decoding a TZif block.
///
/// Every variant is terminal for the input being decoded.
#[derive(Debug)]
#[non_exhaustive]
pub enum DecodeError {
    /// The input did not begin with `TZif`.
    MagicMismatch { found: [u8; 4] },
    /// A section declared more bytes than the input holds.
    TruncatedStream {
        section: Section,
        needed: usize,
        available: usize,
    },
    /// A section length computed from the header overflowed `usize`.
    SectionOverflow { section: Section },
    /// An index pointed past the end of its table.
    IndexOutOfRange {
        table: IndexTable,
        index: usize,
        len: usize,
    },
    /// A designation had no NUL byte before the end of the abbreviation bytes.
    MissingTerminator { offset: usize },
    /// A designation held a byte that cannot appear in a quoted table string:
    /// a control or non-ASCII byte, `"` or `\`.
    InvalidDesignation { offset: usize, value: u8 },
    /// A boolean byte was neither `0` nor `1`.
    InvalidIndicator { section: Section, value: u8 },
    #[cfg(feature = "std")]
    Io(io::Error),
}

impl DecodeError {
    /// Returns whether this error is a failed `TZif` signature check.
    ///
    /// Callers walking a zoneinfo tree use this to tell non-TZif files apart
    /// from corrupt ones.
    pub fn is_magic_mismatch(&self) -> bool {
        matches!(self, Self::MagicMismatch { .. })
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MagicMismatch { found } => {
                write!(f, "expected TZif magic, found {found:?}")
            }
            Self::TruncatedStream {
                section,
                needed,
                available,
            } => write!(
                f,
                "{section} need {needed} bytes, but only {available} remain"
            ),
            Self::SectionOverflow { section } => {
                write!(f, "length of {section} overflows the addressable size")
            }
            Self::IndexOutOfRange { table, index, len } => write!(
                f,
                "{table} index {index} is out of range for a table of length {len}"
            ),
            Self::MissingTerminator { offset } => write!(
                f,
                "designation starting at byte {offset} has no NUL terminator"
            ),
            Self::InvalidDesignation { offset, value } => write!(
                f,
                "designation byte {value:#04x} at offset {offset} is not printable ASCII"
            ),
            Self::InvalidIndicator { section, value } => {
                write!(f, "invalid boolean value {value} in {section}")
            }
            #[cfg(feature = "std")]
            Self::Io(err) => write!(f, "failed to read TZif data: {err}"),
        }
    }
}

impl core::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            #[cfg(feature = "std")]
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<io::Error> for DecodeError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// An error for an unusable zone name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneNameError {
    Empty,
}

impl fmt::Display for ZoneNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("zone name must not be empty"),
        }
    }
}

impl core::error::Error for ZoneNameError {}

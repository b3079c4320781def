//! The `zonedata` crate decodes TZif files and re-encodes each zone as a
//! deterministic textual table.
//!
//! ```rust
//! use zonedata::{convert, TableConfig, ZoneName};
//!
//! // A TZif block with one transition into EST.
//! let mut tzif = b"TZif\0".to_vec();
//! tzif.extend_from_slice(&[0; 15]);
//! for count in [0u32, 0, 0, 1, 1, 4] {
//!     tzif.extend_from_slice(&count.to_be_bytes());
//! }
//! tzif.extend_from_slice(&1000i32.to_be_bytes());
//! tzif.push(0);
//! tzif.extend_from_slice(&(-18000i32).to_be_bytes());
//! tzif.extend_from_slice(&[0, 0]);
//! tzif.extend_from_slice(b"EST\0");
//!
//! let zone = ZoneName::new("America/New_York").unwrap();
//! let table = convert(&tzif, &zone, &TableConfig::new("2018g")).unwrap();
//! assert_eq!(
//!     table,
//!     b"{ version = \"2018g\", zone = \"America/New_York\",\n  \
//!       {ts=1000, dst=false, name=\"EST\", ut_offset=-18000},\n}\n"
//! );
//! ```
//!
//! Decoding is strict: every section is read exactly as the header declares,
//! and any short read, out of range index, or malformed designation is an
//! error rather than a best effort result. Only the version 1 (32-bit) data
//! block is read.
//!
//! Walking a zoneinfo directory and packaging the tables is left to the
//! caller; see the `zonedata-pack` tool in this repository.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod name;
pub mod table;
pub mod tzif;

#[cfg(test)]
pub(crate) mod test_utils;

use alloc::vec::Vec;

#[doc(inline)]
pub use error::{DecodeError, ZoneNameError};
#[doc(inline)]
pub use name::ZoneName;
#[doc(inline)]
pub use table::{TableConfig, TableEncoder};
#[doc(inline)]
pub use tzif::{TransitionRow, TzifV1};

/// The `zonedata` decode result type
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Decodes a TZif block from `bytes` and encodes it as the table for `zone`.
///
/// No output is produced when decoding fails.
pub fn convert(bytes: &[u8], zone: &ZoneName, config: &TableConfig) -> DecodeResult<Vec<u8>> {
    let tzif = TzifV1::from_bytes(bytes)?;
    #[cfg(feature = "log")]
    log::trace!(
        "encoding {zone} with {} transitions",
        tzif.transition_times().len()
    );
    Ok(TableEncoder::new(config.clone()).encode(&tzif, zone))
}

//! Encoding of a decoded TZif block as a textual zone table.
//!
//! The table is a Lua style literal:
//!
//! ```text
//! { version = "2024a", zone = "America/New_York",
//!   {ts=-1633280400, dst=true, name="EDT", ut_offset=-14400},
//!   {ts=-1615140000, dst=false, name="EST", ut_offset=-18000},
//! }
//! ```
//!
//! One row is written per transition, in the order the transitions were
//! stored. The output depends only on its inputs.

use alloc::{string::String, vec::Vec};
use core::fmt::{self, Write};

use crate::{name::ZoneName, tzif::TzifV1};

/// Configuration for a `TableEncoder`.
///
/// There is no default: the version must come from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// The format version literal written in the table's header line,
    /// usually the tzdata release the input was compiled from.
    pub version: String,
}

impl TableConfig {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

/// Renders `TzifV1` data as a zone table.
#[derive(Debug, Clone)]
pub struct TableEncoder {
    config: TableConfig,
}

impl TableEncoder {
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Encodes `tzif` as a table labelled with `zone`.
    pub fn encode(&self, tzif: &TzifV1, zone: &ZoneName) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(tzif, zone, &mut out);
        out
    }

    /// Appends the table for `tzif` to `out`.
    pub fn encode_into(&self, tzif: &TzifV1, zone: &ZoneName, out: &mut Vec<u8>) {
        let mut w = ByteWriter(out);
        // Writing to a `Vec` cannot fail.
        let _ = writeln!(
            w,
            "{{ version = \"{}\", zone = \"{}\",",
            self.config.version, zone
        );
        for row in tzif.rows() {
            let _ = write!(w, "  {{ts={}, dst={}, name=\"", row.timestamp, row.is_dst);
            // Decoding only admits printable ASCII without quotes or backslashes.
            w.0.extend_from_slice(row.designation);
            let _ = writeln!(w, "\", ut_offset={}}},", row.ut_offset);
        }
        w.0.extend_from_slice(b"}\n");
    }
}

struct ByteWriter<'a>(&'a mut Vec<u8>);

impl Write for ByteWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

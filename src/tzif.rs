//! Decoding of the version 1 data block of a TZif file.
//!
//! `TZif` stands for Time zone information format and is laid out by
//! [RFC 8536][rfc8536] and the [tzfile manual][tzif-manual].
//!
//! Only the first header and its 32-bit data block are read. Any version 2+
//! header, data block, or footer that follows is left untouched, so a modern
//! `zic` output decodes the same way a version 1 file does.
//!
//! [rfc8536]: https://datatracker.ietf.org/doc/html/rfc8536
//! [tzif-manual]: https://man7.org/linux/man-pages/man5/tzfile.5.html

use alloc::vec::Vec;
use core::ops::Range;

use crate::error::{DecodeError, IndexTable, Section};

#[cfg(feature = "std")]
use std::{fs::File, io::Read, path::Path};

/// The four byte signature at the start of every TZif file.
pub const TZIF_MAGIC: [u8; 4] = *b"TZif";

/// The length of a TZif header in bytes.
pub const HEADER_LEN: usize = 44;

const LOCAL_TIME_TYPE_LEN: usize = 6;
const LEAP_SECOND_LEN: usize = 8;

/// A decoded TZif header.
///
/// The counts are kept as they were stored. Section lengths are derived from
/// them with checked arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TzifHeader {
    /// The raw version byte: `0` for version 1, otherwise an ASCII digit.
    pub version: u8,
    /// The number of UT/local indicators.
    pub isutcnt: u32,
    /// The number of standard/wall indicators.
    pub isstdcnt: u32,
    /// The number of leap second records.
    pub leapcnt: u32,
    /// The number of transition times.
    pub timecnt: u32,
    /// The number of local time type records.
    pub typecnt: u32,
    /// The number of bytes of time zone designations.
    pub charcnt: u32,
}

impl TzifHeader {
    /// Decodes a header from the start of `bytes`.
    ///
    /// The magic is checked before anything else is read.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        SectionReader::new(bytes).header()
    }

    /// Returns the version as a number, treating the `0` byte as version 1.
    pub fn version_number(&self) -> u8 {
        match self.version {
            0 => 1,
            v => v.wrapping_sub(b'0'),
        }
    }
}

/// A local time type record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTimeType {
    /// The offset from UT in seconds.
    pub ut_offset: i32,
    /// Whether this local time type is daylight saving time.
    pub is_dst: bool,
    /// The byte offset of this type's designation in the designation bytes.
    pub designation_index: u8,
}

/// A leap second record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeapSecond {
    /// The time at which the leap second correction occurs.
    pub occurrence: u32,
    /// The total correction applied after `occurrence`.
    pub correction: u32,
}

/// A single transition with its local time type resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRow<'a> {
    pub timestamp: i32,
    pub is_dst: bool,
    /// The designation bytes, without the NUL terminator.
    pub designation: &'a [u8],
    pub ut_offset: i32,
}

/// The decoded version 1 data block of a TZif file.
///
/// A `TzifV1` can only be built by decoding, so every transition type index
/// and every designation index it holds is known to be in bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TzifV1 {
    header: TzifHeader,
    transition_times: Vec<i32>,
    transition_types: Vec<u8>,
    local_time_types: Vec<LocalTimeType>,
    designations: Vec<u8>,
    // The resolved designation of each local time type, by type index.
    designation_ranges: Vec<Range<usize>>,
    leap_seconds: Vec<LeapSecond>,
    standard_wall_indicators: Vec<bool>,
    ut_local_indicators: Vec<bool>,
}

// ==== TzifV1 decoding methods ====

impl TzifV1 {
    /// Decodes the version 1 block from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let result = SectionReader::new(bytes).tzif();
        #[cfg(feature = "log")]
        if let Err(err) = &result {
            log::debug!("TZif decoding failed: {err}");
        }
        result
    }

    /// Reads `reader` to its end and decodes the version 1 block.
    #[cfg(feature = "std")]
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, DecodeError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::from_bytes(&buf)
    }

    /// Opens and decodes the TZif file at `path`.
    #[cfg(feature = "std")]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        Self::from_reader(File::open(path)?)
    }
}

// ==== TzifV1 accessors ====

impl TzifV1 {
    pub fn header(&self) -> &TzifHeader {
        &self.header
    }

    /// The transition times in the order they were stored.
    pub fn transition_times(&self) -> &[i32] {
        &self.transition_times
    }

    pub fn transition_types(&self) -> &[u8] {
        &self.transition_types
    }

    pub fn local_time_types(&self) -> &[LocalTimeType] {
        &self.local_time_types
    }

    /// The raw, NUL separated designation bytes.
    pub fn designations(&self) -> &[u8] {
        &self.designations
    }

    pub fn leap_seconds(&self) -> &[LeapSecond] {
        &self.leap_seconds
    }

    pub fn standard_wall_indicators(&self) -> &[bool] {
        &self.standard_wall_indicators
    }

    pub fn ut_local_indicators(&self) -> &[bool] {
        &self.ut_local_indicators
    }

    /// Returns the designation of `local_time_type` without its terminator,
    /// or `None` if its index does not resolve in this block.
    pub fn designation(&self, local_time_type: &LocalTimeType) -> Option<&[u8]> {
        designation_range(
            &self.designations,
            usize::from(local_time_type.designation_index),
        )
        .ok()
        .map(|range| &self.designations[range])
    }

    /// Returns an iterator over every transition, in stored order, joined
    /// with its local time type.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = TransitionRow<'_>> + '_ {
        self.transition_times
            .iter()
            .zip(self.transition_types.iter())
            .map(|(&timestamp, &type_index)| {
                let type_index = usize::from(type_index);
                let local_time_type = &self.local_time_types[type_index];
                let designation = self.designation_ranges[type_index].clone();
                TransitionRow {
                    timestamp,
                    is_dst: local_time_type.is_dst,
                    designation: &self.designations[designation],
                    ut_offset: local_time_type.ut_offset,
                }
            })
    }
}

/// Resolves the NUL terminated designation starting at `index` to its byte
/// range, terminator excluded.
///
/// A designation may only hold printable ASCII other than `"` and `\`.
fn designation_range(designations: &[u8], index: usize) -> Result<Range<usize>, DecodeError> {
    let rest = designations
        .get(index..)
        .filter(|rest| !rest.is_empty())
        .ok_or(DecodeError::IndexOutOfRange {
            table: IndexTable::Designations,
            index,
            len: designations.len(),
        })?;
    let end = rest
        .iter()
        .position(|&b| b == 0)
        .ok_or(DecodeError::MissingTerminator { offset: index })?;
    if let Some(position) = rest[..end].iter().position(|&b| !is_designation_byte(b)) {
        return Err(DecodeError::InvalidDesignation {
            offset: index + position,
            value: rest[position],
        });
    }
    Ok(index..index + end)
}

fn is_designation_byte(b: u8) -> bool {
    matches!(b, b' '..=b'~') && b != b'"' && b != b'\\'
}

/// A forward only reader over the sections of a TZif block.
struct SectionReader<'a> {
    bytes: &'a [u8],
}

impl<'a> SectionReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Splits `len` bytes off the front of the input.
    fn take(&mut self, section: Section, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.bytes.len() < len {
            return Err(DecodeError::TruncatedStream {
                section,
                needed: len,
                available: self.bytes.len(),
            });
        }
        let (taken, rest) = self.bytes.split_at(len);
        self.bytes = rest;
        Ok(taken)
    }

    /// Splits off `count` elements of `size` bytes each.
    fn take_elements(
        &mut self,
        section: Section,
        count: u32,
        size: usize,
    ) -> Result<&'a [u8], DecodeError> {
        let len = usize::try_from(count)
            .ok()
            .and_then(|count| count.checked_mul(size))
            .ok_or(DecodeError::SectionOverflow { section })?;
        self.take(section, len)
    }

    fn header(&mut self) -> Result<TzifHeader, DecodeError> {
        let magic = self.take(Section::Header, TZIF_MAGIC.len())?;
        if magic != TZIF_MAGIC {
            return Err(DecodeError::MagicMismatch {
                found: [magic[0], magic[1], magic[2], magic[3]],
            });
        }
        let rest = self.take(Section::Header, HEADER_LEN - TZIF_MAGIC.len())?;
        let (version, rest) = rest.split_at(1);
        // 15 reserved bytes
        let counts = &rest[15..];
        let header = TzifHeader {
            version: version[0],
            isutcnt: be_u32(&counts[0..4]),
            isstdcnt: be_u32(&counts[4..8]),
            leapcnt: be_u32(&counts[8..12]),
            timecnt: be_u32(&counts[12..16]),
            typecnt: be_u32(&counts[16..20]),
            charcnt: be_u32(&counts[20..24]),
        };
        #[cfg(feature = "log")]
        log::trace!("decoded TZif header: {header:?}");
        Ok(header)
    }

    fn tzif(&mut self) -> Result<TzifV1, DecodeError> {
        let header = self.header()?;

        let transition_times = self
            .take_elements(Section::TransitionTimes, header.timecnt, 4)?
            .chunks_exact(4)
            .map(be_i32)
            .collect();

        let transition_types = self
            .take_elements(Section::TransitionTypes, header.timecnt, 1)?
            .to_vec();
        for &index in &transition_types {
            if u32::from(index) >= header.typecnt {
                return Err(DecodeError::IndexOutOfRange {
                    table: IndexTable::LocalTimeTypes,
                    index: usize::from(index),
                    len: header.typecnt as usize,
                });
            }
        }

        let local_time_types = self
            .take_elements(Section::LocalTimeTypes, header.typecnt, LOCAL_TIME_TYPE_LEN)?
            .chunks_exact(LOCAL_TIME_TYPE_LEN)
            .map(|chunk| -> Result<LocalTimeType, DecodeError> {
                Ok(LocalTimeType {
                    ut_offset: be_i32(&chunk[..4]),
                    is_dst: indicator(Section::LocalTimeTypes, chunk[4])?,
                    designation_index: chunk[5],
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let designations = self
            .take_elements(Section::Designations, header.charcnt, 1)?
            .to_vec();
        let designation_ranges = local_time_types
            .iter()
            .map(|local_time_type| {
                designation_range(
                    &designations,
                    usize::from(local_time_type.designation_index),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let leap_seconds = self
            .take_elements(Section::LeapSeconds, header.leapcnt, LEAP_SECOND_LEN)?
            .chunks_exact(LEAP_SECOND_LEN)
            .map(|chunk| LeapSecond {
                occurrence: be_u32(&chunk[..4]),
                correction: be_u32(&chunk[4..]),
            })
            .collect();

        let standard_wall_indicators =
            self.indicators(Section::StandardWallIndicators, header.isstdcnt)?;
        let ut_local_indicators = self.indicators(Section::UtLocalIndicators, header.isutcnt)?;

        Ok(TzifV1 {
            header,
            transition_times,
            transition_types,
            local_time_types,
            designations,
            designation_ranges,
            leap_seconds,
            standard_wall_indicators,
            ut_local_indicators,
        })
    }

    fn indicators(&mut self, section: Section, count: u32) -> Result<Vec<bool>, DecodeError> {
        self.take_elements(section, count, 1)?
            .iter()
            .map(|&value| indicator(section, value))
            .collect()
    }
}

fn indicator(section: Section, value: u8) -> Result<bool, DecodeError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(DecodeError::InvalidIndicator { section, value }),
    }
}

// Callers always pass exactly four bytes.
fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn be_i32(bytes: &[u8]) -> i32 {
    i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

//! Builders for handwritten TZif test input.

use alloc::vec::Vec;

use crate::tzif::TZIF_MAGIC;

/// Assembles a version 1 TZif block with counts derived from its contents.
#[derive(Debug, Default)]
pub(crate) struct TzifBuilder {
    version: u8,
    transitions: Vec<(i32, u8)>,
    local_time_types: Vec<(i32, bool, u8)>,
    designations: Vec<u8>,
    leap_seconds: Vec<(u32, u32)>,
    standard_wall: Vec<u8>,
    ut_local: Vec<u8>,
}

impl TzifBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub(crate) fn transition(mut self, at: i32, type_index: u8) -> Self {
        self.transitions.push((at, type_index));
        self
    }

    pub(crate) fn local_time_type(mut self, offset: i32, is_dst: bool, index: u8) -> Self {
        self.local_time_types.push((offset, is_dst, index));
        self
    }

    pub(crate) fn designations(mut self, bytes: &[u8]) -> Self {
        self.designations = bytes.to_vec();
        self
    }

    pub(crate) fn leap_second(mut self, occurrence: u32, correction: u32) -> Self {
        self.leap_seconds.push((occurrence, correction));
        self
    }

    pub(crate) fn standard_wall(mut self, flags: &[u8]) -> Self {
        self.standard_wall = flags.to_vec();
        self
    }

    pub(crate) fn ut_local(mut self, flags: &[u8]) -> Self {
        self.ut_local = flags.to_vec();
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&TZIF_MAGIC);
        out.push(self.version);
        out.extend_from_slice(&[0; 15]);
        for count in [
            self.ut_local.len(),
            self.standard_wall.len(),
            self.leap_seconds.len(),
            self.transitions.len(),
            self.local_time_types.len(),
            self.designations.len(),
        ] {
            out.extend_from_slice(&(count as u32).to_be_bytes());
        }
        for (at, _) in &self.transitions {
            out.extend_from_slice(&at.to_be_bytes());
        }
        out.extend(self.transitions.iter().map(|(_, index)| index));
        for (offset, is_dst, index) in &self.local_time_types {
            out.extend_from_slice(&offset.to_be_bytes());
            out.push(u8::from(*is_dst));
            out.push(*index);
        }
        out.extend_from_slice(&self.designations);
        for (occurrence, correction) in &self.leap_seconds {
            out.extend_from_slice(&occurrence.to_be_bytes());
            out.extend_from_slice(&correction.to_be_bytes());
        }
        out.extend_from_slice(&self.standard_wall);
        out.extend_from_slice(&self.ut_local);
        out
    }
}

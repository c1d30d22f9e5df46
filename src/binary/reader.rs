//! Sequential rule-set buffer reader.
//!
//! The decoder is total over all byte buffers: truncated trailing data
//! is silently discarded, records with non-UTF-8 payloads are dropped
//! individually, and unrecognized tags are consumed without effect.
//! There is no error path.

use super::format::{RecordTag, RECORD_HEADER_SIZE};

/// A single raw record borrowed from a rule-set buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// Raw tag byte; may be a value the format defines no meaning for.
    pub tag: u8,
    /// Payload bytes, exactly as long as the length field declared.
    pub payload: &'a [u8],
}

impl<'a> Record<'a> {
    /// Interpret the tag byte, if it is a recognized record kind.
    pub fn kind(&self) -> Option<RecordTag> {
        RecordTag::from_u8(self.tag)
    }
}

/// Iterator over the records of a rule-set buffer.
///
/// Stops at the first record whose header or payload runs past the end
/// of the buffer; everything before that point is still yielded. Never
/// reads out of bounds, never backtracks.
pub struct Records<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Records<'a> {
    /// Create an iterator positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Record<'a>> {
        // A record needs its full 3-byte header; a lone trailing tag or
        // a half-written length field ends the scan.
        if self.data.len() - self.pos < RECORD_HEADER_SIZE {
            self.pos = self.data.len();
            return None;
        }

        let tag = self.data[self.pos];
        let length =
            u16::from_be_bytes([self.data[self.pos + 1], self.data[self.pos + 2]]) as usize;
        let payload_start = self.pos + RECORD_HEADER_SIZE;

        if self.data.len() - payload_start < length {
            // Declared payload runs past end-of-buffer: discard and stop.
            self.pos = self.data.len();
            return None;
        }

        self.pos = payload_start + length;
        Some(Record {
            tag,
            payload: &self.data[payload_start..payload_start + length],
        })
    }
}

/// Decoded contents of a rule-set buffer.
///
/// Both sequences preserve the order records appeared in the buffer.
/// No deduplication, no sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedRules {
    /// Domain entries (tag 0x01).
    pub domains: Vec<String>,
    /// IP-CIDR entries (tag 0x02).
    pub ip_entries: Vec<String>,
}

impl DecodedRules {
    /// Total number of decoded entries.
    pub fn len(&self) -> usize {
        self.domains.len() + self.ip_entries.len()
    }

    /// Whether nothing was decoded.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty() && self.ip_entries.is_empty()
    }

    /// All entries in output order: domains first, then IP entries,
    /// each group in buffer order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.domains
            .iter()
            .chain(self.ip_entries.iter())
            .map(String::as_str)
    }
}

/// Decode a rule-set buffer into domain and IP-CIDR entries.
///
/// Pure function of its input; single forward pass, O(buffer length).
pub fn decode(data: &[u8]) -> DecodedRules {
    let mut rules = DecodedRules::default();

    for record in Records::new(data) {
        let bucket = match record.kind() {
            Some(RecordTag::Domain) => &mut rules.domains,
            Some(RecordTag::IpCidr) => &mut rules.ip_entries,
            // Unrecognized tag: the iterator already advanced past the
            // payload, nothing to record.
            None => continue,
        };

        // Non-UTF-8 payload drops this record only; the scan continues.
        if let Ok(text) = std::str::from_utf8(record.payload) {
            bucket.push(text.to_owned());
        }
    }

    rules
}

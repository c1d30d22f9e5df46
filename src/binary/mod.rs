//! Binary rule-set decoding.
//!
//! Rule-set buffers are a flat sequence of tagged, length-prefixed
//! records with no file header, version field, or footer:
//!
//! ```text
//! +-----------+------------------+------------------+
//! | tag (1 B) | length (2 B, BE) | payload (length) |
//! +-----------+------------------+------------------+
//! |    ...    |       ...        |       ...        |
//! +-----------+------------------+------------------+
//! ```
//!
//! Recognized tags carry UTF-8 text: `0x01` a domain name, `0x02` an
//! IP-CIDR string. Everything else is consumed and ignored.

mod format;
mod reader;


pub use format::{RecordTag, RECORD_HEADER_SIZE, TAG_DOMAIN, TAG_IP_CIDR};
pub use reader::{decode, DecodedRules, Record, Records};

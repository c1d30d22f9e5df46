//! srslist - fetch binary block-list rule-sets and convert them into
//! plain-text domain/IP lists.
//!
//! Rule publishers ship their lists as zip archives of compact binary
//! rule-set files. This crate downloads an archive, extracts selected
//! members, and decodes the tagged-record binary format into flat text
//! output, one entry per line.
//!
//! # Features
//!
//! - **Record decoding**: total, allocation-light scan of tagged,
//!   length-prefixed domain/IP-CIDR records
//! - **Archive extraction**: in-memory zip handling with similar-name
//!   diagnostics for missing members
//! - **Sync pipeline**: one YAML config maps archive members to output
//!   files, extracted verbatim or converted to text lists
//! - **Release lists**: download and normalize plain-text lists
//!   attached to repository releases
//!
//! # Quick Start
//!
//! ```ignore
//! use srslist::{binary, ArchiveFetcher};
//!
//! let fetcher = ArchiveFetcher::new()?;
//! let data = fetcher.fetch_and_extract(
//!     "https://example.com/rules.zip",
//!     "rule-set-geosite/geosite-example.srs",
//! )?;
//!
//! let rules = binary::decode(&data);
//! srslist::write_lines("example.lst".as_ref(), rules.lines())?;
//! ```
//!
//! # Pipeline
//!
//! Several members of one archive are handled in a single run:
//!
//! ```ignore
//! use srslist::pipeline::{self, SyncConfig};
//!
//! let config = SyncConfig::load("sync.yml".as_ref())?;
//! let report = pipeline::run(&config)?;
//! println!("{} outputs written", report.succeeded.len());
//! ```
//!
//! # Decoder Semantics
//!
//! The decoder never fails: truncated trailing records are silently
//! discarded, non-UTF-8 payloads drop that record only, and tags the
//! format defines no meaning for are consumed and ignored. See
//! [`binary::decode`].

mod error;

pub mod archive;
pub mod binary;
pub mod output;
pub mod pipeline;
pub mod release;

// Re-export core types
pub use error::{Error, Result};

// Re-export the decoder entry points
pub use binary::{decode, DecodedRules};

// Re-export fetch/write collaborators
pub use archive::{ArchiveFetcher, RuleArchive};
pub use output::{backup_existing, write_bytes, write_lines};

// Re-export pipeline types
pub use pipeline::{JobMode, SyncConfig, SyncJob, SyncReport};

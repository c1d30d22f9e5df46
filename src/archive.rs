//! Archive download and member extraction.
//!
//! Rule files are published as zip archives. The fetcher downloads the
//! whole archive into memory before anything is parsed, then members
//! are pulled out by exact path. A missing member is a typed error
//! that carries the archive entries with a similar file name, so the
//! caller can report what was probably meant.

use std::io::{Cursor, Read};
use std::time::Duration;

use zip::ZipArchive;

use crate::{Error, Result};

/// Default request timeout for archive downloads.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP fetcher for rule archives.
pub struct ArchiveFetcher {
    client: reqwest::blocking::Client,
}

impl ArchiveFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Create a fetcher with a caller-supplied client.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    /// Download a zip archive into memory.
    pub fn fetch(&self, url: &str) -> Result<RuleArchive> {
        log::info!("Downloading archive: {}", url);

        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(Error::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let data = response.bytes()?.to_vec();
        log::info!("Archive downloaded: {} bytes", data.len());

        let archive = RuleArchive::from_bytes(data)?;
        log::info!("Archive contains {} members", archive.len());
        Ok(archive)
    }

    /// Download an archive and extract a single member.
    pub fn fetch_and_extract(&self, url: &str, member: &str) -> Result<Vec<u8>> {
        let mut archive = self.fetch(url)?;
        archive.read_member(member)
    }
}

/// An in-memory zip archive of rule files.
pub struct RuleArchive {
    zip: ZipArchive<Cursor<Vec<u8>>>,
}

impl RuleArchive {
    /// Open a zip archive from a downloaded byte buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let zip = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { zip })
    }

    /// Number of members in the archive.
    pub fn len(&self) -> usize {
        self.zip.len()
    }

    /// Whether the archive has no members.
    pub fn is_empty(&self) -> bool {
        self.zip.is_empty()
    }

    /// Paths of all archive members.
    pub fn member_names(&self) -> Vec<String> {
        self.zip.file_names().map(str::to_owned).collect()
    }

    /// Read one member's contents by exact path.
    ///
    /// A missing member returns [`Error::MemberNotFound`] with the
    /// archive entries whose names contain the requested file name.
    pub fn read_member(&mut self, member: &str) -> Result<Vec<u8>> {
        if !self.zip.file_names().any(|name| name == member) {
            return Err(Error::MemberNotFound {
                member: member.to_string(),
                similar: self.similar_members(member),
            });
        }

        let mut file = self.zip.by_name(member)?;
        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Members whose names contain the requested path's file name.
    fn similar_members(&self, member: &str) -> Vec<String> {
        let file_name = member.rsplit('/').next().unwrap_or(member);
        self.zip
            .file_names()
            .filter(|name| name.contains(file_name))
            .map(str::to_owned)
            .collect()
    }
}

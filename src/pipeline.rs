//! Parameterized archive sync pipeline.
//!
//! One configuration drives any number of extract/convert jobs over a
//! single downloaded archive, replacing per-archive one-off scripts: a
//! job maps an archive member path to an output path and says whether
//! the member is copied out verbatim or decoded into a text list.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::{ArchiveFetcher, RuleArchive};
use crate::binary;
use crate::output;
use crate::{Error, Result};

/// Pipeline configuration, normally loaded from a YAML file.
///
/// ```yaml
/// archive_url: https://example.com/rules.zip
/// backup_dir: old
/// jobs:
///   - member: rule-set-geosite/geosite-example.srs
///     output: example.lst
///     mode: convert
///   - member: rule-set-geoip/geoip-example.srs
///     output: geoip-example.srs
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// URL of the zip archive holding the rule files.
    pub archive_url: String,
    /// Where previous copies of output files are moved before being
    /// replaced. No backups are kept when unset.
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,
    /// Member-to-output mapping.
    pub jobs: Vec<SyncJob>,
}

impl SyncConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    fn validate(&self) -> Result<()> {
        if self.archive_url.is_empty() {
            return Err(Error::Config("archive_url must not be empty".to_string()));
        }
        if self.jobs.is_empty() {
            return Err(Error::Config("no jobs configured".to_string()));
        }
        Ok(())
    }
}

/// One member-to-output job.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncJob {
    /// Path of the member inside the archive.
    pub member: String,
    /// Output file path.
    pub output: PathBuf,
    /// How the member is processed.
    #[serde(default)]
    pub mode: JobMode,
}

/// Processing mode for a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobMode {
    /// Copy the member out of the archive unchanged.
    #[default]
    Extract,
    /// Decode the member as a rule-set buffer and write a text list.
    Convert,
}

/// Per-job outcomes of a pipeline run.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Output paths that were written.
    pub succeeded: Vec<PathBuf>,
    /// Archive members that could not be processed.
    pub failed: Vec<String>,
}

impl SyncReport {
    /// Whether every job succeeded.
    pub fn all_ok(&self) -> bool {
        self.failed.is_empty()
    }

    /// Whether at least one job succeeded.
    pub fn any_ok(&self) -> bool {
        !self.succeeded.is_empty()
    }
}

/// Download the configured archive and run every job against it.
///
/// The archive is fetched exactly once. A member missing from the
/// archive fails that job only; all other errors abort the run.
pub fn run(config: &SyncConfig) -> Result<SyncReport> {
    let fetcher = ArchiveFetcher::new()?;
    let mut archive = fetcher.fetch(&config.archive_url)?;
    run_jobs(&mut archive, config)
}

/// Run the configured jobs against an already-fetched archive.
pub fn run_jobs(archive: &mut RuleArchive, config: &SyncConfig) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    for job in &config.jobs {
        log::info!("Processing {} -> {:?}", job.member, job.output);

        match run_job(archive, job, config.backup_dir.as_deref()) {
            Ok(()) => report.succeeded.push(job.output.clone()),
            Err(Error::MemberNotFound { member, similar }) => {
                log::warn!("Member not found in archive: {}", member);
                if !similar.is_empty() {
                    log::warn!("Similar members: {}", similar.join(", "));
                }
                report.failed.push(member);
            }
            Err(e) => return Err(e),
        }
    }

    log::info!(
        "Sync finished: {} of {} jobs succeeded",
        report.succeeded.len(),
        config.jobs.len()
    );
    Ok(report)
}

fn run_job(archive: &mut RuleArchive, job: &SyncJob, backup_dir: Option<&Path>) -> Result<()> {
    let data = archive.read_member(&job.member)?;

    if let Some(dir) = backup_dir {
        output::backup_existing(&job.output, dir)?;
    }

    match job.mode {
        JobMode::Extract => output::write_bytes(&job.output, &data),
        JobMode::Convert => {
            let rules = binary::decode(&data);
            log::info!(
                "Decoded {}: {} domains, {} IP entries",
                job.member,
                rules.domains.len(),
                rules.ip_entries.len()
            );
            output::write_lines(&job.output, rules.lines())
        }
    }
}

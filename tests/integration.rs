//! Integration tests for the decode-and-write flow.

use srslist::pipeline::{self, JobMode, SyncConfig, SyncJob};
use srslist::{binary, write_lines, RuleArchive};
use std::fs;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use zip::write::SimpleFileOptions;

/// Append one tagged record to a rule-set buffer.
fn push_record(buf: &mut Vec<u8>, tag: u8, payload: &[u8]) {
    buf.push(tag);
    buf.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    buf.extend_from_slice(payload);
}

/// Build an in-memory zip archive from (member, contents) pairs.
fn build_zip(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in members {
        writer
            .start_file(name.to_string(), SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn sample_rule_set() -> Vec<u8> {
    let mut buf = Vec::new();
    push_record(&mut buf, 0x01, b"blocked.example");
    push_record(&mut buf, 0x02, b"203.0.113.0/24");
    push_record(&mut buf, 0x03, b"ignored-by-design");
    push_record(&mut buf, 0x01, b"also-blocked.example");
    buf
}

#[test]
fn test_decode_then_write_lines() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("blocked.lst");

    let rules = binary::decode(&sample_rule_set());
    write_lines(&out, rules.lines()).unwrap();

    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(
        content,
        "blocked.example\nalso-blocked.example\n203.0.113.0/24\n"
    );
}

#[test]
fn test_pipeline_convert_and_extract() {
    let dir = tempfile::tempdir().unwrap();
    let srs = sample_rule_set();
    let raw = b"opaque member bytes";

    let zip_data = build_zip(&[
        ("rule-set-geosite/blocked.srs", srs.as_slice()),
        ("rule-set-geoip/raw.srs", raw.as_slice()),
    ]);
    let mut archive = RuleArchive::from_bytes(zip_data).unwrap();

    let config = SyncConfig {
        archive_url: "https://example.com/rules.zip".to_string(),
        backup_dir: None,
        jobs: vec![
            SyncJob {
                member: "rule-set-geosite/blocked.srs".to_string(),
                output: dir.path().join("blocked.lst"),
                mode: JobMode::Convert,
            },
            SyncJob {
                member: "rule-set-geoip/raw.srs".to_string(),
                output: dir.path().join("raw.srs"),
                mode: JobMode::Extract,
            },
        ],
    };

    let report = pipeline::run_jobs(&mut archive, &config).unwrap();

    assert!(report.all_ok());
    assert_eq!(report.succeeded.len(), 2);

    let converted = fs::read_to_string(dir.path().join("blocked.lst")).unwrap();
    assert_eq!(
        converted,
        "blocked.example\nalso-blocked.example\n203.0.113.0/24\n"
    );
    assert_eq!(fs::read(dir.path().join("raw.srs")).unwrap(), raw);
}

#[test]
fn test_pipeline_continues_past_missing_member() {
    let dir = tempfile::tempdir().unwrap();
    let zip_data = build_zip(&[("present.srs", sample_rule_set().as_slice())]);
    let mut archive = RuleArchive::from_bytes(zip_data).unwrap();

    let config = SyncConfig {
        archive_url: "https://example.com/rules.zip".to_string(),
        backup_dir: None,
        jobs: vec![
            SyncJob {
                member: "absent.srs".to_string(),
                output: dir.path().join("absent.lst"),
                mode: JobMode::Convert,
            },
            SyncJob {
                member: "present.srs".to_string(),
                output: dir.path().join("present.lst"),
                mode: JobMode::Convert,
            },
        ],
    };

    let report = pipeline::run_jobs(&mut archive, &config).unwrap();

    assert!(!report.all_ok());
    assert!(report.any_ok());
    assert_eq!(report.failed, vec!["absent.srs"]);
    assert_eq!(report.succeeded, vec![dir.path().join("present.lst")]);
    assert!(!dir.path().join("absent.lst").exists());
    assert!(dir.path().join("present.lst").exists());
}

#[test]
fn test_pipeline_backs_up_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("blocked.lst");
    let backup_dir = dir.path().join("old");

    fs::write(&out, "stale contents\n").unwrap();

    let zip_data = build_zip(&[("blocked.srs", sample_rule_set().as_slice())]);
    let mut archive = RuleArchive::from_bytes(zip_data).unwrap();

    let config = SyncConfig {
        archive_url: "https://example.com/rules.zip".to_string(),
        backup_dir: Some(backup_dir.clone()),
        jobs: vec![SyncJob {
            member: "blocked.srs".to_string(),
            output: out.clone(),
            mode: JobMode::Convert,
        }],
    };

    pipeline::run_jobs(&mut archive, &config).unwrap();

    assert_eq!(
        fs::read_to_string(backup_dir.join("blocked.lst")).unwrap(),
        "stale contents\n"
    );
    let fresh = fs::read_to_string(&out).unwrap();
    assert!(fresh.starts_with("blocked.example\n"));
}

#[test]
fn test_truncated_member_still_converts_partially() {
    let dir = tempfile::tempdir().unwrap();

    let mut srs = sample_rule_set();
    // Chop into the final record's payload
    srs.truncate(srs.len() - 5);

    let zip_data = build_zip(&[("truncated.srs", srs.as_slice())]);
    let mut archive = RuleArchive::from_bytes(zip_data).unwrap();

    let config = SyncConfig {
        archive_url: "https://example.com/rules.zip".to_string(),
        backup_dir: None,
        jobs: vec![SyncJob {
            member: "truncated.srs".to_string(),
            output: dir.path().join("truncated.lst"),
            mode: JobMode::Convert,
        }],
    };

    let report = pipeline::run_jobs(&mut archive, &config).unwrap();

    assert!(report.all_ok());
    let content = fs::read_to_string(dir.path().join("truncated.lst")).unwrap();
    assert_eq!(content, "blocked.example\n203.0.113.0/24\n");
}

#[test]
fn test_config_paths_round_trip_through_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("sync.yml");

    fs::write(
        &config_path,
        r#"
archive_url: https://example.com/rules.zip
backup_dir: old
jobs:
  - member: rule-set-geosite/blocked.srs
    output: blocked.lst
    mode: convert
"#,
    )
    .unwrap();

    let config = SyncConfig::load(&config_path).unwrap();
    assert_eq!(config.jobs[0].output, PathBuf::from("blocked.lst"));
    assert_eq!(config.backup_dir, Some(PathBuf::from("old")));
}

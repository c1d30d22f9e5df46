//! Release-published text list cleaning.
//!
//! Some block lists are published not inside an archive but as plain
//! text assets attached to a repository release. This module resolves
//! the latest release through the GitHub API, downloads an asset by
//! name, and normalizes its lines into a sorted, deduplicated list.
//! Unlike the record decoder's output, the cleaned list IS sorted and
//! deduplicated; the inputs here are hand-maintained text files full
//! of comments and annotations.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

use crate::output;
use crate::{Error, Result};

/// GitHub releases API base URL.
const API_BASE: &str = "https://api.github.com/repos";

/// Subset of the releases API payload this crate needs.
#[derive(Debug, Deserialize)]
pub struct Release {
    /// Release tag, e.g. `v2024.08.01`.
    pub tag_name: String,
    /// Downloadable assets attached to the release.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// One downloadable release asset.
#[derive(Debug, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

impl Release {
    /// Download URL of the asset with the given exact name.
    pub fn asset_url(&self, name: &str) -> Option<&str> {
        self.assets
            .iter()
            .find(|asset| asset.name == name)
            .map(|asset| asset.browser_download_url.as_str())
    }
}

/// Fetch the latest release of `owner/repo`.
pub fn latest_release(client: &reqwest::blocking::Client, repo: &str) -> Result<Release> {
    let url = format!("{API_BASE}/{repo}/releases/latest");
    log::info!("Querying latest release: {}", url);

    let response = client.get(&url).send()?;
    if !response.status().is_success() {
        return Err(Error::Status {
            status: response.status().as_u16(),
            url,
        });
    }

    Ok(response.json()?)
}

/// Normalize a raw text list into sorted, deduplicated entries.
///
/// Per line: trim whitespace; drop empties and comment lines (`#`,
/// `!`, `//`); strip a leading `name:` style prefix; keep only the
/// first whitespace-separated field.
pub fn clean_lines(text: &str) -> Vec<String> {
    let mut entries = BTreeSet::new();

    for raw in text.lines() {
        let mut line = raw.trim();
        if line.is_empty()
            || line.starts_with('#')
            || line.starts_with('!')
            || line.starts_with("//")
        {
            continue;
        }

        if let Some((_, rest)) = line.split_once(':') {
            line = rest.trim();
        }
        if let Some((head, _)) = line.split_once(' ') {
            line = head.trim();
        }

        if !line.is_empty() {
            entries.insert(line.to_string());
        }
    }

    entries.into_iter().collect()
}

/// Download the named asset from the latest release of `owner/repo`,
/// clean it, and write the result to `out`.
///
/// Returns the number of entries written.
pub fn fetch_clean_list(
    client: &reqwest::blocking::Client,
    repo: &str,
    asset: &str,
    out: &Path,
) -> Result<usize> {
    let release = latest_release(client, repo)?;
    let url = release
        .asset_url(asset)
        .ok_or_else(|| Error::AssetNotFound(asset.to_string()))?
        .to_string();

    log::info!("Release {}: downloading {}", release.tag_name, url);

    let response = client.get(&url).send()?;
    if !response.status().is_success() {
        return Err(Error::Status {
            status: response.status().as_u16(),
            url,
        });
    }

    let entries = clean_lines(&response.text()?);
    output::write_lines(out, &entries)?;
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_lines_strips_comments_and_blanks() {
        let text = "# comment\n\n! also a comment\n// and this\nexample.com\n";
        assert_eq!(clean_lines(text), vec!["example.com"]);
    }

    #[test]
    fn test_clean_lines_strips_prefix_and_annotation() {
        let text = "full:example.com\nother.example extra annotation\n";
        assert_eq!(clean_lines(text), vec!["example.com", "other.example"]);
    }

    #[test]
    fn test_clean_lines_sorts_and_dedupes() {
        let text = "b.example\na.example\nb.example\nc.example\na.example\n";
        assert_eq!(
            clean_lines(text),
            vec!["a.example", "b.example", "c.example"]
        );
    }

    #[test]
    fn test_clean_lines_drops_entries_emptied_by_stripping() {
        let text = ":\n   \nvalid.example\n";
        assert_eq!(clean_lines(text), vec!["valid.example"]);
    }

    #[test]
    fn test_release_asset_lookup() {
        let json = r#"{
            "tag_name": "v1.2.3",
            "assets": [
                {"name": "list.txt", "browser_download_url": "https://example.com/list.txt"},
                {"name": "other.txt", "browser_download_url": "https://example.com/other.txt"}
            ]
        }"#;
        let release: Release = serde_json::from_str(json).unwrap();

        assert_eq!(release.tag_name, "v1.2.3");
        assert_eq!(
            release.asset_url("list.txt"),
            Some("https://example.com/list.txt")
        );
        assert_eq!(release.asset_url("missing.txt"), None);
    }

    #[test]
    fn test_release_without_assets() {
        let release: Release = serde_json::from_str(r#"{"tag_name": "v1"}"#).unwrap();
        assert!(release.assets.is_empty());
        assert_eq!(release.asset_url("anything"), None);
    }
}

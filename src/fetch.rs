//! Bundled command pack retrieval.
//!
//! One best-effort download and extraction; any failure is fatal to the
//! bundled path and surfaces as an error rather than retrying.

use crate::error::{EngineError, EngineResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the curated command pack
pub const DEFAULT_PACK_URL: &str =
    "https://github.com/toolbridge/command-pack/archive/refs/heads/main.zip";

/// Download a zip archive of command documents and extract it under `dest`.
///
/// Returns the directory containing the extracted documents: the archive's
/// single top-level directory when it has one (the GitHub archive layout),
/// otherwise `dest` itself.
pub fn fetch_command_pack(url: &str, dest: &Path) -> EngineResult<PathBuf> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .expect("static template"),
    );
    spinner.set_message(format!("Downloading {}", url));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let bytes = download(url)?;
    spinner.set_message("Extracting command pack");
    let root = extract(&bytes, dest)?;
    spinner.finish_and_clear();

    Ok(root)
}

fn download(url: &str) -> EngineResult<Vec<u8>> {
    let response = reqwest::blocking::get(url)
        .map_err(|e| EngineError::DownloadFailed(format!("{}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(EngineError::DownloadFailed(format!(
            "{}: HTTP {}",
            url,
            response.status()
        )));
    }

    response
        .bytes()
        .map(|b| b.to_vec())
        .map_err(|e| EngineError::DownloadFailed(format!("{}: {}", url, e)))
}

fn extract(bytes: &[u8], dest: &Path) -> EngineResult<PathBuf> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| EngineError::ExtractFailed(e.to_string()))?;

    archive
        .extract(dest)
        .map_err(|e| EngineError::ExtractFailed(e.to_string()))?;

    // GitHub archives wrap everything in "<repo>-<ref>/".
    let mut top_level: Vec<PathBuf> = std::fs::read_dir(dest)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();

    if top_level.len() == 1 && top_level[0].is_dir() {
        Ok(top_level.remove(0))
    } else {
        Ok(dest.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options = zip::write::SimpleFileOptions::default();
            for (name, content) in entries {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_extract_unwraps_single_top_level_dir() {
        let temp = TempDir::new().unwrap();
        let bytes = zip_with(&[
            ("pack-main/git/commit.yaml", "name: commit\nprompt: Go\n"),
            ("pack-main/review.yaml", "name: review\nprompt: Look\n"),
        ]);

        let root = extract(&bytes, temp.path()).unwrap();
        assert!(root.ends_with("pack-main"));
        assert!(root.join("git/commit.yaml").exists());
    }

    #[test]
    fn test_extract_flat_archive_returns_dest() {
        let temp = TempDir::new().unwrap();
        let bytes = zip_with(&[("a.yaml", "name: a\nprompt: A\n"), ("b.yaml", "name: b\nprompt: B\n")]);

        let root = extract(&bytes, temp.path()).unwrap();
        assert_eq!(root, temp.path());
        assert!(root.join("a.yaml").exists());
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let result = extract(b"definitely not a zip", temp.path());
        assert!(matches!(result, Err(EngineError::ExtractFailed(_))));
    }
}

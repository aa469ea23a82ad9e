//! Generates a Starlark dictionary of SHA-256 hashes for Bazel release
//! installers.
//!
//! Pipeline: [`enumerate::discover_versions`] walks the released versions,
//! [`fetch::fetch_version_hashes`] reads the three installer checksums of
//! each, [`emit::HashDict`] renders the document and [`output`] writes it.

pub mod config;
pub mod logging;

pub mod emit;
pub mod enumerate;
pub mod fetch;
pub mod output;
pub mod platform;
pub mod release;
pub mod version;

use anyhow::{Context, Result};

use crate::config::RunConfig;
use crate::emit::HashDict;
use crate::release::{HttpReleaseIndex, ReleaseIndex, ReleaseUrls};

/// Probes and fetches everything and returns the document in memory.
/// Nothing is written; the first failed request aborts.
pub fn build_hash_dict(index: &dyn ReleaseIndex, cfg: &RunConfig) -> Result<HashDict> {
    let versions = enumerate::discover_versions(
        index,
        cfg.minimum_version,
        &cfg.release.skipped_versions,
    )
    .context("version discovery failed")?;

    let mut entries = Vec::with_capacity(versions.len());
    for version in versions {
        tracing::info!("getting SHA-256 for version {}", version);
        let hashes = fetch::fetch_version_hashes(index, version)
            .with_context(|| format!("fetching checksums for {}", version))?;
        entries.push(hashes);
    }

    Ok(HashDict {
        map_name: cfg.map_name.clone(),
        command_line: emit::regenerate_command_line(&cfg.release.regenerate_command, &cfg.args),
        entries,
    })
}

/// Full run against the configured release server: build the document, then
/// write it to the configured output.
pub fn run(cfg: &RunConfig) -> Result<()> {
    let urls = ReleaseUrls::new(&cfg.release.base_url)?;
    let index = HttpReleaseIndex::new(urls, cfg.release.http_options());
    run_with_index(&index, cfg)
}

/// Like [`run`] with a caller-provided index.
pub fn run_with_index(index: &dyn ReleaseIndex, cfg: &RunConfig) -> Result<()> {
    tracing::info!("creating hash dict at {}", cfg.output);
    let dict = build_hash_dict(index, cfg)?;
    output::write_document(&cfg.output, &dict.render())?;
    tracing::info!("wrote {} version(s) to {}", dict.entries.len(), cfg.output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReleaseConfig;
    use crate::output::OutputTarget;
    use crate::release::stub::StubIndex;
    use crate::version::Version;

    fn run_config(output: OutputTarget) -> RunConfig {
        RunConfig {
            output,
            map_name: "BAZEL_HASH_DICT".to_string(),
            minimum_version: Version::new(0, 26, 0),
            args: vec!["--output".to_string(), "-".to_string()],
            release: ReleaseConfig::default(),
        }
    }

    #[test]
    fn build_dict_in_discovery_order() {
        let stub = StubIndex::with_versions(&["0.26.0", "0.26.1", "0.27.0"]);
        let dict = build_hash_dict(&stub, &run_config(OutputTarget::Stdout)).unwrap();
        let versions: Vec<String> = dict.entries.iter().map(|e| e.version.to_string()).collect();
        assert_eq!(versions, ["0.26.0", "0.26.1", "0.27.0"]);
        assert_eq!(dict.entries[0].hashes[1].hash, "0.26.0-linux-x86_64");
        assert_eq!(dict.command_line, "bazel run //updater -- '--output' '-'");
    }

    #[test]
    fn checksum_failure_writes_nothing() {
        let mut stub = StubIndex::with_versions(&["0.26.0", "0.26.1"]);
        stub.bodies.remove(&(Version::new(0, 26, 1), "windows-x86_64"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bazel_hash_dict.bzl");
        let cfg = run_config(OutputTarget::File(path.clone()));
        let err = run_with_index(&stub, &cfg).unwrap_err();

        assert!(format!("{:#}", err).contains("0.26.1"));
        assert!(!path.exists());
    }

    #[test]
    fn run_writes_file() {
        let stub = StubIndex::with_versions(&["0.26.0"]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bzl");
        run_with_index(&stub, &run_config(OutputTarget::File(path.clone()))).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# To update this file, please run\n"));
        assert!(text.contains(
            "    \"0.26.0\": {\n        \"darwin-x86_64\": \"0.26.0-darwin-x86_64\",\n"
        ));
        assert!(text.ends_with("    },\n}\n"));
    }
}

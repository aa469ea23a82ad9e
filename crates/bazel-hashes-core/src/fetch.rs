//! Checksum retrieval for one released version.

use crate::platform::PLATFORMS;
use crate::release::{FetchError, ReleaseIndex};
use crate::version::Version;

/// SHA-256 of one installer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformHash {
    pub platform: &'static str,
    pub hash: String,
}

/// All installer hashes of one version, in platform order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionHashes {
    pub version: Version,
    pub hashes: Vec<PlatformHash>,
}

/// First whitespace-delimited token of a `.sha256` file (`<hash>  <file>`).
/// Empty when the file holds no token. The token is not validated.
pub fn extract_hash(content: &str) -> &str {
    content.split_whitespace().next().unwrap_or("")
}

/// Fetches the checksum of every platform in [`PLATFORMS`], one after the
/// other. The first failure aborts and is returned.
pub fn fetch_version_hashes(
    index: &dyn ReleaseIndex,
    version: Version,
) -> Result<VersionHashes, FetchError> {
    let mut hashes = Vec::with_capacity(PLATFORMS.len());
    for platform in &PLATFORMS {
        let content = index.checksum_file(version, platform)?;
        let hash = extract_hash(&content);
        tracing::debug!("{} {}: {}", version, platform.name, hash);
        hashes.push(PlatformHash {
            platform: platform.name,
            hash: hash.to_string(),
        });
    }
    Ok(VersionHashes { version, hashes })
}

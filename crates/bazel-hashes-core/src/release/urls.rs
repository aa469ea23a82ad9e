//! URL layout of the release server.

use url::Url;

use super::FetchError;
use crate::platform::Platform;
use crate::version::Version;

/// Default release server.
pub const DEFAULT_BASE_URL: &str = "http://releases.bazel.build";

/// Builds per-version URLs below a base URL.
#[derive(Debug, Clone)]
pub struct ReleaseUrls {
    base: Url,
}

impl ReleaseUrls {
    /// Parses `base`. A missing trailing slash is added so that joining keeps
    /// the last path segment (e.g. a mirror under `/bazel`).
    pub fn new(base: &str) -> Result<Self, FetchError> {
        let mut url = Url::parse(base).map_err(|source| FetchError::Url {
            url: base.to_string(),
            source,
        })?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self { base: url })
    }

    /// `{base}/{version}/release/index.html`
    pub fn index(&self, version: Version) -> Result<String, FetchError> {
        self.join(&format!("{}/release/index.html", version))
    }

    /// `{base}/{version}/release/bazel-{version}-{installer}{platform}.{ext}.sha256`
    pub fn checksum(&self, version: Version, platform: &Platform) -> Result<String, FetchError> {
        let v = version.to_string();
        self.join(&format!("{}/release/{}", v, platform.checksum_file_name(&v)))
    }

    fn join(&self, relative: &str) -> Result<String, FetchError> {
        self.base
            .join(relative)
            .map(String::from)
            .map_err(|source| FetchError::Url {
                url: format!("{}{}", self.base, relative),
                source,
            })
    }
}

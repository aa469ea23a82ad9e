//! Access to the release server: existence probes and checksum files.
//!
//! The enumerator and fetcher only see the [`ReleaseIndex`] trait; the curl
//! implementation lives in [`http`].

mod error;
pub mod http;
mod urls;

#[cfg(test)]
pub(crate) mod stub;

pub use error::FetchError;
pub use http::{HttpOptions, HttpReleaseIndex};
pub use urls::{ReleaseUrls, DEFAULT_BASE_URL};

use crate::platform::Platform;
use crate::version::Version;

/// Outcome of an existence probe that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    /// The release index answered 2xx.
    Present,
    /// The release index answered 404.
    Absent,
}

/// Source of release metadata.
pub trait ReleaseIndex {
    /// Checks whether `version` was released. Only a 404 maps to
    /// [`Existence::Absent`]; every other failure is an error.
    fn probe(&self, version: Version) -> Result<Existence, FetchError>;

    /// Raw text of the `.sha256` file for `version` on `platform`.
    fn checksum_file(&self, version: Version, platform: &Platform) -> Result<String, FetchError>;
}

//! Discovery of released versions by walking the version space upward.
//!
//! Releases are assumed to be allocated sequentially: patches count up within
//! a minor line, minors within a major line. A 404 ends the current line and
//! moves the cursor to the start of the next one; a 404 on `X.0.0` ends the
//! walk. Versions in the skip-list were never cut and are stepped over.
//!
//! Known limitation: a missing patch that is not skip-listed ends its minor
//! line, so later patches of that line are never probed.

use crate::release::{Existence, FetchError, ReleaseIndex};
use crate::version::Version;

/// Versions that were deliberately never released.
pub const DEFAULT_SKIPPED_VERSIONS: [Version; 1] = [Version::new(0, 17, 0)];

/// Where the cursor goes after `absent` was not found; `None` ends the walk.
/// A step past `u32::MAX` in any component also ends the walk.
pub fn next_after_absent(absent: Version, skipped: &[Version]) -> Option<Version> {
    if skipped.contains(&absent) {
        absent.next_patch()
    } else if absent.minor == 0 && absent.patch == 0 {
        None
    } else if absent.patch == 0 {
        absent.next_major()
    } else {
        absent.next_minor()
    }
}

/// Probes versions starting at `minimum` and returns those that exist, in
/// ascending order. Any probe error aborts the walk.
pub fn discover_versions(
    index: &dyn ReleaseIndex,
    minimum: Version,
    skipped: &[Version],
) -> Result<Vec<Version>, FetchError> {
    let mut versions = Vec::new();
    let mut cursor = minimum;
    loop {
        tracing::info!("probing version {}", cursor);
        match index.probe(cursor)? {
            Existence::Present => {
                versions.push(cursor);
                match cursor.next_patch() {
                    Some(next) => cursor = next,
                    None => {
                        tracing::warn!("{} is the last representable patch, stopping", cursor);
                        return Ok(versions);
                    }
                }
            }
            Existence::Absent => match next_after_absent(cursor, skipped) {
                Some(next) => {
                    tracing::debug!("{} not released, moving to {}", cursor, next);
                    cursor = next;
                }
                None => {
                    tracing::info!(
                        "{} not released, found {} version(s)",
                        cursor,
                        versions.len()
                    );
                    return Ok(versions);
                }
            },
        }
    }
}

//! In-memory [`ReleaseIndex`] for unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use super::{Existence, FetchError, ReleaseIndex};
use crate::platform::Platform;
use crate::version::Version;

/// Versions listed in `present` exist; probes for versions in `failing`
/// return HTTP 500; everything else is a 404. Checksum bodies are looked up
/// by (version, platform name); missing entries are a 404.
#[derive(Default)]
pub(crate) struct StubIndex {
    pub present: HashSet<Version>,
    pub failing: HashSet<Version>,
    pub bodies: HashMap<(Version, &'static str), String>,
    pub probed: RefCell<Vec<Version>>,
}

impl StubIndex {
    pub fn with_versions(versions: &[&str]) -> Self {
        let mut stub = Self::default();
        for v in versions {
            let v: Version = v.parse().unwrap();
            stub.present.insert(v);
            for p in crate::platform::PLATFORMS {
                let body = format!("{}-{} {}", v, p.name, p.checksum_file_name(&v.to_string()));
                stub.bodies.insert((v, p.name), body);
            }
        }
        stub
    }
}

impl ReleaseIndex for StubIndex {
    fn probe(&self, version: Version) -> Result<Existence, FetchError> {
        self.probed.borrow_mut().push(version);
        if self.failing.contains(&version) {
            return Err(FetchError::Http {
                method: "HEAD",
                url: format!("stub://{}/release/index.html", version),
                code: 500,
            });
        }
        if self.present.contains(&version) {
            Ok(Existence::Present)
        } else {
            Ok(Existence::Absent)
        }
    }

    fn checksum_file(&self, version: Version, platform: &Platform) -> Result<String, FetchError> {
        self.bodies
            .get(&(version, platform.name))
            .cloned()
            .ok_or_else(|| FetchError::Http {
                method: "GET",
                url: format!("stub://{}/{}", version, platform.name),
                code: 404,
            })
    }
}

//! Installer platforms published with every release.

/// One installer flavour: target OS/arch, filename prefix and extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Key used in the generated dictionary, e.g. `linux-x86_64`.
    pub name: &'static str,
    /// Inserted between `bazel-{version}-` and the platform name.
    pub installer: &'static str,
    pub extension: &'static str,
}

/// Platforms in the order they are fetched and emitted.
pub const PLATFORMS: [Platform; 3] = [
    Platform {
        name: "darwin-x86_64",
        installer: "installer-",
        extension: "sh",
    },
    Platform {
        name: "linux-x86_64",
        installer: "installer-",
        extension: "sh",
    },
    Platform {
        name: "windows-x86_64",
        installer: "",
        extension: "zip",
    },
];

impl Platform {
    /// Checksum file name for `version`, e.g.
    /// `bazel-0.26.0-installer-linux-x86_64.sh.sha256`.
    pub fn checksum_file_name(&self, version: &str) -> String {
        format!(
            "bazel-{}-{}{}.{}.sha256",
            version, self.installer, self.name, self.extension
        )
    }
}

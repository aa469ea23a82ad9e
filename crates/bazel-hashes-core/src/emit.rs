//! Rendering of the generated `.bzl` dictionary.

use std::fmt;

use crate::fetch::VersionHashes;

/// Command printed in the header, followed by the quoted arguments.
pub const DEFAULT_REGENERATE_COMMAND: &str = "bazel run //updater --";

/// Arguments ending with this suffix are replaced by [`PWD_OUTPUT_ARG`] so
/// the header does not leak the caller's absolute checkout path.
const OUTPUT_ARG_SUFFIX: &str = "tools/bazel_hash_dict.bzl";
const PWD_OUTPUT_ARG: &str = "$(pwd)/tools/bazel_hash_dict.bzl";

/// The whole output document: header command plus version → platform → hash.
#[derive(Debug, Clone)]
pub struct HashDict {
    pub map_name: String,
    /// Header line, e.g. `bazel run //updater -- '--output' 'x.bzl'`.
    pub command_line: String,
    /// Discovery order; rendered as-is.
    pub entries: Vec<VersionHashes>,
}

/// Single-quotes `arg` for a POSIX shell.
pub fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', "'\\''"))
}

/// Rebuilds the command that regenerates the file from the invocation
/// arguments (program name excluded).
pub fn regenerate_command_line<S: AsRef<str>>(prefix: &str, args: &[S]) -> String {
    let mut line = prefix.to_string();
    for arg in args {
        let arg = arg.as_ref();
        let arg = if arg.ends_with(OUTPUT_ARG_SUFFIX) {
            PWD_OUTPUT_ARG
        } else {
            arg
        };
        line.push(' ');
        line.push_str(&shell_quote(arg));
    }
    line
}

impl HashDict {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HashDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("# To update this file, please run\n# ")?;
        f.write_str(&self.command_line)?;
        write!(f, "\n\n{} = {{\n", self.map_name)?;
        for entry in &self.entries {
            writeln!(f, "    \"{}\": {{", entry.version)?;
            for h in &entry.hashes {
                writeln!(f, "        \"{}\": \"{}\",", h.platform, h.hash)?;
            }
            f.write_str("    },\n")?;
        }
        f.write_str("}\n")
    }
}

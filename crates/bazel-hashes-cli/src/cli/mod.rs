//! CLI for the Bazel installer hash dictionary generator.

use anyhow::Result;
use bazel_hashes_core::config::{self, RunConfig};
use bazel_hashes_core::output::OutputTarget;
use bazel_hashes_core::version::Version;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Generate a Starlark file containing a map of hashes of Bazel installers.
#[derive(Debug, Parser)]
#[command(name = "bazel-hashes")]
#[command(
    about = "Generate a Starlark file containing a map of hashes of Bazel installers",
    long_about = None,
    after_help = "Progress and warnings are printed to stderr. Full logs go to \
                  ~/.local/state/bazel-hashes/bazel-hashes.log (RUST_LOG sets the filter)."
)]
pub struct Cli {
    /// The output file ("-" for standard output).
    #[arg(long, default_value = "bazel_hash_dict.bzl", value_name = "PATH")]
    pub output: String,

    /// The name of the generated map in the output file.
    #[arg(long = "map_name", default_value = "BAZEL_HASH_DICT", value_name = "IDENTIFIER")]
    pub map_name: String,

    /// The lowest version of Bazel supported (major.minor.patch).
    #[arg(long = "minimum_version", default_value = "0.26.0", value_name = "VERSION")]
    pub minimum_version: Version,

    /// Release server config file (default: ~/.config/bazel-hashes/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Merge flags with the config file into the immutable run configuration.
    /// `args` are the raw invocation arguments without the program name.
    pub fn into_run_config(self, args: Vec<String>) -> Result<RunConfig> {
        let release = config::load(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", release);
        Ok(RunConfig {
            output: OutputTarget::from_arg(&self.output),
            map_name: self.map_name,
            minimum_version: self.minimum_version,
            args,
            release,
        })
    }

    pub fn run_from_args() -> Result<()> {
        let raw: Vec<OsString> = std::env::args_os().collect();
        let cli = Cli::parse_from(&raw);
        let cfg = cli.into_run_config(header_args(raw.into_iter().skip(1)))?;
        bazel_hashes_core::run(&cfg)
    }
}

/// Invocation arguments as strings for the regeneration header; bytes that
/// are not UTF-8 become U+FFFD.
pub fn header_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<String> {
    args.into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[cfg(test)]
mod tests;

//! Global configuration shared by every subcommand.
//!
//! All options can be provided as flags or environment variables:
//!
//! ```bash
//! henrys --input-policy reject to-utc 2024-12-22T00:43
//! HENRYS_STORE_DIR=/var/lib/henrys henrys session status
//! ```

use std::path::PathBuf;

use henrys_core::error::TimeError;
use henrys_core::{EasternConverter, FileTokenStore, InputPolicy};

/// Options that apply regardless of subcommand.
#[derive(Debug, Clone, clap::Args)]
pub struct Config {
    /// What to-utc does with malformed input: fallback-now or reject.
    #[arg(
        long,
        global = true,
        env = "HENRYS_INPUT_POLICY",
        default_value = "fallback-now",
        value_parser = parse_input_policy
    )]
    pub input_policy: InputPolicy,

    /// Directory holding the persisted session token.
    #[arg(long, global = true, env = "HENRYS_STORE_DIR", default_value = ".henrys")]
    pub store_dir: PathBuf,
}

impl Config {
    pub fn converter(&self) -> EasternConverter {
        EasternConverter::new(self.input_policy)
    }

    pub fn token_store(&self) -> FileTokenStore {
        FileTokenStore::new(&self.store_dir)
    }

    /// Logs the effective configuration at debug level.
    pub fn log(&self) {
        tracing::debug!(
            input_policy = self.input_policy.as_str(),
            store_dir = %self.store_dir.display(),
            "configuration loaded"
        );
    }
}

fn parse_input_policy(s: &str) -> Result<InputPolicy, TimeError> {
    s.parse()
}

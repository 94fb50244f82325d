//! # wicket-analyst
//!
//! The analysis pipelines behind every Wicket endpoint.
//!
//! An [`Analyst`] owns the shared [`Gateway`] and the [`CricketLake`] and runs
//! one request at a time through its stages:
//!
//! - [`Analyst::analyze`]: question → SQL → rows.
//! - [`Analyst::analyze_deep`]: decompose → execute each step → synthesize →
//!   recommend charts.
//! - [`Analyst::finalize`]: conversation → publication-ready project.
//! - [`Analyst::validate`]: article → claims → database or recall checks →
//!   scored report.
//! - [`Analyst::publish`]: gated write of the project bundle to disk.
//!
//! Model output that does not parse never fails a request; see [`stages`].

mod analyze;
mod deep;
mod error;
mod finalize;
mod prompts;
mod publish;
pub mod stages;
mod validate;

pub use error::{AnalystError, PublishError};
pub use publish::write_bundle;
pub use validate::discrepancy_percent;

use std::path::PathBuf;
use std::sync::Arc;

use wicket_config::WicketConfig;
use wicket_lake::CricketLake;
use wicket_llm::{Gateway, GeminiClient, ModelClient, ModelError};

/// Deep analysis depth when the request does not say.
pub const DEFAULT_DEEP_STEPS: u32 = 4;

/// Request-independent knobs taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalystSettings {
    /// Upper bound for a deep analysis's `max_steps`.
    pub max_deep_steps: u32,
    /// Author used by finalize when the request names none.
    pub default_author: String,
    /// Publish root when the request names no folder.
    pub output_dir: PathBuf,
}

impl AnalystSettings {
    #[must_use]
    pub fn from_config(config: &WicketConfig) -> Self {
        Self {
            max_deep_steps: config.limits.max_deep_steps,
            default_author: config.publish.default_author.clone(),
            output_dir: config.publish.output_dir.clone(),
        }
    }
}

impl Default for AnalystSettings {
    fn default() -> Self {
        Self::from_config(&WicketConfig::default())
    }
}

/// Runs the analysis pipelines against one model and one database.
#[derive(Debug)]
pub struct Analyst<C> {
    gateway: Arc<Gateway<C>>,
    lake: CricketLake,
    settings: AnalystSettings,
}

impl Analyst<GeminiClient> {
    /// Build the production analyst from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Http`] if the HTTP client fails to build.
    pub fn from_config(config: &WicketConfig) -> Result<Self, ModelError> {
        let gateway = Gateway::from_config(&config.gemini, &config.limits)?;
        Ok(Self::new(
            Arc::new(gateway),
            CricketLake::new(&config.database.path),
            AnalystSettings::from_config(config),
        ))
    }
}

impl<C: ModelClient> Analyst<C> {
    #[must_use]
    pub const fn new(gateway: Arc<Gateway<C>>, lake: CricketLake, settings: AnalystSettings) -> Self {
        Self {
            gateway,
            lake,
            settings,
        }
    }

    #[must_use]
    pub fn gateway(&self) -> &Gateway<C> {
        &self.gateway
    }

    #[must_use]
    pub const fn lake(&self) -> &CricketLake {
        &self.lake
    }

    #[must_use]
    pub const fn settings(&self) -> &AnalystSettings {
        &self.settings
    }

    /// Resolve a requested deep-analysis depth against the configured bound.
    #[must_use]
    pub fn deep_steps(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(DEFAULT_DEEP_STEPS)
            .clamp(1, self.settings.max_deep_steps.max(1))
    }
}

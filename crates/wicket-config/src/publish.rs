//! Publishing output configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_author() -> String {
    "Wicket Analytics".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublishConfig {
    /// Directory that receives one folder per published project.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Byline used when a finalize request names no author.
    #[serde(default = "default_author")]
    pub default_author: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_author: default_author(),
        }
    }
}

//! Model: ConvertConfig.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Appended to the input path to name the output file.
    pub output_suffix: String,
    /// Appended to the input path to name the problems file.
    pub problems_suffix: String,
    pub json_output: bool,
    pub report_stats: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            output_suffix: ".converted".to_string(),
            problems_suffix: ".problems".to_string(),
            json_output: false,
            report_stats: true,
        }
    }
}

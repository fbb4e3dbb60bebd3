use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ScoringOptions {
    /// Minimum percentage of possible points required to pass (0–100).
    #[serde(default = "default_pass_mark")]
    pub pass_mark: u32,

    /// Decimal places kept when reporting point totals.
    #[serde(default = "default_round_to")]
    pub round_to: u32,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            pass_mark: default_pass_mark(),
            round_to: default_round_to(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SessionLimits {
    /// Maximum number of manual tests a session may hold.
    #[serde(default = "default_max_manual_tests")]
    pub max_manual_tests: usize,

    /// Maximum nesting depth accepted when parsing a type descriptor.
    #[serde(default = "default_max_descriptor_depth")]
    pub max_descriptor_depth: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_manual_tests: default_max_manual_tests(),
            max_descriptor_depth: default_max_descriptor_depth(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GradingConfig {
    #[serde(default)]
    pub scoring: ScoringOptions,

    #[serde(default)]
    pub limits: SessionLimits,
}

impl ScoringOptions {
    pub fn sanitize(mut self) -> Self {
        if self.pass_mark > 100 {
            self.pass_mark = 100;
        }
        if self.round_to > 6 {
            self.round_to = 6;
        }
        self
    }
}

impl GradingConfig {
    pub fn default_config() -> Self {
        GradingConfig {
            scoring: ScoringOptions::default(),
            limits: SessionLimits::default(),
        }
    }

    pub fn from_json_str(contents: &str) -> Result<Self, String> {
        let mut cfg: GradingConfig = serde_json::from_str(contents)
            .map_err(|e| format!("Invalid grading config JSON format: {e}"))?;
        cfg.scoring = cfg.scoring.sanitize();
        if cfg.limits.max_descriptor_depth == 0 {
            return Err("limits.max_descriptor_depth must be at least 1".to_string());
        }
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|_| format!("Failed to read grading config file at {path:?}"))?;
        let cfg = Self::from_json_str(&contents)?;
        tracing::debug!(path = ?path, "loaded grading config");
        Ok(cfg)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {e:?}"))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config to JSON: {e}"))?;

        fs::write(path, json).map_err(|e| format!("Failed to write config file to disk: {e:?}"))?;

        Ok(())
    }
}

//Default Functions

fn default_pass_mark() -> u32 {
    50
}

fn default_round_to() -> u32 {
    2
}

fn default_max_manual_tests() -> usize {
    100
}

fn default_max_descriptor_depth() -> usize {
    32
}

//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can override it.
//! Missing fields fall back to the defaults below.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Default board rows when none (or garbage) is given on the command line
pub const DEFAULT_ROWS: u32 = 7;
/// Default bricks per row
pub const DEFAULT_COLUMNS: u32 = 8;
/// Upper bound on `basic_brick_weight`
pub const MAX_BASIC_BRICK_WEIGHT: u32 = 1_000;

/// Game balance and layout values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Window ===
    pub window_width: f32,
    pub window_height: f32,
    pub wall_width: f32,

    // === Ball ===
    pub ball_size: f32,
    /// Per-axis speed of a freshly served ball
    pub ball_speed: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    /// Distance from the bottom edge to the paddle center
    pub paddle_from_bottom: f32,

    // === Bricks ===
    pub brick_height: f32,
    pub brick_gap: f32,
    pub row_spacing: f32,
    /// Weight of a plain brick against the five special picks (weight 1 each)
    pub basic_brick_weight: u32,

    // === Lives ===
    pub initial_lives: u32,
    pub max_lives: u32,
    pub heart_size: f32,
    pub heart_fall_speed: f32,

    // === Strategies ===
    pub puck_count: u32,
    pub puck_size: f32,
    pub puck_speed: f32,
    pub turbo_factor: f32,
    /// Ball collisions before turbo wears off
    pub turbo_collisions: u32,
    /// Ball contacts an extra paddle survives
    pub extra_paddle_hits: u32,
    /// Maximum nesting of double strategies
    pub max_strategy_depth: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window_width: 700.0,
            window_height: 500.0,
            wall_width: 5.0,

            ball_size: 20.0,
            ball_speed: 150.0,

            paddle_width: 100.0,
            paddle_height: 15.0,
            paddle_speed: 300.0,
            paddle_from_bottom: 30.0,

            brick_height: 15.0,
            brick_gap: 1.0,
            row_spacing: 2.0,
            basic_brick_weight: 5,

            initial_lives: 3,
            max_lives: 4,
            heart_size: 20.0,
            heart_fall_speed: 100.0,

            puck_count: 2,
            puck_size: 15.0,
            puck_speed: 150.0,
            turbo_factor: 1.4,
            turbo_collisions: 6,
            extra_paddle_hits: 4,
            max_strategy_depth: 2,
        }
    }
}

impl Tuning {
    pub fn window(&self) -> Vec2 {
        Vec2::new(self.window_width, self.window_height)
    }

    /// Parse from JSON, then repair inconsistent values
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load from a file, falling back to defaults if it is missing or malformed
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Malformed tuning in {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Clamp values so the game invariants hold
    pub fn sanitized(mut self) -> Self {
        self.max_lives = self.max_lives.max(1);
        if self.initial_lives > self.max_lives {
            log::warn!(
                "initial_lives {} exceeds max_lives {}; clamping",
                self.initial_lives,
                self.max_lives
            );
            self.initial_lives = self.max_lives;
        }
        self.extra_paddle_hits = self.extra_paddle_hits.max(1);
        if self.basic_brick_weight > MAX_BASIC_BRICK_WEIGHT {
            log::warn!(
                "basic_brick_weight {} above {MAX_BASIC_BRICK_WEIGHT}; clamping",
                self.basic_brick_weight
            );
            self.basic_brick_weight = MAX_BASIC_BRICK_WEIGHT;
        }
        // Turbo must speed the ball up
        let turbo_ok = self.turbo_factor.is_finite() && self.turbo_factor > 1.0;
        if !turbo_ok {
            let fallback = Self::default().turbo_factor;
            log::warn!("turbo_factor {} must be above 1; using {fallback}", self.turbo_factor);
            self.turbo_factor = fallback;
        }
        self
    }
}

/// Board dimensions from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub rows: u32,
    pub columns: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
        }
    }
}

impl BoardConfig {
    /// Build from raw arguments. Both must be positive integers, otherwise both
    /// fall back to the defaults.
    pub fn from_args(rows: Option<&str>, columns: Option<&str>) -> Self {
        let parse = |s: Option<&str>| {
            s.and_then(|s| s.trim().parse::<u32>().ok())
                .filter(|n| *n > 0)
        };
        match (parse(rows), parse(columns)) {
            (Some(rows), Some(columns)) => Self { rows, columns },
            _ => {
                if rows.is_some() || columns.is_some() {
                    log::warn!("Invalid board size {rows:?}x{columns:?}; using defaults");
                }
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_config_fallback() {
        assert_eq!(BoardConfig::from_args(None, None), BoardConfig::default());
        assert_eq!(
            BoardConfig::from_args(Some("3"), Some("4")),
            BoardConfig { rows: 3, columns: 4 }
        );
        // One bad value resets both
        assert_eq!(BoardConfig::from_args(Some("3"), Some("four")), BoardConfig::default());
        assert_eq!(BoardConfig::from_args(Some("0"), Some("4")), BoardConfig::default());
        assert_eq!(BoardConfig::from_args(Some("-2"), Some("4")), BoardConfig::default());
        assert_eq!(BoardConfig::from_args(Some("5"), None), BoardConfig::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "turbo_collisions": 3, "max_lives": 5 }"#).unwrap();
        assert_eq!(tuning.turbo_collisions, 3);
        assert_eq!(tuning.max_lives, 5);
        assert_eq!(tuning.initial_lives, 3);
        assert_eq!(tuning.window_width, 700.0);
    }

    #[test]
    fn test_initial_lives_clamped() {
        let tuning = Tuning::from_json(r#"{ "initial_lives": 9, "max_lives": 4 }"#).unwrap();
        assert_eq!(tuning.initial_lives, 4);
    }

    #[test]
    fn test_brick_weight_and_turbo_factor_clamped() {
        let tuning = Tuning::from_json(
            r#"{ "basic_brick_weight": 4294967295, "turbo_factor": 0.5 }"#,
        )
        .unwrap();
        assert_eq!(tuning.basic_brick_weight, MAX_BASIC_BRICK_WEIGHT);
        assert_eq!(tuning.turbo_factor, Tuning::default().turbo_factor);

        let tuning = Tuning::from_json(r#"{ "turbo_factor": 1.0 }"#).unwrap();
        assert_eq!(tuning.turbo_factor, Tuning::default().turbo_factor);

        let tuning = Tuning::from_json(r#"{ "turbo_factor": 2.0 }"#).unwrap();
        assert_eq!(tuning.turbo_factor, 2.0);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Tuning::from_json("{ turbo").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default(Path::new("/definitely/not/here.json"));
        assert_eq!(tuning, Tuning::default());
    }
}

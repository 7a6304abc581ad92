use crate::game_logic::{
    ACCELERATION, BORDER_THICKNESS, CAR_SIZE, COMPUTER_MAX_VELOCITY, COMPUTER_ROTATION_STEP,
    COMPUTER_START, CollisionMask, FINISH_POSITION, FINISH_SIZE, LEVEL_SPEEDUP, LEVELS, MaskError,
    PLAYER_MAX_VELOCITY, PLAYER_ROTATION_STEP, PLAYER_START, TICK_RATE_HZ, TRACK_SIZE, TrackAssets,
    WAYPOINTS,
};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read race config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse race config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid mask in race config: {0}")]
    Mask(#[from] MaskError),

    #[error("Race config has an empty waypoint path")]
    EmptyPath,

    #[error("Race config needs at least one level")]
    NoLevels,

    #[error("Tick rate must be a positive, finite number of Hz, got {0}")]
    InvalidTickRate(f64),
}

/// A silhouette described as filled rectangles, or as ASCII art when `art` is set
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MaskShape {
    pub width: u32,
    pub height: u32,
    // [x, y, width, height]
    pub rects: Vec<[u32; 4]>,
    pub art: Option<String>,
}

impl Default for MaskShape {
    fn default() -> Self {
        Self::solid(CAR_SIZE.0, CAR_SIZE.1)
    }
}

impl MaskShape {
    pub fn solid(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rects: vec![[0, 0, width, height]],
            art: None,
        }
    }

    pub fn build(&self) -> Result<CollisionMask, MaskError> {
        if let Some(art) = &self.art {
            return CollisionMask::from_ascii(art);
        }

        let rects = self
            .rects
            .iter()
            .map(|&[x, y, width, height]| match (x.checked_add(width), y.checked_add(height)) {
                (Some(max_x), Some(max_y)) => Ok(URect::new(x, y, max_x, max_y)),
                _ => Err(MaskError::RectOverflow {
                    x,
                    y,
                    width,
                    height,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CollisionMask::from_rects(self.width, self.height, &rects))
    }
}

/// A region silhouette and where its top-left corner sits on the track
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlacedMask {
    pub offset: [f32; 2],
    pub shape: MaskShape,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CarConfig {
    pub start: [f32; 2],
    pub max_velocity: f32,
    pub rotation_step: f32,
    #[serde(default)]
    pub silhouette: MaskShape,
}

#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RaceConfig {
    pub tick_rate_hz: f64,
    pub levels: u32,
    pub acceleration: f32,
    pub level_speedup: f32,
    pub player: CarConfig,
    pub computer: CarConfig,
    pub border: PlacedMask,
    pub finish: PlacedMask,
    pub path: Vec<[i32; 2]>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        let inner = TRACK_SIZE - 2 * BORDER_THICKNESS;
        Self {
            tick_rate_hz: TICK_RATE_HZ,
            levels: LEVELS,
            acceleration: ACCELERATION,
            level_speedup: LEVEL_SPEEDUP,
            player: CarConfig {
                start: [PLAYER_START.0, PLAYER_START.1],
                max_velocity: PLAYER_MAX_VELOCITY,
                rotation_step: PLAYER_ROTATION_STEP,
                silhouette: MaskShape::default(),
            },
            computer: CarConfig {
                start: [COMPUTER_START.0, COMPUTER_START.1],
                max_velocity: COMPUTER_MAX_VELOCITY,
                rotation_step: COMPUTER_ROTATION_STEP,
                silhouette: MaskShape::default(),
            },
            // plain wall around the edge of the track image
            border: PlacedMask {
                offset: [0.0, 0.0],
                shape: MaskShape {
                    width: TRACK_SIZE,
                    height: TRACK_SIZE,
                    rects: vec![
                        [0, 0, TRACK_SIZE, BORDER_THICKNESS],
                        [0, TRACK_SIZE - BORDER_THICKNESS, TRACK_SIZE, BORDER_THICKNESS],
                        [0, BORDER_THICKNESS, BORDER_THICKNESS, inner],
                        [TRACK_SIZE - BORDER_THICKNESS, BORDER_THICKNESS, BORDER_THICKNESS, inner],
                    ],
                    art: None,
                },
            },
            finish: PlacedMask {
                offset: [FINISH_POSITION.0, FINISH_POSITION.1],
                shape: MaskShape::solid(FINISH_SIZE.0, FINISH_SIZE.1),
            },
            path: WAYPOINTS.iter().map(|&(x, y)| [x, y]).collect(),
        }
    }
}

impl RaceConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RaceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load `path`, or fall back to the built-in track when the file is missing.
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("No race config at {}, using the built-in track", path.display());
            return Ok(Self::default());
        }
        info!("Loading race config from {}", path.display());
        Self::load(path)
    }

    /// Length of one fixed tick. Only meaningful on a validated config.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // the fixed clock rejects zero-length ticks, so very high rates are out too
        let tick = Duration::try_from_secs_f64(1.0 / self.tick_rate_hz);
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0)
            || !tick.is_ok_and(|tick| !tick.is_zero())
        {
            return Err(ConfigError::InvalidTickRate(self.tick_rate_hz));
        }
        if self.path.is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        if self.levels == 0 {
            return Err(ConfigError::NoLevels);
        }
        Ok(())
    }

    pub fn build_track(&self) -> Result<TrackAssets, ConfigError> {
        Ok(TrackAssets {
            border: self.border.shape.build()?,
            border_offset: Vec2::from(self.border.offset),
            finish: self.finish.shape.build()?,
            finish_offset: Vec2::from(self.finish.offset),
            path: self.path.iter().map(|&p| IVec2::from(p)).collect(),
        })
    }
}

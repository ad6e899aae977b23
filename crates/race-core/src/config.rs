//! Race configuration: surface geometry, course shape, and timing knobs.

use serde::{Deserialize, Serialize};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Rectangular spawn band marbles are scattered across at race start.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpawnArea {
    /// `[min, max]` range on the x axis.
    pub x: [f32; 2],
    /// `[min, max]` range on the y axis.
    pub y: [f32; 2],
}

impl Default for SpawnArea {
    fn default() -> Self {
        Self {
            x: [60.0, 740.0],
            y: [20.0, 60.0],
        }
    }
}

/// Complete race configuration.
///
/// Every field has a default so a partial JSON document fills in the rest,
/// the same way map documents do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceConfig {
    /// Drawing surface width in pixels.
    #[serde(default = "default_surface_width")]
    pub surface_width: f32,
    /// Drawing surface height in pixels.
    #[serde(default = "default_surface_height")]
    pub surface_height: f32,
    /// Y coordinate of the finish line near the bottom boundary.
    #[serde(default = "default_finish_line_y")]
    pub finish_line_y: f32,
    /// Platform body thickness in pixels.
    #[serde(default = "default_platform_thickness")]
    pub platform_thickness: f32,
    /// Marble radius in pixels.
    #[serde(default = "default_marble_radius")]
    pub marble_radius: f32,
    /// Where marbles spawn at race start.
    #[serde(default)]
    pub spawn_area: SpawnArea,
    /// Number of platform rows between spawn band and finish line.
    #[serde(default = "default_platform_rows")]
    pub platform_rows: u32,
    /// Seconds after the first finisher before the race is called even if
    /// some marbles are still on the course.
    #[serde(default = "default_finish_grace_seconds")]
    pub finish_grace_seconds: f64,
}

fn default_surface_width() -> f32 {
    800.0
}

fn default_surface_height() -> f32 {
    600.0
}

fn default_finish_line_y() -> f32 {
    550.0
}

fn default_platform_thickness() -> f32 {
    14.0
}

fn default_marble_radius() -> f32 {
    12.0
}

fn default_platform_rows() -> u32 {
    5
}

fn default_finish_grace_seconds() -> f64 {
    10.0
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            surface_width: default_surface_width(),
            surface_height: default_surface_height(),
            finish_line_y: default_finish_line_y(),
            platform_thickness: default_platform_thickness(),
            marble_radius: default_marble_radius(),
            spawn_area: SpawnArea::default(),
            platform_rows: default_platform_rows(),
            finish_grace_seconds: default_finish_grace_seconds(),
        }
    }
}

impl RaceConfig {
    /// Loads a configuration from a JSON string and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to a JSON string.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks internal consistency of the geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.surface_width <= 0.0 || self.surface_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "surface dimensions must be positive, got {}x{}",
                self.surface_width, self.surface_height
            )));
        }
        if self.finish_line_y <= 0.0 || self.finish_line_y > self.surface_height {
            return Err(ConfigError::Invalid(format!(
                "finish line y {} outside surface height {}",
                self.finish_line_y, self.surface_height
            )));
        }
        if self.marble_radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "marble radius must be positive, got {}",
                self.marble_radius
            )));
        }
        if self.platform_thickness <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "platform thickness must be positive, got {}",
                self.platform_thickness
            )));
        }
        if self.finish_grace_seconds < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "finish grace window must be non-negative, got {}",
                self.finish_grace_seconds
            )));
        }
        Ok(())
    }

    /// Updates the drawing surface geometry. Existing bodies keep their
    /// positions; only subsequent composition uses the new bounds.
    pub fn resize_surface(&mut self, width: f32, height: f32) {
        self.surface_width = width;
        self.surface_height = height;
    }
}

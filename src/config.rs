//! Viewport configuration parsed from environment variables.
//!
//! Every knob has a default in [`crate::consts`]. Values that fail to parse
//! fall back to the default; values that parse but make no sense (inverted
//! zoom bounds, a step that would not zoom) are rejected by
//! [`ViewportConfig::validate`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;
use std::time::Duration;

use crate::consts::{
    FRAME_INTERVAL_MS, INITIAL_ZOOM, MAX_ZOOM, MIN_ZOOM, RESIZE_DEBOUNCE_MS, WHEEL_THROTTLE_MS, WHEEL_ZOOM_STEP,
    ZOOM_BUTTON_STEP,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("zoom bounds must be positive and finite (min {min}, max {max})")]
    NonPositiveZoomBound { min: f64, max: f64 },
    #[error("minimum zoom {min} exceeds maximum zoom {max}")]
    InvertedZoomBounds { min: f64, max: f64 },
    #[error("{name} must be a finite factor greater than 1 (got {value})")]
    InvalidZoomStep { name: &'static str, value: f64 },
    #[error("initial zoom must be finite and positive (got {0})")]
    InvalidInitialZoom(f64),
    #[error("{name} must be greater than zero")]
    ZeroInterval { name: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Clamped into `[min_zoom, max_zoom]` when the controller is built.
    pub initial_zoom: f64,
    pub button_zoom_step: f64,
    pub wheel_zoom_step: f64,
    pub resize_debounce: Duration,
    pub wheel_throttle: Duration,
    pub frame_interval: Duration,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            initial_zoom: INITIAL_ZOOM,
            button_zoom_step: ZOOM_BUTTON_STEP,
            wheel_zoom_step: WHEEL_ZOOM_STEP,
            resize_debounce: Duration::from_millis(RESIZE_DEBOUNCE_MS),
            wheel_throttle: Duration::from_millis(WHEEL_THROTTLE_MS),
            frame_interval: Duration::from_millis(FRAME_INTERVAL_MS),
        }
    }
}

impl ViewportConfig {
    /// Build a validated config from the process environment.
    ///
    /// Optional:
    /// - `VIEWPORT_MIN_ZOOM`: default 0.5
    /// - `VIEWPORT_MAX_ZOOM`: default 3.0
    /// - `VIEWPORT_INITIAL_ZOOM`: default 1.0
    /// - `VIEWPORT_BUTTON_ZOOM_STEP`: default 1.1
    /// - `VIEWPORT_WHEEL_ZOOM_STEP`: default 1.1
    /// - `VIEWPORT_RESIZE_DEBOUNCE_MS`: default 100
    /// - `VIEWPORT_WHEEL_THROTTLE_MS`: default 16
    /// - `VIEWPORT_FRAME_INTERVAL_MS`: default 16
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the resulting values fail validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a validated config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the resulting values fail validation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cfg = Self {
            min_zoom: parse_or(&lookup, "VIEWPORT_MIN_ZOOM", MIN_ZOOM),
            max_zoom: parse_or(&lookup, "VIEWPORT_MAX_ZOOM", MAX_ZOOM),
            initial_zoom: parse_or(&lookup, "VIEWPORT_INITIAL_ZOOM", INITIAL_ZOOM),
            button_zoom_step: parse_or(&lookup, "VIEWPORT_BUTTON_ZOOM_STEP", ZOOM_BUTTON_STEP),
            wheel_zoom_step: parse_or(&lookup, "VIEWPORT_WHEEL_ZOOM_STEP", WHEEL_ZOOM_STEP),
            resize_debounce: Duration::from_millis(parse_or(
                &lookup,
                "VIEWPORT_RESIZE_DEBOUNCE_MS",
                RESIZE_DEBOUNCE_MS,
            )),
            wheel_throttle: Duration::from_millis(parse_or(&lookup, "VIEWPORT_WHEEL_THROTTLE_MS", WHEEL_THROTTLE_MS)),
            frame_interval: Duration::from_millis(parse_or(&lookup, "VIEWPORT_FRAME_INTERVAL_MS", FRAME_INTERVAL_MS)),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check semantic constraints between fields.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds_ok = self.min_zoom.is_finite() && self.max_zoom.is_finite();
        if !bounds_ok || self.min_zoom <= 0.0 || self.max_zoom <= 0.0 {
            return Err(ConfigError::NonPositiveZoomBound { min: self.min_zoom, max: self.max_zoom });
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvertedZoomBounds { min: self.min_zoom, max: self.max_zoom });
        }
        if !self.initial_zoom.is_finite() || self.initial_zoom <= 0.0 {
            return Err(ConfigError::InvalidInitialZoom(self.initial_zoom));
        }
        check_step("button_zoom_step", self.button_zoom_step)?;
        check_step("wheel_zoom_step", self.wheel_zoom_step)?;
        if self.resize_debounce.is_zero() {
            return Err(ConfigError::ZeroInterval { name: "resize_debounce" });
        }
        if self.wheel_throttle.is_zero() {
            return Err(ConfigError::ZeroInterval { name: "wheel_throttle" });
        }
        if self.frame_interval.is_zero() {
            return Err(ConfigError::ZeroInterval { name: "frame_interval" });
        }
        Ok(())
    }
}

fn check_step(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidZoomStep { name, value })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, raw = %raw, "unparseable config value; using default");
            default
        }
    }
}

use crate::error::Error;
use serde_derive::{Deserialize, Serialize};
use std::path::Path;

/// Tracker tunables.
///
/// Serialized with camelCase keys, missing keys fall back to the defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    /// Minimum IoU between a prediction and a detection to accept a match.
    pub iou_threshold: f32,

    /// Consecutive misses a track survives; it is dropped once `missed` exceeds this.
    pub max_misses: u32,

    /// Weight of the raw detection position in the smoothed update (higher = follow detections).
    pub pos_smoothing: f32,

    /// Weight of the raw detection size in the smoothed update.
    pub size_smoothing: f32,

    /// Inflation of the predicted box used as the matching target.
    pub prediction_dilation: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.2,
            max_misses: 10,
            pos_smoothing: 0.6,
            size_smoothing: 0.6,
            prediction_dilation: 1.05,
        }
    }
}

impl TrackerConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;

        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), Error> {
        check(
            "iouThreshold",
            self.iou_threshold,
            (0.0..=1.0).contains(&self.iou_threshold),
            "expected a value in [0, 1]",
        )?;
        check(
            "posSmoothing",
            self.pos_smoothing,
            self.pos_smoothing > 0.0 && self.pos_smoothing < 1.0,
            "expected a value in (0, 1)",
        )?;
        check(
            "sizeSmoothing",
            self.size_smoothing,
            self.size_smoothing > 0.0 && self.size_smoothing < 1.0,
            "expected a value in (0, 1)",
        )?;
        check(
            "predictionDilation",
            self.prediction_dilation,
            self.prediction_dilation.is_finite() && self.prediction_dilation >= 1.0,
            "expected a finite value >= 1",
        )?;

        Ok(())
    }
}

#[inline]
fn check(field: &'static str, value: f32, ok: bool, reason: &'static str) -> Result<(), Error> {
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            value,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TrackerConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.max_misses, 10);
        assert_eq!(config.iou_threshold, 0.2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = TrackerConfig::from_json(r#"{"iouThreshold": 0.3, "maxMisses": 4}"#).unwrap();

        assert_eq!(config.iou_threshold, 0.3);
        assert_eq!(config.max_misses, 4);
        assert_eq!(config.pos_smoothing, 0.6);
        assert_eq!(config.prediction_dilation, 1.05);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = TrackerConfig::from_json(r#"{"posSmoothing": 1.0}"#).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig {
                field: "posSmoothing",
                ..
            }
        ));

        let config = TrackerConfig {
            prediction_dilation: 0.9,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TrackerConfig {
            iou_threshold: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = TrackerConfig::from_json("{ iouThreshold: }").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}

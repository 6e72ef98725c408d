use serde_derive::{Deserialize, Serialize};
use tracing::warn;

use crate::bbox::{BBox, Ltwh};

/// Raw detector output: (x,y) of the left top corner and (width,height) of bbox
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(rename = "p")]
    pub confidence: f32,
    #[serde(rename = "c")]
    pub class: i32,
}

impl Detection {
    #[inline(always)]
    pub fn bbox(&self) -> BBox<Ltwh> {
        BBox::ltwh(self.x, self.y, self.w, self.h)
    }
}

/// Selects the detections that get tracked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionFilter {
    /// Class of interest (COCO `0` is a person).
    pub class: i32,
    /// Detections must score strictly above this.
    pub min_confidence: f32,
    /// At most this many detections are kept, in input order.
    pub max_count: usize,
}

impl Default for DetectionFilter {
    fn default() -> Self {
        Self {
            class: 0,
            min_confidence: 0.5,
            max_count: 5,
        }
    }
}

impl DetectionFilter {
    pub fn accepts(&self, det: &Detection) -> bool {
        det.class == self.class && det.confidence > self.min_confidence
    }

    /// Boxes of accepted detections. Boxes with non-finite coordinates are
    /// dropped here so they never reach the tracker.
    pub fn apply(&self, detections: &[Detection]) -> Vec<BBox<Ltwh>> {
        detections
            .iter()
            .filter(|d| self.accepts(d))
            .filter(|d| {
                let finite = d.bbox().is_finite();
                if !finite {
                    warn!(?d, "dropping detection with non-finite box");
                }
                finite
            })
            .take(self.max_count)
            .map(Detection::bbox)
            .collect()
    }
}

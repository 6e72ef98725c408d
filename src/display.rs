use std::collections::HashMap;

use crate::bbox::{BBox, Ltwh};
use crate::id::TrackId;
use crate::math::lerp;
use crate::Track;

/// Eases drawn boxes toward tracker output between detector runs.
#[derive(Debug, Clone)]
pub struct BoxAnimator {
    factor: f32,
    shown: HashMap<TrackId, BBox<Ltwh>>,
}

impl BoxAnimator {
    pub fn new(factor: f32) -> Self {
        Self {
            factor: factor.clamp(0.0, 1.0),
            shown: HashMap::new(),
        }
    }

    /// Moves each displayed box `factor` of the way to its track and returns
    /// the boxes to draw, in `targets` order. Unknown ids appear at their
    /// target, ids absent from `targets` are forgotten.
    pub fn step(&mut self, targets: &[Track]) -> Vec<(TrackId, BBox<Ltwh>)> {
        let t = self.factor;
        let mut shown = HashMap::with_capacity(targets.len());

        let out = targets
            .iter()
            .map(|track| {
                let target = track.bbox();
                let bbox = match self.shown.get(&track.id) {
                    Some(prev) => BBox::ltwh(
                        lerp(prev.left(), target.left(), t),
                        lerp(prev.top(), target.top(), t),
                        lerp(prev.width(), target.width(), t),
                        lerp(prev.height(), target.height(), t),
                    ),
                    None => target,
                };

                shown.insert(track.id, bbox);
                (track.id, bbox)
            })
            .collect();

        self.shown = shown;
        out
    }

    pub fn clear(&mut self) {
        self.shown.clear();
    }
}

impl Default for BoxAnimator {
    fn default() -> Self {
        Self::new(0.2)
    }
}

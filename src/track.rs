use crate::bbox::{BBox, Ltwh};
use crate::id::TrackId;
use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub id: TrackId,

    // smoothed top-left corner and size
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,

    // per-frame displacement, drives prediction only
    pub vx: f32,
    pub vy: f32,

    /// Frames survived since birth.
    pub age: u32,

    /// Consecutive frames without a matching detection.
    pub missed: u32,
}

/// Where a track is in its lifecycle. Derived from `age` and `missed`,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Born this frame, not matched yet.
    Tentative,
    /// Matched on the latest frame.
    Confirmed,
    /// Alive but missed on the latest frame(s).
    Coasting,
}

impl Track {
    /// A freshly born track: the detection box verbatim, still.
    pub fn born(id: TrackId, det: &BBox<Ltwh>) -> Self {
        Self {
            id,
            x: det.left(),
            y: det.top(),
            w: det.width(),
            h: det.height(),
            vx: 0.0,
            vy: 0.0,
            age: 0,
            missed: 0,
        }
    }

    #[inline]
    pub fn bbox(&self) -> BBox<Ltwh> {
        BBox::ltwh(self.x, self.y, self.w, self.h)
    }

    #[inline]
    pub fn velocity(&self) -> na::Vector2<f32> {
        na::Vector2::new(self.vx, self.vy)
    }

    pub fn state(&self) -> TrackState {
        if self.missed > 0 {
            TrackState::Coasting
        } else if self.age == 0 {
            TrackState::Tentative
        } else {
            TrackState::Confirmed
        }
    }

    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.state() == TrackState::Confirmed
    }
}

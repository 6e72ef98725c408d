use crate::assignment::assign;
use crate::bbox::{BBox, Ltwh};
use crate::config::TrackerConfig;
use crate::error::Error;
use crate::id::{IdGenerator, TrackId};
use crate::math::ema;
use crate::predictor;
use crate::Track;

use tracing::{debug, trace};

/// Frame-to-frame box tracker.
///
/// Holds nothing but its tunables and id counter: the track list is passed
/// in and handed back on every [`Tracker::update`], and the caller threads
/// it into the next call. Each tracker counts ids on its own.
///
/// Boxes must have finite coordinates; non-finite input is not checked and
/// ends up in the affected track.
#[derive(Debug, Clone)]
pub struct Tracker {
    config: TrackerConfig,
    ids: IdGenerator,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config,
            ids: IdGenerator::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// The id the next born track will get.
    #[inline]
    pub fn next_id(&self) -> TrackId {
        self.ids.peek()
    }

    /// Starts a new session. Pass an empty track list to the next update.
    pub fn reset(&mut self) {
        debug!("tracker reset");
        self.ids.reset();
    }

    /// Advances `previous` by one frame given this frame's detections.
    ///
    /// Output order: matched tracks in detection order, then new tracks,
    /// then coasting ones. Sort by id if a stable order matters.
    pub fn update(&mut self, detections: &[BBox<Ltwh>], previous: &[Track]) -> Vec<Track> {
        let predictions: Vec<_> = previous
            .iter()
            .map(|t| predictor::predict(t, self.config.prediction_dilation))
            .collect();

        let assignments = assign(&predictions, detections, self.config.iou_threshold);

        let mut matched = vec![false; previous.len()];
        let mut tracks = Vec::with_capacity(previous.len() + detections.len());

        for (det, ti) in detections.iter().zip(&assignments) {
            if let Some(ti) = *ti {
                matched[ti] = true;
                tracks.push(self.correct(&previous[ti], det));
            }
        }

        for (det, _) in detections.iter().zip(&assignments).filter(|(_, ti)| ti.is_none()) {
            let id = self.ids.next_id();
            debug!(%id, x = det.left(), y = det.top(), w = det.width(), h = det.height(), "new track");

            tracks.push(Track::born(id, det));
        }

        let births = tracks.len() - matched.iter().filter(|m| **m).count();
        let mut retired = 0;

        for (prev, _) in previous.iter().zip(&matched).filter(|(_, m)| !**m) {
            match self.coast(prev) {
                Some(t) => tracks.push(t),
                None => {
                    debug!(id = %prev.id, age = prev.age + 1, "track retired");
                    retired += 1;
                }
            }
        }

        trace!(
            detections = detections.len(),
            previous = previous.len(),
            births,
            retired,
            tracks = tracks.len(),
            "tracker update"
        );

        tracks
    }

    /// Smoothed state of `prev` after matching `det`.
    fn correct(&self, prev: &Track, det: &BBox<Ltwh>) -> Track {
        let alpha = self.config.pos_smoothing;
        let beta = self.config.size_smoothing;

        Track {
            id: prev.id,
            x: ema(det.left(), prev.x + prev.vx, alpha),
            y: ema(det.top(), prev.y + prev.vy, alpha),
            w: ema(det.width(), prev.w, beta),
            h: ema(det.height(), prev.h, beta),
            // raw displacement between the last estimate and the detection
            vx: det.left() - prev.x,
            vy: det.top() - prev.y,
            age: prev.age + 1,
            missed: 0,
        }
    }

    /// `prev` carried through a frame without a match, `None` once it ran
    /// out of misses.
    fn coast(&self, prev: &Track) -> Option<Track> {
        let missed = prev.missed + 1;
        if missed > self.config.max_misses {
            return None;
        }

        let moved = predictor::advance(prev);

        Some(Track {
            x: moved.left(),
            y: moved.top(),
            age: prev.age + 1,
            missed,
            ..*prev
        })
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self {
            config: TrackerConfig::default(),
            ids: IdGenerator::new(),
        }
    }
}

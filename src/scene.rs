use crate::bbox::{BBox, Ltwh};
use crate::config::TrackerConfig;
use crate::error::Error;
use crate::tracker::Tracker;
use crate::Track;

use tracing::info;

/// A tracking session over one video source.
///
/// Owns the track list between frames so callers only feed detections.
#[derive(Debug, Clone)]
pub struct Scene {
    tracker: Tracker,
    tracks: Vec<Track>,
    frames: u64,
}

impl Scene {
    pub fn new(config: TrackerConfig) -> Result<Self, Error> {
        Ok(Self::with_tracker(Tracker::new(config)?))
    }

    pub fn with_tracker(tracker: Tracker) -> Self {
        Self {
            tracker,
            tracks: Vec::with_capacity(32),
            frames: 0,
        }
    }

    pub fn update(&mut self, detections: &[BBox<Ltwh>]) -> &[Track] {
        self.tracks = self.tracker.update(detections, &self.tracks);
        self.frames += 1;

        &self.tracks
    }

    #[inline]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Tracks matched on the latest frame.
    pub fn confirmed(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(|t| t.is_confirmed())
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Drops every track and restarts ids, e.g. after a camera restart.
    pub fn reset(&mut self) {
        info!(
            frames = self.frames,
            tracks = self.tracks.len(),
            "scene reset"
        );

        self.tracks.clear();
        self.frames = 0;
        self.tracker.reset();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::with_tracker(Tracker::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TrackId;

    #[test]
    fn test_scene_threads_tracks() {
        let mut scene = Scene::default();

        scene.update(&[BBox::ltwh(0.0, 0.0, 50.0, 50.0)]);
        let tracks = scene.update(&[BBox::ltwh(2.0, 0.0, 50.0, 50.0)]);

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, TrackId(1));
        assert_eq!(tracks[0].age, 1);
        assert_eq!(scene.confirmed().count(), 1);
        assert_eq!(scene.frame_count(), 2);
    }

    #[test]
    fn test_scene_reset() {
        let mut scene = Scene::default();
        scene.update(&[BBox::ltwh(0.0, 0.0, 50.0, 50.0)]);
        scene.update(&[BBox::ltwh(200.0, 0.0, 50.0, 50.0)]);
        assert_eq!(scene.tracks().len(), 2);

        scene.reset();
        assert!(scene.tracks().is_empty());

        let tracks = scene.update(&[BBox::ltwh(200.0, 0.0, 50.0, 50.0)]);
        assert_eq!(tracks[0].id, TrackId(1));
        assert_eq!(tracks[0].age, 0);
    }
}

pub mod assignment;
pub mod bbox;
pub mod config;
pub mod detection;
pub mod display;
pub mod error;
pub mod frame;
pub mod id;
pub mod math;
pub mod predictor;
pub mod scene;
pub mod tracker;

mod track;

pub use bbox::intersection_over_union;
pub use config::TrackerConfig;
pub use detection::{Detection, DetectionFilter};
pub use frame::Frame;
pub use id::TrackId;
pub use scene::Scene;
pub use track::{Track, TrackState};
pub use tracker::Tracker;

use error::Error;
use std::collections::HashMap;
use std::rc::Rc;

/// Tracking over several named sources, each with its own scene and ids.
pub trait Tracking {
    fn update(&mut self, frames: &[Frame], src: &str) -> Result<(), Error>;
    fn tracks(&self, src: &str) -> Rc<[Track]>;
    fn reset(&mut self, src: &str);
}

pub struct SceneTracker {
    template: Tracker,
    filter: DetectionFilter,
    scenes: HashMap<String, Scene>,
}

impl SceneTracker {
    pub fn new(config: TrackerConfig, filter: DetectionFilter) -> Result<Self, Error> {
        Ok(Self {
            template: Tracker::new(config)?,
            filter,
            scenes: HashMap::new(),
        })
    }

    #[inline]
    pub fn scene(&self, src: &str) -> Option<&Scene> {
        self.scenes.get(src)
    }
}

impl Default for SceneTracker {
    fn default() -> Self {
        Self {
            template: Tracker::default(),
            filter: DetectionFilter::default(),
            scenes: HashMap::new(),
        }
    }
}

impl crate::Tracking for SceneTracker {
    fn update(&mut self, frames: &[Frame], src: &str) -> Result<(), Error> {
        let template = &self.template;
        let scene = self
            .scenes
            .entry(src.to_string())
            .or_insert_with(|| Scene::with_tracker(template.clone()));

        for frame in frames {
            let boxes = frame.boxes(&self.filter)?;
            scene.update(&boxes);
        }

        Ok(())
    }

    #[inline]
    fn tracks(&self, src: &str) -> Rc<[Track]> {
        if let Some(scene) = self.scenes.get(src) {
            return scene.tracks().into();
        }

        Rc::new([])
    }

    fn reset(&mut self, src: &str) {
        if let Some(scene) = self.scenes.get_mut(src) {
            scene.reset();
        }
    }
}

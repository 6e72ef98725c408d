use crate::bbox::{BBox, Ltwh};
use crate::detection::{Detection, DetectionFilter};
use crate::error::Error;

pub struct Frame {
    pub dims: (u32, u32),
    // resolution the detector saw, when it ran on a downsampled copy
    pub detector_dims: Option<(u32, u32)>,
    pub detections: Vec<Detection>,
    pub timestamp: f32, // in seconds
}

impl Frame {
    pub fn new(dims: (u32, u32), detections: Vec<Detection>, timestamp: f32) -> Self {
        Self {
            dims,
            detector_dims: None,
            detections,
            timestamp,
        }
    }

    /// Filtered detection boxes in frame coordinates.
    pub fn boxes(&self, filter: &DetectionFilter) -> Result<Vec<BBox<Ltwh>>, Error> {
        let boxes = filter.apply(&self.detections);

        match self.detector_dims {
            None => Ok(boxes),
            Some((dw, dh)) if dw == 0 || dh == 0 => Err(Error::InvalidFrame(format!(
                "detector resolution {}x{} has a zero side",
                dw, dh
            ))),
            Some((dw, dh)) => {
                let sx = self.dims.0 as f32 / dw as f32;
                let sy = self.dims.1 as f32 / dh as f32;

                Ok(boxes.iter().map(|b| b.scaled(sx, sy)).collect())
            }
        }
    }
}

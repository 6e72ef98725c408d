use crate::bbox::{intersection_over_union, BBox, Ltwh};
use ndarray::Array2;

/// IoU of every detection (rows) against every prediction (columns).
pub fn iou_matrix(predictions: &[BBox<Ltwh>], detections: &[BBox<Ltwh>]) -> Array2<f32> {
    Array2::from_shape_fn((detections.len(), predictions.len()), |(d, p)| {
        intersection_over_union(&predictions[p], &detections[d])
    })
}

/// Maps each detection index to the index of the prediction it claimed, or
/// `None` when nothing reached `threshold`.
///
/// Detections claim predictions first-come-first-served in input order: each
/// takes the unclaimed prediction it overlaps most, so an earlier detection
/// can take the track a later one overlaps better. This is not an optimal
/// bipartite matching. If the detector reorders its output between frames
/// (e.g. by confidence), which detection wins a contested track can change
/// too. Ties go to the lower prediction index; zero overlap never matches.
pub fn assign(
    predictions: &[BBox<Ltwh>],
    detections: &[BBox<Ltwh>],
    threshold: f32,
) -> Vec<Option<usize>> {
    let ious = iou_matrix(predictions, detections);
    let mut used = vec![false; predictions.len()];

    (0..detections.len())
        .map(|di| {
            let mut best: Option<(usize, f32)> = None;

            for (ti, &iou) in ious.row(di).iter().enumerate() {
                if used[ti] {
                    continue;
                }

                if iou > best.map_or(0.0, |(_, b)| b) {
                    best = Some((ti, iou));
                }
            }

            match best {
                Some((ti, iou)) if iou >= threshold => {
                    used[ti] = true;
                    Some(ti)
                }
                _ => None,
            }
        })
        .collect()
}

use crate::bbox::{BBox, Ltwh};
use crate::Track;

/// Expected box of `track` in the current frame, used as the matching target.
///
/// The center moves by one step of the track velocity and the size is
/// inflated by `dilation` around it to absorb detector jitter.
#[inline]
pub fn predict(track: &Track, dilation: f32) -> BBox<Ltwh> {
    let center = track.bbox().center() + track.velocity();

    BBox::xywh(center.x, center.y, track.w * dilation, track.h * dilation).as_ltwh()
}

/// The track box moved one velocity step, size unchanged.
#[inline]
pub fn advance(track: &Track) -> BBox<Ltwh> {
    BBox::ltwh(track.x + track.vx, track.y + track.vy, track.w, track.h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TrackId;
    use approx::assert_relative_eq;

    fn moving(vx: f32, vy: f32) -> Track {
        let mut t = Track::born(TrackId(1), &BBox::ltwh(10.0, 20.0, 100.0, 200.0));
        t.vx = vx;
        t.vy = vy;
        t
    }

    #[test]
    fn test_predict_dilates_around_moved_center() {
        let p = predict(&moving(5.0, -5.0), 1.1);

        // center (60, 120) + (5, -5)
        assert_relative_eq!(p.center().x, 65.0, epsilon = 1e-4);
        assert_relative_eq!(p.center().y, 115.0, epsilon = 1e-4);
        assert_relative_eq!(p.width(), 110.0, epsilon = 1e-4);
        assert_relative_eq!(p.height(), 220.0, epsilon = 1e-4);
        assert_relative_eq!(p.left(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_predict_without_dilation_is_advance() {
        let t = moving(3.0, 4.0);
        let p = predict(&t, 1.0);
        let a = advance(&t);

        assert_relative_eq!(p.left(), a.left(), epsilon = 1e-4);
        assert_relative_eq!(p.top(), a.top(), epsilon = 1e-4);
        assert_eq!((a.left(), a.top()), (13.0, 24.0));
        assert_eq!((a.width(), a.height()), (100.0, 200.0));
    }
}

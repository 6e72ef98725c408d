use nalgebra as na;
use std::marker::PhantomData;

pub trait BBoxFormat: std::fmt::Debug + Copy {}

/// Left-top-width-height format, contains left top corner and width-height
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ltwh;
impl BBoxFormat for Ltwh {}

/// Left-top-right-bottom format, contains left top and right bottom corners
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ltrb;
impl BBoxFormat for Ltrb {}

/// X-y-width-height format, contains coordinates of the center of bbox and width-height
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Xywh;
impl BBoxFormat for Xywh {}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BBox<F: BBoxFormat>([f32; 4], PhantomData<F>);

impl<F: BBoxFormat> BBox<F> {
    #[inline]
    pub fn as_slice(&self) -> &[f32; 4] {
        &self.0
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl BBox<Ltwh> {
    #[inline]
    pub fn ltwh(x1: f32, x2: f32, x3: f32, x4: f32) -> Self {
        BBox([x1, x2, x3, x4], PhantomData)
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.0[3]
    }

    #[inline]
    pub fn center(&self) -> na::Point2<f32> {
        na::Point2::new(
            self.left() + self.width() / 2.0,
            self.top() + self.height() / 2.0,
        )
    }

    /// Area of the box; boxes with non-positive extent have zero area.
    #[inline]
    pub fn area(&self) -> f32 {
        self.as_ltrb().area()
    }

    #[inline]
    pub fn as_ltrb(&self) -> BBox<Ltrb> {
        self.into()
    }

    #[inline]
    pub fn as_xywh(&self) -> BBox<Xywh> {
        self.into()
    }

    #[inline]
    pub fn iou(&self, other: &BBox<Ltwh>) -> f32 {
        intersection_over_union(self, other)
    }

    /// Scales horizontal components by `sx` and vertical ones by `sy`.
    #[inline]
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        Self::ltwh(
            self.left() * sx,
            self.top() * sy,
            self.width() * sx,
            self.height() * sy,
        )
    }

    /// Grows the box by `pad` on every side, then clips it to a frame of
    /// `dims` (width, height) anchored at the origin. A box past the frame
    /// edge ends up with zero width or height.
    pub fn expand_within(&self, pad: f32, dims: (f32, f32)) -> Self {
        let (fw, fh) = dims;
        let left = (self.left() - pad).max(0.0);
        let top = (self.top() - pad).max(0.0);

        Self::ltwh(
            left,
            top,
            (self.width() + pad * 2.0).min(fw - left).max(0.0),
            (self.height() + pad * 2.0).min(fh - top).max(0.0),
        )
    }
}

impl BBox<Ltrb> {
    #[inline]
    pub fn ltrb(x1: f32, x2: f32, x3: f32, x4: f32) -> Self {
        BBox([x1, x2, x3, x4], PhantomData)
    }

    #[inline]
    pub fn as_ltwh(&self) -> BBox<Ltwh> {
        self.into()
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> f32 {
        self.0[3]
    }

    #[inline]
    pub fn area(&self) -> f32 {
        (self.right() - self.left()).max(0.0) * (self.bottom() - self.top()).max(0.0)
    }

    /// Overlapping area of two boxes, zero when they are disjoint.
    #[inline]
    pub fn intersection(&self, other: &BBox<Ltrb>) -> f32 {
        let iw = self.right().min(other.right()) - self.left().max(other.left());
        let ih = self.bottom().min(other.bottom()) - self.top().max(other.top());

        iw.max(0.0) * ih.max(0.0)
    }
}

impl BBox<Xywh> {
    #[inline]
    pub fn xywh(x1: f32, x2: f32, x3: f32, x4: f32) -> Self {
        BBox([x1, x2, x3, x4], PhantomData)
    }

    #[inline(always)]
    pub fn as_ltwh(&self) -> BBox<Ltwh> {
        self.into()
    }

    #[inline(always)]
    pub fn cx(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn cy(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.0[3]
    }
}

impl<'a> From<&'a BBox<Ltwh>> for BBox<Ltrb> {
    #[inline]
    fn from(v: &'a BBox<Ltwh>) -> Self {
        Self(
            [v.0[0], v.0[1], v.0[2] + v.0[0], v.0[3] + v.0[1]],
            PhantomData,
        )
    }
}

impl<'a> From<&'a BBox<Ltrb>> for BBox<Ltwh> {
    #[inline]
    fn from(v: &'a BBox<Ltrb>) -> Self {
        Self(
            [v.0[0], v.0[1], v.0[2] - v.0[0], v.0[3] - v.0[1]],
            PhantomData,
        )
    }
}

impl<'a> From<&'a BBox<Ltwh>> for BBox<Xywh> {
    #[inline]
    fn from(v: &'a BBox<Ltwh>) -> Self {
        Self(
            [v.0[0] + v.0[2] / 2.0, v.0[1] + v.0[3] / 2.0, v.0[2], v.0[3]],
            PhantomData,
        )
    }
}

impl<'a> From<&'a BBox<Xywh>> for BBox<Ltwh> {
    #[inline]
    fn from(v: &'a BBox<Xywh>) -> Self {
        Self(
            [v.0[0] - v.0[2] / 2.0, v.0[1] - v.0[3] / 2.0, v.0[2], v.0[3]],
            PhantomData,
        )
    }
}

/// Axis-aligned intersection over union, in `[0, 1]`.
///
/// Returns 0 for disjoint boxes and whenever the union area is not positive,
/// so degenerate boxes never match anything. Both areas are taken from the
/// corner extents, which keeps `iou(a, a)` exactly 1.
pub fn intersection_over_union(a: &BBox<Ltwh>, b: &BBox<Ltwh>) -> f32 {
    let a = a.as_ltrb();
    let b = b.as_ltrb();

    let inter = a.intersection(&b);
    let union = a.area() + b.area() - inter;

    if union <= 0.0 {
        return 0.0;
    }

    inter / union
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_iou_identical() {
        let a = BBox::ltwh(0.1, 0.2, 0.3, 0.7);
        assert_eq!(intersection_over_union(&a, &a), 1.0);
    }

    #[test]
    fn test_iou_disjoint_and_touching() {
        let a = BBox::ltwh(0.0, 0.0, 10.0, 10.0);
        let b = BBox::ltwh(20.0, 20.0, 10.0, 10.0);
        let c = BBox::ltwh(10.0, 0.0, 10.0, 10.0);

        assert_eq!(a.iou(&b), 0.0);
        assert_eq!(a.iou(&c), 0.0);
    }

    #[test]
    fn test_iou_partial_overlap() {
        let a = BBox::ltwh(0.0, 0.0, 100.0, 100.0);
        let b = BBox::ltwh(50.0, 0.0, 100.0, 100.0);

        // 5000 / (10000 + 10000 - 5000)
        assert_relative_eq!(a.iou(&b), 1.0 / 3.0, epsilon = 1e-6);
        assert_eq!(a.iou(&b), b.iou(&a));
    }

    #[test]
    fn test_iou_degenerate() {
        let zero = BBox::ltwh(5.0, 5.0, 0.0, 0.0);
        let negative = BBox::ltwh(5.0, 5.0, -4.0, -4.0);
        let a = BBox::ltwh(0.0, 0.0, 10.0, 10.0);

        assert_eq!(zero.iou(&zero), 0.0);
        assert_eq!(negative.iou(&negative), 0.0);
        assert_eq!(a.iou(&negative), 0.0);
        assert_eq!(negative.area(), 0.0);
    }

    #[test]
    fn test_format_conversions() {
        let b = BBox::ltwh(10.0, 20.0, 30.0, 40.0);

        let ltrb = b.as_ltrb();
        assert_eq!(ltrb.as_slice(), &[10.0, 20.0, 40.0, 60.0]);
        assert_eq!(ltrb.as_ltwh(), b);

        let xywh = b.as_xywh();
        assert_eq!((xywh.cx(), xywh.cy()), (25.0, 40.0));
        assert_eq!(xywh.as_ltwh(), b);
        assert_eq!(b.center(), na::Point2::new(25.0, 40.0));
    }

    #[test]
    fn test_expand_within_clamps_to_frame() {
        let b = BBox::ltwh(20.0, 600.0, 100.0, 100.0);
        let roi = b.expand_within(50.0, (1280.0, 720.0));

        assert_eq!(roi.left(), 0.0);
        assert_eq!(roi.top(), 550.0);
        assert_eq!(roi.width(), 200.0);
        assert_eq!(roi.height(), 170.0);
    }

    #[test]
    fn test_expand_within_outside_frame_is_empty() {
        let roi = BBox::ltwh(2000.0, 10.0, 100.0, 100.0).expand_within(50.0, (1280.0, 720.0));

        assert_eq!(roi.left(), 1950.0);
        assert_eq!(roi.width(), 0.0);
        assert_eq!(roi.height(), 200.0);
        assert_eq!(roi.area(), 0.0);

        let below = BBox::ltwh(10.0, 900.0, 100.0, 100.0).expand_within(50.0, (1280.0, 720.0));
        assert_eq!(below.height(), 0.0);
    }

    #[test]
    fn test_scaled() {
        let b = BBox::ltwh(32.0, 18.0, 64.0, 36.0).scaled(4.0, 4.0);
        assert_eq!(b.as_slice(), &[128.0, 72.0, 256.0, 144.0]);
    }
}

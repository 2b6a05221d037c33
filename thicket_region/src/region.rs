// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Region`] value type.

use kurbo::{Insets, Point, Rect, Vec2};

/// A coordinate axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// The horizontal axis.
    X,
    /// The vertical axis.
    Y,
}

/// Axis-aligned rectangle in page coordinates.
///
/// A region is non-degenerate when `right > left` and `bottom > top`. Degenerate
/// (zero-area or inverted) regions are allowed as values; they never intersect
/// anything and report [`is_empty`](Self::is_empty).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// Top edge (minimum y).
    pub top: f64,
    /// Right edge (maximum x).
    pub right: f64,
    /// Bottom edge (maximum y).
    pub bottom: f64,
    /// Left edge (minimum x).
    pub left: f64,
}

impl Region {
    /// The empty region at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a region from its four edges, in CSS order.
    #[inline]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create a region from an origin and a size.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(y, x + width, y + height, x)
    }

    /// A zero-size region located at `p`.
    #[inline]
    pub fn from_point(p: Point) -> Self {
        Self::new(p.y, p.x, p.y, p.x)
    }

    /// Convert from a `kurbo` rectangle.
    #[inline]
    pub fn from_rect(r: Rect) -> Self {
        Self::new(r.y0, r.x1, r.y1, r.x0)
    }

    /// Convert to a `kurbo` rectangle.
    #[inline]
    pub fn to_rect(self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }

    /// Top-left corner.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Width; negative for inverted regions.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height; negative for inverted regions.
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Whether the region has no area (zero-width, zero-height, or inverted).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Whether `other` lies entirely inside `self`. Shared edges count as inside.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    /// Whether `p` lies inside `self`. Points on an edge count as inside.
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// The overlapping area of `self` and `other`.
    ///
    /// Returns `None` when the overlap has no area. This includes regions that
    /// only share an edge or a corner, and any degenerate input.
    ///
    /// ```
    /// use thicket_region::Region;
    ///
    /// let a = Region::from_xywh(0.0, 0.0, 10.0, 10.0);
    /// let b = Region::from_xywh(10.0, 0.0, 10.0, 10.0);
    /// assert!(a.intersect(&b).is_none());
    /// ```
    #[inline]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let r = Self::new(
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
            self.left.max(other.left),
        );
        if r.is_empty() { None } else { Some(r) }
    }

    /// The smallest region enclosing `self` and `other`.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
            self.left.min(other.left),
        )
    }

    /// Move the region by `delta`.
    #[inline]
    pub fn translate_by(&self, delta: Vec2) -> Self {
        Self::new(
            self.top + delta.y,
            self.right + delta.x,
            self.bottom + delta.y,
            self.left + delta.x,
        )
    }

    /// Add a value to each edge, in CSS order.
    #[inline]
    pub fn adjust(&self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self::new(
            self.top + top,
            self.right + right,
            self.bottom + bottom,
            self.left + left,
        )
    }

    /// Grow the region outward by `insets` (`x0` left, `y0` top, `x1` right, `y1` bottom).
    ///
    /// Negative insets shrink the region.
    #[inline]
    pub fn expand(&self, insets: Insets) -> Self {
        Self::new(
            self.top - insets.y0,
            self.right + insets.x1,
            self.bottom + insets.y1,
            self.left - insets.x0,
        )
    }

    /// Clamp the region into `bound`.
    ///
    /// On each axis, a region that fits inside `bound` is moved (keeping its size) so
    /// that it lies inside. A region larger than `bound` on an axis takes the bound's
    /// extent on that axis.
    ///
    /// ```
    /// use thicket_region::Region;
    ///
    /// let bound = Region::from_xywh(0.0, 0.0, 100.0, 100.0);
    /// let r = Region::from_xywh(-20.0, 90.0, 30.0, 30.0).constrain_to(&bound);
    /// assert_eq!(r, Region::from_xywh(0.0, 70.0, 30.0, 30.0));
    /// ```
    pub fn constrain_to(&self, bound: &Self) -> Self {
        let (left, right) = constrain_span(self.left, self.right, bound.left, bound.right);
        let (top, bottom) = constrain_span(self.top, self.bottom, bound.top, bound.bottom);
        Self::new(top, right, bottom, left)
    }

    /// Clamp a point into the region.
    #[inline]
    pub fn constrain_point(&self, p: Point) -> Point {
        Point::new(
            p.x.max(self.left).min(self.right),
            p.y.max(self.top).min(self.bottom),
        )
    }

    /// Whether `p` lies outside the region along `axis`, or along either axis when
    /// `axis` is `None`.
    #[inline]
    pub fn is_out_of_bound(&self, p: Point, axis: Option<Axis>) -> bool {
        match axis {
            Some(Axis::X) => p.x < self.left || p.x > self.right,
            Some(Axis::Y) => p.y < self.top || p.y > self.bottom,
            None => !self.contains_point(p),
        }
    }

    /// The signed distance along `axis` needed to bring `p` back inside the region.
    ///
    /// Zero when the point is within bounds on that axis.
    #[inline]
    pub fn out_of_bound_offset(&self, p: Point, axis: Axis) -> f64 {
        let (v, lo, hi) = match axis {
            Axis::X => (p.x, self.left, self.right),
            Axis::Y => (p.y, self.top, self.bottom),
        };
        if v < lo {
            lo - v
        } else if v > hi {
            hi - v
        } else {
            0.0
        }
    }
}

impl From<Rect> for Region {
    fn from(r: Rect) -> Self {
        Self::from_rect(r)
    }
}

impl From<Region> for Rect {
    fn from(r: Region) -> Self {
        r.to_rect()
    }
}

fn constrain_span(lo: f64, hi: f64, bound_lo: f64, bound_hi: f64) -> (f64, f64) {
    let size = hi - lo;
    if size > bound_hi - bound_lo {
        return (bound_lo, bound_hi);
    }
    if lo < bound_lo {
        (bound_lo, bound_lo + size)
    } else if hi > bound_hi {
        (bound_hi - size, bound_hi)
    } else {
        (lo, hi)
    }
}

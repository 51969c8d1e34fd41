use glam::Vec3A;

use crate::Triangle;

/// Axis aligned box. An empty box holds the `+inf/-inf` sentinel so that the
/// first grow adopts the incoming value as both corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3A,
    pub max: Vec3A,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Things a [`BoundingBox`] can grow to contain
pub trait Grow<T> {
    fn grow(&mut self, value: T);
}

impl Grow<Vec3A> for BoundingBox {
    /// Grow the box to contain a new point
    #[inline]
    fn grow(&mut self, point: Vec3A) {
        self.max = self.max.max(point);
        self.min = self.min.min(point);
    }
}

impl Grow<&Triangle> for BoundingBox {
    /// Uses the cached triangle extremes instead of the three vertices
    #[inline]
    fn grow(&mut self, triangle: &Triangle) {
        self.max = self.max.max(triangle.max());
        self.min = self.min.min(triangle.min());
    }
}

impl Grow<&BoundingBox> for BoundingBox {
    #[inline]
    fn grow(&mut self, other: &BoundingBox) {
        self.max = self.max.max(other.max);
        self.min = self.min.min(other.min);
    }
}

impl BoundingBox {
    pub const EMPTY: Self = Self {
        min: Vec3A::splat(f32::INFINITY),
        max: Vec3A::splat(f32::NEG_INFINITY),
    };

    #[inline]
    pub fn new(min: Vec3A, max: Vec3A) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point of the iterator
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3A>,
    {
        let mut bounds = Self::EMPTY;
        for point in points {
            bounds.grow(point);
        }
        bounds
    }

    /// If the box is valid (min <= max)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    #[inline]
    pub fn extent(&self) -> Vec3A {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec3A {
        (self.min + self.max) * 0.5
    }

    /// Half the surface area. Cheaper than the real thing and ranks boxes the same way.
    #[inline]
    pub fn surface_area_proxy(&self) -> f32 {
        let size = self.extent();
        size.x * size.y + size.x * size.z + size.y * size.z
    }

    /// Split-search cost of holding `triangle_count` triangles in this box.
    #[inline]
    pub fn cost(&self, triangle_count: u32) -> f32 {
        self.surface_area_proxy() * triangle_count as f32
    }

    /// True if `other` lies fully inside this box. An empty box is inside anything.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        if !other.is_valid() {
            return true;
        }
        self.min.cmple(other.min).all() && other.max.cmple(self.max).all()
    }
}

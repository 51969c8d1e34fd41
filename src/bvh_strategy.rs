use strum::IntoEnumIterator;

use crate::{Axis, BoundingBox, Grow, Triangle};

/// Plane orthogonal to `axis` at `position`. Triangles whose centroid lies
/// strictly below it go to the low side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPlane {
    pub axis: Axis,
    pub position: f32,
}

impl SplitPlane {
    #[inline]
    pub fn is_low(&self, triangle: &Triangle) -> bool {
        triangle.centroid()[self.axis] < self.position
    }

    /// Bounds and counts of both sides, without moving anything
    pub fn classify(&self, triangles: &[Triangle]) -> (SplitGroup, SplitGroup) {
        let mut low = SplitGroup::default();
        let mut high = SplitGroup::default();

        for triangle in triangles {
            if self.is_low(triangle) {
                low.add(triangle);
            } else {
                high.add(triangle);
            }
        }

        (low, high)
    }
}

/// One side of a candidate split
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SplitGroup {
    pub bounds: BoundingBox,
    pub count: u32,
}

impl SplitGroup {
    #[inline]
    fn add(&mut self, triangle: &Triangle) {
        self.bounds.grow(triangle);
        self.count += 1;
    }

    #[inline]
    pub fn cost(&self) -> f32 {
        self.bounds.cost(self.count)
    }
}

/// A split plane that leaves triangles on both sides
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCandidate {
    pub plane: SplitPlane,
    pub cost: f32,
    pub low: SplitGroup,
    pub high: SplitGroup,
}

pub trait SplitPlaneStrategy {
    /// Best split for the triangles of a node, or `None` when every plane
    /// tried leaves one side empty.
    fn find_split(bounds: &BoundingBox, triangles: &[Triangle]) -> Option<SplitCandidate>;
}

/// Tries `CANDIDATES` evenly spaced planes per axis inside the node bounds
/// (`t = 1/(CANDIDATES+1) .. CANDIDATES/(CANDIDATES+1)`) and keeps the one
/// with the lowest summed cost. The default of 9 gives `t = 0.1 .. 0.9`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridCostStrategy<const CANDIDATES: usize = 9> {}

impl<const CANDIDATES: usize> SplitPlaneStrategy for GridCostStrategy<CANDIDATES> {
    fn find_split(bounds: &BoundingBox, triangles: &[Triangle]) -> Option<SplitCandidate> {
        let mut best: Option<SplitCandidate> = None;

        for axis in Axis::iter() {
            let bounds_min = bounds.min[axis];
            let bounds_extent = bounds.max[axis] - bounds_min;

            for i in 0..CANDIDATES {
                let t = (i + 1) as f32 / (CANDIDATES + 1) as f32;
                let plane = SplitPlane {
                    axis,
                    position: bounds_min + t * bounds_extent,
                };

                let (low, high) = plane.classify(triangles);
                if low.count == 0 || high.count == 0 {
                    continue;
                }

                let cost = low.cost() + high.cost();
                if best.map_or(true, |best| cost < best.cost) {
                    best = Some(SplitCandidate {
                        plane,
                        cost,
                        low,
                        high,
                    });
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use approx::*;
    use glam::Vec3A;

    use crate::*;

    fn offset_triangle(offset: Vec3A) -> Triangle {
        Triangle::from_positions(offset, offset + Vec3A::X, offset + Vec3A::Y)
    }

    fn bounds_of(triangles: &[Triangle]) -> BoundingBox {
        let mut bounds = BoundingBox::default();
        triangles.iter().for_each(|tri| bounds.grow(tri));
        bounds
    }

    #[test]
    fn single_triangle_has_no_split() {
        let triangles = [offset_triangle(Vec3A::ZERO)];
        let split = GridCostStrategy::<9>::find_split(&bounds_of(&triangles), &triangles);
        assert!(split.is_none());
    }

    #[test]
    fn coincident_centroids_have_no_split() {
        let triangles: Vec<Triangle> = (0..8).map(|_| offset_triangle(Vec3A::ZERO)).collect();
        let split = GridCostStrategy::<9>::find_split(&bounds_of(&triangles), &triangles);
        assert!(split.is_none());
    }

    #[test]
    fn separates_distant_triangles_along_x() {
        let triangles = [
            offset_triangle(Vec3A::ZERO),
            offset_triangle(Vec3A::new(10.0, 0.0, 0.0)),
        ];
        let bounds = bounds_of(&triangles);

        let split = GridCostStrategy::<9>::find_split(&bounds, &triangles).unwrap();

        assert_eq!(split.plane.axis, Axis::X);
        assert_eq!(split.low.count, 1);
        assert_eq!(split.high.count, 1);
        assert_eq!(split.low.bounds, bounds_of(&triangles[..1]));
        assert_eq!(split.high.bounds, bounds_of(&triangles[1..]));
        assert_relative_eq!(split.cost, split.low.cost() + split.high.cost());
    }

    #[test]
    fn planes_sit_inside_node_bounds() {
        let triangles: Vec<Triangle> = (0..16)
            .map(|i| offset_triangle(Vec3A::new(i as f32, (i % 3) as f32, 0.0)))
            .collect();
        let bounds = bounds_of(&triangles);

        let split = GridCostStrategy::<9>::find_split(&bounds, &triangles).unwrap();
        let axis = split.plane.axis;

        assert!(split.plane.position > bounds.min[axis]);
        assert!(split.plane.position < bounds.max[axis]);
        assert_eq!(split.low.count + split.high.count, 16);
    }

    #[test]
    fn keeps_lowest_cost_over_all_candidates() {
        let triangles: Vec<Triangle> = (0..12)
            .map(|i| offset_triangle(Vec3A::new((i * i) as f32, i as f32 * 0.5, (i % 4) as f32)))
            .collect();
        let bounds = bounds_of(&triangles);

        let split = GridCostStrategy::<9>::find_split(&bounds, &triangles).unwrap();

        for axis in [Axis::X, Axis::Y, Axis::Z] {
            for i in 1..10 {
                let plane = SplitPlane {
                    axis,
                    position: bounds.min[axis]
                        + (i as f32 / 10.0) * (bounds.max[axis] - bounds.min[axis]),
                };
                let (low, high) = plane.classify(&triangles);
                if low.count == 0 || high.count == 0 {
                    continue;
                }
                assert!(split.cost <= low.cost() + high.cost() + f32::EPSILON);
            }
        }
    }
}

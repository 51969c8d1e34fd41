use glam::{Vec2, Vec3A};

/// World space triangle with per-vertex normals and optional UVs.
///
/// `min`, `max`, `centroid` and `face_normal` are computed once on construction
/// and cached, since the split search reads them for every candidate plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub pos_a: Vec3A,
    pub pos_b: Vec3A,
    pub pos_c: Vec3A,
    pub normal_a: Vec3A,
    pub normal_b: Vec3A,
    pub normal_c: Vec3A,
    pub uvs: Option<[Vec2; 3]>,
    min: Vec3A,
    max: Vec3A,
    centroid: Vec3A,
    face_normal: Vec3A,
}

impl Triangle {
    /// Zeroed Triangle
    pub const ZERO: Self = Triangle {
        pos_a: Vec3A::ZERO,
        pos_b: Vec3A::ZERO,
        pos_c: Vec3A::ZERO,
        normal_a: Vec3A::ZERO,
        normal_b: Vec3A::ZERO,
        normal_c: Vec3A::ZERO,
        uvs: None,
        min: Vec3A::ZERO,
        max: Vec3A::ZERO,
        centroid: Vec3A::ZERO,
        face_normal: Vec3A::ZERO,
    };

    #[inline]
    pub fn new(positions: [Vec3A; 3], normals: [Vec3A; 3], uvs: Option<[Vec2; 3]>) -> Triangle {
        let [pos_a, pos_b, pos_c] = positions;
        let [normal_a, normal_b, normal_c] = normals;
        let mut tri = Triangle {
            pos_a,
            pos_b,
            pos_c,
            normal_a,
            normal_b,
            normal_c,
            uvs,
            ..Self::ZERO
        };
        tri.recalculate();
        tri
    }

    /// Triangle whose vertex normals all equal the face normal
    pub fn from_positions(pos_a: Vec3A, pos_b: Vec3A, pos_c: Vec3A) -> Triangle {
        let mut tri = Triangle::new([pos_a, pos_b, pos_c], [Vec3A::ZERO; 3], None);
        tri.normal_a = tri.face_normal;
        tri.normal_b = tri.face_normal;
        tri.normal_c = tri.face_normal;
        tri
    }

    /// Refresh the cached values after the positions were edited
    #[inline]
    pub fn recalculate(&mut self) {
        self.min = self.pos_a.min(self.pos_b).min(self.pos_c);
        self.max = self.pos_a.max(self.pos_b).max(self.pos_c);
        self.centroid = (self.pos_a + self.pos_b + self.pos_c) / 3.0;
        self.face_normal = (self.pos_b - self.pos_a)
            .cross(self.pos_c - self.pos_a)
            .normalize_or_zero();
    }

    #[inline]
    pub fn min(&self) -> Vec3A {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Vec3A {
        self.max
    }

    #[inline]
    pub fn centroid(&self) -> Vec3A {
        self.centroid
    }

    /// Zero for degenerate triangles
    #[inline]
    pub fn face_normal(&self) -> Vec3A {
        self.face_normal
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
impl rand::distributions::Distribution<Triangle> for rand::distributions::Standard {
    #[inline]
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Triangle {
        Triangle::from_positions(rng.gen(), rng.gen(), rng.gen())
    }
}

#[cfg(test)]
mod tests {
    use crate::Triangle;

    use glam::{Vec2, Vec3A};
    use rand::{thread_rng, Rng};

    use approx::*;

    #[test]
    fn compute_centroid() {
        let mut rng = thread_rng();
        let tri: Triangle = rng.gen();
        assert_relative_eq!(tri.centroid(), (tri.pos_a + tri.pos_b + tri.pos_c) / 3.0);
    }

    #[test]
    fn compute_extremes() {
        let tri = Triangle::from_positions(
            Vec3A::new(1.0, -1.0, 0.0),
            Vec3A::new(-2.0, 3.0, 0.5),
            Vec3A::new(0.0, 0.0, -4.0),
        );
        assert_eq!(tri.min(), Vec3A::new(-2.0, -1.0, -4.0));
        assert_eq!(tri.max(), Vec3A::new(1.0, 3.0, 0.5));
    }

    #[test]
    fn face_normal_follows_winding() {
        let tri = Triangle::from_positions(Vec3A::ZERO, Vec3A::X, Vec3A::Y);
        assert_relative_eq!(tri.face_normal(), Vec3A::Z);
        assert_relative_eq!(tri.normal_b, Vec3A::Z);

        let flipped = Triangle::from_positions(Vec3A::ZERO, Vec3A::Y, Vec3A::X);
        assert_relative_eq!(flipped.face_normal(), -Vec3A::Z);
    }

    #[test]
    fn degenerate_triangle_has_zero_normal() {
        let tri = Triangle::from_positions(Vec3A::ONE, Vec3A::ONE, Vec3A::ONE);
        assert_eq!(tri.face_normal(), Vec3A::ZERO);
        assert_eq!(tri.min(), tri.max());
    }

    #[test]
    fn keeps_uvs_and_normals() {
        let uvs = [Vec2::ZERO, Vec2::X, Vec2::Y];
        let tri = Triangle::new(
            [Vec3A::ZERO, Vec3A::X, Vec3A::Y],
            [Vec3A::Z, Vec3A::Z, -Vec3A::Z],
            Some(uvs),
        );
        assert_eq!(tri.uvs, Some(uvs));
        assert_eq!(tri.normal_c, -Vec3A::Z);
    }

    #[test]
    fn recalculate_after_edit() {
        let mut tri = Triangle::from_positions(Vec3A::ZERO, Vec3A::X, Vec3A::Y);
        tri.pos_c = Vec3A::new(0.0, 9.0, 0.0);
        tri.recalculate();
        assert_eq!(tri.max().y, 9.0);
        assert_relative_eq!(tri.centroid().y, 3.0);
    }
}

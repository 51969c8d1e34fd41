use std::ops::{Index, IndexMut};

use glam::Vec3A;
use strum::{Display, EnumIter};

/// Coordinate axis a split plane is orthogonal to. Iteration order is the
/// order split candidates are tried in.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Axis along which `extent` is largest, X winning ties
    pub fn longest(extent: Vec3A) -> Self {
        if extent.x >= extent.y && extent.x >= extent.z {
            Axis::X
        } else if extent.y >= extent.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

impl Index<Axis> for Vec3A {
    type Output = f32;

    #[inline]
    fn index(&self, axis: Axis) -> &f32 {
        &self[axis.slot()]
    }
}

impl IndexMut<Axis> for Vec3A {
    #[inline]
    fn index_mut(&mut self, axis: Axis) -> &mut f32 {
        &mut self[axis.slot()]
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3A;
    use strum::IntoEnumIterator;

    use crate::Axis;

    #[test]
    fn axis_order_is_xyz() {
        let axes: Vec<Axis> = Axis::iter().collect();
        assert_eq!(axes, vec![Axis::X, Axis::Y, Axis::Z]);
    }

    #[test]
    fn index_by_axis() {
        let mut v = Vec3A::new(1.0, 2.0, 3.0);
        assert_eq!(v[Axis::X], 1.0);
        assert_eq!(v[Axis::Y], 2.0);
        assert_eq!(v[Axis::Z], 3.0);

        v[Axis::Y] = 5.0;
        assert_eq!(v.y, 5.0);
    }

    #[test]
    fn longest_axis() {
        assert_eq!(Axis::longest(Vec3A::new(3.0, 1.0, 2.0)), Axis::X);
        assert_eq!(Axis::longest(Vec3A::new(1.0, 3.0, 2.0)), Axis::Y);
        assert_eq!(Axis::longest(Vec3A::new(1.0, 2.0, 3.0)), Axis::Z);
        assert_eq!(Axis::longest(Vec3A::ZERO), Axis::X);
    }

    #[test]
    fn axis_names() {
        assert_eq!(Axis::X.to_string(), "x");
        assert_eq!(Axis::Z.to_string(), "z");
    }
}

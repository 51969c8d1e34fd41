//! Per-object geometry as handed over by the scene enumeration.

use glam::{Affine3A, Vec2, Vec3, Vec3A};

use crate::{BvhError, Triangle};

/// Indexed triangle mesh. Positions and normals are expected in world space
/// by the time the hierarchy is built; see [`MeshData::transformed`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    /// Every 3 indices form a triangle
    pub indices: Vec<u32>,
    /// One per position
    pub normals: Vec<Vec3>,
    /// One per position when present
    pub uvs: Option<Vec<Vec2>>,
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, normals: Vec<Vec3>) -> Self {
        Self {
            positions,
            indices,
            normals,
            uvs: None,
        }
    }

    pub fn with_uvs(mut self, uvs: Vec<Vec2>) -> Self {
        self.uvs = Some(uvs);
        self
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Copy of this mesh moved into world space. Points go through the whole
    /// transform, normals only through its rotation.
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        let (_, rotation, _) = transform.to_scale_rotation_translation();
        Self {
            positions: self
                .positions
                .iter()
                .map(|p| transform.transform_point3(*p))
                .collect(),
            indices: self.indices.clone(),
            normals: self.normals.iter().map(|n| rotation * *n).collect(),
            uvs: self.uvs.clone(),
        }
    }

    /// Check the buffers against each other without building anything
    pub fn validate(&self) -> Result<(), BvhError> {
        if self.indices.len() % 3 != 0 {
            return Err(BvhError::IndexCount(self.indices.len()));
        }

        let vertex_count = self.positions.len();
        if self.normals.len() != vertex_count {
            return Err(BvhError::NormalCount {
                positions: vertex_count,
                normals: self.normals.len(),
            });
        }

        if let Some(uvs) = &self.uvs {
            if uvs.len() != vertex_count {
                return Err(BvhError::UvCount {
                    positions: vertex_count,
                    uvs: uvs.len(),
                });
            }
        }

        if let Some((i, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, &index)| index as usize >= vertex_count)
        {
            return Err(BvhError::IndexOutOfRange {
                triangle: i / 3,
                index,
                vertex_count,
            });
        }

        if self.triangle_count() > u32::MAX as usize {
            return Err(BvhError::TooManyTriangles(self.triangle_count()));
        }

        Ok(())
    }

    /// Expand the index buffer into self-contained triangles
    pub fn triangles(&self) -> Result<Vec<Triangle>, BvhError> {
        self.validate()?;

        let triangles = self
            .indices
            .chunks_exact(3)
            .map(|corners| {
                let [a, b, c] = [
                    corners[0] as usize,
                    corners[1] as usize,
                    corners[2] as usize,
                ];
                let uvs = self
                    .uvs
                    .as_ref()
                    .map(|uvs| [uvs[a], uvs[b], uvs[c]]);
                Triangle::new(
                    [
                        Vec3A::from(self.positions[a]),
                        Vec3A::from(self.positions[b]),
                        Vec3A::from(self.positions[c]),
                    ],
                    [
                        Vec3A::from(self.normals[a]),
                        Vec3A::from(self.normals[b]),
                        Vec3A::from(self.normals[c]),
                    ],
                    uvs,
                )
            })
            .collect();

        Ok(triangles)
    }
}

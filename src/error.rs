use thiserror::Error;

/// Errors raised while validating meshes or assembling scene buffers.
#[derive(Debug, Error)]
pub enum BvhError {
    #[error("index buffer length {0} is not a multiple of 3")]
    IndexCount(usize),

    #[error("triangle {triangle} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("mesh has {positions} positions but {normals} normals")]
    NormalCount { positions: usize, normals: usize },

    #[error("mesh has {positions} positions but {uvs} uv coordinates")]
    UvCount { positions: usize, uvs: usize },

    #[error("{0} triangles do not fit 32-bit triangle indices")]
    TooManyTriangles(usize),

    #[error("object {object}: {source}")]
    InvalidObject {
        object: usize,
        #[source]
        source: Box<BvhError>,
    },

    #[error("scene buffers exceed the 32-bit index range")]
    BufferOverflow,

    #[error("invalid build config: {0}")]
    Config(#[from] serde_json::Error),
}

impl BvhError {
    /// Tag a per-object failure with the object's position in the scene
    pub fn in_object(self, object: usize) -> Self {
        BvhError::InvalidObject {
            object,
            source: Box::new(self),
        }
    }
}

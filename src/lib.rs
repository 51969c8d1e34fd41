//! Bounding-volume hierarchies over triangle meshes, flattened into
//! index-addressed buffers for a GPU traversal kernel.
//!
//! Each mesh gets its own [`MeshBvh`], built with a cost-driven split search
//! that reorders the mesh's triangles in place. [`SceneAggregator`] then
//! concatenates the per-mesh node and triangle arrays into one forest,
//! rebasing child and triangle indices, and emits a descriptor per object.

pub mod error;
pub use error::*;

pub mod config;
pub use config::*;

pub mod axis;
pub use axis::*;

pub mod triangle;
pub use triangle::*;

pub mod aabb;
pub use aabb::*;

pub mod mesh;
pub use mesh::MeshData;

pub mod bvh_strategy;
pub use bvh_strategy::*;

pub mod bvh;
pub use bvh::*;

pub mod gpu;
pub use gpu::*;

pub mod material;
pub use material::*;

pub mod scene;
pub use scene::*;

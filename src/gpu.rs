//! Fixed-layout records read by the traversal kernel.
//!
//! All records are `#[repr(C)]` with 4-byte aligned fields only, so their
//! stride is the plain sum of the field sizes (no std140/std430 padding).
//! A shader reading them must declare matching packed structs.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::{BvhNode, Triangle};

/// Node of the flattened forest
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct GpuNode {
    pub min: Vec3,
    pub max: Vec3,
    /// 0 for leaves, otherwise the global index of the first child
    pub child_index: u32,
    pub triangle_start: u32,
    pub triangle_count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct GpuTriangle {
    pub pos_a: Vec3,
    pub pos_b: Vec3,
    pub pos_c: Vec3,
    pub normal_a: Vec3,
    pub normal_b: Vec3,
    pub normal_c: Vec3,
    pub uv_a: Vec2,
    pub uv_b: Vec2,
    pub uv_c: Vec2,
}

/// Surface description of one object. Colors are linear RGBA.
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct GpuMaterial {
    pub color: [f32; 4],
    pub emission_color: [f32; 4],
    pub emission_strength: f32,
    pub smoothness: f32,
    pub specular_probability: f32,
    pub specular_color: [f32; 4],
    pub opacity: f32,
    /// Texture layer of the diffuse map, -1 when untextured
    pub diffuse_index: i32,
}

/// Per-object descriptor of the flattened forest
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct GpuObject {
    pub triangle_count: u32,
    pub first_triangle: u32,
    /// Global index of the object's root node
    pub nodes_start: u32,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
    pub material: GpuMaterial,
}

pub const GPU_NODE_STRIDE: usize = 36;
pub const GPU_TRIANGLE_STRIDE: usize = 96;
pub const GPU_MATERIAL_STRIDE: usize = 68;
pub const GPU_OBJECT_STRIDE: usize = 104;

const _: () = assert!(std::mem::size_of::<GpuNode>() == GPU_NODE_STRIDE);
const _: () = assert!(std::mem::size_of::<GpuTriangle>() == GPU_TRIANGLE_STRIDE);
const _: () = assert!(std::mem::size_of::<GpuMaterial>() == GPU_MATERIAL_STRIDE);
const _: () = assert!(std::mem::size_of::<GpuObject>() == GPU_OBJECT_STRIDE);

impl GpuNode {
    /// Copy of a local node moved by the offsets of its object
    #[inline]
    pub fn rebased(node: &BvhNode, node_offset: u32, triangle_offset: u32) -> Self {
        Self {
            min: node.bounds.min.into(),
            max: node.bounds.max.into(),
            child_index: if node.is_leaf() {
                0
            } else {
                node.child_index + node_offset
            },
            triangle_start: node.triangle_start + triangle_offset,
            triangle_count: node.triangle_count,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.child_index == 0
    }
}

impl From<&Triangle> for GpuTriangle {
    fn from(tri: &Triangle) -> Self {
        let [uv_a, uv_b, uv_c] = tri.uvs.unwrap_or([Vec2::ZERO; 3]);
        Self {
            pos_a: tri.pos_a.into(),
            pos_b: tri.pos_b.into(),
            pos_c: tri.pos_c.into(),
            normal_a: tri.normal_a.into(),
            normal_b: tri.normal_b.into(),
            normal_c: tri.normal_c.into(),
            uv_a,
            uv_b,
            uv_c,
        }
    }
}

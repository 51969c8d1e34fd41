use std::collections::HashMap;

use glam::Vec4;

use crate::GpuMaterial;

/// Identity of a diffuse texture as known to the texture-packing side
pub type TextureKey = u64;

/// Material values extracted for one object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDesc {
    pub color: Vec4,
    pub emission_color: Vec4,
    pub emission_strength: f32,
    pub smoothness: f32,
    pub specular_probability: f32,
    pub specular_color: Vec4,
    pub opacity: f32,
    pub diffuse_texture: Option<TextureKey>,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            emission_color: Vec4::ZERO,
            emission_strength: 0.0,
            smoothness: 0.0,
            specular_probability: 0.0,
            specular_color: Vec4::ONE,
            opacity: 0.0,
            diffuse_texture: None,
        }
    }
}

/// Texture layer assignment for one aggregation pass.
///
/// Each distinct [`TextureKey`] gets the next free layer the first time it is
/// seen; later objects sharing the texture reuse that layer.
#[derive(Debug, Clone, Default)]
pub struct MaterialCache {
    layers: HashMap<TextureKey, i32>,
    textures: Vec<TextureKey>,
}

impl MaterialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer of `key`, assigning a new one on first use
    pub fn texture_layer(&mut self, key: TextureKey) -> i32 {
        if let Some(&layer) = self.layers.get(&key) {
            return layer;
        }

        let layer = self.textures.len() as i32;
        self.layers.insert(key, layer);
        self.textures.push(key);
        log::trace!("texture {:#x} assigned layer {}", key, layer);
        layer
    }

    pub fn resolve(&mut self, material: &MaterialDesc) -> GpuMaterial {
        let diffuse_index = material
            .diffuse_texture
            .map_or(-1, |key| self.texture_layer(key));

        GpuMaterial {
            color: material.color.to_array(),
            emission_color: material.emission_color.to_array(),
            emission_strength: material.emission_strength,
            smoothness: material.smoothness,
            specular_probability: material.specular_probability,
            specular_color: material.specular_color.to_array(),
            opacity: material.opacity,
            diffuse_index,
        }
    }

    /// Texture keys in layer order
    pub fn textures(&self) -> &[TextureKey] {
        &self.textures
    }

    pub fn into_textures(self) -> Vec<TextureKey> {
        self.textures
    }
}

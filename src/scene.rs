//! Merging per-object hierarchies into one forest for upload.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use rayon::prelude::*;

use crate::{
    BuildConfig, BvhError, GpuNode, GpuObject, GpuTriangle, MaterialCache, MaterialDesc,
    MeshBvh, MeshData, SplitPlaneStrategy, TextureKey,
};

/// One renderable object as delivered by the scene enumeration
#[derive(Debug, Clone, Default)]
pub struct SceneObject {
    pub mesh: MeshData,
    pub material: MaterialDesc,
}

/// Global buffers of one scene build. Object `i` owns the nodes starting at
/// `objects[i].nodes_start` and the triangles
/// `first_triangle .. first_triangle + triangle_count`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatScene {
    pub nodes: Vec<GpuNode>,
    pub triangles: Vec<GpuTriangle>,
    pub objects: Vec<GpuObject>,
    /// Diffuse textures in layer order
    pub textures: Vec<TextureKey>,
}

impl FlatScene {
    pub fn node_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    pub fn triangle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    pub fn object_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.objects)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Concatenates built hierarchies in push order, rebasing their indices.
#[derive(Debug, Default)]
pub struct SceneAggregator {
    nodes: Vec<GpuNode>,
    triangles: Vec<GpuTriangle>,
    objects: Vec<GpuObject>,
    node_offset: u32,
    triangle_offset: u32,
    materials: MaterialCache,
}

impl SceneAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one object, returning its index in the descriptor array
    pub fn push<Strat>(
        &mut self,
        bvh: MeshBvh<Strat>,
        material: &MaterialDesc,
    ) -> Result<u32, BvhError>
    where
        Strat: SplitPlaneStrategy,
    {
        let bounds = bvh.bounds();
        let (nodes, triangles) = bvh.into_parts();

        let node_count = u32::try_from(nodes.len()).map_err(|_| BvhError::BufferOverflow)?;
        let triangle_count =
            u32::try_from(triangles.len()).map_err(|_| BvhError::BufferOverflow)?;
        let object_index =
            u32::try_from(self.objects.len()).map_err(|_| BvhError::BufferOverflow)?;

        let next_node_offset = self
            .node_offset
            .checked_add(node_count)
            .ok_or(BvhError::BufferOverflow)?;
        let next_triangle_offset = self
            .triangle_offset
            .checked_add(triangle_count)
            .ok_or(BvhError::BufferOverflow)?;

        self.objects.push(GpuObject {
            triangle_count,
            first_triangle: self.triangle_offset,
            nodes_start: self.node_offset,
            bounds_min: bounds.min.into(),
            bounds_max: bounds.max.into(),
            material: self.materials.resolve(material),
        });

        self.nodes.extend(
            nodes
                .iter()
                .map(|node| GpuNode::rebased(node, self.node_offset, self.triangle_offset)),
        );
        self.triangles
            .extend(triangles.iter().map(GpuTriangle::from));

        self.node_offset = next_node_offset;
        self.triangle_offset = next_triangle_offset;

        Ok(object_index)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn finish(self) -> FlatScene {
        FlatScene {
            nodes: self.nodes,
            triangles: self.triangles,
            objects: self.objects,
            textures: self.materials.into_textures(),
        }
    }
}

/// Build every object's hierarchy, then flatten them in input order.
///
/// Objects are validated and built independently (on the rayon pool when
/// `config.parallel` is set); the first invalid object aborts the whole pass.
pub fn build_scene(objects: &[SceneObject], config: &BuildConfig) -> Result<FlatScene, BvhError> {
    let start_time = Instant::now();

    let build_one = |(i, object): (usize, &SceneObject)| {
        MeshBvh::from_mesh(&object.mesh, config).map_err(|err| err.in_object(i))
    };

    let bvhs: Vec<MeshBvh> = if config.parallel {
        objects.par_iter().enumerate().map(build_one).collect::<Result<_, _>>()?
    } else {
        objects.iter().enumerate().map(build_one).collect::<Result<_, _>>()?
    };

    let mut aggregator = SceneAggregator::new();
    for (bvh, object) in bvhs.into_iter().zip(objects) {
        aggregator.push(bvh, &object.material)?;
    }
    let scene = aggregator.finish();

    log::info!(
        "built scene: {} objects, {} nodes, {} triangles, {} textures in {:?}",
        scene.objects.len(),
        scene.nodes.len(),
        scene.triangles.len(),
        scene.textures.len(),
        start_time.elapsed()
    );

    Ok(scene)
}

/// Latest published scene. Readers hold on to a snapshot while the next
/// build runs; the swap happens only once that build has fully succeeded.
#[derive(Debug, Clone, Default)]
pub struct SharedScene {
    current: Arc<RwLock<Arc<FlatScene>>>,
}

impl SharedScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<FlatScene> {
        self.current.read().clone()
    }

    /// Swap in `scene`, returning the one it replaces
    pub fn publish(&self, scene: FlatScene) -> Arc<FlatScene> {
        self.swap(Arc::new(scene))
    }

    /// Build a new scene and publish it, returning the scene this call built.
    /// On error the current scene stays.
    pub fn rebuild(
        &self,
        objects: &[SceneObject],
        config: &BuildConfig,
    ) -> Result<Arc<FlatScene>, BvhError> {
        let scene = Arc::new(build_scene(objects, config)?);
        self.swap(scene.clone());
        Ok(scene)
    }

    fn swap(&self, scene: Arc<FlatScene>) -> Arc<FlatScene> {
        std::mem::replace(&mut *self.current.write(), scene)
    }
}

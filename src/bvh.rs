use std::marker::PhantomData;
use std::time::{Duration, Instant};

use crate::{
    Axis, BoundingBox, BuildConfig, BvhError, GridCostStrategy, Grow, MeshData, SplitCandidate,
    SplitPlaneStrategy, Triangle,
};

/// Node of a per-mesh hierarchy.
///
/// `child_index == 0` marks a leaf: the root always sits at slot 0 and is
/// never anyone's child. Children of an inner node occupy `child_index` and
/// `child_index + 1`. An inner node keeps the triangle range it was split from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BvhNode {
    pub bounds: BoundingBox,
    pub child_index: u32,
    pub triangle_start: u32,
    pub triangle_count: u32,
}

impl BvhNode {
    #[inline]
    pub fn leaf(bounds: BoundingBox, triangle_start: u32, triangle_count: u32) -> Self {
        Self {
            bounds,
            child_index: 0,
            triangle_start,
            triangle_count,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.child_index == 0
    }

    #[inline]
    pub fn left_child(&self) -> u32 {
        assert!(!self.is_leaf());
        self.child_index
    }

    #[inline]
    pub fn right_child(&self) -> u32 {
        self.left_child() + 1
    }

    /// Range of the reordered triangle array covered by this node
    #[inline]
    pub fn triangle_range(&self) -> std::ops::Range<usize> {
        let start = self.triangle_start as usize;
        start..start + self.triangle_count as usize
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BuildStats {
    pub node_count: usize,
    pub leaf_count: usize,
    pub max_leaf_triangles: u32,
    /// Depth of the deepest node, root is 0
    pub max_depth_reached: u32,
    pub build_time: Duration,
}

/// Hierarchy over one mesh. Owns the triangles, reordered so that every leaf
/// addresses a contiguous `triangle_start .. triangle_start + triangle_count`.
#[derive(Debug, Clone)]
pub struct MeshBvh<Strat = GridCostStrategy>
where
    Strat: SplitPlaneStrategy,
{
    nodes: Vec<BvhNode>,
    triangles: Vec<Triangle>,
    max_depth: u32,
    stats: BuildStats,
    strategy: PhantomData<Strat>,
}

impl MeshBvh {
    /// Validate the mesh, then build with the grid cost search
    pub fn from_mesh(mesh: &MeshData, config: &BuildConfig) -> Result<Self, BvhError> {
        let triangles = mesh.triangles()?;
        Self::build(triangles, config.max_depth)
    }
}

impl<Strat> MeshBvh<Strat>
where
    Strat: SplitPlaneStrategy,
{
    pub fn build(triangles: Vec<Triangle>, max_depth: u32) -> Result<Self, BvhError> {
        let tri_count = u32::try_from(triangles.len())
            .map_err(|_| BvhError::TooManyTriangles(triangles.len()))?;

        let start_time = Instant::now();

        let mut bounds = BoundingBox::default();
        triangles.iter().for_each(|tri| bounds.grow(tri));

        let mut bvh = Self {
            // a binary tree with one triangle per leaf never needs more
            nodes: Vec::with_capacity((2 * triangles.len()).max(1)),
            triangles,
            max_depth,
            stats: BuildStats::default(),
            strategy: PhantomData,
        };

        bvh.nodes.push(BvhNode::leaf(bounds, 0, tri_count));
        bvh.split(0, 0);

        bvh.stats = bvh.collect_stats(start_time.elapsed());
        log::debug!(
            "built bvh: {} triangles, {} nodes, {} leaves, depth {}, largest leaf {} in {:?}",
            tri_count,
            bvh.stats.node_count,
            bvh.stats.leaf_count,
            bvh.stats.max_depth_reached,
            bvh.stats.max_leaf_triangles,
            bvh.stats.build_time
        );

        Ok(bvh)
    }

    fn split(&mut self, node_id: u32, depth: u32) {
        if depth > self.max_depth {
            return;
        }

        let node = self.nodes[node_id as usize];
        let range = node.triangle_range();

        let Some(SplitCandidate {
            plane, low, high, ..
        }) = Strat::find_split(&node.bounds, &self.triangles[range.clone()])
        else {
            if node.triangle_count > 1 {
                log::trace!(
                    "no valid split for node {} holding {} triangles at depth {}, widest along {}",
                    node_id,
                    node.triangle_count,
                    depth,
                    Axis::longest(node.bounds.extent())
                );
            }
            return;
        };

        // Partition in place, low side first
        let triangles = &mut self.triangles[range];
        let mut i = 0;
        let mut j = triangles.len();
        while i < j {
            if plane.is_low(&triangles[i]) {
                i += 1;
            } else {
                j -= 1;
                triangles.swap(i, j);
            }
        }

        debug_assert_eq!(i as u32, low.count, "partition disagrees with the split search");
        log::trace!(
            "split node {} on {} at {}: {} | {} triangles",
            node_id,
            plane.axis,
            plane.position,
            low.count,
            high.count
        );

        let left_child_id = self.nodes.len() as u32;
        self.nodes[node_id as usize].child_index = left_child_id;

        self.nodes.push(BvhNode::leaf(
            low.bounds,
            node.triangle_start,
            low.count,
        ));
        self.nodes.push(BvhNode::leaf(
            high.bounds,
            node.triangle_start + low.count,
            high.count,
        ));

        self.split(left_child_id, depth + 1);
        self.split(left_child_id + 1, depth + 1);
    }

    fn collect_stats(&self, build_time: Duration) -> BuildStats {
        let mut stats = BuildStats {
            node_count: self.nodes.len(),
            build_time,
            ..Default::default()
        };

        let mut stack = vec![(0_u32, 0_u32)];
        while let Some((node_id, depth)) = stack.pop() {
            let node = &self.nodes[node_id as usize];
            stats.max_depth_reached = stats.max_depth_reached.max(depth);
            if node.is_leaf() {
                stats.leaf_count += 1;
                stats.max_leaf_triangles = stats.max_leaf_triangles.max(node.triangle_count);
            } else {
                stack.push((node.left_child(), depth + 1));
                stack.push((node.right_child(), depth + 1));
            }
        }

        stats
    }

    #[inline]
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// Triangles in leaf order
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[inline]
    pub fn bounds(&self) -> BoundingBox {
        self.nodes[0].bounds
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline]
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Give up the node and triangle arrays
    pub fn into_parts(self) -> (Vec<BvhNode>, Vec<Triangle>) {
        (self.nodes, self.triangles)
    }
}

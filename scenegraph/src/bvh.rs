use maths::Vec3;

use crate::bounds::Aabb;

/// Flattened BVH record as produced by an external builder.
///
/// Children set to `u32::MAX` mark a leaf, whose primitives are
/// `primitive_indices[first_primitive..first_primitive + primitive_count]`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BvhNode {
    pub bounds_min: [f32; 4],
    pub bounds_max: [f32; 4],
    pub left_child: u32,
    pub right_child: u32,
    pub first_primitive: u32,
    pub primitive_count: u32,
}

impl BvhNode {
    pub fn new_leaf(bounds: Aabb, first_primitive: u32, primitive_count: u32) -> Self {
        Self {
            bounds_min: padded(bounds.min),
            bounds_max: padded(bounds.max),
            left_child: u32::MAX,
            right_child: u32::MAX,
            first_primitive,
            primitive_count,
        }
    }

    pub fn new_interior(bounds: Aabb, left_child: u32, right_child: u32) -> Self {
        Self {
            bounds_min: padded(bounds.min),
            bounds_max: padded(bounds.max),
            left_child,
            right_child,
            first_primitive: 0,
            primitive_count: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left_child == u32::MAX && self.right_child == u32::MAX
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec3::new(self.bounds_min[0], self.bounds_min[1], self.bounds_min[2]),
            Vec3::new(self.bounds_max[0], self.bounds_max[1], self.bounds_max[2]),
        )
    }
}

/// Immutable BVH data shared between the nodes that instance it.
#[derive(Debug, Default, Clone)]
pub struct Bvh {
    pub nodes: Vec<BvhNode>,
    pub primitive_indices: Vec<u32>,
}

impl Bvh {
    pub fn new(nodes: Vec<BvhNode>, primitive_indices: Vec<u32>) -> Self {
        Self {
            nodes,
            primitive_indices,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bounds of the root record, which enclose the whole hierarchy.
    pub fn root_bounds(&self) -> Option<Aabb> {
        self.nodes.first().map(BvhNode::bounds)
    }
}

fn padded(vec: Vec3) -> [f32; 4] {
    [vec.x, vec.y, vec.z, 0.0]
}

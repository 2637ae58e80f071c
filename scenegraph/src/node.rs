use std::sync::Arc;

use maths::{Mat4, Vec3};

use crate::{
    bounds::Aabb,
    bvh::{Bvh, BvhNode},
    error::SceneError,
    settings::SceneSettings,
};

/// One placed instance of a BVH.
///
/// World bounds and the inverse matrices are only valid after [`Node::update`]
/// has run following the last [`Node::set_transform`].
#[derive(Debug, Clone)]
pub struct Node {
    bvh: Arc<Bvh>,

    local_bounds: Aabb,
    world_bounds: Aabb,

    /// Local to world.
    xform: Mat4,
    /// World to local.
    inv_xform: Mat4,
    /// Inverse of the upper-left 3x3, for directions.
    inv_xform33: Mat4,
    /// Transpose of `inv_xform33`, for normals.
    inv_transpose_xform33: Mat4,
}

impl Node {
    pub fn new(bvh: Arc<Bvh>) -> Self {
        let local_bounds = bvh.root_bounds().unwrap_or(Aabb::EMPTY);

        let mut linear_identity = Mat4::IDENTITY;
        linear_identity.w_axis.w = 0.0;

        Self {
            bvh,
            local_bounds,
            world_bounds: Aabb::EMPTY,
            xform: Mat4::IDENTITY,
            inv_xform: Mat4::IDENTITY,
            inv_xform33: linear_identity,
            inv_transpose_xform33: linear_identity,
        }
    }

    /// Replaces the local-to-world transform. Derived state is refreshed by
    /// the next [`Node::update`].
    pub fn set_transform(&mut self, xform: impl Into<Mat4>) {
        self.xform = xform.into();
    }

    pub fn update(&mut self) -> Result<(), SceneError> {
        self.update_with(&SceneSettings::default())
    }

    /// Recomputes world bounds and the cached inverses from the current
    /// transform. On a singular transform, or when the world bounds would
    /// overflow, nothing is modified.
    pub fn update_with(&mut self, settings: &SceneSettings) -> Result<(), SceneError> {
        if !self.has_geometry() {
            return Ok(());
        }

        let epsilon = settings.determinant_epsilon;
        let inverses = self
            .xform
            .try_inverse_with_epsilon(epsilon)
            .and_then(|inv_xform| {
                self.xform
                    .without_translation()
                    .try_inverse_with_epsilon(epsilon)
                    .map(|inv_xform33| (inv_xform, inv_xform33))
            });

        let (inv_xform, inv_xform33) = match inverses {
            Ok(inverses) => inverses,
            Err(err) => {
                log::warn!("Skipping node update: {err}");
                return Err(err.into());
            }
        };

        let world_bounds = self.local_bounds.transformed(&self.xform);
        if !world_bounds.min.is_finite() || !world_bounds.max.is_finite() {
            log::warn!("Skipping node update: world bounds overflowed");
            return Err(SceneError::NonFiniteBounds);
        }

        self.world_bounds = world_bounds;
        self.inv_xform = inv_xform;
        self.inv_xform33 = inv_xform33;
        self.inv_transpose_xform33 = inv_xform33.transpose();

        Ok(())
    }

    pub fn has_geometry(&self) -> bool {
        !self.bvh.is_empty()
    }

    pub fn local_bounding_box(&self) -> Aabb {
        self.local_bounds
    }

    pub fn world_bounding_box(&self) -> Aabb {
        self.world_bounds
    }

    pub fn transform(&self) -> &Mat4 {
        &self.xform
    }

    pub fn inverse_transform(&self) -> &Mat4 {
        &self.inv_xform
    }

    pub fn inverse_transform33(&self) -> &Mat4 {
        &self.inv_xform33
    }

    pub fn inverse_transpose_transform33(&self) -> &Mat4 {
        &self.inv_transpose_xform33
    }

    pub fn bvh(&self) -> &Arc<Bvh> {
        &self.bvh
    }

    pub fn bvh_nodes(&self) -> &[BvhNode] {
        &self.bvh.nodes
    }

    pub fn bvh_indices(&self) -> &[u32] {
        &self.bvh.primitive_indices
    }

    pub fn world_to_local_point(&self, point: Vec3) -> Vec3 {
        self.inv_xform.transform_point3(point)
    }

    pub fn world_to_local_direction(&self, direction: Vec3) -> Vec3 {
        self.inv_xform33.transform_vector3(direction)
    }

    pub fn local_to_world_point(&self, point: Vec3) -> Vec3 {
        self.xform.transform_point3(point)
    }

    /// Maps a local-space surface normal to world space, normalized.
    pub fn local_to_world_normal(&self, normal: Vec3) -> Vec3 {
        self.inv_transpose_xform33
            .transform_vector3(normal)
            .normalized()
    }
}

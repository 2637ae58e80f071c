use maths::{Mat4, Vec3};

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// "No geometry" sentinel. Neutral under [`Aabb::union`].
    pub const EMPTY: Self = Self {
        min: Vec3::MAX,
        max: Vec3::MIN,
    };

    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn grow_with(&mut self, bounds: &Aabb) {
        self.min = Vec3::min(self.min, bounds.min);
        self.max = Vec3::max(self.max, bounds.max);
    }

    pub fn grow_with_point(&mut self, point: Vec3) {
        self.min = Vec3::min(self.min, point);
        self.max = Vec3::max(self.max, point);
    }

    pub fn union(&self, other: &Aabb) -> Self {
        let mut bounds = *self;
        bounds.grow_with(other);
        bounds
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.y >= self.min.y
            && point.z >= self.min.z
            && point.x <= self.max.x
            && point.y <= self.max.y
            && point.z <= self.max.z
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
        ]
    }

    /// Bounds of all 8 corners after `xform`. Transforming only `min` and
    /// `max` is wrong once a rotation swaps which corner is extremal.
    pub fn transformed(&self, xform: &Mat4) -> Self {
        let mut bounds = Self::EMPTY;
        for corner in self.corners() {
            bounds.grow_with_point(xform.transform_point3(corner));
        }
        bounds
    }
}

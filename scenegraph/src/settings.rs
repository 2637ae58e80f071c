use maths::Mat4;

/// Tunables applied when nodes are updated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSettings {
    /// Transforms whose determinant magnitude is at or below this are rejected.
    ///
    /// The check is absolute, so it depends on scene scale: a uniform scale
    /// `s` has determinant `s^3`. Lower this for scenes built from very small
    /// instances.
    pub determinant_epsilon: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            determinant_epsilon: Mat4::DEFAULT_DETERMINANT_EPSILON,
        }
    }
}

impl SceneSettings {
    pub fn with_determinant_epsilon(mut self, determinant_epsilon: f32) -> Self {
        self.determinant_epsilon = determinant_epsilon;
        self
    }
}

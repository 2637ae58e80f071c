use crate::scene::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A node's transform (or its 3x3 part) could not be inverted.
    SingularTransform { determinant: f32 },
    /// The transformed local bounds overflowed to a non-finite value.
    NonFiniteBounds,
    /// One or more nodes failed to update during a commit.
    Commit { failed: Vec<NodeId> },
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::SingularTransform { determinant } => {
                write!(f, "Singular node transform (determinant: {determinant})")
            }
            SceneError::NonFiniteBounds => {
                write!(f, "Node transform produced non-finite world bounds")
            }
            SceneError::Commit { failed } => {
                write!(f, "Commit failed for {} node(s): {failed:?}", failed.len())
            }
        }
    }
}

impl std::error::Error for SceneError {}

impl From<maths::SingularMatrix> for SceneError {
    fn from(err: maths::SingularMatrix) -> Self {
        SceneError::SingularTransform {
            determinant: err.determinant,
        }
    }
}

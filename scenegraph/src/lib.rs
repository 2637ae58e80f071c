pub mod bounds;
pub mod bvh;
pub mod error;
pub mod node;
pub mod scene;
pub mod settings;
pub mod transform;

pub use bounds::Aabb;
pub use bvh::{Bvh, BvhNode};
pub use error::SceneError;
pub use node::Node;
pub use scene::{NodeId, Scene};
pub use settings::SceneSettings;
pub use transform::Transform;

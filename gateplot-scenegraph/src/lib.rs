pub mod error;
pub mod marks;
pub mod scene_graph;

pub use error::SceneGraphError;
pub use marks::mark::SceneMark;
pub use scene_graph::SceneGraph;

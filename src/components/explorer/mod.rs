mod component;
pub mod gexf;
pub mod interaction;
pub mod reducer;
mod render;
pub mod state;
pub mod types;

pub use component::GraphExplorer;
pub use types::{GraphData, GraphEdge, GraphNode, GraphStore};

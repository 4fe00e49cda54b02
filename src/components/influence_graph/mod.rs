mod component;
mod highlight;
mod render;
mod simulation;
mod state;
mod types;

pub use component::InfluenceGraph;
pub use types::InfluenceGraphData;

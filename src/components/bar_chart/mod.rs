mod component;
mod model;
mod types;

pub use component::TopArtistsChart;
pub use types::ArtistGraphData;

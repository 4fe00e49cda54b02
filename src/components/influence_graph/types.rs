//! Input documents for the genre influence graph.

use serde::Deserialize;

/// One genre in the influence network.
#[derive(Clone, Debug, Deserialize)]
pub struct GenreNode {
	/// Unique identifier referenced by links.
	pub id: String,
	#[serde(rename = "Genre")]
	pub genre: String,
	/// Number of artists in the genre; drives the circle radius.
	#[serde(rename = "ArtistCount")]
	pub artist_count: u64,
	#[serde(rename = "AvgInfluence")]
	pub avg_influence: f64,
	#[serde(rename = "TopArtistName")]
	pub top_artist_name: String,
}

/// Weighted, directed "influenced" relationship between two genres.
#[derive(Clone, Debug, Deserialize)]
pub struct InfluenceLink {
	pub source: String,
	pub target: String,
	pub weight: f64,
}

/// Complete graph document: `{ nodes, links }`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct InfluenceGraphData {
	pub nodes: Vec<GenreNode>,
	pub links: Vec<InfluenceLink>,
}

impl InfluenceGraphData {
	/// Sorted, de-duplicated genres for the dropdown.
	pub fn genres(&self) -> Vec<String> {
		let mut genres: Vec<String> = self.nodes.iter().map(|n| n.genre.clone()).collect();
		genres.sort();
		genres.dedup();
		genres
	}
}

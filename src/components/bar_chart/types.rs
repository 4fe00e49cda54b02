//! Input document for the top artists chart.

use serde::Deserialize;

/// A node of the artist document. The document mixes several node types, so
/// every field may be absent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ArtistNode {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(rename = "Node Type", default)]
	pub node_type: Option<String>,
	/// Number of successful songs this artist influenced.
	#[serde(rename = "Influence", default)]
	pub influence: Option<f64>,
	#[serde(rename = "PrincipalGenre", default)]
	pub principal_genre: Option<String>,
}

/// Artist document: `{ nodes, links }`. Links are not used by the chart.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ArtistGraphData {
	pub nodes: Vec<ArtistNode>,
}

/// One artist eligible for a bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarDatum {
	pub name: String,
	pub influence: f64,
	pub genre: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_mixed_node_types() {
		let data: ArtistGraphData = serde_json::from_str(
			r#"{
				"nodes": [
					{"name": "X", "Node Type": "Person", "Influence": 10, "PrincipalGenre": "Rock"},
					{"name": "Song", "Node Type": "Song", "PrincipalGenre": null},
					{"Node Type": "Album"}
				],
				"links": [{"source": 0, "target": 1}]
			}"#,
		)
		.unwrap();
		assert_eq!(data.nodes.len(), 3);
		assert_eq!(data.nodes[0].influence, Some(10.0));
		assert_eq!(data.nodes[0].node_type.as_deref(), Some("Person"));
		assert_eq!(data.nodes[1].principal_genre, None);
		assert_eq!(data.nodes[2].name, None);
	}
}

//! Fetching and decoding the JSON documents behind the views.

use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Why a document could not be loaded.
#[derive(Clone, Debug, Error)]
pub enum FetchError {
	#[error("no browser window available")]
	NoWindow,
	#[error("request for {url} failed: {message}")]
	Network { url: String, message: String },
	#[error("{url} responded with HTTP {status}")]
	Status { url: String, status: u16 },
	#[error("could not read body of {url}: {message}")]
	Body { url: String, message: String },
	#[error("failed to parse {url}: {message}")]
	Parse { url: String, message: String },
}

fn js_message(value: &JsValue) -> String {
	value
		.as_string()
		.unwrap_or_else(|| format!("{value:?}"))
}

/// GETs `url` relative to the page and decodes the body as JSON.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
	let window = web_sys::window().ok_or(FetchError::NoWindow)?;
	let network = |e: JsValue| FetchError::Network {
		url: url.to_owned(),
		message: js_message(&e),
	};

	let response: Response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(network)?
		.dyn_into()
		.map_err(network)?;
	if !response.ok() {
		return Err(FetchError::Status {
			url: url.to_owned(),
			status: response.status(),
		});
	}

	let body = |e: JsValue| FetchError::Body {
		url: url.to_owned(),
		message: js_message(&e),
	};
	let text = JsFuture::from(response.text().map_err(body)?)
		.await
		.map_err(body)?
		.as_string()
		.ok_or_else(|| FetchError::Body {
			url: url.to_owned(),
			message: "body is not text".into(),
		})?;

	serde_json::from_str(&text).map_err(|e| FetchError::Parse {
		url: url.to_owned(),
		message: e.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn errors_name_the_document() {
		let err = FetchError::Status {
			url: "simplified_graph.json".into(),
			status: 404,
		};
		assert_eq!(err.to_string(), "simplified_graph.json responded with HTTP 404");

		let err = FetchError::Parse {
			url: "genre_influence_graph.json".into(),
			message: "EOF while parsing".into(),
		};
		assert!(err.to_string().starts_with("failed to parse genre_influence_graph.json"));
	}
}

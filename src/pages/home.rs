use leptos::prelude::*;
use log::{error, info};
use serde::de::DeserializeOwned;

use crate::components::bar_chart::{ArtistGraphData, TopArtistsChart};
use crate::components::influence_graph::{InfluenceGraph, InfluenceGraphData};
use crate::config::{CHART_DATA_URL, GRAPH_DATA_URL};
use crate::fetch::{FetchError, fetch_json};

async fn load<T: DeserializeOwned>(url: &'static str) -> Result<T, FetchError> {
	let result = fetch_json(url).await;
	match &result {
		Ok(_) => info!("loaded {url}"),
		Err(e) => error!("{e}"),
	}
	result
}

/// Default Home Page: the influence network in `#viz` and the top artists
/// chart in `#viz2`. Each loads its own document and fails on its own.
#[component]
pub fn Home() -> impl IntoView {
	let graph = LocalResource::new(|| load::<InfluenceGraphData>(GRAPH_DATA_URL));
	let chart = LocalResource::new(|| load::<ArtistGraphData>(CHART_DATA_URL));

	view! {
		<main class="viz-page">
			<section id="viz">
				<Suspense fallback=|| view! { <p class="loading">"Loading genre network..."</p> }>
					<ErrorBoundary fallback=|errors| {
						view! {
							<p class="load-error">"Could not load the genre network: "</p>
							<ul>
								{move || {
									errors
										.get()
										.into_iter()
										.map(|(_, e)| view! { <li>{e.to_string()}</li> })
										.collect_view()
								}}
							</ul>
						}
					}>
						{move || Suspend::new(async move {
							graph
								.await
								.map(|data| {
									view! { <InfluenceGraph data=Signal::derive(move || data.clone()) /> }
								})
						})}
					</ErrorBoundary>
				</Suspense>
			</section>

			<section id="viz2">
				<Suspense fallback=|| view! { <p class="loading">"Loading artists..."</p> }>
					<ErrorBoundary fallback=|errors| {
						view! {
							<p class="load-error">"Could not load the artist chart: "</p>
							<ul>
								{move || {
									errors
										.get()
										.into_iter()
										.map(|(_, e)| view! { <li>{e.to_string()}</li> })
										.collect_view()
								}}
							</ul>
						}
					}>
						{move || Suspend::new(async move {
							chart
								.await
								.map(|data| {
									view! { <TopArtistsChart data=Signal::derive(move || data.clone()) /> }
								})
						})}
					</ErrorBoundary>
				</Suspense>
			</section>
		</main>
	}
}

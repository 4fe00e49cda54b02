use leptos::prelude::*;

/// Text shown in a hover tooltip: a bold heading followed by plain lines.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent {
	pub heading: String,
	pub lines: Vec<String>,
}

/// A visible tooltip anchored at page coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipState {
	pub content: TooltipContent,
	pub x: f64,
	pub y: f64,
}

impl TooltipState {
	/// Places `content` at the pointer's page position shifted by `offset`.
	pub fn at(content: TooltipContent, page_x: f64, page_y: f64, offset: (f64, f64)) -> Self {
		Self {
			content,
			x: page_x + offset.0,
			y: page_y + offset.1,
		}
	}
}

/// Floating tooltip that follows the pointer; hidden while `state` is `None`.
#[component]
pub fn Tooltip(#[prop(into)] state: Signal<Option<TooltipState>>) -> impl IntoView {
	let style = move || match state.get() {
		Some(t) => format!("left: {}px; top: {}px; opacity: 1;", t.x, t.y),
		None => "opacity: 0;".to_string(),
	};

	view! {
		<div class="viz-tooltip" style=style>
			{move || {
				state
					.get()
					.map(|t| {
						view! {
							<strong>{t.content.heading}</strong>
							{t
								.content
								.lines
								.into_iter()
								.map(|line| view! { <br />{line} })
								.collect_view()}
						}
					})
			}}
		</div>
	}
}

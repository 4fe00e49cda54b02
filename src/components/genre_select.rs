use leptos::prelude::*;

/// Titled `<select>` listing "all genres" followed by each genre.
///
/// `all_value` is the option value standing for "no genre filter". The
/// selected option follows `value`; user choices are reported through
/// `on_change` and never bubble past the control.
#[component]
pub fn GenreSelect<F>(
	title: &'static str,
	all_value: &'static str,
	genres: Vec<String>,
	#[prop(into)] value: Signal<String>,
	on_change: F,
) -> impl IntoView
where
	F: Fn(String) + 'static,
{
	view! {
		<div class="dropdown-title">{title}</div>
		<div class="dropdown-wrapper">
			<select
				class="genre-select"
				prop:value=move || value.get()
				on:change=move |ev| {
					ev.stop_propagation();
					on_change(event_target_value(&ev));
				}
			>
				<option value=all_value>"— All genres —"</option>
				{genres
					.into_iter()
					.map(|genre| view! { <option value=genre.clone()>{genre.clone()}</option> })
					.collect_view()}
			</select>
		</div>
	}
}

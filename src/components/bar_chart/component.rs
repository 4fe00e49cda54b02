use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use super::model::{self, ALL_GENRES, ChartLayout, GenreFilter, SELECT_TITLE};
use super::types::ArtistGraphData;
use crate::components::genre_select::GenreSelect;
use crate::components::scale::OrdinalScale;
use crate::components::tooltip::{Tooltip, TooltipState};
use crate::components::transition::ease_out_cubic;
use crate::config::ChartConfig;

const TOOLTIP_OFFSET: (f64, f64) = (12.0, 12.0);
const AXIS_COLOR: &str = "#666";
const TICK_SIZE: f64 = 6.0;

/// Drives `progress` from 0 to 1 over `duration_ms` each time `restart` is
/// called, one step per animation frame.
struct Entrance {
	start: Rc<Cell<Option<f64>>>,
	running: Rc<Cell<bool>>,
	frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl Entrance {
	fn new(progress: RwSignal<f64>, duration_ms: f64) -> Self {
		let start = Rc::new(Cell::new(None::<f64>));
		let running = Rc::new(Cell::new(false));
		let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

		let (start_f, running_f, frame_inner) = (start.clone(), running.clone(), frame.clone());
		*frame.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			let begun = start_f.get().unwrap_or(timestamp);
			start_f.set(Some(begun));
			let t = ((timestamp - begun) / duration_ms).clamp(0.0, 1.0);
			progress.set(ease_out_cubic(t));
			if t >= 1.0 {
				running_f.set(false);
				return;
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), frame_inner.borrow().as_ref()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));

		Self {
			start,
			running,
			frame,
		}
	}

	fn restart(&self) {
		self.start.set(None);
		if self.running.replace(true) {
			return;
		}
		if let (Some(window), Some(cb)) = (web_sys::window(), self.frame.borrow().as_ref()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}
}

/// Bar chart of the most influential artists, filterable by genre.
#[component]
pub fn TopArtistsChart(
	#[prop(into)] data: Signal<ArtistGraphData>,
	#[prop(optional)] config: ChartConfig,
) -> impl IntoView {
	let records = data.with_untracked(|d| model::qualifying(&d.nodes));
	let genres = model::genres(&records);
	info!(
		"top artists chart: {} qualifying artists across {} genres",
		records.len(),
		genres.len()
	);

	let filter = RwSignal::new(GenreFilter::All);
	let palette = StoredValue::new(OrdinalScale::default());
	let tooltip = RwSignal::new(None::<TooltipState>);
	let progress = RwSignal::new(1.0_f64);

	let layout_config = config.clone();
	let chart = Memo::new(move |_| {
		let filter = filter.get();
		palette
			.try_update_value(|p| model::layout(&records, &filter, &layout_config, p))
			.unwrap_or_else(|| model::layout(&records, &filter, &layout_config, &mut OrdinalScale::default()))
	});

	if let Some(duration_ms) = config.entrance_ms {
		let entrance = Entrance::new(progress, duration_ms);
		Effect::new(move |_| {
			chart.track();
			progress.set(0.0);
			entrance.restart();
		});
	}

	let ChartConfig {
		width,
		height,
		margin,
		..
	} = config;
	let axis_y = height - margin.bottom;

	let bars = move || {
		let ChartLayout { bars, baseline, .. } = chart.get();
		bars.into_iter()
			.map(|bar| {
				let (bar_y, bar_h) = (bar.clone(), bar.clone());
				let tip = bar.tooltip();
				let on_move = move |ev: MouseEvent| {
					tooltip.set(Some(TooltipState::at(
						tip.clone(),
						ev.page_x() as f64,
						ev.page_y() as f64,
						TOOLTIP_OFFSET,
					)));
				};
				view! {
					<rect
						x=bar.x
						width=bar.width
						fill=bar.color
						opacity="0.9"
						y=move || bar_y.grown(baseline, progress.get()).0
						height=move || bar_h.grown(baseline, progress.get()).1
						on:mousemove=on_move
						on:mouseout=move |_| tooltip.set(None)
					/>
				}
			})
			.collect_view()
	};

	let x_axis = move || {
		let ticks = chart.get().x_ticks;
		view! {
			<g transform=format!("translate(0,{axis_y})")>
				<path
					d=format!(
						"M{},{TICK_SIZE}V0H{}V{TICK_SIZE}",
						margin.left,
						width - margin.right,
					)
					fill="none"
					stroke=AXIS_COLOR
				/>
				{ticks
					.into_iter()
					.map(|tick| {
						view! {
							<g transform=format!("translate({},0)", tick.pos)>
								<line y2=TICK_SIZE stroke=AXIS_COLOR />
								<text
									y="9"
									dy="0.71em"
									transform="rotate(-65)"
									text-anchor="end"
									fill="white"
									font-size="11px"
								>
									{tick.label}
								</text>
							</g>
						}
					})
					.collect_view()}
			</g>
		}
	};

	let y_axis = move || {
		let ticks = chart.get().y_ticks;
		view! {
			<g transform=format!("translate({},0)", margin.left)>
				<path
					d=format!("M-{TICK_SIZE},{axis_y}H0V{}H-{TICK_SIZE}", margin.top)
					fill="none"
					stroke=AXIS_COLOR
				/>
				{ticks
					.into_iter()
					.map(|tick| {
						view! {
							<g transform=format!("translate(0,{})", tick.pos)>
								<line x2={-TICK_SIZE} stroke=AXIS_COLOR />
								<text x="-9" dy="0.32em" text-anchor="end" fill="white" font-size="11px">
									{tick.label}
								</text>
							</g>
						}
					})
					.collect_view()}
			</g>
		}
	};

	let on_genre = move |value: String| filter.set(GenreFilter::from_value(&value));

	view! {
		<div class="viz-card">
			<svg
				width=width
				height=height
				class="bar-chart"
				style="background: #111; border-radius: 12px; border: 2px solid #555;"
			>
				<g>{bars}</g>
				{x_axis}
				<text
					x={width / 2.0}
					y={axis_y + 100.0}
					text-anchor="middle"
					fill="white"
					font-size="16px"
				>
					"Artist"
				</text>
				{y_axis}
				<text
					x={-height / 2.0}
					y="30"
					transform="rotate(-90)"
					text-anchor="middle"
					fill="white"
					font-size="16px"
				>
					"Number of successful songs influenced"
				</text>
				<text
					x={width / 2.0}
					y={margin.top - 35.0}
					text-anchor="middle"
					fill="white"
					font-size="26px"
					font-weight="600"
				>
					{move || chart.get().title}
				</text>
			</svg>
			<GenreSelect
				title=SELECT_TITLE
				all_value=ALL_GENRES
				genres=genres
				value=Signal::derive(move || filter.get().value().to_owned())
				on_change=on_genre
			/>
			<Tooltip state=tooltip />
		</div>
	}
}

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::{InfluenceGraphState, Release};
use super::types::InfluenceGraphData;
use crate::components::genre_select::GenreSelect;
use crate::components::tooltip::{Tooltip, TooltipState};
use crate::config::GraphConfig;

const TOOLTIP_OFFSET: (f64, f64) = (15.0, 10.0);

type SharedState = Rc<RefCell<Option<InfluenceGraphState>>>;

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

/// Force-directed genre influence network with reverse highlighting and a
/// genre dropdown kept in sync with the selected node.
#[component]
pub fn InfluenceGraph(
	#[prop(into)] data: Signal<InfluenceGraphData>,
	#[prop(optional)] config: GraphConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	let genre_choice = RwSignal::new(String::new());
	let tooltip = RwSignal::new(None::<TooltipState>);
	let genres = data.with_untracked(|d| d.genres());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(config.width as u32);
		canvas.set_height(config.height as u32);

		let Some(ctx) = context_2d(&canvas) else {
			error!("influence graph: canvas 2d context unavailable");
			return;
		};
		*state_init.borrow_mut() = Some(InfluenceGraphState::new(&data.get(), &config));
		genre_choice.set(String::new());

		if animate_init.borrow().is_some() {
			return;
		}
		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(timestamp);
				render::render(s, &ctx);
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(window), Some(cb)) = (web_sys::window(), animate_init.borrow().as_ref()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_moved(x, y);
			let shown = s.drag.node.or(s.hover).map(|idx| {
				TooltipState::at(
					s.nodes[idx].tooltip(),
					ev.page_x() as f64,
					ev.page_y() as f64,
					TOOLTIP_OFFSET,
				)
			});
			tooltip.set(shown);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			match s.release() {
				Release::NodeClick(_) | Release::BackgroundClick => {
					genre_choice.set(s.highlight.dropdown_value().to_owned());
				}
				Release::DragEnd | Release::PanEnd | Release::Nothing => {}
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.leave();
		}
		tooltip.set(None);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom(x, y, ev.delta_y());
		}
	};

	let state_sel = state.clone();
	let on_genre = move |genre: String| {
		if let Some(ref mut s) = *state_sel.borrow_mut() {
			s.choose_genre(&genre);
			genre_choice.set(s.highlight.dropdown_value().to_owned());
		}
	};

	view! {
		<div class="viz-card">
			<canvas
				node_ref=canvas_ref
				class="influence-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<GenreSelect
				title="Select Genre"
				all_value=""
				genres=genres
				value=genre_choice
				on_change=on_genre
			/>
			<Tooltip state=tooltip />
		</div>
	}
}

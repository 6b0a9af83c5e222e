use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::ExplorerState;
use super::types::GraphData;

/// Interactive graph explorer: canvas with hover focus, a search input
/// with autocomplete, and a category-label filter panel.
#[component]
pub fn GraphExplorer(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let input_ref = NodeRef::<leptos::html::Input>::new();
	let state: Rc<RefCell<Option<ExplorerState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	// Category labels with their swatch colors, fixed after load.
	let label_panel: Vec<(String, String)> = data.with_untracked(|d| {
		let store = super::types::GraphStore::new(d.clone());
		store
			.distinct_labels()
			.into_iter()
			.map(|label| {
				let color = store.label_color(&label);
				(label, color)
			})
			.collect()
	});

	// Autocomplete source, re-derived on query and filter changes.
	let suggestions = RwSignal::new(Vec::<String>::new());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		let explorer = ExplorerState::new(data.get(), w, h);
		suggestions.set(explorer.interaction.autocomplete_source(&explorer.store));
		*state_init.borrow_mut() = Some(explorer);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			} else {
				// enter/leave node detection
				let hovered = s.node_at_position(x, y);
				s.hover(hovered);
			}
		}
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			if s.node_at_position(x, y).is_none() {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pan.active = false;
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pan.active = false;
			s.hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	let state_in = state.clone();
	let on_search_input = move |ev: web_sys::Event| {
		let query = event_target_value(&ev);
		if let Some(ref mut s) = *state_in.borrow_mut() {
			s.search(&query);
			suggestions.set(s.interaction.autocomplete_source(&s.store));
		}
	};

	let state_bl = state.clone();
	let on_search_blur = move |_| {
		// Leaving the input resets the query and resyncs the field.
		if let Some(input) = input_ref.get() {
			input.set_value("");
		}
		if let Some(ref mut s) = *state_bl.borrow_mut() {
			s.search("");
		}
	};

	let state_lt = state.clone();
	let on_layout_toggle = move |_| {
		if let Some(ref mut s) = *state_lt.borrow_mut() {
			s.toggle_layout();
		}
	};

	let checkboxes = label_panel
		.into_iter()
		.map(|(label, color)| {
			let state_cb = state.clone();
			let toggled = label.clone();
			let on_change = move |_| {
				if let Some(ref mut s) = *state_cb.borrow_mut() {
					s.toggle_label(&toggled);
					suggestions.set(s.interaction.autocomplete_source(&s.store));
				}
			};
			view! {
				<label class="label-filter" style=format!("border-left: 4px solid {color}")>
					<input type="checkbox" on:change=on_change />
					{label}
				</label>
			}
		})
		.collect_view();

	view! {
		<div class="graph-explorer" id="graph-container">
			<canvas
				node_ref=canvas_ref
				class="graph-explorer-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="graph-explorer-controls">
				<input
					node_ref=input_ref
					id="search-input"
					type="search"
					list="search-suggestions"
					placeholder="Search nodes..."
					on:input=on_search_input
					on:blur=on_search_blur
				/>
				<datalist id="search-suggestions">
					{move || {
						suggestions
							.get()
							.into_iter()
							.map(|label| view! { <option value=label /> })
							.collect_view()
					}}
				</datalist>
				<div class="label-filters" id="labels-container">{checkboxes}</div>
				<button class="layout-toggle" on:click=on_layout_toggle>
					"Toggle layout"
				</button>
			</div>
		</div>
	}
}

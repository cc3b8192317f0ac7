use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::commands::GraphCommands;
use super::filter::FilteredGraph;
use super::render;
use super::state::ForceGraphState;
use super::tooltip::Tooltip;

const FRAME_DT: f32 = 0.016;

type Slot<C> = Rc<RefCell<Option<C>>>;

/// Browser callbacks owned by one mounted canvas.
///
/// The animation closure holds a clone of this handle to schedule its next frame, so the
/// loop only ends when [`FrameLoop::stop`] empties the slots.
struct FrameLoop<C = Closure<dyn FnMut()>> {
	animate: Slot<C>,
	resize: Slot<C>,
	frame: Rc<Cell<Option<i32>>>,
}

impl<C> Clone for FrameLoop<C> {
	fn clone(&self) -> Self {
		Self {
			animate: Rc::clone(&self.animate),
			resize: Rc::clone(&self.resize),
			frame: Rc::clone(&self.frame),
		}
	}
}

impl<C> Default for FrameLoop<C> {
	fn default() -> Self {
		Self {
			animate: Rc::new(RefCell::new(None)),
			resize: Rc::new(RefCell::new(None)),
			frame: Rc::new(Cell::new(None)),
		}
	}
}

impl<C> FrameLoop<C> {
	fn is_running(&self) -> bool {
		self.animate.borrow().is_some()
	}

	/// Empties both slots, returning the pending frame and callbacks for disposal.
	fn release(&self) -> (Option<i32>, Option<C>, Option<C>) {
		let animate = self.animate.borrow_mut().take();
		let resize = self.resize.borrow_mut().take();
		(self.frame.take(), animate, resize)
	}
}

impl FrameLoop {
	fn request(&self, window: &Window) {
		if let Some(cb) = &*self.animate.borrow() {
			self.frame
				.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	}

	fn stop(&self) {
		let (frame, animate, resize) = self.release();
		if let Some(win) = web_sys::window() {
			if let Some(id) = frame {
				let _ = win.cancel_animation_frame(id);
			}
			if let Some(cb) = &resize {
				let _ =
					win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		drop((animate, resize));
		debug!("graph canvas loop stopped");
	}
}

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn sync_tooltip(state: &ForceGraphState, card: RwSignal<Tooltip>, visible: RwSignal<bool>) {
	match state.tooltip() {
		Some(tip) => {
			card.set(tip);
			visible.set(true);
		}
		None => visible.set(false),
	}
}

/// Interactive canvas for one filtered graph.
///
/// Drag a node to pin it, click it to release it, right-click it to toggle the highlight of
/// its links. Hovering a pinned node shows its details.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<FilteredGraph>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let card = RwSignal::new(Tooltip::default());
	let card_visible = RwSignal::new(false);
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let frames: FrameLoop = FrameLoop::default();
	let (state_init, frames_init) = (state.clone(), frames.clone());

	// Unmounting must end the loop, or it keeps drawing a detached canvas.
	let frames_handle = StoredValue::new_local(frames);
	on_cleanup(move || {
		let _ = frames_handle.try_with_value(FrameLoop::stop);
	});

	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		// A new threshold or dataset swaps the layout under the running loop.
		if frames_init.is_running() {
			let mut slot = state_init.borrow_mut();
			let (w, h) = slot
				.as_ref()
				.map(|s| (s.width, s.height))
				.unwrap_or((800.0, 600.0));
			let next = ForceGraphState::new(&graph, w, h);
			info!(
				"rebuilt layout at epsilon > {}: {} nodes, {} links",
				graph.threshold,
				next.node_count(),
				next.link_count()
			);
			*slot = Some(next);
			card_visible.set(false);
			return;
		}

		let Some(window) = web_sys::window() else {
			error!("no window available for the graph canvas");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
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

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("canvas has no 2d context");
			return;
		};
		*state_init.borrow_mut() = Some(ForceGraphState::new(&graph, w, h));

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*frames_init.resize.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *frames_init.resize.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, frames_inner) = (state_init.clone(), frames_init.clone());
		*frames_init.animate.borrow_mut() = Some(Closure::new(move || {
			frames_inner.frame.set(None);
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(FRAME_DT);
				render::render(s, &ctx);
			}
			if let Some(win) = web_sys::window() {
				frames_inner.request(&win);
			}
		}));
		frames_init.request(&window);
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		// Right button is handled by the context menu.
		if ev.button() != 0 {
			return;
		}
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.begin_drag(idx);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.node.is_some() {
				s.drag_to(x, y);
				return;
			}
			let hovered = s.node_at_position(x, y);
			if s.set_hover(hovered) {
				sync_tooltip(s, card, card_visible);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.drag.node.is_some() {
				s.end_drag();
				card_visible.set(false);
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.cancel_drag();
			s.set_hover(None);
		}
		card_visible.set(false);
	};

	let state_cm = state.clone();
	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_cm.borrow_mut() {
			let Some(name) = s.node_at_position(x, y).and_then(|idx| s.node_name(idx)) else {
				return;
			};
			let _ = s.highlight_neighbors(&name);
		}
	};

	let card_style = move || {
		card.with(|c| {
			format!(
				"position: absolute; left: {}px; top: {}px; width: 200px; opacity: {}; \
				 transition: opacity 300ms; pointer-events: none;",
				c.left,
				c.top,
				if card_visible.get() { 1 } else { 0 },
			)
		})
	};

	view! {
		<div class="force-graph" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:contextmenu=on_contextmenu
				style="display: block; cursor: grab;"
			/>
			<div class="tooltip" style=card_style>
				<h3>{move || card.with(|c| c.title.clone())}</h3>
				<hr />
				<strong>"Bin: "</strong>
				{move || card.with(|c| c.bin.clone())}
				<br />
				<Show when=move || card.with(|c| c.interval.is_some())>
					<strong>"Interval: "</strong>
					{move || card.with(|c| c.interval.clone().unwrap_or_default())}
				</Show>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn release_empties_slots_once() {
		let frames: FrameLoop<u8> = FrameLoop::default();
		let inner = frames.clone();
		*frames.animate.borrow_mut() = Some(1);
		*frames.resize.borrow_mut() = Some(2);
		frames.frame.set(Some(7));
		assert!(inner.is_running());

		assert_eq!(frames.release(), (Some(7), Some(1), Some(2)));
		assert!(!inner.is_running());
		assert_eq!(inner.release(), (None, None, None));
	}
}

//! Browser binding for the engine.
//!
//! The JS host mounts a [`BoardHost`] with the four zone elements and a
//! callback, forwards pointer-downs from tokens and the surface, and receives
//! every commit/effect as a JSON string. Once a gesture starts, move/up/cancel
//! are read from the window rather than the zone elements, so a drag keeps
//! tracking after the pointer leaves the board.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Element, Event, PointerEvent, Window};

use crate::annotation::{Arrow, ArrowId};
use crate::config::EngineConfig;
use crate::coords::{Point, Rect};
use crate::engine::{Action, EngineCore};
use crate::input::{Button, Manipulation, Mode, Pointer};
use crate::roster::Token;
use crate::zones::{Side, Zone, ZoneKind, ZoneMeasure};

/// Zone rectangles read live from the DOM.
pub struct ElementZones {
    home_surface: Element,
    away_surface: Element,
    home_bench: Element,
    away_bench: Element,
}

impl ZoneMeasure for ElementZones {
    fn measure(&self, zone: Zone) -> Option<Rect> {
        let el = match (zone.side, zone.kind) {
            (Side::Home, ZoneKind::Surface) => &self.home_surface,
            (Side::Away, ZoneKind::Surface) => &self.away_surface,
            (Side::Home, ZoneKind::Bench) => &self.home_bench,
            (Side::Away, ZoneKind::Bench) => &self.away_bench,
        };
        let r = el.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.width(), r.height()))
    }
}

type EventHandler = Closure<dyn FnMut(Event)>;

/// Window-level listeners for one gesture. Dropping the value deregisters them.
pub struct WindowListeners {
    window: Window,
    handlers: Vec<(&'static str, EventHandler)>,
}

impl WindowListeners {
    const EVENTS: [&'static str; 4] = ["pointermove", "pointerup", "pointercancel", "blur"];

    fn attach(window: Window, state: Weak<RefCell<HostState>>) -> Self {
        let mut handlers = Vec::with_capacity(Self::EVENTS.len());
        for name in Self::EVENTS {
            let state = state.clone();
            let handler: EventHandler = Closure::wrap(Box::new(move |event: Event| {
                if let Some(state) = state.upgrade() {
                    on_window_event(&state, name, event);
                }
            }) as Box<dyn FnMut(Event)>);
            if let Err(e) = window.add_event_listener_with_callback(name, handler.as_ref().unchecked_ref()) {
                tracing::warn!(event = name, error = ?e, "failed to add window listener");
            }
            handlers.push((name, handler));
        }
        Self { window, handlers }
    }
}

impl Drop for WindowListeners {
    fn drop(&mut self) {
        for (name, handler) in &self.handlers {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback(name, handler.as_ref().unchecked_ref())
            {
                tracing::warn!(event = name, error = ?e, "failed to remove window listener");
            }
        }
    }
}

struct HostState {
    core: EngineCore,
    zones: ElementZones,
    listeners: Option<WindowListeners>,
    on_action: js_sys::Function,
    this: Weak<RefCell<HostState>>,
}

fn pointer_of(ev: &PointerEvent) -> Pointer {
    Pointer { id: ev.pointer_id(), client: Point::new(f64::from(ev.client_x()), f64::from(ev.client_y())) }
}

fn on_window_event(state: &Rc<RefCell<HostState>>, name: &str, event: Event) {
    let actions = {
        let mut guard = state.borrow_mut();
        let st = &mut *guard;
        if name == "blur" {
            st.core.on_blur()
        } else {
            let Ok(ev) = event.dyn_into::<PointerEvent>() else {
                return;
            };
            let pointer = pointer_of(&ev);
            match name {
                "pointermove" => st.core.on_pointer_move(pointer, &st.zones),
                "pointerup" => st.core.on_pointer_up(pointer, Button::from_dom(ev.button()), &st.zones),
                _ => st.core.on_pointer_cancel(pointer.id),
            }
        }
    };
    dispatch(state, actions);
}

/// Apply host effects and forward the rest to JS. Never holds the state
/// borrow while calling into JS, so the callback may call back into the host.
fn dispatch(state: &Rc<RefCell<HostState>>, actions: Vec<Action>) {
    for action in actions {
        match action {
            Action::TrackPointer { .. } => {
                let mut st = state.borrow_mut();
                if st.listeners.is_none() {
                    if let Some(window) = web_sys::window() {
                        let this = st.this.clone();
                        st.listeners = Some(WindowListeners::attach(window, this));
                    }
                }
            }
            Action::ReleasePointer => {
                let released = state.borrow_mut().listeners.take();
                drop(released);
            }
            other => {
                let callback = state.borrow().on_action.clone();
                match serde_json::to_string(&other) {
                    Ok(json) => {
                        if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                            tracing::warn!(error = ?e, "action callback threw");
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "failed to serialize action"),
                }
            }
        }
    }
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_side(raw: &str) -> Result<Side, JsValue> {
    match raw {
        "home" => Ok(Side::Home),
        "away" => Ok(Side::Away),
        other => Err(js_err(format!("unknown side: {other}"))),
    }
}

/// The engine as exposed to JavaScript.
#[wasm_bindgen]
pub struct BoardHost {
    state: Rc<RefCell<HostState>>,
}

#[wasm_bindgen]
impl BoardHost {
    /// Mount on the four zone elements. `config` is an optional JSON object.
    #[wasm_bindgen(constructor)]
    pub fn new(
        home_surface: Element,
        away_surface: Element,
        home_bench: Element,
        away_bench: Element,
        on_action: js_sys::Function,
        config: Option<String>,
    ) -> Result<BoardHost, JsValue> {
        let config = match config {
            Some(raw) => EngineConfig::from_json(&raw).map_err(js_err)?,
            None => EngineConfig::default(),
        };
        let zones = ElementZones { home_surface, away_surface, home_bench, away_bench };
        let state = Rc::new_cyclic(|this| {
            RefCell::new(HostState {
                core: EngineCore::with_config(config),
                zones,
                listeners: None,
                on_action,
                this: this.clone(),
            })
        });
        Ok(BoardHost { state })
    }

    /// Replace one side's tokens. Both lists are JSON arrays of tokens.
    pub fn load_roster(&self, side: &str, surface: &str, bench: &str) -> Result<(), JsValue> {
        let side = parse_side(side)?;
        let surface: Vec<Token> = serde_json::from_str(surface).map_err(js_err)?;
        let bench: Vec<Token> = serde_json::from_str(bench).map_err(js_err)?;
        self.state.borrow_mut().core.load_roster(side, surface, bench).map_err(js_err)
    }

    /// Replace the arrows with a JSON array.
    pub fn load_arrows(&self, arrows: &str) -> Result<(), JsValue> {
        let arrows: Vec<Arrow> = serde_json::from_str(arrows).map_err(js_err)?;
        self.state.borrow_mut().core.load_arrows(arrows);
        Ok(())
    }

    /// `"move"` or `"draw"`. Returns false if a gesture is in progress.
    pub fn set_mode(&self, mode: &str) -> Result<bool, JsValue> {
        let mode = match mode {
            "move" => Mode::Move,
            "draw" => Mode::Draw,
            other => return Err(js_err(format!("unknown mode: {other}"))),
        };
        Ok(self.state.borrow_mut().core.set_mode(mode))
    }

    pub fn token_pointer_down(&self, token: u32, ev: PointerEvent) {
        let actions = self
            .state
            .borrow_mut()
            .core
            .on_token_pointer_down(token, pointer_of(&ev), Button::from_dom(ev.button()));
        if !actions.is_empty() {
            ev.prevent_default();
        }
        dispatch(&self.state, actions);
    }

    pub fn surface_pointer_down(&self, side: &str, ev: PointerEvent) -> Result<(), JsValue> {
        let side = parse_side(side)?;
        let actions = {
            let mut guard = self.state.borrow_mut();
            let st = &mut *guard;
            st.core
                .on_surface_pointer_down(side, pointer_of(&ev), Button::from_dom(ev.button()), &st.zones)
        };
        if !actions.is_empty() {
            ev.prevent_default();
        }
        dispatch(&self.state, actions);
        Ok(())
    }

    pub fn remove_arrow(&self, id: &str) -> Result<(), JsValue> {
        let id: ArrowId = id.parse().map_err(js_err)?;
        let actions = self.state.borrow_mut().core.remove_arrow(&id);
        dispatch(&self.state, actions);
        Ok(())
    }

    pub fn clear_arrows(&self) {
        let actions = self.state.borrow_mut().core.clear_arrows();
        dispatch(&self.state, actions);
    }

    pub fn key_down(&self, key: &str) {
        let actions = self.state.borrow_mut().core.on_key_down(key);
        dispatch(&self.state, actions);
    }

    /// Abort any gesture, e.g. when the board unmounts.
    pub fn cancel(&self) {
        let actions = self.state.borrow_mut().core.cancel();
        dispatch(&self.state, actions);
    }

    /// Marker layouts for one side's surface, as a JSON array.
    pub fn markers(&self, side: &str) -> Result<String, JsValue> {
        let side = parse_side(side)?;
        serde_json::to_string(&self.state.borrow().core.markers(side)).map_err(js_err)
    }

    /// The in-progress arrow as `[start, end]` JSON, or `null`.
    pub fn arrow_preview(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.borrow().core.arrow_preview()).map_err(js_err)
    }
}

impl Drop for BoardHost {
    fn drop(&mut self) {
        // The page is tearing the board down; no host effects to deliver.
        let mut st = self.state.borrow_mut();
        st.core.manipulation = Manipulation::Idle;
        st.listeners = None;
    }
}

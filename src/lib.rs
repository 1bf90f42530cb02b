#![cfg(target_arch = "wasm32")]
use glam::{Vec2, Vec3};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod canvas;
mod dom;
mod events;
mod frame;
pub mod core;

use crate::core::constants::{DEFAULT_BALL_SIZE, DEFAULT_REACH_MULTIPLIER, DEFAULT_SPEED};
use crate::core::plasma::{PlasmaBall, PlasmaConfig};
use crate::core::walker::{JointBindings, JointMap, JointRole, Walker, WalkerParams};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fx-web starting");
    Ok(())
}

// ===================== Plasma ball =====================

/// Recognized plasma-ball options, mirroring the embed snippet's config keys.
#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct PlasmaOptions {
    /// Ball radius as a fraction of the container's shorter side.
    #[wasm_bindgen(js_name = ballSize)]
    pub ball_size: f32,
    /// Cursor trigger distance as a multiple of the ball radius.
    #[wasm_bindgen(js_name = reachMultiplier)]
    pub reach_multiplier: f32,
    /// Lightning refresh rate; 0.1 = slow/persistent, 1.0 = fast/flickery.
    pub speed: f32,
    /// Skip the opaque background fill (see-through embedding).
    pub transparent: bool,
    /// Deterministic RNG seed; entropy-seeded when absent.
    pub seed: Option<u32>,
}

impl Default for PlasmaOptions {
    fn default() -> Self {
        Self {
            ball_size: DEFAULT_BALL_SIZE,
            reach_multiplier: DEFAULT_REACH_MULTIPLIER,
            speed: DEFAULT_SPEED,
            transparent: false,
            seed: None,
        }
    }
}

#[wasm_bindgen]
impl PlasmaOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PlasmaOptions {
        PlasmaOptions::default()
    }
}

/// A running plasma-ball effect bound to a canvas.
///
/// Construction wires pointer/touch tracking, container-resize observation
/// and the frame loop; [`PlasmaEffect::destroy`] tears all of it down.
#[wasm_bindgen]
pub struct PlasmaEffect {
    raf: Option<frame::FrameLoop>,
    listeners: Vec<events::EventListener>,
    observer: Option<web::ResizeObserver>,
    _observer_cb: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl PlasmaEffect {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_el: web::HtmlCanvasElement,
        options: Option<PlasmaOptions>,
    ) -> Result<PlasmaEffect, JsValue> {
        let opts = options.unwrap_or_default();
        let config = PlasmaConfig {
            ball_size: opts.ball_size,
            reach_multiplier: opts.reach_multiplier,
            speed: opts.speed,
            transparent: opts.transparent,
        };
        let (width, height) = dom::fit_canvas_to_parent(&canvas_el);
        let seed = opts.seed.map(u64::from).unwrap_or_else(rand::random);

        let ball = PlasmaBall::new(config, width, height, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let surface =
            canvas::Canvas2dSurface::new(&canvas_el).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!(
            "[plasma] starting on {:.0}x{:.0} surface, ball radius {:.1}",
            width,
            height,
            ball.ball_radius()
        );

        let ball = Rc::new(RefCell::new(ball));
        let surface = Rc::new(RefCell::new(surface));

        let mut listeners = Vec::with_capacity(4);
        {
            let ball = ball.clone();
            let canvas = canvas_el.clone();
            listeners.push(events::EventListener::new(
                canvas_el.as_ref(),
                "pointermove",
                move |ev: web::Event| {
                    let ev: web::PointerEvent = ev.unchecked_into();
                    let pos = events::pointer_canvas_px(&ev, &canvas);
                    ball.borrow_mut().set_pointer(pos);
                },
            ));
        }
        {
            let ball = ball.clone();
            listeners.push(events::EventListener::new(
                canvas_el.as_ref(),
                "pointerleave",
                move |_| ball.borrow_mut().clear_pointer(),
            ));
        }
        {
            let ball = ball.clone();
            let canvas = canvas_el.clone();
            listeners.push(events::EventListener::new(
                canvas_el.as_ref(),
                "touchmove",
                move |ev: web::Event| {
                    ev.prevent_default();
                    let ev: web::TouchEvent = ev.unchecked_into();
                    if let Some(pos) = events::touch_canvas_px(&ev, &canvas) {
                        ball.borrow_mut().set_pointer(pos);
                    }
                },
            ));
        }
        {
            let ball = ball.clone();
            listeners.push(events::EventListener::new(
                canvas_el.as_ref(),
                "touchend",
                move |_| ball.borrow_mut().clear_pointer(),
            ));
        }

        // Re-fit the canvas when the hosting container resizes; animation
        // state and cache staleness carry across the resize.
        let (observer, observer_cb) = {
            let ball = ball.clone();
            let surface = surface.clone();
            let canvas = canvas_el.clone();
            let cb = Closure::wrap(Box::new(move || {
                let (w, h) = dom::fit_canvas_to_parent(&canvas);
                surface.borrow_mut().set_size(w, h);
                ball.borrow_mut().resize(w, h);
            }) as Box<dyn FnMut()>);
            match web::ResizeObserver::new(cb.as_ref().unchecked_ref()) {
                Ok(observer) => {
                    let observed: web::Element = canvas_el
                        .parent_element()
                        .unwrap_or_else(|| canvas_el.clone().into());
                    observer.observe(&observed);
                    (Some(observer), Some(cb))
                }
                Err(e) => {
                    log::warn!("[plasma] ResizeObserver unavailable: {:?}", e);
                    (None, None)
                }
            }
        };

        let raf = {
            let ball = ball.clone();
            let surface = surface.clone();
            frame::start_loop(move || {
                ball.borrow_mut().frame(&mut *surface.borrow_mut());
            })
        };

        Ok(PlasmaEffect {
            raf: Some(raf),
            listeners,
            observer,
            _observer_cb: observer_cb,
        })
    }

    /// Stop the frame loop, resize observation and event listeners. Calling
    /// this more than once is a no-op.
    pub fn destroy(&mut self) {
        if let Some(raf) = self.raf.take() {
            raf.cancel();
            log::info!("[plasma] effect destroyed");
        }
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.listeners.clear();
    }
}

// ===================== Walker rig =====================

/// Bridge between the JS-owned articulated model and the pose animator.
///
/// The host registers each loaded joint's rotation once (the rest pose is
/// captured from those at the first update), then calls
/// [`WalkerRig::update`] from its render loop and reads back root position,
/// heading and per-joint rotations to apply to the scene graph.
#[wasm_bindgen]
pub struct WalkerRig {
    params: WalkerParams,
    bindings: JointBindings,
    joints: JointMap,
    walker: Option<Walker>,
}

#[wasm_bindgen]
impl WalkerRig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WalkerRig {
        WalkerRig {
            params: WalkerParams::default(),
            bindings: JointBindings::default(),
            joints: JointMap::new(),
            walker: None,
        }
    }

    /// Override the joint name bound to a role (`left_shoulder`,
    /// `right_shoulder`, `left_arm`, `right_arm`, `left_leg`, `right_leg`).
    #[wasm_bindgen(js_name = bindJoint)]
    pub fn bind_joint(&mut self, role: &str, name: &str) -> Result<(), JsValue> {
        let role = JointRole::from_key(role)
            .ok_or_else(|| JsValue::from_str(&format!("unknown joint role: {role}")))?;
        self.bindings.set(role, name);
        Ok(())
    }

    /// Register a joint found in the loaded model with its current (rest)
    /// rotation. Joints never registered simply do not animate.
    #[wasm_bindgen(js_name = registerJoint)]
    pub fn register_joint(&mut self, name: &str, x: f32, y: f32, z: f32) {
        self.joints.insert(name, Vec3::new(x, y, z));
    }

    /// Advance the walk cycle by `dt` seconds toward the target point
    /// (same coordinate space as the root position).
    pub fn update(&mut self, dt: f32, target_x: f32, target_y: f32) {
        if self.walker.is_none() {
            self.walker = Some(Walker::bind(
                self.params.clone(),
                self.bindings.clone(),
                &self.joints,
            ));
            log::info!("[walker] rig bound with {} joints", self.joints.len());
        }
        if let Some(walker) = &mut self.walker {
            walker.update(dt, Vec2::new(target_x, target_y), &mut self.joints);
        }
    }

    /// Current rotation of a registered joint as `[x, y, z]` Euler radians.
    #[wasm_bindgen(js_name = jointRotation)]
    pub fn joint_rotation(&self, name: &str) -> Option<js_sys::Float32Array> {
        let rotation = self.joints.get(name)?;
        Some(js_sys::Float32Array::from(rotation.to_array().as_slice()))
    }

    #[wasm_bindgen(js_name = rootX)]
    pub fn root_x(&self) -> f32 {
        self.walker.as_ref().map_or(0.0, |w| w.position().x)
    }

    #[wasm_bindgen(js_name = rootY)]
    pub fn root_y(&self) -> f32 {
        self.walker.as_ref().map_or(0.0, |w| w.position().y)
    }

    /// Smoothed yaw the host applies to the model root.
    pub fn heading(&self) -> f32 {
        self.walker.as_ref().map_or(0.0, |w| w.heading())
    }
}

impl Default for WalkerRig {
    fn default() -> Self {
        Self::new()
    }
}

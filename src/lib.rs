#![cfg(target_arch = "wasm32")]
//! Browser bindings for the fish school.
//!
//! The page owns the renderer and the fish models. It creates an
//! [`Aquarium`], spawns fish as their models finish loading, forwards pointer
//! and resize events (or lets [`Aquarium::attach`] do it), and each frame reads
//! back a flat `Float32Array` of [`FishInstance`] records to pose its meshes.

use glam::Vec3;
use shoal_core::{
    AgentOverrides, AnimationClip, FishAssets, FishInstance, FrameClock, FrameTime,
    ResolverParams, Spawner,
};
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod events;
mod frame;

const BURST_CLIP: &str = "swim";
const LOOP_CLIP: &str = "swim_loop";

/// State shared between the JS-facing handle, DOM listeners and the RAF loop.
pub(crate) struct Shared {
    pub(crate) aquarium: shoal_core::Aquarium,
    pub(crate) clock: FrameClock,
    pub(crate) instances: Vec<FishInstance>,
}

impl Shared {
    pub(crate) fn step(&mut self, time: FrameTime) -> js_sys::Float32Array {
        let report = self.aquarium.frame(time);
        if report.admitted > 0 {
            log::info!(
                "[aquarium] {} fish joined, {} swimming",
                report.admitted,
                self.aquarium.school().len()
            );
        }
        self.aquarium.school().write_instances(&mut self.instances);
        js_sys::Float32Array::from(shoal_core::as_floats(&self.instances))
    }
}

fn to_js(e: impl Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("shoal-web starting");
    Ok(())
}

/// Number of floats per fish in [`Aquarium::instances`].
#[wasm_bindgen]
pub fn instance_stride() -> usize {
    FishInstance::FLOATS
}

/// Optional per-fish tunables; unset fields are randomised on spawn.
#[wasm_bindgen]
#[derive(Clone, Copy, Default)]
pub struct FishConfig {
    overrides: AgentOverrides,
}

#[wasm_bindgen]
impl FishConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FishConfig {
        FishConfig::default()
    }

    #[wasm_bindgen(getter)]
    pub fn speed(&self) -> Option<f32> {
        self.overrides.speed
    }
    #[wasm_bindgen(setter)]
    pub fn set_speed(&mut self, value: f32) {
        self.overrides.speed = Some(value);
    }

    #[wasm_bindgen(getter)]
    pub fn interval(&self) -> Option<f32> {
        self.overrides.interval
    }
    #[wasm_bindgen(setter)]
    pub fn set_interval(&mut self, value: f32) {
        self.overrides.interval = Some(value);
    }

    #[wasm_bindgen(getter, js_name = followDistance)]
    pub fn follow_distance(&self) -> Option<f32> {
        self.overrides.follow_distance
    }
    #[wasm_bindgen(setter, js_name = followDistance)]
    pub fn set_follow_distance(&mut self, value: f32) {
        self.overrides.follow_distance = Some(value);
    }

    #[wasm_bindgen(getter, js_name = maxDistance)]
    pub fn max_distance(&self) -> Option<f32> {
        self.overrides.max_distance
    }
    #[wasm_bindgen(setter, js_name = maxDistance)]
    pub fn set_max_distance(&mut self, value: f32) {
        self.overrides.max_distance = Some(value);
    }

    #[wasm_bindgen(getter, js_name = rotationSpeed)]
    pub fn rotation_speed(&self) -> Option<f32> {
        self.overrides.rotation_speed
    }
    #[wasm_bindgen(setter, js_name = rotationSpeed)]
    pub fn set_rotation_speed(&mut self, value: f32) {
        self.overrides.rotation_speed = Some(value);
    }
}

#[wasm_bindgen]
pub struct Aquarium {
    shared: Rc<RefCell<Shared>>,
    spawner: Spawner,
}

#[wasm_bindgen]
impl Aquarium {
    /// `seed` makes the school reproducible; omit it for a random one.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: Option<f64>) -> Result<Aquarium, JsValue> {
        let seed = seed.map(|s| s as u64).unwrap_or_else(rand::random);
        let aquarium =
            shoal_core::Aquarium::new(ResolverParams::default(), width, height, seed).map_err(to_js)?;
        let spawner = aquarium.spawner();
        log::info!("[aquarium] created {}x{} seed={}", width, height, seed);
        Ok(Aquarium {
            shared: Rc::new(RefCell::new(Shared {
                aquarium,
                clock: FrameClock::new(),
                instances: Vec::new(),
            })),
            spawner,
        })
    }

    /// Add a fish at a random spot. Safe to call from asset-load callbacks at
    /// any time; the fish swims from the next frame on.
    #[wasm_bindgen(js_name = spawnFish)]
    pub fn spawn_fish(
        &self,
        burst_duration: f32,
        loop_duration: f32,
        config: &FishConfig,
    ) -> Result<u32, JsValue> {
        self.spawner
            .spawn_scattered(fish_assets(burst_duration, loop_duration), &config.overrides)
            .map(|id| id.0)
            .map_err(|e| {
                log::warn!("[aquarium] rejected fish config: {}", e);
                to_js(e)
            })
    }

    #[wasm_bindgen(js_name = spawnFishAt)]
    pub fn spawn_fish_at(
        &self,
        x: f32,
        y: f32,
        z: f32,
        burst_duration: f32,
        loop_duration: f32,
        config: &FishConfig,
    ) -> Result<u32, JsValue> {
        self.spawner
            .spawn(
                fish_assets(burst_duration, loop_duration),
                &config.overrides,
                Vec3::new(x, y, z),
            )
            .map(|id| id.0)
            .map_err(|e| {
                log::warn!("[aquarium] rejected fish config: {}", e);
                to_js(e)
            })
    }

    #[wasm_bindgen(js_name = onPointerMove)]
    pub fn on_pointer_move(&self, client_x: f32, client_y: f32) {
        self.shared
            .borrow_mut()
            .aquarium
            .resolver_mut()
            .on_pointer_move(client_x, client_y);
    }

    #[wasm_bindgen(js_name = onPointerEnter)]
    pub fn on_pointer_enter(&self) {
        self.shared.borrow_mut().aquarium.resolver_mut().on_pointer_enter();
    }

    #[wasm_bindgen(js_name = onPointerLeave)]
    pub fn on_pointer_leave(&self) {
        self.shared.borrow_mut().aquarium.resolver_mut().on_pointer_leave();
    }

    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&self, width: f32, height: f32) {
        self.shared
            .borrow_mut()
            .aquarium
            .resolver_mut()
            .on_resize(width, height);
    }

    /// Advance with host-supplied times (milliseconds) and return the packed
    /// instances.
    pub fn tick(&self, elapsed_ms: f64, delta_ms: f32) -> js_sys::Float32Array {
        self.shared
            .borrow_mut()
            .step(FrameTime::new(elapsed_ms, delta_ms))
    }

    /// Advance using the wall clock.
    pub fn frame(&self) -> js_sys::Float32Array {
        let mut shared = self.shared.borrow_mut();
        let time = shared.clock.advance();
        shared.step(time)
    }

    /// Instances from the most recent frame.
    pub fn instances(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(shoal_core::as_floats(&self.shared.borrow().instances))
    }

    #[wasm_bindgen(js_name = cameraOrientation)]
    pub fn camera_orientation(&self) -> js_sys::Float32Array {
        let q = self.shared.borrow().aquarium.resolver().camera().orientation;
        js_sys::Float32Array::from(&q.to_array()[..])
    }

    #[wasm_bindgen(js_name = targetPoint)]
    pub fn target_point(&self) -> js_sys::Float32Array {
        let p = self.shared.borrow().aquarium.resolver().state().target_point;
        js_sys::Float32Array::from(&p.to_array()[..])
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.shared.borrow().aquarium.resolver().state().is_active
    }

    pub fn len(&self) -> usize {
        self.shared.borrow().aquarium.school().len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.shared.borrow().aquarium.school().is_empty()
    }

    #[wasm_bindgen(js_name = followingCount)]
    pub fn following_count(&self) -> usize {
        self.shared.borrow().aquarium.school().following_count()
    }

    /// Listen for pointer events on `element` and window resizes, sizing the
    /// viewport from the element's client box.
    pub fn attach(&self, element: &web::Element) -> Result<(), JsValue> {
        events::wire_input_handlers(element, &self.shared).map_err(to_js)
    }

    /// Drive the school from `requestAnimationFrame`, calling `on_frame` with
    /// the packed instances after every step.
    pub fn run(&self, on_frame: js_sys::Function) {
        frame::start_loop(self.shared.clone(), on_frame);
    }
}

fn fish_assets(burst_duration: f32, loop_duration: f32) -> FishAssets {
    FishAssets {
        burst: AnimationClip::new(BURST_CLIP, burst_duration),
        swim_loop: AnimationClip::new(LOOP_CLIP, loop_duration),
    }
}

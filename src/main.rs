//! Line Bounce entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_demo {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use line_bounce::Settings;
    use line_bounce::audio::{AudioManager, SoundEffect};
    use line_bounce::renderer::{RenderState, draw_scene};
    use line_bounce::sim::{Bounds, SimState, TickInput, tick};

    /// Demo instance holding all state
    struct Demo {
        state: SimState,
        input: TickInput,
        settings: Settings,
        audio: AudioManager,
        render_state: Option<RenderState>,
    }

    impl Demo {
        fn new(bounds: Bounds, settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());
            Self {
                state: SimState::new(bounds),
                input: TickInput::default(),
                settings,
                audio,
                render_state: None,
            }
        }

        /// Run one simulation tick and play its collision tones
        fn update(&mut self) {
            let events = tick(&mut self.state, &self.input, &self.settings.physics);
            self.input.clear();

            for event in events {
                self.audio.play(SoundEffect::from(event));
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = draw_scene(&self.state, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.set_volume(self.settings.effective_volume());
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }

        fn toggle_flash(&mut self) {
            self.settings.flash = !self.settings.flash;
            self.settings.save();
            log::info!("Flash: {}", self.settings.flash);
        }
    }

    /// Find `#canvas`, or create a full-window one
    fn get_or_create_canvas(document: &web_sys::Document) -> HtmlCanvasElement {
        if let Some(el) = document.get_element_by_id("canvas") {
            return el.dyn_into().expect("#canvas is not a canvas");
        }

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .expect("Failed to create canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_id("canvas");
        let style = canvas.style();
        let _ = style.set_property("display", "block");
        let _ = style.set_property("width", "100vw");
        let _ = style.set_property("height", "100vh");
        document
            .body()
            .expect("no body")
            .append_child(&canvas)
            .expect("Failed to attach canvas");
        canvas
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Line Bounce starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas = get_or_create_canvas(&document);

        // Arena is the viewport at launch; resizes are not tracked
        let css_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let css_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        let dpr = window.device_pixel_ratio();
        let width = (css_w * dpr) as u32;
        let height = (css_h * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let demo = Rc::new(RefCell::new(Demo::new(Bounds::new(css_w, css_h), settings)));
        log::info!("Arena {}x{} (dpr {})", css_w, css_h, dpr);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, (css_w as f32, css_h as f32)).await;
        demo.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, demo.clone());

        start_frame_loop(demo);

        log::info!("Line Bounce running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, demo: Rc<RefCell<Demo>>) {
        // Pointer down - place an anchor
        {
            let demo = demo.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut d = demo.borrow_mut();
                let point = DVec2::new(event.offset_x() as f64, event.offset_y() as f64);
                d.input.pointer_down(point);
                // First gesture unlocks audio
                d.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move - guide line follows
        {
            let demo = demo.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let point = DVec2::new(event.offset_x() as f64, event.offset_y() as f64);
                demo.borrow_mut().input.pointer_move(point);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut d = demo.borrow_mut();
                match event.key().as_str() {
                    "m" | "M" => d.toggle_mute(),
                    "f" | "F" => d.toggle_flash(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Start the frame loop; one closure is reused for every frame
    fn start_frame_loop(demo: Rc<RefCell<Demo>>) {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let next = callback.clone();

        *callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
            {
                let mut d = demo.borrow_mut();
                d.update();
                d.render();
            }
            request_animation_frame(&next);
        }));

        request_animation_frame(&callback);
    }

    fn request_animation_frame(callback: &FrameCallback) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; frame loop stopped");
            return;
        };
        if let Some(closure) = callback.borrow().as_ref() {
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_demo::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Line Bounce (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate a minute at 60 Hz against a fixed segment and report the bounces
#[cfg(not(target_arch = "wasm32"))]
fn headless_run() {
    use glam::DVec2;
    use line_bounce::Settings;
    use line_bounce::sim::{Bounds, CollisionEvent, SimState, TickInput, tick};

    const TICKS: u32 = 60 * 60;

    let settings = Settings::load();
    let mut state = SimState::new(Bounds::new(1280.0, 720.0));
    let mut input = TickInput::default();
    input.pointer_down(DVec2::new(200.0, 500.0));
    input.pointer_down(DVec2::new(900.0, 450.0));
    input.pointer_move(DVec2::new(900.0, 300.0));

    let mut segment_hits = 0u32;
    let mut wall_hits = 0u32;
    let mut peak_speed = 0.0f64;

    for t in 0..TICKS {
        let events = if t == 0 {
            tick(&mut state, &input, &settings.physics)
        } else {
            tick(&mut state, &TickInput::default(), &settings.physics)
        };
        for event in events {
            match event {
                CollisionEvent::Segment => segment_hits += 1,
                CollisionEvent::Wall(_) => wall_hits += 1,
            }
        }
        peak_speed = peak_speed.max(state.ball.vel.length());
    }

    log::info!(
        "{} ticks: {} segment hits, {} wall hits, peak speed {:.2} px/tick",
        TICKS,
        segment_hits,
        wall_hits,
        peak_speed
    );
    log::info!(
        "Final ball at ({:.1}, {:.1}), velocity ({:.2}, {:.2})",
        state.ball.pos.x,
        state.ball.pos.y,
        state.ball.vel.x,
        state.ball.vel.y
    );
}

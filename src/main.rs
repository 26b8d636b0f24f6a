//! Spin Canvas entry point
//!
//! Web: binds the editor to `#canvas` and the control panel (`#add-btn`,
//! `#play-btn`, `#duration-input`, `#import-input`, `#download-btn`) and
//! drives it from `requestAnimationFrame`.
//!
//! Native: headless run. Loads a scene (or the example scene), plays it
//! through once at 60 Hz into a recording surface, clicks the center and
//! writes the export next to the working directory.
//!
//! ```text
//! spin-canvas [scene.json] [output-dir]
//! ```

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_editor {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{FileReader, HtmlCanvasElement, HtmlInputElement, MouseEvent};

    use spin_canvas::Editor;
    use spin_canvas::platform::{CanvasSurface, download_json, now_ms};
    use spin_canvas::settings::EditorSettings;

    /// Editor plus the canvas it draws on
    struct App {
        editor: Editor,
        surface: CanvasSurface,
        settings: EditorSettings,
        /// Outstanding `requestAnimationFrame` callback; at most one
        raf_id: Option<i32>,
    }

    impl App {
        /// Sync the editor with the canvas' CSS size and the device ratio
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let canvas = self.surface.canvas();
            self.editor.resize(
                canvas.client_width() as f64,
                canvas.client_height() as f64,
                window.device_pixel_ratio(),
            );
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Spin Canvas starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let settings = EditorSettings::load();
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            editor: Editor::new(&settings, seed),
            surface: CanvasSurface::new(canvas.clone())?,
            settings,
            raf_id: None,
        }));
        app.borrow_mut().resize();

        if let Some(input) = document
            .get_element_by_id("duration-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let duration = app.borrow().editor.timeline().duration();
            input.set_value_as_number(duration);
        }

        setup_canvas_handlers(&canvas, app.clone());
        setup_controls(app.clone());
        setup_teardown(app.clone());

        request_animation_frame(app);

        log::info!("Spin Canvas running!");
        Ok(())
    }

    fn setup_canvas_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Click: hit test and recolor
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let hit = {
                    let mut a = app.borrow_mut();
                    a.editor.click(event.offset_x() as f64, event.offset_y() as f64)
                };
                if hit.is_some() {
                    request_animation_frame(app.clone());
                }
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize();
                request_animation_frame(app.clone());
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_controls(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("add-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let added = app.borrow_mut().editor.add_rectangle();
                if added.is_ok() {
                    request_animation_frame(app.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("play-btn") {
            let app = app.clone();
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let playing = {
                    let mut a = app.borrow_mut();
                    a.editor.toggle_play_pause(now_ms());
                    a.editor.timeline().is_playing()
                };
                btn_clone.set_text_content(Some(if playing { "Pause" } else { "Play" }));
                request_animation_frame(app.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(input) = document
            .get_element_by_id("duration-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let app = app.clone();
            let input_clone = input.clone();
            let play_btn = document.get_element_by_id("play-btn");
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let value = input_clone.value_as_number();
                {
                    let mut a = app.borrow_mut();
                    a.editor.set_duration(value, now_ms());
                    let duration = a.editor.timeline().duration();
                    a.settings.default_duration = duration;
                    a.settings.save();
                    input_clone.set_value_as_number(duration);
                }
                if let Some(btn) = &play_btn {
                    btn.set_text_content(Some("Play"));
                }
                request_animation_frame(app.clone());
            });
            let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(input) = document
            .get_element_by_id("import-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let app = app.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(file) = input_clone.files().and_then(|files| files.get(0)) else {
                    return;
                };
                if let Err(e) = read_scene_file(&file, app.clone()) {
                    log::error!("Could not read {}: {:?}", file.name(), e);
                }
                input_clone.set_value("");
            });
            let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("download-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let export = app.borrow().editor.export();
                match export {
                    Ok(export) => {
                        if let Err(e) = download_json(&export) {
                            log::error!("Download failed: {:?}", e);
                        }
                    }
                    Err(e) => log::error!("Export failed: {}", e),
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Read a picked file and import it when loaded
    fn read_scene_file(file: &web_sys::File, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let reader = FileReader::new()?;
        let reader_clone = reader.clone();
        let onload = Closure::once(move |_event: web_sys::Event| {
            let Some(json) = reader_clone.result().ok().and_then(|v| v.as_string()) else {
                log::error!("Scene file is not text");
                return;
            };
            let imported = app.borrow_mut().editor.import_json(&json);
            if imported.is_ok() {
                request_animation_frame(app.clone());
            }
        });
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();
        reader.read_as_text(file)
    }

    /// Stop the loop for good when the page goes away
    fn setup_teardown(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            a.editor.shutdown();
            if let Some(id) = a.raf_id.take() {
                let _ = window_clone.cancel_animation_frame(id);
            }
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Make sure one refresh callback is outstanding. Event handlers and the
    /// loop itself all come through here, so there is never a second chain.
    fn request_animation_frame(app: Rc<RefCell<App>>) {
        if app.borrow().raf_id.is_some() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let app_clone = app.clone();
        let closure = Closure::once(move |time: f64| {
            editor_loop(app_clone, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => app.borrow_mut().raf_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    /// One display refresh: at most one tick, then re-request while the
    /// editor still has a frame pending
    fn editor_loop(app: Rc<RefCell<App>>, time: f64) {
        let pending = {
            let mut a = app.borrow_mut();
            a.raf_id = None;
            let App {
                editor, surface, ..
            } = &mut *a;
            editor.on_frame(time, surface);
            editor.frame_pending()
        };

        if pending {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_editor::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use spin_canvas::Editor;
    use spin_canvas::driver::TickOutcome;
    use spin_canvas::persistence::write_export;
    use spin_canvas::renderer::CommandList;
    use spin_canvas::settings::EditorSettings;

    /// Env var naming a settings JSON file
    const SETTINGS_ENV: &str = "SPIN_CANVAS_SETTINGS";
    const SURFACE_WIDTH: f64 = 800.0;
    const SURFACE_HEIGHT: f64 = 600.0;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Stop pumping after this many frames even if the timeline never ends
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args().skip(1);
        let scene_path = args.next().map(PathBuf::from);
        let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

        let settings = match std::env::var_os(SETTINGS_ENV) {
            Some(path) => EditorSettings::load_from(Path::new(&path))?,
            None => EditorSettings::default(),
        };
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();

        let mut editor = Editor::new(&settings, seed);
        editor.resize(SURFACE_WIDTH, SURFACE_HEIGHT, 1.0);

        if let Some(path) = &scene_path {
            let json = std::fs::read_to_string(path)?;
            editor.import_json(&json)?;
        }

        let mut surface = CommandList::default();
        let mut now = 0.0;
        editor.on_frame(now, &mut surface);

        editor.toggle_play_pause(now);
        let mut ticks = 0;
        while editor.frame_pending() && ticks < MAX_FRAMES {
            now += FRAME_MS;
            ticks += 1;
            if let Some(TickOutcome::Finished(_)) = editor.on_frame(now, &mut surface) {
                log::info!("Play-through finished after {} frames ({:.0} ms)", ticks, now);
            }
        }
        if editor.frame_pending() {
            log::warn!("Gave up after {} frames", ticks);
            editor.shutdown();
        }

        match editor.click(SURFACE_WIDTH / 2.0, SURFACE_HEIGHT / 2.0) {
            Some(id) => log::info!("Center click recolored {}", id),
            None => log::info!("Center click hit nothing"),
        }
        editor.on_frame(now, &mut surface);
        log::info!(
            "{} frames drawn, last one with {} commands",
            surface.frames,
            surface.commands.len()
        );

        let export = editor.export()?;
        let path = write_export(&out_dir, &export)?;
        println!("{}", path.display());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Spin Canvas (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

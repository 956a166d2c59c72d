//! Browser wiring for the trainer page.
//!
//! Expects these elements in the document:
//! - `#board-container` sized by CSS, holding the `#board` canvas
//! - `#editor` textarea with the grid description
//! - `#play` button toggling play/pause
//! - optional `#timer` and `#steps` elements for the countdown and step list
//!
//! A single `App` lives in a thread-local; every DOM callback borrows it for
//! the duration of one handler, so handlers never overlap.
use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlCanvasElement, HtmlElement, HtmlImageElement, HtmlTextAreaElement,
    Performance, Window, window,
};

use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::layout::Viewport;
use crate::plan::default_plan;
use crate::sequencer::SequencerEvent;
use crate::timer::Clock;
use crate::trainer::Trainer;

mod canvas;

use canvas::CanvasSurface;

/// Countdown refresh period. Only affects how smooth the display looks.
const TICK_INTERVAL_MS: i32 = 5;

/// `performance.now()`; reads 0 when the page has no performance object.
pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub fn new(win: &Window) -> Self {
        Self {
            performance: win.performance(),
        }
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.performance.as_ref().map(|p| p.now()).unwrap_or(0.0)
    }
}

struct App {
    trainer: Trainer<PerformanceClock>,
    surface: CanvasSurface,
    canvas: HtmlCanvasElement,
    container: HtmlElement,
    editor: HtmlTextAreaElement,
    play_button: HtmlElement,
    image: HtmlImageElement,
    timer_el: Option<Element>,
    steps_el: Option<Element>,
}

impl App {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn resize(&mut self) {
        self.canvas.set_width(self.container.offset_width().max(0) as u32);
        self.canvas.set_height(self.container.offset_height().max(0) as u32);
        self.redraw();
    }

    fn redraw(&mut self) {
        let viewport = self.viewport();
        self.trainer.draw(&mut self.surface, viewport);
    }

    fn refresh_timer(&self) {
        if let Some(el) = &self.timer_el {
            el.set_text_content(Some(&self.trainer.timer_text()));
        }
    }

    fn refresh_steps(&self) {
        if let Some(el) = &self.steps_el {
            el.set_text_content(Some(&self.trainer.step_list()));
        }
    }

    fn refresh_button(&self) {
        let label = if self.trainer.sequencer().is_playing() {
            "Pause"
        } else {
            "Play"
        };
        self.play_button.set_text_content(Some(label));
    }

    fn refresh_all(&mut self) {
        self.redraw();
        self.refresh_steps();
        self.refresh_button();
        self.refresh_timer();
    }

    fn on_tick(&mut self) {
        if let Some(event) = self.trainer.tick() {
            if event == SequencerEvent::Finished {
                tracing::info!("workout complete");
            }
            self.redraw();
            self.refresh_steps();
            self.refresh_button();
        }
        self.refresh_timer();
    }

    fn on_toggle(&mut self) {
        self.trainer.toggle();
        self.refresh_all();
    }

    fn on_edit(&mut self) {
        let text = self.editor.value();
        self.trainer.set_grid_text(&text);
        self.redraw();
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn element<T: JsCast>(doc: &Document, id: &str) -> Result<T> {
    doc.get_element_by_id(id)
        .ok_or_else(|| Error::Dom(format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| Error::Dom(format!("#{id} has an unexpected element type")))
}

fn dom_err(what: &str) -> impl Fn(JsValue) -> Error + '_ {
    move |err| Error::Dom(format!("{what}: {err:?}"))
}

/// Build the trainer on the current page and start ticking. Later calls do
/// nothing; the page keeps its first trainer.
#[wasm_bindgen]
pub fn start_trainer() -> std::result::Result<(), JsValue> {
    Ok(mount()?)
}

fn mount() -> Result<()> {
    if APP.with(|cell| cell.borrow().is_some()) {
        tracing::debug!("trainer already mounted");
        return Ok(());
    }
    let win = window().ok_or_else(|| Error::Dom("no window".into()))?;
    let doc = win
        .document()
        .ok_or_else(|| Error::Dom("no document".into()))?;

    let canvas: HtmlCanvasElement = element(&doc, "board")?;
    let container: HtmlElement = element(&doc, "board-container")?;
    let editor: HtmlTextAreaElement = element(&doc, "editor")?;
    let play_button: HtmlElement = element(&doc, "play")?;
    let ctx = canvas
        .get_context("2d")
        .map_err(dom_err("canvas context"))?
        .ok_or_else(|| Error::Dom("canvas has no 2d context".into()))?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| Error::Dom("unexpected 2d context type".into()))?;
    let image = HtmlImageElement::new().map_err(dom_err("board image"))?;

    let config = RenderConfig::default();
    let mut trainer = Trainer::new(PerformanceClock::new(&win), config.clone());
    trainer.load_plan(default_plan());
    editor.set_value(trainer.grid_text());

    let mut app = App {
        trainer,
        surface: CanvasSurface::new(ctx, image.clone(), config),
        canvas: canvas.clone(),
        container,
        editor: editor.clone(),
        play_button: play_button.clone(),
        image: image.clone(),
        timer_el: doc.get_element_by_id("timer"),
        steps_el: doc.get_element_by_id("steps"),
    };
    app.resize();
    app.refresh_all();
    APP.with(|cell| cell.replace(Some(app)));

    listen(win.as_ref(), "resize", || {
        with_app(App::resize);
    })?;
    listen(image.as_ref(), "load", || {
        with_app(App::resize);
    })?;
    listen(editor.as_ref(), "input", || {
        with_app(App::on_edit);
    })?;
    listen(play_button.as_ref(), "click", || {
        with_app(App::on_toggle);
    })?;

    let tick = Closure::wrap(Box::new(|| {
        with_app(App::on_tick);
    }) as Box<dyn FnMut()>);
    win.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        TICK_INTERVAL_MS,
    )
    .map_err(dom_err("setInterval"))?;
    tick.forget();

    tracing::info!("trainer mounted");
    Ok(())
}

fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    mut handler: impl FnMut() + 'static,
) -> Result<()> {
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| handler())
        as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(dom_err(event))?;
    closure.forget();
    Ok(())
}

/// Replace the running plan with one declared as JSON.
#[wasm_bindgen]
pub fn load_plan_json(json: &str) -> std::result::Result<(), JsValue> {
    let loaded = with_app(|app| -> Result<()> {
        app.trainer.load_plan_json(json)?;
        app.editor.set_value(app.trainer.grid_text());
        app.refresh_all();
        Ok(())
    })
    .ok_or_else(|| Error::Dom("trainer not started".into()))?;
    Ok(loaded?)
}

/// Show a picture of the physical board behind the grid.
#[wasm_bindgen]
pub fn set_board_image(url: &str) -> std::result::Result<(), JsValue> {
    with_app(|app| app.image.set_src(url))
        .ok_or_else(|| Error::Dom("trainer not started".into()))?;
    Ok(())
}

/// Play/pause from script, same as clicking `#play`.
#[wasm_bindgen]
pub fn toggle_playback() {
    with_app(App::on_toggle);
}

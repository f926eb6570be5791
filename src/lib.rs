//! scrollstory: scroll-driven narrative charts for the browser.
//!
//! The core (step activation, chart routines, progress, lazy images, debounce) is
//! written against the [`surface::Surface`] and [`schedule::Scheduler`] seams and runs
//! anywhere. The `wasm` module binds those seams to the DOM and browser timers.

pub mod animation;
pub mod band;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod lazy;
pub mod progress;
pub mod schedule;
pub mod storyboard;
pub mod surface;
pub mod telemetry;

pub use config::{StaggerPolicy, StoryConfig, StoryVariant};
pub use controller::ScrollController;
pub use error::{StoryError, StoryResult};
pub use storyboard::{Routine, Storyboard};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;

    use gloo::events::EventListener;
    use wasm_bindgen::prelude::*;

    use crate::error::StoryError;

    pub mod app;
    pub mod dom;
    pub mod observer;
    pub mod timers;

    thread_local! {
        static APP: RefCell<Option<app::App>> = const { RefCell::new(None) };
    }

    fn mount() -> Result<(), StoryError> {
        let app = app::App::boot()?;
        APP.with(|slot| *slot.borrow_mut() = Some(app));
        Ok(())
    }

    /// `true` while the document is still parsing, before `DOMContentLoaded`.
    pub fn document_is_loading(document: &web_sys::Document) -> bool {
        document.ready_state() == "loading"
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if document_is_loading(&document) {
            EventListener::once(&document, "DOMContentLoaded", |_| {
                if let Err(err) = mount() {
                    web_sys::console::error_1(&JsValue::from(err));
                }
            })
            .forget();
        } else {
            mount()?;
        }
        Ok(())
    }

    /// Removes every listener and observer and cancels pending animations.
    #[wasm_bindgen]
    pub fn teardown() {
        APP.with(|slot| slot.borrow_mut().take());
    }

    /// The step most recently activated, if any.
    #[wasm_bindgen(js_name = currentStep)]
    pub fn current_step() -> Option<u32> {
        APP.with(|slot| slot.borrow().as_ref().and_then(app::App::current_step))
    }
}

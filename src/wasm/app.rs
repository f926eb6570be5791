use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use tracing::{debug, info, warn};
use web_sys::{Document, Window};

use super::dom::DomSurface;
use super::observer::ViewportObserver;
use super::timers::TimeoutScheduler;
use crate::config::{StoryConfig, CONFIG_ATTRIBUTE};
use crate::controller::ScrollController;
use crate::debounce::{Debounced, Edge};
use crate::error::{StoryError, StoryResult};
use crate::lazy::LazyLoader;
use crate::progress::{ProgressIndicator, ScrollMetrics};
use crate::storyboard::Storyboard;
use crate::surface::Surface;
use crate::telemetry;

type Controller = ScrollController<DomSurface, TimeoutScheduler>;

/// Everything the page runs, with every subscription it holds.
///
/// Dropping the app disconnects its observers, removes its listeners and cancels
/// in-flight stagger timers.
pub struct App {
    controller: Rc<RefCell<Controller>>,
    _step_observer: Option<ViewportObserver>,
    _image_observer: Option<ViewportObserver>,
    _listeners: Vec<EventListener>,
}

fn scroll_metrics(window: &Window, document: &Document) -> ScrollMetrics {
    ScrollMetrics {
        offset: window.scroll_y().unwrap_or(0.0),
        document_height: document
            .document_element()
            .map(|root| f64::from(root.scroll_height()))
            .unwrap_or(0.0),
        viewport_height: window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0),
    }
}

fn read_config(surface: &DomSurface) -> (StoryConfig, Option<StoryError>) {
    let raw = surface
        .body()
        .and_then(|body| surface.attribute(&body, CONFIG_ATTRIBUTE));
    match raw.as_deref().map(StoryConfig::from_json) {
        None => (StoryConfig::default(), None),
        Some(Ok(config)) => (config, None),
        Some(Err(err)) => (StoryConfig::default(), Some(err)),
    }
}

impl App {
    pub fn boot() -> StoryResult<Self> {
        let window = web_sys::window().ok_or(StoryError::MissingWindow)?;
        let surface = Rc::new(DomSurface::from_window()?);
        let document = surface.document().clone();

        let (config, config_error) = read_config(&surface);
        let _ = telemetry::init_default_tracing(&config.log_level);
        if let Some(err) = config_error {
            warn!(error = %err, "ignoring page config; using defaults");
        }

        let can_observe = ViewportObserver::is_supported(&window);
        let controller = Rc::new(RefCell::new(ScrollController::new(
            Rc::clone(&surface),
            TimeoutScheduler,
            Storyboard::for_variant(config.variant),
            &config,
        )));

        let step_observer = if can_observe {
            let handler = Rc::clone(&controller);
            let margin = controller.borrow().band().root_margin();
            let observer = ViewportObserver::new(Some(margin.as_str()), move |batch, _| {
                handler.borrow_mut().on_observations(batch);
            })?;
            for step in controller.borrow().steps() {
                observer.observe(step);
            }
            Some(observer)
        } else {
            warn!("IntersectionObserver unavailable; steps will not activate");
            None
        };

        controller.borrow().on_load();

        let mut listeners = Vec::new();
        for anchor in surface.select("a[href^=\"#\"]") {
            let handler = Rc::clone(&controller);
            let link = anchor.clone();
            listeners.push(EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    if let Some(href) = link.get_attribute("href") {
                        handler.borrow().follow_anchor(&href);
                    }
                },
            ));
        }

        {
            let handler = Rc::clone(&controller);
            let window_for_scroll = window.clone();
            listeners.push(EventListener::new(&window, "scroll", move |_| {
                let offset = window_for_scroll.scroll_y().unwrap_or(0.0);
                handler.borrow().handle_scroll(offset);
            }));
        }

        match ProgressIndicator::install(Rc::clone(&surface)) {
            Ok(progress) => {
                let window_for_progress = window.clone();
                let document = document.clone();
                listeners.push(EventListener::new(&window, "scroll", move |_| {
                    progress.update(scroll_metrics(&window_for_progress, &document));
                }));
            }
            Err(err @ StoryError::DuplicateIndicator { .. }) => {
                warn!(error = %err, "progress indicator not installed");
            }
            Err(err) => return Err(err),
        }

        let image_observer = if config.lazy_images {
            let loader = Rc::new(LazyLoader::new(Rc::clone(&surface), can_observe));
            if can_observe {
                let resolver = Rc::clone(&loader);
                let observer = ViewportObserver::new(None, move |batch, observer| {
                    for entry in batch.iter().filter(|entry| entry.is_intersecting) {
                        if resolver.resolve(&entry.target) {
                            observer.unobserve(&entry.target);
                        }
                    }
                })?;
                for image in loader.images() {
                    observer.observe(image);
                }
                Some(observer)
            } else {
                None
            }
        } else {
            None
        };

        if let Some(body) = surface.body() {
            surface.add_class(&body, "loaded");
        }

        let resize = Debounced::new(
            TimeoutScheduler,
            config.resize_debounce_ms,
            Edge::Leading,
            |()| debug!("window resized, recalculating"),
        );
        listeners.push(EventListener::new(&window, "resize", move |_| resize.call(())));

        info!(
            steps = controller.borrow().steps().len(),
            variant = ?config.variant,
            "scrollytelling experience initialized"
        );

        Ok(Self {
            controller,
            _step_observer: step_observer,
            _image_observer: image_observer,
            _listeners: listeners,
        })
    }

    pub fn current_step(&self) -> Option<u32> {
        self.controller.borrow().current_step()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.controller.borrow_mut().teardown();
    }
}

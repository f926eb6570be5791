use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::band::Observation;
use crate::error::StoryResult;

type EntriesCallback = dyn FnMut(js_sys::Array, IntersectionObserver);

/// An `IntersectionObserver` that disconnects when dropped.
pub struct ViewportObserver {
    observer: IntersectionObserver,
    _callback: Closure<EntriesCallback>,
}

impl ViewportObserver {
    /// `true` when the browser provides `IntersectionObserver`.
    pub fn is_supported(window: &web_sys::Window) -> bool {
        js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
    }

    /// Observes the viewport shrunk by `root_margin`, with a zero threshold.
    pub fn new(
        root_margin: Option<&str>,
        mut on_batch: impl FnMut(&[Observation<Element>], &IntersectionObserver) + 'static,
    ) -> StoryResult<Self> {
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let batch: Vec<Observation<Element>> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| Observation {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();
                on_batch(&batch, &observer);
            },
        ) as Box<EntriesCallback>);

        let init = IntersectionObserverInit::new();
        if let Some(margin) = root_margin {
            init.set_root_margin(margin);
        }
        init.set_threshold(&JsValue::from_f64(0.0));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, target: &Element) {
        self.observer.observe(target);
    }
}

impl Drop for ViewportObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

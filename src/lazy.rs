//! Deferred image loading.

use std::rc::Rc;

use tracing::debug;

use crate::surface::{Selector, Surface};

pub const PENDING_SOURCE: &str = "data-src";
pub const DEFERRED_IMAGE: Selector = Selector::tag_with_attribute("img", PENDING_SOURCE);

pub struct LazyLoader<S: Surface> {
    surface: Rc<S>,
    images: Vec<S::Node>,
}

impl<S: Surface> LazyLoader<S> {
    /// Collects the deferred images present now. Without viewport observation every
    /// image is resolved immediately.
    pub fn new(surface: Rc<S>, can_observe: bool) -> Self {
        let images = surface.query_all(None, &DEFERRED_IMAGE);
        let loader = Self { surface, images };
        if !can_observe {
            let resolved = loader.images.iter().filter(|img| loader.resolve(img)).count();
            debug!(resolved, "viewport observation unavailable; loaded images eagerly");
        }
        loader
    }

    /// Images to hand to the viewport observer.
    pub fn images(&self) -> &[S::Node] {
        &self.images
    }

    /// Moves the pending source into `src`. Returns `false` if the image already loaded.
    pub fn resolve(&self, image: &S::Node) -> bool {
        let Some(source) = self.surface.attribute(image, PENDING_SOURCE) else {
            return false;
        };
        self.surface.set_attribute(image, "src", &source);
        self.surface.remove_attribute(image, PENDING_SOURCE);
        true
    }
}

//! The activation band: the horizontal strip of the viewport a step must enter to
//! become current.

/// Vertical extent of an element relative to the top of the viewport, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f64,
    pub bottom: f64,
}

impl Span {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationBand {
    inset_percent: f64,
}

impl Default for ActivationBand {
    fn default() -> Self {
        Self::new(40.0)
    }
}

impl ActivationBand {
    pub fn new(inset_percent: f64) -> Self {
        Self {
            inset_percent: inset_percent.clamp(0.0, 49.9),
        }
    }

    pub fn inset_percent(&self) -> f64 {
        self.inset_percent
    }

    /// `rootMargin` for an `IntersectionObserver` rooted at the viewport.
    pub fn root_margin(&self) -> String {
        let inset = self.inset_percent;
        format!("-{inset}% 0px -{inset}% 0px")
    }

    /// Top and bottom edges of the band for a viewport of `viewport_height`.
    pub fn bounds(&self, viewport_height: f64) -> Span {
        let inset = viewport_height * self.inset_percent / 100.0;
        Span {
            top: inset,
            bottom: viewport_height - inset,
        }
    }

    /// Zero-threshold intersection: any overlap with the band counts, edge contact included.
    pub fn contains(&self, span: Span, viewport_height: f64) -> bool {
        let band = self.bounds(viewport_height);
        span.top <= band.bottom && span.bottom >= band.top
    }
}

/// One change in intersection state, as an `IntersectionObserver` would report it.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation<N> {
    pub target: N,
    pub is_intersecting: bool,
}

/// Replays `IntersectionObserver` change reporting from element geometry.
///
/// The first update reports every target; later updates report only targets whose
/// state flipped.
#[derive(Debug, Clone)]
pub struct IntersectionTracker<N> {
    band: ActivationBand,
    states: Vec<(N, bool)>,
}

impl<N: Clone + PartialEq> IntersectionTracker<N> {
    pub fn new(band: ActivationBand) -> Self {
        Self {
            band,
            states: Vec::new(),
        }
    }

    pub fn update(
        &mut self,
        targets: impl IntoIterator<Item = (N, Span)>,
        viewport_height: f64,
    ) -> Vec<Observation<N>> {
        let mut changes = Vec::new();
        for (target, span) in targets {
            let now = self.band.contains(span, viewport_height);
            match self.states.iter_mut().find(|(n, _)| *n == target) {
                Some((_, was)) if *was == now => {}
                Some((_, was)) => {
                    *was = now;
                    changes.push(Observation {
                        target,
                        is_intersecting: now,
                    });
                }
                None => {
                    self.states.push((target.clone(), now));
                    changes.push(Observation {
                        target,
                        is_intersecting: now,
                    });
                }
            }
        }
        changes
    }
}

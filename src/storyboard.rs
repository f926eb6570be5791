//! Step ordinal to animation routine tables.

use std::collections::BTreeMap;

use crate::config::StoryVariant;
use crate::surface::Selector;

/// Class that marks steps, containers and most chart children as shown.
pub const ACTIVE: &str = "active";
/// Class the battle bars grow on.
pub const ANIMATE: &str = "animate";

/// A terminal mutation applied to every matched child at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    AddClass(&'static str),
    Style {
        property: &'static str,
        value: &'static str,
    },
    Attributes(&'static [(&'static str, &'static str)]),
}

/// What one step does to its chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routine {
    /// Unknown ordinal: nothing happens.
    Noop,
    /// Activate the container, then the first match of each selector at once.
    Reveal {
        chart: &'static str,
        firsts: &'static [Selector],
    },
    /// Mark children one timer at a time, `index * step_ms` after activation.
    ///
    /// `index` counts every child matched by `items`, so skipped children still
    /// take their slot. A child at `index` also marks the `companions` match at the
    /// same index, when one exists.
    Stagger {
        chart: &'static str,
        items: Selector,
        companions: Option<Selector>,
        /// Only the first `limit` children take part.
        limit: Option<usize>,
        /// Only children carrying this class take part.
        only_tagged: Option<&'static str>,
        step_ms: u32,
        mark: &'static str,
        activate_chart: bool,
    },
    /// Apply `mutation` to every match immediately.
    Highlight {
        chart: &'static str,
        items: Selector,
        mutation: Mutation,
    },
}

impl Routine {
    pub fn chart(&self) -> Option<&'static str> {
        match self {
            Routine::Noop => None,
            Routine::Reveal { chart, .. }
            | Routine::Stagger { chart, .. }
            | Routine::Highlight { chart, .. } => Some(*chart),
        }
    }
}

const fn stagger(
    chart: &'static str,
    items: Selector,
    limit: Option<usize>,
    step_ms: u32,
) -> Routine {
    Routine::Stagger {
        chart,
        items,
        companions: None,
        limit,
        only_tagged: None,
        step_ms,
        mark: ACTIVE,
        activate_chart: false,
    }
}

const TIMELINE_LINE: Selector = Selector::classes(&["timeline-line"]);
const TIMELINE_EVENT: Selector = Selector::classes(&["timeline-event"]);
const TERRITORY: Selector = Selector::classes(&["territory"]);
const BATTLE_BAR: Selector = Selector::classes(&["battle-bar"]);
const REFORM_CARD: Selector = Selector::classes(&["reform-card"]);
const DECLINE_LINE: Selector = Selector::classes(&["decline-line"]);
const DECLINE_POINT: Selector = Selector::classes(&["decline-point"]);
const DECLINE_LABEL: Selector = Selector::classes(&["decline-label"]);

const fn decline(limit: Option<usize>, step_ms: u32) -> Routine {
    Routine::Stagger {
        chart: "chart-5",
        items: DECLINE_POINT,
        companions: Some(DECLINE_LABEL),
        limit,
        only_tagged: None,
        step_ms,
        mark: ACTIVE,
        activate_chart: false,
    }
}

const EMPIRE: [(u32, Routine); 16] = [
    // Timeline
    (
        1,
        Routine::Reveal {
            chart: "chart-1",
            firsts: &[TIMELINE_LINE, TIMELINE_EVENT],
        },
    ),
    (2, stagger("chart-1", TIMELINE_EVENT, Some(3), 200)),
    (3, stagger("chart-1", TIMELINE_EVENT, None, 150)),
    // Territory
    (
        4,
        Routine::Reveal {
            chart: "chart-2",
            firsts: &[Selector::classes(&["territory", "france"])],
        },
    ),
    (5, stagger("chart-2", TERRITORY, None, 150)),
    (
        6,
        Routine::Highlight {
            chart: "chart-2",
            items: Selector::classes(&["territory", "expansion"]),
            mutation: Mutation::AddClass(ACTIVE),
        },
    ),
    // Battles
    (
        7,
        Routine::Stagger {
            chart: "chart-3",
            items: BATTLE_BAR,
            companions: None,
            limit: None,
            only_tagged: Some("victory"),
            step_ms: 200,
            mark: ANIMATE,
            activate_chart: true,
        },
    ),
    (
        8,
        Routine::Stagger {
            chart: "chart-3",
            items: BATTLE_BAR,
            companions: None,
            limit: None,
            only_tagged: None,
            step_ms: 150,
            mark: ANIMATE,
            activate_chart: false,
        },
    ),
    (
        9,
        Routine::Highlight {
            chart: "chart-3",
            items: Selector::classes(&["battle-bar", "defeat"]),
            mutation: Mutation::Style {
                property: "transform",
                value: "scaleY(1) scaleX(1.1)",
            },
        },
    ),
    // Reforms
    (
        10,
        Routine::Reveal {
            chart: "chart-4",
            firsts: &[REFORM_CARD],
        },
    ),
    (11, stagger("chart-4", REFORM_CARD, Some(3), 200)),
    (12, stagger("chart-4", REFORM_CARD, None, 150)),
    // Decline
    (
        13,
        Routine::Reveal {
            chart: "chart-5",
            firsts: &[DECLINE_LINE, DECLINE_POINT, DECLINE_LABEL],
        },
    ),
    (14, decline(Some(3), 200)),
    (15, decline(Some(4), 150)),
    (16, decline(None, 100)),
];

const NETWORK_NODE: Selector = Selector::classes(&["network-node"]);
const BAR: Selector = Selector::classes(&["bar"]);
const CIRCLE: Selector = Selector::classes(&["circle"]);

const NETWORK: [(u32, Routine); 9] = [
    (
        1,
        Routine::Reveal {
            chart: "chart-1",
            firsts: &[Selector::classes(&["network-link"]), NETWORK_NODE],
        },
    ),
    (2, stagger("chart-1", NETWORK_NODE, Some(4), 100)),
    (
        3,
        Routine::Highlight {
            chart: "chart-1",
            items: Selector::classes(&["network-node", "hub"]),
            mutation: Mutation::AddClass(ACTIVE),
        },
    ),
    (
        4,
        Routine::Reveal {
            chart: "chart-2",
            firsts: &[BAR],
        },
    ),
    (5, stagger("chart-2", BAR, None, 150)),
    (
        6,
        Routine::Highlight {
            chart: "chart-2",
            items: Selector::classes(&["bar", "peak"]),
            mutation: Mutation::Style {
                property: "transform",
                value: "scaleY(1.05)",
            },
        },
    ),
    (
        7,
        Routine::Reveal {
            chart: "chart-3",
            firsts: &[CIRCLE],
        },
    ),
    (8, stagger("chart-3", CIRCLE, None, 200)),
    (
        9,
        Routine::Highlight {
            chart: "chart-3",
            items: Selector::classes(&["circle", "highlight"]),
            mutation: Mutation::Attributes(&[("r", "24"), ("fill", "#e4572e")]),
        },
    ),
];

/// Closed dispatch table from step ordinal to routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storyboard {
    routines: BTreeMap<u32, Routine>,
}

impl Storyboard {
    pub fn for_variant(variant: StoryVariant) -> Self {
        match variant {
            StoryVariant::Empire => Self::empire(),
            StoryVariant::Network => Self::network(),
        }
    }

    pub fn empire() -> Self {
        Self::from_entries(EMPIRE)
    }

    pub fn network() -> Self {
        Self::from_entries(NETWORK)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (u32, Routine)>) -> Self {
        Self {
            routines: entries.into_iter().collect(),
        }
    }

    /// The routine for `ordinal`; unknown ordinals resolve to [`Routine::Noop`].
    pub fn routine(&self, ordinal: u32) -> Routine {
        self.routines.get(&ordinal).copied().unwrap_or(Routine::Noop)
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}

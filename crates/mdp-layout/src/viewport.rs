// ABOUTME: Viewport width tracking and responsive expand levels.
// ABOUTME: Maps the current viewport width onto how many panes are visible.

use mdp_core::Breakpoints;

/// How many panes are visible side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExpandLevel {
    /// Editor only, full width
    Single,
    /// Editor and set pane; the set pane absorbs the preview's space
    Double,
    /// Editor, set and preview
    Triple,
}

impl ExpandLevel {
    /// Pick the level for a viewport width
    pub fn for_width(width: f32, breakpoints: &Breakpoints) -> Self {
        if width >= breakpoints.three_pane {
            ExpandLevel::Triple
        } else if width >= breakpoints.two_pane {
            ExpandLevel::Double
        } else {
            ExpandLevel::Single
        }
    }

    /// Numeric level: 0, 1 or 2
    pub fn index(self) -> u8 {
        match self {
            ExpandLevel::Single => 0,
            ExpandLevel::Double => 1,
            ExpandLevel::Triple => 2,
        }
    }

    /// Number of pane floors that must fit to the right of the first divider
    pub fn floors_after_editor(self) -> f32 {
        self.index() as f32
    }

    pub fn visible_panes(self) -> usize {
        self.index() as usize + 1
    }
}

/// Latest viewport reading and the level derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub max_width: f32,
    pub level: ExpandLevel,
}

/// Turns raw viewport widths into [`Viewport`] readings
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    breakpoints: Breakpoints,
    current: Option<Viewport>,
}

impl ViewportTracker {
    pub fn new(breakpoints: Breakpoints) -> Self {
        Self {
            breakpoints,
            current: None,
        }
    }

    /// Record a new viewport width. Returns the reading and whether the level changed.
    pub fn observe(&mut self, width: f32) -> (Viewport, bool) {
        let width = width.max(0.0);
        let viewport = Viewport {
            max_width: width,
            level: ExpandLevel::for_width(width, &self.breakpoints),
        };
        let level_changed = self.current.map(|v| v.level) != Some(viewport.level);
        self.current = Some(viewport);
        (viewport, level_changed)
    }

    pub fn current(&self) -> Option<Viewport> {
        self.current
    }
}

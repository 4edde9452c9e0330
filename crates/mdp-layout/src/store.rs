// ABOUTME: Stored pane widths and the widths derived from them for rendering.
// ABOUTME: Only the editor width and the editor+set width are independently settable.

use crate::viewport::ExpandLevel;

/// The two controlled quantities of the split view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneWidthStore {
    /// Width of the editor pane (position of the first divider)
    pane_a: f32,
    /// Combined width of editor and set panes (position of the second divider)
    pane_ab: f32,
}

impl PaneWidthStore {
    pub fn new(pane_a: f32, pane_ab: f32) -> Self {
        Self { pane_a, pane_ab }
    }

    pub fn pane_a(&self) -> f32 {
        self.pane_a
    }

    pub fn pane_ab(&self) -> f32 {
        self.pane_ab
    }

    /// Unvalidated; callers route values through the resolver or drag clamps.
    pub fn set_pane_a_width(&mut self, width: f32) {
        self.pane_a = width;
    }

    /// Unvalidated; callers route values through the resolver or drag clamps.
    pub fn set_pane_ab_width(&mut self, width: f32) {
        self.pane_ab = width;
    }

    pub fn derive(&self, level: ExpandLevel) -> PaneWidths {
        derive_pane_widths(self.pane_a, self.pane_ab, level)
    }
}

/// Widths handed to the pane collaborators.
///
/// The preview pane has no entry: it takes whatever space remains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneWidths {
    pub editor: f32,
    pub set: f32,
}

/// Pure derivation of rendered widths from the stored pair.
pub fn derive_pane_widths(pane_a: f32, pane_ab: f32, level: ExpandLevel) -> PaneWidths {
    let set = if level > ExpandLevel::Double {
        pane_ab - pane_a
    } else {
        pane_a
    };
    PaneWidths {
        editor: pane_a,
        set,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_panes_split_the_combined_width() {
        let store = PaneWidthStore::new(350.0, 650.0);
        let widths = store.derive(ExpandLevel::Triple);
        assert_eq!(widths.editor, 350.0);
        assert_eq!(widths.set, 300.0);
    }

    #[test]
    fn fewer_panes_mirror_the_editor_width() {
        let store = PaneWidthStore::new(350.0, 650.0);
        assert_eq!(store.derive(ExpandLevel::Double).set, 350.0);
        assert_eq!(store.derive(ExpandLevel::Single).set, 350.0);
    }

    #[test]
    fn setters_do_not_validate() {
        let mut store = PaneWidthStore::new(350.0, 650.0);
        store.set_pane_a_width(-5.0);
        store.set_pane_ab_width(10_000.0);
        assert_eq!(store.pane_a(), -5.0);
        assert_eq!(store.pane_ab(), 10_000.0);
    }
}

// ABOUTME: Divider drag state machine for the split view.
// ABOUTME: Translates pointer deltas into clamped pane widths for either divider.

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::InputSource;
use crate::listeners::{ListenerError, ListenerKind, ListenerRegistry, Subscription};
use crate::resolver::{clamp_width, Constraints};
use crate::store::PaneWidthStore;
use crate::viewport::ExpandLevel;

/// A draggable divider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Between the editor and the set pane
    EditorSet,
    /// Between the set pane and the preview
    SetPreview,
}

impl Handle {
    /// Dividers only exist while both neighbouring panes are shown
    pub fn is_visible(self, level: ExpandLevel) -> bool {
        match self {
            Handle::EditorSet => level > ExpandLevel::Single,
            Handle::SetPreview => level > ExpandLevel::Double,
        }
    }
}

/// Snapshot taken when a gesture starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    pub pointer_x: f32,
    pub pane_a: f32,
    pub pane_ab: f32,
}

impl DragOrigin {
    pub fn capture(pointer_x: f32, store: &PaneWidthStore) -> Self {
        Self {
            pointer_x,
            pane_a: store.pane_a(),
            pane_ab: store.pane_ab(),
        }
    }
}

#[derive(Debug)]
pub struct ActiveDrag {
    pub handle: Handle,
    pub origin: DragOrigin,
    pub source: InputSource,
    last_x: f32,
    // Move/end listeners stay attached exactly as long as the gesture.
    _listeners: Subscription,
}

#[derive(Debug, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Apply a divider movement of `delta` pixels relative to `origin`.
///
/// Returns `false` when the move is refused and nothing changed.
pub fn apply_drag(
    handle: Handle,
    delta: f32,
    origin: &DragOrigin,
    store: &mut PaneWidthStore,
    constraints: &Constraints,
) -> bool {
    let min = constraints.min_pane_width;
    match handle {
        Handle::EditorSet => {
            let proposed = origin.pane_a + delta;
            let pane_a = clamp_width(proposed, min, constraints.max_pane_a());

            // Push the second divider along so the set pane keeps its floor.
            if constraints.level == ExpandLevel::Triple && store.pane_ab() - pane_a < min {
                store.set_pane_ab_width(clamp_width(
                    proposed + min,
                    min,
                    constraints.max_pane_ab(),
                ));
            }
            store.set_pane_a_width(pane_a);
            true
        }
        Handle::SetPreview => {
            let proposed = origin.pane_ab + delta;
            if proposed < 2.0 * min {
                return false;
            }
            if proposed - store.pane_a() < min {
                store.set_pane_a_width(proposed - min);
            }
            let floor = min.max(constraints.min_combined_pane_width);
            store.set_pane_ab_width(clamp_width(proposed, floor, constraints.max_pane_ab()));
            true
        }
    }
}

/// Owns the current gesture, if any
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn active_handle(&self) -> Option<Handle> {
        match &self.state {
            DragState::Dragging(drag) => Some(drag.handle),
            DragState::Idle => None,
        }
    }

    pub fn origin(&self) -> Option<DragOrigin> {
        match &self.state {
            DragState::Dragging(drag) => Some(drag.origin),
            DragState::Idle => None,
        }
    }

    /// Start a gesture on `handle`. Returns `Ok(false)` if one is already running.
    pub fn begin(
        &mut self,
        handle: Handle,
        pointer_x: f32,
        source: InputSource,
        store: &PaneWidthStore,
        registry: &Rc<RefCell<ListenerRegistry>>,
    ) -> Result<bool, ListenerError> {
        if self.is_dragging() {
            return Ok(false);
        }
        let listeners = Subscription::acquire(registry, &ListenerKind::DRAG)?;
        let origin = DragOrigin::capture(pointer_x, store);
        tracing::debug!(?handle, ?source, ?origin, "Drag started");
        self.state = DragState::Dragging(ActiveDrag {
            handle,
            origin,
            source,
            last_x: pointer_x,
            _listeners: listeners,
        });
        Ok(true)
    }

    /// Feed a pointer position. Returns whether the store changed.
    pub fn update(
        &mut self,
        pointer_x: f32,
        store: &mut PaneWidthStore,
        constraints: &Constraints,
    ) -> bool {
        let DragState::Dragging(drag) = &mut self.state else {
            return false;
        };
        drag.last_x = pointer_x;
        let delta = pointer_x - drag.origin.pointer_x;
        let applied = apply_drag(drag.handle, delta, &drag.origin, store, constraints);
        tracing::trace!(
            handle = ?drag.handle,
            delta,
            applied,
            pane_a = store.pane_a(),
            pane_ab = store.pane_ab(),
            "Drag move"
        );
        applied
    }

    /// Finish the gesture and release its listeners.
    ///
    /// Returns a snapshot of the settled widths, which is exactly what the
    /// next gesture will start from.
    pub fn end(&mut self, store: &PaneWidthStore) -> Option<DragOrigin> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(drag) => {
                let settled = DragOrigin::capture(drag.last_x, store);
                tracing::debug!(handle = ?drag.handle, source = ?drag.source, ?settled, "Drag ended");
                Some(settled)
            }
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple() -> Constraints {
        Constraints {
            min_pane_width: 192.0,
            min_combined_pane_width: 386.0,
            max_width: 1200.0,
            level: ExpandLevel::Triple,
        }
    }

    fn origin(store: &PaneWidthStore) -> DragOrigin {
        DragOrigin::capture(100.0, store)
    }

    #[test]
    fn handle_visibility_follows_level() {
        assert!(!Handle::EditorSet.is_visible(ExpandLevel::Single));
        assert!(Handle::EditorSet.is_visible(ExpandLevel::Double));
        assert!(!Handle::SetPreview.is_visible(ExpandLevel::Double));
        assert!(Handle::SetPreview.is_visible(ExpandLevel::Triple));
    }

    #[test]
    fn first_divider_pushes_second_past_the_editor() {
        let mut store = PaneWidthStore::new(350.0, 650.0);
        let o = origin(&store);
        assert!(apply_drag(Handle::EditorSet, 500.0, &o, &mut store, &triple()));
        assert_eq!(store.pane_a(), 816.0);
        assert_eq!(store.pane_ab(), 1008.0);
    }

    #[test]
    fn first_divider_stops_at_floor() {
        let mut store = PaneWidthStore::new(350.0, 650.0);
        let o = origin(&store);
        apply_drag(Handle::EditorSet, -300.0, &o, &mut store, &triple());
        assert_eq!(store.pane_a(), 192.0);
        assert_eq!(store.pane_ab(), 650.0);
    }

    #[test]
    fn first_divider_in_two_pane_mode_leaves_second_alone() {
        let constraints = Constraints {
            max_width: 800.0,
            level: ExpandLevel::Double,
            ..triple()
        };
        let mut store = PaneWidthStore::new(350.0, 650.0);
        let o = origin(&store);
        apply_drag(Handle::EditorSet, 400.0, &o, &mut store, &constraints);
        assert_eq!(store.pane_a(), 608.0);
        assert_eq!(store.pane_ab(), 650.0);
    }

    #[test]
    fn second_divider_refuses_to_cross_double_floor() {
        let mut store = PaneWidthStore::new(350.0, 650.0);
        let o = origin(&store);
        assert!(!apply_drag(Handle::SetPreview, -700.0, &o, &mut store, &triple()));
        assert!(!apply_drag(Handle::SetPreview, -267.0, &o, &mut store, &triple()));
        assert_eq!(store, PaneWidthStore::new(350.0, 650.0));
    }

    #[test]
    fn second_divider_pushes_editor_back() {
        let mut store = PaneWidthStore::new(350.0, 650.0);
        let o = origin(&store);
        assert!(apply_drag(Handle::SetPreview, -200.0, &o, &mut store, &triple()));
        assert_eq!(store.pane_ab(), 450.0);
        assert_eq!(store.pane_a(), 258.0);
    }

    #[test]
    fn second_divider_respects_combined_floor() {
        let mut store = PaneWidthStore::new(250.0, 650.0);
        let o = origin(&store);
        apply_drag(Handle::SetPreview, -265.0, &o, &mut store, &triple());
        assert_eq!(store.pane_ab(), 386.0);
        assert_eq!(store.pane_a(), 193.0);
    }

    #[test]
    fn second_divider_stops_before_viewport_edge() {
        let mut store = PaneWidthStore::new(350.0, 650.0);
        let o = origin(&store);
        apply_drag(Handle::SetPreview, 900.0, &o, &mut store, &triple());
        assert_eq!(store.pane_ab(), 1008.0);
        assert_eq!(store.pane_a(), 350.0);
    }

    #[test]
    fn controller_lifecycle_holds_listeners() {
        let registry = ListenerRegistry::shared();
        let mut controller = DragController::new();
        let mut store = PaneWidthStore::new(350.0, 650.0);

        assert!(controller
            .begin(Handle::EditorSet, 100.0, InputSource::Mouse, &store, &registry)
            .unwrap());
        assert_eq!(controller.active_handle(), Some(Handle::EditorSet));
        assert!(registry.borrow().is_attached(ListenerKind::MouseUp));
        assert!(registry.borrow().is_attached(ListenerKind::TouchEnd));

        // A second gesture cannot start while one is active.
        assert!(!controller
            .begin(Handle::SetPreview, 0.0, InputSource::Touch, &store, &registry)
            .unwrap());

        assert!(controller.update(150.0, &mut store, &triple()));
        assert_eq!(store.pane_a(), 400.0);

        let settled = controller.end(&store).unwrap();
        assert_eq!(settled.pane_a, 400.0);
        assert_eq!(settled.pointer_x, 150.0);
        assert!(!controller.is_dragging());
        assert!(registry.borrow().is_empty());
        assert!(controller.end(&store).is_none());
    }

    #[test]
    fn update_while_idle_is_ignored() {
        let mut controller = DragController::new();
        let mut store = PaneWidthStore::new(350.0, 650.0);
        assert!(!controller.update(900.0, &mut store, &triple()));
        assert_eq!(store.pane_a(), 350.0);
    }

    #[test]
    fn begin_fails_cleanly_when_listeners_are_taken() {
        let registry = ListenerRegistry::shared();
        registry.borrow_mut().attach(ListenerKind::MouseUp).unwrap();
        let mut controller = DragController::new();
        let store = PaneWidthStore::new(350.0, 650.0);

        let result = controller.begin(Handle::EditorSet, 0.0, InputSource::Mouse, &store, &registry);
        assert!(result.is_err());
        assert!(!controller.is_dragging());
        assert_eq!(registry.borrow().len(), 1);
    }
}

// ABOUTME: Responsive split-view layout for the editor, set and preview panes.
// ABOUTME: Tracks pane widths, divider drags and viewport breakpoints.

mod drag;
mod geometry;
mod input;
mod listeners;
mod resolver;
mod split_view;
mod store;
mod viewport;

pub use drag::{apply_drag, DragController, DragOrigin, Handle};
pub use geometry::{PaneId, Rect, SplitGeometry};
pub use input::{first_changed_touch, InputSource, TouchPoint};
pub use listeners::{ListenerError, ListenerKind, ListenerRegistry, Subscription};
pub use resolver::{clamp_width, resolve, Constraints, Repairs};
pub use split_view::SplitView;
pub use store::{derive_pane_widths, PaneWidthStore, PaneWidths};
pub use viewport::{ExpandLevel, Viewport, ViewportTracker};

// ABOUTME: Window-level listener bookkeeping with scoped release.
// ABOUTME: A Subscription detaches everything it attached when dropped.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Window-level event streams the split view listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Resize,
    MouseMove,
    MouseUp,
    TouchMove,
    TouchEnd,
}

impl ListenerKind {
    /// Transient listeners attached for the duration of a drag
    pub const DRAG: [ListenerKind; 4] = [
        ListenerKind::MouseMove,
        ListenerKind::MouseUp,
        ListenerKind::TouchMove,
        ListenerKind::TouchEnd,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListenerError {
    #[error("Listener already attached: {0:?}")]
    AlreadyAttached(ListenerKind),
}

/// Set of currently attached listeners
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    attached: HashSet<ListenerKind>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn attach(&mut self, kind: ListenerKind) -> Result<(), ListenerError> {
        if !self.attached.insert(kind) {
            return Err(ListenerError::AlreadyAttached(kind));
        }
        tracing::debug!(?kind, "Attached listener");
        Ok(())
    }

    pub fn detach(&mut self, kind: ListenerKind) {
        if self.attached.remove(&kind) {
            tracing::debug!(?kind, "Detached listener");
        }
    }

    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.attached.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}

/// Listeners held for as long as this value lives
#[derive(Debug)]
pub struct Subscription {
    registry: Rc<RefCell<ListenerRegistry>>,
    kinds: Vec<ListenerKind>,
}

impl Subscription {
    /// Attach every kind or none of them.
    pub fn acquire(
        registry: &Rc<RefCell<ListenerRegistry>>,
        kinds: &[ListenerKind],
    ) -> Result<Self, ListenerError> {
        let mut subscription = Subscription {
            registry: Rc::clone(registry),
            kinds: Vec::with_capacity(kinds.len()),
        };
        for &kind in kinds {
            let attached = registry.borrow_mut().attach(kind);
            // On error the partial subscription drops and detaches what it holds.
            attached?;
            subscription.kinds.push(kind);
        }
        Ok(subscription)
    }

    pub fn kinds(&self) -> &[ListenerKind] {
        &self.kinds
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut registry = self.registry.borrow_mut();
        for kind in self.kinds.drain(..) {
            registry.detach(kind);
        }
    }
}

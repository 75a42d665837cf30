//! Deferred open/close notifications.
//!
//! Settling a panel only records the transition. The host drains the queue
//! once per frame, after layout, so listeners always observe laid-out frames.

use drawerkit_gesture::ElementId;
use smallvec::SmallVec;

use crate::edge::DrawerEdge;

/// One open/close transition of a drawer panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawerEvent {
    pub drawer: ElementId,
    pub edge: DrawerEdge,
    pub is_open: bool,
}

pub trait DrawerListener {
    fn on_drawer_opened(&mut self, drawer: ElementId, edge: DrawerEdge);
    fn on_drawer_closed(&mut self, drawer: ElementId, edge: DrawerEdge);
}

/// FIFO of pending notifications.
#[derive(Clone, Debug)]
pub(crate) struct EventQueue<T> {
    pending: SmallVec<[T; 2]>,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self {
            pending: SmallVec::new(),
        }
    }
}

impl<T> EventQueue<T> {
    pub(crate) fn push(&mut self, event: T) {
        self.pending.push(event);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn take(&mut self) -> SmallVec<[T; 2]> {
        std::mem::take(&mut self.pending)
    }
}

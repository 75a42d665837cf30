//! Test doubles for the host-side hooks a container calls back into.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use drawerkit_drawer::{DrawerEdge, DrawerListener, PullDownListener, ScrollQuery};
use drawerkit_gesture::ElementId;

#[derive(Default, Debug)]
struct ScrollState {
    /// `(horizontal, vertical)` scrollability per element.
    scrollable: HashMap<ElementId, (bool, bool)>,
    stopped: Vec<ElementId>,
}

/// Scriptable [`ScrollQuery`].
///
/// Clones share state, so a test keeps one handle while the container owns
/// another.
#[derive(Clone, Default, Debug)]
pub struct FakeScrollQuery {
    state: Rc<RefCell<ScrollState>>,
}

impl FakeScrollQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `element` as consuming scrolls along the given axes.
    pub fn set_scrollable(&self, element: ElementId, horizontal: bool, vertical: bool) {
        self.state
            .borrow_mut()
            .scrollable
            .insert(element, (horizontal, vertical));
    }

    /// Elements whose nested scroll the container stopped, in call order.
    pub fn stopped(&self) -> Vec<ElementId> {
        self.state.borrow().stopped.clone()
    }
}

impl ScrollQuery for FakeScrollQuery {
    fn can_scroll(&self, element: ElementId, _x: f32, _y: f32, dx: f32, dy: f32) -> bool {
        let state = self.state.borrow();
        let Some(&(horizontal, vertical)) = state.scrollable.get(&element) else {
            return false;
        };
        (horizontal && dx != 0.0) || (vertical && dy != 0.0)
    }

    fn stop_nested_scroll(&mut self, element: ElementId) {
        self.state.borrow_mut().stopped.push(element);
    }
}

/// One notification seen by [`RecordingListener`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    DrawerOpened(ElementId, DrawerEdge),
    DrawerClosed(ElementId, DrawerEdge),
    HeadOpened,
    HeadClosed,
}

/// Listener that records every callback in order.
#[derive(Clone, Default, Debug)]
pub struct RecordingListener {
    pub notifications: Vec<Notification>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl DrawerListener for RecordingListener {
    fn on_drawer_opened(&mut self, drawer: ElementId, edge: DrawerEdge) {
        self.notifications.push(Notification::DrawerOpened(drawer, edge));
    }

    fn on_drawer_closed(&mut self, drawer: ElementId, edge: DrawerEdge) {
        self.notifications.push(Notification::DrawerClosed(drawer, edge));
    }
}

impl PullDownListener for RecordingListener {
    fn on_head_opened(&mut self) {
        self.notifications.push(Notification::HeadOpened);
    }

    fn on_head_closed(&mut self) {
        self.notifications.push(Notification::HeadClosed);
    }
}

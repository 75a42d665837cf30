use drawerkit_gesture::ElementId;

/// Host-side answers about scrollable content inside a child.
pub trait ScrollQuery {
    /// Whether `element` or anything inside it would consume a scroll of
    /// `(dx, dy)` at the element-local point `(x, y)`.
    fn can_scroll(&self, element: ElementId, x: f32, y: f32, dx: f32, dy: f32) -> bool;

    /// Stops any fling or nested scroll running inside `element`.
    fn stop_nested_scroll(&mut self, _element: ElementId) {}
}

/// A host without scrollable content.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoScroll;

impl ScrollQuery for NoScroll {
    fn can_scroll(&self, _element: ElementId, _x: f32, _y: f32, _dx: f32, _dy: f32) -> bool {
        false
    }
}

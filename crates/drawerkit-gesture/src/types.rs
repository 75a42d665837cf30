use drawerkit_graphics::Point;
use smallvec::SmallVec;

pub type PointerId = u64;

/// Handle of a child element owned by the host.
///
/// Containers never own the elements behind these ids; they only remember
/// which id plays which role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    /// First pointer touched down; starts a gesture.
    Down,
    /// An additional pointer touched down.
    PointerDown,
    Move,
    /// A non-last pointer lifted; `action_index` names it.
    PointerUp,
    /// Last pointer lifted; ends the gesture.
    Up,
    Cancel,
}

/// Position of one pointer within a pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub position: Point,
}

impl PointerSample {
    pub fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

/// A pointer event carrying every pointer currently down.
///
/// Positions are local to the receiving container.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Index into `pointers` of the pointer that caused a
    /// `PointerDown`/`PointerUp`; zero for every other kind.
    pub action_index: usize,
    pub pointers: SmallVec<[PointerSample; 2]>,
    pub uptime_ms: i64,
}

impl PointerEvent {
    /// Creates a single-pointer event.
    pub fn new(kind: PointerEventKind, id: PointerId, position: Point, uptime_ms: i64) -> Self {
        let mut pointers = SmallVec::new();
        pointers.push(PointerSample { id, position });
        Self {
            kind,
            action_index: 0,
            pointers,
            uptime_ms,
        }
    }

    pub fn with_pointers(
        kind: PointerEventKind,
        action_index: usize,
        pointers: impl IntoIterator<Item = PointerSample>,
        uptime_ms: i64,
    ) -> Self {
        Self {
            kind,
            action_index,
            pointers: pointers.into_iter().collect(),
            uptime_ms,
        }
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn find_pointer_index(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|sample| sample.id == id)
    }

    pub fn pointer_id(&self, index: usize) -> Option<PointerId> {
        self.pointers.get(index).map(|sample| sample.id)
    }

    pub fn position_at(&self, index: usize) -> Option<Point> {
        self.pointers.get(index).map(|sample| sample.position)
    }

    /// Position of the first pointer, or the origin for an empty event.
    pub fn position(&self) -> Point {
        self.position_at(0).unwrap_or(Point::ZERO)
    }
}

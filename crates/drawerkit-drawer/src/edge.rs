//! Edge descriptors.
//!
//! Every panel behaves the same up to which axis it slides along and in
//! which direction it opens. [`EdgeOrientation`] captures that difference so
//! one panel implementation serves all four edges.

use drawerkit_gesture::{DragAxis, Edges};
use drawerkit_graphics::{EdgeInsets, Point, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrawerEdge {
    Left,
    Top,
    Right,
    Bottom,
}

impl DrawerEdge {
    /// Every edge, in the order panels are laid out and searched.
    pub const ALL: [DrawerEdge; 4] = [
        DrawerEdge::Left,
        DrawerEdge::Top,
        DrawerEdge::Right,
        DrawerEdge::Bottom,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            DrawerEdge::Left => 0,
            DrawerEdge::Top => 1,
            DrawerEdge::Right => 2,
            DrawerEdge::Bottom => 3,
        }
    }

    pub fn orientation(self) -> &'static EdgeOrientation {
        &ORIENTATIONS[self.index()]
    }

    pub fn axis(self) -> DragAxis {
        self.orientation().axis
    }

    pub fn flag(self) -> Edges {
        self.orientation().flag
    }
}

impl std::fmt::Display for DrawerEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DrawerEdge::Left => "left",
            DrawerEdge::Top => "top",
            DrawerEdge::Right => "right",
            DrawerEdge::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Axis and direction of one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeOrientation {
    pub edge: DrawerEdge,
    pub axis: DragAxis,
    /// `1.0` when opening moves toward larger coordinates, `-1.0` otherwise.
    pub sign: f32,
    pub flag: Edges,
}

const ORIENTATIONS: [EdgeOrientation; 4] = [
    EdgeOrientation {
        edge: DrawerEdge::Left,
        axis: DragAxis::Horizontal,
        sign: 1.0,
        flag: Edges::LEFT,
    },
    EdgeOrientation {
        edge: DrawerEdge::Top,
        axis: DragAxis::Vertical,
        sign: 1.0,
        flag: Edges::TOP,
    },
    EdgeOrientation {
        edge: DrawerEdge::Right,
        axis: DragAxis::Horizontal,
        sign: -1.0,
        flag: Edges::RIGHT,
    },
    EdgeOrientation {
        edge: DrawerEdge::Bottom,
        axis: DragAxis::Vertical,
        sign: -1.0,
        flag: Edges::BOTTOM,
    },
];

impl EdgeOrientation {
    fn is_horizontal(&self) -> bool {
        self.axis == DragAxis::Horizontal
    }

    fn along(&self, x: f32, y: f32) -> f32 {
        if self.is_horizontal() {
            x
        } else {
            y
        }
    }

    /// Projects a pointer delta (or velocity) onto the opening direction.
    /// Positive values open the panel.
    pub fn open_component(&self, dx: f32, dy: f32) -> f32 {
        self.sign * self.along(dx, dy)
    }

    /// Extent of a frame along this edge's axis.
    pub fn extent(&self, size: Size) -> f32 {
        self.along(size.width, size.height)
    }

    /// Moves `rect` by `distance` in the opening direction.
    pub fn offset(&self, rect: Rect, distance: f32) -> Rect {
        let step = self.sign * distance;
        if self.is_horizontal() {
            rect.translate(step, 0.0)
        } else {
            rect.translate(0.0, step)
        }
    }

    /// Revealed size read off a drawer frame that slides with the gesture.
    pub fn revealed_by_drawer(&self, drawer: Rect, margins: EdgeInsets, container: Size) -> f32 {
        match self.edge {
            DrawerEdge::Left => drawer.right() - margins.left,
            DrawerEdge::Right => container.width - drawer.left() - margins.right,
            DrawerEdge::Top => drawer.bottom() - margins.top,
            DrawerEdge::Bottom => container.height - drawer.top() - margins.bottom,
        }
    }

    /// Revealed size read off the content frame when the drawer stays put.
    pub fn revealed_by_content(&self, content: Rect, margins: EdgeInsets, container: Size) -> f32 {
        match self.edge {
            DrawerEdge::Left => content.left() - margins.left,
            DrawerEdge::Right => container.width - content.right() - margins.right,
            DrawerEdge::Top => content.top() - margins.top,
            DrawerEdge::Bottom => container.height - content.bottom() - margins.bottom,
        }
    }

    /// Drawer origin, either fully shown or parked just past the edge.
    pub fn drawer_origin(&self, measured: Size, margins: EdgeInsets, container: Size, shown: bool) -> Point {
        match self.edge {
            DrawerEdge::Left => {
                let hidden = if shown { 0.0 } else { measured.width };
                Point::new(margins.left - hidden, margins.top)
            }
            DrawerEdge::Right => {
                let inset = if shown { measured.width } else { 0.0 };
                Point::new(container.width - margins.right - inset, margins.top)
            }
            DrawerEdge::Top => {
                let hidden = if shown { 0.0 } else { measured.height };
                Point::new(margins.left, margins.top - hidden)
            }
            DrawerEdge::Bottom => {
                let inset = if shown { measured.height } else { 0.0 };
                Point::new(margins.left, container.height - margins.bottom - inset)
            }
        }
    }

    /// Part of the container the drawer frame leaves uncovered.
    pub fn uncovered_area(&self, drawer: Rect, container: Size) -> Rect {
        match self.edge {
            DrawerEdge::Left => Rect::from_ltrb(drawer.right(), 0.0, container.width, container.height),
            DrawerEdge::Right => Rect::from_ltrb(0.0, 0.0, drawer.left(), container.height),
            DrawerEdge::Top => Rect::from_ltrb(0.0, drawer.bottom(), container.width, container.height),
            DrawerEdge::Bottom => Rect::from_ltrb(0.0, 0.0, container.width, drawer.top()),
        }
    }
}

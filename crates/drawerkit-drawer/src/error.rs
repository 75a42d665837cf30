use drawerkit_gesture::ElementId;

use crate::edge::DrawerEdge;

/// Configuration errors reported while attaching or measuring children.
///
/// Gesture handling never fails; these only surface from setup calls.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawerError {
    TooManyChildren { max: usize },
    DuplicateChild { id: ElementId },
    UnknownChild { id: ElementId },
    DuplicateContent { existing: ElementId, added: ElementId },
    EdgeOccupied { edge: DrawerEdge, existing: ElementId },
    MissingContent,
    /// The container was measured without an exact, finite size.
    NotExactlyMeasured,
}

impl std::fmt::Display for DrawerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawerError::TooManyChildren { max } => write!(f, "at most {max} children allowed"),
            DrawerError::DuplicateChild { id } => write!(f, "child {id} already attached"),
            DrawerError::UnknownChild { id } => write!(f, "child {id} is not attached"),
            DrawerError::DuplicateContent { existing, added } => {
                write!(f, "content {existing} already attached; cannot add {added}")
            }
            DrawerError::EdgeOccupied { edge, existing } => {
                write!(f, "{edge} edge already holds drawer {existing}")
            }
            DrawerError::MissingContent => write!(f, "exactly one content child is required"),
            DrawerError::NotExactlyMeasured => {
                write!(f, "container must be measured with exact constraints")
            }
        }
    }
}

impl std::error::Error for DrawerError {}

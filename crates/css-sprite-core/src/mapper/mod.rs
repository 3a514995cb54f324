use crate::config::Arrange;
use crate::model::{Mapping, Size};

pub mod canvas;
pub mod horizontal;
pub mod optimal;
pub mod vertical;

/// A mapper arranges sized items into a sheet.
///
/// Implementations place every item, keep placements disjoint, and report the
/// tight bounding box over everything placed. Items are processed in the order
/// given and are never reordered; callers rely on `Placement::index` to copy
/// positions back onto their own records. Packing is deterministic: the same
/// items give the same mapping.
pub trait Mapper {
    fn pack(&self, items: &[Size]) -> Mapping;
}

/// Resolves the mapper for an arrangement.
pub fn mapper_for(arrange: Arrange) -> Box<dyn Mapper> {
    match arrange {
        Arrange::Horizontal => Box::new(horizontal::HorizontalMapper),
        Arrange::Vertical => Box::new(vertical::VerticalMapper),
        Arrange::Optimal => Box::new(optimal::OptimalMapper),
    }
}

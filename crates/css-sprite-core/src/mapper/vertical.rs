use super::Mapper;
use crate::model::{Mapping, Placement, Rect, Size};

/// Stacks items top to bottom in a single column, left edges at x = 0.
///
/// The sheet ends up as tall as the sum of item heights and as wide as the
/// widest item.
pub struct VerticalMapper;

impl Mapper for VerticalMapper {
    fn pack(&self, items: &[Size]) -> Mapping {
        let mut mapping = Mapping::new();
        let mut y = 0u32;
        for (index, item) in items.iter().enumerate() {
            mapping.push(Placement {
                index,
                rect: Rect::new(0, y, item.w, item.h),
            });
            y += item.h;
        }
        mapping
    }
}

use super::Mapper;
use crate::model::{Mapping, Placement, Rect, Size};

/// Lays items out left to right on a single row, tops aligned at y = 0.
///
/// The sheet ends up as wide as the sum of item widths and as tall as the
/// tallest item.
pub struct HorizontalMapper;

impl Mapper for HorizontalMapper {
    fn pack(&self, items: &[Size]) -> Mapping {
        let mut mapping = Mapping::new();
        let mut x = 0u32;
        for (index, item) in items.iter().enumerate() {
            mapping.push(Placement {
                index,
                rect: Rect::new(x, 0, item.w, item.h),
            });
            x += item.w;
        }
        mapping
    }
}

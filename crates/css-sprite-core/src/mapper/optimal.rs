use super::Mapper;
use super::canvas::OccupancyCanvas;
use crate::model::{Mapping, Placement, Rect, Size};

/// Greedy first-fit scan over an occupancy grid.
///
/// Items are placed one at a time in input order. Candidate positions are
/// scanned row-major, lowest y first, then lowest x, and the first position
/// whose rectangle overlaps nothing occupied wins. The x range is anchored to
/// the running grid width so the sheet grows downward; it widens only when an
/// item is wider than everything placed before it. Position (0, height) is
/// always free, so every item lands somewhere.
///
/// The scan order is observable through emitted stylesheets and must not
/// change.
pub struct OptimalMapper;

impl Mapper for OptimalMapper {
    fn pack(&self, items: &[Size]) -> Mapping {
        let mut mapping = Mapping::new();
        let mut canvas = OccupancyCanvas::new();
        for (index, item) in items.iter().enumerate() {
            let (x, y) = find_position(&canvas, item.w, item.h);
            canvas.mark(x, y, item.w, item.h);
            mapping.push(Placement {
                index,
                rect: Rect::new(x, y, item.w, item.h),
            });
        }
        mapping
    }
}

fn find_position(canvas: &OccupancyCanvas, w: u32, h: u32) -> (u32, u32) {
    let max_x = canvas.width().max(w) - w;
    for y in 0..=canvas.height() {
        for x in 0..=max_x {
            if canvas.is_free(x, y, w, h) {
                return (x, y);
            }
        }
    }
    // Unreachable: the row at y == height is entirely beyond the extent.
    (0, canvas.height())
}

/// Growable occupancy grid used by the optimal-efficiency mapper.
///
/// A cell is true iff some placed rectangle covers it. The grid grows on
/// demand (new cells start free) and never shrinks; reads beyond the current
/// extent count as free. Scans cost one cell read per covered cell, so grids
/// in the tens of millions of cells with a few hundred items are the
/// practical envelope.
#[derive(Debug, Clone, Default)]
pub struct OccupancyCanvas {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl OccupancyCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if no occupied cell intersects the given rectangle.
    /// Zero-sized rectangles are always free.
    pub fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        let x2 = (x.saturating_add(w)).min(self.width);
        let y2 = (y.saturating_add(h)).min(self.height);
        for yy in y..y2 {
            let row = (yy as usize) * (self.width as usize);
            for xx in x..x2 {
                if self.cells[row + xx as usize] {
                    return false;
                }
            }
        }
        true
    }

    /// Marks the rectangle occupied, growing the grid first so every covered
    /// cell exists. Zero-sized rectangles mark nothing.
    pub fn mark(&mut self, x: u32, y: u32, w: u32, h: u32) {
        if w == 0 || h == 0 {
            return;
        }
        self.grow(x + w, y + h);
        for yy in y..y + h {
            let row = (yy as usize) * (self.width as usize);
            for xx in x..x + w {
                self.cells[row + xx as usize] = true;
            }
        }
    }

    // Widening restrides the grid, so rows are copied over; heightening just
    // appends zeroed rows.
    fn grow(&mut self, min_width: u32, min_height: u32) {
        if min_width <= self.width && min_height <= self.height {
            return;
        }
        let new_width = self.width.max(min_width);
        let new_height = self.height.max(min_height);
        if new_width == self.width {
            self.cells
                .resize((new_width as usize) * (new_height as usize), false);
        } else {
            let mut cells = vec![false; (new_width as usize) * (new_height as usize)];
            for y in 0..self.height as usize {
                let src = y * (self.width as usize);
                let dst = y * (new_width as usize);
                cells[dst..dst + self.width as usize]
                    .copy_from_slice(&self.cells[src..src + self.width as usize]);
            }
            self.cells = cells;
        }
        self.width = new_width;
        self.height = new_height;
    }
}

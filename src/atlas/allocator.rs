//! Grid cell allocation within one atlas texture (spec.md §4.8): a
//! fixed-cell, row-major, no-free-list allocator. Cells are handed out
//! in order and never reused until the whole atlas is cleared — this
//! keeps allocation O(1) at the cost of fragmentation on heavy churn,
//! which `AtlasManager::compact` works around at the atlas-set level
//! rather than the cell level.

/// Hands out fixed-size cells from a `cols x rows` grid, row-major,
/// until exhausted.
#[derive(Debug, Clone)]
pub struct GridAllocator {
    cols: u32,
    rows: u32,
    cell_width: u32,
    cell_height: u32,
    next: u32,
}

impl GridAllocator {
    pub fn new(cols: u32, rows: u32, cell_width: u32, cell_height: u32) -> Self {
        Self {
            cols,
            rows,
            cell_width,
            cell_height,
            next: 0,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.cols * self.rows
    }

    pub fn allocated(&self) -> u32 {
        self.next
    }

    pub fn is_full(&self) -> bool {
        self.next >= self.capacity()
    }

    /// Allocate the next free cell's pixel-space origin and size, or
    /// `None` once the grid is exhausted.
    pub fn allocate(&mut self) -> Option<(u32, u32, u32, u32)> {
        if self.is_full() {
            return None;
        }
        let col = self.next % self.cols;
        let row = self.next / self.cols;
        self.next += 1;
        Some((col * self.cell_width, row * self.cell_height, self.cell_width, self.cell_height))
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_row_major_without_overlap() {
        let mut alloc = GridAllocator::new(2, 2, 8, 8);
        let a = alloc.allocate().unwrap();
        let b = alloc.allocate().unwrap();
        let c = alloc.allocate().unwrap();
        let d = alloc.allocate().unwrap();
        assert_eq!(a, (0, 0, 8, 8));
        assert_eq!(b, (8, 0, 8, 8));
        assert_eq!(c, (0, 8, 8, 8));
        assert_eq!(d, (8, 8, 8, 8));
        assert!(alloc.allocate().is_none());
    }

    #[test]
    fn reset_reuses_the_whole_grid() {
        let mut alloc = GridAllocator::new(1, 1, 4, 4);
        alloc.allocate().unwrap();
        assert!(alloc.is_full());
        alloc.reset();
        assert!(!alloc.is_full());
        assert_eq!(alloc.allocate(), Some((0, 0, 4, 4)));
    }
}

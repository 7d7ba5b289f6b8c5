//! Square, row-major grids and the handful of binary morphology
//! operations needed to find the edge of the Mandelbrot set.
//!
//! Neighbourhoods are the 4-connected kind: up, down, left, right.
//! A neighbour that falls off the grid is simply absent; it counts
//! neither as set nor as unset, and rows do not wrap.

use itertools::iproduct;
use planes::Pixel;
use std::ops::{Index, IndexMut};

static NEIGHBOURS: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// A square grid of cells stored row by row.  Cell `(x, y)` lives at
/// `y * size + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// A grid of side `size` with every cell set to `value`.
    pub fn filled(size: usize, value: T) -> Self {
        Grid {
            size,
            cells: vec![value; size * size],
        }
    }
}

impl<T> Grid<T> {
    /// Builds a grid by asking `f` for the value of every cell, in
    /// row-major order.
    pub fn from_fn<F>(size: usize, mut f: F) -> Self
    where
        F: FnMut(Pixel) -> T,
    {
        let cells = iproduct!(0..size, 0..size)
            .map(|(y, x)| f(Pixel(x, y)))
            .collect();
        Grid { size, cells }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells, always `size * size`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a zero-sized grid.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cells in row-major order.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Every pixel paired with its cell, in row-major order.
    pub fn pixels<'a>(&'a self) -> impl Iterator<Item = (Pixel, &'a T)> + 'a {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Pixel(i % size, i / size), cell))
    }

    // The in-grid 4-neighbours of a pixel.
    fn neighbours(&self, pixel: Pixel) -> impl Iterator<Item = Pixel> {
        let size = self.size as isize;
        let (x, y) = (pixel.0 as isize, pixel.1 as isize);
        NEIGHBOURS.iter().filter_map(move |&(dx, dy)| {
            let (nx, ny) = (x + dx, y + dy);
            if nx >= 0 && nx < size && ny >= 0 && ny < size {
                Some(Pixel(nx as usize, ny as usize))
            } else {
                None
            }
        })
    }
}

impl<T> Index<Pixel> for Grid<T> {
    type Output = T;

    fn index(&self, pixel: Pixel) -> &T {
        &self.cells[pixel.1 * self.size + pixel.0]
    }
}

impl<T> IndexMut<Pixel> for Grid<T> {
    fn index_mut(&mut self, pixel: Pixel) -> &mut T {
        &mut self.cells[pixel.1 * self.size + pixel.0]
    }
}

impl Grid<bool> {
    /// Set cells that touch at least one unset neighbour.
    pub fn edge(&self) -> Grid<bool> {
        Grid::from_fn(self.size, |p| {
            self[p] && self.neighbours(p).any(|n| !self[n])
        })
    }

    /// Every cell flipped.
    pub fn invert(&self) -> Grid<bool> {
        Grid {
            size: self.size,
            cells: self.cells.iter().map(|c| !c).collect(),
        }
    }

    /// Cellwise OR of two grids of the same size.
    pub fn union(mut self, other: &Grid<bool>) -> Grid<bool> {
        assert_eq!(self.size, other.size, "grids differ in size");
        for (a, b) in self.cells.iter_mut().zip(other.cells.iter()) {
            *a = *a || *b;
        }
        self
    }

    /// A cell is set if it, or any of its neighbours, was set.
    pub fn dilate(&self) -> Grid<bool> {
        Grid::from_fn(self.size, |p| {
            self[p] || self.neighbours(p).any(|n| self[n])
        })
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_rows(rows: &[&str]) -> Grid<bool> {
        let size = rows.len();
        Grid::from_fn(size, |p| rows[p.1].as_bytes()[p.0] == b'#')
    }

    #[test]
    fn edge_of_uniform_masks_is_empty() {
        for size in 1..6 {
            assert_eq!(Grid::filled(size, true).edge().count(), 0);
            assert_eq!(Grid::filled(size, false).edge().count(), 0);
        }
    }

    #[test]
    fn edge_keeps_only_the_rim_of_a_block() {
        let mask = from_rows(&[".....", ".###.", ".###.", ".###.", "....."]);
        let edge = mask.edge();
        assert_eq!(edge, from_rows(&[".....", ".###.", ".#.#.", ".###.", "....."]));
    }

    #[test]
    fn edge_does_not_wrap_rows() {
        // The last cell of the first row sits beside a hole in the
        // next row's first cell only if rows wrapped.
        let mask = from_rows(&["###", ".##", "###"]);
        let edge = mask.edge();
        assert!(!edge[Pixel(2, 0)]);
        assert!(edge[Pixel(0, 0)]);
        assert!(edge[Pixel(1, 1)]);
    }

    #[test]
    fn invert_and_union() {
        let mask = from_rows(&["#.", ".#"]);
        assert_eq!(mask.invert(), from_rows(&[".#", "#."]));
        assert_eq!(mask.clone().union(&mask.invert()).count(), 4);
    }

    #[test]
    fn dilate_grows_a_plus() {
        let mask = from_rows(&[".....", ".....", "..#..", ".....", "....."]);
        assert_eq!(
            mask.dilate(),
            from_rows(&[".....", "..#..", ".###.", "..#..", "....."])
        );
    }

    #[test]
    fn dilate_is_monotonic() {
        let mask = from_rows(&["#...#", ".#...", "...#.", ".....", "#.#.."]);
        let mut current = mask;
        for _ in 0..4 {
            let next = current.dilate();
            for (p, cell) in current.pixels() {
                if *cell {
                    assert!(next[p]);
                }
            }
            assert!(next.count() >= current.count());
            current = next;
        }
    }

    #[test]
    fn pixels_walk_row_major() {
        let grid = Grid::from_fn(3, |p| p.1 * 3 + p.0);
        for (p, v) in grid.pixels() {
            assert_eq!(grid[p], *v);
        }
        assert_eq!(grid.cells(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }
}

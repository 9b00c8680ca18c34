use super::direction::Direction;

/// A position on the game grid, in tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fold the position back onto a `width x height` torus
    pub fn wrapped(&self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.rem_euclid(width),
            y: self.y.rem_euclid(height),
        }
    }
}

/// Phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// The snake body
///
/// Segments live in a buffer allocated once with a fixed capacity; only the
/// first `len` entries are meaningful. The head is at index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: Box<[Position]>,
    len: usize,
}

impl Snake {
    /// Create a snake of `length` segments trailing behind `head`, opposite to `direction`
    ///
    /// `length` is clamped to `1..=capacity`.
    pub fn new(head: Position, direction: Direction, length: usize, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut snake = Self {
            segments: vec![Position::ORIGIN; capacity].into_boxed_slice(),
            len: 0,
        };
        snake.lay_out(head, direction, length);
        snake
    }

    /// Rebuild the body in place as a straight line behind `head`
    pub fn lay_out(&mut self, head: Position, direction: Direction, length: usize) {
        let (dx, dy) = direction.delta();
        self.len = length.clamp(1, self.capacity());
        for i in 0..self.len {
            let back = i as i32;
            self.segments[i] = head.moved_by(-dx * back, -dy * back);
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.segments[self.len - 1]
    }

    /// Live segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.segments[..self.len]
    }

    /// Shift every segment one slot toward the tail and put the head at `new_head`
    ///
    /// The old tail position falls off the end.
    pub fn advance(&mut self, new_head: Position) {
        self.segments.copy_within(0..self.len - 1, 1);
        self.segments[0] = new_head;
    }

    /// Overwrite a live segment; out-of-range indices are ignored
    pub(crate) fn set_segment(&mut self, index: usize, pos: Position) {
        if index < self.len {
            self.segments[index] = pos;
        }
    }

    /// Append a copy of the tail. Returns false when already at capacity.
    pub fn grow(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.segments[self.len] = self.tail();
        self.len += 1;
        true
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.segments.len()
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Snake,
}

/// Dense occupancy map, one cell per tile
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let inside = pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height;
        inside.then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Cell at `pos`; anything off the grid reads as empty
    pub fn cell(&self, pos: Position) -> Cell {
        self.index(pos)
            .map(|i| self.cells[i])
            .unwrap_or(Cell::Empty)
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cell(pos) == Cell::Snake
    }

    /// Clear every cell, then mark each segment. Off-grid segments are skipped.
    pub fn rebuild(&mut self, body: &[Position]) {
        self.cells.fill(Cell::Empty);
        for &segment in body {
            if let Some(i) = self.index(segment) {
                self.cells[i] = Cell::Snake;
            }
        }
    }

    /// First empty cell in row-major order
    pub fn first_empty(&self) -> Option<Position> {
        self.cells
            .iter()
            .position(|cell| *cell == Cell::Empty)
            .map(|i| {
                let width = self.width as usize;
                Position::new((i % width) as i32, (i / width) as i32)
            })
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Snake).count()
    }
}

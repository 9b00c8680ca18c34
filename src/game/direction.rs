use crate::platform::Buttons;

/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order in which directional buttons are considered when several are held
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Unit vector (dx, dy); y grows downwards
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Button that requests this heading
    pub fn button(&self) -> Buttons {
        match self {
            Direction::Up => Buttons::UP,
            Direction::Down => Buttons::DOWN,
            Direction::Left => Buttons::LEFT,
            Direction::Right => Buttons::RIGHT,
        }
    }

    /// Heading after applying the directional bits of `buttons`
    ///
    /// The first held direction in [`Direction::PRIORITY`] that is not a
    /// reversal wins; reversals are skipped. Returns `self` when nothing
    /// applies.
    pub fn steer(self, buttons: Buttons) -> Direction {
        Self::PRIORITY
            .into_iter()
            .find(|dir| buttons.contains(dir.button()) && !self.is_opposite(*dir))
            .unwrap_or(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_steer_rejects_reversal() {
        assert_eq!(Direction::Right.steer(Buttons::LEFT), Direction::Right);
        assert_eq!(Direction::Right.steer(Buttons::UP), Direction::Up);
        assert_eq!(Direction::Right.steer(Buttons::RIGHT), Direction::Right);
        assert_eq!(Direction::Right.steer(Buttons::empty()), Direction::Right);
    }

    #[test]
    fn test_steer_priority() {
        // Up beats everything else
        let all = Buttons::UP | Buttons::DOWN | Buttons::LEFT | Buttons::RIGHT;
        assert_eq!(Direction::Right.steer(all), Direction::Up);

        // Heading down: Up is a reversal, so Left is next in line
        assert_eq!(
            Direction::Down.steer(Buttons::UP | Buttons::LEFT),
            Direction::Left
        );

        // Down beats Right
        assert_eq!(
            Direction::Left.steer(Buttons::DOWN | Buttons::RIGHT),
            Direction::Down
        );
    }

    #[test]
    fn test_steer_ignores_other_buttons() {
        let mask = Buttons::A | Buttons::B | Buttons::START | Buttons::SELECT;
        assert_eq!(Direction::Left.steer(mask), Direction::Left);
    }
}

use macroquad::logging::debug;

/// Food is re-rolled while it lands inside this window around the previous food.
pub const FOOD_EXCLUSION: i32 = 3;
/// Picks made before a food candidate is accepted unconditionally.
pub const FOOD_MAX_TRIES: u32 = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
}

impl Grid {
    pub const fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    pub fn contains(&self, c: Cell) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.cols && c.y < self.rows
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.cols / 2, self.rows / 2)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn axis(self) -> Option<Axis> {
        match self {
            Direction::None => None,
            Direction::Up | Direction::Down => Some(Axis::Vertical),
            Direction::Left | Direction::Right => Some(Axis::Horizontal),
        }
    }
}

/// Source of uniformly random cells for food placement.
pub trait CellPicker {
    fn pick(&mut self, grid: Grid) -> Cell;
}

/// Draws from macroquad's global generator.
pub struct GlobalRng;

impl CellPicker for GlobalRng {
    fn pick(&mut self, grid: Grid) -> Cell {
        Cell {
            x: macroquad::rand::gen_range(0, grid.cols),
            y: macroquad::rand::gen_range(0, grid.rows),
        }
    }
}

/// What a single logical update did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Moved,
    Ate,
    WallReset,
    Won,
    Halted,
}

/// Picks a food cell. With a previous cell, candidates within the exclusion
/// window are rejected until `FOOD_MAX_TRIES` picks have been made.
pub fn place_food(grid: Grid, previous: Option<Cell>, rng: &mut impl CellPicker) -> Cell {
    let Some(prev) = previous else {
        return rng.pick(grid);
    };
    let mut tries = 0;
    loop {
        let c = rng.pick(grid);
        tries += 1;
        let too_close = (c.x - prev.x).abs() < FOOD_EXCLUSION && (c.y - prev.y).abs() < FOOD_EXCLUSION;
        if !too_close || tries >= FOOD_MAX_TRIES {
            return c;
        }
    }
}

pub struct Game {
    grid: Grid,
    snake: Vec<Cell>,
    direction: Direction,
    food: Cell,
    finished: bool,
    max_len: usize,
}

impl Game {
    /// `palette_len` is the number of body-segment sprite levels; the snake
    /// wins once it carries one segment per level plus the head.
    pub fn new(grid: Grid, palette_len: usize, rng: &mut impl CellPicker) -> Self {
        Self {
            grid,
            snake: vec![grid.center()],
            direction: Direction::None,
            food: place_food(grid, None, rng),
            finished: false,
            max_len: palette_len + 1,
        }
    }

    pub fn reset(&mut self, rng: &mut impl CellPicker) {
        self.snake.clear();
        self.snake.push(self.grid.center());
        self.direction = Direction::None;
        self.food = place_food(self.grid, None, rng);
        self.finished = false;
    }

    pub fn update(&mut self, rng: &mut impl CellPicker) -> Step {
        if self.finished {
            return Step::Halted;
        }
        if self.snake.len() >= self.max_len {
            self.finished = true;
            return Step::Won;
        }

        let head = self.snake[0].offset(self.direction.vector());
        if !self.grid.contains(head) {
            debug!("wall hit at ({}, {}), resetting", head.x, head.y);
            self.reset(rng);
            return Step::WallReset;
        }

        self.snake.insert(0, head);
        if head == self.food {
            self.food = place_food(self.grid, Some(self.food), rng);
            Step::Ate
        } else {
            self.snake.pop();
            Step::Moved
        }
    }

    /// Changes direction unless the request lies on the axis already in motion.
    pub fn steer(&mut self, wanted: Direction) -> bool {
        let Some(axis) = wanted.axis() else {
            return false;
        };
        if self.direction.axis() == Some(axis) {
            return false;
        }
        self.direction = wanted;
        true
    }

    pub fn snake(&self) -> &[Cell] {
        &self.snake
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, snake: &[Cell], direction: Direction, food: Cell) {
        self.snake = snake.to_vec();
        self.direction = direction;
        self.food = food;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Hands out queued cells, then repeats the last one.
    pub(crate) struct Scripted {
        queue: VecDeque<Cell>,
        last: Cell,
        pub calls: u32,
    }

    impl Scripted {
        pub(crate) fn new(cells: &[Cell]) -> Self {
            Self {
                queue: cells.iter().copied().collect(),
                last: cells.last().copied().unwrap_or(Cell::new(0, 0)),
                calls: 0,
            }
        }
    }

    impl CellPicker for Scripted {
        fn pick(&mut self, _grid: Grid) -> Cell {
            self.calls += 1;
            if let Some(c) = self.queue.pop_front() {
                self.last = c;
            }
            self.last
        }
    }

    const GRID: Grid = Grid::new(8, 12);

    fn game_with(snake: &[Cell], direction: Direction, food: Cell) -> Game {
        let mut game = Game::new(GRID, 11, &mut Scripted::new(&[Cell::new(0, 0)]));
        game.set_state(snake, direction, food);
        game
    }

    #[test]
    fn new_game_starts_centered_and_still() {
        let game = Game::new(GRID, 11, &mut Scripted::new(&[Cell::new(1, 2)]));
        assert_eq!(game.snake(), &[Cell::new(4, 6)]);
        assert_eq!(game.direction(), Direction::None);
        assert_eq!(game.food(), Cell::new(1, 2));
        assert!(!game.is_finished());
    }

    #[test]
    fn zero_direction_moves_in_place() {
        let mut game = game_with(&[Cell::new(4, 6)], Direction::None, Cell::new(0, 0));
        let step = game.update(&mut Scripted::new(&[Cell::new(7, 7)]));
        assert_eq!(step, Step::Moved);
        assert_eq!(game.snake(), &[Cell::new(4, 6)]);
    }

    #[test]
    fn zero_direction_on_food_eats_in_place() {
        let mut game = game_with(&[Cell::new(4, 6)], Direction::None, Cell::new(4, 6));
        let step = game.update(&mut Scripted::new(&[Cell::new(0, 0)]));
        assert_eq!(step, Step::Ate);
        assert_eq!(game.snake(), &[Cell::new(4, 6), Cell::new(4, 6)]);
    }

    #[test]
    fn eating_grows_and_moves_food_away() {
        let mut game = game_with(&[Cell::new(4, 6)], Direction::Right, Cell::new(5, 6));
        // first candidate is inside the window and must be rejected
        let mut rng = Scripted::new(&[Cell::new(6, 7), Cell::new(1, 1)]);
        let step = game.update(&mut rng);
        assert_eq!(step, Step::Ate);
        assert_eq!(game.snake(), &[Cell::new(5, 6), Cell::new(4, 6)]);
        assert_eq!(game.food(), Cell::new(1, 1));
        assert_eq!(rng.calls, 2);
    }

    #[test]
    fn moving_keeps_length() {
        let body = [Cell::new(4, 6), Cell::new(3, 6), Cell::new(2, 6)];
        let mut game = game_with(&body, Direction::Down, Cell::new(0, 0));
        assert_eq!(game.update(&mut Scripted::new(&[])), Step::Moved);
        assert_eq!(game.snake(), &[Cell::new(4, 7), Cell::new(4, 6), Cell::new(3, 6)]);
    }

    #[test]
    fn wall_hit_resets() {
        let mut game = game_with(&[Cell::new(7, 6)], Direction::Right, Cell::new(0, 0));
        let step = game.update(&mut Scripted::new(&[Cell::new(2, 3)]));
        assert_eq!(step, Step::WallReset);
        assert_eq!(game.snake(), &[Cell::new(4, 6)]);
        assert_eq!(game.direction(), Direction::None);
        assert_eq!(game.food(), Cell::new(2, 3));
        assert!(!game.is_finished());
    }

    #[test]
    fn wall_hit_on_every_edge() {
        let cases = [
            (Cell::new(0, 3), Direction::Left),
            (Cell::new(3, 0), Direction::Up),
            (Cell::new(3, 11), Direction::Down),
            (Cell::new(7, 3), Direction::Right),
        ];
        for (start, dir) in cases {
            let mut game = game_with(&[start], dir, Cell::new(5, 5));
            assert_eq!(game.update(&mut Scripted::new(&[])), Step::WallReset, "{dir:?}");
            assert!(GRID.contains(game.head()));
        }
    }

    #[test]
    fn no_self_collision() {
        // head walks back onto its own body without penalty
        let body = [Cell::new(4, 6), Cell::new(4, 7), Cell::new(3, 7), Cell::new(3, 6)];
        let mut game = game_with(&body, Direction::Left, Cell::new(0, 0));
        assert_eq!(game.update(&mut Scripted::new(&[])), Step::Moved);
        assert_eq!(game.head(), Cell::new(3, 6));
    }

    #[test]
    fn full_length_wins_and_freezes() {
        let body: Vec<Cell> = (0..12).map(|y| Cell::new(2, y)).collect();
        let mut game = game_with(&body, Direction::Right, Cell::new(3, 0));
        assert_eq!(game.update(&mut Scripted::new(&[])), Step::Won);
        assert!(game.is_finished());
        assert_eq!(game.snake(), body.as_slice());
        assert_eq!(game.update(&mut Scripted::new(&[])), Step::Halted);
        assert_eq!(game.snake(), body.as_slice());
    }

    #[test]
    fn one_short_of_full_length_still_moves() {
        let body: Vec<Cell> = (0..11).map(|y| Cell::new(2, y)).collect();
        let mut game = game_with(&body, Direction::Right, Cell::new(7, 7));
        assert_eq!(game.update(&mut Scripted::new(&[])), Step::Moved);
        assert!(!game.is_finished());
    }

    #[test]
    fn reset_clears_finished() {
        let body: Vec<Cell> = (0..12).map(|y| Cell::new(2, y)).collect();
        let mut game = game_with(&body, Direction::Right, Cell::new(3, 0));
        game.update(&mut Scripted::new(&[]));
        game.reset(&mut Scripted::new(&[Cell::new(1, 1)]));
        assert!(!game.is_finished());
        assert_eq!(game.snake().len(), 1);
    }

    #[test]
    fn steering_ignores_locked_axis() {
        let mut game = game_with(&[Cell::new(4, 6)], Direction::Right, Cell::new(0, 0));
        assert!(!game.steer(Direction::Left));
        assert_eq!(game.direction(), Direction::Right);
        assert!(!game.steer(Direction::Right));
        assert!(game.steer(Direction::Up));
        assert_eq!(game.direction(), Direction::Up);
        assert!(!game.steer(Direction::Down));
        assert_eq!(game.direction(), Direction::Up);
    }

    #[test]
    fn steering_from_rest_accepts_any_direction() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let mut game = game_with(&[Cell::new(4, 6)], Direction::None, Cell::new(0, 0));
            assert!(game.steer(dir));
            assert_eq!(game.direction(), dir);
        }
        let mut game = game_with(&[Cell::new(4, 6)], Direction::Left, Cell::new(0, 0));
        assert!(!game.steer(Direction::None));
        assert_eq!(game.direction(), Direction::Left);
    }

    #[test]
    fn food_gives_up_after_max_tries() {
        let prev = Cell::new(4, 6);
        let mut rng = Scripted::new(&[Cell::new(5, 5)]);
        let food = place_food(GRID, Some(prev), &mut rng);
        assert_eq!(food, Cell::new(5, 5));
        assert_eq!(rng.calls, FOOD_MAX_TRIES);
    }

    #[test]
    fn food_accepts_far_on_one_axis() {
        let prev = Cell::new(4, 6);
        // dx = 0 but dy = 3
        let mut rng = Scripted::new(&[Cell::new(4, 9)]);
        assert_eq!(place_food(GRID, Some(prev), &mut rng), Cell::new(4, 9));
        assert_eq!(rng.calls, 1);
    }

    #[test]
    fn random_food_respects_window_and_grid() {
        macroquad::rand::srand(7);
        let prev = Cell::new(4, 6);
        for _ in 0..200 {
            let c = place_food(GRID, Some(prev), &mut GlobalRng);
            assert!(GRID.contains(c));
            assert!((c.x - prev.x).abs() >= 3 || (c.y - prev.y).abs() >= 3);
        }
    }

    #[test]
    fn random_play_never_leaves_grid() {
        macroquad::rand::srand(11);
        let mut rng = GlobalRng;
        let mut game = Game::new(GRID, 11, &mut rng);
        let dirs = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
        for i in 0..2000 {
            game.steer(dirs[macroquad::rand::gen_range(0, dirs.len())]);
            let before = game.snake().len();
            let step = game.update(&mut rng);
            let after = game.snake().len();
            match step {
                Step::Moved => assert_eq!(after, before, "tick {i}"),
                Step::Ate => assert_eq!(after, before + 1, "tick {i}"),
                Step::WallReset => assert_eq!(after, 1),
                Step::Won | Step::Halted => assert_eq!(after, before),
            }
            assert!(after <= game.max_len);
            assert!(GRID.contains(game.head()));
            if game.is_finished() {
                game.reset(&mut rng);
            }
        }
    }
}

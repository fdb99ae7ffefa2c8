use super::{
    action::Direction,
    config::GameConfig,
    state::{Collision, Position, Snake},
};
use rand::Rng;

/// Outcome of advancing the snake by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set when the attempted move collided; the snake is left untouched
    pub collision: Option<Collision>,
}

/// Handles the per-tick motion, collision, and food-placement logic
pub struct Engine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl Engine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the fixed starting snake: three vertical segments with the
    /// head at the grid center and the body extending downward
    pub fn initial_snake(&self) -> Snake {
        let center = (self.config.grid_size / 2) as i32;
        Snake::new(
            Position::new(center, center),
            Direction::Up,
            self.config.initial_snake_length,
        )
    }

    /// Move the snake one cell in `direction`. On collision the snake is
    /// returned to the caller unchanged so the last good state can be
    /// displayed; otherwise the step is committed, growing the body when
    /// the new head lands on `food`.
    pub fn advance(&self, snake: &mut Snake, direction: Direction, food: Position) -> Advance {
        let new_head = snake.head().moved_in_direction(direction);

        if let Some(collision) = self.check_collision(new_head, snake) {
            return Advance {
                ate_food: false,
                collision: Some(collision),
            };
        }

        let ate_food = new_head == food;
        snake.advance_to(new_head, ate_food);

        Advance {
            ate_food,
            collision: None,
        }
    }

    /// Check a candidate head position against the walls and the full
    /// pre-move body. The tail cell counts even when it is about to be
    /// vacated this tick; see `Snake::occupies`.
    pub fn check_collision(&self, head: Position, snake: &Snake) -> Option<Collision> {
        if !self.in_bounds(head) {
            return Some(Collision::Wall);
        }

        if snake.occupies(head) {
            return Some(Collision::SelfHit);
        }

        None
    }

    /// Check if a position is within the grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        let size = self.config.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Draw random cells until one misses the snake. Assumes the grid is
    /// never fully occupied; with a 20x20 grid that holds for any
    /// reachable game.
    pub fn place_food(&mut self, snake: &Snake) -> Position {
        loop {
            let x = self.rng.gen_range(0..self.config.grid_size) as i32;
            let y = self.rng.gen_range(0..self.config.grid_size) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return pos;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::new(GameConfig::default())
    }

    #[test]
    fn test_initial_snake_layout() {
        let snake = engine().initial_snake();
        assert_eq!(
            snake.body,
            vec![
                Position::new(10, 10),
                Position::new(10, 11),
                Position::new(10, 12),
            ]
        );
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let engine = engine();
        let mut snake = engine.initial_snake();

        let result = engine.advance(&mut snake, Direction::Up, Position::new(0, 0));

        assert!(!result.ate_food);
        assert_eq!(result.collision, None);
        assert_eq!(
            snake.body,
            vec![
                Position::new(10, 9),
                Position::new(10, 10),
                Position::new(10, 11),
            ]
        );
    }

    #[test]
    fn test_eating_grows_by_one() {
        let engine = engine();
        let mut snake = engine.initial_snake();

        let result = engine.advance(&mut snake, Direction::Up, Position::new(10, 9));

        assert!(result.ate_food);
        assert_eq!(result.collision, None);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(10, 12));
    }

    #[test]
    fn test_wall_collision_all_edges() {
        let engine = engine();
        let snake = engine.initial_snake();

        for y in 0..20 {
            assert_eq!(
                engine.check_collision(Position::new(-1, y), &snake),
                Some(Collision::Wall)
            );
            assert_eq!(
                engine.check_collision(Position::new(20, y), &snake),
                Some(Collision::Wall)
            );
        }
        for x in 0..20 {
            assert_eq!(
                engine.check_collision(Position::new(x, -1), &snake),
                Some(Collision::Wall)
            );
            assert_eq!(
                engine.check_collision(Position::new(x, 20), &snake),
                Some(Collision::Wall)
            );
        }
    }

    #[test]
    fn test_wall_collision_leaves_snake_unchanged() {
        let engine = engine();
        let mut snake = Snake::new(Position::new(0, 5), Direction::Left, 3);
        let before = snake.clone();

        let result = engine.advance(&mut snake, Direction::Left, Position::new(9, 9));

        assert_eq!(result.collision, Some(Collision::Wall));
        assert!(!result.ate_food);
        assert_eq!(snake, before);
    }

    #[test]
    fn test_self_collision_against_body() {
        let engine = engine();
        // Body: (5,5), (4,5), (3,5), (2,5); a head arriving at (4,5) hits it
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        engine.advance(&mut snake, Direction::Down, Position::new(9, 9)); // (5,6)
        engine.advance(&mut snake, Direction::Left, Position::new(9, 9)); // (4,6)

        let result = engine.advance(&mut snake, Direction::Up, Position::new(9, 9)); // (4,5)

        assert_eq!(result.collision, Some(Collision::SelfHit));
    }

    #[test]
    fn test_moving_into_vacating_tail_still_collides() {
        // Square loop: head (5,5), tail (5,6). Moving down targets the tail
        // cell; the tail would be vacated this tick, but the pre-move body
        // check still flags it.
        let engine = engine();
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        snake.body = vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(4, 6),
            Position::new(5, 6),
        ];

        let result = engine.advance(&mut snake, Direction::Down, Position::new(9, 9));

        assert_eq!(result.collision, Some(Collision::SelfHit));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_food_placement_avoids_snake_and_stays_in_bounds() {
        let mut engine = engine();
        let snake = engine.initial_snake();

        for _ in 0..100 {
            let food = engine.place_food(&snake);
            assert!(engine.in_bounds(food));
            assert!(!snake.occupies(food));
        }
    }

    #[test]
    fn test_food_placement_with_one_free_cell() {
        // Fill every cell but one with a synthetic body; sampling must
        // land on the single free cell.
        let mut engine = engine();
        let free = Position::new(7, 3);
        let mut body = Vec::new();
        for y in 0..20 {
            for x in 0..20 {
                let pos = Position::new(x, y);
                if pos != free {
                    body.push(pos);
                }
            }
        }
        let snake = Snake { body };

        assert_eq!(engine.place_food(&snake), free);
    }
}

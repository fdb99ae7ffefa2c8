use super::{
    action::{Direction, Intent},
    config::GameConfig,
    engine::{Advance, Engine},
    state::{Phase, Position, Snake},
};

/// Read-only view of the committed state, published to the renderer after
/// every transition
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Ordered segments, head first
    pub snake: &'a [Position],
    pub food: Position,
    pub score: u32,
    pub phase: Phase,
}

/// Owns all mutable game state and arbitrates inputs against the current
/// phase. The view layer only ever sees a [`Snapshot`].
pub struct GameSession {
    engine: Engine,
    phase: Phase,
    snake: Snake,
    food: Position,
    score: u32,
    /// Latest accepted non-reversing direction, applied at the next tick.
    /// Multiple direction changes between ticks overwrite each other.
    pending_direction: Direction,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = Engine::new(config);
        let snake = engine.initial_snake();
        let food = engine.place_food(&snake);

        Self {
            engine,
            phase: Phase::NotStarted,
            snake,
            food,
            score: 0,
            pending_direction: Direction::Up,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.snake.body,
            food: self.food,
            score: self.score,
            phase: self.phase,
        }
    }

    /// The explicit start action. Distinct from the key mapper: movement
    /// and pause keys do nothing before the game starts.
    pub fn start(&mut self) {
        if self.phase == Phase::NotStarted {
            self.reset_round();
            self.phase = Phase::Running;
        }
    }

    /// Apply a player intent, filtered by the current phase
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Move(direction) => {
                // Reversals are discarded; any other direction overwrites
                // the pending one
                if self.phase == Phase::Running
                    && !direction.is_opposite(self.pending_direction)
                {
                    self.pending_direction = direction;
                }
            }
            Intent::TogglePause => match self.phase {
                Phase::Running => self.phase = Phase::Paused,
                Phase::Paused => self.phase = Phase::Running,
                _ => {}
            },
            Intent::Restart => {
                if self.phase == Phase::GameOver {
                    self.reset_round();
                    self.phase = Phase::Running;
                }
            }
        }
    }

    /// Advance the simulation one step. Only acts while Running; on
    /// collision the pre-tick snake is kept frozen for display and the
    /// session enters GameOver.
    pub fn tick(&mut self) -> Advance {
        if self.phase != Phase::Running {
            return Advance {
                ate_food: false,
                collision: None,
            };
        }

        let result = self
            .engine
            .advance(&mut self.snake, self.pending_direction, self.food);

        if result.collision.is_some() {
            self.phase = Phase::GameOver;
        } else if result.ate_food {
            self.score += self.engine.config().food_reward;
            self.food = self.engine.place_food(&self.snake);
        }

        result
    }

    fn reset_round(&mut self) {
        self.snake = self.engine.initial_snake();
        self.food = self.engine.place_food(&self.snake);
        self.score = 0;
        self.pending_direction = Direction::Up;
    }
}

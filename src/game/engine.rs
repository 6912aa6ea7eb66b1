use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

use super::{
    config::{Boundary, CollisionPolicy, GameConfig},
    direction::Direction,
    food::FoodSpawner,
    state::{CollisionType, GameState, Snake},
};

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether the score passed the stored high score this step
    pub new_record: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
///
/// Owns the configuration and the random source; the mutable game lives in
/// a separate [`GameState`] so callers can render it between ticks.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    spawner: FoodSpawner,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let spawner = FoodSpawner::new(config.grid_width, config.grid_height);
        Self {
            config,
            spawner,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game, carrying over the best score seen so far
    pub fn reset(&mut self, high_score: u32) -> GameState {
        let snake = Snake::new(self.config.start_position, self.config.start_direction);
        let food = self
            .spawner
            .spawn(&mut self.rng, &snake.body)
            .unwrap_or(snake.head());

        GameState::new(snake, food, self.config.grid_width, self.config.grid_height)
            .with_high_score(high_score)
    }

    /// Apply a direction change right away, unless it reverses the snake
    ///
    /// Returns true if the direction was accepted.
    pub fn steer(&self, state: &mut GameState, direction: Direction) -> bool {
        if !state.is_alive || state.snake.direction.is_opposite(direction) {
            return false;
        }
        state.snake.direction = direction;
        true
    }

    /// Execute one movement tick
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_alive {
            return StepResult {
                terminated: true,
                info: StepInfo::default(),
            };
        }

        let mut new_head = state.snake.head().moved_in_direction(state.snake.direction);
        if self.config.boundary == Boundary::Wrap {
            new_head = new_head.wrapped(state.grid_width, state.grid_height);
        }

        state.snake.slide_to(new_head);
        state.ticks += 1;

        if let Some(collision_type) = self.check_collision(state) {
            info!(?collision_type, score = state.score, "game over");
            state.is_alive = false;

            return StepResult {
                terminated: true,
                info: StepInfo {
                    collision_type: Some(collision_type),
                    ..StepInfo::default()
                },
            };
        }

        let ate_food = new_head == state.food;
        if ate_food {
            state.score += 1;
            state.snake.grow();
            self.respawn_food(state);
        }

        let new_record = state.score > state.high_score;
        if new_record {
            state.high_score = state.score;
        }

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_food,
                new_record,
                collision_type: None,
            },
        }
    }

    /// Only consulted under [`CollisionPolicy::GameOver`]
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        if self.config.collisions == CollisionPolicy::Ignore {
            return None;
        }

        let head = state.snake.head();
        if !state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }
        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn respawn_food(&mut self, state: &mut GameState) {
        match self.spawner.spawn(&mut self.rng, &state.snake.body) {
            Some(food) => {
                debug!(x = food.x, y = food.y, "food spawned");
                state.food = food;
            }
            None => warn!("no free cell left for food, keeping previous position"),
        }
    }
}

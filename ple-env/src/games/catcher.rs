//! Catcher: move a paddle at the bottom of the screen to catch falling fruits.
use crate::{
    engine::{Action, Color, Game, GameArgs, GameState, Rewards, SharedRng, Surface},
    keymap::{K_A, K_D},
    PleEnvError,
};
use anyhow::Result;
use log::warn;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{cell::RefCell, rc::Rc};

const FRUIT_COLOR: Color = [255, 120, 120];
const PADDLE_COLOR: Color = [255, 255, 255];
const BACKGROUND_COLOR: Color = [0, 0, 0];
const MIN_SCREEN_SIZE: usize = 16;

// Weight of the distance penalty added at every tick with the `dense` reward type.
const DENSE_SCALE: f64 = 0.01;

fn invalid_arg(arg: &str, reason: &str) -> PleEnvError {
    PleEnvError::InvalidGameArg {
        game: "Catcher".to_string(),
        arg: arg.to_string(),
        reason: reason.to_string(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum RewardType {
    Sparse,
    Dense,
}

/// Catcher game.
///
/// The player moves a paddle left (`a`) and right (`d`). Catching a fruit scores
/// [`Rewards::positive`], letting it fall off the screen scores [`Rewards::negative`]
/// and costs a life. The game is over when all lives are lost.
///
/// Constructor arguments: `width` and `height` of the screen (64), `init_lives` (3).
pub struct Catcher {
    width: usize,
    height: usize,
    init_lives: usize,
    rewards: Rewards,
    reward_type: RewardType,
    rng: SharedRng,

    fruit_size: f64,
    fruit_fall_speed: f64,
    paddle_width: f64,
    paddle_height: f64,
    paddle_speed: f64,

    player_x: f64,
    player_vel: f64,
    fruit_x: f64,
    fruit_y: f64,
    lives: usize,
    score: f64,
}

impl Catcher {
    /// Creates a game with the given screen size and number of lives.
    ///
    /// Width and height must be at least 16 pixels and `init_lives` positive.
    pub fn new(width: usize, height: usize, init_lives: usize) -> Result<Self> {
        for (arg, v) in [("width", width), ("height", height)] {
            if v < MIN_SCREEN_SIZE {
                let reason = format!("must be at least {}", MIN_SCREEN_SIZE);
                return Err(invalid_arg(arg, &reason).into());
            }
        }
        if init_lives == 0 {
            return Err(invalid_arg("init_lives", "must be positive").into());
        }

        let (w, h) = (width as f64, height as f64);
        let mut game = Self {
            width,
            height,
            init_lives,
            rewards: Rewards::default(),
            reward_type: RewardType::Sparse,
            rng: Rc::new(RefCell::new(StdRng::seed_from_u64(24))),
            fruit_size: (0.06 * w).round().max(1.0),
            fruit_fall_speed: 0.00095 * h,
            paddle_width: (0.2 * w).round(),
            paddle_height: (0.04 * h).round().max(1.0),
            paddle_speed: 0.021 * w,
            player_x: 0.0,
            player_vel: 0.0,
            fruit_x: 0.0,
            fruit_y: 0.0,
            lives: init_lives,
            score: 0.0,
        };
        game.init();
        Ok(game)
    }

    /// Creates a game from constructor arguments.
    pub fn from_args(args: &GameArgs) -> Result<Self> {
        let mut width = 64;
        let mut height = 64;
        let mut init_lives = 3;

        for (k, v) in args.iter() {
            let v = v
                .as_u64()
                .ok_or_else(|| invalid_arg(k, "expected a non-negative integer"))?
                as usize;
            match k.as_str() {
                "width" => width = v,
                "height" => height = v,
                "init_lives" => init_lives = v,
                _ => return Err(invalid_arg(k, "unknown argument").into()),
            }
        }

        Self::new(width, height, init_lives)
    }

    /// Remaining lives.
    pub fn lives(&self) -> usize {
        self.lives
    }

    fn paddle_y(&self) -> f64 {
        self.height as f64 - 2.0 * self.paddle_height
    }

    fn reset_fruit(&mut self) {
        let size = self.fruit_size as usize;
        let xs: Vec<usize> = (2 * size..self.width - 2 * size).step_by(size).collect();
        let ys: Vec<usize> = (size..(self.height / 2).max(size + 1))
            .step_by(size)
            .collect();
        let mut rng = self.rng.borrow_mut();
        self.fruit_x = xs[rng.gen_range(0..xs.len())] as f64;
        self.fruit_y = ys[rng.gen_range(0..ys.len())] as f64;
    }

    fn fruit_caught(&self) -> bool {
        let half = self.fruit_size / 2.0;
        let (px, py) = (self.player_x - self.paddle_width / 2.0, self.paddle_y());
        self.fruit_x + half > px
            && self.fruit_x - half < px + self.paddle_width
            && self.fruit_y + half > py
            && self.fruit_y - half < py + self.paddle_height
    }

    fn move_paddle(&mut self, dx: f64) {
        let half = self.paddle_width / 2.0;
        self.player_vel = (self.player_vel + dx) * 0.9;
        let x = self.player_x + self.player_vel;
        if x <= half || x >= self.width as f64 - half {
            self.player_vel = 0.0;
        }
        self.player_x = x.clamp(half, self.width as f64 - half);
    }
}

impl Game for Catcher {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn actions(&self) -> Vec<u32> {
        vec![K_A, K_D]
    }

    fn rewards(&self) -> &Rewards {
        &self.rewards
    }

    fn set_reward_type(&mut self, reward_type: &str) {
        self.reward_type = match reward_type {
            "sparse" => RewardType::Sparse,
            "dense" => RewardType::Dense,
            _ => {
                warn!("Unknown reward type {}, use sparse", reward_type);
                RewardType::Sparse
            }
        };
    }

    fn set_rng(&mut self, rng: SharedRng) {
        self.rng = rng;
    }

    fn init(&mut self) {
        self.score = 0.0;
        self.lives = self.init_lives;
        self.player_x = self.width as f64 / 2.0;
        self.player_vel = 0.0;
        self.reset_fruit();
    }

    fn tick(&mut self, dt: f64, action: Action) {
        self.score += self.rewards.tick;

        let dx = match action {
            Some(K_A) => -self.paddle_speed,
            Some(K_D) => self.paddle_speed,
            _ => 0.0,
        };

        if self.fruit_y >= self.height as f64 {
            self.score += self.rewards.negative;
            self.lives = self.lives.saturating_sub(1);
            self.reset_fruit();
        }

        if self.fruit_caught() {
            self.score += self.rewards.positive;
            self.reset_fruit();
        }

        self.move_paddle(dx);
        self.fruit_y += self.fruit_fall_speed * dt;

        if self.reward_type == RewardType::Dense {
            self.score -= DENSE_SCALE * (self.player_x - self.fruit_x).abs() / self.width as f64;
        }

        if self.lives == 0 {
            self.score += self.rewards.loss;
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.fill(BACKGROUND_COLOR);

        let half = self.fruit_size / 2.0;
        surface.fill_rect(
            (self.fruit_x - half).round() as i64,
            (self.fruit_y - half).round() as i64,
            self.fruit_size as i64,
            self.fruit_size as i64,
            FRUIT_COLOR,
        );
        surface.fill_rect(
            (self.player_x - self.paddle_width / 2.0).round() as i64,
            self.paddle_y().round() as i64,
            self.paddle_width as i64,
            self.paddle_height as i64,
            PADDLE_COLOR,
        );
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn game_over(&self) -> bool {
        self.lives == 0
    }

    fn state(&self) -> GameState {
        GameState::from([
            ("player_x".to_string(), self.player_x),
            ("player_vel".to_string(), self.player_vel),
            ("fruit_x".to_string(), self.fruit_x),
            ("fruit_y".to_string(), self.fruit_y),
        ])
    }
}

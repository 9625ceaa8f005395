use anyhow::Result;
use ple_core::{DefaultEvaluator, Env as _, Evaluator as _, Space as _};
use ple_env::{
    engine::{Action, Game, GameArgs, GameRegistry, GameState, Rewards, SharedRng, Surface},
    keymap::{K_S, K_W},
    util::RandomPolicy,
    ObsType, PleAct, PleEnv, PleEnvConfig, PleEnvError, RenderMode,
};
use rand::Rng;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

const ROOT: &str = "mockgames";

type ActionLog = Rc<RefCell<Vec<Action>>>;

/// Game logging the keys it receives. Holding `w` scores a random amount drawn
/// at the start of each episode, which lasts five ticks.
struct Mock {
    width: usize,
    height: usize,
    rewards: Rewards,
    log: ActionLog,
    rng: Option<SharedRng>,
    target: f64,
    score: f64,
    ticks: usize,
}

impl Game for Mock {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn actions(&self) -> Vec<u32> {
        vec![K_W, K_S]
    }

    fn rewards(&self) -> &Rewards {
        &self.rewards
    }

    fn set_reward_type(&mut self, _reward_type: &str) {}

    fn set_rng(&mut self, rng: SharedRng) {
        self.rng = Some(rng);
    }

    fn init(&mut self) {
        self.score = 0.0;
        self.ticks = 0;
        self.target = match self.rng.as_ref() {
            Some(rng) => rng.borrow_mut().gen_range(1.0..2.0),
            None => 1.0,
        };
    }

    fn tick(&mut self, _dt: f64, action: Action) {
        self.log.borrow_mut().push(action);
        self.ticks += 1;
        if action == Some(K_W) {
            self.score += self.target;
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.fill([10, 20, 30]);
        surface.fill_rect(0, 0, 4 * self.ticks as i64, 8, [255, 255, 255]);
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn game_over(&self) -> bool {
        self.ticks >= 5
    }

    fn state(&self) -> GameState {
        [
            ("target".to_string(), self.target),
            ("ticks".to_string(), self.ticks as f64),
        ]
        .into_iter()
        .collect()
    }
}

fn arg(args: &GameArgs, key: &str, default: usize) -> usize {
    args.get(key)
        .and_then(|v| v.as_u64())
        .map_or(default, |v| v as usize)
}

fn registry(log: &ActionLog) -> GameRegistry {
    let log = log.clone();
    let mut registry = GameRegistry::builtin();
    registry.register_external(
        ROOT,
        "Mock",
        Box::new(move |args| {
            Ok(Box::new(Mock {
                width: arg(args, "width", 48),
                height: arg(args, "height", 32),
                rewards: Rewards {
                    loss: -10.0,
                    win: 10.0,
                    ..Rewards::default()
                },
                log: log.clone(),
                rng: None,
                target: 0.0,
                score: 0.0,
                ticks: 0,
            }) as Box<dyn Game>)
        }),
    );
    registry
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mock_config(obs_type: ObsType) -> PleEnvConfig {
    PleEnvConfig::default()
        .root_game_name(ROOT)
        .name("Mock")
        .obs_type(obs_type)
}

fn mock_env(obs_type: ObsType) -> Result<(PleEnv, ActionLog)> {
    init_logger();
    let log = ActionLog::default();
    let env = PleEnv::with_registry(&mock_config(obs_type), &registry(&log))?;
    Ok((env, log))
}

fn error(res: Result<impl std::fmt::Debug>) -> PleEnvError {
    res.unwrap_err().downcast::<PleEnvError>().unwrap()
}

#[test]
fn test_image_obs_shape() -> Result<()> {
    let (mut env, _) = mock_env(ObsType::Image)?;

    assert_eq!(env.screen_dims(), (48, 32));
    assert_eq!(env.n_actions(), 3);
    assert_eq!(env.action_space().n, 3);
    assert_eq!(env.action_set(), &[Some(K_W), Some(K_S), None]);
    assert_eq!(env.observation_space().shape(), &[64, 64, 3]);

    let obs = env.reset()?;
    assert_eq!(obs.as_image().unwrap().dim(), (64, 64, 3));
    let (obs, _, _, _) = env.step(0)?;
    assert_eq!(obs.obs_type(), ObsType::Image);
    assert_eq!(obs.as_image().unwrap().dim(), (64, 64, 3));
    Ok(())
}

#[test]
fn test_state_obs() -> Result<()> {
    let (mut env, _) = mock_env(ObsType::State)?;

    let obs = env.reset()?;
    let state = obs.as_state().unwrap();
    assert_eq!(state["ticks"], 0.0);
    assert!((1.0..2.0).contains(&state["target"]));

    let (obs, _, _, _) = env.step(2)?;
    assert_eq!(obs.as_state().unwrap()["ticks"], 1.0);
    Ok(())
}

#[test]
fn test_action_applied_once() -> Result<()> {
    let (mut env, log) = mock_env(ObsType::State)?;
    let obs = env.reset()?;
    let target = obs.as_state().unwrap()["target"];

    let (_, reward, terminal, _) = env.step(1)?;
    assert_eq!(reward, 0.0);
    assert!(!terminal);
    assert_eq!(*log.borrow(), vec![Some(K_S)]);

    let (_, reward, _, _) = env.step(0)?;
    assert_eq!(reward, target as f32);
    let (_, reward, _, _) = env.step(2)?;
    assert_eq!(reward, 0.0);
    assert_eq!(*log.borrow(), vec![Some(K_S), Some(K_W), None]);
    Ok(())
}

#[test]
fn test_frame_skip() -> Result<()> {
    let log = ActionLog::default();
    let config = mock_config(ObsType::State).frame_skip(2);
    let mut env = PleEnv::with_registry(&config, &registry(&log))?;
    env.reset()?;

    env.step(0)?;
    assert_eq!(*log.borrow(), vec![Some(K_W), Some(K_W)]);
    Ok(())
}

#[test]
fn test_yaml_rates() -> Result<()> {
    // The rate is fixed, a stray `fps` key is ignored.
    let config: PleEnvConfig = serde_yaml::from_str("obs_type: image\nfps: 0\n")?;
    let mut env = PleEnv::new(&config)?;
    env.reset()?;
    for a in [2, 0, 1] {
        let (obs, _, _, _) = env.step(a)?;
        assert_eq!(obs.as_image().unwrap().dim(), (64, 64, 3));
    }

    let config: PleEnvConfig = serde_yaml::from_str("obs_type: state\nframe_skip: 0\n")?;
    assert_eq!(
        error(PleEnv::new(&config)),
        PleEnvError::InvalidDriverConfig("frame_skip".to_string())
    );
    Ok(())
}

#[test]
fn test_action_out_of_range() -> Result<()> {
    let (mut env, log) = mock_env(ObsType::State)?;
    env.reset()?;

    assert_eq!(
        error(env.step(3)),
        PleEnvError::ActionOutOfRange {
            index: 3,
            n_actions: 3
        }
    );
    assert!(log.borrow().is_empty());
    Ok(())
}

#[test]
fn test_step_after_terminal() -> Result<()> {
    let (mut env, log) = mock_env(ObsType::State)?;
    env.reset()?;

    let mut terminal = false;
    for _ in 0..5 {
        terminal = env.step(0)?.2;
    }
    assert!(terminal);

    let (_, reward, terminal, _) = env.step(0)?;
    assert_eq!(reward, 0.0);
    assert!(terminal);
    assert_eq!(log.borrow().len(), 5);

    env.reset()?;
    let (_, _, terminal, _) = env.step(0)?;
    assert!(!terminal);
    Ok(())
}

#[test]
fn test_obs_type_missing() {
    let called = Rc::new(Cell::new(false));
    let mut registry = GameRegistry::new();
    {
        let called = called.clone();
        registry.register_external(
            ROOT,
            "Mock",
            Box::new(move |_| {
                called.set(true);
                Err(anyhow::anyhow!("must not be built"))
            }),
        );
    }
    let config = PleEnvConfig::default().root_game_name(ROOT).name("Mock");

    assert_eq!(
        error(PleEnv::with_registry(&config, &registry)),
        PleEnvError::ObsTypeMissing
    );
    assert!(!called.get());
}

#[test]
fn test_unknown_game() {
    let log = ActionLog::default();
    let registry = registry(&log);

    let config = PleEnvConfig::default()
        .root_game_name("nogames")
        .name("Mock")
        .obs_type(ObsType::State);
    assert_eq!(
        error(PleEnv::with_registry(&config, &registry)),
        PleEnvError::ModuleNotFound("nogames.envs".to_string())
    );

    let config = mock_config(ObsType::State).name("Pong");
    assert_eq!(
        error(PleEnv::with_registry(&config, &registry)),
        PleEnvError::GameNotFound {
            module: "mockgames.envs".to_string(),
            name: "Pong".to_string()
        }
    );

    let config = PleEnvConfig::default()
        .name("Pong")
        .obs_type(ObsType::State);
    assert_eq!(
        error(PleEnv::new(&config)),
        PleEnvError::ModuleNotFound("ple.games.pong".to_string())
    );
}

#[test]
fn test_game_args_forwarded() -> Result<()> {
    let log = ActionLog::default();
    let config = mock_config(ObsType::Image).game_arg("width", 80);
    let env = PleEnv::with_registry(&config, &registry(&log))?;

    assert_eq!(env.screen_dims(), (80, 32));
    assert_eq!(env.observation_space().shape(), &[64, 64, 3]);
    Ok(())
}

#[test]
fn test_invalid_catcher_arg() {
    let config = PleEnvConfig::default()
        .obs_type(ObsType::State)
        .game_arg("speed", 3);

    assert!(matches!(
        error(PleEnv::new(&config)),
        PleEnvError::InvalidGameArg { .. }
    ));
}

#[test]
fn test_render_rgb_array() -> Result<()> {
    for obs_type in [ObsType::Image, ObsType::State] {
        let (mut env, _) = mock_env(obs_type)?;
        env.reset()?;
        let (obs, _, _, _) = env.step(0)?;

        let img = env.render(RenderMode::RgbArray, false)?.unwrap();
        assert_eq!(img.dim(), (64, 64, 3));
        if let Some(obs) = obs.as_image() {
            assert_eq!(&img, obs);
        }
    }
    Ok(())
}

#[test]
fn test_render_image_content() -> Result<()> {
    let (mut env, _) = mock_env(ObsType::Image)?;
    env.reset()?;
    let img = env.render(RenderMode::RgbArray, false)?.unwrap();

    // Background only before the first tick.
    assert!(img
        .as_slice()
        .unwrap()
        .chunks_exact(3)
        .all(|px| px == [10, 20, 30]));
    Ok(())
}

#[test]
fn test_render_mode_parse() {
    assert_eq!("rgb_array".parse::<RenderMode>(), Ok(RenderMode::RgbArray));
    assert_eq!(
        "rgb".parse::<RenderMode>(),
        Err(PleEnvError::InvalidRenderMode("rgb".to_string()))
    );
}

#[test]
fn test_close() -> Result<()> {
    let (mut env, _) = mock_env(ObsType::Image)?;

    env.close();
    env.close();
    assert_eq!(env.render(RenderMode::Human, true)?, None);
    assert_eq!(env.render(RenderMode::RgbArray, true)?, None);
    Ok(())
}

#[cfg(not(feature = "viewer"))]
#[test]
fn test_human_render_without_viewer() -> Result<()> {
    let (mut env, _) = mock_env(ObsType::Image)?;
    env.reset()?;

    assert_eq!(
        error(env.render(RenderMode::Human, false)),
        PleEnvError::ViewerUnavailable
    );
    env.close();
    Ok(())
}

#[test]
fn test_seed_mock() -> Result<()> {
    let (mut env1, _) = mock_env(ObsType::State)?;
    let (mut env2, _) = mock_env(ObsType::State)?;

    env1.seed(3);
    env2.seed(3);
    assert_eq!(env1.reset()?, env2.reset()?);

    env2.seed(4);
    assert_ne!(env1.reset()?, env2.reset()?);

    env1.seed(7);
    let obs1 = env1.reset()?;
    env1.seed(7);
    assert_eq!(env1.reset()?, obs1);
    Ok(())
}

#[test]
fn test_seed_catcher() -> Result<()> {
    let config = PleEnvConfig::default().obs_type(ObsType::State);
    let mut env1 = PleEnv::new(&config)?;
    let mut env2 = PleEnv::new(&config)?;
    env1.seed(11);
    env2.seed(11);
    env1.reset()?;
    env2.reset()?;

    for t in 0..200 {
        let a = t % 3;
        let (obs1, r1, d1, _) = env1.step(a)?;
        let (obs2, r2, d2, _) = env2.step(a)?;
        assert_eq!(obs1, obs2);
        assert_eq!((r1, d1), (r2, d2));
    }
    Ok(())
}

#[test]
fn test_reward_range() -> Result<()> {
    let (env, _) = mock_env(ObsType::State)?;
    assert_eq!(env.reward_range(), (-10.0, 10.0));
    Ok(())
}

#[test]
fn test_keys_to_action() {
    let map = PleEnv::keys_to_action();

    assert_eq!(map.len(), 18);
    assert_eq!(map[&Vec::new()], 0);
    assert_eq!(map[&vec![K_W]], 2);
    assert_eq!(map[&vec![K_S]], 5);
}

#[test]
fn test_env_trait() -> Result<()> {
    let config = mock_config(ObsType::State).max_steps(Some(3));
    let log = ActionLog::default();
    let mut env = PleEnv::with_registry(&config, &registry(&log))?;
    env.seed(0);
    ple_core::Env::reset(&mut env)?;

    let (step, record) = ple_core::Env::step(&mut env, &PleAct::new(0))?;
    assert_eq!(step.act, PleAct::new(0));
    assert!(!step.is_done());
    assert_eq!(record.get_scalar("reward")?, step.reward);
    assert_eq!(record.get_scalar("terminal")?, 0.0);

    ple_core::Env::step(&mut env, &PleAct::new(1))?;
    let (step, _) = env.step_with_reset(&PleAct::new(1))?;
    assert!(step.is_truncated);
    assert!(!step.is_terminated);
    assert!(step.init_obs.is_some());
    Ok(())
}

#[test]
fn test_evaluate_catcher() -> Result<()> {
    init_logger();
    let config = PleEnvConfig::default()
        .obs_type(ObsType::Image)
        .max_steps(Some(30));
    let mut policy = RandomPolicy::new(3, 0);
    let mut evaluator = DefaultEvaluator::<PleEnv>::new(&config, 0, 2)?;
    let record = evaluator.evaluate(&mut policy)?;

    let len = record.get_scalar("Episode length")?;
    assert!(len > 0.0 && len <= 30.0);
    assert!(record.get_scalar("Episode return")?.is_finite());
    assert_eq!(evaluator.env_mut().n_actions(), 3);
    Ok(())
}

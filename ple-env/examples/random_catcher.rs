use anyhow::Result;
use clap::Parser;
use ple_core::Policy;
use ple_env::{util::RandomPolicy, ObsType, PleEnv, PleEnvConfig, RenderMode};

const MAX_STEPS: usize = 1000;

/// Plays a game with a random policy
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Name of the game
    #[arg(short, long, default_value = "Catcher")]
    game: String,

    /// Observation type, `state` or `image`
    #[arg(short, long, default_value = "state")]
    obs_type: ObsType,

    /// Number of episodes
    #[arg(short, long, default_value_t = 3)]
    episodes: usize,

    /// Random seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Shows the screen, requires the `viewer` feature
    #[arg(short, long, default_value_t = false)]
    render: bool,

    /// YAML file of the environment configuration, overrides the other options
    #[arg(short, long)]
    config: Option<String>,
}

fn env_config(args: &Args) -> Result<PleEnvConfig> {
    match &args.config {
        Some(path) => PleEnvConfig::load(path),
        None => Ok(PleEnvConfig::default()
            .name(args.game.clone())
            .obs_type(args.obs_type)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut env = PleEnv::new(&env_config(&args)?)?;
    env.seed(args.seed);
    let mut policy = RandomPolicy::new(env.n_actions(), args.seed);

    for episode in 0..args.episodes {
        let mut obs = env.reset()?;
        let (mut ret, mut len) = (0.0, 0);

        loop {
            let act = policy.sample(&obs);
            let (next_obs, reward, terminal, _) = env.step(act.act)?;
            if args.render {
                env.render(RenderMode::Human, false)?;
            }
            ret += reward;
            len += 1;
            if terminal || len >= MAX_STEPS {
                break;
            }
            obs = next_obs;
        }

        log::info!("Episode {}: return = {}, length = {}", episode, ret, len);
    }

    env.close();
    Ok(())
}

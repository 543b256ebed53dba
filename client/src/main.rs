mod cli;
mod play;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{Cli, Commands};
use common::{get_env_usize, ConfigLoader, FsExt};
use dotenv::dotenv;
use engine::GameEngine;
use env_logger::Env;
use log::info;
use model::{CheckpointStore, DenseEvaluator, DenseOptions, Evaluator};
use play::play_one;
use self_learn::{SelfLearn, SelfLearnOptions, SelfLearnPersistance};
use self_play::SelfPlayOptions;

const CHECKPOINT_DIR: &str = "./saved";

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::SelfLearn(self_learn_args) => {
            let config_path = self_learn_args.config.relative_to_cwd()?;
            let config = ConfigLoader::new(config_path, "self_learn".to_string())?;

            let mut self_learn_options: SelfLearnOptions = config.load()?;
            let self_play_options: SelfPlayOptions = config.load()?;

            if let Some(iterations) = get_env_usize("SELF_LEARN_ITERATIONS")? {
                self_learn_options.iterations = iterations;
            }

            info!("{:?}", self_learn_options);
            info!("{:?}", self_play_options);

            let engine = connect4::Engine::new();
            let mut evaluator = create_evaluator(&config, &engine)?;
            let games_dir = config.get_optional_relative_path("games_dir")?;

            let mut self_learn =
                SelfLearn::new(&engine, &mut evaluator, &self_learn_options, &self_play_options);

            if let Some(games_dir) = games_dir {
                let persistance =
                    SelfLearnPersistance::new(games_dir, self_learn_options.checkpoint_name.clone())?;
                self_learn = self_learn.with_persistance(persistance);
            }

            self_learn.learn()?
        }
        Commands::Play(play_args) => {
            let config_path = play_args.config.relative_to_cwd()?;
            let config = ConfigLoader::new(config_path, "play".to_string())?;

            let self_learn_options: SelfLearnOptions = config.load()?;
            let self_play_options: SelfPlayOptions = config.load()?;
            let checkpoint_name = &self_learn_options.checkpoint_name;

            let engine = connect4::Engine::new();
            let mut evaluator = create_evaluator(&config, &engine)?;

            if !evaluator.has_checkpoint(checkpoint_name) {
                return Err(anyhow!("Checkpoint {} was not found", checkpoint_name));
            }

            evaluator.restore_checkpoint(checkpoint_name)?;

            let game = play_one(&engine, &evaluator, &self_play_options)?;

            println!("{}", game.final_position);
            println!("Plies: {}, {}", game.plies, game.result);
        }
    }

    Ok(())
}

fn create_evaluator<E: GameEngine>(config: &ConfigLoader, engine: &E) -> Result<DenseEvaluator> {
    let dense_options: DenseOptions = config.load()?;
    let checkpoint_dir = match config.get_optional_relative_path("checkpoint_dir")? {
        Some(checkpoint_dir) => checkpoint_dir,
        None => CHECKPOINT_DIR.relative_to_cwd()?,
    };

    info!("{:?}", dense_options);
    info!("Checkpoint dir: {:?}", checkpoint_dir);

    let checkpoints = CheckpointStore::new(checkpoint_dir)?;

    DenseEvaluator::new(engine.feature_width(), &dense_options, checkpoints)
}

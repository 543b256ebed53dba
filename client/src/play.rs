use anyhow::{anyhow, Result};

use engine::{GameEngine, TerminalResult};
use model::Evaluator;
use self_play::{play_self_one, release_all, SelfPlayOptions};

/// The final position of a greedy game, rendered by the engine, and how it ended.
pub struct PlayedGame {
    pub plies: usize,
    pub final_position: String,
    pub result: TerminalResult,
}

/// Plays one game with the evaluator on both sides without training. Every position is released before
/// returning.
pub fn play_one<E, M>(engine: &E, evaluator: &M, options: &SelfPlayOptions) -> Result<PlayedGame>
where
    E: GameEngine,
    M: Evaluator,
{
    let episode = play_self_one(engine, evaluator, options)?;
    let plies = episode.plies();
    let (trace, result) = episode.into_inner();

    let final_position = match trace.last() {
        Some(position) => engine.describe(position),
        None => Err(anyhow!("The game was over at the initial position")),
    };

    release_all(engine, trace);

    Ok(PlayedGame {
        plies,
        final_position: final_position?,
        result,
    })
}

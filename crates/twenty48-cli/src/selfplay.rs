use anyhow::Result;
use indicatif::ProgressBar;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use twenty48_engine::game::GameState;

use crate::config::SelfplayConfig;
use crate::strategies::{self, StrategyKind};

/// Summary for one completed game.
#[derive(Debug, Clone, Copy)]
pub struct GameResult {
    pub seed: u64,
    pub steps: u64,
    pub score: u64,
    pub highest_tile: u32,
    pub won: bool,
}

/// Drive a single seeded game to completion with the given strategy.
fn play_game(seed: u64, strategy: StrategyKind) -> GameResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = GameState::new(&mut rng);
    let mut steps = 0u64;
    let mut won = false;
    while !state.game_over {
        let dir = match strategies::select_move(strategy, state.board, &mut rng) {
            Some(dir) => dir,
            None => break,
        };
        state = state.make_move(dir, &mut rng);
        steps += 1;
        won |= state.won;
    }
    GameResult {
        seed,
        steps,
        score: state.score,
        highest_tile: state.board.highest_tile(),
        won,
    }
}

pub fn run(cfg: SelfplayConfig) -> Result<()> {
    let master = cfg.seed.unwrap_or_else(rand::random);
    info!(
        "selfplay: {} game(s), strategy {:?}, master seed {}",
        cfg.games, cfg.strategy, master
    );

    let bar = ProgressBar::new(cfg.games as u64);
    let mut results = Vec::with_capacity(cfg.games as usize);
    for game_idx in 0..cfg.games {
        let seed = master.wrapping_add(game_idx as u64);
        results.push(play_game(seed, cfg.strategy));
        bar.inc(1);
    }
    bar.finish_and_clear();

    report(&results);
    Ok(())
}

fn report(results: &[GameResult]) {
    if results.is_empty() {
        info!("no games played");
        return;
    }
    let games = results.len() as u64;
    let total_score: u64 = results.iter().map(|r| r.score).sum();
    let total_steps: u64 = results.iter().map(|r| r.steps).sum();
    let wins = results.iter().filter(|r| r.won).count();
    info!(
        "completed {} game(s): mean score {}, mean steps {}, {} win(s)",
        games,
        total_score / games,
        total_steps / games,
        wins
    );
    if let Some(best) = results.iter().max_by_key(|r| r.score) {
        info!(
            "best run: seed {} scored {} (highest tile {}, {} steps)",
            best.seed, best.score, best.highest_tile, best.steps
        );
    }
}

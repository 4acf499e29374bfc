use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use twenty48_engine::engine::Move;
use twenty48_engine::game::GameState;

/// Line-oriented interactive game: w/a/s/d to move, n for a new game,
/// q to quit.
pub fn run(seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let stdin = io::stdin();
    let mut out = io::stdout();

    let mut state = GameState::new(&mut rng);
    let mut won_announced = false;
    render(&mut out, &state)?;

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let dir = match line.trim() {
            "w" => Move::Up,
            "a" => Move::Left,
            "s" => Move::Down,
            "d" => Move::Right,
            "n" => {
                state = GameState::new(&mut rng);
                won_announced = false;
                render(&mut out, &state)?;
                continue;
            }
            "q" => break,
            "" => continue,
            other => {
                writeln!(
                    out,
                    "unknown command {:?} (w/a/s/d to move, n for a new game, q to quit)",
                    other
                )?;
                continue;
            }
        };

        state = state.make_move(dir, &mut rng);
        render(&mut out, &state)?;
        if state.won && !won_announced {
            won_announced = true;
            writeln!(out, "You won! Keep going, or press n for a new game.")?;
        }
        if state.game_over {
            writeln!(out, "Game over. Final score: {}", state.score)?;
        }
    }
    Ok(())
}

fn render(out: &mut impl Write, state: &GameState) -> Result<()> {
    writeln!(out, "{}", state.board)?;
    writeln!(out, "score: {}", state.score)?;
    Ok(())
}

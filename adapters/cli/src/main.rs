#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a serpent session from the terminal.
//!
//! The adapter owns pacing: each line of input queues at most one heading
//! change and advances the game exactly one tick. All game state lives
//! behind the session interface.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;

use serpent_core::{Direction, Position};
use serpent_session::{Config, Session};

/// Command-line arguments accepted by the serpent binary.
#[derive(Debug, Parser)]
#[command(name = "serpent", about = "Turn-based snake on a toroidal grid")]
struct Args {
    /// Number of columns in the playing field.
    #[arg(long, default_value_t = 20)]
    width: u32,

    /// Number of rows in the playing field.
    #[arg(long, default_value_t = 15)]
    height: u32,

    /// Food-placement seed; drawn from OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

/// Entry point for the serpent command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut session = Session::new(Config::new(args.width, args.height, seed))
        .context("failed to create game session")?;
    session.on_score_changed(|value| println!("Score: {value}"));
    session.on_game_over(|| println!("Game Over!"));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        render(&session).context("failed to render board")?;
        print!("Enter direction (w/a/s/d) or q to quit: ");
        io::stdout().flush().context("failed to flush prompt")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;

        match line.trim() {
            "q" => break,
            "w" => session.set_direction(Direction::Up),
            "a" => session.set_direction(Direction::Left),
            "s" => session.set_direction(Direction::Down),
            "d" => session.set_direction(Direction::Right),
            _ => {}
        }

        if session.advance().context("failed to advance game")? {
            render(&session).context("failed to render board")?;
            println!("Game Over!");
            break;
        }
    }

    Ok(())
}

fn render(session: &Session) -> Result<()> {
    let body = session.snake_body()?;
    let food = session.food_position()?;
    let score = session.score()?;
    let (width, height) = session.grid_dimensions()?;

    print!("\x1b[2J\x1b[H");
    println!("Score: {score}");

    for y in 0..height {
        let mut row = String::with_capacity(width as usize);
        for x in 0..width {
            let cell = Position::new(x, y);
            let glyph = if body.first() == Some(&cell) {
                '@'
            } else if body.contains(&cell) {
                'O'
            } else if cell == food {
                'F'
            } else {
                '.'
            };
            row.push(glyph);
        }
        println!("{row}");
    }

    Ok(())
}

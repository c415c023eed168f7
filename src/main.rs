//! Gomoku terminal front end
//!
//! Plays a game on stdin/stdout against the engine or another human.

use std::io::{stdin, stdout, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gomoku::{
    Cell, Difficulty, Game, GameConfig, GameMode, GameStatus, JsonFileStore, MoveResult, Player,
    Pos, Session,
};

#[derive(Debug, Parser)]
#[command(name = "gomoku", version, about = "Five in a row against an alpha-beta engine")]
struct Args {
    /// Board side, 15 or 19
    #[arg(long)]
    size: Option<usize>,

    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    #[arg(long, value_enum)]
    mode: Option<GameMode>,

    /// Human colour in pve mode (black or white)
    #[arg(long)]
    human: Option<Player>,

    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where `save` and `load` keep the game
    #[arg(long, default_value = "gomoku-save.json")]
    save_file: PathBuf,

    /// Start from the saved game instead of an empty board
    #[arg(long)]
    resume: bool,

    /// Seed for the engine's random choices
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(human) = self.human {
            config.human = human;
        }
        config.validate()?;
        Ok(config)
    }
}

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Play(usize, usize),
    Undo,
    Hint,
    Explain(usize, usize),
    Analyze,
    Save,
    Load,
    New,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let first = words.next()?;
    let coords = |words: &mut std::str::SplitWhitespace<'_>| -> Option<(usize, usize)> {
        let row = words.next()?.parse().ok()?;
        let col = words.next()?.parse().ok()?;
        Some((row, col))
    };

    let command = match first.to_ascii_lowercase().as_str() {
        "undo" | "u" => Command::Undo,
        "hint" => Command::Hint,
        "explain" => {
            let (row, col) = coords(&mut words)?;
            Command::Explain(row, col)
        }
        "analyze" | "analyse" => Command::Analyze,
        "save" => Command::Save,
        "load" => Command::Load,
        "new" => Command::New,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => {
            let row = first.parse().ok()?;
            let col = words.next()?.parse().ok()?;
            Command::Play(row, col)
        }
    };
    if words.next().is_some() {
        return None;
    }
    Some(command)
}

const HELP: &str = "\
Commands:
  <row> <col>        play a stone
  undo               take back the last move (your move and the reply in pve)
  hint               suggest a move for the side to move
  explain <row> <col>
                     describe what a move would do
  analyze            assess the position
  save / load        write or read the save file
  new                start over
  help               show this text
  quit               leave";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.game_config()?;
    let mut session = Session::new(config, args.seed)?;
    let mut store = JsonFileStore::new(&args.save_file);

    println!("===========================================");
    println!("       Gomoku {}", env!("CARGO_PKG_VERSION"));
    println!("===========================================");
    println!(
        "{} board, {}, {}",
        session.game().size(),
        config.mode,
        config.difficulty
    );

    if args.resume {
        if session.load(&store)? {
            println!("Resumed game from {}", store.path().display());
        } else {
            println!("No saved game at {}, starting fresh", store.path().display());
        }
    }
    println!("Type 'help' for commands.\n");

    let stdin = stdin();
    let mut lines = stdin.lock().lines();
    loop {
        while let Some(reply) = session.engine_reply()? {
            report_engine(&reply.result);
        }
        print_board(session.game());
        if report_status(session.game()) {
            println!("Type 'new' to play again, 'undo' to take back, or 'quit'.");
        }

        print!("{} > ", session.game().turn());
        stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = parse_command(&line) else {
            println!("Unknown command, type 'help'");
            continue;
        };

        match command {
            Command::Play(row, col) => {
                if let Err(err) = session.play(row, col) {
                    println!("{err}");
                }
            }
            Command::Undo => match session.undo() {
                Ok(undone) => println!("Took back {} move(s)", undone.len()),
                Err(err) => println!("{err}"),
            },
            Command::Hint => {
                let result = session.hint();
                match result.best_move {
                    Some(pos) => println!("Hint: {pos} ({:?}, score {})", result.search_type, result.score),
                    None => println!("No move to suggest"),
                }
            }
            Command::Explain(row, col) => match session.explain(row, col) {
                Ok(explanation) => println!("{explanation}"),
                Err(err) => println!("{err}"),
            },
            Command::Analyze => println!("{}", session.analyze()),
            Command::Save => match session.save(&mut store) {
                Ok(()) => println!("Saved to {}", store.path().display()),
                Err(err) => println!("Save failed: {err}"),
            },
            Command::Load => match session.load(&store) {
                Ok(true) => println!("Loaded {}", store.path().display()),
                Ok(false) => println!("No saved game at {}", store.path().display()),
                Err(err) => println!("{err}"),
            },
            Command::New => session.new_game(),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn report_engine(result: &MoveResult) {
    if let Some(pos) = result.best_move {
        println!(
            "Engine plays {pos}  [{:?}, score {}, {} nodes, {}ms]",
            result.search_type, result.score, result.nodes, result.time_ms
        );
    }
}

/// Print the result line if the game is over. Returns true when it is.
fn report_status(game: &Game) -> bool {
    match game.status() {
        GameStatus::InProgress => false,
        GameStatus::Won { winner, line } => {
            println!("{winner} wins with {} .. {}", line[0], line[4]);
            true
        }
        GameStatus::Draw => {
            println!("Draw: the board is full");
            true
        }
    }
}

/// Print board state
fn print_board(game: &Game) {
    let n = game.board().side();
    let last = game.last_move().map(|mv| mv.pos);
    let line = game.winning_line();

    print!("   ");
    for c in 0..n {
        print!("{:3}", c);
    }
    println!();

    for r in 0..n {
        print!("{:2} ", r);
        for c in 0..n {
            let pos = Pos::new(r as u8, c as u8);
            let ch = match game.board().get(pos) {
                Cell::Occupied(Player::Black) => 'X',
                Cell::Occupied(Player::White) => 'O',
                Cell::Empty => '.',
            };
            let marked = Some(pos) == last || line.is_some_and(|l| l.contains(&pos));
            if marked {
                print!("[{ch}]");
            } else {
                print!("  {ch}");
            }
        }
        println!();
    }
}

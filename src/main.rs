//! Gomoku agent command line
//!
//! - `gomoku analyze [FILE]`: tactical report and selected move for a board
//! - `gomoku selfplay`: two offline agents play a full game

use std::io::Read as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gomoku::agent::Outcome;
use gomoku::{
    Agent, AgentConfig, Board, BoardStyle, LocalGame, OfflineModel, Pos, Selection, Stone,
    TacticalReport,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON agent configuration; missing keys keep their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse a board and print the report and selected move as JSON
    Analyze {
        /// Board file; reads stdin when omitted or `-`
        board: Option<PathBuf>,

        /// Side to move (X or O); inferred from stone counts when omitted
        #[arg(short, long, value_parser = parse_stone)]
        player: Option<Stone>,
    },
    /// Play a full game between two offline agents
    Selfplay {
        /// Print the board after every move
        #[arg(short, long, action = clap::ArgAction::SetTrue)]
        verbose: bool,
    },
}

fn parse_stone(text: &str) -> Result<Stone, String> {
    match text.trim() {
        "X" | "x" => Ok(Stone::X),
        "O" | "o" => Ok(Stone::O),
        other => Err(format!("expected X or O, got `{}`", other)),
    }
}

#[derive(Serialize)]
struct AnalyzeOutput {
    player: Stone,
    report: TacticalReport,
    selection: Selection,
}

fn read_board(path: Option<&PathBuf>) -> Result<Board> {
    let text = match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading board from stdin")?;
            text
        }
    };
    Ok(Board::parse(&text)?)
}

fn analyze(config: &AgentConfig, path: Option<&PathBuf>, player: Option<Stone>) -> Result<()> {
    let board = read_board(path)?;
    let me = player.unwrap_or_else(|| board.side_to_move());
    let legal: Vec<Pos> = board.empty_cells().collect();

    let output = AnalyzeOutput {
        player: me,
        report: TacticalReport::analyze(&board, me, &legal),
        selection: config.selector().select(&board, me, &legal),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn selfplay(config: AgentConfig, verbose: bool) -> Result<()> {
    let agents = [
        Agent::with_config(OfflineModel, config.clone()),
        Agent::with_config(OfflineModel, config),
    ];
    let mut game = LocalGame::new();

    while !game.is_over() {
        let me = game.current_turn();
        let agent = if me == Stone::O { &agents[1] } else { &agents[0] };
        let decision = agent.decide(&game).await;
        game.play(decision.pos)?;
        if verbose {
            println!("{} -> {} via {:?}", me, decision.pos, decision.source);
            println!("{}", game.board().render(BoardStyle::Standard));
        }
    }

    println!("{}", game.board().render(BoardStyle::Standard));
    match game.outcome() {
        Some(Outcome::Win { winner, line }) => {
            let cells: Vec<String> = line.iter().map(ToString::to_string).collect();
            println!("{} wins after {} moves: {}", winner, game.move_history().len(), cells.join(" "));
        }
        Some(Outcome::Draw) => println!("Draw after {} moves", game.move_history().len()),
        None => {}
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AgentConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AgentConfig::default(),
    };

    match args.command {
        Command::Analyze { board, player } => analyze(&config, board.as_ref(), player),
        Command::Selfplay { verbose } => selfplay(config, verbose).await,
    }
}

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use battleships::{
    init_logging, BattleshipsService, CellState, CreateMatchInput, DefinitionsFile, Dimensions,
    FireInput, FleetPlacer, Grid, InMemoryMatchStore, Match, Player, Settings,
    ShipDefinitionSource, StandardFleet, DEFAULT_DIMENSIONS,
};
use clap::{Args, Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
struct FieldArgs {
    #[arg(long, default_value_t = DEFAULT_DIMENSIONS.x)]
    width: usize,
    #[arg(long, default_value_t = DEFAULT_DIMENSIONS.y)]
    height: usize,
    /// Ship definition file; overrides the one named in the settings file.
    #[arg(long)]
    ships: Option<PathBuf>,
    /// JSON settings file.
    #[arg(long)]
    settings: Option<PathBuf>,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Let two automated players fire at random until one fleet is sunk.
    Simulate {
        #[command(flatten)]
        field: FieldArgs,
        /// Print a JSON summary instead of the final boards.
        #[arg(long)]
        json: bool,
    },
    /// Hot-seat game for two players on this terminal.
    Play {
        #[arg(long, default_value = "Player One")]
        player_one: String,
        #[arg(long, default_value = "Player Two")]
        player_two: String,
        #[command(flatten)]
        field: FieldArgs,
    },
    /// Place a single fleet and print the grid.
    ShowFleet {
        #[command(flatten)]
        field: FieldArgs,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { field, json } => simulate(&field, json),
        Commands::Play {
            player_one,
            player_two,
            field,
        } => play(&field, player_one, player_two),
        Commands::ShowFleet { field } => show_fleet(&field),
    }
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn load_settings(field: &FieldArgs) -> anyhow::Result<Settings> {
    let mut settings = match &field.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if field.ships.is_some() {
        settings.ships_file = field.ships.clone();
    }
    Ok(settings)
}

fn build_service(field: &FieldArgs) -> anyhow::Result<BattleshipsService> {
    let settings = load_settings(field)?;
    let definitions = match &settings.ships_file {
        Some(path) => DefinitionsFile::new(path)
            .load()
            .with_context(|| format!("loading ship definitions from {}", path.display()))?,
        None => StandardFleet.load()?,
    };
    Ok(BattleshipsService::new(
        settings,
        definitions,
        InMemoryMatchStore::new(),
        seeded_rng(field.seed),
    ))
}

fn dimensions(field: &FieldArgs) -> Dimensions {
    Dimensions::new(field.width, field.height)
}

/// Pick a random cell of `grid` that has not been fired at.
fn random_target<R: Rng>(grid: &Grid, rng: &mut R) -> Option<(isize, isize)> {
    let open: Vec<_> = grid
        .cells()
        .iter()
        .filter(|c| !c.state.is_resolved())
        .collect();
    if open.is_empty() {
        return None;
    }
    let cell = open[rng.random_range(0..open.len())];
    Some((cell.x as isize, cell.y as isize))
}

fn print_fields(game: &Match) {
    for player in [game.player_one(), game.player_two()] {
        if let Some(grid) = game.field_of(player) {
            println!("{}'s field:", player);
            print!("{}", grid.render());
        }
    }
}

fn simulate(field: &FieldArgs, as_json: bool) -> anyhow::Result<()> {
    let mut service = build_service(field)?;
    let mut shooter_rng = seeded_rng(field.seed.map(|s| s.wrapping_add(1)));
    let id = service.create_match(CreateMatchInput {
        player_one: Player::new("player1"),
        player_two: Player::new("player2"),
        dimensions: dimensions(field),
    })?;

    let mut shots = [0usize; 2];
    let winner = loop {
        let game = service.active_match(id.as_str())?;
        let shooter = usize::from(game.next_mover() != game.player_one());
        let target = random_target(game.playing_field_of_next_mover()?, &mut shooter_rng)
            .context("no cells left to fire at")?;
        let out = service.fire(FireInput {
            match_id: id.to_string(),
            x: target.0,
            y: target.1,
        })?;
        shots[shooter] += 1;
        if let Some(winner) = out.winner {
            break winner;
        }
    };

    let game = service.ended_match(id.as_str())?;
    if as_json {
        let result = json!({
            "matchId": id,
            "dimensions": dimensions(field),
            "player1": {"shots": shots[0]},
            "player2": {"shots": shots[1]},
            "winner": winner.name(),
        });
        println!("{}", serde_json::to_string(&result)?);
    } else {
        print_fields(game);
        println!("Winner: {} ({} shots to {})", winner, shots[0], shots[1]);
    }
    Ok(())
}

fn parse_target(line: &str) -> Option<(isize, isize)> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty());
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y))
}

fn play(field: &FieldArgs, player_one: String, player_two: String) -> anyhow::Result<()> {
    let mut service = build_service(field)?;
    let id = service.create_match(CreateMatchInput {
        player_one: Player::new(player_one),
        player_two: Player::new(player_two),
        dimensions: dimensions(field),
    })?;
    println!("Match {} started. Enter targets as `x y`.", id);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let game = service.active_match(id.as_str())?;
        let target_field = game.playing_field_of_next_mover()?;
        println!();
        print!("{}", target_field.render_hidden());
        print!("{}> ", game.next_mover());
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                println!();
                return Ok(());
            }
        };
        let (x, y) = match parse_target(&line) {
            Some(t) => t,
            None => {
                println!("Expected two integers, e.g. `3 7`.");
                continue;
            }
        };
        match service.fire(FireInput {
            match_id: id.to_string(),
            x,
            y,
        }) {
            Ok(out) => {
                println!("{}", out.hit_state);
                if let Some(winner) = out.winner {
                    let game = service.ended_match(id.as_str())?;
                    print_fields(game);
                    println!("{} wins!", winner);
                    return Ok(());
                }
            }
            Err(e) => println!("{}", e),
        }
    }
}

fn show_fleet(field: &FieldArgs) -> anyhow::Result<()> {
    let service = build_service(field)?;
    let mut rng = seeded_rng(field.seed);
    let mut grid = Grid::new(dimensions(field))?;
    FleetPlacer::new(service.settings().placement_attempts).place(
        &mut grid,
        service.definitions(),
        &mut rng,
    )?;
    print!("{}", grid.render());
    for ship in grid.fleet() {
        println!("{:<12} {:?}", ship.ship_type(), ship.position());
    }
    println!("{} ship cells", grid.count(CellState::Ship));
    Ok(())
}

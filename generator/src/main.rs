use std::process::ExitCode;

use clap::Parser;
use dashpaint::{DashEngine, DashError, GenerationOptions, Point, Seed};
use log::{error, info};

mod logging;

/// Generate a Dash Paint map and print it
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Side length of the generated square, border included
    #[arg(long, default_value_t = 20)]
    size: i32,
    /// Seed for the random fill, numeric or any text
    #[arg(long)]
    seed: Option<String>,
    /// Horizontal spawn coordinate
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    spawn_x: i32,
    /// Vertical spawn coordinate
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    spawn_y: i32,
    /// Also print the component and dash count of every open tile
    #[arg(short, long)]
    analyse: bool,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_seed(seed: String) -> Seed {
    match seed.parse::<u64>() {
        Ok(number) => Seed::Number(number),
        Err(_) => Seed::Text(seed),
    }
}

fn run(args: Args) -> Result<(), DashError> {
    let mut engine = DashEngine::builder()
        .spawn_point(Point::new(args.spawn_x, args.spawn_y))
        .build();

    engine.generate_map_with(&GenerationOptions {
        size: args.size,
        seed: args.seed.map(parse_seed),
        ..Default::default()
    })?;
    info!("final map has {} components scoring {}", engine.get_component_count()?, engine.map_score()?);

    println!("{}", engine.to_display_string()?);

    if args.analyse {
        let bounds = engine.wall_map().get_bounds();
        let analysed = engine.analyse_rect(bounds)?;

        for tile in analysed.tiles.iter().filter(|tile| !tile.is_wall) {
            match tile.component_id {
                Some(component) => println!("{} component {} dashes {}", tile.point, component, tile.number_of_dashes_passing_over),
                None => println!("{} unreachable", tile.point),
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

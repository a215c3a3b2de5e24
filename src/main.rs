use std::{env, fs, process};

use env_logger::Env;
use log::debug;

use nonocover::{Nonogram, PuzzleSpec};

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("warn")); // RUST_LOG

    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: nonocover <puzzle-file>");
            process::exit(2);
        }
    };

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("{}: {}", path, err);
            process::exit(1);
        }
    };
    let spec = match PuzzleSpec::parse(&content) {
        Ok(spec) => spec,
        Err(err) => {
            eprintln!("{}: {}", path, err);
            process::exit(1);
        }
    };

    let puzzle = Nonogram::new(spec);
    println!("Puzzle size: {} x {}", puzzle.height(), puzzle.width());

    let mut solver = puzzle.solver();
    let mut solutions = solver.solve();
    while let Some(solution) = solutions.next() {
        println!("Solution:");
        for row in puzzle.render(solutions.solver(), &solution) {
            println!("{}", row);
        }
    }
    drop(solutions);

    let stats = solver.statistics();
    debug!(
        "tried {} rows, {} link updates, max depth {}",
        stats.total_nodes(),
        stats.total_updates(),
        stats.nodes.len(),
    );
}

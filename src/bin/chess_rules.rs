// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::io;
use std::process;
use std::time::Instant;

use chess_rules::session::Session;
use chess_rules::{perft, GameState};
use clap::{App, Arg, ArgMatches, SubCommand};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("perft")
                .about("Count the leaves of the legal move tree of a position")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to walk")
                        .value_name("DEPTH")
                        .short("d")
                        .long("depth")
                        .default_value("3")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the legal moves of a position")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("json")
                        .help("Print the moves as JSON")
                        .long("json"),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("perft") {
        run_perft(matches);
    }

    if let Some(matches) = matches.subcommand_matches("moves") {
        run_moves(matches);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = Session::new().run(stdin.lock(), stdout.lock()) {
        eprintln!("i/o error: {}", err);
        process::exit(1);
    }
}

fn parse_fen(matches: &ArgMatches) -> GameState {
    let fen = matches.value_of("FEN").unwrap();
    match GameState::from_fen(fen) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("invalid fen: {:?}", err);
            process::exit(1);
        }
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let state = parse_fen(matches);
    let depth = value_t_or_exit!(matches, "depth", u32);

    println!("fen:   {}", state.as_fen());
    println!("depth: {}", depth);
    println!();
    println!("{}", state);
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&state, i);
        let duration = start.elapsed();
        let ms = duration.as_secs() * 1000 + u64::from(duration.subsec_millis());
        println!("perft({}) = {} ({} ms)", i, results, ms);
    }

    process::exit(0);
}

fn run_moves(matches: &ArgMatches) -> ! {
    let mut state = parse_fen(matches);
    let moves = state.get_valid_moves();
    if matches.is_present("json") {
        match serde_json::to_string_pretty(&moves) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("failed to serialize moves: {}", err);
                process::exit(1);
            }
        }
    } else {
        for mov in &moves {
            println!("{}  {}", mov.to_square_notation(), mov);
        }
    }

    if state.is_checkmate() {
        println!("checkmate, {} wins", state.side_to_move().toggle().name());
    } else if state.is_stalemate() {
        println!("stalemate");
    }

    process::exit(0);
}

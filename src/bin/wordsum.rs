// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use clap::{arg, Arg, Command, ErrorKind};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
//
use wordsum::compiler::{Compiler, Strategy};
use wordsum::puzzle::Puzzle;
use wordsum::search::Search;
use wordsum::solution::Solution;

fn main() {
    // Parse command-line arguments
    let matches = Command::new("wordsum")
        .about("Verbal arithmetic solver")
        .version("0.1.0")
        .arg(arg!(--verbose "Show the compiled plan and program"))
        .arg(arg!(--trace "Trace every instruction executed"))
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .takes_value(true)
                .possible_values(["bfs", "dfs"])
                .help("Digit enumeration strategy"),
        )
        .arg(Arg::new("w1").required(true))
        .arg(Arg::new("w2").required(true))
        .arg(Arg::new("w3").required(true))
        .try_get_matches();
    // Anything other than three words (plus flags) is a usage error.
    let matches = match matches {
        Ok(m) => m,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit();
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    // Initialise logging
    if matches.is_present("trace") {
        init_logging(LevelFilter::Trace);
    } else if matches.is_present("verbose") {
        init_logging(LevelFilter::Debug);
    }
    // Construct the puzzle instance
    let w1 = matches.get_one::<String>("w1").unwrap();
    let w2 = matches.get_one::<String>("w2").unwrap();
    let w3 = matches.get_one::<String>("w3").unwrap();
    let puzzle = match Puzzle::new(w1, w2, w3) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    let strategy = match matches.get_one::<String>("strategy").map(String::as_str) {
        Some("dfs") => Strategy::Dfs,
        _ => Strategy::Bfs,
    };
    // Compile the puzzle into a search program
    let program = Compiler::with_strategy(&puzzle, strategy).compile();
    // Run the search
    let mut search = Search::new(&program);
    let exitcode = match search.run() {
        Some(state) => {
            println!("found");
            print!("{}", Solution::new(&puzzle, &state));
            0
        }
        None => {
            println!("no result");
            3
        }
    };
    // Done
    std::process::exit(exitcode);
}

/// Initialise logging using a suitable pattern.
fn init_logging(level: LevelFilter) {
    let encoder = PatternEncoder::new("[{l}] {m}{n}");
    //
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(encoder))
        .build();
    //
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))
        .unwrap();
    //
    let _handle = log4rs::init_config(config).unwrap();
}

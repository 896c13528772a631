//! `maze-search` binary entry point: thin wrapper around [`repeated_maze::cli`].

use std::env;
use std::process;

fn main()
{
	let args: Vec<String> = env::args().skip(1).collect();
	process::exit(repeated_maze::cli::run(&args));
}

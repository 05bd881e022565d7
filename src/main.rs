#[macro_use]
extern crate clap;

#[macro_use]
extern crate serde_plain;

mod cli;
mod dialect;
mod dispatch;
mod error;
mod project;
mod synth;
mod table;
mod vocab;

use std::io;

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    cli::main()
}

mod app;
mod cli;
mod dataset;
mod stats;

use std::{env, io, process::ExitCode};

fn main() -> ExitCode {
    env_logger::init();
    let args = env::args().collect::<Vec<_>>();
    let code = app::run(&args, &mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(code)
}

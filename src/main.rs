use std::io::{stdin, stdout};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    // data directory from the first argument, with a local default
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("bank-data"));

    let stdin = stdin();
    let mut input = stdin.lock();
    let mut output = stdout();

    if let Err(err) = bank_ledger::app::run(&mut input, &mut output, &data_dir) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

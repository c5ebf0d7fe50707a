use clap::Parser;
use nta::Cli;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = cli.run() {
        println!("ERROR: {err:#}");
        std::process::exit(1);
    }
}

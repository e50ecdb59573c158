use clap::Parser;

use card_stacks::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    // -v/-vv raise the default level; RUST_LOG still wins when set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();
    log::debug!("Parsed arguments: {:?}", cli);

    let stdout = std::io::stdout();
    if let Err(e) = cli::run(&cli, &mut stdout.lock()) {
        log::debug!("Command failed: {e:?}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

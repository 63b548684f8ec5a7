// Entrypoint for the CLI application.
// - Parse arguments first so usage errors never touch the file or network.
// - Any failure is printed once to stderr and the process exits with 1.

use clap::Parser;
use slop::{
    api::ApiClient,
    cli::Cli,
    clipboard::SystemClipboard,
    config::Config,
    output::{Output, Terminal},
    ui,
};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version go to stdout and are not failures.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_logging();

    let mut out = Terminal;
    if let Err(err) = run(&cli, &mut out) {
        out.error(&format!("Error: {err:#}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: &mut Terminal) -> anyhow::Result<()> {
    let config = Config::load(out);
    let api = ApiClient::new(config.api_url)?;
    ui::upload(&api, &cli.request(), out, &mut SystemClipboard::default())?;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SLOP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

use std::process::ExitCode;

use clap::Parser;
use huffpack::cli::{self, Cli};
use huffpack::if_tracing;
use huffpack::storage::FsStore;

if_tracing! {
    use tracing_subscriber::{EnvFilter, fmt};
}

fn main() -> ExitCode {
    if_tracing! {
        let subscriber = fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    let cli = Cli::parse();
    match cli::run(cli, &mut FsStore) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if_tracing! {{
                tracing::error!(error = %e, "command failed");
            }}
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

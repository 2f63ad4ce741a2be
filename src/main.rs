use std::net::TcpListener;
use std::process::ExitCode;

use clap::Parser;
use pathfarm::cli::Cli;
use pathfarm::error::Fatal;
use pathfarm::scene::DemoSceneSource;

fn try_main() -> Result<(), Fatal> {
    let cli = Cli::parse();
    let port = cli.resolved_port();
    let threads = cli.resolved_threads();

    let listener = TcpListener::bind(("0.0.0.0", port)).map_err(|source| Fatal::Bind { port, source })?;
    log::info!("pathfarm-worker starting on port {port} with {threads} render threads");

    pathfarm::worker::run(listener, &DemoSceneSource, threads, cli.max_bounces);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

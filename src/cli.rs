use clap::Parser;

/// `pathfarm-worker`: the worker half of the distributed path tracer.
/// Listens for a coordinator connection and renders whatever tiles it is
/// handed.
#[derive(Debug, Parser)]
#[command(name = "pathfarm-worker", version)]
pub struct Cli {
    /// Port to listen on. Falls back to the protocol default (2222) when
    /// absent, matching "`worker_port` option selects listen port; absence
    /// uses default."
    #[arg(short = 'p', long = "worker-port")]
    pub worker_port: Option<u16>,

    /// Render threads per job. Defaults to the machine's available
    /// parallelism.
    #[arg(long)]
    pub threads: Option<u32>,

    /// Maximum bounce depth a job's `bounces` request is clamped to.
    #[arg(long, default_value_t = 64)]
    pub max_bounces: u32,
}

impl Cli {
    pub fn resolved_port(&self) -> u16 {
        self.worker_port.unwrap_or(protocol::DEFAULT_PORT)
    }

    pub fn resolved_threads(&self) -> u32 {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get() as u32)
                .unwrap_or(1)
        })
    }
}

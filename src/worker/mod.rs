//! Worker engine: the connection state machine, thread/supervisor
//! coordination for a render job, and the accept loop that ties them to a
//! listening socket.

pub mod connection;
pub mod render_job;
pub mod stats;

use std::net::TcpListener;

pub use connection::{handle_connection, ConnectionOutcome};

use crate::scene::SceneSource;

/// Accepts connections until a `shutdown` message ends one (it tears down
/// the listening socket after the current job completes), or forever
/// otherwise. Each connection gets its own job; per-job failures are
/// logged and the listener keeps running.
pub fn run(listener: TcpListener, scene_source: &dyn SceneSource, thread_count: u32, max_bounces: u32) {
    let port = listener.local_addr().map(|a| a.port()).unwrap_or(0);
    log::info!("listening for connections on port {port}");
    loop {
        let (stream, addr) = match listener.accept() {
            Ok(pair) => pair,
            Err(err) => {
                log::warn!("failed to accept a connection: {err}");
                continue;
            }
        };
        log::info!("got connection from {addr}");

        match handle_connection(stream, scene_source, thread_count, max_bounces) {
            Ok(ConnectionOutcome::JobFinished) => {
                log::info!("cleaning up for next render");
            }
            Ok(ConnectionOutcome::Shutdown) => {
                log::info!("received shutdown command, exiting");
                break;
            }
            Err(err) => {
                log::warn!("connection ended with an error: {err}");
            }
        }
    }
}

//! Worker engine state machine: `AwaitingHandshake -> AwaitingScene ->
//! AwaitingAssets -> Rendering -> Goodbye -> Closed`, driven by the
//! messages in the handshake table. One call to [`handle_connection`]
//! covers exactly one job on one TCP connection. No state persists
//! between jobs, so every connection gets a fresh [`RendererState`].

use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;
use protocol::{Message, ProtocolError};
use shared_structs::RendererState;

use crate::error::{SceneError, WorkerError};
use crate::scene::{AssetCache, SceneSource};
use crate::worker::render_job::{run_render_job, JobContext};

/// How a connection's job ended. Both are a clean return from
/// [`handle_connection`]; the caller uses this to decide whether to keep
/// accepting connections.
pub enum ConnectionOutcome {
    /// `goodbye` was sent (render ran to completion or was refused) or an
    /// `error` response closed this one job. The listener keeps running.
    JobFinished,
    /// The first message on the connection was `shutdown`: a shutdown can
    /// arrive instead of a handshake, between jobs, the same way the
    /// original only reads top-level messages between jobs. A render in
    /// progress owns the socket until `goodbye`. The listener tears down
    /// after this.
    Shutdown,
}

/// Reads one framed message, replying `error` and surfacing the failure
/// for any protocol-level problem. An unknown action yields an `error`
/// response without a state change.
fn recv(socket: &Mutex<TcpStream>) -> Result<Message, WorkerError> {
    let mut guard = socket.lock();
    match protocol::receive_message(&mut *guard) {
        Ok(message) => Ok(message),
        Err(err) => {
            let _ = protocol::send_message(&mut *guard, &Message::error(err.to_string()));
            Err(WorkerError::Protocol(err))
        }
    }
}

fn reply_error(socket: &Mutex<TcpStream>, message: impl Into<String>) -> Result<(), WorkerError> {
    let mut guard = socket.lock();
    protocol::send_message(&mut *guard, &Message::error(message))?;
    Ok(())
}

/// Drives one connection through the handshake table. `scene_source` is
/// the out-of-scope scene-construction collaborator; `thread_count` is
/// this worker's own render concurrency, reported (not negotiated) in
/// `ready`; `max_bounces` clamps whatever bounce depth the scene requests.
pub fn handle_connection(
    stream: TcpStream,
    scene_source: &dyn SceneSource,
    thread_count: u32,
    max_bounces: u32,
) -> Result<ConnectionOutcome, WorkerError> {
    let socket = Arc::new(Mutex::new(stream));

    match recv(&socket)? {
        Message::Shutdown => return Ok(ConnectionOutcome::Shutdown),
        Message::Handshake { version, githash } => match protocol::validate_handshake(&version, &githash) {
            Ok(()) => {
                let mut guard = socket.lock();
                protocol::send_message(&mut *guard, &Message::StartSync)?;
            }
            Err(ProtocolError::VersionMismatch) => {
                reply_error(&socket, "Protocol version mismatch")?;
                return Ok(ConnectionOutcome::JobFinished);
            }
            Err(other) => return Err(WorkerError::Protocol(other)),
        },
        other => {
            reply_error(&socket, format!("expected handshake, got \"{}\"", other.action()))?;
            return Ok(ConnectionOutcome::JobFinished);
        }
    }

    let (scene_data, asset_path) = match recv(&socket)? {
        Message::Shutdown => return Ok(ConnectionOutcome::Shutdown),
        Message::LoadScene { data, asset_path } => (data, asset_path),
        other => {
            reply_error(&socket, format!("expected loadScene, got \"{}\"", other.action()))?;
            return Ok(ConnectionOutcome::JobFinished);
        }
    };
    log::info!("received scene description, assets at {asset_path}");

    let job = match scene_source.build(&scene_data, &AssetCache::default()) {
        Ok(job) => job,
        Err(SceneError::Parse(message)) => {
            reply_error(&socket, format!("Scene parsing error: {message}"))?;
            return Ok(ConnectionOutcome::JobFinished);
        }
        Err(SceneError::MissingAsset(name)) => {
            reply_error(&socket, format!("missing asset: {name}"))?;
            return Ok(ConnectionOutcome::JobFinished);
        }
    };
    {
        let mut guard = socket.lock();
        protocol::send_message(&mut *guard, &Message::Ready { thread_count })?;
    }

    let files = match recv(&socket)? {
        Message::Shutdown => return Ok(ConnectionOutcome::Shutdown),
        Message::LoadAssets { files } => files,
        other => {
            reply_error(&socket, format!("expected loadAssets, got \"{}\"", other.action()))?;
            return Ok(ConnectionOutcome::JobFinished);
        }
    };
    let asset_cache = match AssetCache::decode(&files) {
        Ok(cache) => cache,
        Err(SceneError::Parse(message)) => {
            reply_error(&socket, format!("Scene parsing error: {message}"))?;
            return Ok(ConnectionOutcome::JobFinished);
        }
        Err(SceneError::MissingAsset(name)) => {
            reply_error(&socket, format!("missing asset: {name}"))?;
            return Ok(ConnectionOutcome::JobFinished);
        }
    };
    log::info!("received scene assets ({} files)", asset_cache.len());
    {
        let mut guard = socket.lock();
        protocol::send_message(&mut *guard, &Message::Ok)?;
    }

    match recv(&socket)? {
        Message::Shutdown => return Ok(ConnectionOutcome::Shutdown),
        Message::StartRender => {}
        other => {
            reply_error(&socket, format!("expected startRender, got \"{}\"", other.action()))?;
            return Ok(ConnectionOutcome::JobFinished);
        }
    }

    log::info!("starting network render job");
    let ctx = Arc::new(JobContext {
        socket,
        scene: job.scene,
        camera: job.camera,
        state: Arc::new(RendererState::new()),
        image_width: job.config.image_width,
        sample_count: job.config.sample_count,
        max_depth: job.config.bounces.min(max_bounces),
    });
    run_render_job(ctx, thread_count);

    Ok(ConnectionOutcome::JobFinished)
}

//! While rendering: spawns `threadCount` render threads sharing one
//! mutex-guarded socket, runs the supervisor loop on the calling thread
//! (stats cadence, completion detection, `goodbye`), following the
//! original's tick/modulo structure rather than a wall-clock `Instant`
//! compare.

use std::net::TcpStream;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use protocol::Message;
use render_core::tile_renderer::render_tile_pass;
use shared_structs::{CameraRaySource, RenderBuffer, RenderPhase, RenderTile, RendererState, Scene};

use crate::worker::stats::{self, ThreadStats};

/// The original's tick interval: 16ms (`active_msec` in `worker.c`).
const SUPERVISOR_TICK: Duration = Duration::from_millis(16);
/// Stats cadence: every `1024 / active_msec` ticks, i.e. ~1.024s.
const STATS_EVERY_TICKS: u32 = 1024 / 16;

/// Everything a job's render threads and supervisor loop need, shared
/// read-only (or through its own internal synchronization) across all of
/// them. One `JobContext` per accepted connection's render job; nothing
/// here outlives that job.
pub struct JobContext {
    pub socket: Arc<Mutex<TcpStream>>,
    pub scene: Arc<dyn Scene>,
    pub camera: Arc<dyn CameraRaySource>,
    pub state: Arc<RendererState>,
    pub image_width: u32,
    pub sample_count: u32,
    pub max_depth: u32,
}

fn request_tile(socket: &Mutex<TcpStream>) -> Option<RenderTile> {
    let mut guard = socket.lock();
    if protocol::send_message(&mut *guard, &Message::GetWork).is_err() {
        return None;
    }
    match protocol::receive_message(&mut *guard) {
        Ok(Message::Tile { tile }) => Some(tile.into()),
        _ => None,
    }
}

fn submit_tile(socket: &Mutex<TcpStream>, tile: RenderTile, buffer: &RenderBuffer) -> bool {
    let mut pixels = Vec::with_capacity((tile.width() * tile.height()) as usize * 3);
    for y in 0..tile.height() {
        for x in 0..tile.width() {
            pixels.extend_from_slice(&buffer.tone_mapped(x, y));
        }
    }
    let result = protocol::encode_texture(&pixels, tile.width(), tile.height(), 3);
    let mut guard = socket.lock();
    let message = Message::SubmitWork { tile: tile.into(), result };
    if protocol::send_message(&mut *guard, &message).is_err() {
        return false;
    }
    matches!(protocol::receive_message(&mut *guard), Ok(Message::Ok))
}

/// One render thread's loop: acquire the socket, request a tile, release,
/// render it pass by pass, acquire, submit, await `ok`, release, repeat.
/// A `tileNum == -1` reply, a request/submit failure, or `renderAborted`
/// ends the loop without submitting whatever tile was in progress.
fn render_thread_body(ctx: &JobContext, stats: &ThreadStats) {
    loop {
        let Some(tile) = request_tile(&ctx.socket) else {
            break;
        };
        if tile.is_sentinel() {
            break;
        }

        let mut buffer = RenderBuffer::new(tile.width(), tile.height());
        let mut completed_all_passes = true;
        for pass in 1..=ctx.sample_count {
            if ctx.state.render_aborted() {
                completed_all_passes = false;
                break;
            }
            let started = Instant::now();
            let completed = render_tile_pass(
                &tile,
                ctx.scene.as_ref(),
                ctx.camera.as_ref(),
                &mut buffer,
                ctx.image_width,
                &ctx.state,
                pass,
                ctx.sample_count,
                ctx.max_depth,
            );
            stats.record_pass(started.elapsed());
            if !completed {
                completed_all_passes = false;
                break;
            }
        }

        if !completed_all_passes {
            break;
        }
        if !submit_tile(&ctx.socket, tile, &buffer) {
            break;
        }
    }
}

/// Runs a render job to completion: spawns the render threads, then runs
/// the supervisor loop on the calling thread until every thread has
/// exited or the job was aborted, and finally sends `goodbye`. Blocks the
/// calling thread for the whole job, matching `startRender`'s synchronous
/// contract in the original.
pub fn run_render_job(ctx: Arc<JobContext>, thread_count: u32) {
    ctx.state.set_phase(RenderPhase::Rendering);

    let stats: Arc<Vec<ThreadStats>> = Arc::new((0..thread_count).map(|_| ThreadStats::default()).collect());
    let mut handles = Vec::with_capacity(thread_count as usize);
    for i in 0..thread_count {
        let ctx = ctx.clone();
        let stats = stats.clone();
        ctx.state.add_active_thread();
        handles.push(std::thread::spawn(move || {
            render_thread_body(&ctx, &stats[i as usize]);
        }));
    }

    let mut checked = vec![false; handles.len()];
    let mut ticks_since_stats = 0u32;
    loop {
        std::thread::sleep(SUPERVISOR_TICK);

        for (i, handle) in handles.iter().enumerate() {
            if !checked[i] && handle.is_finished() {
                checked[i] = true;
                ctx.state.remove_active_thread();
            }
        }

        ticks_since_stats += 1;
        if ticks_since_stats >= STATS_EVERY_TICKS {
            ticks_since_stats = 0;
            let (completed, avg_per_pass) = stats::aggregate(&stats);
            log::debug!("sending stats update for: {completed}, {avg_per_pass:.2}");
            let mut guard = ctx.socket.lock();
            let _ = protocol::send_message(&mut *guard, &Message::Stats { completed, avg_per_pass });
        }

        if ctx.state.active_threads() <= 0 || ctx.state.render_aborted() {
            break;
        }
    }

    for handle in handles {
        let _ = handle.join();
    }

    let mut guard = ctx.socket.lock();
    let _ = protocol::send_message(&mut *guard, &Message::Goodbye);
}

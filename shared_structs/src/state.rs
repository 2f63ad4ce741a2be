use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Idle,
    Rendering,
    Aborted,
    Shutdown,
}

/// `isRendering = (state == Rendering)`; `renderAborted` latches to `true`
/// on external cancellation and is the single cancellation signal threads
/// observe.
pub struct RendererState {
    phase: parking_lot::RwLock<RenderPhase>,
    render_aborted: AtomicBool,
    active_threads: AtomicI32,
}

impl RendererState {
    pub fn new() -> Self {
        Self {
            phase: parking_lot::RwLock::new(RenderPhase::Idle),
            render_aborted: AtomicBool::new(false),
            active_threads: AtomicI32::new(0),
        }
    }

    pub fn phase(&self) -> RenderPhase {
        *self.phase.read()
    }

    pub fn set_phase(&self, phase: RenderPhase) {
        *self.phase.write() = phase;
    }

    pub fn is_rendering(&self) -> bool {
        self.phase() == RenderPhase::Rendering
    }

    pub fn render_aborted(&self) -> bool {
        self.render_aborted.load(Ordering::Relaxed)
    }

    /// Setting this is the single cancellation signal.
    pub fn abort(&self) {
        self.render_aborted.store(true, Ordering::Relaxed);
        self.set_phase(RenderPhase::Aborted);
    }

    pub fn active_threads(&self) -> i32 {
        self.active_threads.load(Ordering::Relaxed)
    }

    pub fn add_active_thread(&self) {
        self.active_threads.fetch_add(1, Ordering::Relaxed);
    }

    /// Decremented by the supervisor only.
    pub fn remove_active_thread(&self) -> i32 {
        self.active_threads.fetch_sub(1, Ordering::Relaxed) - 1
    }

    pub fn reset_for_new_job(&self) {
        self.render_aborted.store(false, Ordering::Relaxed);
        self.active_threads.store(0, Ordering::Relaxed);
        self.set_phase(RenderPhase::Idle);
    }
}

impl Default for RendererState {
    fn default() -> Self {
        Self::new()
    }
}

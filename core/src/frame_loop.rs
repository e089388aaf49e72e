#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
    Suspended,
}

pub trait FrameScheduler {
    type Handle;

    fn request_frame(&mut self) -> Self::Handle;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

pub struct FrameLoop<S: FrameScheduler> {
    state: LoopState,
    pending: Option<S::Handle>,
    scheduler: S,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            state: LoopState::Stopped,
            pending: None,
            scheduler,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn start(&mut self) -> bool {
        if self.state != LoopState::Stopped {
            return false;
        }
        self.state = LoopState::Running;
        true
    }

    /// Called at the top of a frame callback. The request that delivered the
    /// callback is spent. Returns whether the frame should be drawn.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        self.state == LoopState::Running
    }

    pub fn end_frame(&mut self) {
        if self.state != LoopState::Running || self.pending.is_some() {
            return;
        }
        self.pending = Some(self.scheduler.request_frame());
    }

    pub fn suspend(&mut self) {
        if self.state != LoopState::Running {
            return;
        }
        self.state = LoopState::Suspended;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    pub fn resume(&mut self) -> bool {
        if self.state != LoopState::Suspended {
            return false;
        }
        self.state = LoopState::Running;
        true
    }
}

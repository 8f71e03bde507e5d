/// Which kind of frame the host should request next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    /// Nothing to draw repeatedly; render only on demand.
    #[default]
    Idle,
    /// At least one tween is scheduled; tick every frame until it settles.
    Animating,
    /// Nodes are on screen and idle effects are enabled; keep ticking for pulses and markers.
    Steady,
}

/// Explicit replacement for an auto-starting render loop.
///
/// The state is recomputed from scratch after every mutation and every tick, so "tween just
/// finished" and "loop restart" are the same transition.
#[derive(Clone, Debug, Default)]
pub struct FrameLoop {
    state: LoopState,
    transitions: u64,
}

impl FrameLoop {
    /// Controller in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of state changes so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Return `true` when the host should schedule another frame.
    pub fn wants_frame(&self) -> bool {
        self.state != LoopState::Idle
    }

    /// Recompute the state.
    pub fn update(&mut self, tweens_in_flight: bool, has_nodes: bool, idle_effects: bool) -> LoopState {
        let next = if tweens_in_flight {
            LoopState::Animating
        } else if has_nodes && idle_effects {
            LoopState::Steady
        } else {
            LoopState::Idle
        };
        if next != self.state {
            tracing::trace!(from = ?self.state, to = ?next, "frame loop state");
            self.state = next;
            self.transitions += 1;
        }
        next
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/frame_loop.rs"]
mod tests;

//! A frame callback chain that can be cancelled synchronously.
//!
//! Every chain has a generation. Tickets from an older generation are stale:
//! the callback that receives one must abort without touching shared state.

/// Permission to run one frame of the chain that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
}

impl FrameTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct FrameTask {
    generation: u64,
    pending: Option<FrameTicket>,
}

impl FrameTask {
    /// Start a new chain, superseding any previous one.
    pub fn begin(&mut self) -> FrameTicket {
        self.generation += 1;
        let ticket = FrameTicket {
            generation: self.generation,
        };
        self.pending = Some(ticket);
        ticket
    }

    /// Ask for another frame. Stale tickets are refused.
    pub fn reschedule(&mut self, ticket: FrameTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.pending = Some(ticket);
        true
    }

    /// Drop the pending frame and invalidate every outstanding ticket.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// Hand out the pending frame, if any. Called once per display frame.
    pub fn take_due(&mut self) -> Option<FrameTicket> {
        self.pending.take()
    }

    #[inline]
    pub fn is_current(&self, ticket: FrameTicket) -> bool {
        ticket.generation == self.generation
    }
}

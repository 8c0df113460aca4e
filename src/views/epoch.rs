use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Mount generation of a view.
///
/// A fetch takes a ticket before it starts; when the response arrives it is
/// applied only if the view has not been unmounted in the meantime.
#[derive(Debug, Clone, Default)]
pub struct MountEpoch(Arc<AtomicU64>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl MountEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> Ticket {
        Ticket(self.0.load(Ordering::Acquire))
    }

    /// Invalidates every outstanding ticket.
    pub fn advance(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.ticket() == ticket
    }
}

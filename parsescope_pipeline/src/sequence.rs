// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Request sequencing for stale-result suppression.
//!
//! Every request gets a [`Ticket`]. Each fan-out [`Target`] remembers the
//! newest ticket issued for it; a completion is applied only while its ticket
//! is still the newest for every target it covers and has not been applied
//! already.
//!
//! Compile requests cover every target. Work that finishes separately per
//! graph, such as an image decoding for one canvas, covers just that target.

/// One consumer of a compile result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// The token list.
    Tokens,
    /// The abstract syntax tree viewport.
    Ast,
    /// The parse tree viewport.
    ParseTree,
    /// The analysis list.
    Analysis,
}

impl Target {
    /// Every target, in fan-out order.
    pub const ALL: [Self; 4] = [Self::Tokens, Self::Ast, Self::ParseTree, Self::Analysis];

    const fn index(self) -> usize {
        match self {
            Self::Tokens => 0,
            Self::Ast => 1,
            Self::ParseTree => 2,
            Self::Analysis => 3,
        }
    }
}

/// Sequence number of one compile request. Later requests compare greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// The raw sequence number.
    #[must_use]
    pub fn seq(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Slot {
    latest: u64,
    settled: u64,
}

/// Issues tickets and decides which completions are still wanted.
#[derive(Clone, Debug, Default)]
pub struct RequestSequencer {
    next: u64,
    slots: [Slot; 4],
}

impl RequestSequencer {
    /// Creates a sequencer with no outstanding requests.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket covering `targets`, superseding older ones for them.
    pub fn issue(&mut self, targets: &[Target]) -> Ticket {
        self.next += 1;
        for target in targets {
            self.slots[target.index()].latest = self.next;
        }
        Ticket(self.next)
    }

    /// The newest ticket issued so far, across all targets.
    #[must_use]
    pub fn latest(&self) -> Option<Ticket> {
        (self.next > 0).then_some(Ticket(self.next))
    }

    /// Returns `true` if `ticket` is the newest unsettled request for `target`.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket, target: Target) -> bool {
        let slot = &self.slots[target.index()];
        slot.latest == ticket.0 && slot.settled < ticket.0
    }

    /// Claims `ticket` for `targets` if it is current for all of them.
    ///
    /// Returns `false`, changing nothing, if any target has a newer request
    /// or already applied this one.
    pub fn settle(&mut self, ticket: Ticket, targets: &[Target]) -> bool {
        if !targets.iter().all(|&t| self.is_current(ticket, t)) {
            return false;
        }
        for target in targets {
            self.slots[target.index()].settled = ticket.0;
        }
        true
    }
}

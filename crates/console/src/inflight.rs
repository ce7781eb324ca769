//! At-most-one in-flight operation per category.
//!
//! Starting an operation cancels the previous one of the same category
//! before handing out a new ticket. Only the ticket currently held in a
//! category's slot may commit its result, so a superseded completion that
//! arrives late (or ignores its cancellation token) is discarded.

use std::fmt;

use tokio_util::sync::CancellationToken;

/// Operation category of a resource's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    List,
    Create,
    Detail,
    Update,
    Delete,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::List,
        Category::Create,
        Category::Detail,
        Category::Update,
        Category::Delete,
    ];

    const fn index(self) -> usize {
        match self {
            Category::List => 0,
            Category::Create => 1,
            Category::Detail => 2,
            Category::Update => 3,
            Category::Delete => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::List => "list",
            Category::Create => "create",
            Category::Detail => "detail",
            Category::Update => "update",
            Category::Delete => "delete",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proof of having started an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    category: Category,
    seq: u64,
}

impl Ticket {
    pub fn category(&self) -> Category {
        self.category
    }

    /// Monotonic sequence number, unique per guard.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug)]
struct Slot {
    seq: u64,
    token: CancellationToken,
}

/// Per-category cancel-before-start bookkeeping.
#[derive(Debug, Default)]
pub struct InFlightGuard {
    next_seq: u64,
    slots: [Option<Slot>; 5],
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the category's previous operation and start a new one.
    pub fn begin(&mut self, category: Category) -> (Ticket, CancellationToken) {
        self.cancel(category);

        self.next_seq += 1;
        let token = CancellationToken::new();
        self.slots[category.index()] = Some(Slot {
            seq: self.next_seq,
            token: token.clone(),
        });

        (
            Ticket {
                category,
                seq: self.next_seq,
            },
            token,
        )
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.slots[ticket.category.index()]
            .as_ref()
            .is_some_and(|slot| slot.seq == ticket.seq)
    }

    /// Release the slot if `ticket` still holds it. Returns whether the
    /// caller may commit its result.
    pub fn finish(&mut self, ticket: &Ticket) -> bool {
        if self.is_current(ticket) {
            self.slots[ticket.category.index()] = None;
            true
        } else {
            false
        }
    }

    /// Cancel the category's in-flight operation, if any.
    pub fn cancel(&mut self, category: Category) -> bool {
        match self.slots[category.index()].take() {
            Some(slot) => {
                slot.token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for category in Category::ALL {
            self.cancel(category);
        }
    }

    pub fn is_active(&self, category: Category) -> bool {
        self.slots[category.index()].is_some()
    }
}

//! Change notifications delivered to subscribers.

use std::sync::mpsc::Sender;

use serde::Serialize;

use crate::history::{EditOrigin, GroupId};
use crate::mode::Mode;

use super::DocumentId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ChangeKind {
    /// A new group was committed or typing extended the last one
    Edit { group: GroupId, origin: EditOrigin },
    Undo { group: GroupId },
    Redo { group: GroupId },
    /// Marked text changed or a composition was cancelled
    Composition,
    ModeSwitch { from: Mode, to: Mode },
    Restore,
}

/// One accepted change. Delivered in acceptance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub document: DocumentId,
    pub revision: u64,
    pub kind: ChangeKind,
}

#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    senders: Vec<Sender<Change>>,
}

impl Subscribers {
    pub fn add(&mut self, sender: Sender<Change>) {
        self.senders.push(sender);
    }

    /// Send to every live subscriber; dropped receivers are forgotten
    pub fn notify(&mut self, change: &Change) {
        self.senders
            .retain(|sender| sender.send(change.clone()).is_ok());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.senders.len()
    }
}

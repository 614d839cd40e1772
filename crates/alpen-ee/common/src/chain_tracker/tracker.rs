//! Main chain tracker combining unfinalized and orphan trackers.

use std::collections::VecDeque;

use tracing::warn;

use super::{
    error::ChainTrackerError,
    item::{ChainItem, ItemEntry},
    orphan::OrphanTracker,
    unfinalized::{AttachResult, PruneReport, UnfinalizedTracker},
};

/// Result of appending an item to the tracker.
#[derive(Debug)]
pub enum AppendResult<Id> {
    /// Successfully attached to the chain, returns new best tip id
    Attached(Id),
    /// Item already exists in the tracker
    AlreadyExists,
    /// Item index is below finalized, rejected
    BelowFinalized,
    /// Item is orphaned (parent unknown), tracked for later attachment
    Orphaned,
}

/// Tracks a chain of items, managing both unfinalized items and orphans.
///
/// Coordinates between the unfinalized tracker (for items extending the chain)
/// and the orphan tracker (for items whose parent is not yet known).
#[derive(Debug)]
pub struct ChainTracker<Item: ChainItem> {
    /// Tracks the unfinalized chain from finalized tip to best tip
    unfinalized: UnfinalizedTracker<Item::Id>,
    /// Tracks orphan items waiting for their parent
    orphans: OrphanTracker<Item::Id>,
    /// Marker for the Item type
    _item: std::marker::PhantomData<Item>,
}

impl<Item: ChainItem> ChainTracker<Item> {
    /// Creates a new tracker with the finalized item as starting point.
    pub fn new(finalized_item: Item) -> Self {
        Self {
            unfinalized: UnfinalizedTracker::new(finalized_item.as_entry()),
            orphans: OrphanTracker::new(),
            _item: std::marker::PhantomData,
        }
    }

    /// Helper to create a new tracker with finalized item and existing unfinalized items.
    pub fn new_with_unfinalized(finalized_item: Item, unfinalized_items: Vec<Item>) -> Self {
        let mut tracker = Self::new(finalized_item);

        for item in unfinalized_items {
            let _ = tracker.append(item);
        }

        tracker
    }

    /// Returns the current best tip id.
    pub fn tip_id(&self) -> &Item::Id {
        self.unfinalized.best_id()
    }

    /// Returns the current finalized item's id.
    pub fn finalized_id(&self) -> &Item::Id {
        self.unfinalized.finalized_id()
    }

    /// Returns the current finalized item's index.
    pub fn finalized_index(&self) -> u64 {
        self.unfinalized.finalized_index()
    }

    /// Appends a new item to the chain state.
    ///
    /// Attempts to attach the item to the unfinalized chain. If successful, checks if any
    /// orphan items can now be attached.
    pub fn append(&mut self, item: Item) -> AppendResult<Item::Id> {
        let entry = item.as_entry();
        let id = entry.id.clone();

        match self.unfinalized.attach(entry) {
            AttachResult::Attached(_) => {
                let tip = self.process_orphans_after_attach(&id);
                AppendResult::Attached(tip)
            }
            AttachResult::Existing => {
                warn!(?id, "item already present in tracker");
                AppendResult::AlreadyExists
            }
            AttachResult::BelowFinalized => AppendResult::BelowFinalized,
            AttachResult::Orphan => {
                self.orphans.insert(item.as_entry());
                AppendResult::Orphaned
            }
        }
    }

    /// Processes orphans that may now be attachable after a new item was attached.
    ///
    /// Returns the final best tip id after all possible orphans are attached.
    fn process_orphans_after_attach(&mut self, attached_id: &Item::Id) -> Item::Id {
        let mut queue: VecDeque<ItemEntry<Item::Id>> =
            self.orphans.take_children(attached_id).into();

        while let Some(entry) = queue.pop_front() {
            let entry_id = entry.id.clone();

            match self.unfinalized.attach(entry) {
                AttachResult::Attached(_) => {
                    // Check if this newly attached item has orphan children
                    queue.extend(self.orphans.take_children(&entry_id));
                }
                AttachResult::Existing => {
                    warn!(
                        ?entry_id,
                        "unexpected existing item during orphan processing"
                    );
                }
                AttachResult::Orphan | AttachResult::BelowFinalized => {
                    unreachable!("orphan's parent was just attached");
                }
            }
        }

        self.unfinalized.best_id().clone()
    }

    /// Checks if an item is tracked (either unfinalized or orphan).
    pub fn contains(&self, id: &Item::Id) -> bool {
        self.unfinalized.contains(id) || self.orphans.contains(id)
    }

    /// Checks if an item is in the unfinalized tracker.
    pub fn contains_unfinalized(&self, id: &Item::Id) -> bool {
        self.unfinalized.contains(id)
    }

    /// Checks if an item is in the orphan tracker.
    pub fn contains_orphan(&self, id: &Item::Id) -> bool {
        self.orphans.contains(id)
    }

    /// Returns the canonical chain from finalized (exclusive) to tip (inclusive).
    ///
    /// Items are ordered oldest to newest.
    pub fn canonical_chain(&self) -> &[Item::Id] {
        self.unfinalized.canonical_chain()
    }

    /// Returns the id at the given index on the canonical chain.
    ///
    /// Returns None if index is below finalized or above tip.
    pub fn canonical_id_at_index(&self, index: u64) -> Option<&Item::Id> {
        self.unfinalized.canonical_id_at_index(index)
    }

    /// Checks if an item is on the canonical chain.
    pub fn is_canonical(&self, id: &Item::Id) -> bool {
        self.unfinalized.is_canonical(id)
    }

    /// Prunes in-memory state up to the new finalized item.
    ///
    /// The new finalized item must be in the unfinalized tracker.
    /// Also prunes orphans at or below the new finalized index.
    ///
    /// Returns a report of items that were finalized and pruned.
    pub fn prune_to(
        &mut self,
        new_finalized_id: Item::Id,
    ) -> Result<PruneReport<Item::Id>, ChainTrackerError<Item::Id>> {
        let mut report = self.unfinalized.prune_to(new_finalized_id)?;

        // Prune old orphans
        let finalized_index = self.unfinalized.finalized_index();
        let pruned_orphans = self.orphans.purge_up_to_index(finalized_index);
        report.pruned.extend(pruned_orphans);

        Ok(report)
    }
}

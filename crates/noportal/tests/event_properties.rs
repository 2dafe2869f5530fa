//! Property-based tests for placement handling
//!
//! A placement event may carry a whole portal frame; only the first Nether
//! portal block decides it, and the player is asked about exactly once.

use std::cell::Cell;

use proptest::prelude::*;
use noportal::{BlockPlaceEvent, BlockTransaction, Cancellable, PortalListener, RecordingMessageSink};
use noportal_config::MessageTable;
use noportal_gate::{ActorId, BlockType, PermissionOracle, PortalPermission};

const BLOCK_IDS: [&str; 6] = [
    "minecraft:air",
    "minecraft:obsidian",
    "minecraft:fire",
    "minecraft:nether_portal",
    "minecraft:end_portal",
    "minecraft:end_portal_frame",
];

fn transactions_strategy() -> impl Strategy<Value = Vec<BlockTransaction>> {
    prop::collection::vec(
        (prop::sample::select(BLOCK_IDS.to_vec()), prop::sample::select(BLOCK_IDS.to_vec())),
        0..12,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(original, replacement)| BlockTransaction::new(original, replacement))
            .collect()
    })
}

struct CountingOracle {
    answer: bool,
    calls: Cell<usize>,
}

impl PermissionOracle for CountingOracle {
    fn has_permission(&self, _actor: &ActorId, permission: PortalPermission) -> bool {
        assert_eq!(permission, PortalPermission::NetherPortalCreate);
        self.calls.set(self.calls.get() + 1);
        self.answer
    }
}

proptest! {
    /// The deciding transaction is the first one producing a Nether portal
    #[test]
    fn prop_first_nether_portal_decides(transactions in transactions_strategy()) {
        let expected = transactions
            .iter()
            .position(|t| t.replacement == "minecraft:nether_portal");
        let event = BlockPlaceEvent::new(transactions, None);

        match expected {
            Some(index) => {
                prop_assert_eq!(
                    event.deciding_transaction(),
                    Some((index, BlockType::NetherPortal))
                );
            }
            None => {
                prop_assert_ne!(
                    event.deciding_transaction().map(|(_, block_type)| block_type),
                    Some(BlockType::NetherPortal)
                );
            }
        }
    }

    /// A placement is cancelled exactly when it forms a Nether portal the
    /// player may not create, after at most one permission query
    #[test]
    fn prop_placement_cancelled_iff_unpermitted_portal(
        transactions in transactions_strategy(),
        answer in any::<bool>(),
    ) {
        let forms_portal = transactions
            .iter()
            .any(|t| t.resulting_type() == BlockType::NetherPortal);
        let oracle = CountingOracle { answer, calls: Cell::new(0) };
        let listener = PortalListener::new(
            &oracle,
            RecordingMessageSink::new(),
            std::sync::Arc::new(MessageTable::empty()),
        );

        let mut event = BlockPlaceEvent::new(transactions, Some(ActorId::random()));
        listener.on_block_place(&mut event);

        prop_assert_eq!(event.is_cancelled(), forms_portal && !answer);
        prop_assert_eq!(oracle.calls.get(), usize::from(forms_portal));
    }
}

/**
 * Score Ledger
 *
 * Per-room, per-user point accumulation backed by the room store. Every
 * answered question moves the answering user by exactly ten points, up or
 * down; the adjustment is one atomic UPDATE, so near-simultaneous answers
 * never lose an update, and adjustments for different users commute.
 */
use std::sync::Arc;

use crate::backend::error::BackendResult;
use crate::backend::rooms::store::RoomStore;
use crate::shared::PlayerScore;

/// Points granted for a correct answer and deducted for a wrong one.
pub const POINTS_PER_ANSWER: i32 = 10;

pub struct ScoreLedger {
    store: Arc<dyn RoomStore>,
}

impl ScoreLedger {
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self { store }
    }

    /// The point delta a verdict is worth.
    pub fn delta_for(correct: bool) -> i32 {
        if correct {
            POINTS_PER_ANSWER
        } else {
            -POINTS_PER_ANSWER
        }
    }

    /// Apply a point adjustment for one participant.
    pub async fn adjust_points(&self, room_id: i32, user_id: i32, delta: i32) -> BackendResult<()> {
        self.store.adjust_points(room_id, user_id, delta).await
    }

    /// Current standings: online participants, points descending, ties by
    /// join order.
    pub async fn standings(&self, room_id: i32) -> BackendResult<Vec<PlayerScore>> {
        self.store.standings(room_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_is_symmetric() {
        assert_eq!(ScoreLedger::delta_for(true), 10);
        assert_eq!(ScoreLedger::delta_for(false), -10);
        assert_eq!(ScoreLedger::delta_for(true) + ScoreLedger::delta_for(false), 0);
    }
}

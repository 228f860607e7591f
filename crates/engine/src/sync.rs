//! Milestone sync batch
//!
//! Pushes every unsynced milestone for a user to the chain gateway. A record
//! the gateway rejects is reported inline and stays unsynced, so the next
//! batch picks it up again; an unreachable gateway aborts the batch. Nothing
//! here ever touches committed check-in or streak state.

use crate::milestones::reward_for;
use constrix_core::{Error, MilestoneSyncResult, Result, SyncOutcome};
use constrix_networking::{ChainError, ChainGateway, MilestoneRecord};
use constrix_persistence::sqlite::milestones;
use constrix_persistence::Database;
use tracing::{info, instrument, warn};

/// Sync all pending milestones for a user's habits
#[instrument(skip(db, gateway))]
pub async fn sync_pending<G: ChainGateway>(
    db: &Database,
    gateway: &G,
    user_id: i64,
) -> Result<SyncOutcome> {
    let pending = milestones::list_unsynced_for_user(db.pool(), user_id).await?;
    if pending.is_empty() {
        return Ok(SyncOutcome {
            synced: 0,
            results: Vec::new(),
        });
    }

    let mut synced = 0u32;
    let mut results = Vec::with_capacity(pending.len());

    for item in pending {
        let record = MilestoneRecord {
            wallet_address: item.wallet_address.clone(),
            habit_type: item.habit_type,
            milestone_days: item.milestone.milestone_days,
            reward_amount: reward_for(item.milestone.milestone_days),
        };

        match gateway.record_milestone(&record).await {
            Ok(tx_ref) => {
                milestones::mark_synced(db.pool(), item.milestone.id, &tx_ref).await?;
                synced += 1;
                results.push(MilestoneSyncResult {
                    milestone_id: item.milestone.id,
                    habit_type: item.habit_type,
                    milestone_days: item.milestone.milestone_days,
                    success: true,
                    tx_ref: Some(tx_ref),
                    error: None,
                });
            }
            Err(ChainError::Rejected(msg)) => {
                // Stays unsynced, re-enters the candidate set next call
                warn!(
                    "Milestone {} ({} days) rejected by gateway: {}",
                    item.milestone.id, item.milestone.milestone_days, msg
                );
                results.push(MilestoneSyncResult {
                    milestone_id: item.milestone.id,
                    habit_type: item.habit_type,
                    milestone_days: item.milestone.milestone_days,
                    success: false,
                    tx_ref: None,
                    error: Some(msg),
                });
            }
            Err(ChainError::Unavailable(msg)) => {
                warn!("Chain gateway unreachable, aborting sync batch: {}", msg);
                return Err(Error::ExternalService(msg));
            }
        }
    }

    info!("Synced {}/{} pending milestones", synced, results.len());
    Ok(SyncOutcome { synced, results })
}

// src/tasks/inactivity_sweep.rs

use tracing::{debug, info};

use clientdesk_common::models::client::MILLIS_PER_DAY;
use clientdesk_common::models::ClientStatus;
use clientdesk_common::traits::repository_traits::ClientRepository;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepOutcome {
    pub updated_count: usize,
}

/// Marks every client whose last interaction is older than `threshold_days` as
/// `Inactivo`. Clients already inactive are skipped and never counted.
///
/// Each status change is a conditional write that re-checks status and staleness, so
/// a client is counted by at most one of two overlapping sweeps and one touched after
/// the listing is left alone. A store error aborts the run; patches already written
/// stay written and a later run picks up the rest.
pub async fn run_inactivity_sweep(
    clients: &dyn ClientRepository,
    threshold_days: u32,
    now_ms: i64,
) -> Result<SweepOutcome, Error> {
    if threshold_days == 0 {
        return Err(Error::Config("Inactivity threshold must be at least 1 day".into()));
    }

    let cutoff = now_ms - i64::from(threshold_days) * MILLIS_PER_DAY;
    let all = clients.list_clients().await?;
    info!(
        "Inactivity sweep: {} client(s), threshold {} day(s)",
        all.len(),
        threshold_days
    );

    let mut updated_count = 0;
    for client in all
        .iter()
        .filter(|c| c.status != ClientStatus::Inactive && c.last_interaction_at < cutoff)
    {
        if clients.mark_inactive(client.id, cutoff).await? {
            debug!("Client {} ({}) marked inactive", client.id, client.name);
            updated_count += 1;
        }
    }

    info!("Inactivity sweep finished: {} client(s) marked inactive", updated_count);
    Ok(SweepOutcome { updated_count })
}

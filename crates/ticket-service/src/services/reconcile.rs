//! Channel reconciliation service
//!
//! Bindings drift: a moderator deletes a ticket channel by hand, or channel
//! creation failed at open time. The sweep walks every open ticket in a
//! guild and repairs its binding, so storage stays the source of truth and
//! the platform is brought back in line with it.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use ticket_core::Snowflake;

use super::binding::BindingService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Outcome of one reconciliation sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Open tickets examined
    pub scanned: usize,
    /// Bindings recreated, whether missing or stale
    pub repaired: usize,
    /// Repairs that failed and were left for the next sweep
    pub failed: usize,
}

/// Channel reconciliation service
pub struct ReconcileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReconcileService<'a> {
    /// Create a new ReconcileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Repair bindings for every open ticket in a guild
    ///
    /// A ticket bound to a channel that no longer exists has the stale id
    /// cleared and a fresh channel created; a ticket that never got a
    /// channel gets one now. Individual failures are logged and counted,
    /// never aborting the sweep.
    #[instrument(skip(self))]
    pub async fn sweep(&self, guild_id: Snowflake) -> ServiceResult<SweepReport> {
        let settings = self.ctx.settings_repo().find_or_default(guild_id).await?;
        let tickets = self.ctx.ticket_repo().list_open_by_guild(guild_id).await?;

        let mut report = SweepReport {
            scanned: tickets.len(),
            ..SweepReport::default()
        };

        for ticket in tickets {
            let _guard = self.ctx.locks().acquire(ticket.id).await;

            let ticket = match ticket.channel_id {
                None => ticket,
                Some(channel_id) => {
                    match self.ctx.platform().channel_exists(channel_id).await {
                        Ok(true) => continue,
                        Ok(false) => {
                            info!(ticket_id = ticket.id, %channel_id, "Stale binding detected");
                            self.ctx.ticket_repo().clear_channel(ticket.id).await?;
                            ticket_core::Ticket {
                                channel_id: None,
                                ..ticket
                            }
                        }
                        Err(e) => {
                            warn!(ticket_id = ticket.id, error = %e, "Channel probe failed");
                            report.failed += 1;
                            continue;
                        }
                    }
                }
            };

            let creator = match self.ctx.user_repo().find_by_id(ticket.creator_id).await? {
                Some(user) => user,
                None => {
                    warn!(ticket_id = ticket.id, "Creator record missing, skipping repair");
                    report.failed += 1;
                    continue;
                }
            };

            match BindingService::new(self.ctx)
                .bind(&ticket, &creator, &settings)
                .await
            {
                Ok(_) => report.repaired += 1,
                Err(e) => {
                    warn!(ticket_id = ticket.id, error = %e, "Binding repair failed");
                    report.failed += 1;
                }
            }
        }

        if report.repaired > 0 || report.failed > 0 {
            info!(
                %guild_id,
                scanned = report.scanned,
                repaired = report.repaired,
                failed = report.failed,
                "Reconcile sweep finished"
            );
        }
        Ok(report)
    }
}

/// Periodic reconciliation driver, run as a background task
///
/// Sweeps each guild on a fixed interval taken from the bot configuration.
/// Sweep errors are logged and the loop keeps going.
pub async fn run_reconcile_loop(ctx: Arc<ServiceContext>, guild_ids: Vec<Snowflake>) {
    let period = Duration::from_secs(ctx.bot().reconcile_interval_seconds);
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        for &guild_id in &guild_ids {
            if let Err(e) = ReconcileService::new(&ctx).sweep(guild_id).await {
                warn!(%guild_id, error = %e, "Reconcile sweep failed");
            }
        }
    }
}

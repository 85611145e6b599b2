//! Combat domain: hitsplats, animations, interaction changes.

use ticklens_host::HostState;
use ticklens_types::records::CombatRecord;

use crate::collectors::CollectError;
use crate::session::SessionContext;

/// Collect the combat sub-record from the queued combat events and the
/// local actor's current interaction.
///
/// Never fails: with no actor present, the record reports the drained
/// counts with `in_combat` false.
pub fn collect(host: &dyn HostState, session: &SessionContext) -> Result<CombatRecord, CollectError> {
    let hitsplats = session.drain_hitsplats();
    let animations = session.drain_animations();
    let interactions = session.drain_interactions();

    let mut damage_dealt = 0_i64;
    let mut damage_taken = 0_i64;
    for h in &hitsplats {
        if h.on_self {
            damage_taken = damage_taken.saturating_add(i64::from(h.amount));
        } else {
            damage_dealt = damage_dealt.saturating_add(i64::from(h.amount));
        }
    }

    // Idle (-1) transitions are drained but do not update the last
    // animation seen.
    let last_animation_id = animations
        .iter()
        .rev()
        .map(|a| a.animation_id)
        .find(|id| *id >= 0)
        .unwrap_or(-1);

    let interacting = host.local_actor().and_then(|a| a.interacting);
    let current_target = interacting.as_ref().and_then(|t| t.name.clone());

    Ok(CombatRecord {
        hitsplat_count: u32::try_from(hitsplats.len()).unwrap_or(u32::MAX),
        damage_dealt,
        damage_taken,
        animation_change_count: u32::try_from(animations.len()).unwrap_or(u32::MAX),
        last_animation_id,
        interaction_change_count: u32::try_from(interactions.len()).unwrap_or(u32::MAX),
        in_combat: interacting.is_some(),
        current_target,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use ticklens_host::{InteractingTarget, LocalActor, StubHost};
    use ticklens_types::events::{AnimationEvent, HitsplatEvent};
    use ticklens_types::ids::SessionId;

    use crate::config::QueueConfig;

    use super::*;

    fn session() -> SessionContext {
        SessionContext::new(SessionId::new(), &QueueConfig::default(), Utc::now())
    }

    fn hitsplat(amount: i32, on_self: bool) -> HitsplatEvent {
        HitsplatEvent {
            actor_name: String::from("Goblin"),
            amount,
            on_self,
            received_at: Utc::now(),
        }
    }

    #[test]
    fn quiet_tick_reports_zeroes() {
        let host = StubHost::new();
        let ctx = session();
        let record = collect(&host, &ctx).unwrap();
        assert_eq!(record.hitsplat_count, 0);
        assert_eq!(record.last_animation_id, -1);
        assert!(!record.in_combat);
    }

    #[test]
    fn damage_splits_by_direction() {
        let host = StubHost::new();
        let ctx = session();
        ctx.record_hitsplat(hitsplat(7, false));
        ctx.record_hitsplat(hitsplat(3, false));
        ctx.record_hitsplat(hitsplat(11, true));

        let record = collect(&host, &ctx).unwrap();
        assert_eq!(record.hitsplat_count, 3);
        assert_eq!(record.damage_dealt, 10);
        assert_eq!(record.damage_taken, 11);
    }

    #[test]
    fn queues_are_empty_after_collection() {
        let host = StubHost::new();
        let ctx = session();
        ctx.record_hitsplat(hitsplat(5, false));
        let _ = collect(&host, &ctx).unwrap();
        let record = collect(&host, &ctx).unwrap();
        assert_eq!(record.hitsplat_count, 0);
    }

    #[test]
    fn last_animation_skips_idle_transitions() {
        let host = StubHost::new();
        let ctx = session();
        for id in [833, -1] {
            ctx.record_animation(AnimationEvent {
                animation_id: id,
                on_self: true,
                received_at: Utc::now(),
            });
        }
        let record = collect(&host, &ctx).unwrap();
        assert_eq!(record.animation_change_count, 2);
        assert_eq!(record.last_animation_id, 833);
    }

    #[test]
    fn interacting_actor_is_in_combat() {
        let host = StubHost::new();
        host.set_local_actor(LocalActor {
            interacting: Some(InteractingTarget {
                name: Some(String::from("Goblin")),
                is_player: false,
            }),
            ..LocalActor::default()
        });
        let ctx = session();
        let record = collect(&host, &ctx).unwrap();
        assert!(record.in_combat);
        assert_eq!(record.current_target.as_deref(), Some("Goblin"));
    }
}

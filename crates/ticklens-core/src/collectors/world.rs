//! World domain: scene environment and nearby-entity summaries.

use ticklens_host::{HostState, SceneActor};
use ticklens_types::point::TilePoint;
use ticklens_types::records::WorldRecord;

use crate::collectors::CollectError;

/// Closest actor to `origin` by tile distance, with its name.
fn closest(origin: TilePoint, actors: &[SceneActor]) -> Option<(Option<String>, f64)> {
    actors
        .iter()
        .map(|a| (a.name.clone(), origin.distance_to(a.position)))
        .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2))
}

/// Collect the world sub-record.
///
/// Fails with [`CollectError::ActorUnavailable`] when the local actor
/// has no scene position -- nearby-entity distances are anchored on it.
pub fn collect(host: &dyn HostState) -> Result<WorldRecord, CollectError> {
    let actor = host.local_actor().ok_or(CollectError::ActorUnavailable)?;
    let origin = actor.position.ok_or(CollectError::ActorUnavailable)?;

    let players = host.scene_players();
    let npcs = host.scene_npcs();

    let closest_player = closest(origin, &players);
    let closest_npc = closest(origin, &npcs);

    Ok(WorldRecord {
        plane: origin.plane,
        nearby_player_count: u32::try_from(players.len()).unwrap_or(u32::MAX),
        nearby_npc_count: u32::try_from(npcs.len()).unwrap_or(u32::MAX),
        closest_player_name: closest_player.as_ref().and_then(|(name, _)| name.clone()),
        closest_player_distance: closest_player.map(|(_, d)| d),
        closest_npc_name: closest_npc.as_ref().and_then(|(name, _)| name.clone()),
        closest_npc_distance: closest_npc.map(|(_, d)| d),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ticklens_host::{LocalActor, StubHost};

    use super::*;

    fn host_at(x: i32, y: i32) -> StubHost {
        let host = StubHost::new();
        host.set_local_actor(LocalActor {
            position: Some(TilePoint::new(x, y, 0)),
            ..LocalActor::default()
        });
        host
    }

    #[test]
    fn positionless_actor_fails_collection() {
        let host = StubHost::new();
        host.set_local_actor(LocalActor::default());
        assert!(matches!(collect(&host), Err(CollectError::ActorUnavailable)));
    }

    #[test]
    fn empty_scene_reports_zero_counts() {
        let host = host_at(100, 100);
        let record = collect(&host).unwrap();
        assert_eq!(record.nearby_player_count, 0);
        assert_eq!(record.nearby_npc_count, 0);
        assert!(record.closest_npc_name.is_none());
        assert!(record.closest_npc_distance.is_none());
    }

    #[test]
    fn closest_npc_wins_by_distance() {
        let host = host_at(0, 0);
        host.set_scene_npcs(vec![
            SceneActor {
                name: Some(String::from("Far goblin")),
                position: TilePoint::new(30, 0, 0),
            },
            SceneActor {
                name: Some(String::from("Near rat")),
                position: TilePoint::new(2, 0, 0),
            },
        ]);
        let record = collect(&host).unwrap();
        assert_eq!(record.nearby_npc_count, 2);
        assert_eq!(record.closest_npc_name.as_deref(), Some("Near rat"));
        assert!((record.closest_npc_distance.unwrap() - 2.0).abs() < f64::EPSILON);
    }
}

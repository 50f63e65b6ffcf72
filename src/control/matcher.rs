//! Gesture → apple matching.

use crate::game::{Apple, Arena, Edge, SliceAction};

/// Result of resolving one fired gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// `index` into the apple list; the apple is now sliced.
    Sliced { index: usize, edge: Edge },
    /// No eligible apple matched.
    Miss,
}

/// Slice the first apple (in spawn order) that is alive, has entered the
/// valid zone, is currently outside the forbidden region, expects
/// `action`, and is still within its cut window at `now`.
///
/// `now` is the pause-adjusted session clock.  At most one apple is
/// sliced per call.
pub fn resolve(
    apples: &mut [Apple],
    action: SliceAction,
    now: f64,
    arena: &Arena,
    cut_time_limit: f64,
) -> MatchOutcome {
    let hit = apples.iter().position(|a| {
        let Some(entry) = a.valid_zone_entry_time() else {
            return false;
        };
        let since = now - entry;
        a.is_alive()
            && a.is_in_valid_zone(arena)
            && a.expected_action() == action
            && (0.0..=cut_time_limit).contains(&since)
    });

    match hit {
        Some(index) if apples[index].slice() => MatchOutcome::Sliced {
            index,
            edge: apples[index].edge(),
        },
        _ => MatchOutcome::Miss,
    }
}

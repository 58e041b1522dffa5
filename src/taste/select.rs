use std::cmp::Ordering;
use std::collections::HashMap;

use super::{ScoredCandidate, TasteError};

/// Selects the playlist from the scored candidates.
///
/// Picks `min(size, candidates)` tracks maximizing total score: candidates
/// are stably sorted by score descending and taken greedily. Equal scores
/// keep their candidate order, which is the documented tie-break.
/// With a per-artist cap the greedy skips candidates whose primary artist is
/// already at the cap; the size constraint and the per-artist caps form a
/// laminar family, so the greedy result is still the maximum-score subset.
///
/// An undersized pool shrinks the playlist rather than failing; only a cap
/// that leaves fewer selectable tracks than the target is an error. The
/// returned selection is in score order and free of duplicates.
pub fn select(
    scored: &[ScoredCandidate],
    size: usize,
    max_per_artist: Option<usize>,
) -> Result<Vec<ScoredCandidate>, TasteError> {
    let target = size.min(scored.len());
    if target == 0 {
        return Ok(Vec::new());
    }

    let mut order: Vec<usize> = (0..scored.len()).collect();
    order.sort_by(|&a, &b| {
        scored[b]
            .score
            .partial_cmp(&scored[a].score)
            .unwrap_or(Ordering::Equal)
    });

    let mut picks: Vec<ScoredCandidate> = Vec::with_capacity(target);

    match max_per_artist {
        None => {
            picks.extend(order.iter().take(target).map(|&i| scored[i].clone()));
        }
        Some(cap) => {
            let mut per_artist: HashMap<&str, usize> = HashMap::new();
            for &i in &order {
                if picks.len() == target {
                    break;
                }
                let candidate = &scored[i].candidate;
                // Tracks without artist credits count against their own id.
                let artist_key = candidate
                    .artist_ids
                    .first()
                    .unwrap_or(&candidate.id)
                    .as_str();
                let count = per_artist.entry(artist_key).or_insert(0);
                if *count >= cap {
                    continue;
                }
                *count += 1;
                picks.push(scored[i].clone());
            }

            if picks.len() < target {
                return Err(TasteError::Infeasible {
                    wanted: target,
                    selectable: picks.len(),
                    max_per_artist: cap,
                });
            }
        }
    }

    Ok(picks)
}

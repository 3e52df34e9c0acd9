//! Candidate relationship discovery.

use crate::model::{CandidateLink, NodeInfo, Record, Relations};
use rustc_hash::FxHashMap;

/// Produce every candidate relationship between records that share a
/// non-empty tag, where the target is strictly later than the source.
///
/// One candidate is pushed per qualifying tag, so a pair of records sharing
/// two tags yields two links, each carrying its own tag and duration. The
/// returned [`Relations`] also maps every involved record name to its
/// renderer-facing [`NodeInfo`].
///
/// O(n² · t) over n records with up to t = 3 tags each; fine for the
/// dozens-to-hundreds of records this system is built for.
pub fn candidate_links(records: &[Record]) -> Relations {
    let mut links = Vec::new();
    let mut node_info: FxHashMap<String, NodeInfo> = FxHashMap::default();

    for source in records {
        for target in records {
            // Weeds out reversed pairs, self pairs, and records that occur
            // in the same month.
            let duration = source.months_until(target);
            if duration <= 0 {
                continue;
            }

            let target_tags = target.tags();
            for tag in source.tags() {
                if tag.is_empty() || !target_tags.contains(&tag) {
                    continue;
                }

                links.push(CandidateLink {
                    source: source.name.clone(),
                    target: target.name.clone(),
                    tag: tag.to_string(),
                    duration,
                });

                node_info
                    .entry(source.name.clone())
                    .or_insert_with(|| NodeInfo {
                        url: source.url.clone(),
                        img: source.img.clone(),
                    });
                node_info
                    .entry(target.name.clone())
                    .or_insert_with(|| NodeInfo {
                        url: target.url.clone(),
                        img: target.img.clone(),
                    });
            }
        }
    }

    tracing::debug!(
        records = records.len(),
        candidates = links.len(),
        "discovered candidate links"
    );

    Relations { links, node_info }
}

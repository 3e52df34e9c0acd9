//! Redundant relationship pruning.

use crate::model::CandidateLink;

/// Keep only the temporally nearest outgoing relationship per
/// (source, tag).
///
/// A candidate is dropped when another candidate with the same source and
/// tag reaches a different target in strictly fewer months: the nearer
/// record will itself chain forward, so the long-range link would only
/// duplicate the path. Equal durations are not tied apart; both links
/// survive. A candidate with no same-tag competitor trivially survives.
pub fn prune(candidates: Vec<CandidateLink>) -> Vec<CandidateLink> {
    let total = candidates.len();
    let surviving: Vec<CandidateLink> = candidates
        .iter()
        .filter(|link| {
            !candidates.iter().any(|other| {
                other.source == link.source
                    && other.tag == link.tag
                    && link.duration > other.duration
            })
        })
        .cloned()
        .collect();

    tracing::debug!(total, surviving = surviving.len(), "pruned candidate links");
    surviving
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(source: &str, target: &str, tag: &str, duration: i32) -> CandidateLink {
        CandidateLink {
            source: source.to_string(),
            target: target.to_string(),
            tag: tag.to_string(),
            duration,
        }
    }

    #[test]
    fn drops_longer_link_with_same_source_and_tag() {
        // A(2020-01), B(2020-03), C(2020-06), all tagged the same:
        // A->C is dominated by A->B; B->C has no competitor.
        let candidates = vec![
            link("A", "B", "x", 2),
            link("A", "C", "x", 5),
            link("B", "C", "x", 3),
        ];
        let surviving = prune(candidates);
        assert_eq!(
            surviving,
            vec![link("A", "B", "x", 2), link("B", "C", "x", 3)]
        );
    }

    #[test]
    fn different_tags_prune_independently() {
        let candidates = vec![
            link("A", "B", "x", 2),
            link("A", "C", "y", 5),
            link("A", "D", "x", 7),
        ];
        let surviving = prune(candidates);
        // A->D loses to A->B on tag x; A->C is the only y link.
        assert_eq!(
            surviving,
            vec![link("A", "B", "x", 2), link("A", "C", "y", 5)]
        );
    }

    #[test]
    fn equal_durations_both_survive() {
        let candidates = vec![link("A", "B", "x", 4), link("A", "C", "x", 4)];
        assert_eq!(prune(candidates.clone()), candidates);
    }

    #[test]
    fn sole_candidate_survives() {
        let candidates = vec![link("A", "B", "x", 9)];
        assert_eq!(prune(candidates.clone()), candidates);
    }

    #[test]
    fn no_surviving_pair_is_dominated() {
        let candidates = vec![
            link("A", "B", "x", 1),
            link("A", "C", "x", 2),
            link("A", "D", "y", 8),
            link("A", "E", "y", 3),
            link("B", "C", "x", 1),
        ];
        let surviving = prune(candidates);
        for l in &surviving {
            assert!(
                !surviving.iter().any(|o| o.source == l.source
                    && o.tag == l.tag
                    && o.duration < l.duration),
                "{} -> {} ({}) is dominated",
                l.source,
                l.target,
                l.tag
            );
        }
    }
}

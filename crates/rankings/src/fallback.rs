use crate::models::{RankingKind, RankingRecord, Subject};
use crate::rank::rank_records;

pub const FALLBACK_SIZE: usize = 10;
const FALLBACK_STEP: u64 = 1_000;

/// Synthetic ranking served while the backend is unavailable: ten rows with
/// metrics 10000, 9000, ..., 1000.
pub fn synthetic_ranking(kind: RankingKind, now: &str) -> Vec<RankingRecord> {
    let records = (1..=FALLBACK_SIZE)
        .map(|n| {
            let metric = (FALLBACK_SIZE + 1 - n) as u64 * FALLBACK_STEP;
            RankingRecord {
                kind,
                id: format!("fallback-{}-{}", kind, n),
                subject: Subject {
                    id: format!("sample-{}-{}", kind, n),
                    display_name: format!("Sample {} {}", kind.label(), n),
                    image: String::new(),
                    views: metric,
                },
                metric,
                rank: 0,
                created_at: now.to_string(),
                updated_at: now.to_string(),
            }
        })
        .collect();

    rank_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shape() {
        for kind in RankingKind::ALL {
            let records = synthetic_ranking(kind, "2024-01-01T00:00:00Z");
            let metrics: Vec<u64> = records.iter().map(|r| r.metric).collect();
            let ranks: Vec<usize> = records.iter().map(|r| r.rank).collect();

            assert_eq!(
                metrics,
                vec![10000, 9000, 8000, 7000, 6000, 5000, 4000, 3000, 2000, 1000]
            );
            assert_eq!(ranks, (1..=10).collect::<Vec<_>>());
            assert!(records.iter().all(|r| r.kind == kind));
        }
    }
}

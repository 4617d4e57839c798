use crate::models::RankingRecord;

/// Orders records by metric, highest first, and numbers them from 1.
///
/// The sort is stable, so equal metrics keep their backend order. Any rank
/// already on a record is overwritten.
pub fn rank_records(mut records: Vec<RankingRecord>) -> Vec<RankingRecord> {
    records.sort_by(|a, b| b.metric.cmp(&a.metric));
    for (index, record) in records.iter_mut().enumerate() {
        record.rank = index + 1;
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_record;
    use crate::models::RankingKind;
    use serde_json::json;

    fn records(rows: &[(&str, u64)]) -> Vec<RankingRecord> {
        rows.iter()
            .enumerate()
            .map(|(i, (title, views))| {
                let raw = json!({"_id": title, "viewTotal": views, "idNovel": {"title": title}});
                format_record(RankingKind::Novel, &raw, i, "2024-01-01T00:00:00Z")
            })
            .collect()
    }

    #[test]
    fn test_two_novels_scenario() {
        let ranked = rank_records(records(&[("A", 500), ("B", 1200)]));

        assert_eq!(ranked[0].subject.display_name, "B");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].metric, 1200);
        assert_eq!(ranked[1].subject.display_name, "A");
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[1].metric, 500);
    }

    #[test]
    fn test_ranks_are_contiguous_and_metrics_descending() {
        let ranked = rank_records(records(&[
            ("a", 3), ("b", 90), ("c", 0), ("d", 41), ("e", 90), ("f", 7),
        ]));

        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
        assert!(ranked.windows(2).all(|pair| pair[0].metric >= pair[1].metric));
    }

    #[test]
    fn test_ties_keep_backend_order() {
        let ranked = rank_records(records(&[("first", 10), ("second", 10), ("third", 10)]));
        let order: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_upstream_rank_is_ignored() {
        let mut input = records(&[("x", 1), ("y", 2)]);
        input[0].rank = 99;
        input[1].rank = 42;
        let ranked = rank_records(input);
        assert_eq!((ranked[0].id.as_str(), ranked[0].rank), ("y", 1));
        assert_eq!((ranked[1].id.as_str(), ranked[1].rank), ("x", 2));
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_records(Vec::new()).is_empty());
    }
}

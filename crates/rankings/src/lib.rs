pub mod fallback;
pub mod format;
pub mod models;
pub mod normalize;
pub mod rank;

use std::sync::Arc;

use common::{now_iso8601, BackendResult, FailurePolicy, JsonSource};
use tracing::{info, warn};

pub use models::{RankingKind, RankingRecord, Subject, UnknownKind};

/// Where a served ranking came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Upstream,
    Fallback,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Upstream => "upstream",
            Provenance::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ranking {
    pub kind: RankingKind,
    pub records: Vec<RankingRecord>,
    pub provenance: Provenance,
}

/// Fetches, normalizes, formats and ranks backend rankings.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Clone)]
pub struct RankingService {
    source: Arc<dyn JsonSource>,
    policy: FailurePolicy,
}

impl RankingService {
    pub fn new(source: Arc<dyn JsonSource>, policy: FailurePolicy) -> Self {
        Self { source, policy }
    }

    pub async fn ranking(&self, kind: RankingKind, token: Option<&str>) -> BackendResult<Ranking> {
        let raw = match self.source.get_json(&kind.upstream_path(), token).await {
            Ok(raw) => raw,
            Err(e) if e.is_outage() && self.policy == FailurePolicy::Fallback => {
                warn!(
                    "{} ranking unavailable from {} ({}); serving fallback data",
                    kind,
                    self.source.name(),
                    e
                );
                return Ok(Ranking {
                    kind,
                    records: fallback::synthetic_ranking(kind, &now_iso8601()),
                    provenance: Provenance::Fallback,
                });
            }
            Err(e) => return Err(e),
        };

        let items = normalize::extract_records(raw).map_err(|e| {
            warn!("{} ranking payload rejected: {}", kind, e);
            e
        })?;

        let now = now_iso8601();
        let records: Vec<RankingRecord> = items
            .iter()
            .enumerate()
            .map(|(position, item)| format::format_record(kind, item, position, &now))
            .collect();
        let records = rank::rank_records(records);

        info!("Ranked {} {} records", records.len(), kind);
        Ok(Ranking {
            kind,
            records,
            provenance: Provenance::Upstream,
        })
    }
}

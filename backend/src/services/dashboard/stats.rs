//! `GET /api/dashboard/stats`: record counts of every counted collection.
//!
//! Each collection is listed concurrently under its own deadline. A
//! collection that fails or times out counts as zero so one broken endpoint
//! never blanks the whole dashboard.

use std::time::Duration;

use actix_web::{web, HttpResponse};
use common::model::dashboard::DashboardStats;
use common::model::resource::Resource;
use futures_util::future::join_all;
use log::warn;
use serde_json::Value;

use crate::state::AppState;
use crate::upstream::UpstreamClient;

pub async fn process(state: web::Data<AppState>) -> HttpResponse {
    let stats = collect_stats(&state.upstream, state.config.stats_timeout).await;
    HttpResponse::Ok().json(stats)
}

pub async fn collect_stats(upstream: &UpstreamClient, deadline: Duration) -> DashboardStats {
    let counts = join_all(
        DashboardStats::COUNTED
            .iter()
            .map(|resource| count_resource(upstream, *resource, deadline)),
    )
    .await;

    let mut stats = DashboardStats::default();
    for (resource, count) in DashboardStats::COUNTED.iter().zip(counts) {
        stats.record(*resource, count);
    }
    stats
}

async fn count_resource(upstream: &UpstreamClient, resource: Resource, deadline: Duration) -> usize {
    match tokio::time::timeout(deadline, upstream.get_value(resource.path())).await {
        Ok(Ok(body)) => count_records(&body),
        Ok(Err(err)) => {
            warn!("Counting {} failed, showing zero: {}", resource, err);
            0
        }
        Err(_) => {
            warn!("Counting {} timed out, showing zero", resource);
            0
        }
    }
}

/// Plain arrays are counted directly; paginated envelopes report `total` or
/// carry their rows under `data`.
fn count_records(body: &Value) -> usize {
    match body {
        Value::Array(items) => items.len(),
        Value::Object(map) => map
            .get("total")
            .and_then(Value::as_u64)
            .map(|total| total as usize)
            .or_else(|| map.get("data").and_then(Value::as_array).map(Vec::len))
            .unwrap_or(0),
        _ => 0,
    }
}

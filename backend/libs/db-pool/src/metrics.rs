//! Pool gauges exported on `/metrics`

use prometheus::{register_int_gauge_vec, IntGaugeVec};
use sqlx::PgPool;

lazy_static::lazy_static! {
    static ref POOL_CONNECTIONS: IntGaugeVec = register_int_gauge_vec!(
        "db_pool_connections",
        "Connections held by the pool, by state",
        &["service", "state"]
    ).expect("Prometheus metrics registration should succeed at startup");
}

/// Point-in-time view of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PoolSnapshot {
    pub idle: i64,
    pub in_use: i64,
    pub max: i64,
}

impl PoolSnapshot {
    pub(crate) fn of(pool: &PgPool) -> Self {
        let size = i64::from(pool.size());
        let idle = pool.num_idle() as i64;
        Self {
            idle,
            in_use: (size - idle).max(0),
            max: i64::from(pool.options().get_max_connections()),
        }
    }

    fn states(&self) -> [(&'static str, i64); 3] {
        [("idle", self.idle), ("active", self.in_use), ("max", self.max)]
    }
}

pub(crate) fn update_pool_metrics(pool: &PgPool, service: &str) {
    for (state, value) in PoolSnapshot::of(pool).states() {
        POOL_CONNECTIONS
            .with_label_values(&[service, state])
            .set(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_cover_every_label() {
        let snapshot = PoolSnapshot {
            idle: 3,
            in_use: 2,
            max: 10,
        };
        let labels: Vec<&str> = snapshot.states().iter().map(|(s, _)| *s).collect();
        assert_eq!(labels, vec!["idle", "active", "max"]);
    }
}

//! Prometheus metrics for mun-service.
//!
//! Request counters and latency come from `actix_middleware::MetricsMiddleware`;
//! these collectors track domain activity.

use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

lazy_static! {
    pub static ref LOGIN_ATTEMPTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "mun_login_attempts_total",
        "Login attempts by outcome",
        &["outcome"]
    )
    .expect("Prometheus metrics registration should succeed at startup");

    pub static ref MESSAGES_SENT_TOTAL: IntCounterVec = register_int_counter_vec!(
        "mun_messages_sent_total",
        "Direct messages sent by sender role",
        &["sender_role"]
    )
    .expect("Prometheus metrics registration should succeed at startup");

    pub static ref RESOS_SAVED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "mun_resos_saved_total",
        "Resolutions created or updated",
        &["action"]
    )
    .expect("Prometheus metrics registration should succeed at startup");

    pub static ref SPEECHES_SAVED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "mun_speeches_saved_total",
        "Speeches created or updated",
        &["action"]
    )
    .expect("Prometheus metrics registration should succeed at startup");
}

#![doc(test(attr(deny(warnings))))]

//! iexpense keeps an ordered, observable list of expenses for one session and
//! stores a small user settings object in a persistent key-value area.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod settings;
pub mod store;
pub mod utils;

pub use domain::{ExpenseRecord, User};
pub use errors::{ExpenseError, Result};
pub use store::{ExpenseStore, StoreEvent, SubscriptionId};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("iexpense tracing initialized.");
    });
}

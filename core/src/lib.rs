//! arbolito-core — the progression engine behind the Arbolito savings app.
//!
//! One engine instance tracks one user session: a personal goal captured at
//! onboarding, deposits that accrue points, a daily mission slate, and a
//! fixed ladder of rank tiers with rewards. Every business rule lives here;
//! presentation layers call the entry points on [`engine::SavingsEngine`],
//! render the [`display::DisplayState`] it derives, and react to the
//! [`event::ProgressEvent`]s each action returns.

pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod event;
pub mod mission_board;
pub mod progression;
pub mod rank_table;
pub mod types;

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod cancellation;
mod clock;
mod confirmation;
mod engine;
mod error;
mod lottery;
mod points;
mod recalc;
mod store;
mod submission;

#[cfg(test)]
mod tests;

pub use cancellation::CancellationOutcome;
pub use clock::{Clock, SystemClock};
pub use engine::{LeaveEngine, MonthlySummary};
pub use error::EngineError;
pub use store::{LeaveStore, NewApplication, StoreError};

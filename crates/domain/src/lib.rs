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

mod draw;
mod error;
mod fiscal;
mod points;
mod priority;
mod settings;
mod status;
mod types;
mod window;

pub use draw::{DrawCandidate, DrawPosition, rank_candidates};
pub use error::DomainError;
pub use fiscal::FiscalYear;
pub use points::{
    LevelPoints, Points, PointsAvailability, PointsSummary, availability, consumed_points,
    personal_budget,
};
pub use priority::{arrival_priority, is_dense, renumber};
pub use settings::LotterySettings;
pub use status::{
    ApplicationStatus, CalendarStatus, CancellationPath, CancellationRequestStatus,
    cancellation_path,
};
pub use types::{
    Application, ApplicationId, CalendarDay, CancellationRequest, CancellationRequestId, Level,
    Period, StaffId,
};
pub use window::{LotteryPeriodInfo, LotteryWindow, WindowPosition, current_period_info, lottery_window};

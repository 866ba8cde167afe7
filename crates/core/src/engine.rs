// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The engine aggregate and its window queries.
//!
//! `LeaveEngine` owns the three injected capabilities every operation
//! needs: the typed store, the random source for draws, and the clock for
//! window-position decisions. Operation implementations live in sibling
//! modules (`submission`, `lottery`, `confirmation`, `cancellation`,
//! `recalc`, `points`), each contributing an `impl` block.

use crate::clock::Clock;
use crate::error::EngineError;
use crate::store::LeaveStore;
use leave_draw_domain::{
    LotteryPeriodInfo, LotterySettings, LotteryWindow, current_period_info, lottery_window,
};
use rand::Rng;
use time::Date;

/// The leave slot allocation and cancellation engine.
///
/// Holds the store, the random source, the clock, and the immutable
/// organization-wide settings. Settings are captured at construction;
/// every decision made through one engine instance sees one consistent
/// configuration.
#[derive(Debug)]
pub struct LeaveEngine<S, R, C> {
    pub(crate) store: S,
    pub(crate) rng: R,
    pub(crate) clock: C,
    pub(crate) settings: LotterySettings,
}

/// Outcome counts for a month-scoped batch operation.
///
/// Batches isolate per-date failures: one bad date is logged and counted
/// without aborting the rest of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthlySummary {
    /// Dates processed successfully.
    pub processed: u32,
    /// Dates that failed and were skipped.
    pub failed: u32,
}

impl<S: LeaveStore, R: Rng, C: Clock> LeaveEngine<S, R, C> {
    /// Creates an engine over the given store, random source, clock, and
    /// settings.
    pub const fn new(store: S, rng: R, clock: C, settings: LotterySettings) -> Self {
        Self {
            store,
            rng,
            clock,
            settings,
        }
    }

    /// The settings this engine was constructed with.
    #[must_use]
    pub const fn settings(&self) -> &LotterySettings {
        &self.settings
    }

    /// Mutable access to the underlying store.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the engine and returns the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Computes the lottery window for a vacation date.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the window month falls outside the
    /// supported calendar range.
    pub fn window_for(&self, vacation_date: Date) -> Result<LotteryWindow, EngineError> {
        Ok(lottery_window(&self.settings, vacation_date)?)
    }

    /// Returns true if today falls inside the given vacation date's
    /// lottery window.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the window cannot be computed.
    pub fn is_within_lottery_period(&self, vacation_date: Date) -> Result<bool, EngineError> {
        Ok(self.window_for(vacation_date)?.contains(self.clock.today()))
    }

    /// Returns true if today is before the given vacation date's lottery
    /// window opens.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the window cannot be computed.
    pub fn is_before_lottery_period(&self, vacation_date: Date) -> Result<bool, EngineError> {
        Ok(self.clock.today() < self.window_for(vacation_date)?.opens)
    }

    /// Describes the lottery period active around today: the window bounds
    /// in the current month, whether it is open, and which vacation month
    /// it serves.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the target month falls outside the
    /// supported calendar range.
    pub fn current_lottery_period_info(&self) -> Result<LotteryPeriodInfo, EngineError> {
        Ok(current_period_info(&self.settings, self.clock.today())?)
    }
}

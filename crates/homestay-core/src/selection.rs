//! # Calendar Selection State Machine
//!
//! The two-click check-in/check-out selection, as an explicit value
//! type. The UI renders the current state and forwards click events;
//! all transition logic lives here where it can be tested.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Two-Click Selection                                   │
//! │                                                                         │
//! │              click D (selectable)                                       │
//! │   Idle ──────────────────────────► CheckInChosen(D)                    │
//! │                                         │                               │
//! │            click D' > D, clear between  │  click D' <= D, or           │
//! │            ┌────────────────────────────┤  blocked night between       │
//! │            ▼                            ▼                               │
//! │   RangeComplete(D, D')          CheckInChosen(D')  (restart)           │
//! │            │                                                            │
//! │            │ any further click D''                                      │
//! │            └──────────────────► CheckInChosen(D'')  (restart)          │
//! │                                                                         │
//! │   Clicks on unselectable dates (past or blocked) never change          │
//! │   state. Reaching RangeComplete emits the completed range once.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::availability::is_selectable;
use crate::types::DateRange;

/// Current state of the calendar's date selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DateSelection {
    /// Nothing selected yet.
    Idle,
    /// Check-in picked, waiting for check-out.
    CheckInChosen {
        #[ts(as = "String")]
        check_in: NaiveDate,
    },
    /// Both endpoints picked; the range has been emitted.
    RangeComplete {
        #[ts(as = "String")]
        check_in: NaiveDate,
        #[ts(as = "String")]
        check_out: NaiveDate,
    },
}

impl DateSelection {
    /// Fresh selection with nothing chosen.
    pub fn new() -> Self {
        DateSelection::Idle
    }

    /// Applies a click on `date` and returns the next state, plus the
    /// completed range when this click closes one.
    ///
    /// Deterministic and side-effect free: the only output other than
    /// the next state is the single range emission on reaching
    /// [`DateSelection::RangeComplete`].
    pub fn click(
        self,
        date: NaiveDate,
        blocked: &BTreeSet<NaiveDate>,
        today: NaiveDate,
    ) -> (Self, Option<DateRange>) {
        if !is_selectable(date, blocked, today) {
            return (self, None);
        }

        match self {
            DateSelection::Idle | DateSelection::RangeComplete { .. } => {
                (DateSelection::CheckInChosen { check_in: date }, None)
            }
            DateSelection::CheckInChosen { check_in } => {
                if date <= check_in {
                    // Earlier (or same) click restarts the selection.
                    return (DateSelection::CheckInChosen { check_in: date }, None);
                }

                match DateRange::new(check_in, date) {
                    Ok(range) if range.nights_iter().all(|d| !blocked.contains(&d)) => (
                        DateSelection::RangeComplete {
                            check_in,
                            check_out: date,
                        },
                        Some(range),
                    ),
                    // A blocked night sits between the clicks: the stay
                    // cannot span it, so treat the click as a new check-in.
                    _ => (DateSelection::CheckInChosen { check_in: date }, None),
                }
            }
        }
    }

    /// The chosen check-in date, if any.
    pub fn check_in(&self) -> Option<NaiveDate> {
        match self {
            DateSelection::Idle => None,
            DateSelection::CheckInChosen { check_in }
            | DateSelection::RangeComplete { check_in, .. } => Some(*check_in),
        }
    }

    /// The chosen check-out date, if the selection is complete.
    pub fn check_out(&self) -> Option<NaiveDate> {
        match self {
            DateSelection::RangeComplete { check_out, .. } => Some(*check_out),
            _ => None,
        }
    }
}

impl Default for DateSelection {
    fn default() -> Self {
        DateSelection::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

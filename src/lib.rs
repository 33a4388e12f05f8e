//! # Duty Rotation Core Library
//!
//! This library provides the data structures behind the ambulance dispatcher: a
//! fixed-capacity circular queue of duty units, the 8-hour shift slots derived
//! from it, and the CSV file that persists the rotation between runs.
//!
//! ## Design Philosophy
//!
//! ### Fixed Capacity
//! - **Ring buffer**: The rotation lives in a `[Option<DutyUnit>; 10]` array with
//!   explicit `front`/`count` indices. It never reallocates; ten ambulances is a
//!   hard limit of the dispatch floor, not a tuning knob.
//! - **Owned state**: ID counters and the rotation start time are fields of one
//!   [`scheduler::DutyRotationScheduler`], so independent instances never interfere.
//!
//! ### Temporal Model
//! - **Unix seconds**: The rotation start is an `i64` timestamp anchored at local
//!   midnight of the day the first unit was registered
//! - **Positional slots**: Unit at offset `i` covers
//!   `[start + i * 8h, start + (i + 1) * 8h)`; slots are recomputed on demand and
//!   never stored
//! - **Local labels**: Slots render as `YYYY-MM-DD HH:MM` in local time, or `N/A`
//!   when the platform cannot convert a timestamp
//!
//! ### Data Flow
//! 1. **Register**: operator name in → `A01`, `A02`, ... out
//! 2. **Rotate**: on-duty unit moves to the back, start advances one block
//! 3. **Persist/Reload**: CSV rows in rotation order ↔ scheduler state
//!
//! ## Core Types
//!
//! - [`DutyUnit`]: an ambulance and its driver
//! - [`ScheduleRow`]: one derived line of the duty schedule
//! - [`DutyStatus`]: whether a row's unit is currently on duty

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod clock;
pub mod config;
pub mod renderer;
pub mod scheduler;
pub mod storage;

/// An ambulance taking part in the duty rotation.
///
/// An empty `id` asks the scheduler to mint one at registration time. A
/// non-empty `id` is kept verbatim, which is how rotated and reloaded units
/// keep their identity.
///
/// # Example
/// ```
/// use duty_rotation_lib::DutyUnit;
///
/// let fresh = DutyUnit::new("Jane Doe");
/// assert!(fresh.id.is_empty());
///
/// let known = DutyUnit::with_id("A07", "John Roe");
/// assert_eq!(known.id, "A07");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyUnit {
    /// `A` followed by a zero-padded sequence number, e.g. `A01`
    pub id: String,
    /// Driver on the ambulance; must be non-empty
    pub operator_name: String,
}

impl DutyUnit {
    /// A unit awaiting an ID from the scheduler.
    pub fn new(operator_name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            operator_name: operator_name.into(),
        }
    }

    /// A unit that already carries its ID.
    pub fn with_id(id: impl Into<String>, operator_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            operator_name: operator_name.into(),
        }
    }
}

/// Duty state of a unit within the current rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DutyStatus {
    #[serde(rename = "In Duty")]
    OnDuty,
    #[serde(rename = "Not in Duty")]
    Standby,
}

impl DutyStatus {
    /// Label written to the schedule table and CSV file.
    pub fn label(self) -> &'static str {
        match self {
            DutyStatus::OnDuty => "In Duty",
            DutyStatus::Standby => "Not in Duty",
        }
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the duty schedule, in rotation order.
///
/// `start` and `end` are already-rendered local time labels; either may be
/// `N/A` if the timestamp could not be converted.
///
/// # Example
/// ```
/// use duty_rotation_lib::{DutyStatus, ScheduleRow};
///
/// let row = ScheduleRow {
///     position: 1,
///     id: "A01".to_string(),
///     operator_name: "Jane Doe".to_string(),
///     duty_status: DutyStatus::OnDuty,
///     start: "2024-01-01 00:00".to_string(),
///     end: "2024-01-01 08:00".to_string(),
/// };
///
/// assert_eq!(row.duty_status.to_string(), "In Duty");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based position; 1 is the unit on duty
    pub position: usize,
    pub id: String,
    pub operator_name: String,
    pub duty_status: DutyStatus,
    pub start: String,
    pub end: String,
}

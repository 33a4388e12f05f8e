//! # Duty Rotation Scheduler
//!
//! A fixed-capacity circular queue of ambulances. The unit at the front is on
//! duty; rotating moves it to the back and advances the rotation start by one
//! duty block, so every unit's slot is always derivable from its offset:
//!
//! ```text
//! offset 0: [start,       start + 8h)   In Duty
//! offset 1: [start + 8h,  start + 16h)  Not in Duty
//! offset i: [start + 8ih, start + 8(i+1)h)
//! ```
//!
//! ## Operations
//! Each operation has a typed form returning `Result` and a sentinel form
//! matching the dispatcher's contract:
//!
//! | Typed            | Sentinel   | Failure signal          |
//! |------------------|------------|-------------------------|
//! | `try_register`   | `register` | empty string            |
//! | `try_rotate`     | `rotate`   | `false`                 |
//! | `save`           | `persist`  | `false`                 |
//! | `load`           | `reload`   | `false`                 |
//!
//! The sentinel forms log the swallowed error to stderr.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::clock::{self, DUTY_BLOCK_SECS};
use crate::config::DisplayConfig;
use crate::storage::{self, LoadedRotation, StorageError, StorageResult};
use crate::{renderer, DutyStatus, DutyUnit, ScheduleRow};

/// Number of ambulances the rotation can hold
pub const MAX_UNITS: usize = 10;

/// Reasons a rotation change was refused.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RotationError {
    /// All slots are taken
    #[error("rotation is full ({} units)", MAX_UNITS)]
    QueueFull,

    /// Rotating needs a unit to hand over to
    #[error("need at least two units to rotate, have {0}")]
    RotationTooSmall(usize),

    /// The ID counter cannot advance past its last value
    #[error("no unit IDs left to assign")]
    IdsExhausted,
}

/// Format a sequence number as a unit ID: `1` → `A01`.
pub fn format_unit_id(sequence: u64) -> String {
    format!("A{:02}", sequence)
}

/// Circular duty rotation of up to [`MAX_UNITS`] ambulances.
///
/// Live units occupy `slots[(front + i) % MAX_UNITS]` for `i in 0..count`;
/// every other slot is `None`.
///
/// # Example
/// ```
/// use duty_rotation_lib::{scheduler::DutyRotationScheduler, DutyUnit};
///
/// let mut scheduler = DutyRotationScheduler::new();
/// assert_eq!(scheduler.register(DutyUnit::new("Alice")), "A01");
/// assert_eq!(scheduler.register(DutyUnit::new("Bob")), "A02");
///
/// assert!(scheduler.rotate());
/// let order: Vec<_> = scheduler.units().map(|u| u.id.as_str()).collect();
/// assert_eq!(order, ["A02", "A01"]);
/// ```
#[derive(Clone, Debug)]
pub struct DutyRotationScheduler {
    slots: [Option<DutyUnit>; MAX_UNITS],
    front: usize,
    count: usize,
    rotation_start: i64,
    next_sequence: u64,
}

impl Default for DutyRotationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl DutyRotationScheduler {
    /// Empty rotation starting today at local midnight.
    pub fn new() -> Self {
        Self::starting_at(clock::today_at_midnight())
    }

    fn starting_at(rotation_start: i64) -> Self {
        Self {
            slots: Default::default(),
            front: 0,
            count: 0,
            rotation_start,
            next_sequence: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == MAX_UNITS
    }

    /// Start of the on-duty unit's block, in Unix seconds.
    pub fn rotation_start(&self) -> i64 {
        self.rotation_start
    }

    /// Sequence number the next minted ID will use.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// The unit currently on duty.
    pub fn on_duty(&self) -> Option<&DutyUnit> {
        self.units().next()
    }

    /// Live units in rotation order, starting with the one on duty.
    pub fn units(&self) -> impl Iterator<Item = &DutyUnit> + '_ {
        (0..self.count).filter_map(move |offset| self.slots[self.slot_index(offset)].as_ref())
    }

    fn slot_index(&self, offset: usize) -> usize {
        (self.front + offset) % MAX_UNITS
    }

    /// Add a unit at the back of the rotation and return its ID.
    ///
    /// A unit with an empty ID is given the next `A##` identifier; a unit that
    /// already has one keeps it without consuming a sequence number.
    pub fn try_register(&mut self, mut unit: DutyUnit) -> Result<String, RotationError> {
        if self.is_full() {
            return Err(RotationError::QueueFull);
        }

        if unit.id.is_empty() {
            let following = self
                .next_sequence
                .checked_add(1)
                .ok_or(RotationError::IdsExhausted)?;
            unit.id = format_unit_id(self.next_sequence);
            self.next_sequence = following;
        }
        let id = unit.id.clone();

        let index = self.slot_index(self.count);
        self.slots[index] = Some(unit);
        self.count += 1;
        if self.count == 1 {
            self.rotation_start = clock::today_at_midnight();
        }

        Ok(id)
    }

    /// Add a unit, returning an empty string when the rotation is full or
    /// no ID can be minted.
    pub fn register(&mut self, unit: DutyUnit) -> String {
        self.try_register(unit).unwrap_or_else(|e| {
            eprintln!("Registration refused: {}", e);
            String::new()
        })
    }

    fn dequeue(&mut self) -> Option<DutyUnit> {
        if self.is_empty() {
            return None;
        }
        let unit = self.slots[self.front].take();
        self.front = (self.front + 1) % MAX_UNITS;
        self.count -= 1;
        unit
    }

    /// Hand the duty over to the next unit.
    ///
    /// The unit coming off duty is re-queued at the back with its ID intact
    /// and the rotation start moves forward one duty block.
    pub fn try_rotate(&mut self) -> Result<(), RotationError> {
        if self.count <= 1 {
            return Err(RotationError::RotationTooSmall(self.count));
        }
        let Some(completed) = self.dequeue() else {
            return Err(RotationError::RotationTooSmall(self.count));
        };
        self.try_register(completed)?;
        self.rotation_start += DUTY_BLOCK_SECS;
        Ok(())
    }

    /// Rotate, returning `false` when fewer than two units are registered.
    pub fn rotate(&mut self) -> bool {
        match self.try_rotate() {
            Ok(()) => true,
            Err(e) => {
                eprintln!("Rotation refused: {}", e);
                false
            }
        }
    }

    /// Derive the schedule rows for every live unit.
    pub fn schedule(&self) -> Vec<ScheduleRow> {
        self.units()
            .enumerate()
            .map(|(offset, unit)| {
                let start = self.rotation_start + offset as i64 * DUTY_BLOCK_SECS;
                let (start, end) = clock::slot_labels(start);
                ScheduleRow {
                    position: offset + 1,
                    id: unit.id.clone(),
                    operator_name: unit.operator_name.clone(),
                    duty_status: if offset == 0 {
                        DutyStatus::OnDuty
                    } else {
                        DutyStatus::Standby
                    },
                    start,
                    end,
                }
            })
            .collect()
    }

    /// Write the schedule table to `out`.
    pub fn display_schedule<W: io::Write>(
        &self,
        display: &DisplayConfig,
        out: &mut W,
    ) -> io::Result<()> {
        renderer::draw_ascii(&self.schedule(), display, out)
    }

    /// Write the schedule to `path`.
    pub fn save(&self, path: &Path) -> StorageResult<()> {
        storage::write_schedule(path, &self.schedule())
    }

    /// Write the schedule, returning `false` when the file cannot be written.
    pub fn persist(&self, path: &Path) -> bool {
        match self.save(path) {
            Ok(()) => true,
            Err(e) => {
                eprintln!("Failed to save schedule to {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Replace the rotation with the contents of `path`.
    ///
    /// A file that cannot be opened is recreated with only the header and the
    /// rotation is reset; an empty file also resets it. Rows are validated by
    /// [`storage::read_rotation`]. On error the current rotation is kept.
    pub fn load(&mut self, path: &Path) -> StorageResult<()> {
        match storage::read_rotation(path) {
            Ok(Some(loaded)) => self.replace_with(loaded),
            Ok(None) => self.reset(),
            Err(StorageError::Io(e)) => {
                eprintln!(
                    "Info: Cannot open schedule {} ({}), starting a new one",
                    path.display(),
                    e
                );
                storage::create_empty(path)?;
                self.reset();
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Reload from `path`, returning `false` only when it cannot be read or created.
    pub fn reload(&mut self, path: &Path) -> bool {
        match self.load(path) {
            Ok(()) => true,
            Err(e) => {
                eprintln!("Failed to load schedule from {}: {}", path.display(), e);
                false
            }
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn replace_with(&mut self, loaded: LoadedRotation) {
        let start = loaded
            .rotation_start
            .unwrap_or_else(clock::today_at_midnight);
        let mut fresh = Self::starting_at(start);
        fresh.next_sequence = loaded.next_sequence();
        for (slot, unit) in fresh.slots.iter_mut().zip(loaded.units) {
            *slot = Some(unit);
            fresh.count += 1;
        }
        *self = fresh;
    }
}

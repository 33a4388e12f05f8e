//! # Schedule File Storage
//!
//! Reads and writes the rotation as a flat CSV file:
//!
//! ```text
//! Position,Ambulance ID,Driver,Duty Status,Start Time,End Time
//! 1,A01,Jane Doe,In Duty,2024-01-01 00:00,2024-01-01 08:00
//! 2,A02,John Roe,Not in Duty,2024-01-01 08:00,2024-01-01 16:00
//! ```
//!
//! ## Format Rules
//! - Comma delimiter with no quoting or escaping. Only the first five commas
//!   separate columns; anything after them belongs to the end label, so a
//!   trailing comma is harmless. A comma inside a driver name shifts the
//!   columns and the name is cut at the comma on reload.
//! - Rows with fewer than six fields are dropped.
//! - Rows are written in rotation order, starting with the unit on duty.
//! - Only the first surviving row's start label is read back; every other slot
//!   is recomputed positionally by the scheduler.
//!
//! ## Error Handling
//! Open failures surface as [`StorageError`]. Malformed data rows never do:
//! they are skipped and loading continues.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use thiserror::Error;

use crate::scheduler::{format_unit_id, MAX_UNITS};
use crate::{clock, DutyUnit, ScheduleRow};

/// Column names of the schedule file
pub const HEADER: [&str; 6] = [
    "Position",
    "Ambulance ID",
    "Driver",
    "Duty Status",
    "Start Time",
    "End Time",
];

const ID_COLUMN: usize = 1;
const DRIVER_COLUMN: usize = 2;
const START_COLUMN: usize = 4;

/// Errors that can occur while reading or writing the schedule file.
#[derive(Error, Debug)]
pub enum StorageError {
    /// File could not be opened, created or flushed
    #[error("schedule file IO: {0}")]
    Io(#[from] io::Error),

    /// CSV layer failed while encoding or decoding a record
    #[error("schedule CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Rotation reconstructed from a schedule file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedRotation {
    /// Accepted units in file order, at most [`MAX_UNITS`]
    pub units: Vec<DutyUnit>,
    /// Start label of the first accepted row, if it parsed
    pub rotation_start: Option<i64>,
    /// Largest numeric ID assigned while loading; 0 when no rows survived
    pub highest_id: u64,
}

impl LoadedRotation {
    /// Sequence number the next freshly registered unit should receive.
    pub fn next_sequence(&self) -> u64 {
        self.highest_id + 1
    }
}

/// Write `rows` under the standard header, replacing any existing file.
pub fn write_schedule(path: &Path, rows: &[ScheduleRow]) -> StorageResult<()> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(file);

    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record([
            row.position.to_string().as_str(),
            row.id.as_str(),
            row.operator_name.as_str(),
            row.duty_status.label(),
            row.start.as_str(),
            row.end.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Create a header-only schedule file.
pub fn create_empty(path: &Path) -> StorageResult<()> {
    write_schedule(path, &[])
}

/// Read a schedule file.
///
/// Returns `Ok(None)` when the file holds no lines at all, and an error only
/// when the file cannot be opened or read.
pub fn read_rotation(path: &Path) -> StorageResult<Option<LoadedRotation>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(file);

    let mut records = reader.records();
    match records.next() {
        None => return Ok(None),
        Some(Err(e)) if e.is_io_error() => return Err(e.into()),
        // Header content is never inspected
        Some(_) => {}
    }

    let mut loaded = LoadedRotation::default();
    for record in records {
        if loaded.units.len() >= MAX_UNITS {
            break;
        }
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                eprintln!("Skipping unreadable schedule row: {}", e);
                continue;
            }
        };
        if let Some(unit) = accept_row(&record, &mut loaded) {
            loaded.units.push(unit);
        }
    }

    Ok(Some(loaded))
}

/// Validate one data row and fold it into `loaded`'s bookkeeping.
fn accept_row(record: &StringRecord, loaded: &mut LoadedRotation) -> Option<DutyUnit> {
    if record.len() < HEADER.len() {
        eprintln!(
            "Skipping schedule row with {} fields: {:?}",
            record.len(),
            record
        );
        return None;
    }

    let driver = record.get(DRIVER_COLUMN)?;
    if driver.is_empty() {
        eprintln!("Skipping schedule row without a driver: {:?}", record);
        return None;
    }

    // Parsed IDs fit in u32 and at most MAX_UNITS fallbacks follow, so the
    // u64 counter cannot overflow here
    let number = match parse_unit_number(record.get(ID_COLUMN)?) {
        Some(n) => u64::from(n),
        None => loaded.highest_id + 1,
    };
    loaded.highest_id = loaded.highest_id.max(number);

    if loaded.units.is_empty() {
        loaded.rotation_start = record.get(START_COLUMN).and_then(clock::parse_label);
    }

    Some(DutyUnit::with_id(format_unit_id(number), driver))
}

/// Numeric part of an `A##` identifier; `None` unless it is a positive number.
pub fn parse_unit_number(id: &str) -> Option<u32> {
    let digits = id.strip_prefix('A')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

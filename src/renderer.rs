//! # Schedule Rendering
//!
//! Formats the derived schedule rows as the dispatcher's fixed-width text table.
//! Rendering produces a `String` so the table can be checked in tests and
//! printed by the menu unchanged.

use std::fmt::Write as _;
use std::io;

use crate::clock::DUTY_HOURS;
use crate::config::DisplayConfig;
use crate::ScheduleRow;

const POSITION_WIDTH: usize = 10;
const ID_WIDTH: usize = 15;
const STATUS_WIDTH: usize = 16;
const TIME_WIDTH: usize = 20;

/// Notice shown instead of a table when nobody is registered
pub const EMPTY_NOTICE: &str = "No ambulances registered yet.";

/// Render the schedule: duty summary lines followed by the table.
pub fn render_schedule(rows: &[ScheduleRow], display: &DisplayConfig) -> String {
    let mut out = String::new();

    let Some(on_duty) = rows.first() else {
        let _ = writeln!(out, "{EMPTY_NOTICE}");
        return out;
    };

    let _ = writeln!(
        out,
        "Current Ambulance Rotation (each shift: {} hours)",
        DUTY_HOURS
    );
    let _ = writeln!(
        out,
        "Current duty ambulance: Ambulance {} ({})",
        on_duty.id, on_duty.operator_name
    );
    match rows.get(1) {
        Some(next) => {
            let _ = writeln!(
                out,
                "Next duty ambulance: Ambulance {} ({})",
                next.id, next.operator_name
            );
        }
        None => {
            let _ = writeln!(
                out,
                "No standby ambulances. Only one ambulance in rotation."
            );
        }
    }

    let driver_width = display.driver_width;
    let _ = writeln!(
        out,
        "{:<pw$}{:<iw$}{:<dw$}{:<sw$}{:<tw$}{:<tw$}",
        "Position",
        "Ambulance ID",
        "Driver",
        "Duty Status",
        "Start Time",
        "End Time",
        pw = POSITION_WIDTH,
        iw = ID_WIDTH,
        dw = driver_width,
        sw = STATUS_WIDTH,
        tw = TIME_WIDTH,
    );
    let rule = POSITION_WIDTH + ID_WIDTH + driver_width + STATUS_WIDTH + 2 * TIME_WIDTH;
    let _ = writeln!(out, "{}", "-".repeat(rule));

    for row in rows {
        let _ = writeln!(
            out,
            "{:<pw$}{:<iw$}{:<dw$}{:<sw$}{:<tw$}{:<tw$}",
            row.position,
            row.id,
            row.operator_name,
            row.duty_status.label(),
            row.start,
            row.end,
            pw = POSITION_WIDTH,
            iw = ID_WIDTH,
            dw = driver_width,
            sw = STATUS_WIDTH,
            tw = TIME_WIDTH,
        );
    }

    out
}

/// Write the rendered schedule to `out`, preceded by a blank line.
pub fn draw_ascii<W: io::Write>(
    rows: &[ScheduleRow],
    display: &DisplayConfig,
    out: &mut W,
) -> io::Result<()> {
    write!(out, "\n{}", render_schedule(rows, display))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DutyStatus;

    fn row(position: usize, id: &str, driver: &str) -> ScheduleRow {
        ScheduleRow {
            position,
            id: id.to_string(),
            operator_name: driver.to_string(),
            duty_status: if position == 1 {
                DutyStatus::OnDuty
            } else {
                DutyStatus::Standby
            },
            start: "2024-01-01 00:00".to_string(),
            end: "2024-01-01 08:00".to_string(),
        }
    }

    #[test]
    fn test_empty_schedule_shows_notice() {
        let out = render_schedule(&[], &DisplayConfig::default());
        assert_eq!(out.trim(), EMPTY_NOTICE);
    }

    #[test]
    fn test_single_unit_has_no_standby() {
        let out = render_schedule(&[row(1, "A01", "Alice")], &DisplayConfig::default());
        assert!(out.contains("Current duty ambulance: Ambulance A01 (Alice)"));
        assert!(out.contains("No standby ambulances"));
        assert!(!out.contains("Next duty ambulance"));
    }

    #[test]
    fn test_table_layout() {
        let rows = [row(1, "A02", "Bob"), row(2, "A01", "Alice")];
        let out = render_schedule(&rows, &DisplayConfig::default());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[2], "Next duty ambulance: Ambulance A01 (Alice)");
        assert!(lines[3].starts_with("Position  Ambulance ID   Driver"));
        assert_eq!(lines[4], "-".repeat(101));
        assert!(lines[5].starts_with("1         A02            Bob                 In Duty"));
        assert!(lines[6].contains("Not in Duty"));
        assert_eq!(lines.len(), 7);
    }
}

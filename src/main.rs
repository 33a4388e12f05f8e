//! # Ambulance Dispatcher Entry Point
//!
//! This binary wires the duty rotation library to a numbered text menu. The
//! schedule file is reloaded on start and, with autosave on, rewritten after
//! every successful registration or rotation.
//!
//! ## Flags
//! - `--file <path>`: schedule file, overriding the config
//! - `--config <path>`: config file instead of `dispatcher-config.toml`
//! - `--show`: print the schedule table and exit
//! - `--json`: print the schedule rows as JSON and exit

// Test modules
#[cfg(test)]
mod tests;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use duty_rotation_lib::{
    config::Config, scheduler::DutyRotationScheduler, DutyUnit,
};

/// Command line options; anything unrecognised is an error.
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    schedule_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    show: bool,
    json: bool,
}

impl CliOptions {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut options = CliOptions::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" => {
                    let path = args.next().context("--file needs a path")?;
                    options.schedule_file = Some(PathBuf::from(path));
                }
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    options.config_file = Some(PathBuf::from(path));
                }
                "--show" => options.show = true,
                "--json" => options.json = true,
                other => bail!("unknown argument: {}", other),
            }
        }
        Ok(options)
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let options = CliOptions::parse(env::args().skip(1))?;

    let mut config = match &options.config_file {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    if let Some(file) = options.schedule_file {
        config.storage.schedule_file = file;
    }

    let mut scheduler = DutyRotationScheduler::new();
    if !scheduler.reload(&config.storage.schedule_file) {
        println!(
            "Warning: Unable to initialize schedule file '{}'.",
            config.storage.schedule_file.display()
        );
    }

    if options.json {
        let rows = serde_json::to_string_pretty(&scheduler.schedule())
            .context("serialize schedule")?;
        println!("{}", rows);
        return Ok(());
    }

    if options.show {
        scheduler.display_schedule(&config.display, &mut io::stdout().lock())?;
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_menu(&mut scheduler, &config, stdin.lock(), &mut stdout.lock())
}

/// Drive the dispatcher menu until the operator exits or input ends.
fn run_menu<R: BufRead, W: Write>(
    scheduler: &mut DutyRotationScheduler,
    config: &Config,
    mut input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    loop {
        print_menu(out)?;

        let Some(line) = read_line(&mut input)? else {
            writeln!(out, "\nExiting dispatcher module. Goodbye!")?;
            return Ok(());
        };

        let choice = match line.trim().parse::<u32>() {
            Ok(choice) => choice,
            Err(_) => {
                writeln!(out, "\nInvalid input. Please enter a number from 1 to 6.")?;
                continue;
            }
        };

        match choice {
            1 => {
                write!(out, "Enter driver name: ")?;
                out.flush()?;
                let name = read_line(&mut input)?.unwrap_or_default();
                let name = name.trim();
                if name.is_empty() {
                    writeln!(out, "\nDriver name cannot be empty.")?;
                    continue;
                }

                let assigned = scheduler.register(DutyUnit::new(name));
                if assigned.is_empty() {
                    writeln!(out, "\nUnable to register ambulance. Queue is full.")?;
                } else {
                    writeln!(out, "Assigned ambulance ID: {}", assigned)?;
                    writeln!(out, "\nAmbulance registered successfully.")?;
                    autosave(scheduler, config, out)?;
                }
            }
            2 => {
                if scheduler.rotate() {
                    writeln!(
                        out,
                        "\nShift rotation completed. Next ambulance is on duty."
                    )?;
                    autosave(scheduler, config, out)?;
                } else {
                    writeln!(out, "\nNeed at least two ambulances to rotate shifts.")?;
                }
            }
            3 => {
                scheduler.display_schedule(&config.display, out)?;
            }
            4 => {
                if scheduler.persist(&config.storage.schedule_file) {
                    writeln!(
                        out,
                        "\nSchedule saved to {}.",
                        config.storage.schedule_file.display()
                    )?;
                } else {
                    writeln!(out, "\nWarning: Failed to update schedule file.")?;
                }
            }
            5 => {
                if scheduler.reload(&config.storage.schedule_file) {
                    writeln!(
                        out,
                        "\nSchedule reloaded: {} ambulance(s) in rotation.",
                        scheduler.len()
                    )?;
                } else {
                    writeln!(
                        out,
                        "\nWarning: Unable to read schedule file '{}'.",
                        config.storage.schedule_file.display()
                    )?;
                }
            }
            6 => {
                writeln!(out, "\nExiting dispatcher module. Goodbye!")?;
                return Ok(());
            }
            _ => {
                writeln!(out, "\nUnknown option. Please choose between 1 and 6.")?;
            }
        }
    }
}

fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    write!(
        out,
        "\nAmbulance Dispatcher Menu\n\
         1. Register ambulance\n\
         2. Rotate ambulance shift\n\
         3. Display ambulance schedule\n\
         4. Save schedule\n\
         5. Reload schedule\n\
         6. Exit\n\
         Choose an option: "
    )?;
    out.flush()
}

/// Next input line without its terminator; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn autosave<W: Write>(
    scheduler: &DutyRotationScheduler,
    config: &Config,
    out: &mut W,
) -> io::Result<()> {
    if config.storage.autosave && !scheduler.persist(&config.storage.schedule_file) {
        writeln!(out, "Warning: Failed to update schedule file.")?;
    }
    Ok(())
}

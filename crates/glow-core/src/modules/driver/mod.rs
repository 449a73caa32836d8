use crate::domain::{GlowError, GlowResult, SimulationRequest};
use crate::modules::indices::{IndexProvider, IndexWindow};
use crate::modules::output::{DatasetAttrs, IonoDataset, parse_output};
use crate::modules::toolchain::GlowExecutable;
use hifitime::Epoch;
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Wall-clock budget for one simulation run.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Encode a timestamp the way the simulation expects it on stdin: the
/// concatenated year/day-of-year integer (`yyyyddd`) and whole seconds
/// since UTC midnight. Pure, no failure modes.
pub fn glow_date(time: Epoch) -> (String, String) {
    let (year, month, day, hour, minute, second, _) = time.to_gregorian_utc();
    let doy = day_of_year(year, month, day);
    let idate = format!("{year}{doy:03}");
    let utsec = u32::from(hour) * 3600 + u32::from(minute) * 60 + u32::from(second);
    (idate, utsec.to_string())
}

fn day_of_year(year: i32, month: u8, day: u8) -> u32 {
    const DAYS_BEFORE_MONTH: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
    let mut doy = DAYS_BEFORE_MONTH[usize::from(month - 1)] + u32::from(day);
    if month > 2 && is_leap_year(year) {
        doy += 1;
    }
    doy
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Assemble the single stdin line, 10 space-separated fields in fixed
/// order: idate, utsec, glat, glon, f107a, f107, lagged f107, ap,
/// energy flux, characteristic energy.
pub fn format_input_line(request: &SimulationRequest, window: &IndexWindow) -> String {
    let (idate, utsec) = glow_date(request.time);
    format!(
        "{} {} {} {} {} {} {} {} {} {}",
        idate,
        utsec,
        request.glat,
        request.glon,
        window.current.f107a,
        window.current.f107,
        window.lagged_f107(),
        window.current.ap,
        request.energy_flux,
        request.char_energy,
    )
}

/// Invoke the simulation executable once: write the input line to its
/// stdin, close it, and capture all stdout as text. The call blocks until
/// the child exits or the budget runs out; on expiry the child is killed
/// and the call fails. stderr is discarded.
pub fn run_glow(executable: &Path, input_line: &str, budget: Duration) -> GlowResult<String> {
    let mut child = Command::new(executable)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| process_failure(executable, format!("failed to spawn: {source}")))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| process_failure(executable, "stdin pipe unavailable".to_string()))?;
    stdin
        .write_all(input_line.as_bytes())
        .map_err(|source| process_failure(executable, format!("failed to write stdin: {source}")))?;
    drop(stdin);

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| process_failure(executable, "stdout pipe unavailable".to_string()))?;
    let reader = thread::spawn(move || {
        let mut buffer = String::new();
        stdout.read_to_string(&mut buffer).map(|_| buffer)
    });

    let status = wait_with_budget(&mut child, executable, budget)?;
    let raw = reader
        .join()
        .map_err(|_| process_failure(executable, "stdout reader panicked".to_string()))?
        .map_err(|source| process_failure(executable, format!("failed to read stdout: {source}")))?;

    if !status.success() {
        return Err(process_failure(executable, status.to_string()));
    }

    Ok(raw)
}

fn wait_with_budget(
    child: &mut Child,
    executable: &Path,
    budget: Duration,
) -> GlowResult<ExitStatus> {
    let deadline = Instant::now() + budget;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(GlowError::ProcessTimeout {
                        executable: executable.to_path_buf(),
                        budget,
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(source) => {
                let _ = child.kill();
                return Err(process_failure(
                    executable,
                    format!("failed to wait for exit: {source}"),
                ));
            }
        }
    }
}

fn process_failure(executable: &Path, reason: String) -> GlowError {
    GlowError::ProcessFailure {
        executable: executable.to_path_buf(),
        reason,
    }
}

/// Run the simulation for a Maxwellian precipitation spectrum and return
/// the labeled dataset: indices window, input line, one synchronous
/// executable call, fixed-format parse, metadata annotation.
pub fn maxwellian(
    executable: &GlowExecutable,
    provider: &dyn IndexProvider,
    request: &SimulationRequest,
) -> GlowResult<IonoDataset> {
    maxwellian_with_budget(executable, provider, request, DEFAULT_TIME_BUDGET)
}

pub fn maxwellian_with_budget(
    executable: &GlowExecutable,
    provider: &dyn IndexProvider,
    request: &SimulationRequest,
    budget: Duration,
) -> GlowResult<IonoDataset> {
    let window = provider.window(request.time)?;
    let input_line = format_input_line(request, &window);
    let path = executable.resolve()?;
    let raw = run_glow(&path, &input_line, budget)?;
    let parsed = parse_output(&raw)?;
    IonoDataset::assemble(parsed, DatasetAttrs::new(request, window))
}

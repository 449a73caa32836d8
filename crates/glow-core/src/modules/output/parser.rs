use super::model::{
    HEADER_FIELDS, NUM_ALTITUDES, NUM_QUANTITIES, NUM_WAVELENGTHS, ParsedOutput,
};
use crate::domain::{GlowError, GlowResult};

/// Parse the raw captured text of one simulation run. The layout is a
/// rigid positional contract: one echo line, one 10-field numeric header,
/// then two titled blocks of 102 rows each (altitude + 13 quantities,
/// altitude + 15 emission channels). Any deviation fails immediately;
/// there is no partial-result mode.
pub fn parse_output(raw: &str) -> GlowResult<ParsedOutput> {
    let mut lines = raw.lines();

    skip_line(&mut lines, "input echo line")?;

    let header_line = next_line(&mut lines, "numeric header line")?;
    let header = parse_numeric_row(header_line, "header row")?;
    if header.len() != HEADER_FIELDS {
        return Err(GlowError::Format(format!(
            "header row has {} fields, expected {}",
            header.len(),
            HEADER_FIELDS
        )));
    }

    skip_line(&mut lines, "profile block title")?;
    let (alt_km, profiles) = parse_profile_block(&mut lines)?;

    skip_line(&mut lines, "emission block title")?;
    let ver = parse_emission_block(&mut lines, &alt_km)?;

    Ok(ParsedOutput {
        alt_km,
        profiles,
        ver,
    })
}

fn parse_profile_block<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
) -> GlowResult<(Vec<f64>, Vec<Vec<f64>>)> {
    let mut alt_km = Vec::with_capacity(NUM_ALTITUDES);
    let mut profiles = vec![Vec::with_capacity(NUM_ALTITUDES); NUM_QUANTITIES];

    for row_index in 0..NUM_ALTITUDES {
        let line = lines.next().ok_or_else(|| {
            GlowError::Format(format!(
                "profile block ends after {row_index} of {NUM_ALTITUDES} rows"
            ))
        })?;
        let row = parse_numeric_row(line, "profile row")?;
        if row.len() != NUM_QUANTITIES + 1 {
            return Err(GlowError::Format(format!(
                "profile row {} has {} data columns, expected {}",
                row_index,
                row.len().saturating_sub(1),
                NUM_QUANTITIES
            )));
        }

        alt_km.push(row[0]);
        for (profile, value) in profiles.iter_mut().zip(&row[1..]) {
            profile.push(*value);
        }
    }

    Ok((alt_km, profiles))
}

fn parse_emission_block<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    alt_km: &[f64],
) -> GlowResult<Vec<f64>> {
    let mut ver = Vec::with_capacity(NUM_ALTITUDES * NUM_WAVELENGTHS);

    for row_index in 0..NUM_ALTITUDES {
        let line = lines.next().ok_or_else(|| {
            GlowError::Format(format!(
                "emission block ends after {row_index} of {NUM_ALTITUDES} rows"
            ))
        })?;
        let row = parse_numeric_row(line, "emission row")?;
        if row.len() != NUM_WAVELENGTHS + 1 {
            return Err(GlowError::Format(format!(
                "emission row {} has {} data columns, expected {}",
                row_index,
                row.len().saturating_sub(1),
                NUM_WAVELENGTHS
            )));
        }

        // a diverging altitude axis means the blocks are out of step
        if row_index == 0 && row[0] != alt_km[0] {
            return Err(GlowError::Format(format!(
                "emission block starts at altitude {} km, profile block starts at {} km",
                row[0], alt_km[0]
            )));
        }

        ver.extend_from_slice(&row[1..]);
    }

    Ok(ver)
}

fn skip_line<'a>(lines: &mut impl Iterator<Item = &'a str>, what: &str) -> GlowResult<()> {
    next_line(lines, what).map(|_| ())
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> GlowResult<&'a str> {
    lines
        .next()
        .ok_or_else(|| GlowError::Format(format!("output ends before {what}")))
}

fn parse_numeric_row(line: &str, what: &str) -> GlowResult<Vec<f64>> {
    line.split_whitespace()
        .map(|token| parse_numeric_token(token).ok_or_else(|| {
            GlowError::Format(format!("{what} contains non-numeric field '{token}'"))
        }))
        .collect()
}

fn parse_numeric_token(token: &str) -> Option<f64> {
    // tolerate Fortran D-exponents
    let normalized = token.replace(['D', 'd'], "E");
    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_output;
    use crate::domain::GlowError;
    use crate::modules::output::model::{NUM_ALTITUDES, NUM_QUANTITIES, NUM_WAVELENGTHS};
    use std::fmt::Write;

    const FIRST_TN: f64 = 247.25;

    fn synthetic_output() -> String {
        synthetic_output_with(FIRST_TN, None)
    }

    /// Build a well-formed two-block capture. `first_value` lands at
    /// row 0, column 1 of the first data block; `second_anchor` overrides
    /// the first altitude of the emission block when set.
    fn synthetic_output_with(first_value: f64, second_anchor: Option<f64>) -> String {
        let mut out = String::new();
        out.push_str(" GLOW basic output\n");
        out.push_str("  2015347 36000. 65.10 -147.40 148.0 150.1 146.0 4.0 1.0 100.0\n");
        out.push_str("   Z     Tn       O        N2 ...\n");

        for row in 0..NUM_ALTITUDES {
            let alt = 96.5 + 5.0 * row as f64;
            write!(out, " {alt:7.2}").unwrap();
            for col in 0..NUM_QUANTITIES {
                let value = if row == 0 && col == 0 {
                    first_value
                } else {
                    (row * NUM_QUANTITIES + col) as f64 + 0.5
                };
                write!(out, " {value:11.4E}").unwrap();
            }
            out.push('\n');
        }

        out.push_str("   Z     3371     4278 ...\n");
        for row in 0..NUM_ALTITUDES {
            let alt = if row == 0 {
                second_anchor.unwrap_or(96.5)
            } else {
                96.5 + 5.0 * row as f64
            };
            write!(out, " {alt:7.2}").unwrap();
            for col in 0..NUM_WAVELENGTHS {
                let value = (row * NUM_WAVELENGTHS + col) as f64 * 0.125;
                write!(out, " {value:11.4E}").unwrap();
            }
            out.push('\n');
        }

        out
    }

    #[test]
    fn well_formed_capture_parses_to_full_shape() {
        let parsed = parse_output(&synthetic_output()).expect("capture should parse");

        assert_eq!(parsed.alt_km.len(), NUM_ALTITUDES);
        assert_eq!(parsed.profiles.len(), NUM_QUANTITIES);
        assert!(parsed.profiles.iter().all(|p| p.len() == NUM_ALTITUDES));
        assert_eq!(parsed.ver.len(), NUM_ALTITUDES * NUM_WAVELENGTHS);
        assert_eq!(parsed.alt_km[0], 96.5);
        assert!(parsed.alt_km.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn first_quantity_first_altitude_is_the_literal_block_value() {
        let parsed = parse_output(&synthetic_output()).expect("capture should parse");
        assert_eq!(parsed.profiles[0][0], FIRST_TN);
    }

    #[test]
    fn short_header_fails_before_any_row_parsing() {
        let mut capture = String::from(" GLOW basic output\n");
        capture.push_str(" 2015347 36000. 65.10 -147.40 148.0 150.1 146.0 4.0 1.0\n");
        let error = parse_output(&capture).expect_err("nine-field header must fail");
        assert!(matches!(error, GlowError::Format(_)));
        assert!(error.to_string().contains("9 fields"));
    }

    #[test]
    fn profile_column_mismatch_is_a_format_error() {
        let capture = synthetic_output();
        // drop the last column of the first data row
        let mut lines: Vec<&str> = capture.lines().collect();
        let truncated = lines[3].rsplit_once(' ').unwrap().0.to_string();
        lines[3] = &truncated;
        let error = parse_output(&lines.join("\n")).expect_err("12-column row must fail");
        assert!(error.to_string().contains("profile row 0"));
    }

    #[test]
    fn missing_profile_rows_fail_with_row_count() {
        let capture = synthetic_output();
        let truncated: Vec<&str> = capture.lines().take(3 + NUM_ALTITUDES - 1).collect();
        let error = parse_output(&truncated.join("\n")).expect_err("101 rows must fail");
        assert!(error.to_string().contains("101 of 102"));
    }

    #[test]
    fn mismatched_altitude_anchor_is_a_format_error() {
        let capture = synthetic_output_with(FIRST_TN, Some(97.0));
        let error = parse_output(&capture).expect_err("diverging anchor must fail");
        assert!(error.to_string().contains("97"));
        assert!(error.to_string().contains("96.5"));
    }

    #[test]
    fn non_numeric_field_is_a_format_error() {
        let mut capture = String::from(" GLOW basic output\n");
        capture.push_str(" 2015347 36000. 65.10 west 148.0 150.1 146.0 4.0 1.0 100.0\n");
        let error = parse_output(&capture).expect_err("word in header must fail");
        assert!(error.to_string().contains("west"));
    }

    #[test]
    fn fortran_d_exponents_are_tolerated() {
        let capture = synthetic_output().replacen("E", "D", 1);
        parse_output(&capture).expect("D-exponent should parse like E");
    }
}

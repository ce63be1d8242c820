use thiserror::Error;

/// Short-scale unit abbreviations in steps of 1000, up to 10^66.
const UNITS: [&str; 22] = [
    "", "K", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "O", "N", "D", "UD", "DD", "TD", "QaD", "QiD",
    "SxD", "SpD", "OD", "ND", "V",
];

/// Error returned when a value exceeds the largest short-scale unit.
#[derive(Debug, Error, PartialEq)]
#[error("{0:e} is beyond the largest short-scale unit (10^66)")]
pub struct OutOfRange(pub f64);

/// Renders a number in abbreviated short-scale notation.
///
/// Values under 1000 are shown as plain integers. Larger values are scaled
/// down by powers of 1000 and shown with three significant digits plus the
/// unit abbreviation: `1.00K`, `12.3K`, `1.50M`. Values past the end of the
/// unit table (10^66 and up) are an error rather than a silent truncation.
pub fn short_numeric(value: f64) -> Result<String, OutOfRange> {
    if value < 1000.0 {
        return Ok(format!("{:.0}", value));
    }
    let mut mantissa = value;
    let mut exponent = 0;
    while mantissa >= 1000.0 {
        mantissa /= 1000.0;
        exponent += 1;
        if exponent >= UNITS.len() {
            return Err(OutOfRange(value));
        }
    }
    let digits = if mantissa < 10.0 {
        format!("{:.2}", mantissa)
    } else if mantissa < 100.0 {
        format!("{:.1}", mantissa)
    } else {
        format!("{:.0}", mantissa)
    };
    Ok(format!("{}{}", digits, UNITS[exponent]))
}

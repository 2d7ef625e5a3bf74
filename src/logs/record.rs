use std::fmt;
use std::str::FromStr;

/// How the benchmark harness measured its durations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeasurementMethod {
    /// Time-stamp counter; values are cycles
    Rdtsc,
    /// Wall clock; values are microseconds
    Chrono,
}

impl MeasurementMethod {
    pub fn unit(self) -> &'static str {
        match self {
            MeasurementMethod::Rdtsc => "cycles",
            MeasurementMethod::Chrono => "\u{03BC}s",
        }
    }
}

impl Default for MeasurementMethod {
    fn default() -> MeasurementMethod {
        MeasurementMethod::Rdtsc
    }
}

impl fmt::Display for MeasurementMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let m = match *self {
            MeasurementMethod::Rdtsc => "rdtsc",
            MeasurementMethod::Chrono => "chrono",
        };
        write!(f, "{}", m)
    }
}

impl FromStr for MeasurementMethod {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<MeasurementMethod, &'static str> {
        match s {
            "rdtsc" => Ok(MeasurementMethod::Rdtsc),
            "chrono" => Ok(MeasurementMethod::Chrono),
            _ => Err("cannot convert input to a measurement method"),
        }
    }
}

/// One line of a benchmark log: `<library>_<function>,<median>,<std dev>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub library: String,
    pub function: String,
    pub median: f64,
    pub std_dev: f64,
}

impl Record {
    pub fn parse(line: &str) -> Result<Record, String> {
        let mut fields = line.split(',').map(str::trim);
        let name = fields.next().unwrap_or("");
        let mut name_parts = name.splitn(2, '_');
        let library = name_parts.next().unwrap_or("");
        let function = name_parts.next().unwrap_or("");
        if library.is_empty() || function.is_empty() {
            return Err(format!(
                "expected a name of the form <library>_<function>, got \"{}\"",
                name
            ));
        }

        let median = parse_value("median", fields.next())?;
        let std_dev = parse_value("standard deviation", fields.next())?;

        Ok(Record {
            library: library.to_owned(),
            function: function.to_owned(),
            median,
            std_dev,
        })
    }
}

fn parse_value(what: &str, field: Option<&str>) -> Result<f64, String> {
    let field = field.ok_or_else(|| format!("missing {}", what))?;
    let value = field
        .parse::<f64>()
        .map_err(|err| format!("{} \"{}\" is not a number: {}", what, field, err))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{} must be finite and non-negative, got {}", what, value));
    }
    Ok(value)
}

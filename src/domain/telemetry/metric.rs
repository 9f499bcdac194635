//! Influx line-protocol samples

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(u64),
    Gauge(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(v) => write!(f, "{}", v),
            Self::Gauge(v) => write!(f, "{}", v),
        }
    }
}

/// One `<measurement>,<tags> <field>=<value>` line
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub measurement: String,
    pub tags: Vec<(String, String)>,
    pub field: String,
    pub value: MetricValue,
}

impl MetricSample {
    pub fn new(
        measurement: impl Into<String>,
        tags: Vec<(String, String)>,
        field: impl Into<String>,
        value: MetricValue,
    ) -> Self {
        Self {
            measurement: measurement.into(),
            tags,
            field: field.into(),
            value,
        }
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MetricSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&escape(&self.measurement, false))?;
        for (key, value) in &self.tags {
            write!(f, ",{}={}", escape(key, true), escape(value, true))?;
        }
        write!(f, " {}={}", escape(&self.field, true), self.value)
    }
}

/// Join samples into a request body, one line each
pub fn render_lines(samples: &[MetricSample]) -> String {
    samples
        .iter()
        .map(MetricSample::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}

// measurement names only need commas and spaces escaped; keys and tag values also need '='
fn escape(raw: &str, escape_equals: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == ',' || c == ' ' || (escape_equals && c == '=') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

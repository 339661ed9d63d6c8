//! Machine-readable menu output.

use std::io::Write;

use crate::error::Result;
use crate::pipeline::{DayMenu, WeekMenu};

/// Writes each `DayMenu` as one compact JSON line, for piping into `jq`
/// or a log shipper.
pub struct NdjsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, day: &DayMenu) -> Result<()> {
        let json = serde_json::to_string(day)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    pub fn write_week(&mut self, week: &WeekMenu) -> Result<()> {
        for day in &week.days {
            self.write(day)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes days into a single `[...]` document as they arrive.
///
/// Call [`JsonArrayWriter::finish`] or the output is left unterminated.
pub struct JsonArrayWriter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonArrayWriter<W> {
    /// Emits `[` immediately.
    pub fn new(mut writer: W) -> Result<Self> {
        write!(writer, "[")?;
        Ok(Self {
            writer,
            first: true,
        })
    }

    pub fn write(&mut self, day: &DayMenu) -> Result<()> {
        if !self.first {
            write!(self.writer, ",")?;
        }
        self.first = false;

        let json = serde_json::to_string(day)?;
        write!(self.writer, "{}", json)?;
        Ok(())
    }

    /// Emits `]` plus a newline and flushes.
    pub fn finish(mut self) -> Result<()> {
        writeln!(self.writer, "]")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Write a whole week as one JSON array.
pub fn write_json_array<W: Write>(writer: W, week: &WeekMenu) -> Result<()> {
    let mut out = JsonArrayWriter::new(writer)?;
    for day in &week.days {
        out.write(day)?;
    }
    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn week() -> WeekMenu {
        let day = |d: u32, entrees: &[&str]| DayMenu {
            date: NaiveDate::from_ymd_opt(2025, 10, d).unwrap(),
            weekday: String::new(),
            entrees: entrees.iter().map(|s| s.to_string()).collect(),
            excluded: Vec::new(),
        };

        WeekMenu {
            meal: "Lunch".to_string(),
            days: vec![day(6, &["Cheese Pizza"]), day(7, &[])],
        }
    }

    #[test]
    fn test_ndjson_writer() {
        let mut buf = Vec::new();
        NdjsonWriter::new(&mut buf).write_week(&week()).unwrap();

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Cheese Pizza"));
        assert!(lines[1].contains("2025-10-07"));
    }

    #[test]
    fn test_json_array_writer() {
        let mut buf = Vec::new();
        write_json_array(&mut buf, &week()).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let days = parsed.as_array().unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0]["entrees"][0], "Cheese Pizza");
        assert_eq!(days[1]["entrees"].as_array().unwrap().len(), 0);
    }
}

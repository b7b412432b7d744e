//! Line-oriented prompts over any `BufRead`/`Write` pair.
//!
//! Invalid answers are reported and asked again. End of input surfaces as
//! `io::ErrorKind::UnexpectedEof` so the menu loop can exit cleanly.

use std::io::{self, BufRead, Write};

use chrono::NaiveDateTime;

use common::datetime;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Write text followed by a newline.
    pub fn say(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    /// Write text as-is (tables already end in a newline).
    pub fn show(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        write!(self.output, "{}", text.as_ref())?;
        self.output.flush()
    }

    /// One trimmed answer line.
    pub fn ask(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Non-empty answer; `current` is kept when the answer is blank.
    pub fn text(&mut self, label: &str, current: Option<&str>) -> io::Result<String> {
        loop {
            let answer = self.ask(&with_current(label, current))?;
            match (answer.is_empty(), current) {
                (false, _) => return Ok(answer),
                (true, Some(c)) => return Ok(c.to_string()),
                (true, None) => self.say("  A value is required.")?,
            }
        }
    }

    /// Optional answer. Blank keeps `current`, `-` clears it.
    pub fn optional(&mut self, label: &str, current: Option<&str>) -> io::Result<Option<String>> {
        let answer = self.ask(&with_current(label, current))?;
        Ok(match answer.as_str() {
            "" => current.map(str::to_string),
            "-" => None,
            _ => Some(answer),
        })
    }

    /// Whole number; blank keeps `current` when there is one.
    pub fn int(&mut self, label: &str, current: Option<i32>) -> io::Result<i32> {
        let shown = current.map(|c| c.to_string());
        loop {
            let answer = self.ask(&with_current(label, shown.as_deref()))?;
            if answer.is_empty() {
                if let Some(c) = current {
                    return Ok(c);
                }
            }
            match answer.parse::<i32>() {
                Ok(v) => return Ok(v),
                Err(_) => self.say("  Please enter a whole number.")?,
            }
        }
    }

    /// Optional positive number, e.g. an id filter or page size.
    pub fn optional_number<N: std::str::FromStr>(&mut self, label: &str) -> io::Result<Option<N>> {
        loop {
            let answer = self.ask(&with_current(label, None))?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<N>() {
                Ok(v) => return Ok(Some(v)),
                Err(_) => self.say("  Please enter a number or leave blank.")?,
            }
        }
    }

    /// Date-time in any accepted wire style.
    pub fn datetime(&mut self, label: &str, current: Option<NaiveDateTime>) -> io::Result<NaiveDateTime> {
        let shown = current.as_ref().map(datetime::format);
        loop {
            let answer = self.ask(&with_current(label, shown.as_deref()))?;
            if answer.is_empty() {
                if let Some(c) = current {
                    return Ok(c);
                }
            }
            match datetime::parse(&answer) {
                Ok(dt) => return Ok(dt),
                Err(e) => self.say(format!("  {}", e))?,
            }
        }
    }

    pub fn optional_datetime(&mut self, label: &str) -> io::Result<Option<NaiveDateTime>> {
        loop {
            let answer = self.ask(&with_current(label, None))?;
            if answer.is_empty() {
                return Ok(None);
            }
            match datetime::parse(&answer) {
                Ok(dt) => return Ok(Some(dt)),
                Err(e) => self.say(format!("  {}", e))?,
            }
        }
    }

    /// `y`/`yes` confirms; anything else declines.
    pub fn confirm(&mut self, label: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{} (y/N): ", label))?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }
}

fn with_current(label: &str, current: Option<&str>) -> String {
    match current {
        Some(c) => format!("{} [{}]: ", label, c),
        None => format!("{}: ", label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn int_reasks_until_valid() {
        let mut p = prompter("abc\n\n42\n");
        assert_eq!(p.int("Worker ID", None).unwrap(), 42);
        let out = output(p);
        assert_eq!(out.matches("Please enter a whole number.").count(), 2);
    }

    #[test]
    fn blank_keeps_current_values() {
        let mut p = prompter("\n\n\n");
        assert_eq!(p.text("Name", Some("Ann")).unwrap(), "Ann");
        assert_eq!(p.int("Worker ID", Some(3)).unwrap(), 3);
        assert_eq!(p.optional("Email", Some("a@b.co")).unwrap().as_deref(), Some("a@b.co"));
        assert!(output(p).contains("Name [Ann]: "));
    }

    #[test]
    fn dash_clears_optional() {
        let mut p = prompter("-\n");
        assert_eq!(p.optional("Phone", Some("0123456789")).unwrap(), None);
    }

    #[test]
    fn required_text_rejects_blank() {
        let mut p = prompter("  \nDock 7\n");
        assert_eq!(p.text("Name", None).unwrap(), "Dock 7");
        assert!(output(p).contains("A value is required."));
    }

    #[test]
    fn datetime_accepts_slashes_and_reports_errors() {
        let mut p = prompter("soon\n06/01/2025 09:00\n");
        let dt = p.datetime("Start", None).unwrap();
        assert_eq!(datetime::format(&dt), "06-01-2025 09:00");
        assert!(output(p).contains("invalid date-time 'soon'"));
    }

    #[test]
    fn optional_number_blank_is_none() {
        let mut p = prompter("\nx\n25\n");
        assert_eq!(p.optional_number::<u64>("Page size").unwrap(), None);
        assert_eq!(p.optional_number::<u64>("Page size").unwrap(), Some(25));
    }

    #[test]
    fn end_of_input_is_unexpected_eof() {
        let mut p = prompter("");
        let err = p.ask("Choice: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn confirm_only_on_yes() {
        let mut p = prompter("Y\nno\n\n");
        assert!(p.confirm("Delete?").unwrap());
        assert!(!p.confirm("Delete?").unwrap());
        assert!(!p.confirm("Delete?").unwrap());
    }
}

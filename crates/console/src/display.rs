//! Table and detail formatting for terminal output.
//!
//! Column widths follow the widest value in each column so tables stay
//! aligned regardless of data.

use common::datetime;
use common::types::{Location, Page, Shift, Worker};

/// Width of a column: widest cell, never narrower than the header.
fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|c| c.chars().count()).max().unwrap_or(0).max(header.chars().count())
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Render rows under a header with a dashed separator.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| column_width(h, rows.iter().map(|r| r[i].as_str())))
        .collect();

    let line = |cells: Vec<String>| -> String {
        let joined: Vec<String> = cells.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
        format!("{}\n", joined.join("  ").trim_end())
    };

    let mut output = String::new();
    output.push_str(&line(headers.iter().map(|h| h.to_string()).collect()));
    output.push_str(&line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        output.push_str(&line(row.clone()));
    }
    output
}

fn or_dash(v: &Option<String>) -> String {
    v.clone().unwrap_or_else(|| "-".to_string())
}

pub fn worker_table(workers: &[Worker]) -> String {
    if workers.is_empty() {
        return "No workers found.\n".to_string();
    }
    let rows: Vec<Vec<String>> = workers
        .iter()
        .map(|w| vec![w.worker_id.to_string(), w.name.clone(), or_dash(&w.email), or_dash(&w.phone_number)])
        .collect();
    table(&["ID", "Name", "Email", "Phone"], &rows)
}

pub fn worker_details(w: &Worker) -> String {
    let mut output = String::new();
    output.push_str(&format!("Worker #{}\n", w.worker_id));
    output.push_str(&format!("  Name:   {}\n", w.name));
    output.push_str(&format!("  Email:  {}\n", or_dash(&w.email)));
    output.push_str(&format!("  Phone:  {}\n", or_dash(&w.phone_number)));
    output
}

pub fn location_table(locations: &[Location]) -> String {
    if locations.is_empty() {
        return "No locations found.\n".to_string();
    }
    let rows: Vec<Vec<String>> = locations
        .iter()
        .map(|l| {
            vec![
                l.location_id.to_string(),
                l.name.clone(),
                l.town.clone(),
                l.county.clone(),
                l.post_code.clone(),
                l.country.clone(),
            ]
        })
        .collect();
    table(&["ID", "Name", "Town", "County", "Post Code", "Country"], &rows)
}

pub fn location_details(l: &Location) -> String {
    let mut output = String::new();
    output.push_str(&format!("Location #{}: {}\n", l.location_id, l.name));
    output.push_str(&format!("  Address:    {}\n", l.address));
    output.push_str(&format!("  Town:       {}\n", l.town));
    output.push_str(&format!("  County:     {}\n", l.county));
    output.push_str(&format!("  Post Code:  {}\n", l.post_code));
    output.push_str(&format!("  Country:    {}\n", l.country));
    output
}

pub fn shift_table(shifts: &[Shift]) -> String {
    if shifts.is_empty() {
        return "No shifts found.\n".to_string();
    }
    let rows: Vec<Vec<String>> = shifts
        .iter()
        .map(|s| {
            vec![
                s.shift_id.to_string(),
                s.worker_id.to_string(),
                s.location_id.to_string(),
                datetime::format(&s.start_time),
                datetime::format(&s.end_time),
                duration_label(s),
            ]
        })
        .collect();
    table(&["ID", "Worker", "Location", "Start", "End", "Hours"], &rows)
}

pub fn shift_details(s: &Shift) -> String {
    let mut output = String::new();
    output.push_str(&format!("Shift #{}\n", s.shift_id));
    output.push_str(&format!("  Worker:    {}\n", s.worker_id));
    output.push_str(&format!("  Location:  {}\n", s.location_id));
    output.push_str(&format!("  Start:     {}\n", datetime::format(&s.start_time)));
    output.push_str(&format!("  End:       {}\n", datetime::format(&s.end_time)));
    output.push_str(&format!("  Hours:     {}\n", duration_label(s)));
    output
}

/// `h:mm` length of a shift.
fn duration_label(s: &Shift) -> String {
    let minutes = (s.end_time - s.start_time).num_minutes().max(0);
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

pub fn page_footer<T>(page: &Page<T>) -> String {
    format!(
        "Page {} of {} ({} total)",
        page.page_number,
        page.total_pages().max(1),
        page.total_count
    )
}

use std::io::{self, BufRead, Write};

use common::types::{Shift, ShiftInput, ShiftQuery};

use super::{browse, Breadcrumb, Console};
use crate::display;

const DATE_HINT: &str = "Dates use dd-MM-yyyy HH:mm, e.g. 06-01-2025 09:00.";

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) async fn shifts_menu(&mut self, trail: &Breadcrumb) -> io::Result<()> {
        loop {
            self.header(trail)?;
            self.prompt.say("  1. List shifts")?;
            self.prompt.say("  2. Search / filter shifts")?;
            self.prompt.say("  3. View shift")?;
            self.prompt.say("  4. Create shift")?;
            self.prompt.say("  5. Update shift")?;
            self.prompt.say("  6. Delete shift")?;
            self.prompt.say("  7. Shifts in a date range")?;
            self.prompt.say("  8. Shifts of a worker")?;
            self.prompt.say("  9. Shifts at a location")?;
            self.prompt.say("  0. Back")?;
            match self.prompt.ask("Select an option: ")?.as_str() {
                "1" => self.browse_shifts(ShiftQuery::default()).await?,
                "2" => {
                    self.header(&trail.then("Filter"))?;
                    let query = self.shift_filter()?;
                    self.browse_shifts(query).await?
                }
                "3" => {
                    let id = self.prompt.int("Shift ID", None)?;
                    let res = self.shifts.get(id).await;
                    self.outcome(res, |s| display::shift_details(&s))?
                }
                "4" => self.create_shift(&trail.then("Create Shift")).await?,
                "5" => self.update_shift(&trail.then("Update Shift")).await?,
                "6" => {
                    let id = self.prompt.int("Shift ID", None)?;
                    if self.prompt.confirm(&format!("Delete shift {}?", id))? {
                        let res = self.shifts.delete(id).await;
                        self.outcome(res, |msg| format!("{}\n", msg))?
                    }
                }
                "7" => {
                    self.prompt.say(DATE_HINT)?;
                    let start = self.prompt.datetime("From", None)?;
                    let end = self.prompt.datetime("Until", None)?;
                    let res = self.shifts.by_date_range(start, end).await;
                    self.outcome(res, |ss| display::shift_table(&ss))?
                }
                "8" => {
                    let id = self.prompt.int("Worker ID", None)?;
                    let res = self.shifts.by_worker(id).await;
                    self.outcome(res, |ss| display::shift_table(&ss))?
                }
                "9" => {
                    let id = self.prompt.int("Location ID", None)?;
                    let res = self.shifts.by_location(id).await;
                    self.outcome(res, |ss| display::shift_table(&ss))?
                }
                "0" | "b" => return Ok(()),
                _ => self.prompt.say("Invalid option.")?,
            }
        }
    }

    async fn browse_shifts(&mut self, query: ShiftQuery) -> io::Result<()> {
        let client = self.shifts.clone();
        let fetch = move |page| {
            let client = client.clone();
            let q = ShiftQuery { page_number: Some(page), ..query.clone() };
            async move { client.list(&q).await }
        };
        browse(&mut self.prompt, fetch, display::shift_table).await
    }

    fn shift_filter(&mut self) -> io::Result<ShiftQuery> {
        self.prompt.say("Leave a field blank to skip it.")?;
        let search = self.prompt.optional("Search worker or location name", None)?;
        let worker_id = self.prompt.optional_number::<i32>("Worker ID")?;
        let location_id = self.prompt.optional_number::<i32>("Location ID")?;
        self.prompt.say(DATE_HINT)?;
        let start_date = self.prompt.optional_datetime("Starting at or after")?;
        let end_date = self.prompt.optional_datetime("Ending at or before")?;
        let (sort_by, sort_order, page_size) = self.sort_and_size("id, worker, location, start, end")?;
        Ok(ShiftQuery {
            search,
            worker_id,
            location_id,
            start_date,
            end_date,
            sort_by: sort_by.map(|s| shift_sort_field(&s)),
            sort_order,
            page_size,
            ..ShiftQuery::default()
        })
    }

    /// Worker, location and both times; `current` supplies defaults on update.
    fn shift_form(&mut self, current: Option<&Shift>) -> io::Result<ShiftInput> {
        self.prompt.say(DATE_HINT)?;
        Ok(ShiftInput {
            worker_id: self.prompt.int("Worker ID", current.map(|s| s.worker_id))?,
            location_id: self.prompt.int("Location ID", current.map(|s| s.location_id))?,
            start_time: self.prompt.datetime("Start", current.map(|s| s.start_time))?,
            end_time: self.prompt.datetime("End", current.map(|s| s.end_time))?,
        })
    }

    async fn create_shift(&mut self, trail: &Breadcrumb) -> io::Result<()> {
        self.header(trail)?;
        let input = self.shift_form(None)?;
        let res = self.shifts.create(&input).await;
        self.outcome(res, |s| format!("Shift created.\n{}", display::shift_details(&s)))
    }

    async fn update_shift(&mut self, trail: &Breadcrumb) -> io::Result<()> {
        self.header(trail)?;
        let id = self.prompt.int("Shift ID", None)?;
        let current = match self.shifts.get(id).await {
            Ok(s) => s,
            Err(e) => return self.report(&e),
        };
        self.prompt.say("Blank keeps the current value.")?;
        let input = self.shift_form(Some(&current))?;
        let res = self.shifts.update(id, &input).await;
        self.outcome(res, |s| format!("Shift updated.\n{}", display::shift_details(&s)))
    }
}

/// Menu wording to API sort keys: `worker` and `location` mean the id columns.
fn shift_sort_field(answer: &str) -> String {
    match answer.trim().to_lowercase().as_str() {
        "worker" => "worker_id".to_string(),
        "location" => "location_id".to_string(),
        other => other.to_string(),
    }
}

//! Numbered text menus. The main loop owns the welcome flag and hands each
//! sub-menu the breadcrumb trail it was reached through.

use std::fmt;
use std::future::Future;
use std::io::{self, BufRead, Write};

use tracing::info;

use common::types::{Page, SortOrder};

use crate::client::{ApiClient, ClientError, ClientResult, LocationClient, ShiftClient, WorkerClient};
use crate::display;
use crate::prompt::Prompter;

mod locations;
mod shifts;
mod workers;

/// Navigation path shown in every menu header, e.g. `Main Menu > Workers`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb(Vec<String>);

impl Breadcrumb {
    pub fn root() -> Self {
        Self(vec!["Main Menu".to_string()])
    }

    /// New trail one step deeper; `self` is left untouched for the way back.
    pub fn then(&self, step: &str) -> Self {
        let mut steps = self.0.clone();
        steps.push(step.to_string());
        Self(steps)
    }
}

impl fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" > "))
    }
}

pub struct Console<R, W> {
    prompt: Prompter<R, W>,
    workers: WorkerClient,
    locations: LocationClient,
    shifts: ShiftClient,
    base_url: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(api: &ApiClient, input: R, output: W) -> Self {
        Self {
            prompt: Prompter::new(input, output),
            workers: api.workers(),
            locations: api.locations(),
            shifts: api.shifts(),
            base_url: api.base_url().to_string(),
        }
    }

    pub fn into_output(self) -> W {
        self.prompt.into_output()
    }

    /// Run until the user exits or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        match self.main_menu().await {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                info!(event = "input_closed", "console input closed");
                Ok(())
            }
            other => other,
        }
    }

    async fn main_menu(&mut self) -> io::Result<()> {
        let trail = Breadcrumb::root();
        let mut welcomed = false;
        loop {
            if !welcomed {
                self.welcome()?;
                welcomed = true;
            }
            self.header(&trail)?;
            self.prompt.say("  1. Workers")?;
            self.prompt.say("  2. Locations")?;
            self.prompt.say("  3. Shifts")?;
            self.prompt.say("  0. Exit")?;
            match self.prompt.ask("Select an option: ")?.as_str() {
                "1" => self.workers_menu(&trail.then("Workers")).await?,
                "2" => self.locations_menu(&trail.then("Locations")).await?,
                "3" => self.shifts_menu(&trail.then("Shifts")).await?,
                "0" | "q" => {
                    self.prompt.say("Goodbye.")?;
                    return Ok(());
                }
                _ => self.prompt.say("Invalid option.")?,
            }
        }
    }

    fn welcome(&mut self) -> io::Result<()> {
        self.prompt.say("===========================================")?;
        self.prompt.say("  Shift Manager")?;
        self.prompt.say("===========================================")?;
        self.prompt.say(format!("API: {}", self.base_url))
    }

    fn header(&mut self, trail: &Breadcrumb) -> io::Result<()> {
        self.prompt.say("")?;
        self.prompt.say(format!("== {} ==", trail))
    }

    fn report(&mut self, e: &ClientError) -> io::Result<()> {
        self.prompt.say(format!("Error: {}", e))
    }

    /// Show the rendered value, or the error.
    fn outcome<T>(&mut self, res: ClientResult<T>, render: impl FnOnce(T) -> String) -> io::Result<()> {
        match res {
            Ok(v) => self.prompt.show(render(v)),
            Err(e) => self.report(&e),
        }
    }

    /// Shared tail of every filter form.
    fn sort_and_size(&mut self, fields: &str) -> io::Result<(Option<String>, Option<SortOrder>, Option<u64>)> {
        let sort_by = self.prompt.optional(&format!("Sort by ({})", fields), None)?;
        let sort_order = parse_sort_order(self.prompt.optional("Order (asc/desc)", None)?.as_deref());
        let page_size = self.prompt.optional_number::<u64>("Page size (blank for 10)")?;
        Ok((sort_by, sort_order, page_size))
    }
}

fn parse_sort_order(answer: Option<&str>) -> Option<SortOrder> {
    match answer.map(|a| a.to_lowercase()) {
        Some(a) if a.starts_with('d') => Some(SortOrder::Desc),
        Some(a) if a.starts_with('a') => Some(SortOrder::Asc),
        _ => None,
    }
}

/// Page through a list: `n`/`p` move, `b` or blank goes back.
async fn browse<R, W, T, F, Fut>(prompt: &mut Prompter<R, W>, mut fetch: F, render: fn(&[T]) -> String) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = ClientResult<Page<T>>>,
{
    let mut page_number = 1;
    loop {
        let page = match fetch(page_number).await {
            Ok(page) => page,
            Err(e) => return prompt.say(format!("Error: {}", e)),
        };
        prompt.show(render(&page.items))?;
        prompt.say(display::page_footer(&page))?;

        let last = page.total_pages().max(1);
        let mut choices = Vec::new();
        if page.page_number > 1 {
            choices.push("[p]revious");
        }
        if page.page_number < last {
            choices.push("[n]ext");
        }
        choices.push("[b]ack");
        match prompt.ask(&format!("{}: ", choices.join(", ")))?.to_lowercase().as_str() {
            "n" if page.page_number < last => page_number = page.page_number + 1,
            "p" if page.page_number > 1 => page_number = page.page_number - 1,
            "b" | "" => return Ok(()),
            _ => prompt.say("Invalid option.")?,
        }
    }
}

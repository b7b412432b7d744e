use std::io::{self, BufRead, Write};

use common::types::{WorkerInput, WorkerQuery};

use super::{browse, Breadcrumb, Console};
use crate::display;

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) async fn workers_menu(&mut self, trail: &Breadcrumb) -> io::Result<()> {
        loop {
            self.header(trail)?;
            self.prompt.say("  1. List workers")?;
            self.prompt.say("  2. Search / filter workers")?;
            self.prompt.say("  3. View worker")?;
            self.prompt.say("  4. Create worker")?;
            self.prompt.say("  5. Update worker")?;
            self.prompt.say("  6. Delete worker")?;
            self.prompt.say("  7. Workers by email domain")?;
            self.prompt.say("  8. Workers by phone area code")?;
            self.prompt.say("  0. Back")?;
            match self.prompt.ask("Select an option: ")?.as_str() {
                "1" => self.browse_workers(WorkerQuery::default()).await?,
                "2" => {
                    self.header(&trail.then("Filter"))?;
                    let query = self.worker_filter()?;
                    self.browse_workers(query).await?
                }
                "3" => {
                    let id = self.prompt.int("Worker ID", None)?;
                    let res = self.workers.get(id).await;
                    self.outcome(res, |w| display::worker_details(&w))?
                }
                "4" => self.create_worker(&trail.then("Create Worker")).await?,
                "5" => self.update_worker(&trail.then("Update Worker")).await?,
                "6" => {
                    let id = self.prompt.int("Worker ID", None)?;
                    if self.prompt.confirm(&format!("Delete worker {}?", id))? {
                        let res = self.workers.delete(id).await;
                        self.outcome(res, |msg| format!("{}\n", msg))?
                    }
                }
                "7" => {
                    let domain = self.prompt.text("Email domain (e.g. example.com)", None)?;
                    let res = self.workers.by_email_domain(&domain).await;
                    self.outcome(res, |ws| display::worker_table(&ws))?
                }
                "8" => {
                    let code = self.prompt.text("Phone area code (digits)", None)?;
                    let res = self.workers.by_phone_area_code(&code).await;
                    self.outcome(res, |ws| display::worker_table(&ws))?
                }
                "0" | "b" => return Ok(()),
                _ => self.prompt.say("Invalid option.")?,
            }
        }
    }

    async fn browse_workers(&mut self, query: WorkerQuery) -> io::Result<()> {
        let client = self.workers.clone();
        let fetch = move |page| {
            let client = client.clone();
            let q = WorkerQuery { page_number: Some(page), ..query.clone() };
            async move { client.list(&q).await }
        };
        browse(&mut self.prompt, fetch, display::worker_table).await
    }

    fn worker_filter(&mut self) -> io::Result<WorkerQuery> {
        self.prompt.say("Leave a field blank to skip it.")?;
        let search = self.prompt.optional("Search name, email or phone", None)?;
        let name = self.prompt.optional("Name contains", None)?;
        let email = self.prompt.optional("Email contains", None)?;
        let phone_number = self.prompt.optional("Phone contains", None)?;
        let (sort_by, sort_order, page_size) = self.sort_and_size("id, name, email, phone")?;
        Ok(WorkerQuery { search, name, email, phone_number, sort_by, sort_order, page_size, ..WorkerQuery::default() })
    }

    async fn create_worker(&mut self, trail: &Breadcrumb) -> io::Result<()> {
        self.header(trail)?;
        self.prompt.say("A worker needs an email address or a phone number.")?;
        let input = WorkerInput {
            name: self.prompt.text("Name", None)?,
            email: self.prompt.optional("Email", None)?,
            phone_number: self.prompt.optional("Phone number", None)?,
        };
        let res = self.workers.create(&input).await;
        self.outcome(res, |w| format!("Worker created.\n{}", display::worker_details(&w)))
    }

    async fn update_worker(&mut self, trail: &Breadcrumb) -> io::Result<()> {
        self.header(trail)?;
        let id = self.prompt.int("Worker ID", None)?;
        let current = match self.workers.get(id).await {
            Ok(w) => w,
            Err(e) => return self.report(&e),
        };
        self.prompt.say("Blank keeps the current value, '-' clears an optional one.")?;
        let input = WorkerInput {
            name: self.prompt.text("Name", Some(current.name.as_str()))?,
            email: self.prompt.optional("Email", current.email.as_deref())?,
            phone_number: self.prompt.optional("Phone number", current.phone_number.as_deref())?,
        };
        let res = self.workers.update(id, &input).await;
        self.outcome(res, |w| format!("Worker updated.\n{}", display::worker_details(&w)))
    }
}

use std::io::{self, BufRead, Write};

use common::types::{Location, LocationInput, LocationQuery};

use super::{browse, Breadcrumb, Console};
use crate::display;

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) async fn locations_menu(&mut self, trail: &Breadcrumb) -> io::Result<()> {
        loop {
            self.header(trail)?;
            self.prompt.say("  1. List locations")?;
            self.prompt.say("  2. Search / filter locations")?;
            self.prompt.say("  3. View location")?;
            self.prompt.say("  4. Create location")?;
            self.prompt.say("  5. Update location")?;
            self.prompt.say("  6. Delete location")?;
            self.prompt.say("  7. Locations by country")?;
            self.prompt.say("  8. Locations by county")?;
            self.prompt.say("  0. Back")?;
            match self.prompt.ask("Select an option: ")?.as_str() {
                "1" => self.browse_locations(LocationQuery::default()).await?,
                "2" => {
                    self.header(&trail.then("Filter"))?;
                    let query = self.location_filter()?;
                    self.browse_locations(query).await?
                }
                "3" => {
                    let id = self.prompt.int("Location ID", None)?;
                    let res = self.locations.get(id).await;
                    self.outcome(res, |l| display::location_details(&l))?
                }
                "4" => self.create_location(&trail.then("Create Location")).await?,
                "5" => self.update_location(&trail.then("Update Location")).await?,
                "6" => {
                    let id = self.prompt.int("Location ID", None)?;
                    if self.prompt.confirm(&format!("Delete location {}?", id))? {
                        let res = self.locations.delete(id).await;
                        self.outcome(res, |msg| format!("{}\n", msg))?
                    }
                }
                "7" => {
                    let country = self.prompt.text("Country", None)?;
                    let res = self.locations.by_country(&country).await;
                    self.outcome(res, |ls| display::location_table(&ls))?
                }
                "8" => {
                    let county = self.prompt.text("County", None)?;
                    let res = self.locations.by_county(&county).await;
                    self.outcome(res, |ls| display::location_table(&ls))?
                }
                "0" | "b" => return Ok(()),
                _ => self.prompt.say("Invalid option.")?,
            }
        }
    }

    async fn browse_locations(&mut self, query: LocationQuery) -> io::Result<()> {
        let client = self.locations.clone();
        let fetch = move |page| {
            let client = client.clone();
            let q = LocationQuery { page_number: Some(page), ..query.clone() };
            async move { client.list(&q).await }
        };
        browse(&mut self.prompt, fetch, display::location_table).await
    }

    fn location_filter(&mut self) -> io::Result<LocationQuery> {
        self.prompt.say("Leave a field blank to skip it.")?;
        let search = self.prompt.optional("Search name or address", None)?;
        let name = self.prompt.optional("Name contains", None)?;
        let town = self.prompt.optional("Town contains", None)?;
        let county = self.prompt.optional("County contains", None)?;
        let post_code = self.prompt.optional("Post code contains", None)?;
        let country = self.prompt.optional("Country contains", None)?;
        let (sort_by, sort_order, page_size) = self.sort_and_size("id, name, address, town, county, postcode, country")?;
        Ok(LocationQuery {
            search,
            name,
            town,
            county,
            post_code,
            country,
            sort_by,
            sort_order,
            page_size,
            ..LocationQuery::default()
        })
    }

    /// Every location field; `current` supplies defaults on update.
    fn location_form(&mut self, current: Option<&Location>) -> io::Result<LocationInput> {
        Ok(LocationInput {
            name: self.prompt.text("Name", current.map(|l| l.name.as_str()))?,
            address: self.prompt.text("Address", current.map(|l| l.address.as_str()))?,
            town: self.prompt.text("Town", current.map(|l| l.town.as_str()))?,
            county: self.prompt.text("County", current.map(|l| l.county.as_str()))?,
            post_code: self.prompt.text("Post code", current.map(|l| l.post_code.as_str()))?,
            country: self.prompt.text("Country", current.map(|l| l.country.as_str()))?,
        })
    }

    async fn create_location(&mut self, trail: &Breadcrumb) -> io::Result<()> {
        self.header(trail)?;
        let input = self.location_form(None)?;
        let res = self.locations.create(&input).await;
        self.outcome(res, |l| format!("Location created.\n{}", display::location_details(&l)))
    }

    async fn update_location(&mut self, trail: &Breadcrumb) -> io::Result<()> {
        self.header(trail)?;
        let id = self.prompt.int("Location ID", None)?;
        let current = match self.locations.get(id).await {
            Ok(l) => l,
            Err(e) => return self.report(&e),
        };
        self.prompt.say("Blank keeps the current value.")?;
        let input = self.location_form(Some(&current))?;
        let res = self.locations.update(id, &input).await;
        self.outcome(res, |l| format!("Location updated.\n{}", display::location_details(&l)))
    }
}

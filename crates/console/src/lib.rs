//! Interactive console front end for the shift manager API.
//!
//! `client` talks to the HTTP API and unwraps the response envelope,
//! `display` renders tables, `prompt` reads typed answers and `menu` ties
//! them together into the numbered menus.

pub mod client;
pub mod display;
pub mod menu;
pub mod prompt;

pub use client::{ApiClient, ClientError, ClientResult};
pub use menu::Console;

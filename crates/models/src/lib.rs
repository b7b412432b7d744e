pub mod errors;
pub mod db;
pub mod validation;
pub mod worker;
pub mod location;
pub mod shift;

#[cfg(test)]
mod tests;

//! Types and helpers shared by the API server and the console client.

pub mod types;
pub mod utils;
pub mod datetime;
pub mod admin_http;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok".into() };
        assert_eq!(h.status, "ok");
    }
}

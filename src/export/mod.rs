pub mod csv;
pub mod json;

pub use self::csv::export_csv;
pub use self::csv::write_csv;
pub use self::json::export_json;
pub use self::json::to_json_string;
pub use self::json::write_json;

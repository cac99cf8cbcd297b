mod json;
#[cfg(feature = "xlsx")]
mod xlsx;

pub use json::JsonGrid;
#[cfg(feature = "xlsx")]
pub use xlsx::XlsxGrid;

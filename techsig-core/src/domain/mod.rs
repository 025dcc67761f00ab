//! Domain types: bars and series.

pub mod bar;
pub mod series;

pub use bar::PriceBar;
pub use series::PriceSeries;

//! Pure markup renderers. Nothing here performs I/O.

pub mod privacy_view;
pub mod pricing_view;
pub mod score_view;
pub mod trip_view;

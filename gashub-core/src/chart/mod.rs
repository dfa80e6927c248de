//! Chart series derivation and the backend seam.
//!
//! The drawing library is abstracted behind [`ChartBackend`]; the core only
//! decides what is drawn (labels, prices, volumes, colors, titles) and keeps
//! at most one live chart per [`ChartCanvas`].

pub mod canvas;
pub mod series;
pub mod sparkline;

pub use canvas::{ChartBackend, ChartCanvas, ChartError, ChartInstance};
pub use series::{chart_title, ChartSeries, Rgb, VOLUME_AXIS_TITLE, VWAP_AXIS_TITLE};

//! # lagframe — lagged regression design matrices from multivariate time series
//!
//! This crate holds the observations of several variables over time, lets you designate
//! some of them as dependent (targets) and others as independent (predictors, each with its
//! own lag), and builds time-aligned dependent and independent matrices for any window,
//! ready to be handed to a regression or forecasting routine.
//!
//! With a lag depth of `k`, the dependent variables additionally enter the independent
//! matrix at lags `1..=k`. The independent matrix is laid out in blocks: all dependent
//! variables at lag 1, all dependent variables at lag 2, …, followed by the explicit
//! predictors in the order they were added.
//!
//! ## Crate Features
//!
//! * `ndarray` - Enables conversions from [ndarray](https://crates.io/crates/ndarray)'s `Array1` and
//!   `Array2` types and into `Array2`.
//!
//! ## Example
//!
//! ```
//! use lagframe::{CalendarRow, MultiSeries};
//!
//! // Four variables of ten points in time, laid out column-major:
//! // one block of ten values per variable.
//! let data: Vec<f64> = (0..4)
//!     .flat_map(|v| (0..10).map(move |t| (10 * v + t) as f64))
//!     .collect();
//!
//! let mut series = MultiSeries::load(&data, 4, Some(&["V0", "V1", "V2", "V3"][..])).unwrap();
//! series.set_dependent([0, 1], false);
//! series.set_independent(2, 0, false).unwrap();
//! series.set_independent_by_name("V3", 0, true).unwrap();
//! series.set_lag_depth(2).unwrap();
//!
//! let window = series.feasible_window();
//! assert_eq!((window.min_from, window.max_to), (2, 10));
//!
//! let y = series.build_dependent(2, 10).unwrap();
//! let x = series.build_independent(2, 10).unwrap();
//! assert_eq!(y.shape(), (8, 2));
//! assert_eq!(x.shape(), (8, 6));
//!
//! assert_eq!(
//!     x.row(0).unwrap(),
//!     &[
//!     //   lag 1       lag 2      explicit
//!     //   |------|    |------|   |------|
//!          1.0, 11.0,  0.0, 10.0, 22.0, 32.0
//!     ]
//! );
//!
//! // Quarterly labels for the rows.
//! series.annotate(4, Some(CalendarRow::new(2000, 0)), None).unwrap();
//! assert_eq!(series.row_label(9), Some(CalendarRow::new(2002, 1)));
//! ```

// SPDX-FileCopyrightText: 2023 Markus Mayer
// SPDX-License-Identifier: EUPL-1.2

// only enables the `doc_cfg` feature when
// the `docsrs` configuration attribute is defined
#![cfg_attr(docsrs, feature(doc_cfg))]

mod calendar;
mod error;
mod matrix;
mod roles;
mod series;
mod store;
mod window;

#[cfg(feature = "ndarray")]
#[cfg_attr(docsrs, doc(cfg(feature = "ndarray")))]
mod ndarray_support;

pub use calendar::{Anchor, Calendar, CalendarRow};
pub use error::{MissingState, SeriesError};
pub use matrix::{lagged_columns, DesignMatrix};
pub use roles::{IndependentSpec, RoleRegistry};
pub use series::MultiSeries;
pub use store::SeriesStore;
pub use window::FeasibleWindow;

#[cfg(feature = "ndarray")]
#[cfg_attr(docsrs, doc(cfg(feature = "ndarray")))]
pub use ndarray_support::MultiSeriesFromArray;

/// The prelude.
pub mod prelude {
    pub use crate::{CalendarRow, DesignMatrix, MultiSeries, SeriesError};

    #[cfg(feature = "ndarray")]
    #[cfg_attr(docsrs, doc(cfg(feature = "ndarray")))]
    pub use crate::ndarray_support::MultiSeriesFromArray;
}

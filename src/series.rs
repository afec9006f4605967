use crate::{
    lagged_columns, Anchor, Calendar, CalendarRow, DesignMatrix, FeasibleWindow, IndependentSpec,
    MissingState, RoleRegistry, SeriesError, SeriesStore,
};
use tracing::{debug, trace};

/// A multivariate time series together with its regression roles.
///
/// The instance owns the observations, the dependent/independent configuration and an
/// optional calendar. Loading new observations resets everything else. Builders only
/// read, so a configured instance can be shared for concurrent matrix construction.
///
/// ## Example
/// ```
/// use lagframe::MultiSeries;
///
/// // Two variables of five points in time, column-major.
/// let data = [
///     1.0, 2.0, 3.0, 4.0, 5.0,       // y
///     10.0, 20.0, 30.0, 40.0, 50.0,  // x
/// ];
///
/// let mut series = MultiSeries::load(&data, 2, Some(&["y", "x"][..])).unwrap();
/// series.set_dependent_by_name(["y"], false).unwrap();
/// series.set_independent_by_name("x", 0, false).unwrap();
/// series.set_lag_depth(1).unwrap();
///
/// let window = series.feasible_window();
/// let y = series.build_dependent(window.min_from, window.max_to).unwrap();
/// let x = series.build_independent(window.min_from, window.max_to).unwrap();
///
/// assert_eq!(y, &[2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(
///     x,
///     &[
///         1.0, 20.0,
///         2.0, 30.0,
///         3.0, 40.0,
///         4.0, 50.0,
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSeries<T = f64> {
    store: SeriesStore<T>,
    roles: RoleRegistry,
    calendar: Option<Calendar>,
}

impl<T> Default for MultiSeries<T> {
    fn default() -> Self {
        Self {
            store: SeriesStore::default(),
            roles: RoleRegistry::default(),
            calendar: None,
        }
    }
}

impl<T: Copy> MultiSeries<T> {
    /// Creates an instance from a flat column-major buffer of `num_series` series.
    ///
    /// See [`MultiSeries::reload`].
    pub fn load(
        data: &[T],
        num_series: usize,
        names: Option<&[&str]>,
    ) -> Result<Self, SeriesError> {
        let mut series = Self::default();
        series.reload(data, num_series, names)?;
        Ok(series)
    }

    /// Replaces all observations.
    ///
    /// `data` is split into `num_series` consecutive blocks of equal length, one per
    /// variable. Names are ignored unless there is exactly one per variable. On success
    /// the roles, lag depth and calendar are reset; on failure nothing changes.
    pub fn reload(
        &mut self,
        data: &[T],
        num_series: usize,
        names: Option<&[&str]>,
    ) -> Result<(), SeriesError> {
        let store = SeriesStore::load(data, num_series, names)?;
        debug!(
            num_series = store.num_series(),
            series_length = store.series_length(),
            named = store.names().is_some(),
            "loaded series"
        );

        self.store = store;
        self.roles = RoleRegistry::default();
        self.calendar = None;
        Ok(())
    }

    /// Builds the matrix of dependent variables over the window `[from, to)`.
    ///
    /// Column `c` holds the dependent variable added `c`-th; row `t` is point in time
    /// `from + t`. The window must lie within [`MultiSeries::feasible_window`].
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn build_dependent(&self, from: usize, to: usize) -> Result<DesignMatrix<T>, SeriesError> {
        if !self.store.is_loaded() {
            return Err(SeriesError::State(MissingState::NoData));
        }
        if self.roles.dependent().is_empty() {
            return Err(SeriesError::State(MissingState::NoDependent));
        }
        self.feasible_window().check(from, to)?;

        let sources = self
            .roles
            .dependent()
            .iter()
            .map(|&column| (self.column_or_empty(column), 0));

        let matrix = lagged_columns(sources, from, to)?;
        trace!(rows = matrix.num_rows(), cols = matrix.num_cols(), "built dependent matrix");
        Ok(matrix)
    }

    /// Builds the matrix of independent variables over the window `[from, to)`.
    ///
    /// Columns are laid out in blocks: for every lag `h` in `1..=lag_depth` the dependent
    /// variables shifted back by `h`, followed by every explicit predictor shifted back by
    /// its own lag. Rows line up with [`MultiSeries::build_dependent`] for the same window.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn build_independent(
        &self,
        from: usize,
        to: usize,
    ) -> Result<DesignMatrix<T>, SeriesError> {
        if !self.store.is_loaded() {
            return Err(SeriesError::State(MissingState::NoData));
        }
        if self.roles.num_predictors() == 0 {
            return Err(SeriesError::State(MissingState::NoIndependent));
        }
        self.feasible_window().check(from, to)?;

        let sources = self
            .roles
            .predictor_layout()
            .map(|spec| (self.column_or_empty(spec.column), spec.lag));

        let matrix = lagged_columns(sources, from, to)?;
        trace!(rows = matrix.num_rows(), cols = matrix.num_cols(), "built independent matrix");
        Ok(matrix)
    }

    // Registered columns are always below `num_series`.
    fn column_or_empty(&self, column: usize) -> &[T] {
        self.store.column(column).unwrap_or(&[])
    }
}

impl<T> MultiSeries<T> {
    /// The underlying observations.
    pub fn store(&self) -> &SeriesStore<T> {
        &self.store
    }

    /// The current dependent/independent configuration.
    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    /// The calendar set by [`MultiSeries::annotate`], if any.
    pub fn calendar(&self) -> Option<&Calendar> {
        self.calendar.as_ref()
    }

    /// The period label of the point in time at `index`, if a calendar is set.
    pub fn row_label(&self, index: usize) -> Option<CalendarRow> {
        self.calendar.as_ref().and_then(|c| c.label(index))
    }

    /// Replaces the variable names; see [`SeriesStore::set_names`].
    pub fn set_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), SeriesError> {
        self.store.set_names(names)
    }

    /// Looks up the column index of a variable by name.
    pub fn column_index(&self, name: &str) -> Result<usize, SeriesError> {
        self.store.column_index(name)
    }

    /// Sets the dependent variables by column index.
    ///
    /// This is a best-effort call: out-of-range indices are skipped rather than failing
    /// the whole batch, and duplicates are ignored. Without `append` the previous
    /// dependent variables are cleared first.
    pub fn set_dependent<I>(&mut self, columns: I, append: bool)
    where
        I: IntoIterator<Item = usize>,
    {
        let num_series = self.store.num_series();
        self.roles.set_dependent(columns, num_series, append);
    }

    /// Sets the dependent variables by name.
    ///
    /// Names that do not resolve are skipped. Fails with [`MissingState::NoNames`] if
    /// the series carry no names, in which case nothing changes.
    pub fn set_dependent_by_name<I, S>(&mut self, names: I, append: bool) -> Result<(), SeriesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.store.names().is_none() {
            return Err(SeriesError::State(MissingState::NoNames));
        }

        let columns: Vec<usize> = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let column = self.store.column_index(name).ok();
                if column.is_none() {
                    debug!(variable = name, "skipping unknown dependent variable");
                }
                column
            })
            .collect();

        self.set_dependent(columns, append);
        Ok(())
    }

    /// Adds a predictor entering at `lag` periods back.
    ///
    /// Fails with [`SeriesError::Range`] unless `column < num_series` and
    /// `lag < series_length`; nothing changes on failure. Without `append` the previous
    /// predictors are cleared first. Repeating an exact `(column, lag)` pair has no effect.
    pub fn set_independent(
        &mut self,
        column: usize,
        lag: usize,
        append: bool,
    ) -> Result<(), SeriesError> {
        let spec = IndependentSpec::new(column, lag);
        RoleRegistry::check_independent(spec, self.store.num_series(), self.store.series_length())?;
        self.roles.set_independent(spec, append);
        Ok(())
    }

    /// Adds a predictor by name; see [`MultiSeries::set_independent`].
    ///
    /// An unknown name is a no-op. Fails with [`MissingState::NoNames`] if the series
    /// carry no names.
    pub fn set_independent_by_name(
        &mut self,
        name: &str,
        lag: usize,
        append: bool,
    ) -> Result<(), SeriesError> {
        if self.store.names().is_none() {
            return Err(SeriesError::State(MissingState::NoNames));
        }

        match self.store.column_index(name) {
            Ok(column) => self.set_independent(column, lag, append),
            Err(_) => {
                debug!(variable = name, "skipping unknown independent variable");
                Ok(())
            }
        }
    }

    /// Sets how many past periods of the dependent variables enter as predictors.
    ///
    /// Fails with [`SeriesError::Range`] unless `lag_depth < series_length`.
    pub fn set_lag_depth(&mut self, lag_depth: usize) -> Result<(), SeriesError> {
        let series_length = self.store.series_length();
        if lag_depth >= series_length {
            return Err(SeriesError::Range {
                what: "lag depth",
                value: lag_depth,
                min: 0,
                max: series_length,
            });
        }
        self.roles.set_lag_depth(lag_depth);
        Ok(())
    }

    /// The widest window for which every configured lag stays inside the series.
    pub fn feasible_window(&self) -> FeasibleWindow {
        FeasibleWindow::resolve(&self.roles, self.store.series_length())
    }

    /// Labels every point in time with a `(period, sub-period)` pair.
    ///
    /// Labels count forward from `start` if given, otherwise backward from `end`, and
    /// from `(0, 0)` if neither is given. Fails with [`MissingState::NoData`] before any
    /// observations are loaded and with [`SeriesError::Range`] for a zero frequency or an
    /// anchor sub-period not below `frequency`.
    pub fn annotate(
        &mut self,
        frequency: usize,
        start: Option<CalendarRow>,
        end: Option<CalendarRow>,
    ) -> Result<(), SeriesError> {
        if !self.store.is_loaded() {
            return Err(SeriesError::State(MissingState::NoData));
        }

        let anchor = Anchor::from_bounds(start, end);
        let calendar = Calendar::new(frequency, anchor, self.store.series_length())?;
        debug!(frequency, ?anchor, "annotated series");
        self.calendar = Some(calendar);
        Ok(())
    }
}

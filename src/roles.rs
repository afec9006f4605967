use crate::SeriesError;
use tracing::debug;

/// An explicitly configured predictor: a variable and the lag at which it enters.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct IndependentSpec {
    /// The column index of the variable.
    pub column: usize,
    /// The number of periods the variable is shifted back.
    pub lag: usize,
}

impl IndependentSpec {
    /// Creates a predictor for `column` shifted back by `lag` periods.
    pub const fn new(column: usize, lag: usize) -> Self {
        Self { column, lag }
    }
}

/// Which variables act as targets and which as predictors.
///
/// Dependent columns keep their first-added order, which determines the column order
/// of both the dependent matrix and the lag blocks of the independent matrix. With a
/// lag depth of `k`, every dependent column also enters the independent matrix at
/// lags `1..=k`.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RoleRegistry {
    dependent: Vec<usize>,
    independent: Vec<IndependentSpec>,
    lag_depth: usize,
}

impl RoleRegistry {
    /// The dependent column indices in insertion order.
    pub fn dependent(&self) -> &[usize] {
        &self.dependent
    }

    /// The explicitly configured predictors in insertion order.
    pub fn independent(&self) -> &[IndependentSpec] {
        &self.independent
    }

    /// The number of automatic lags of the dependent variables.
    #[inline(always)]
    pub const fn lag_depth(&self) -> usize {
        self.lag_depth
    }

    /// The number of columns of the independent matrix.
    pub fn num_predictors(&self) -> usize {
        self.lag_depth * self.dependent.len() + self.independent.len()
    }

    /// The largest lag any predictor refers to.
    pub fn max_lag(&self) -> usize {
        self.independent
            .iter()
            .map(|spec| spec.lag)
            .fold(self.lag_depth, usize::max)
    }

    /// Adds dependent columns, skipping indices not below `num_series` and duplicates.
    pub(crate) fn set_dependent<I>(&mut self, columns: I, num_series: usize, append: bool)
    where
        I: IntoIterator<Item = usize>,
    {
        if !append {
            self.dependent.clear();
        }

        for column in columns {
            if column >= num_series {
                debug!(column, num_series, "skipping out-of-range dependent column");
                continue;
            }
            if !self.dependent.contains(&column) {
                self.dependent.push(column);
            }
        }
    }

    /// Adds an independent spec that has already been validated.
    pub(crate) fn set_independent(&mut self, spec: IndependentSpec, append: bool) {
        if !append {
            self.independent.clear();
        }
        if !self.independent.contains(&spec) {
            self.independent.push(spec);
        }
    }

    pub(crate) fn set_lag_depth(&mut self, lag_depth: usize) {
        self.lag_depth = lag_depth;
    }

    /// The `(column, lag)` pairs of the independent matrix, left to right.
    ///
    /// Lag blocks of the dependent columns come first, ordered by lag, followed by
    /// the explicit predictors.
    pub fn predictor_layout(&self) -> impl Iterator<Item = IndependentSpec> + '_ {
        (1..=self.lag_depth)
            .flat_map(move |lag| {
                self.dependent
                    .iter()
                    .map(move |&column| IndependentSpec::new(column, lag))
            })
            .chain(self.independent.iter().copied())
    }

    /// Validates a spec against the shape of the loaded series.
    pub(crate) fn check_independent(
        spec: IndependentSpec,
        num_series: usize,
        series_length: usize,
    ) -> Result<(), SeriesError> {
        if spec.column >= num_series {
            return Err(SeriesError::Range {
                what: "column",
                value: spec.column,
                min: 0,
                max: num_series,
            });
        }
        if spec.lag >= series_length {
            return Err(SeriesError::Range {
                what: "lag",
                value: spec.lag,
                min: 0,
                max: series_length,
            });
        }
        Ok(())
    }
}

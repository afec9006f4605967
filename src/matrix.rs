use crate::SeriesError;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

/// A row-major matrix of time-aligned values.
///
/// Rows are points in time within the requested window, columns are variables
/// (possibly lagged copies of the same variable).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignMatrix<T> {
    data: Vec<T>,
    num_rows: usize,
    num_cols: usize,
}

impl<T> DesignMatrix<T> {
    /// The number of rows, i.e. the number of points in time.
    #[inline(always)]
    pub const fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// The number of columns, i.e. the number of (lagged) variables.
    #[inline(always)]
    pub const fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// The `(rows, columns)` shape of the matrix.
    #[inline(always)]
    pub const fn shape(&self) -> (usize, usize) {
        (self.num_rows, self.num_cols)
    }

    /// Obtains the element at the specified row and column.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.num_rows || col >= self.num_cols {
            return None;
        }
        self.data.get(row * self.num_cols + col)
    }

    /// Obtains all values of one point in time.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.num_rows {
            return None;
        }
        let start = row * self.num_cols;
        Some(&self.data[start..start + self.num_cols])
    }

    /// Iterates the values of one column from top to bottom.
    pub fn column(&self, col: usize) -> Option<impl Iterator<Item = &T> + '_> {
        if col >= self.num_cols {
            return None;
        }
        Some(self.data[col..].iter().step_by(self.num_cols))
    }

    /// Converts this [`DesignMatrix`] into its row-major backing vector.
    #[inline(always)]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> From<DesignMatrix<T>> for Vec<T> {
    #[inline(always)]
    fn from(matrix: DesignMatrix<T>) -> Self {
        matrix.data
    }
}

impl<T> Deref for DesignMatrix<T> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> PartialEq<[T]> for DesignMatrix<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &[T]) -> bool {
        self.data.iter().eq(other)
    }
}

impl<S, T> PartialEq<S> for DesignMatrix<T>
where
    S: AsRef<[T]>,
    T: PartialEq,
{
    #[inline(always)]
    fn eq(&self, other: &S) -> bool {
        self.data.eq(other.as_ref())
    }
}

/// Renders the matrix as tab-separated rows, one line per point in time.
impl<T> Display for DesignMatrix<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.num_rows {
            let start = row * self.num_cols;
            for (i, value) in self.data[start..start + self.num_cols].iter().enumerate() {
                if i > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Create a design matrix of lag-aligned time series over a window.
///
/// Every source is a time series paired with the lag to apply to it. Column `c` of
/// the result holds `sources[c].0[from - lag .. to - lag]`, so that row `t` of every
/// column refers to the same point in time `from + t`. The values are copied; the
/// result never aliases the source data.
///
/// ## Arguments
/// * `sources` - The `(series, lag)` pairs, one per output column, left to right.
/// * `from` - The first point in time of the window (inclusive).
/// * `to` - The end of the window (exclusive).
///
/// ## Returns
/// A `(to - from)×sources` matrix, or [`SeriesError::Range`] if the window is empty
/// or any lagged reference would fall outside its series.
///
/// ## Example
/// ```
/// # use lagframe::lagged_columns;
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let b = [10.0, 20.0, 30.0, 40.0, 50.0];
///
/// let matrix = lagged_columns([(&a[..], 0), (&a[..], 1), (&b[..], 2)], 2, 5).unwrap();
///
/// assert_eq!(matrix.shape(), (3, 3));
/// assert_eq!(
///     matrix,
///     &[
///         3.0, 2.0, 10.0,
///         4.0, 3.0, 20.0,
///         5.0, 4.0, 30.0,
///     ]
/// );
/// ```
pub fn lagged_columns<'a, T, I>(
    sources: I,
    from: usize,
    to: usize,
) -> Result<DesignMatrix<T>, SeriesError>
where
    T: Copy + 'a,
    I: IntoIterator<Item = (&'a [T], usize)>,
{
    let sources = Vec::from_iter(sources);

    if from >= to {
        return Err(SeriesError::Range {
            what: "window start",
            value: from,
            min: 0,
            max: to,
        });
    }

    for &(series, lag) in &sources {
        if lag > from {
            return Err(SeriesError::Range {
                what: "lag",
                value: lag,
                min: 0,
                max: from + 1,
            });
        }
        if to > series.len() {
            return Err(SeriesError::Range {
                what: "window end",
                value: to,
                min: from + 1,
                max: series.len() + 1,
            });
        }
    }

    let num_rows = to - from;
    let num_cols = sources.len();
    let mut data = Vec::with_capacity(num_rows * num_cols);
    for t in from..to {
        for &(series, lag) in &sources {
            data.push(series[t - lag]);
        }
    }

    Ok(DesignMatrix {
        data,
        num_rows,
        num_cols,
    })
}

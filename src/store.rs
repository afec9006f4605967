use crate::{MissingState, SeriesError};
use tracing::debug;

/// The raw observations of several variables over the same points in time.
///
/// Observations are kept column-major: one contiguous series per variable, all of
/// the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStore<T = f64> {
    columns: Vec<Vec<T>>,
    series_length: usize,
    names: Option<Vec<String>>,
}

impl<T> Default for SeriesStore<T> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            series_length: 0,
            names: None,
        }
    }
}

impl<T: Copy> SeriesStore<T> {
    /// Loads `num_series` series from a flat column-major buffer.
    ///
    /// The buffer is split into `num_series` consecutive blocks of equal length; block `i`
    /// becomes variable `i`. Names are only kept if there is exactly one per series.
    pub fn load(
        data: &[T],
        num_series: usize,
        names: Option<&[&str]>,
    ) -> Result<Self, SeriesError> {
        if num_series == 0 || data.len() % num_series != 0 {
            return Err(SeriesError::Dimension {
                what: "data length must be a multiple of",
                expected: num_series,
                actual: data.len(),
            });
        }

        let series_length = data.len() / num_series;
        let columns = if series_length == 0 {
            vec![Vec::new(); num_series]
        } else {
            data.chunks_exact(series_length).map(<[T]>::to_vec).collect()
        };

        let names = match names {
            Some(names) if names.len() == num_series => {
                Some(names.iter().map(|n| n.to_string()).collect())
            }
            Some(names) => {
                debug!(
                    expected = num_series,
                    actual = names.len(),
                    "ignoring variable names of mismatched count"
                );
                None
            }
            None => None,
        };

        Ok(Self {
            columns,
            series_length,
            names,
        })
    }
}

impl<T> SeriesStore<T> {
    /// Determines whether observations have been loaded.
    #[inline(always)]
    pub fn is_loaded(&self) -> bool {
        !self.columns.is_empty()
    }

    /// The number of variables.
    #[inline(always)]
    pub fn num_series(&self) -> usize {
        self.columns.len()
    }

    /// The number of points in time of every variable.
    #[inline(always)]
    pub const fn series_length(&self) -> usize {
        self.series_length
    }

    /// The variable names, if any.
    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Obtains all observations of one variable.
    pub fn column(&self, index: usize) -> Option<&[T]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Obtains the observation of variable `col` at point in time `row`.
    pub fn value(&self, col: usize, row: usize) -> Option<&T> {
        self.columns.get(col).and_then(|c| c.get(row))
    }

    /// Replaces the variable names.
    pub fn set_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), SeriesError> {
        if !self.is_loaded() {
            return Err(SeriesError::State(MissingState::NoData));
        }
        if names.len() != self.num_series() {
            return Err(SeriesError::Dimension {
                what: "name count must be exactly",
                expected: self.num_series(),
                actual: names.len(),
            });
        }

        self.names = Some(names.iter().map(|n| n.as_ref().to_string()).collect());
        Ok(())
    }

    /// Looks up the column index of a variable by its name.
    pub fn column_index(&self, name: &str) -> Result<usize, SeriesError> {
        self.names
            .as_ref()
            .and_then(|names| names.iter().position(|n| n == name))
            .ok_or_else(|| SeriesError::NotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[rustfmt::skip]
    fn test_load_is_column_major() {
        let data = [
            1.0, 2.0, 3.0,
            -1.0, -2.0, -3.0,
        ];

        let store = SeriesStore::load(&data, 2, None).unwrap();

        assert!(store.is_loaded());
        assert_eq!(store.num_series(), 2);
        assert_eq!(store.series_length(), 3);
        assert_eq!(store.column(0), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(store.column(1), Some(&[-1.0, -2.0, -3.0][..]));
        assert_eq!(store.value(1, 2), Some(&-3.0));
        assert_eq!(store.value(2, 0), None);
        assert_eq!(store.names(), None);
    }

    #[test]
    fn test_load_rejects_uneven_data() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(
            SeriesStore::load(&data, 2, None),
            Err(SeriesError::Dimension {
                what: "data length must be a multiple of",
                expected: 2,
                actual: 5
            })
        );
    }

    #[test]
    fn test_load_rejects_zero_series() {
        let data = [1.0, 2.0];
        assert!(matches!(
            SeriesStore::load(&data, 0, None),
            Err(SeriesError::Dimension { .. })
        ));
    }

    #[test]
    fn test_load_ignores_mismatched_names() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let store = SeriesStore::load(&data, 2, Some(&["a"][..])).unwrap();
        assert_eq!(store.names(), None);

        let store = SeriesStore::load(&data, 2, Some(&["a", "b"][..])).unwrap();
        assert_eq!(store.names().unwrap(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_set_names() {
        let mut store = SeriesStore::<f64>::default();
        assert_eq!(
            store.set_names(&["a"]),
            Err(SeriesError::State(MissingState::NoData))
        );

        let mut store = SeriesStore::load(&[1.0, 2.0, 3.0, 4.0], 2, None).unwrap();
        assert_eq!(
            store.set_names(&["a", "b", "c"]).unwrap_err().to_string(),
            "name count must be exactly 2, got 3"
        );
        assert_eq!(store.names(), None);

        store.set_names(&["x", "y"]).unwrap();
        assert_eq!(store.column_index("y"), Ok(1));
    }

    #[test]
    fn test_column_index() {
        let store = SeriesStore::load(&[1.0, 2.0], 2, None).unwrap();
        assert_eq!(
            store.column_index("a"),
            Err(SeriesError::NotFound {
                name: "a".to_string()
            })
        );

        let store = SeriesStore::load(&[1.0, 2.0], 2, Some(&["a", "b"][..])).unwrap();
        assert_eq!(store.column_index("a"), Ok(0));
        assert!(store.column_index("c").is_err());
    }
}

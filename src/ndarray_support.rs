use crate::{DesignMatrix, MultiSeries, SeriesError};
use ndarray::prelude::*;

/// Provides the [`to_multi_series`](MultiSeriesFromArray::to_multi_series) function for
/// [`Array1`] and [`Array2`] types.
pub trait MultiSeriesFromArray<A>
where
    A: Copy,
{
    /// Create a [`MultiSeries`] from observations with time along the rows.
    ///
    /// Every column of the array is one variable; an [`Array1`] is a single variable.
    /// The values are copied regardless of the memory layout of the array.
    ///
    /// ## Example
    /// ```
    /// use lagframe::prelude::*;
    /// use ndarray::array;
    ///
    /// let data = array![
    ///     [1.0, 10.0],
    ///     [2.0, 20.0],
    ///     [3.0, 30.0],
    /// ];
    ///
    /// let mut series = data.to_multi_series(Some(&["y", "x"][..])).unwrap();
    /// series.set_dependent([0], false);
    /// series.set_independent(1, 1, false).unwrap();
    ///
    /// let x = series.build_independent(1, 3).unwrap().into_array2();
    /// assert_eq!(x, array![[10.0], [20.0]]);
    /// ```
    fn to_multi_series(&self, names: Option<&[&str]>) -> Result<MultiSeries<A>, SeriesError>;
}

impl<A> MultiSeriesFromArray<A> for Array1<A>
where
    A: Copy,
{
    fn to_multi_series(&self, names: Option<&[&str]>) -> Result<MultiSeries<A>, SeriesError> {
        let data: Vec<A> = self.iter().copied().collect();
        MultiSeries::load(&data, 1, names)
    }
}

impl<A> MultiSeriesFromArray<A> for Array2<A>
where
    A: Copy,
{
    fn to_multi_series(&self, names: Option<&[&str]>) -> Result<MultiSeries<A>, SeriesError> {
        // The transposed view iterates column by column, i.e. variable by variable.
        let data: Vec<A> = self.t().iter().copied().collect();
        MultiSeries::load(&data, self.ncols(), names)
    }
}

impl<T> DesignMatrix<T> {
    /// Converts this matrix into a `time × columns` [`Array2`].
    pub fn into_array2(self) -> Array2<T> {
        let shape = self.shape();
        Array2::from_shape_vec(shape, self.into_vec()).expect("the shape is valid")
    }

    /// Copies this matrix into a `time × columns` [`Array2`].
    pub fn to_array2(&self) -> Array2<T>
    where
        T: Clone,
    {
        Array2::from_shape_vec(self.shape(), self.to_vec()).expect("the shape is valid")
    }
}

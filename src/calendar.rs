//! Period labels for the points in time of a series.
//!
//! A frequency of `f` splits every period into `f` sub-periods, e.g. twelve months
//! per year. Labels are descriptive only; they never influence matrix construction.

use crate::SeriesError;

/// A `(period, sub-period)` label of a single point in time.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CalendarRow {
    /// The period, e.g. the year. May be negative when counting backwards.
    pub period: i64,
    /// The sub-period within the period, in `0..frequency`.
    pub sub_period: usize,
}

impl CalendarRow {
    /// Creates the label of sub-period `sub_period` within `period`.
    pub const fn new(period: i64, sub_period: usize) -> Self {
        Self { period, sub_period }
    }

    /// The number of sub-periods since `(0, 0)`, or `None` if it does not fit an `i64`.
    ///
    /// `sub_period` must be below `frequency`.
    fn linear(&self, frequency: i64) -> Option<i64> {
        self.period
            .checked_mul(frequency)?
            .checked_add(self.sub_period as i64)
    }

    fn from_linear(linear: i64, frequency: i64) -> Self {
        Self {
            period: linear.div_euclid(frequency),
            sub_period: linear.rem_euclid(frequency) as usize,
        }
    }

    /// How many consecutive sub-periods fit between this label and the `i64` bound
    /// in the given direction, this label included.
    fn room(&self, frequency: i64, forward: bool) -> usize {
        let linear = i128::from(self.period) * i128::from(frequency) + self.sub_period as i128;
        let room = if forward {
            i128::from(i64::MAX) - linear + 1
        } else {
            linear - i128::from(i64::MIN) + 1
        };
        usize::try_from(room.max(0)).unwrap_or(usize::MAX)
    }
}

impl From<(i64, usize)> for CalendarRow {
    fn from((period, sub_period): (i64, usize)) -> Self {
        Self::new(period, sub_period)
    }
}

/// Which end of the series a calendar is pinned to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Anchor {
    /// The label of the first point in time; labels count forward from it.
    Start(CalendarRow),
    /// The label of the last point in time; labels count backward from it.
    End(CalendarRow),
}

impl Anchor {
    /// Picks the anchor from optional start and end labels.
    ///
    /// A start label wins over an end label; without either, the series starts at `(0, 0)`.
    pub fn from_bounds(start: Option<CalendarRow>, end: Option<CalendarRow>) -> Self {
        match (start, end) {
            (Some(start), _) => Anchor::Start(start),
            (None, Some(end)) => Anchor::End(end),
            (None, None) => Anchor::Start(CalendarRow::new(0, 0)),
        }
    }

    fn row(&self) -> CalendarRow {
        match self {
            Anchor::Start(row) | Anchor::End(row) => *row,
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::Start(CalendarRow::new(0, 0))
    }
}

/// Maps the linear indices `0..len` of a series to period labels.
///
/// Every label of the series is representable: the first and last point in time
/// both lie within `i64` sub-periods of `(0, 0)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Calendar {
    frequency: i64,
    origin: i64,
    len: usize,
}

impl Calendar {
    /// Creates the calendar of a series of `len` points in time.
    ///
    /// Fails with [`SeriesError::Range`] if `frequency` is zero or exceeds `i64::MAX`,
    /// if the anchor's sub-period is not below `frequency`, or if the labels of the
    /// series would not fit an `i64` count of sub-periods.
    ///
    /// ## Example
    /// ```
    /// # use lagframe::{Anchor, Calendar, CalendarRow};
    /// // Quarterly data whose last observation is the second quarter of 2023.
    /// let calendar = Calendar::new(4, Anchor::End(CalendarRow::new(2023, 1)), 6).unwrap();
    ///
    /// assert_eq!(calendar.label(0), Some(CalendarRow::new(2022, 0)));
    /// assert_eq!(calendar.label(5), Some(CalendarRow::new(2023, 1)));
    /// assert_eq!(calendar.index_of(CalendarRow::new(2022, 3)), Some(3));
    /// ```
    pub fn new(frequency: usize, anchor: Anchor, len: usize) -> Result<Self, SeriesError> {
        let step = i64::try_from(frequency)
            .ok()
            .filter(|&step| step > 0)
            .ok_or(SeriesError::Range {
                what: "frequency",
                value: frequency,
                min: 1,
                max: usize::try_from(i64::MAX).unwrap_or(usize::MAX),
            })?;

        let row = anchor.row();
        if row.sub_period >= frequency {
            return Err(SeriesError::Range {
                what: "sub-period",
                value: row.sub_period,
                min: 0,
                max: frequency,
            });
        }

        let span = i64::try_from(len.saturating_sub(1)).ok();
        let origin = match anchor {
            Anchor::Start(start) => start
                .linear(step)
                .filter(|&first| span.and_then(|span| first.checked_add(span)).is_some()),
            Anchor::End(end) => end
                .linear(step)
                .and_then(|last| last.checked_sub(span?)),
        };

        let origin = origin.ok_or_else(|| SeriesError::Range {
            what: "labelled points in time",
            value: len,
            min: 0,
            max: row
                .room(step, matches!(anchor, Anchor::Start(_)))
                .saturating_add(1),
        })?;

        Ok(Self {
            frequency: step,
            origin,
            len,
        })
    }

    /// The number of sub-periods per period.
    #[inline(always)]
    pub const fn frequency(&self) -> usize {
        self.frequency as usize
    }

    /// The number of labelled points in time.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Determines whether the calendar labels no points in time.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The label of the point in time at `index`, or `None` past the end of the series.
    pub fn label(&self, index: usize) -> Option<CalendarRow> {
        if index >= self.len {
            return None;
        }
        let linear = self.origin.checked_add(i64::try_from(index).ok()?)?;
        Some(CalendarRow::from_linear(linear, self.frequency))
    }

    /// The index of the point in time labelled `row`, or `None` if the series does not cover it.
    pub fn index_of(&self, row: CalendarRow) -> Option<usize> {
        if row.sub_period >= self.frequency() {
            return None;
        }
        let offset = row.linear(self.frequency)?.checked_sub(self.origin)?;
        usize::try_from(offset).ok().filter(|&index| index < self.len)
    }

    /// All labels in order of time.
    pub fn rows(&self) -> Vec<CalendarRow> {
        (0..self.len).filter_map(|index| self.label(index)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(calendar: &Calendar) -> Vec<(i64, usize)> {
        calendar
            .rows()
            .into_iter()
            .map(|row| (row.period, row.sub_period))
            .collect()
    }

    #[test]
    #[rustfmt::skip]
    fn test_forward_rollover() {
        let calendar = Calendar::new(4, Anchor::default(), 10).unwrap();
        assert_eq!(
            pairs(&calendar),
            vec![
                (0, 0), (0, 1), (0, 2), (0, 3),
                (1, 0), (1, 1), (1, 2), (1, 3),
                (2, 0), (2, 1),
            ]
        );
    }

    #[test]
    #[rustfmt::skip]
    fn test_backward_rollover() {
        let calendar = Calendar::new(12, Anchor::End(CalendarRow::new(2000, 1)), 4).unwrap();
        assert_eq!(
            pairs(&calendar),
            vec![(1999, 10), (1999, 11), (2000, 0), (2000, 1)]
        );
    }

    #[test]
    fn test_backward_into_negative_periods() {
        let calendar = Calendar::new(2, Anchor::End(CalendarRow::new(0, 0)), 4).unwrap();
        assert_eq!(pairs(&calendar), vec![(-2, 1), (-1, 0), (-1, 1), (0, 0)]);
    }

    #[test]
    fn test_frequency_one() {
        let calendar = Calendar::new(1, Anchor::Start(CalendarRow::new(1990, 0)), 3).unwrap();
        assert_eq!(pairs(&calendar), vec![(1990, 0), (1991, 0), (1992, 0)]);
    }

    #[test]
    fn test_invalid_frequency_and_anchor() {
        assert!(matches!(
            Calendar::new(0, Anchor::default(), 3),
            Err(SeriesError::Range {
                what: "frequency",
                ..
            })
        ));
        assert!(matches!(
            Calendar::new(4, Anchor::Start(CalendarRow::new(0, 4)), 3),
            Err(SeriesError::Range {
                what: "sub-period",
                ..
            })
        ));
        assert!(Calendar::new(4, Anchor::End(CalendarRow::new(0, 7)), 3).is_err());
    }

    #[test]
    fn test_index_of() {
        let calendar = Calendar::new(4, Anchor::Start(CalendarRow::new(2010, 2)), 6).unwrap();
        assert_eq!(calendar.index_of(CalendarRow::new(2010, 2)), Some(0));
        assert_eq!(calendar.index_of(CalendarRow::new(2011, 3)), Some(5));
        assert_eq!(calendar.index_of(CalendarRow::new(2010, 1)), None);
        assert_eq!(calendar.index_of(CalendarRow::new(2012, 0)), None);
        assert_eq!(calendar.index_of(CalendarRow::new(2011, 9)), None);
        assert_eq!(calendar.label(6), None);
    }

    #[test]
    fn test_anchor_priority() {
        let start = CalendarRow::new(1, 0);
        let end = CalendarRow::new(5, 0);
        assert_eq!(Anchor::from_bounds(Some(start), Some(end)), Anchor::Start(start));
        assert_eq!(Anchor::from_bounds(None, Some(end)), Anchor::End(end));
        assert_eq!(Anchor::from_bounds(None, None), Anchor::default());
    }

    #[test]
    fn test_empty_series() {
        let calendar = Calendar::new(4, Anchor::End(CalendarRow::new(3, 3)), 0).unwrap();
        assert!(calendar.is_empty());
        assert!(calendar.rows().is_empty());
    }

    #[test]
    fn test_index_of_far_outside_is_none() {
        let calendar = Calendar::new(4, Anchor::default(), 10).unwrap();
        assert_eq!(calendar.index_of(CalendarRow::new(i64::MAX, 0)), None);
        assert_eq!(calendar.index_of(CalendarRow::new(i64::MIN, 3)), None);
    }

    #[test]
    fn test_huge_start_period_is_rejected() {
        assert!(matches!(
            Calendar::new(12, Anchor::Start(CalendarRow::new(i64::MAX / 4, 0)), 3),
            Err(SeriesError::Range {
                what: "labelled points in time",
                value: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_labels_up_to_the_last_representable_period() {
        let calendar = Calendar::new(1, Anchor::Start(CalendarRow::new(i64::MAX - 2, 0)), 3).unwrap();
        assert_eq!(calendar.label(2), Some(CalendarRow::new(i64::MAX, 0)));
        assert_eq!(calendar.index_of(CalendarRow::new(i64::MAX, 0)), Some(2));

        assert_eq!(
            Calendar::new(1, Anchor::Start(CalendarRow::new(i64::MAX - 2, 0)), 4),
            Err(SeriesError::Range {
                what: "labelled points in time",
                value: 4,
                min: 0,
                max: 4,
            })
        );
    }

    #[test]
    fn test_end_anchor_near_lowest_period() {
        let calendar = Calendar::new(1, Anchor::End(CalendarRow::new(i64::MIN + 1, 0)), 2).unwrap();
        assert_eq!(calendar.label(0), Some(CalendarRow::new(i64::MIN, 0)));

        assert!(matches!(
            Calendar::new(1, Anchor::End(CalendarRow::new(i64::MIN + 1, 0)), 3),
            Err(SeriesError::Range {
                what: "labelled points in time",
                ..
            })
        ));
    }

    #[test]
    fn test_frequency_beyond_i64_is_rejected() {
        assert!(matches!(
            Calendar::new(usize::MAX, Anchor::Start(CalendarRow::new(0, 5)), 3),
            Err(SeriesError::Range {
                what: "frequency",
                ..
            })
        ));

        let max = usize::try_from(i64::MAX).unwrap();
        let calendar = Calendar::new(max, Anchor::Start(CalendarRow::new(0, 5)), 3).unwrap();
        assert_eq!(calendar.label(0), Some(CalendarRow::new(0, 5)));
        assert_eq!(calendar.label(2), Some(CalendarRow::new(0, 7)));
    }
}

use crate::{RoleRegistry, SeriesError};

/// The widest half-open window `[min_from, max_to)` for which every lagged
/// reference of the current configuration stays inside the series.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FeasibleWindow {
    /// The earliest permitted window start.
    pub min_from: usize,
    /// The latest permitted window end (exclusive).
    pub max_to: usize,
}

impl FeasibleWindow {
    /// Resolves the feasible window of `roles` over a series of `series_length` points.
    pub fn resolve(roles: &RoleRegistry, series_length: usize) -> Self {
        Self {
            min_from: roles.max_lag(),
            max_to: series_length,
        }
    }

    /// The number of points in time in the window; zero if nothing is feasible.
    pub fn len(&self) -> usize {
        self.max_to.saturating_sub(self.min_from)
    }

    /// Determines whether no window is feasible.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks that `[from, to)` is non-empty and lies within this window.
    pub fn check(&self, from: usize, to: usize) -> Result<(), SeriesError> {
        if from < self.min_from || from >= self.max_to {
            return Err(SeriesError::Range {
                what: "window start",
                value: from,
                min: self.min_from,
                max: self.max_to,
            });
        }
        if to <= from || to > self.max_to {
            return Err(SeriesError::Range {
                what: "window end",
                value: to,
                min: from + 1,
                max: self.max_to + 1,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IndependentSpec;

    #[test]
    fn test_resolve() {
        let mut roles = RoleRegistry::default();
        assert_eq!(
            FeasibleWindow::resolve(&roles, 10),
            FeasibleWindow {
                min_from: 0,
                max_to: 10
            }
        );

        roles.set_lag_depth(2);
        roles.set_independent(IndependentSpec::new(0, 3), true);
        let window = FeasibleWindow::resolve(&roles, 10);
        assert_eq!(window.min_from, 3);
        assert_eq!(window.max_to, 10);
        assert_eq!(window.len(), 7);
        assert!(!window.is_empty());
    }

    #[test]
    fn test_check() {
        let window = FeasibleWindow {
            min_from: 2,
            max_to: 10,
        };

        assert!(window.check(2, 10).is_ok());
        assert!(window.check(5, 6).is_ok());
        assert!(window.check(1, 10).is_err());
        assert!(window.check(2, 11).is_err());
        assert!(window.check(4, 4).is_err());
        assert!(window.check(5, 4).is_err());
        assert!(window.check(10, 11).is_err());
    }
}

use serde::Serialize;

/// Aggregate statistics over all recorded amounts.
///
/// An empty data set yields zero for every field rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RainfallSummary {
    pub total: f64,
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
    pub count: usize,
}

impl RainfallSummary {
    pub fn from_amounts<I>(amounts: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut amounts = amounts.into_iter();
        let Some(first) = amounts.next() else {
            return Self::default();
        };

        let (total, highest, lowest, count) = amounts.fold(
            (first, first, first, 1usize),
            |(total, highest, lowest, count), amount| {
                (total + amount, highest.max(amount), lowest.min(amount), count + 1)
            },
        );

        Self {
            total,
            average: total / count as f64,
            highest,
            lowest,
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_all_zeros() {
        let summary = RainfallSummary::from_amounts(Vec::<f64>::new());
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.highest, 0.0);
        assert_eq!(summary.lowest, 0.0);
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn two_entries() {
        let summary = RainfallSummary::from_amounts([10.0, 20.0]);
        assert_eq!(summary.total, 30.0);
        assert_eq!(summary.average, 15.0);
        assert_eq!(summary.highest, 20.0);
        assert_eq!(summary.lowest, 10.0);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn single_entry_is_its_own_extremes() {
        let summary = RainfallSummary::from_amounts([42.5]);
        assert_eq!(summary.total, 42.5);
        assert_eq!(summary.average, 42.5);
        assert_eq!(summary.highest, 42.5);
        assert_eq!(summary.lowest, 42.5);
    }

    #[test]
    fn order_does_not_matter() {
        let summary = RainfallSummary::from_amounts([7.0, 1.5, 30.25, 0.0]);
        assert_eq!(summary.highest, 30.25);
        assert_eq!(summary.lowest, 0.0);
        assert_eq!(summary.total, 38.75);
        assert_eq!(summary.count, 4);
    }
}

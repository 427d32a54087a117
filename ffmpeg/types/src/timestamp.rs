/*!
    Timestamp type for media timing.
*/

use std::fmt;

use crate::Rational;

/**
    A timestamp in time_base units.

    Used for presentation timestamps (PTS), decode timestamps (DTS) and
    durations alike. The raw value shares its bit pattern with the media
    library, including the [`Timestamp::NONE`] sentinel for "no timestamp".
*/
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /**
        Sentinel for a missing timestamp.
    */
    pub const NONE: Self = Self(i64::MIN);

    /**
        Returns true unless this is the [`Timestamp::NONE`] sentinel.
    */
    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != i64::MIN
    }

    /**
        Converts to an `Option`, mapping the sentinel to `None`.
    */
    #[inline]
    pub const fn get(self) -> Option<i64> {
        if self.is_some() { Some(self.0) } else { None }
    }

    /**
        Adds a duration in the same time base.

        Returns `None` if either side is the sentinel.
    */
    #[inline]
    pub fn checked_add(self, duration: Timestamp) -> Option<i64> {
        Some(self.get()?.saturating_add(duration.get()?))
    }

    /**
        Convert seconds to a timestamp in the given time base.

        The tick count is `seconds * den / num`, rounded to the nearest tick.
    */
    pub fn from_seconds(seconds: f64, time_base: Rational) -> Self {
        let ticks = seconds * time_base.den as f64 / time_base.num as f64;
        Self(ticks.round() as i64)
    }

    /**
        Convert this timestamp to seconds using the given time base.
    */
    pub fn to_seconds(self, time_base: Rational) -> Option<f64> {
        self.get().map(|ticks| ticks as f64 * time_base.to_f64())
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(ticks) => write!(f, "Timestamp({ticks})"),
            None => write!(f, "Timestamp(NONE)"),
        }
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Option<i64>> for Timestamp {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::NONE, Self)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TB_1_1000: Rational = Rational { num: 1, den: 1000 };
    const TB_1_12800: Rational = Rational { num: 1, den: 12800 };
    const TB_1001_30000: Rational = Rational {
        num: 1001,
        den: 30000,
    };

    #[test]
    fn sentinel() {
        assert!(!Timestamp::NONE.is_some());
        assert_eq!(Timestamp::NONE.get(), None);
        assert_eq!(Timestamp::default(), Timestamp::NONE);
        assert_eq!(Timestamp(0).get(), Some(0));
    }

    #[test]
    fn checked_add_skips_sentinel() {
        assert_eq!(Timestamp(100).checked_add(Timestamp(40)), Some(140));
        assert_eq!(Timestamp::NONE.checked_add(Timestamp(40)), None);
        assert_eq!(Timestamp(100).checked_add(Timestamp::NONE), None);
    }

    #[test]
    fn from_seconds_uses_time_base() {
        assert_eq!(Timestamp::from_seconds(1.5, TB_1_1000), Timestamp(1500));
        assert_eq!(Timestamp::from_seconds(3.04, TB_1_12800), Timestamp(38912));
        // 1001/30000 time base: one tick per frame of 29.97 fps
        assert_eq!(Timestamp::from_seconds(1.001, TB_1001_30000), Timestamp(30));
    }

    #[test]
    fn to_seconds() {
        assert_eq!(Timestamp(2000).to_seconds(TB_1_1000), Some(2.0));
        assert_eq!(Timestamp::NONE.to_seconds(TB_1_1000), None);
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Timestamp::from(None), Timestamp::NONE);
        assert_eq!(Timestamp::from(Some(7)), Timestamp(7));
        assert_eq!(format!("{:?}", Timestamp::NONE), "Timestamp(NONE)");
    }
}

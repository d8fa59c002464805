#[derive(Clone, Copy, Debug, PartialOrd, PartialEq)]
pub struct Percent64(f64);

#[derive(thiserror::Error, Debug)]
#[error("not a valid percentage")]
pub struct PercentError;

impl Percent64 {
    pub const ZERO: Self = Percent64(0.0);

    pub fn new(float: f64) -> Result<Self, PercentError> {
        if float.is_finite() && float >= 0.0 {
            Ok(Percent64(float))
        } else {
            Err(PercentError)
        }
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }

    pub fn of(part: f64, total: f64) -> Result<Self, PercentError> {
        Self::new(100.0 * part / total)
    }

    /// Like `of`, but zero parts of zero is zero percent.
    pub fn of_or_zero(part: f64, total: f64) -> Self {
        Self::of(part, total).unwrap_or(Self::ZERO)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn divide_zero() {
        assert!(Percent64::of(5.0, 0.0).is_err());
        assert!(Percent64::of(0.0, 0.0).is_err());
        assert_eq!(Percent64::ZERO, Percent64::of_or_zero(0.0, 0.0));
    }
}

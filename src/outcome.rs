//! Per-data-point collection result.
//!
//! Every external call ends in an [`Outcome`]: either the value, or the reason it
//! could not be obtained. Aggregation decides what "no data" means for each field
//! (usually zero), and the renderer can still tell a true zero from a failed fetch.

use crate::error::Unavailable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Unavailable(Unavailable),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Unavailable(_) => None,
        }
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Self::Success(v) => Outcome::Success(v),
            Self::Unavailable(r) => Outcome::Unavailable(r.clone()),
        }
    }

    pub fn reason(&self) -> Option<&Unavailable> {
        match self {
            Self::Success(_) => None,
            Self::Unavailable(r) => Some(r),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(v) => Outcome::Success(f(v)),
            Self::Unavailable(r) => Outcome::Unavailable(r),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Self::Success(v) => f(v),
            Self::Unavailable(r) => Outcome::Unavailable(r),
        }
    }

    pub fn into_result(self) -> Result<T, Unavailable> {
        self.into()
    }
}

impl<T: Default> Outcome<T> {
    pub fn unwrap_or_default(self) -> T {
        self.ok().unwrap_or_default()
    }
}

impl<T> From<Result<T, Unavailable>> for Outcome<T> {
    fn from(r: Result<T, Unavailable>) -> Self {
        match r {
            Ok(v) => Self::Success(v),
            Err(reason) => Self::Unavailable(reason),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Unavailable> {
    fn from(o: Outcome<T>) -> Self {
        match o {
            Outcome::Success(v) => Ok(v),
            Outcome::Unavailable(reason) => Err(reason),
        }
    }
}

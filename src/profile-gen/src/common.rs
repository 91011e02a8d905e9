// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::{error, result};

/// Zero-based candidate identifier, dense in `0..num_cands`.
pub type Candidate = usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnknownModel,
    BadParameter,
    BadParameterShape,
    NoCandidates,
    BadRankMap,
    BadCounts,
    BadReference,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            UnknownModel => "unknown_model",
            BadParameter => "bad_parameter",
            BadParameterShape => "bad_parameter_shape",
            NoCandidates => "no_candidates",
            BadRankMap => "bad_rank_map",
            BadCounts => "bad_counts",
            BadReference => "bad_reference",
        };

        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller asked for something that can't be generated: unknown
    /// model, malformed parameter. Raised before any sampling.
    Configuration,
    /// A rank map or ranking multiset broke its structural invariant.
    Invariant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub details: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            details,
        }
    }

    pub fn get_details(&self) -> Option<String> {
        self.details.clone()
    }

    pub fn is_configuration(&self) -> bool {
        self.kind == ErrorKind::Configuration
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Configuration => "ConfigurationError",
            ErrorKind::Invariant => "InvariantViolation",
        };
        match self.details {
            Some(ref details) => write!(f, "{}{{{}: {}}}", kind, self.code, details),
            None => write!(f, "{}{{{}}}", kind, self.code),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

#[macro_export]
macro_rules! config_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(
            ErrorKind::Configuration,
            ErrorCode::$code,
            Some($str),
        ))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Configuration, ErrorCode::$code, None))
    }};
}

#[macro_export]
macro_rules! invariant_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(
            ErrorKind::Invariant,
            ErrorCode::$code,
            Some($str),
        ))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Invariant, ErrorCode::$code, None))
    }};
}

#[test]
fn test_error_display() {
    let err = Error::new(
        ErrorKind::Configuration,
        ErrorCode::UnknownModel,
        Some("BOGUS".to_owned()),
    );
    assert_eq!("ConfigurationError{unknown_model: BOGUS}", err.to_string());
    assert!(err.is_configuration());

    let err = Error::new(ErrorKind::Invariant, ErrorCode::BadCounts, None);
    assert_eq!("InvariantViolation{bad_counts}", err.to_string());
    assert!(!err.is_configuration());
    assert_eq!(None, err.get_details());
}

#[test]
fn test_error_macros() {
    let r: Result<()> = config_err!(BadParameter, "phi out of range".to_owned());
    let err = r.unwrap_err();
    assert_eq!(ErrorKind::Configuration, err.kind);
    assert_eq!(ErrorCode::BadParameter, err.code);

    let r: Result<()> = invariant_err!(BadRankMap);
    let err = r.unwrap_err();
    assert_eq!(ErrorKind::Invariant, err.kind);
    assert_eq!(None, err.details);
}

// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The fixed table of probability models and their default parameters.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;

use crate::common::{Error, Result};
use crate::config_err;
use crate::spatial::SpatialParams;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProbModel {
    /// Impartial culture.
    Ic,
    /// Impartial anonymous culture.
    Iac,
    Mallows,
    /// Mallows mixture over a random reference and its reversal.
    MallowsTwoRef,
    Urn,
    SinglePeaked,
    Spatial,
}

impl ProbModel {
    pub const ALL: [ProbModel; 7] = [
        ProbModel::Ic,
        ProbModel::Iac,
        ProbModel::Mallows,
        ProbModel::MallowsTwoRef,
        ProbModel::Urn,
        ProbModel::SinglePeaked,
        ProbModel::Spatial,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProbModel::Ic => "IC",
            ProbModel::Iac => "IAC",
            ProbModel::Mallows => "MALLOWS",
            ProbModel::MallowsTwoRef => "MALLOWS_2REF",
            ProbModel::Urn => "URN",
            ProbModel::SinglePeaked => "SinglePeaked",
            ProbModel::Spatial => "SPATIAL",
        }
    }

    pub fn entry(&self) -> &'static ModelEntry {
        &REGISTRY[self]
    }
}

impl fmt::Display for ProbModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ProbModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match BY_NAME.get(s) {
            Some(model) => Ok(*model),
            None => config_err!(UnknownModel, format!("no probability model named '{s}'")),
        }
    }
}

/// A model parameter as supplied by a caller or the default table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ModelParam {
    None,
    Int(u64),
    Float(f64),
    Spatial { num_dim: usize, beta: f64 },
}

impl From<u64> for ModelParam {
    fn from(n: u64) -> Self {
        ModelParam::Int(n)
    }
}

impl From<f64> for ModelParam {
    fn from(x: f64) -> Self {
        ModelParam::Float(x)
    }
}

impl From<(usize, f64)> for ModelParam {
    fn from((num_dim, beta): (usize, f64)) -> Self {
        ModelParam::Spatial { num_dim, beta }
    }
}

/// What a model's parameter resolves to once its shape has been checked.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Routine {
    Urn { replace: u64 },
    Mallows { phi: f64 },
    MallowsTwoRef { phi: f64 },
    SinglePeaked,
    Spatial(SpatialParams),
}

pub struct ModelEntry {
    pub model: ProbModel,
    pub default_param: ModelParam,
    resolve: fn(&ModelParam) -> Result<Routine>,
}

impl ModelEntry {
    /// Checks `param` (or the default when `None`) and binds it to a routine.
    pub fn routine(&self, param: Option<&ModelParam>) -> Result<Routine> {
        (self.resolve)(param.unwrap_or(&self.default_param))
    }
}

fn replace_count(param: &ModelParam) -> Result<u64> {
    match *param {
        ModelParam::Int(n) => Ok(n),
        // u64::MAX as f64 rounds up to 2^64, which is already out of range
        ModelParam::Float(x) if x >= 0.0 && x < u64::MAX as f64 && x.fract() == 0.0 => {
            Ok(x as u64)
        }
        ModelParam::Float(x) => config_err!(
            BadParameter,
            format!("urn replacement must be a non-negative integer, got {x}")
        ),
        _ => config_err!(
            BadParameterShape,
            format!("urn replacement expects a number, got {param:?}")
        ),
    }
}

fn dispersion(param: &ModelParam) -> Result<f64> {
    let phi = match *param {
        ModelParam::Float(x) => x,
        ModelParam::Int(n) => n as f64,
        _ => {
            return config_err!(
                BadParameterShape,
                format!("mallows dispersion expects a number, got {param:?}")
            );
        }
    };
    if !(0.0..=1.0).contains(&phi) {
        return config_err!(BadParameter, format!("dispersion {phi} outside [0, 1]"));
    }
    Ok(phi)
}

fn resolve_urn(param: &ModelParam) -> Result<Routine> {
    Ok(Routine::Urn {
        replace: replace_count(param)?,
    })
}

fn resolve_mallows(param: &ModelParam) -> Result<Routine> {
    Ok(Routine::Mallows {
        phi: dispersion(param)?,
    })
}

fn resolve_mallows_two_ref(param: &ModelParam) -> Result<Routine> {
    Ok(Routine::MallowsTwoRef {
        phi: dispersion(param)?,
    })
}

fn resolve_single_peaked(param: &ModelParam) -> Result<Routine> {
    if *param != ModelParam::None {
        tracing::warn!(?param, "single-peaked model takes no parameter; ignoring it");
    }
    Ok(Routine::SinglePeaked)
}

fn resolve_spatial(param: &ModelParam) -> Result<Routine> {
    match *param {
        ModelParam::Spatial { num_dim, beta } => {
            if !(0.0..=1.0).contains(&beta) {
                return config_err!(BadParameter, format!("spatial beta {beta} outside [0, 1]"));
            }
            Ok(Routine::Spatial(SpatialParams { num_dim, beta }))
        }
        _ => config_err!(
            BadParameterShape,
            format!("spatial model expects (num_dim, beta), got {param:?}")
        ),
    }
}

lazy_static! {
    static ref REGISTRY: HashMap<ProbModel, ModelEntry> = {
        let entries = [
            (ProbModel::Ic, ModelParam::Int(0), resolve_urn as fn(&ModelParam) -> Result<Routine>),
            (ProbModel::Iac, ModelParam::Int(1), resolve_urn),
            (ProbModel::Mallows, ModelParam::Float(0.8), resolve_mallows),
            (ProbModel::MallowsTwoRef, ModelParam::Float(0.8), resolve_mallows_two_ref),
            (ProbModel::Urn, ModelParam::Int(10), resolve_urn),
            (ProbModel::SinglePeaked, ModelParam::None, resolve_single_peaked),
            (
                ProbModel::Spatial,
                ModelParam::Spatial {
                    num_dim: 3,
                    beta: 1.0,
                },
                resolve_spatial,
            ),
        ];
        entries
            .into_iter()
            .map(|(model, default_param, resolve)| {
                (
                    model,
                    ModelEntry {
                        model,
                        default_param,
                        resolve,
                    },
                )
            })
            .collect()
    };
    static ref BY_NAME: HashMap<&'static str, ProbModel> =
        ProbModel::ALL.iter().map(|m| (m.name(), *m)).collect();
}

/// Looks a model up by its registry name.
pub fn lookup(name: &str) -> Result<&'static ModelEntry> {
    let model: ProbModel = name.parse()?;
    Ok(model.entry())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ErrorCode, ErrorKind};

    #[test]
    fn test_names_round_trip() {
        for model in ProbModel::ALL.iter() {
            assert_eq!(*model, model.name().parse::<ProbModel>().unwrap());
            assert_eq!(model.name(), model.to_string());
            assert_eq!(*model, model.entry().model);
        }
    }

    #[test]
    fn test_unknown_model() {
        let err = lookup("BOGUS").err().unwrap();
        assert_eq!(ErrorKind::Configuration, err.kind);
        assert_eq!(ErrorCode::UnknownModel, err.code);
        // names are case sensitive
        assert!(lookup("ic").is_err());
        assert!(lookup("SINGLEPEAKED").is_err());
    }

    #[test]
    fn test_default_routines() {
        let routine = |name: &str| lookup(name).unwrap().routine(None).unwrap();
        assert_eq!(Routine::Urn { replace: 0 }, routine("IC"));
        assert_eq!(Routine::Urn { replace: 1 }, routine("IAC"));
        assert_eq!(Routine::Urn { replace: 10 }, routine("URN"));
        assert_eq!(Routine::Mallows { phi: 0.8 }, routine("MALLOWS"));
        assert_eq!(Routine::MallowsTwoRef { phi: 0.8 }, routine("MALLOWS_2REF"));
        assert_eq!(Routine::SinglePeaked, routine("SinglePeaked"));
        assert_eq!(
            Routine::Spatial(SpatialParams {
                num_dim: 3,
                beta: 1.0
            }),
            routine("SPATIAL")
        );
    }

    #[test]
    fn test_override_takes_precedence() {
        let entry = lookup("URN").unwrap();
        assert_eq!(
            Routine::Urn { replace: 3 },
            entry.routine(Some(&ModelParam::Int(3))).unwrap()
        );
        assert_eq!(
            Routine::Urn { replace: 4 },
            entry.routine(Some(&ModelParam::Float(4.0))).unwrap()
        );

        let entry = lookup("MALLOWS").unwrap();
        assert_eq!(
            Routine::Mallows { phi: 1.0 },
            entry.routine(Some(&ModelParam::Int(1))).unwrap()
        );

        let entry = lookup("SPATIAL").unwrap();
        assert_eq!(
            Routine::Spatial(SpatialParams {
                num_dim: 2,
                beta: 0.0
            }),
            entry.routine(Some(&(2usize, 0.0).into())).unwrap()
        );
    }

    #[test]
    fn test_malformed_parameters() {
        let code = |name: &str, param: ModelParam| {
            let err = lookup(name).unwrap().routine(Some(&param)).unwrap_err();
            assert_eq!(ErrorKind::Configuration, err.kind);
            err.code
        };
        assert_eq!(ErrorCode::BadParameterShape, code("SPATIAL", ModelParam::Float(1.0)));
        assert_eq!(ErrorCode::BadParameterShape, code("SPATIAL", ModelParam::None));
        assert_eq!(
            ErrorCode::BadParameter,
            code(
                "SPATIAL",
                ModelParam::Spatial {
                    num_dim: 2,
                    beta: 1.5
                }
            )
        );
        assert_eq!(ErrorCode::BadParameter, code("URN", ModelParam::Float(2.5)));
        assert_eq!(ErrorCode::BadParameter, code("IC", ModelParam::Float(-1.0)));
        assert_eq!(ErrorCode::BadParameter, code("URN", ModelParam::Float(1e30)));
        assert_eq!(ErrorCode::BadParameter, code("URN", ModelParam::Float(f64::INFINITY)));
        assert_eq!(ErrorCode::BadParameter, code("URN", ModelParam::Float(f64::NAN)));
        assert_eq!(ErrorCode::BadParameterShape, code("URN", (3usize, 1.0).into()));
        assert_eq!(ErrorCode::BadParameter, code("MALLOWS", ModelParam::Float(1.2)));
        assert_eq!(ErrorCode::BadParameter, code("MALLOWS_2REF", ModelParam::Int(2)));
        assert_eq!(ErrorCode::BadParameterShape, code("MALLOWS", ModelParam::None));
    }

    #[test]
    fn test_single_peaked_ignores_parameter() {
        let entry = lookup("SinglePeaked").unwrap();
        assert_eq!(
            Routine::SinglePeaked,
            entry.routine(Some(&ModelParam::Float(0.3))).unwrap()
        );
    }
}

//! The operation dispatcher
//!
//! [`Dispatcher`] intercepts generic numeric-function invocations over
//! uncertainty operands (possibly mixed with plain values) and routes them
//! through the rule registry:
//!
//! 1. reject every invocation mode except a direct call
//! 2. collect the distinct uncertainty-capable operand types; dispatch
//!    must resolve to a single consistent path or fail explicitly
//! 3. look the operation up; absence is the "not implemented" signal
//! 4. run the rule over the separated nominal/error argument lists and
//!    reassemble an uncertainty value

use crate::error::{Error, Result};
use crate::registry::{Registry, Rule};
use std::any::TypeId;
use std::collections::BTreeSet;
use uncert_core::Magnitude;
use uncert_value::{Operand, Uncertainty};

/// How a ufunc-style operation was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMode {
    /// Direct elementwise call; the only mode that propagates uncertainty.
    Call,
    /// Reduction over an axis.
    Reduce,
    /// Cumulative application.
    Accumulate,
    /// Reduction at specified slices.
    ReduceAt,
    /// Outer product application.
    Outer,
}

/// Keyword-style arguments consumed by structural rules.
#[derive(Debug, Clone)]
pub struct Params<E> {
    /// Target shape for `reshape`.
    pub shape: Option<Vec<usize>>,
    /// Lower bound for `clip`.
    pub lo: Option<E>,
    /// Upper bound for `clip`.
    pub hi: Option<E>,
}

impl<E> Default for Params<E> {
    fn default() -> Self {
        Self {
            shape: None,
            lo: None,
            hi: None,
        }
    }
}

impl<E> Params<E> {
    /// Params carrying a reshape target.
    pub fn reshape(shape: &[usize]) -> Self {
        Self {
            shape: Some(shape.to_vec()),
            ..Self::default()
        }
    }

    /// Params carrying clip bounds.
    pub fn clip(lo: Option<E>, hi: Option<E>) -> Self {
        Self {
            shape: None,
            lo,
            hi,
        }
    }
}

/// Routes operations over uncertainty operands through a borrowed registry.
pub struct Dispatcher<'r, S: Magnitude> {
    registry: &'r Registry<S>,
}

impl<'r, S: Magnitude> Dispatcher<'r, S> {
    /// Create a dispatcher over a registry built at startup.
    pub fn new(registry: &'r Registry<S>) -> Self {
        Self { registry }
    }

    /// Dispatch a direct call with default parameters.
    pub fn call(&self, op: &str, inputs: &[Operand<S>]) -> Result<Uncertainty<S>> {
        self.apply(op, CallMode::Call, inputs, &Params::default())
    }

    /// Dispatch an operation.
    ///
    /// Unregistered operations are unsupported by design and surface as
    /// [`Error::NotImplemented`]: approximating them by silently dropping
    /// the uncertainty would be worse than refusing.
    pub fn apply(
        &self,
        op: &str,
        mode: CallMode,
        inputs: &[Operand<S>],
        params: &Params<S::Elem>,
    ) -> Result<Uncertainty<S>> {
        if mode != CallMode::Call {
            return Err(Error::UnsupportedBroadcastMode { mode });
        }

        let capable: BTreeSet<TypeId> = inputs.iter().filter_map(capability).collect();
        if capable.len() > 1 {
            return Err(Error::AmbiguousTypes {
                count: capable.len(),
            });
        }

        let rule = self
            .registry
            .rule(op)
            .ok_or_else(|| Error::not_implemented(op))?;

        if inputs.len() != rule.arity() {
            return Err(Error::arity_mismatch(op, rule.arity(), inputs.len()));
        }

        log::trace!("dispatching '{}' over {} operand(s)", op, inputs.len());

        match rule {
            Rule::Closed { run, .. } => {
                let noms: Vec<S> = inputs.iter().map(|o| o.nominal().clone()).collect();
                let errs: Vec<S> = inputs.iter().map(|o| o.error()).collect();
                let (nom, err) = run(&noms, &errs)?;
                Ok(Uncertainty::new(nom, err)?)
            }
            Rule::PassThrough(run) => {
                let input = &inputs[0];
                let nom = run(input.nominal(), params)?;
                let err = run(&input.error(), params)?;
                Ok(Uncertainty::new(nom, err)?)
            }
        }
    }
}

/// The uncertainty-capable type of an operand, if it has one.
fn capability<S: Magnitude>(operand: &Operand<S>) -> Option<TypeId> {
    match operand {
        Operand::Uncertain(_) => Some(TypeId::of::<Uncertainty<S>>()),
        Operand::Exact(_) => None,
    }
}

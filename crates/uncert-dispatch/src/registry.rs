//! Propagation-rule registry
//!
//! The registry is the table of operations the dispatcher understands. It
//! is built once at startup ([`Registry::with_defaults`]) and then passed
//! by reference into [`crate::Dispatcher`]; there is no ambient global
//! state. Operations absent from the table are unsupported by design:
//! silently dropping uncertainty for an unregistered operation would be
//! worse than refusing.
//!
//! Rules come in the two categories the engine distinguishes:
//!
//! - **closed-form** rules compute `(nominal, error)` from the separated
//!   nominal-only and error-only argument lists: the binary arithmetic
//!   laws plus first-order unary rules `err = |f'(x)| * ex`
//! - **pass-through** rules apply one component function to the nominal
//!   and error buffers independently (structural operations)

use crate::dispatcher::Params;
use crate::error::{Error, Result};
use num_traits::{Float, FromPrimitive, Zero};
use std::collections::BTreeMap;
use uncert_core::Magnitude;
use uncert_value::{laws, Operand, Uncertainty};

/// Closed-form propagation: separated nominal/error argument lists in,
/// nominal/error pair out.
pub type ClosedFn<S> = Box<dyn Fn(&[S], &[S]) -> Result<(S, S)> + Send + Sync>;

/// Component function applied independently to nominal and error buffers.
pub type ComponentFn<S> =
    Box<dyn Fn(&S, &Params<<S as Magnitude>::Elem>) -> Result<S> + Send + Sync>;

/// A registered propagation rule.
pub enum Rule<S: Magnitude> {
    /// Closed-form propagation with a fixed operand count.
    Closed { arity: usize, run: ClosedFn<S> },
    /// Pass-through: the same function transforms both components.
    PassThrough(ComponentFn<S>),
}

impl<S: Magnitude> Rule<S> {
    /// Build a closed-form rule.
    ///
    /// The dispatcher validates the operand count against `arity` before
    /// invoking `run`, so the closure may index its argument slices freely.
    pub fn closed<F>(arity: usize, run: F) -> Self
    where
        F: Fn(&[S], &[S]) -> Result<(S, S)> + Send + Sync + 'static,
    {
        Rule::Closed {
            arity,
            run: Box::new(run),
        }
    }

    /// Build a pass-through rule.
    pub fn pass_through<F>(run: F) -> Self
    where
        F: Fn(&S, &Params<S::Elem>) -> Result<S> + Send + Sync + 'static,
    {
        Rule::PassThrough(Box::new(run))
    }

    /// Operand count this rule expects.
    pub fn arity(&self) -> usize {
        match self {
            Rule::Closed { arity, .. } => *arity,
            Rule::PassThrough(_) => 1,
        }
    }
}

/// Wrap one of the binary propagation laws as a closed rule.
fn binary<S: Magnitude>(
    law: fn(&Uncertainty<S>, &Operand<S>) -> uncert_core::Result<Uncertainty<S>>,
) -> Rule<S> {
    Rule::closed(2, move |noms: &[S], errs: &[S]| {
        let lhs = Uncertainty::new(noms[0].clone(), errs[0].clone())?;
        let rhs = Operand::Uncertain(Uncertainty::new(noms[1].clone(), errs[1].clone())?);
        Ok(law(&lhs, &rhs)?.into_parts())
    })
}

/// First-order unary rule: `err = |f'(x)| * ex` elementwise.
fn unary<S, F, D>(f: F, df: D) -> Rule<S>
where
    S: Magnitude,
    F: Fn(S::Elem) -> S::Elem + Send + Sync + 'static,
    D: Fn(S::Elem) -> S::Elem + Send + Sync + 'static,
{
    Rule::closed(1, move |noms: &[S], errs: &[S]| {
        let nom = noms[0].map(&f);
        let err = errs[0].zip_with(&noms[0], |e, x| (df(x) * e).abs())?;
        Ok((nom, err))
    })
}

/// Unary rule whose nominal transform leaves the error untouched.
fn unary_keep_error<S, F>(f: F) -> Rule<S>
where
    S: Magnitude,
    F: Fn(S::Elem) -> S::Elem + Send + Sync + 'static,
{
    Rule::closed(1, move |noms: &[S], errs: &[S]| {
        Ok((noms[0].map(&f), errs[0].clone()))
    })
}

/// Table of propagation rules keyed by operation identifier.
pub struct Registry<S: Magnitude> {
    rules: BTreeMap<&'static str, Rule<S>>,
}

impl<S: Magnitude> Default for Registry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Magnitude> Registry<S> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// The default rule table: binary arithmetic, first-order unary rules,
    /// and structural pass-throughs.
    pub fn with_defaults() -> Self {
        let mut reg = Self::new();

        // binary arithmetic
        reg.register("add", binary(laws::add));
        reg.register("subtract", binary(laws::sub));
        reg.register("multiply", binary(laws::mul));
        reg.register("divide", binary(laws::div));
        reg.register("true_divide", binary(laws::div));
        reg.register("floor_divide", binary(laws::floor_div));
        reg.register("remainder", binary(laws::rem));
        reg.register("power", binary(laws::pow));

        // unary, error unchanged
        reg.register("negative", unary_keep_error(|x: S::Elem| -x));
        reg.register("absolute", unary_keep_error(|x: S::Elem| x.abs()));
        reg.register("rint", unary_keep_error(|x: S::Elem| x.round()));

        // unary, first-order
        let two = S::Elem::from_f64(2.0).expect("element type represents small integers");
        let ln2 = S::Elem::from_f64(std::f64::consts::LN_2).expect("element type represents ln 2");
        let ln10 =
            S::Elem::from_f64(std::f64::consts::LN_10).expect("element type represents ln 10");
        reg.register("sqrt", unary(|x: S::Elem| x.sqrt(), move |x: S::Elem| (two * x.sqrt()).recip()));
        reg.register("square", unary(|x: S::Elem| x * x, move |x: S::Elem| two * x));
        reg.register("exp", unary(|x: S::Elem| x.exp(), |x: S::Elem| x.exp()));
        reg.register("log", unary(|x: S::Elem| x.ln(), |x: S::Elem| x.recip()));
        reg.register("log2", unary(|x: S::Elem| x.log2(), move |x: S::Elem| (x * ln2).recip()));
        reg.register("log10", unary(|x: S::Elem| x.log10(), move |x: S::Elem| (x * ln10).recip()));
        reg.register("sin", unary(|x: S::Elem| x.sin(), |x: S::Elem| x.cos()));
        reg.register("cos", unary(|x: S::Elem| x.cos(), |x: S::Elem| -x.sin()));
        reg.register("tan", unary(|x: S::Elem| x.tan(), |x: S::Elem| {
            let c = x.cos();
            (c * c).recip()
        }));

        // structural pass-throughs
        reg.register("positive", Rule::pass_through(|s: &S, _p: &Params<S::Elem>| Ok(s.clone())));
        reg.register("conjugate", Rule::pass_through(|s: &S, _p: &Params<S::Elem>| Ok(s.clone())));
        reg.register("real", Rule::pass_through(|s: &S, _p: &Params<S::Elem>| Ok(s.real())));
        reg.register("imag", Rule::pass_through(|s: &S, _p: &Params<S::Elem>| Ok(s.imag())));
        reg.register(
            "transpose",
            Rule::pass_through(|s: &S, _p: &Params<S::Elem>| Ok(s.transposed())),
        );
        reg.register(
            "ravel",
            Rule::pass_through(|s: &S, _p: &Params<S::Elem>| {
                let mut out = s.clone();
                let n = out.size();
                out.set_shape(&[n])?;
                Ok(out)
            }),
        );
        reg.register(
            "reshape",
            Rule::pass_through(|s: &S, p: &Params<S::Elem>| {
                let shape = p
                    .shape
                    .as_deref()
                    .ok_or(Error::MissingParam { name: "shape" })?;
                let mut out = s.clone();
                out.set_shape(shape)?;
                Ok(out)
            }),
        );
        reg.register(
            "clip",
            Rule::pass_through(|s: &S, p: &Params<S::Elem>| Ok(s.clip(p.lo, p.hi))),
        );

        reg
    }

    /// Register (or replace) a rule under `name`.
    pub fn register(&mut self, name: &'static str, rule: Rule<S>) {
        self.rules.insert(name, rule);
    }

    /// Look up a rule, `None` if unregistered.
    pub fn rule(&self, name: &str) -> Option<&Rule<S>> {
        self.rules.get(name)
    }

    /// Whether an operation is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered operation identifiers, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }

    /// Forward a method name to the nominal component only.
    ///
    /// This is the enumerated capability table behind attribute-style
    /// access: exactly the registered unary closed-form rules resolve, and
    /// everything else (array-protocol internals in particular) reports
    /// [`Error::AttributeUnavailable`]. The error channel is not consulted
    /// and not produced on this path.
    pub fn forward(&self, name: &str, value: &Uncertainty<S>) -> Result<S> {
        if name.starts_with("__array_") {
            return Err(Error::attribute_unavailable(name));
        }
        match self.rules.get(name) {
            Some(Rule::Closed { arity: 1, run }) => {
                let zero = value.value().full_like(S::Elem::zero());
                let (nom, _err) =
                    run(std::slice::from_ref(value.value()), std::slice::from_ref(&zero))?;
                Ok(nom)
            }
            _ => Err(Error::attribute_unavailable(name)),
        }
    }
}

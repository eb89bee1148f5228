//! Dense n-dimensional storage backed by `ndarray`
//!
//! Dynamic-dimension arrays (`ArrayD`) are the array-protocol provider:
//! broadcasting comes from `ndarray`'s own broadcast machinery, leading-axis
//! indexing maps to `index_axis`, and reshape is a flat copy so it never
//! depends on the memory order of the source.

use crate::element::Element;
use crate::error::{Error, Result};
use crate::magnitude::{clip_elem, Key, Magnitude};
use ndarray::{ArrayD, Axis, IxDyn, Zip};
use std::collections::HashMap;

impl<F: Element> Magnitude for ArrayD<F> {
    type Elem = F;

    const ENUMERABLE: bool = true;

    fn shape(&self) -> &[usize] {
        ArrayD::shape(self)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn splat(v: F) -> Self {
        ArrayD::from_elem(IxDyn(&[]), v)
    }

    fn full_like(&self, v: F) -> Self {
        ArrayD::from_elem(self.raw_dim(), v)
    }

    fn map<G>(&self, f: G) -> Self
    where
        G: Fn(F) -> F,
    {
        self.mapv(f)
    }

    fn zip_with<G>(&self, other: &Self, f: G) -> Result<Self>
    where
        G: Fn(F, F) -> F,
    {
        if ArrayD::shape(self) == ArrayD::shape(other) {
            Ok(Zip::from(self).and(other).map_collect(|&a, &b| f(a, b)))
        } else if let Some(rhs) = other.broadcast(self.raw_dim()) {
            Ok(Zip::from(self).and(rhs).map_collect(|&a, &b| f(a, b)))
        } else if let Some(lhs) = self.broadcast(other.raw_dim()) {
            Ok(Zip::from(lhs).and(other).map_collect(|&a, &b| f(a, b)))
        } else {
            Err(Error::broadcast(ArrayD::shape(self), ArrayD::shape(other)))
        }
    }

    fn any<G>(&self, pred: G) -> bool
    where
        G: Fn(F) -> bool,
    {
        self.iter().any(|&x| pred(x))
    }

    fn as_scalar(&self) -> Option<F> {
        if self.ndim() == 0 {
            self.first().copied()
        } else {
            None
        }
    }

    fn leading_len(&self) -> Option<usize> {
        if self.ndim() == 0 {
            None
        } else {
            Some(self.len_of(Axis(0)))
        }
    }

    fn get(&self, key: &Key) -> Result<Self> {
        match key {
            Key::Axis(i) => {
                let len = self
                    .leading_len()
                    .ok_or_else(|| Error::indexing_unsupported(key, "zero-dimensional"))?;
                if *i >= len {
                    return Err(Error::index_out_of_bounds(*i, len));
                }
                Ok(self.index_axis(Axis(0), *i).to_owned())
            }
            Key::At(idx) => {
                let v = ArrayD::get(self, idx.as_slice())
                    .copied()
                    .ok_or_else(|| Error::indexing_unsupported(key, "dense"))?;
                Ok(ndarray::arr0(v).into_dyn())
            }
        }
    }

    fn set(&mut self, key: &Key, value: &Self) -> Result<()> {
        match key {
            Key::Axis(i) => {
                let len = self
                    .leading_len()
                    .ok_or_else(|| Error::indexing_unsupported(key, "zero-dimensional"))?;
                if *i >= len {
                    return Err(Error::index_out_of_bounds(*i, len));
                }
                let mut target = self.index_axis_mut(Axis(0), *i);
                if value.broadcast(target.raw_dim()).is_none() {
                    return Err(Error::broadcast(target.shape(), ArrayD::shape(value)));
                }
                target.assign(value);
                Ok(())
            }
            Key::At(idx) => {
                let v = value
                    .as_scalar()
                    .ok_or_else(|| Error::type_mismatch("a scalar value", "an array value"))?;
                let slot = self
                    .get_mut(idx.as_slice())
                    .ok_or_else(|| Error::indexing_unsupported(key, "dense"))?;
                *slot = v;
                Ok(())
            }
        }
    }

    fn set_shape(&mut self, shape: &[usize]) -> Result<()> {
        let count: usize = shape.iter().product();
        if count != self.len() {
            return Err(Error::shape_mismatch(ArrayD::shape(self), shape));
        }
        let flat: Vec<F> = self.iter().copied().collect();
        *self = ArrayD::from_shape_vec(IxDyn(shape), flat)
            .map_err(|e| Error::Other(anyhow::Error::new(e)))?;
        Ok(())
    }

    fn transposed(&self) -> Self {
        self.t().to_owned()
    }

    fn fill(&mut self, v: F) {
        ArrayD::fill(self, v)
    }

    fn put(&mut self, indices: &[usize], values: &Self) -> Result<()> {
        if indices.is_empty() {
            return Ok(());
        }
        let vals = values.to_flat_vec();
        if vals.is_empty() {
            return Err(Error::type_mismatch(
                "at least one replacement value",
                "an empty value set",
            ));
        }
        let len = self.len();
        let mut targets = HashMap::new();
        for (k, &ix) in indices.iter().enumerate() {
            if ix >= len {
                return Err(Error::index_out_of_bounds(ix, len));
            }
            targets.insert(ix, vals[k % vals.len()]);
        }
        for (pos, elem) in self.iter_mut().enumerate() {
            if let Some(v) = targets.get(&pos) {
                *elem = *v;
            }
        }
        Ok(())
    }

    fn clip(&self, lo: Option<F>, hi: Option<F>) -> Self {
        self.mapv(|x| clip_elem(x, lo, hi))
    }

    fn to_flat_vec(&self) -> Vec<F> {
        self.iter().copied().collect()
    }

    fn assign_from(&mut self, src: &Self) {
        self.assign(src);
    }
}

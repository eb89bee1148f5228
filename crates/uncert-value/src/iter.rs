//! Leading-axis iteration
//!
//! Iterating an array-backed value yields one value per leading-axis
//! element, pairing the corresponding nominal/error subsets. Iteration is
//! restartable (each call to [`Uncertainty::iter`] starts fresh) and
//! bounded by the leading-axis length.

use crate::uncertainty::Uncertainty;
use uncert_core::{Error, Key, Magnitude, Result};

/// Iterator over the leading axis of an uncertainty value.
#[derive(Debug)]
pub struct UncertaintyIter<'a, S: Magnitude> {
    value: &'a Uncertainty<S>,
    index: usize,
    len: usize,
}

impl<S: Magnitude> Iterator for UncertaintyIter<'_, S> {
    type Item = Uncertainty<S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let item = self.value.get(&Key::Axis(self.index)).ok();
        self.index += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl<S: Magnitude> ExactSizeIterator for UncertaintyIter<'_, S> {}

impl<S: Magnitude> Uncertainty<S> {
    /// Iterate over the leading axis.
    ///
    /// Scalar-backed values have no leading axis and report
    /// [`Error::IndexingUnsupported`].
    pub fn iter(&self) -> Result<UncertaintyIter<'_, S>> {
        let len = self
            .leading_len()
            .ok_or_else(|| Error::indexing_unsupported("leading axis", "scalar"))?;
        Ok(UncertaintyIter {
            value: self,
            index: 0,
            len,
        })
    }
}

//! Two-to-one compression contract used to build and verify trees.

use std::fmt;
use std::marker::PhantomData;

use num_traits::Zero;

/// A pure, deterministic two-to-one compression function over a fixed domain.
///
/// The same instance must be used for construction, proof derivation and
/// verification. Mixing instances is not detected: it only shows up as
/// proofs that fail to verify.
pub trait HashOracle: Sync {
    /// Domain element. `zero()` is the canonical padding value.
    type Element: Clone + PartialEq + fmt::Debug + Zero + Send + Sync;

    /// Compress `left` and `right` into a single element. Operand order matters.
    fn compress(&self, left: &Self::Element, right: &Self::Element) -> Self::Element;

    /// Right operand used for the unpaired last node of an odd-length layer.
    fn padding(&self) -> Self::Element {
        Self::Element::zero()
    }
}

/// Adapter turning a closure `(left, right) -> parent` into a `HashOracle`.
pub struct FnOracle<E, F> {
    compress: F,
    _element: PhantomData<fn() -> E>,
}

impl<E, F> FnOracle<E, F>
where
    F: Fn(&E, &E) -> E,
{
    pub fn new(compress: F) -> Self {
        Self {
            compress,
            _element: PhantomData,
        }
    }
}

impl<E, F> HashOracle for FnOracle<E, F>
where
    E: Clone + PartialEq + fmt::Debug + Zero + Send + Sync,
    F: Fn(&E, &E) -> E + Sync,
{
    type Element = E;

    fn compress(&self, left: &E, right: &E) -> E {
        (self.compress)(left, right)
    }
}

impl<E, F> fmt::Debug for FnOracle<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOracle").finish_non_exhaustive()
    }
}

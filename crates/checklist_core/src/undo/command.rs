//! Reversible command contract.

/// A reversible unit of mutation over some target state.
///
/// Implementations capture whatever before/after values they need at build
/// time, so `reverse` restores the exact prior state regardless of what ran
/// in between.
pub trait Command {
    type Target: ?Sized;

    fn forward(&self, target: &mut Self::Target);

    fn reverse(&self, target: &mut Self::Target);
}

//! Scaler trait defining the common interface for all transforms.

use crate::error::Result;

/// Configuration carried by a [`Scaler`].
///
/// `Default` supplies the declared defaults. `Overrides` is a partial
/// version of the config where every field is optional; merging produces a
/// new config and leaves `self` untouched.
pub trait ScalerConfig: Clone + Default {
    /// Partial configuration used at call time.
    type Overrides: Default;

    /// Layer `overrides` on top of `self`.
    fn merge(&self, overrides: &Self::Overrides) -> Self;

    /// Reject out-of-range values.
    fn validate(&self) -> Result<()>;
}

/// Common interface for configurable transforms.
///
/// A scaler holds its configuration; `call` runs with it, `call_with` runs
/// with per-call overrides merged over it. Neither mutates the scaler.
pub trait Scaler {
    /// Input data type.
    type Input;
    /// Output data type.
    type Output;
    /// Configuration type.
    type Config: ScalerConfig;

    /// The configuration stored on this instance.
    fn config(&self) -> &Self::Config;

    /// Run the transform with an explicit, already validated configuration.
    fn apply(&self, input: &Self::Input, config: &Self::Config) -> Result<Self::Output>;

    /// Get the scaler name.
    fn name(&self) -> &str;

    /// The declared defaults for this scaler.
    fn default_config() -> Self::Config
    where
        Self: Sized,
    {
        Self::Config::default()
    }

    /// Run with the stored configuration.
    fn call(&self, input: &Self::Input) -> Result<Self::Output> {
        let config = self.config();
        config.validate()?;
        self.apply(input, config)
    }

    /// Run with `overrides` merged over the stored configuration.
    fn call_with(
        &self,
        input: &Self::Input,
        overrides: &<Self::Config as ScalerConfig>::Overrides,
    ) -> Result<Self::Output> {
        let config = self.config().merge(overrides);
        config.validate()?;
        self.apply(input, &config)
    }
}

use crate::error::Result;

/// A metric that scores a whole batch in one synchronous pass.
pub trait MetricCalculator {
    type Input;
    type Output;

    fn calculate(&self, input: Self::Input) -> Result<Self::Output>;
}

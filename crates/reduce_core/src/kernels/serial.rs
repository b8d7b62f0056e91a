//! Serial baseline.

use super::ReductionKernel;

/// Sequential left-to-right accumulation on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialSum;

impl ReductionKernel for SerialSum {
    fn name(&self) -> &'static str {
        "serial"
    }

    #[inline]
    fn sum(&self, input: &[f64]) -> f64 {
        input.iter().fold(0.0, |acc, &x| acc + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_sum() {
        assert_eq!(SerialSum.sum(&[1.0, 2.0, 3.0, 4.0]), 10.0);
    }

    #[test]
    fn test_serial_sum_single() {
        assert_eq!(SerialSum.sum(&[0.75]), 0.75);
    }

    #[test]
    fn test_serial_sum_order() {
        // Left-to-right: (1e16 + 1) + 1 rounds each time.
        let input = [1e16, 1.0, 1.0];
        assert_eq!(SerialSum.sum(&input), (1e16 + 1.0) + 1.0);
    }
}

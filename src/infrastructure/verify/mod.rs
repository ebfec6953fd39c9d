//! Simulated payment verification
//!
//! Stands in for a real payment-gateway check behind the `PaymentVerifier`
//! seam: a coin flip with a configurable success rate, independent of the
//! transaction.

use rand::Rng;

use crate::domain::traits::PaymentVerifier;

pub struct RandomVerifier {
    success_rate: f64,
}

impl RandomVerifier {
    pub fn new(success_rate: f64) -> Self {
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
        }
    }
}

impl Default for RandomVerifier {
    fn default() -> Self {
        Self::new(0.8)
    }
}

impl PaymentVerifier for RandomVerifier {
    fn verify(&self, _transaction_id: i64) -> bool {
        rand::thread_rng().gen::<f64>() < self.success_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extreme_rates_are_deterministic() {
        let always = RandomVerifier::new(1.0);
        let never = RandomVerifier::new(0.0);
        for id in 0..20 {
            assert!(always.verify(id));
            assert!(!never.verify(id));
        }
    }

    #[test]
    fn out_of_range_rate_is_clamped() {
        assert!(RandomVerifier::new(7.5).verify(1));
        assert!(!RandomVerifier::new(-1.0).verify(1));
    }
}

/// PaymentVerifier trait - the single pluggable payment decision point.
///
/// Today this is a coin flip; swapping in a real gateway check or a
/// webhook-driven implementation must not touch the conversation core.
pub trait PaymentVerifier: Send + Sync {
    /// Decide whether the payment behind a transaction went through
    fn verify(&self, transaction_id: i64) -> bool;
}

use crate::application::errors::QrError;

/// PaymentCodeRenderer trait - turns UPI payment text into a scannable image.
///
/// Pure and stateless; an empty or unencodable payload is an explicit error,
/// never a panic.
pub trait PaymentCodeRenderer: Send + Sync {
    fn render(&self, payload: &str) -> Result<Vec<u8>, QrError>;
}

use crate::shared::occurrence::Occurrence;

/// Supplies the annotated occurrences of each frame.
///
/// The table is treated as immutable for the session; lookups of unknown
/// frames yield nothing rather than an error.
pub trait AnnotationProvider: Send {
    /// Occurrences of `frame_index`, in a stable object-id order.
    fn occurrences(&self, frame_index: usize) -> Vec<Occurrence>;

    /// Whether any occurrence of `frame_index` is a blur-out exception.
    fn has_blur_out(&self, frame_index: usize) -> bool {
        Occurrence::any_blur_out(&self.occurrences(frame_index))
    }
}

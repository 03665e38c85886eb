use thiserror::Error;

/// Errors produced by the snapshot/versioning layer.
///
/// None of these surface to the user: the [`Outliner`](crate::Outliner) degrades to a full
/// refresh when old regions cannot be remapped onto a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutlineError {
    /// The delta history does not connect the two snapshot versions.
    #[error("no delta history from version {from} to version {to}")]
    VersionGap {
        /// Version the span was expressed in.
        from: u64,
        /// Version the span was being translated to.
        to: u64,
    },
    /// An edit referenced characters outside the buffer, or a span with `start > end`.
    #[error("span {start}..{end} is out of bounds for a text of {len} chars")]
    SpanOutOfBounds {
        /// Start character offset of the offending span.
        start: usize,
        /// End character offset of the offending span.
        end: usize,
        /// Character length of the text.
        len: usize,
    },
}

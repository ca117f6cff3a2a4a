use thiserror::Error;

/// Errors surfaced to callers of the build and query operations.
///
/// Symbol types are constrained to `Hash + Eq` at compile time, so an
/// unsupported-symbol condition cannot arise at runtime and has no
/// variant here. Structural invariant violations (a duplicate
/// first-symbol edge, a split offset outside the label interior)
/// indicate a bug in the extension engine, not a recoverable caller
/// error; they abort construction with a panic rather than corrupt the
/// tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A label, path, or length query ran before a sequence was set.
    #[error("no sequence has been set; build the tree first")]
    Uninitialized,

    /// A second build on a tree whose sequence is already set.
    #[error("the tree has already been built")]
    AlreadyBuilt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            TreeError::Uninitialized.to_string(),
            "no sequence has been set; build the tree first"
        );
        assert_eq!(
            TreeError::AlreadyBuilt.to_string(),
            "the tree has already been built"
        );
    }
}

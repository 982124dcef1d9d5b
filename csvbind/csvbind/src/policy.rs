/// Policy for header rows that name the same column more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateHeaders {
    /// Legacy behavior (default): the last occurrence of a name wins and the
    /// earlier columns are unreachable by name. A warning is logged.
    #[default]
    LastWins,
    /// Fail construction with
    /// [`ConstructionError::DuplicateHeader`](crate::ConstructionError::DuplicateHeader).
    Reject,
}

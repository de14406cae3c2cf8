/// What to do with a table column that names no property of the target type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownColumns {
    /// Ignore the column. Tables often carry columns for other steps.
    #[default]
    Skip,
    /// Fail with [`MappingCause::UnknownProperty`](crate::MappingCause::UnknownProperty).
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapperConfig {
    pub unknown_columns: UnknownColumns,
}

impl MapperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unknown_columns(mut self, policy: UnknownColumns) -> Self {
        self.unknown_columns = policy;
        self
    }
}

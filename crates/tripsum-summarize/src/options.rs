use tripsum_core::TableName;

/// Options that control what gets summarized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    pub table: TableName,
    /// Length bound of `top_by_minutes`.
    pub top_n: u32,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            table: TableName::default(),
            top_n: 5,
        }
    }
}

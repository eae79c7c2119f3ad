//! Newtypes for the counts and lengths passed around when building a grid.

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

/// Pixel width of one cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub u32);
/// Pixel height of one cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub u32);

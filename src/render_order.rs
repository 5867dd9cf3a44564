use serde::{Deserialize, Serialize};

/// Visiting direction over an index sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RenderingOrder {
    #[default]
    Forward,
    Reverse,
}

/// Direction of the nested row/column loops over grid-shaped datasets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Order in which a draw pass visits datasets, renderers, series, rows and
/// columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOrderPolicy {
    pub dataset: RenderingOrder,
    pub renderer: RenderingOrder,
    pub series: RenderingOrder,
    pub row: SortOrder,
    pub column: SortOrder,
}

impl Default for RenderOrderPolicy {
    /// Datasets are drawn in reverse so that the primary dataset ends up on
    /// top.
    fn default() -> Self {
        Self {
            dataset: RenderingOrder::Reverse,
            renderer: RenderingOrder::Reverse,
            series: RenderingOrder::Forward,
            row: SortOrder::Ascending,
            column: SortOrder::Ascending,
        }
    }
}

/// Sorts ascending, then reverses for `Reverse`. Sparse index sets keep a
/// deterministic order.
fn ordered(mut indices: Vec<usize>, order: RenderingOrder) -> Vec<usize> {
    indices.sort_unstable();
    indices.dedup();
    if order == RenderingOrder::Reverse {
        indices.reverse();
    }
    indices
}

fn counted(count: usize, order: SortOrder) -> Vec<usize> {
    match order {
        SortOrder::Ascending => (0..count).collect(),
        SortOrder::Descending => (0..count).rev().collect(),
    }
}

impl RenderOrderPolicy {
    pub fn dataset_visit_order(&self, indices: impl IntoIterator<Item = usize>) -> Vec<usize> {
        ordered(indices.into_iter().collect(), self.dataset)
    }

    pub fn renderer_visit_order(&self, indices: impl IntoIterator<Item = usize>) -> Vec<usize> {
        ordered(indices.into_iter().collect(), self.renderer)
    }

    pub fn series_visit_order(&self, count: usize) -> Vec<usize> {
        ordered((0..count).collect(), self.series)
    }

    pub fn row_visit_order(&self, count: usize) -> Vec<usize> {
        counted(count, self.row)
    }

    pub fn column_visit_order(&self, count: usize) -> Vec<usize> {
        counted(count, self.column)
    }
}

use super::range::Range;
use crate::notify::{ChangeSource, Observable};
use std::rc::Rc;

/// Identity shared by datasets that come from the same logical source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DatasetGroup(pub String);

impl Default for DatasetGroup {
    fn default() -> Self {
        Self("NOID".to_string())
    }
}

/// Whether rows and columns of a dataset form a table (visited with the
/// row/column orders) or independent series (visited with the series order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DatasetShape {
    #[default]
    Series,
    Grid,
}

/// Read access to tabular or series data.
///
/// Rows are series and columns are items. `x_value_at` is the domain value of
/// an item on continuous domain axes; `item_key` names the item's category on
/// discrete ones.
pub trait Dataset {
    fn series_count(&self) -> usize;

    fn item_count(&self, series: usize) -> usize;

    fn value_at(&self, series: usize, item: usize) -> Option<f64>;

    fn x_value_at(&self, _series: usize, item: usize) -> Option<f64> {
        Some(item as f64)
    }

    fn item_key(&self, _item: usize) -> Option<String> {
        None
    }

    fn series_key(&self, series: usize) -> String {
        format!("Series {}", series)
    }

    fn group(&self) -> DatasetGroup {
        DatasetGroup::default()
    }

    fn shape(&self) -> DatasetShape {
        DatasetShape::Series
    }

    /// Range of the finite values, `None` when there are none.
    fn value_range(&self) -> Option<Range> {
        Range::from_values(
            (0..self.series_count())
                .flat_map(|s| (0..self.item_count(s)).filter_map(move |i| self.value_at(s, i))),
        )
    }

    fn x_range(&self) -> Option<Range> {
        Range::from_values(
            (0..self.series_count())
                .flat_map(|s| (0..self.item_count(s)).filter_map(move |i| self.x_value_at(s, i))),
        )
    }

    fn is_empty(&self) -> bool {
        (0..self.series_count()).all(|s| self.item_count(s) == 0)
    }
}

pub type DatasetHandle = Rc<Observable<dyn Dataset>>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct XySeries {
    pub key: String,
    pub points: Vec<(f64, Option<f64>)>,
}

/// `(x, y)` series kept in memory, points sorted by `x` on insertion.
#[derive(Clone, Debug, Default)]
pub struct VecDataset {
    series: Vec<XySeries>,
    group: DatasetGroup,
}

impl VecDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> Rc<Observable<VecDataset>> {
        Observable::new(ChangeSource::Dataset, self)
    }

    pub fn with_group(mut self, group: DatasetGroup) -> Self {
        self.group = group;
        self
    }

    pub fn add_series(&mut self, key: impl Into<String>, points: Vec<(f64, f64)>) -> usize {
        let mut points: Vec<(f64, Option<f64>)> = points.into_iter().map(|(x, y)| (x, Some(y))).collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.series.push(XySeries {
            key: key.into(),
            points,
        });
        self.series.len() - 1
    }

    /// Adds a point; `y = None` leaves a gap. Unknown series indices are
    /// ignored.
    pub fn add_point(&mut self, series: usize, x: f64, y: Option<f64>) {
        if let Some(s) = self.series.get_mut(series) {
            let at = s.points.partition_point(|p| p.0 <= x);
            s.points.insert(at, (x, y));
        }
    }

    pub fn clear_series(&mut self, series: usize) {
        if let Some(s) = self.series.get_mut(series) {
            s.points.clear();
        }
    }

    pub fn series(&self, series: usize) -> Option<&XySeries> {
        self.series.get(series)
    }
}

impl Dataset for VecDataset {
    fn series_count(&self) -> usize {
        self.series.len()
    }

    fn item_count(&self, series: usize) -> usize {
        self.series.get(series).map_or(0, |s| s.points.len())
    }

    fn value_at(&self, series: usize, item: usize) -> Option<f64> {
        self.series.get(series)?.points.get(item)?.1
    }

    fn x_value_at(&self, series: usize, item: usize) -> Option<f64> {
        self.series.get(series)?.points.get(item).map(|p| p.0)
    }

    fn series_key(&self, series: usize) -> String {
        self.series
            .get(series)
            .map(|s| s.key.clone())
            .unwrap_or_else(|| format!("Series {}", series))
    }

    fn group(&self) -> DatasetGroup {
        self.group.clone()
    }
}

/// Rows x columns of values keyed by row and column names.
#[derive(Clone, Debug, Default)]
pub struct CategoryTable {
    row_keys: Vec<String>,
    column_keys: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
    group: DatasetGroup,
}

impl CategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> Rc<Observable<CategoryTable>> {
        Observable::new(ChangeSource::Dataset, self)
    }

    pub fn with_group(mut self, group: DatasetGroup) -> Self {
        self.group = group;
        self
    }

    /// Sets one cell, adding the row and column keys when they are new.
    pub fn set_value(&mut self, row: &str, column: &str, value: Option<f64>) {
        let r = match self.row_keys.iter().position(|k| k == row) {
            Some(r) => r,
            None => {
                self.row_keys.push(row.to_string());
                self.values.push(vec![None; self.column_keys.len()]);
                self.row_keys.len() - 1
            }
        };
        let c = match self.column_keys.iter().position(|k| k == column) {
            Some(c) => c,
            None => {
                self.column_keys.push(column.to_string());
                for row_values in &mut self.values {
                    row_values.push(None);
                }
                self.column_keys.len() - 1
            }
        };
        self.values[r][c] = value;
    }

    pub fn row_keys(&self) -> &[String] {
        &self.row_keys
    }

    pub fn column_keys(&self) -> &[String] {
        &self.column_keys
    }
}

impl Dataset for CategoryTable {
    fn series_count(&self) -> usize {
        self.row_keys.len()
    }

    fn item_count(&self, _series: usize) -> usize {
        self.column_keys.len()
    }

    fn value_at(&self, series: usize, item: usize) -> Option<f64> {
        *self.values.get(series)?.get(item)?
    }

    fn item_key(&self, item: usize) -> Option<String> {
        self.column_keys.get(item).cloned()
    }

    fn series_key(&self, series: usize) -> String {
        self.row_keys
            .get(series)
            .cloned()
            .unwrap_or_else(|| format!("Series {}", series))
    }

    fn group(&self) -> DatasetGroup {
        self.group.clone()
    }

    fn shape(&self) -> DatasetShape {
        DatasetShape::Grid
    }
}

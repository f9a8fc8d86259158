//! Aggregation and correlation math for the chart sections.

use crate::data::table::{ColumnData, DataTable};

/// Per-group arithmetic means for a set of value columns.
///
/// Computed transiently for the cleaning-impact bar chart; the source table
/// itself is never mutated.
#[derive(Debug, Clone)]
pub struct GroupMeans {
    /// Grouping column name.
    pub key: String,
    /// Value column names, in request order.
    pub value_columns: Vec<String>,
    /// One row per distinct key value, in natural sort order.
    pub groups: Vec<GroupRow>,
}

/// One aggregated row of a [`GroupMeans`].
#[derive(Debug, Clone)]
pub struct GroupRow {
    /// Display label of the distinct key value.
    pub label: String,
    /// Mean of each value column within this group (`None` when the group
    /// has no observed values for that column).
    pub means: Vec<Option<f64>>,
}

/// Distinct grouping key: numeric keys sort ascending, text lexicographic.
#[derive(Debug, Clone, PartialEq)]
enum GroupKey {
    Num(f64),
    Text(String),
}

impl GroupKey {
    fn label(&self) -> String {
        match self {
            Self::Num(v) => format!("{v}"),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Groups rows by distinct value of `key` and averages each column in `values`.
///
/// Rows with a missing key are dropped; missing value cells are skipped when
/// averaging. Groups are ordered by the natural sort order of the distinct
/// key values. Returns `None` when the key column is absent or holds
/// timestamps, or when any value column is absent or non-numeric.
pub fn group_mean(table: &DataTable, key: &str, values: &[&str]) -> Option<GroupMeans> {
    let key_column = table.column(key)?;
    let value_slices: Vec<&[Option<f64>]> = values
        .iter()
        .map(|name| table.numeric(name))
        .collect::<Option<Vec<_>>>()?;

    // Distinct keys in first-seen order, with the rows they own.
    let mut distinct: Vec<(GroupKey, Vec<usize>)> = Vec::new();
    for row in 0..table.len() {
        let group_key = match key_column {
            ColumnData::Numeric(cells) => cells.get(row).copied().flatten().map(GroupKey::Num),
            ColumnData::Text(cells) => cells
                .get(row)
                .filter(|c| !c.trim().is_empty())
                .map(|c| GroupKey::Text(c.clone())),
            ColumnData::Timestamp(_) => return None,
        };
        let Some(group_key) = group_key else {
            continue;
        };
        match distinct.iter_mut().find(|(k, _)| *k == group_key) {
            Some((_, rows)) => rows.push(row),
            None => distinct.push((group_key, vec![row])),
        }
    }

    distinct.sort_by(|(a, _), (b, _)| match (a, b) {
        (GroupKey::Num(x), GroupKey::Num(y)) => x.total_cmp(y),
        (GroupKey::Text(x), GroupKey::Text(y)) => x.cmp(y),
        // A single column never mixes variants; keep insertion order if it does.
        _ => std::cmp::Ordering::Equal,
    });

    let groups = distinct
        .into_iter()
        .map(|(group_key, rows)| {
            let means = value_slices
                .iter()
                .map(|cells| {
                    let mut sum = 0.0;
                    let mut count = 0_usize;
                    for &row in &rows {
                        if let Some(v) = cells.get(row).copied().flatten() {
                            sum += v;
                            count += 1;
                        }
                    }
                    (count > 0).then(|| sum / count as f64)
                })
                .collect();
            GroupRow {
                label: group_key.label(),
                means,
            }
        })
        .collect();

    Some(GroupMeans {
        key: key.to_string(),
        value_columns: values.iter().map(|v| v.to_string()).collect(),
        groups,
    })
}

/// Pairwise-complete Pearson correlation over the numeric columns of a table.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    /// Numeric column names, in table declaration order.
    pub labels: Vec<String>,
    /// Row-major coefficients; `values[i][j]` pairs `labels[i]` with `labels[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Number of columns in the matrix.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` when no numeric columns were available.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether the rendered heatmap hides this cell.
    ///
    /// The upper triangle and the diagonal are masked; only cells with
    /// `row > col` are visible.
    pub fn masked(&self, row: usize, col: usize) -> bool {
        row <= col
    }
}

/// Computes the correlation matrix over every numeric column of `table`.
///
/// Coefficients use pairwise-complete observations. The diagonal is 1.0; a
/// pair with fewer than two complete observations or zero variance is NaN.
pub fn correlation_matrix(table: &DataTable) -> CorrelationMatrix {
    let names = table.numeric_column_names();
    let columns: Vec<&[Option<f64>]> = names
        .iter()
        .filter_map(|&name| table.numeric(name))
        .collect();

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in 0..i {
            let r = pearson(columns[i], columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        labels: names.into_iter().map(str::to_string).collect(),
        values,
    }
}

/// Pearson coefficient over rows where both cells are present and finite.
fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= 0.0 || var_y <= 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

/// One histogram bin: edges and sample count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Exclusive upper edge (inclusive for the last bin).
    pub upper: f64,
    /// Samples falling in this bin.
    pub count: u64,
}

/// Fixed-width binning over the finite values of a column.
///
/// Returns an empty vector when there are no finite values or `bins` is zero.
/// A degenerate range (all values equal) yields a single bin holding every
/// sample.
pub fn histogram_bins(values: &[Option<f64>], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values
        .iter()
        .copied()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: finite.len() as u64,
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0_u64; bins];
    for v in &finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

//! Entity resolution: grouping records that share any value across columns.
//!
//! Each record and each distinct canonical value is a node in an implicit
//! bipartite graph; a value appearing in rows `r₁, r₂, …` unites every later
//! row with `r₁`. The union pass never materialises per-value row lists:
//! a transient map from value to its first-seen row is enough, and the full
//! lists are only collected when the caller asks for details.
//!
//! Group labels are a function of input rows in their given order; shuffling
//! the rows changes labels but never the partition.

mod column;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::num::NonZeroUsize;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::index::{DenseIndex, NARROW_NODE_LIMIT};
use crate::union_find::DisjointSet;

pub use self::column::Column;

/// Values excluded from matching unless the caller overrides them.
pub const DEFAULT_INCOMPARABLES: [&str; 4] = ["", "NA", "NULL", "Unknown"];

/// Errors returned while configuring or running entity resolution.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ResolveError {
    /// No columns were supplied.
    #[error("at least one column is required")]
    EmptyColumns,
    /// A column's length disagreed with the first column's.
    #[error("column {column} has {len} rows but {expected} were expected")]
    ColumnLengthMismatch {
        /// Zero-based position of the offending column.
        column: usize,
        /// The offending column's row count.
        len: usize,
        /// Row count of the first column.
        expected: usize,
    },
    /// The minimum group size was zero.
    #[error("min_group_size must be at least 1 (got {got})")]
    InvalidMinGroupSize {
        /// The rejected value.
        got: usize,
    },
}

impl ResolveError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> ResolveErrorCode {
        match self {
            Self::EmptyColumns => ResolveErrorCode::EmptyColumns,
            Self::ColumnLengthMismatch { .. } => ResolveErrorCode::ColumnLengthMismatch,
            Self::InvalidMinGroupSize { .. } => ResolveErrorCode::InvalidMinGroupSize,
        }
    }
}

/// Machine-readable error codes for [`ResolveError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ResolveErrorCode {
    /// No columns were supplied.
    EmptyColumns,
    /// A column's length disagreed with the first column's.
    ColumnLengthMismatch,
    /// The minimum group size was zero.
    InvalidMinGroupSize,
}

impl ResolveErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyColumns => "EMPTY_COLUMNS",
            Self::ColumnLengthMismatch => "COLUMN_LENGTH_MISMATCH",
            Self::InvalidMinGroupSize => "INVALID_MIN_GROUP_SIZE",
        }
    }
}

impl fmt::Display for ResolveErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configures and constructs [`Resolver`] instances.
///
/// # Examples
/// ```
/// use renketsu_core::ResolverBuilder;
///
/// let resolver = ResolverBuilder::new()
///     .with_case_sensitive(false)
///     .with_min_group_size(2)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(resolver.min_group_size().get(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ResolverBuilder {
    incomparables: Vec<String>,
    case_sensitive: bool,
    min_group_size: usize,
    return_details: bool,
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self {
            incomparables: DEFAULT_INCOMPARABLES.iter().map(|s| s.to_string()).collect(),
            case_sensitive: true,
            min_group_size: 1,
            return_details: false,
        }
    }
}

impl ResolverBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the incomparable set (default [`DEFAULT_INCOMPARABLES`]).
    ///
    /// Values in this set never produce matches.
    #[must_use]
    pub fn with_incomparables<V, S>(mut self, values: V) -> Self
    where
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.incomparables = values.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the configured incomparable values.
    #[must_use]
    pub fn incomparables(&self) -> &[String] {
        &self.incomparables
    }

    /// Sets whether matching is case sensitive (default `true`).
    ///
    /// When `false`, values and incomparables are ASCII lower-cased before
    /// comparison. Unicode case folding is not performed.
    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Returns whether matching is case sensitive.
    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Sets the minimum component size that receives a group id (default 1).
    ///
    /// Records in smaller components receive group id 0.
    #[must_use]
    pub fn with_min_group_size(mut self, size: usize) -> Self {
        self.min_group_size = size;
        self
    }

    /// Returns the configured minimum group size.
    #[must_use]
    pub fn min_group_size(&self) -> usize {
        self.min_group_size
    }

    /// Sets whether [`GroupingResult::value_map`] is populated (default
    /// `false`).
    #[must_use]
    pub fn with_details(mut self, return_details: bool) -> Self {
        self.return_details = return_details;
        self
    }

    /// Returns whether the value map will be populated.
    #[must_use]
    pub fn details(&self) -> bool {
        self.return_details
    }

    /// Validates the configuration and constructs a [`Resolver`].
    ///
    /// # Errors
    /// Returns [`ResolveError::InvalidMinGroupSize`] when the minimum group
    /// size is zero.
    pub fn build(self) -> Result<Resolver, ResolveError> {
        let min_group_size = NonZeroUsize::new(self.min_group_size).ok_or(
            ResolveError::InvalidMinGroupSize {
                got: self.min_group_size,
            },
        )?;

        let incomparables = self
            .incomparables
            .into_iter()
            .map(|value| {
                if self.case_sensitive {
                    value
                } else {
                    value.to_ascii_lowercase()
                }
            })
            .collect();

        Ok(Resolver {
            incomparables,
            case_sensitive: self.case_sensitive,
            min_group_size,
            return_details: self.return_details,
        })
    }
}

/// Groups records that share any value across the supplied columns.
///
/// # Examples
/// ```
/// use renketsu_core::{Column, ResolverBuilder};
///
/// let emails = Column::Text(vec![
///     "Alice".into(),
///     "ALICE".into(),
///     "alice".into(),
///     "bob".into(),
/// ]);
/// let resolver = ResolverBuilder::new()
///     .with_case_sensitive(false)
///     .build()
///     .expect("configuration is valid");
/// let result = resolver.group(&[emails])?;
/// assert_eq!(result.group_ids(), [1, 1, 1, 2]);
/// assert_eq!(result.group_count(), 2);
/// # Ok::<(), renketsu_core::ResolveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    incomparables: FxHashSet<String>,
    case_sensitive: bool,
    min_group_size: NonZeroUsize,
    return_details: bool,
}

impl Resolver {
    /// Returns the minimum component size that receives a group id.
    #[must_use]
    pub fn min_group_size(&self) -> NonZeroUsize {
        self.min_group_size
    }

    /// Returns whether matching is case sensitive.
    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Assigns a group id to every record.
    ///
    /// The row count is taken from the first column; every column must
    /// match it. Records whose component is smaller than the configured
    /// minimum receive group id 0; all other groups are numbered densely
    /// from 1 in row-scan order.
    ///
    /// # Errors
    /// Returns [`ResolveError::EmptyColumns`] when no columns are supplied
    /// and [`ResolveError::ColumnLengthMismatch`] when lengths disagree.
    pub fn group(&self, columns: &[Column]) -> Result<GroupingResult, ResolveError> {
        let Some(first) = columns.first() else {
            return Err(ResolveError::EmptyColumns);
        };
        let rows = first.len();
        for (index, column) in columns.iter().enumerate().skip(1) {
            if column.len() != rows {
                return Err(ResolveError::ColumnLengthMismatch {
                    column: index,
                    len: column.len(),
                    expected: rows,
                });
            }
        }

        if rows < NARROW_NODE_LIMIT {
            self.group_rows::<u32>(columns, rows)
        } else {
            self.group_rows::<u64>(columns, rows)
        }
    }

    fn group_rows<I: DenseIndex>(
        &self,
        columns: &[Column],
        rows: usize,
    ) -> Result<GroupingResult, ResolveError> {
        let mut forest = DisjointSet::<I>::new(rows);
        let mut first_seen: FxHashMap<String, usize> = FxHashMap::default();
        let mut value_rows: FxHashMap<String, Vec<usize>> = FxHashMap::default();

        for column in columns {
            for row in 0..rows {
                let value = self.fold(column.canonical(row));
                if value.is_empty() || self.incomparables.contains(value.as_ref()) {
                    continue;
                }
                if let Some(&first) = first_seen.get(value.as_ref()) {
                    forest.union(first, row);
                    if self.return_details {
                        value_rows
                            .entry(value.into_owned())
                            .or_insert_with(|| vec![first])
                            .push(row);
                    }
                } else {
                    first_seen.insert(value.into_owned(), row);
                }
            }
        }

        let roots: Vec<usize> = (0..rows).map(|row| forest.find(row)).collect();
        let mut root_sizes: Vec<u64> = vec![0; rows];
        for &root in &roots {
            root_sizes[root] += 1;
        }

        let min = self.min_group_size.get() as u64;
        let mut dense: FxHashMap<usize, u64> = FxHashMap::default();
        let mut group_sizes: Vec<u64> = Vec::new();
        let mut group_ids = Vec::with_capacity(rows);
        for &root in &roots {
            if root_sizes[root] < min {
                group_ids.push(0);
                continue;
            }
            let label = match dense.entry(root) {
                Entry::Occupied(slot) => *slot.get(),
                Entry::Vacant(slot) => {
                    group_sizes.push(root_sizes[root]);
                    *slot.insert(group_sizes.len() as u64)
                }
            };
            group_ids.push(label);
        }

        let value_map = self.return_details.then(|| {
            value_rows
                .into_iter()
                .filter_map(|(value, mut rows)| {
                    rows.sort_unstable();
                    rows.dedup();
                    (rows.len() >= 2).then_some((value, rows))
                })
                .collect::<BTreeMap<_, _>>()
        });

        tracing::debug!(
            rows,
            groups = group_sizes.len(),
            values = first_seen.len(),
            "record groups computed"
        );

        Ok(GroupingResult {
            group_ids,
            group_sizes,
            value_map,
        })
    }

    /// Applies the configured case folding to a canonical value.
    fn fold<'a>(&self, value: Cow<'a, str>) -> Cow<'a, str> {
        if self.case_sensitive || !value.bytes().any(|b| b.is_ascii_uppercase()) {
            value
        } else {
            Cow::Owned(value.to_ascii_lowercase())
        }
    }
}

/// Per-record group assignment from [`Resolver::group`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupingResult {
    group_ids: Vec<u64>,
    group_sizes: Vec<u64>,
    value_map: Option<BTreeMap<String, Vec<usize>>>,
}

impl GroupingResult {
    /// Returns one group id per record, in row order. Records filtered by
    /// the minimum group size carry id 0.
    #[must_use]
    pub fn group_ids(&self) -> &[u64] {
        &self.group_ids
    }

    /// Returns the number of groups that passed the size filter.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.group_sizes.len()
    }

    /// Returns the size of each surviving group; `group_sizes()[id - 1]` is
    /// the size of group `id`.
    #[must_use]
    pub fn group_sizes(&self) -> &[u64] {
        &self.group_sizes
    }

    /// Returns the values that connected at least two distinct records,
    /// with the sorted rows each one touched. `None` unless the resolver
    /// was built with details enabled.
    #[must_use]
    pub fn value_map(&self) -> Option<&BTreeMap<String, Vec<usize>>> {
        self.value_map.as_ref()
    }

    /// Consumes the result, yielding the per-record group ids.
    #[must_use]
    pub fn into_group_ids(self) -> Vec<u64> {
        self.group_ids
    }
}

// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Filter selections
//!
//! A multi-select filter either places no restriction (`All`) or restricts to
//! an explicit set of members (`Subset`). The two are distinct variants so an
//! intentionally empty subset is never mistaken for the wildcard.

use crate::dimension::{Environment, ModelName, Runtime, TimeRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A closed enumeration that can be multi-selected
pub trait Dimension: Copy + Ord + 'static {
    /// Every member, in declaration order
    fn universe() -> &'static [Self];

    fn label(&self) -> &'static str;
}

impl Dimension for ModelName {
    fn universe() -> &'static [Self] {
        &ModelName::ALL
    }

    fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl Dimension for Runtime {
    fn universe() -> &'static [Self] {
        &Runtime::ALL
    }

    fn label(&self) -> &'static str {
        self.as_str()
    }
}

/// Multi-select filter value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    content = "members",
    rename_all = "lowercase",
    bound(
        serialize = "T: Serialize",
        deserialize = "T: Deserialize<'de> + Ord"
    )
)]
pub enum Selection<T> {
    /// No restriction
    All,
    /// Only these members (may be empty, which matches nothing)
    Subset(BTreeSet<T>),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: Dimension> Selection<T> {
    pub fn all() -> Self {
        Selection::All
    }

    /// Explicit subset; stays a subset even when `items` is empty
    pub fn only(items: impl IntoIterator<Item = T>) -> Self {
        Selection::Subset(items.into_iter().collect())
    }

    /// Build from a filter-bar value where an empty list means "all"
    pub fn from_filter(items: impl IntoIterator<Item = T>) -> Self {
        let members: BTreeSet<T> = items.into_iter().collect();
        if members.is_empty() {
            Selection::All
        } else {
            Selection::Subset(members)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Whether `item` passes this filter
    pub fn contains(&self, item: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Subset(members) => members.contains(item),
        }
    }

    /// Members that pass the filter, in declaration order
    pub fn effective(&self) -> Vec<T> {
        match self {
            Selection::All => T::universe().to_vec(),
            Selection::Subset(members) => members.iter().copied().collect(),
        }
    }

    /// Explicitly selected members; `None` for the wildcard
    pub fn members(&self) -> Option<&BTreeSet<T>> {
        match self {
            Selection::All => None,
            Selection::Subset(members) => Some(members),
        }
    }

    /// Multi-select toggle.
    ///
    /// Toggling a member of the wildcard starts a subset with just that
    /// member; removing the last member returns to the wildcard.
    pub fn toggle(&mut self, item: T) {
        match self {
            Selection::All => {
                *self = Selection::only([item]);
            }
            Selection::Subset(members) => {
                if !members.remove(&item) {
                    members.insert(item);
                }
                if members.is_empty() {
                    *self = Selection::All;
                }
            }
        }
    }

    /// Filter-bar text: the wildcard label, up to two names, or a count
    pub fn display_text(&self, all_label: &str) -> String {
        match self {
            Selection::All => all_label.to_string(),
            Selection::Subset(members) if members.len() <= 2 => members
                .iter()
                .map(|m| m.label())
                .collect::<Vec<_>>()
                .join(", "),
            Selection::Subset(members) => format!("{} selected", members.len()),
        }
    }
}

/// Snapshot of the four dashboard filters, read-only for one computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    pub environment: Environment,
    pub models: Selection<ModelName>,
    pub platforms: Selection<Runtime>,
    pub time_range: TimeRange,
}

impl FilterSelection {
    pub fn new(
        environment: Environment,
        models: Selection<ModelName>,
        platforms: Selection<Runtime>,
        time_range: TimeRange,
    ) -> Self {
        Self {
            environment,
            models,
            platforms,
            time_range,
        }
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::new(
            Environment::Prod,
            Selection::All,
            Selection::All,
            TimeRange::LastDay,
        )
    }
}

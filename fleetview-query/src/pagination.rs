// Copyright 2025 AgentReplay (https://github.com/agentreplay)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Client-side pagination for the agent inventory table.

/// One page of a borrowed slice. Page numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice out `page` of `items`. The page is clamped into
/// `1..=max(1, total_pages)` and a zero page size is treated as 1.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    Page {
        items: &items[start..end],
        page,
        page_size,
        total_pages,
        total_items,
    }
}

impl<'a, T> Page<'a, T> {
    /// 1-based index of the first row on this page; 0 when empty
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last row on this page
    pub fn last_index(&self) -> usize {
        (self.page * self.page_size).min(self.total_items)
    }

    /// Footer text, e.g. `Showing 1–6 of 11`
    pub fn range_label(&self) -> String {
        if self.total_items == 0 {
            return "Showing 0 of 0".to_string();
        }
        format!(
            "Showing {}–{} of {}",
            self.first_index(),
            self.last_index(),
            self.total_items
        )
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last_page() {
        let rows: Vec<u32> = (1..=11).collect();

        let first = paginate(&rows, 1, 6);
        assert_eq!(first.items, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.range_label(), "Showing 1–6 of 11");
        assert!(!first.has_prev());
        assert!(first.has_next());

        let second = paginate(&rows, 2, 6);
        assert_eq!(second.items, &[7, 8, 9, 10, 11]);
        assert_eq!(second.range_label(), "Showing 7–11 of 11");
        assert!(second.has_prev());
        assert!(!second.has_next());
    }

    #[test]
    fn test_page_is_clamped() {
        let rows: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(&rows, 0, 6).page, 1);
        let past_end = paginate(&rows, 9, 6);
        assert_eq!(past_end.page, 2);
        assert_eq!(past_end.items, &[7]);
    }

    #[test]
    fn test_empty_list() {
        let rows: Vec<u32> = Vec::new();
        let page = paginate(&rows, 3, 6);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.range_label(), "Showing 0 of 0");
        assert!(!page.has_prev());
        assert!(!page.has_next());
    }
}

use crate::gateway::PAGE_SIZE;

/// Append-only list fed one page at a time.
///
/// `page` is the last page merged (1-based). `has_more` turns false as soon
/// as a page comes back short and never turns true again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub has_more: bool,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            has_more: true,
        }
    }
}

impl<T> Paginated<T> {
    /// A list holding page 1.
    pub fn first_page(items: Vec<T>) -> Self {
        let has_more = items.len() >= PAGE_SIZE;
        Self {
            items,
            page: 1,
            has_more,
        }
    }

    pub fn next_page(&self) -> u32 {
        self.page + 1
    }

    /// Merge a fetched page. Returns false (and changes nothing) unless
    /// `page` directly follows the cursor.
    pub fn append_page(&mut self, page: u32, items: Vec<T>) -> bool {
        if page != self.next_page() {
            return false;
        }
        if items.len() < PAGE_SIZE {
            self.has_more = false;
        }
        self.items.extend(items);
        self.page = page;
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(start: usize, len: usize) -> Vec<usize> {
        (start..start + len).collect()
    }

    #[test]
    fn default_is_empty_page_one() {
        let list: Paginated<usize> = Paginated::default();
        assert!(list.is_empty());
        assert_eq!(list.page, 1);
        assert!(list.has_more);
    }

    #[test]
    fn short_first_page_has_no_more() {
        let list = Paginated::first_page(page(0, 12));
        assert!(!list.has_more);
        let list = Paginated::first_page(page(0, PAGE_SIZE));
        assert!(list.has_more);
    }

    #[test]
    fn appends_in_order_and_advances_cursor() {
        let mut list = Paginated::first_page(page(0, PAGE_SIZE));
        assert!(list.append_page(2, page(30, PAGE_SIZE)));
        assert!(list.append_page(3, page(60, 5)));
        assert_eq!(list.items, page(0, 65));
        assert_eq!(list.page, 3);
        assert!(!list.has_more);
    }

    #[test]
    fn out_of_sequence_page_is_ignored() {
        let mut list = Paginated::first_page(page(0, PAGE_SIZE));
        assert!(!list.append_page(3, page(60, PAGE_SIZE)));
        assert!(!list.append_page(1, page(0, PAGE_SIZE)));
        assert_eq!(list.len(), PAGE_SIZE);
        assert_eq!(list.page, 1);
    }

    #[test]
    fn has_more_never_comes_back() {
        let mut list = Paginated::first_page(page(0, PAGE_SIZE));
        list.append_page(2, page(30, 3));
        assert!(!list.has_more);
        list.append_page(3, page(33, PAGE_SIZE));
        assert!(!list.has_more);
    }
}

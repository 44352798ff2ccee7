use serde::Serialize;

/// One displayed page of a filtered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, already clamped into `[1, total_pages]`.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// 1-based index of the first item shown, 0 when the page is empty.
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    pub fn last_index(&self) -> usize {
        (self.page - 1) * self.page_size + self.items.len()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// `max(1, ceil(n / page_size))`. A zero page size counts as one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let page = clamp_page(page, total_pages);

    let start = ((page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total_items,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_minimum_one() {
        assert_eq!(total_pages(0, 30), 1);
        assert_eq!(total_pages(30, 30), 1);
        assert_eq!(total_pages(31, 30), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_slices_and_clamps() {
        let items: Vec<u32> = (1..=25).collect();

        let page = paginate(&items, 2, 10);
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!((page.first_index(), page.last_index()), (11, 20));

        let last = paginate(&items, 99, 10);
        assert_eq!(last.page, 3);
        assert_eq!(last.items, vec![21, 22, 23, 24, 25]);
        assert!(!last.has_next());

        let first = paginate(&items, 0, 10);
        assert_eq!(first.page, 1);
        assert!(!first.has_previous());
    }

    #[test]
    fn test_empty_list_has_one_empty_page() {
        let page = paginate::<u32>(&[], 3, 30);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.first_index(), 0);
    }

    #[test]
    fn test_page_offsets_hold_for_many_sizes() {
        let items: Vec<usize> = (0..47).collect();
        for page_size in 1..=12 {
            let pages = total_pages(items.len(), page_size);
            for requested in 0..=pages + 2 {
                let page = paginate(&items, requested, page_size);
                let k = clamp_page(requested, pages);
                let start = (k - 1) * page_size;
                let end = (start + page_size).min(items.len());
                assert_eq!(page.items, items[start..end].to_vec());
            }
        }
    }
}

pub const ROWS_PER_PAGE: usize = 10;

/// Page math for a table of `len` rows. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(len: usize, current_page: usize) -> Self {
        Self::with_page_size(len, current_page, ROWS_PER_PAGE)
    }

    pub fn with_page_size(len: usize, current_page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        Self {
            current_page: current_page.max(1),
            total_pages: len.div_ceil(per_page).max(1),
            per_page,
        }
    }

    /// The slice of `rows` shown on the current page. Empty past the end.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1).saturating_mul(self.per_page);
        if start >= rows.len() {
            return &[];
        }
        let end = (start + self.per_page).min(rows.len());
        &rows[start..end]
    }

    /// Numbered buttons, only when there is more than one page.
    pub fn page_numbers(&self) -> Vec<usize> {
        if self.total_pages > 1 {
            (1..=self.total_pages).collect()
        } else {
            Vec::new()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_has_one_page() {
        let p = Pagination::new(0, 1);
        assert_eq!(p.total_pages, 1);
        assert!(p.page_numbers().is_empty());
        assert!(!p.is_visible());
        assert!(!p.has_prev());
        assert!(!p.has_next());
    }

    #[test]
    fn partial_last_page() {
        let rows: Vec<usize> = (0..23).collect();
        let p = Pagination::new(rows.len(), 3);

        assert_eq!(p.total_pages, 3);
        assert_eq!(p.page_numbers(), vec![1, 2, 3]);
        assert_eq!(p.slice(&rows), &[20, 21, 22]);
        assert!(p.has_prev());
        assert!(!p.has_next());
    }

    #[test]
    fn exact_multiple() {
        let rows: Vec<usize> = (0..20).collect();
        let p = Pagination::new(rows.len(), 1);

        assert_eq!(p.total_pages, 2);
        assert_eq!(p.slice(&rows), &rows[..10]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let rows: Vec<usize> = (0..5).collect();
        assert!(Pagination::new(rows.len(), 4).slice(&rows).is_empty());
    }

    #[test]
    fn page_zero_is_clamped() {
        assert_eq!(Pagination::new(5, 0).current_page, 1);
    }
}

use std::fmt;

use crate::models::PaginationView;

/// Up to this many pages are listed without ellipses
const FULL_WINDOW: u32 = 5;

/// One entry of the rendered page list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    /// 0-based page index
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(index) => write!(f, "{}", index + 1),
            PageMarker::Ellipsis => f.write_str("…"),
        }
    }
}

/// Windowed page list around `current_page`, e.g. `1 … 4 5 6 … 12`.
///
/// Emits at most seven markers. A `current_page` past the end is clamped to the last page.
pub fn page_window(current_page: u32, total_pages: u32) -> Vec<PageMarker> {
    if total_pages <= FULL_WINDOW {
        return (0..total_pages).map(PageMarker::Page).collect();
    }

    let last = total_pages - 1;
    let current = current_page.min(last);
    let mut markers = vec![PageMarker::Page(0)];

    if current > 2 {
        markers.push(PageMarker::Ellipsis);
    }
    if current > 1 {
        markers.push(PageMarker::Page(current - 1));
    }
    if current > 0 && current < last {
        markers.push(PageMarker::Page(current));
    }
    if current < total_pages - 2 {
        markers.push(PageMarker::Page(current + 1));
    }
    if current < total_pages - 3 {
        markers.push(PageMarker::Ellipsis);
    }
    markers.push(PageMarker::Page(last));

    markers
}

/// Page list plus previous/next targets for one results page.
///
/// Previous and next come from the server-reported flags, not from the page counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub current: u32,
    pub markers: Vec<PageMarker>,
    pub previous: Option<u32>,
    pub next: Option<u32>,
}

impl PageLinks {
    pub fn from_view(view: &PaginationView) -> Self {
        Self {
            current: view.current_page,
            markers: page_window(view.current_page, view.total_pages),
            previous: view
                .has_prev_page
                .then(|| view.current_page.saturating_sub(1)),
            next: view
                .current_page
                .checked_add(1)
                .filter(|_| view.has_next_page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PageMarker::{Ellipsis, Page};
    use super::*;

    #[test]
    fn small_totals_list_every_page() {
        for total in 0..=5 {
            let markers = page_window(0, total);
            assert_eq!(markers.len(), total as usize);
            assert!(markers.iter().all(|m| *m != Ellipsis));
            let expected: Vec<_> = (0..total).map(Page).collect();
            assert_eq!(markers, expected);
        }
    }

    #[test]
    fn middle_page_gets_both_ellipses() {
        assert_eq!(
            page_window(5, 12),
            vec![Page(0), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(11)]
        );
    }

    #[test]
    fn first_page_has_no_leading_ellipsis() {
        assert_eq!(page_window(0, 12), vec![Page(0), Page(1), Ellipsis, Page(11)]);
    }

    #[test]
    fn edges_of_the_window() {
        assert_eq!(page_window(11, 12), vec![Page(0), Ellipsis, Page(10), Page(11)]);
        assert_eq!(
            page_window(2, 12),
            vec![Page(0), Page(1), Page(2), Page(3), Ellipsis, Page(11)]
        );
        assert_eq!(
            page_window(9, 12),
            vec![Page(0), Ellipsis, Page(8), Page(9), Page(10), Page(11)]
        );
    }

    #[test]
    fn never_more_than_seven_markers() {
        for total in 6..40 {
            for current in 0..total {
                assert!(page_window(current, total).len() <= 7);
            }
        }
    }

    #[test]
    fn out_of_range_cursor_is_clamped() {
        assert_eq!(page_window(40, 6), vec![Page(0), Ellipsis, Page(4), Page(5)]);
    }

    #[test]
    fn links_trust_server_flags() {
        let view = PaginationView {
            current_page: 0,
            total_pages: 3,
            has_next_page: false,
            has_prev_page: true,
        };
        let links = PageLinks::from_view(&view);
        assert_eq!(links.previous, Some(0));
        assert_eq!(links.next, None);
        assert_eq!(links.markers, vec![Page(0), Page(1), Page(2)]);
    }

    #[test]
    fn huge_totals_do_not_overflow() {
        let last = u32::MAX - 1;
        assert_eq!(
            page_window(last - 2, u32::MAX),
            vec![
                Page(0),
                Ellipsis,
                Page(last - 3),
                Page(last - 2),
                Page(last - 1),
                Page(last)
            ]
        );
        assert_eq!(
            page_window(u32::MAX, u32::MAX),
            vec![Page(0), Ellipsis, Page(last - 1), Page(last)]
        );

        let view = PaginationView {
            current_page: u32::MAX,
            total_pages: u32::MAX,
            has_next_page: true,
            has_prev_page: true,
        };
        let links = PageLinks::from_view(&view);
        assert_eq!(links.next, None);
        assert_eq!(links.previous, Some(u32::MAX - 1));
    }

    #[test]
    fn markers_render_one_based() {
        let rendered: Vec<String> = page_window(5, 12).iter().map(|m| m.to_string()).collect();
        assert_eq!(rendered, vec!["1", "…", "5", "6", "7", "…", "12"]);
    }
}

use serde::Serialize;

/// Pages shown on each side of the current one in the pager.
const WINDOW_DELTA: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub apis: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Slice one 1-based page out of `records`.
///
/// `page` is taken as given: out-of-range pages (including 0) come back empty
/// rather than failing. Clamping is the caller's job.
pub fn paginate<T: Clone>(records: &[T], page: usize, page_size: usize) -> PageResult<T> {
    let total = records.len();
    let apis = match page.checked_sub(1) {
        Some(p) if page_size > 0 => {
            let start = p.saturating_mul(page_size).min(total);
            let end = start.saturating_add(page_size).min(total);
            records[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    PageResult {
        apis,
        total,
        page,
        page_size,
        total_pages: total_pages(total, page_size),
    }
}

pub fn total_pages(total: usize, page_size: usize) -> usize {
    if total == 0 || page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(usize),
    Gap,
}

impl Serialize for PageSlot {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            PageSlot::Page(n) => s.serialize_u64(*n as u64),
            PageSlot::Gap => s.serialize_str("..."),
        }
    }
}

/// Page numbers for the pager: first, last, and `current ± 2`, with a gap
/// marker wherever more than one page is skipped. A single skipped page is
/// shown instead of a gap.
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageSlot> {
    let kept = (1..=total_pages).filter(|&i| {
        i == 1 || i == total_pages || (i + WINDOW_DELTA >= current && i <= current + WINDOW_DELTA)
    });

    let mut window = Vec::new();
    let mut last: Option<usize> = None;
    for i in kept {
        if let Some(l) = last {
            if i - l == 2 {
                window.push(PageSlot::Page(l + 1));
            } else if i - l != 1 {
                window.push(PageSlot::Gap);
            }
        }
        window.push(PageSlot::Page(i));
        last = Some(i);
    }
    window
}

pub fn has_previous(current: usize) -> bool {
    current > 1
}

pub fn has_next(current: usize, total_pages: usize) -> bool {
    current < total_pages
}

/// Slices one page out of a list.
///
/// Pages are 1-based; page 0 is treated as page 1. Returns the page items and
/// whether any items remain past the end of this page.
pub fn paginate<T: Clone>(items: &[T], page: u32, per_page: usize) -> (Vec<T>, bool) {
    let per_page = per_page.max(1);
    let start = (page.max(1) as usize - 1).saturating_mul(per_page);
    let end = start.saturating_add(per_page);

    let page_items = items
        .iter()
        .skip(start)
        .take(per_page)
        .cloned()
        .collect();

    (page_items, end < items.len())
}

use crate::model::Pagination;

/// Cut one page out of an ordered result set.
///
/// `page` is clamped into `[1, total_pages]`. An empty input reports
/// `total_pages == 0` with page 1 and no neighbours. A `per_page` of zero or
/// less counts as a single page and yields an empty slice, rather than the
/// prefix a negative-index slice would give.
pub fn paginate<T>(items: Vec<T>, page: i64, per_page: i64) -> (Vec<T>, Pagination) {
    let total = items.len() as i64;
    let total_pages = if total == 0 {
        0
    } else if per_page > 0 {
        (total - 1) / per_page + 1
    } else {
        1
    };

    let page = page.min(total_pages).max(1);

    let slice = if per_page > 0 {
        let start = ((page - 1) * per_page) as usize;
        items
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect()
    } else {
        Vec::new()
    };

    let pagination = Pagination {
        page,
        per_page,
        total,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
    };

    (slice, pagination)
}

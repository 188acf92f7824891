use serde::{Deserialize, Serialize, Serializer};

pub const HOME_PAGE_SIZE: usize = 6;
pub const MY_ARTICLES_PAGE_SIZE: usize = 6;
pub const ADMIN_USERS_PAGE_SIZE: usize = 7;
pub const ADMIN_CATEGORIES_PAGE_SIZE: usize = 5;
pub const ADMIN_ARTICLES_PAGE_SIZE: usize = 5;

#[derive(Debug, Deserialize, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Slices one 1-based page out of `items`. Out-of-range pages are clamped.
pub fn paginate<T>(items: Vec<T>, page: Option<usize>, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.unwrap_or(1).clamp(1, total_pages.max(1));
    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Number(usize),
    Ellipsis,
}

impl Serialize for PageLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageLink::Number(n) => serializer.serialize_u64(*n as u64),
            PageLink::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Page strip for long lists: every page up to ten pages, otherwise the
/// edges plus the neighbourhood of the current page separated by gaps.
pub fn page_numbers(current: usize, total_pages: usize) -> Vec<PageLink> {
    use PageLink::{Ellipsis, Number};

    if total_pages <= 10 {
        return (1..=total_pages).map(Number).collect();
    }

    let mut links = vec![];
    if current <= 3 {
        links.extend((1..=3).map(Number));
        links.push(Ellipsis);
        links.extend((total_pages - 2..=total_pages).map(Number));
    } else if current >= total_pages - 2 {
        links.extend([Number(1), Number(2), Ellipsis]);
        links.extend((total_pages - 2..=total_pages).map(Number));
    } else {
        links.extend([
            Number(1),
            Ellipsis,
            Number(current - 1),
            Number(current),
            Number(current + 1),
            Ellipsis,
            Number(total_pages),
        ]);
    }
    links
}

use crate::catalog::{Product, ProductFormat};
use crate::search::Pagination;
use crate::storefront::{SortOrder, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

/// Storefront browse state, as carried in the page URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseOptions {
    /// Search term; matched against name, artist, genre and subgenre.
    pub search: String,
    /// Format filter; `None` means all formats.
    pub format: Option<ProductFormat>,
    /// Genre filter; matches genre or subgenre. `None` means all genres.
    pub genre: Option<String>,
    pub sort: SortOrder,
    /// Requested page (1-indexed); clamped to the available pages.
    pub page: usize,
    pub page_size: usize,
}

impl Default for BrowseOptions {
    fn default() -> Self {
        Self {
            search: String::new(),
            format: None,
            genre: None,
            sort: SortOrder::Newest,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl BrowseOptions {
    /// Build options from raw query parameters.
    ///
    /// `all`, blank and unknown formats mean "no filter". A page that does
    /// not parse becomes 1.
    pub fn from_params(
        search: Option<&str>,
        format: Option<&str>,
        genre: Option<&str>,
        sort: Option<&str>,
        page: Option<&str>,
    ) -> Self {
        let genre = genre
            .map(str::trim)
            .filter(|g| !g.is_empty() && !g.eq_ignore_ascii_case("all"))
            .map(str::to_string);

        Self {
            search: search.map(|s| s.trim().to_string()).unwrap_or_default(),
            format: format.and_then(ProductFormat::parse),
            genre,
            sort: sort.map(SortOrder::from_key).unwrap_or_default(),
            page: page.and_then(|p| p.trim().parse().ok()).unwrap_or(1),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Query string for these options at `page`. Filters left at their
    /// defaults are omitted.
    pub fn query_string(&self, page: usize) -> String {
        let mut parts = Vec::new();
        if !self.search.is_empty() {
            parts.push(format!("search={}", urlencoding::encode(&self.search)));
        }
        if let Some(format) = self.format {
            parts.push(format!("format={}", format.slug()));
        }
        if let Some(genre) = &self.genre {
            parts.push(format!("genre={}", urlencoding::encode(genre)));
        }
        if self.sort != SortOrder::Newest {
            parts.push(format!("sort={}", self.sort.key()));
        }
        if page > 1 {
            parts.push(format!("page={}", page));
        }
        parts.join("&")
    }

    fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.format.map_or(true, |f| product.format == f)
            && self.genre.as_deref().map_or(true, |g| {
                product.genre == g || product.subgenre.as_deref() == Some(g)
            })
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        let contains = |field: &str| field.to_lowercase().contains(&needle);
        contains(&product.name)
            || contains(&product.artist)
            || contains(&product.genre)
            || product.subgenre.as_deref().is_some_and(contains)
    }
}

/// One storefront page.
#[derive(Debug, Clone)]
pub struct BrowsePage<'a> {
    pub products: Vec<&'a Product>,
    /// Number of products matching the filters, across all pages.
    pub total: usize,
    pub pagination: Pagination,
}

impl BrowsePage<'_> {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Search, filter, sort and paginate a product list.
pub fn browse<'a>(products: &'a [Product], options: &BrowseOptions) -> BrowsePage<'a> {
    let mut matched: Vec<&Product> = products.iter().filter(|p| options.matches(p)).collect();
    options.sort.apply(&mut matched);

    let total = matched.len();
    let page_size = options.page_size.max(1);
    let pages = total.div_ceil(page_size).max(1);
    let page = options.page.clamp(1, pages);

    let products = matched
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    BrowsePage {
        products,
        total,
        pagination: Pagination::new(page as i64, page_size as i64, total as i64),
    }
}

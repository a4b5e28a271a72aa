use blackmarch_commerce::cart::Cart;
use blackmarch_commerce::catalog::{Product, ProductFormat};
use blackmarch_commerce::checkout::{WhatsAppLink, WhatsAppNumber};
use blackmarch_commerce::storefront::{BrowseOptions, BrowsePage, SortOrder, STOREFRONT_GENRES};

use super::{escape, shell};

/// Everything the storefront page shows.
pub struct StorefrontView<'a> {
    pub store_name: &'a str,
    pub options: &'a BrowseOptions,
    pub page: &'a BrowsePage<'a>,
    pub cart: &'a Cart,
    pub whatsapp: &'a WhatsAppNumber,
    /// Shown above the grid, e.g. when the sample catalog is in use.
    pub notice: Option<&'a str>,
}

impl StorefrontView<'_> {
    /// Path of the page being rendered, used as the cart forms' return target.
    fn current_path(&self) -> String {
        let query = self.options.query_string(self.page.pagination.page as usize);
        if query.is_empty() {
            "/".to_string()
        } else {
            format!("/?{}", query)
        }
    }
}

pub fn storefront_page(view: &StorefrontView<'_>) -> String {
    let return_to = view.current_path();
    let notice = view
        .notice
        .map(|n| format!(r#"<p class="muted">{}</p>"#, escape(n)))
        .unwrap_or_default();

    let results = if view.page.is_empty() {
        r#"<div><p>No products found in our collection</p><p class="muted">Try adjusting your search or filters</p></div>"#
            .to_string()
    } else {
        let cards: String = view
            .page
            .products
            .iter()
            .map(|p| product_card(view, p, &return_to))
            .collect();
        format!(r#"<div class="grid">{}</div>"#, cards)
    };

    let body = format!(
        r##"<header>
    <div>
        <h1><a href="/">{name_upper}</a></h1>
        <p class="muted">Vintage Records &amp; Timeless Merchandise</p>
    </div>
    <nav><a href="/admin">Admin</a> &middot; <a href="#cart">Cart ({count})</a></nav>
</header>
<main>
    {cart}
    {filters}
    {notice}
    <p class="muted">Found {total} products</p>
    {results}
    {pagination}
</main>
<footer class="muted">&copy; {name}. Curating timeless music.</footer>"##,
        name_upper = escape(&view.store_name.to_uppercase()),
        name = escape(view.store_name),
        count = view.cart.item_count(),
        cart = cart_panel(view, &return_to),
        filters = filter_form(view.options),
        total = view.page.total,
        pagination = pagination(view),
    );

    shell(view.store_name, &body)
}

fn filter_form(options: &BrowseOptions) -> String {
    let mut formats = option_tag("all", "All Formats", options.format.is_none());
    for format in ProductFormat::ALL {
        formats.push_str(&option_tag(
            format.slug(),
            format.menu_label(),
            options.format == Some(format),
        ));
    }

    let mut genres = option_tag("all", "All Genres", options.genre.is_none());
    for genre in STOREFRONT_GENRES {
        genres.push_str(&option_tag(
            genre,
            genre,
            options.genre.as_deref() == Some(genre),
        ));
    }

    let sorts: String = SortOrder::ALL
        .iter()
        .map(|s| option_tag(s.key(), s.display_name(), options.sort == *s))
        .collect();

    format!(
        r#"<form method="get" action="/">
    <input type="search" name="search" value="{search}" placeholder="Search our collection...">
    <select name="format">{formats}</select>
    <select name="genre">{genres}</select>
    <select name="sort">{sorts}</select>
    <button type="submit">Filter</button>
</form>"#,
        search = escape(&options.search),
    )
}

fn option_tag(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape(value),
        if selected { " selected" } else { "" },
        escape(label)
    )
}

fn product_card(view: &StorefrontView<'_>, product: &Product, return_to: &str) -> String {
    let limited = if product.limited {
        r#"<span class="badge dark">LIMITED</span>"#
    } else {
        ""
    };
    let release = product
        .release_line()
        .map(|line| format!(r#"<p class="muted">{}</p>"#, escape(&line)))
        .unwrap_or_default();
    let description = product
        .description
        .as_deref()
        .map(|d| format!("<p>{}</p>", escape(d)))
        .unwrap_or_default();
    let subgenre = product
        .subgenre
        .as_deref()
        .map(|s| format!(r#"<span class="badge">{}</span>"#, escape(s)))
        .unwrap_or_default();

    let actions = match view.whatsapp.product_link(view.store_name, product) {
        Ok(link) => format!(
            r#"<form class="inline" method="post" action="/cart/add">
        <input type="hidden" name="product_id" value="{id}">
        <input type="hidden" name="return_to" value="{return_to}">
        <button type="submit">Add to Cart</button>
    </form>
    <a href="{url}" target="_blank" rel="noopener">Order via WhatsApp</a>"#,
            id = escape(product.id.as_str()),
            return_to = escape(return_to),
            url = escape(&link.url),
        ),
        Err(_) => r#"<button type="button" disabled>Out of Stock</button>"#.to_string(),
    };

    format!(
        r#"<article class="card">
    <img src="{image}" alt="{alt}" loading="lazy">
    {limited}
    <h3>{artist}</h3>
    <p>{name}</p>
    {release}
    {description}
    <p><span class="badge">{format}</span>{subgenre}</p>
    <p><strong>{price}</strong></p>
    {actions}
</article>"#,
        image = escape(product.display_image()),
        alt = escape(&product.title()),
        artist = escape(&product.artist),
        name = escape(&product.name),
        format = product.format.as_str(),
        price = product.price.display(),
    )
}

fn cart_panel(view: &StorefrontView<'_>, return_to: &str) -> String {
    let return_to = escape(return_to);
    if view.cart.is_empty() {
        return r#"<section id="cart" class="cart"><h3>CART</h3><p class="muted">Your cart is empty</p></section>"#
            .to_string();
    }

    let lines: String = view
        .cart
        .items
        .iter()
        .map(|item| {
            format!(
                r#"<tr>
    <td>{title}<br><span class="muted">{format}</span></td>
    <td>
        <form class="inline" method="post" action="/cart/update">
            <input type="hidden" name="product_id" value="{id}">
            <input type="hidden" name="return_to" value="{return_to}">
            <input type="number" name="quantity" min="1" max="99" value="{quantity}">
            <button type="submit">Update</button>
        </form>
    </td>
    <td>{total}</td>
    <td>
        <form class="inline" method="post" action="/cart/remove">
            <input type="hidden" name="product_id" value="{id}">
            <input type="hidden" name="return_to" value="{return_to}">
            <button type="submit">Remove</button>
        </form>
    </td>
</tr>"#,
                title = escape(&item.title),
                format = item.format.as_str(),
                id = escape(item.product_id.as_str()),
                quantity = item.quantity,
                total = item.total_price.display(),
            )
        })
        .collect();

    let total = view
        .cart
        .total()
        .map(|t| t.display())
        .unwrap_or_else(|_| "-".to_string());
    let checkout = view
        .whatsapp
        .cart_link(view.store_name, view.cart)
        .map(|link| checkout_link(&link))
        .unwrap_or_default();

    format!(
        r#"<section id="cart" class="cart">
    <h3>CART</h3>
    <table>{lines}</table>
    <p><strong>Total: {total}</strong></p>
    {checkout}
    <form class="inline" method="post" action="/cart/clear">
        <input type="hidden" name="return_to" value="{return_to}">
        <button type="submit">Clear Cart</button>
    </form>
</section>"#
    )
}

fn checkout_link(link: &WhatsAppLink) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener">Checkout via WhatsApp</a>"#,
        escape(&link.url)
    )
}

fn pagination(view: &StorefrontView<'_>) -> String {
    let pagination = &view.page.pagination;
    if !pagination.is_multi_page() {
        return String::new();
    }

    let href = |page: i64| {
        let query = view.options.query_string(page as usize);
        if query.is_empty() {
            "/".to_string()
        } else {
            format!("/?{}", escape(&query))
        }
    };

    let mut links = Vec::new();
    if pagination.has_prev() {
        links.push(format!(r#"<a href="{}">Previous</a>"#, href(pagination.page - 1)));
    }
    for page in 1..=pagination.pages {
        if page == pagination.page {
            links.push(format!("<span><strong>{}</strong></span>", page));
        } else {
            links.push(format!(r#"<a href="{}">{}</a>"#, href(page), page));
        }
    }
    if pagination.has_next() {
        links.push(format!(r#"<a href="{}">Next</a>"#, href(pagination.page + 1)));
    }

    format!(r#"<nav class="pagination">{}</nav>"#, links.join(""))
}

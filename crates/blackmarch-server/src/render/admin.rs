use blackmarch_commerce::catalog::{Product, ProductFormat, ProductInput};
use blackmarch_commerce::storefront::STOREFRONT_GENRES;
use blackmarch_commerce::{Currency, FieldError, ProductId};

use super::{escape, shell};

/// Product table with the currency toggle.
pub struct AdminView<'a> {
    pub store_name: &'a str,
    pub products: &'a [Product],
    pub currency: Currency,
    pub idr_per_usd: f64,
}

/// Whether the product form creates or edits.
#[derive(Debug, Clone, Copy)]
pub enum FormMode<'a> {
    New,
    Edit(&'a ProductId),
}

impl FormMode<'_> {
    fn action(&self) -> String {
        match self {
            FormMode::New => "/admin/products".to_string(),
            FormMode::Edit(id) => format!("/admin/products/{}", urlencoding::encode(id.as_str())),
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            FormMode::New => "Add Product",
            FormMode::Edit(_) => "Edit Product",
        }
    }
}

pub fn admin_page(view: &AdminView<'_>) -> String {
    let toggle: String = [Currency::USD, Currency::IDR]
        .into_iter()
        .map(|currency| {
            if currency == view.currency {
                format!("<strong>{}</strong> ", currency.code())
            } else {
                format!(
                    r#"<a href="/admin?currency={code}">{code}</a> "#,
                    code = currency.code()
                )
            }
        })
        .collect();

    let rows: String = view.products.iter().map(|p| product_row(view, p)).collect();
    let table = if view.products.is_empty() {
        r#"<p class="muted">No products yet.</p>"#.to_string()
    } else {
        format!(
            r#"<table>
    <tr><th>Product</th><th>Genre</th><th>Price</th><th>Release</th><th></th></tr>
    {rows}
</table>"#
        )
    };

    let body = format!(
        r#"<header>
    <h1>{name} Admin</h1>
    <nav><a href="/">Storefront</a> &middot; <a href="/admin/products/new">Add Product</a></nav>
</header>
<main>
    <p>Currency: {toggle}</p>
    <p class="muted">{count} products</p>
    {table}
</main>"#,
        name = escape(view.store_name),
        count = view.products.len(),
    );

    shell(&format!("{} Admin", view.store_name), &body)
}

fn product_row(view: &AdminView<'_>, product: &Product) -> String {
    let mut badges = format!(r#"<span class="badge">{}</span>"#, product.format.as_str());
    if product.limited {
        badges.push_str(r#"<span class="badge dark">LIMITED</span>"#);
    }
    if !product.in_stock {
        badges.push_str(r#"<span class="badge">OUT OF STOCK</span>"#);
    }

    let genre = match product.subgenre.as_deref() {
        Some(sub) => format!("{} \u{2022} {}", product.genre, sub),
        None => product.genre.clone(),
    };
    let release = [
        product.year.map(|y| y.to_string()),
        product.label.clone(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" \u{2022} ");
    let description = product
        .description
        .as_deref()
        .map(|d| format!(r#"<br><span class="muted">{}</span>"#, escape(d)))
        .unwrap_or_default();
    let id = urlencoding::encode(product.id.as_str());

    format!(
        r#"<tr>
    <td><strong>{artist}</strong> - {name}<br>{badges}{description}</td>
    <td>{genre}</td>
    <td>{price}</td>
    <td>{release}</td>
    <td>
        <a href="/admin/products/{id}/edit">Edit</a>
        <form class="inline" method="post" action="/admin/products/{id}/delete" onsubmit="return confirm('Delete this product?')">
            <button type="submit">Delete</button>
        </form>
    </td>
</tr>"#,
        artist = escape(&product.artist),
        name = escape(&product.name),
        genre = escape(&genre),
        price = product.price.convert(view.currency, view.idr_per_usd).display(),
        release = escape(&release),
    )
}

/// Create or edit form, prefilled from `input`, with `errors` shown inline.
pub fn product_form(
    store_name: &str,
    mode: FormMode<'_>,
    input: &ProductInput,
    errors: &[FieldError],
) -> String {
    let error_for = |field: &str| -> String {
        errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| format!(r#"<span class="error">{}</span>"#, escape(&e.message)))
            .collect()
    };
    let summary = if errors.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="error">Please fix the {} highlighted field(s).</p>"#,
            errors.len()
        )
    };

    let selected_format = ProductFormat::parse(&input.format);
    let mut formats = String::from(r#"<option value="">Select format</option>"#);
    for format in ProductFormat::ALL {
        formats.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            format.as_str(),
            if selected_format == Some(format) { " selected" } else { "" },
            format.label()
        ));
    }
    let genres: String = STOREFRONT_GENRES
        .iter()
        .map(|g| format!(r#"<option value="{}">"#, escape(g)))
        .collect();

    let text = |value: Option<&String>| escape(value.map(String::as_str).unwrap_or(""));
    let checked = |on: bool| if on { " checked" } else { "" };

    let body = format!(
        r#"<header>
    <h1>{heading}</h1>
    <nav><a href="/admin">Back to products</a></nav>
</header>
<main>
    {summary}
    <form method="post" action="{action}">
        <label>Name * <input name="name" value="{name}"></label>{name_error}
        <label>Artist * <input name="artist" value="{artist}"></label>{artist_error}
        <label>Format * <select name="format">{formats}</select></label>{format_error}
        <label>Genre * <input name="genre" list="genres" value="{genre}"></label>{genre_error}
        <datalist id="genres">{genres}</datalist>
        <label>Subgenre <input name="subgenre" value="{subgenre}"></label>
        <label>Price (USD) * <input name="price" inputmode="decimal" value="{price}"></label>{price_error}
        <label>Year <input name="year" inputmode="numeric" value="{year}"></label>{year_error}
        <label>Label <input name="label" value="{label}"></label>
        <label>Image URL <input name="image" value="{image}"></label>
        <label>Description <textarea name="description" rows="3">{description}</textarea></label>
        <label><input type="checkbox" name="in_stock" value="on"{in_stock}> In stock</label>
        <label><input type="checkbox" name="limited" value="on"{limited}> Limited edition</label>
        <p><button type="submit">Save</button> <a href="/admin">Cancel</a></p>
    </form>
</main>"#,
        heading = mode.heading(),
        action = mode.action(),
        name = escape(&input.name),
        name_error = error_for("name"),
        artist = escape(&input.artist),
        artist_error = error_for("artist"),
        format_error = error_for("format"),
        genre = escape(&input.genre),
        genre_error = error_for("genre"),
        subgenre = text(input.subgenre.as_ref()),
        price = escape(&input.price_text()),
        price_error = error_for("price"),
        year = escape(&input.year_text()),
        year_error = error_for("year"),
        label = text(input.label.as_ref()),
        image = text(input.image.as_ref()),
        description = text(input.description.as_ref()),
        in_stock = checked(input.in_stock.unwrap_or(true)),
        limited = checked(input.limited.unwrap_or(false)),
    );

    shell(&format!("{} - {}", mode.heading(), store_name), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackmarch_commerce::catalog::ProductDraft;
    use blackmarch_commerce::Money;
    use chrono::Utc;

    fn product(in_stock: bool, limited: bool) -> Product {
        Product::from_draft(
            ProductDraft {
                name: "Pure Holocaust".to_string(),
                artist: "Immortal".to_string(),
                format: ProductFormat::Vinyl,
                genre: "Black Metal".to_string(),
                subgenre: Some("Norwegian Black Metal".to_string()),
                price: Money::usd_cents(4500),
                image: None,
                description: Some("Frost & fire".to_string()),
                in_stock,
                year: Some(1993),
                label: Some("Osmose Productions".to_string()),
                limited,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_admin_page_in_idr() {
        let products = vec![product(false, true)];
        let html = admin_page(&AdminView {
            store_name: "Blackmarch",
            products: &products,
            currency: Currency::IDR,
            idr_per_usd: 15_750.0,
        });

        assert!(html.contains("Rp 708.750"));
        assert!(html.contains("LIMITED"));
        assert!(html.contains("OUT OF STOCK"));
        assert!(html.contains("Black Metal \u{2022} Norwegian Black Metal"));
        assert!(html.contains("1993 \u{2022} Osmose Productions"));
        assert!(html.contains("Frost &amp; fire"));
        assert!(html.contains("1 products"));
        assert!(html.contains(r#"<a href="/admin?currency=USD">USD</a>"#));
        assert!(html.contains("confirm('Delete this product?')"));
    }

    #[test]
    fn test_admin_page_in_usd() {
        let products = vec![product(true, false)];
        let html = admin_page(&AdminView {
            store_name: "Blackmarch",
            products: &products,
            currency: Currency::USD,
            idr_per_usd: 15_750.0,
        });
        assert!(html.contains("$45.00"));
        assert!(!html.contains("OUT OF STOCK"));
    }

    #[test]
    fn test_edit_form_is_prefilled() {
        let product = product(true, true);
        let input = ProductInput::from_product(&product);
        let html = product_form("Blackmarch", FormMode::Edit(&product.id), &input, &[]);

        assert!(html.contains("Edit Product"));
        assert!(html.contains(&format!(r#"action="/admin/products/{}""#, product.id)));
        assert!(html.contains(r#"value="Pure Holocaust""#));
        assert!(html.contains(r#"<option value="VINYL" selected>"#));
        assert!(html.contains(r#"value="45.00""#));
        assert!(html.contains(r#"value="1993""#));
        assert!(html.contains(r#"name="limited" value="on" checked"#));
    }

    #[test]
    fn test_new_form_shows_errors() {
        let errors = vec![FieldError::new("price", "must be a number")];
        let input = ProductInput {
            price: Some("free".into()),
            ..Default::default()
        };
        let html = product_form("Blackmarch", FormMode::New, &input, &errors);

        assert!(html.contains(r#"action="/admin/products""#));
        assert!(html.contains("must be a number"));
        assert!(html.contains(r#"value="free""#));
        assert!(html.contains(r#"name="in_stock" value="on" checked"#));
        assert!(!html.contains(r#"name="limited" value="on" checked"#));
    }
}

use crate::{params, Db, DbError, Value};
use blackmarch_commerce::catalog::{Product, ProductFormat, ProductInput};
use blackmarch_commerce::search::{Pagination, ProductPage, ProductQuery};
use blackmarch_commerce::{CommerceError, Money, ProductId};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::Deserialize;

const COLUMNS: &str = "id, name, artist, format, genre, subgenre, price_cents, image, \
                       description, in_stock, year, label, limited, created_at, updated_at";

/// Raw `products` row.
#[derive(Debug, Deserialize)]
struct ProductRow {
    id: String,
    name: String,
    artist: String,
    format: String,
    genre: String,
    subgenre: Option<String>,
    price_cents: i64,
    image: Option<String>,
    description: Option<String>,
    in_stock: i64,
    year: Option<i64>,
    label: Option<String>,
    limited: i64,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let format = ProductFormat::parse(&row.format)
            .ok_or_else(|| DbError::TypeError(format!("unknown format '{}'", row.format)))?;
        let year = row
            .year
            .map(i32::try_from)
            .transpose()
            .map_err(|_| DbError::TypeError(format!("year out of range for {}", row.id)))?;

        Ok(Product {
            id: ProductId::new(row.id),
            name: row.name,
            artist: row.artist,
            format,
            genre: row.genre,
            subgenre: row.subgenre,
            price: Money::usd_cents(row.price_cents),
            image: row.image,
            description: row.description,
            in_stock: row.in_stock != 0,
            year,
            label: row.label,
            limited: row.limited != 0,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[derive(Deserialize)]
struct CountRow {
    count: i64,
}

/// Product table access.
pub struct ProductStore<'a> {
    db: &'a Db,
}

impl<'a> ProductStore<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// One filtered page of products, newest first, with the total match
    /// count.
    pub fn list(&self, query: &ProductQuery) -> Result<ProductPage, DbError> {
        let (sql, values) = query.build_sql();
        let params: Vec<Value> = values.into_iter().map(Value::from).collect();
        let products = self.fetch(&sql, &params)?;

        let (count_sql, count_values) = query.build_count_sql();
        let count_params: Vec<Value> = count_values.into_iter().map(Value::from).collect();
        let count: CountRow = self.db.query_one(&count_sql, &count_params)?;

        tracing::debug!(
            filters = query.filters.len(),
            page = query.page,
            limit = query.limit,
            total = count.count,
            "Listed products"
        );

        Ok(ProductPage::new(
            products,
            Pagination::new(query.page, query.limit, count.count),
        ))
    }

    /// Every product, newest first.
    pub fn list_all(&self) -> Result<Vec<Product>, DbError> {
        self.fetch(
            &format!(
                "SELECT {} FROM products ORDER BY created_at DESC, id DESC",
                COLUMNS
            ),
            params![],
        )
    }

    pub fn get(&self, id: &ProductId) -> Result<Option<Product>, DbError> {
        let row: Option<ProductRow> = self.db.query_optional(
            &format!("SELECT {} FROM products WHERE id = ?", COLUMNS),
            params![id.as_str()],
        )?;
        row.map(Product::try_from).transpose()
    }

    /// Validate and insert a new product.
    pub fn create(&self, input: ProductInput) -> Result<Product, DbError> {
        let product = Product::from_draft(input.validate()?, now());
        self.insert(&product)?;
        tracing::info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Insert a fully-formed product.
    pub fn insert(&self, product: &Product) -> Result<(), DbError> {
        self.db.execute(
            &format!(
                "INSERT INTO products ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                COLUMNS
            ),
            params![
                product.id.as_str(),
                &product.name,
                &product.artist,
                product.format.as_str(),
                &product.genre,
                product.subgenre.as_deref(),
                product.price.amount_minor,
                product.image.as_deref(),
                product.description.as_deref(),
                product.in_stock,
                product.year,
                product.label.as_deref(),
                product.limited,
                format_timestamp(&product.created_at),
                format_timestamp(&product.updated_at),
            ],
        )?;
        Ok(())
    }

    /// Validate the input and replace every editable field of a product.
    pub fn update(&self, id: &ProductId, input: ProductInput) -> Result<Product, DbError> {
        let draft = input.validate()?;
        let mut product = self
            .get(id)?
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        product.apply(draft, now());

        let changed = self.db.execute(
            "UPDATE products SET name = ?, artist = ?, format = ?, genre = ?, subgenre = ?, \
             price_cents = ?, image = ?, description = ?, in_stock = ?, year = ?, label = ?, \
             limited = ?, updated_at = ? WHERE id = ?",
            params![
                &product.name,
                &product.artist,
                product.format.as_str(),
                &product.genre,
                product.subgenre.as_deref(),
                product.price.amount_minor,
                product.image.as_deref(),
                product.description.as_deref(),
                product.in_stock,
                product.year,
                product.label.as_deref(),
                product.limited,
                format_timestamp(&product.updated_at),
                product.id.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(CommerceError::ProductNotFound(id.to_string()).into());
        }

        tracing::info!(id = %product.id, "Product updated");
        Ok(product)
    }

    pub fn delete(&self, id: &ProductId) -> Result<(), DbError> {
        let changed = self
            .db
            .execute("DELETE FROM products WHERE id = ?", params![id.as_str()])?;
        if changed == 0 {
            return Err(CommerceError::ProductNotFound(id.to_string()).into());
        }
        tracing::info!(id = %id, "Product deleted");
        Ok(())
    }

    /// Set the image of every product named `name`. Returns how many rows
    /// changed.
    pub fn set_image_by_name(&self, name: &str, image: &str) -> Result<usize, DbError> {
        self.db.execute(
            "UPDATE products SET image = ?, updated_at = ? WHERE name = ?",
            params![image, format_timestamp(&now()), name],
        )
    }

    pub fn count(&self) -> Result<i64, DbError> {
        let row: CountRow = self
            .db
            .query_one("SELECT COUNT(*) AS count FROM products", params![])?;
        Ok(row.count)
    }

    fn fetch(&self, sql: &str, params: &[Value]) -> Result<Vec<Product>, DbError> {
        self.db
            .query_as::<ProductRow>(sql, params)?
            .into_iter()
            .map(Product::try_from)
            .collect()
    }
}

/// Current time at the precision timestamps are stored with.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::TypeError(format!("bad timestamp '{}': {}", raw, e)))
}

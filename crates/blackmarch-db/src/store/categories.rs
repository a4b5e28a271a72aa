use crate::{params, Db, DbError, Value};
use blackmarch_commerce::catalog::{Category, CategoryType};
use blackmarch_commerce::CategoryId;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CategoryRow {
    id: String,
    name: String,
    #[serde(rename = "type")]
    category_type: String,
    description: Option<String>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DbError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: CategoryId::new(row.id),
            name: row.name,
            category_type: row
                .category_type
                .parse()
                .map_err(|e: blackmarch_commerce::CommerceError| DbError::TypeError(e.to_string()))?,
            description: row.description,
        })
    }
}

/// Category table access.
pub struct CategoryStore<'a> {
    db: &'a Db,
}

impl<'a> CategoryStore<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Categories ordered by type then name, optionally of one type only.
    pub fn list(&self, category_type: Option<CategoryType>) -> Result<Vec<Category>, DbError> {
        let (filter, params): (&str, Vec<Value>) = match category_type {
            Some(t) => ("WHERE type = ?", vec![Value::from(t.as_str())]),
            None => ("", vec![]),
        };
        let sql = format!(
            "SELECT id, name, type, description FROM categories {} ORDER BY type, name",
            filter
        );
        self.db
            .query_as::<CategoryRow>(&sql, &params)?
            .into_iter()
            .map(Category::try_from)
            .collect()
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, DbError> {
        let row: Option<CategoryRow> = self.db.query_optional(
            "SELECT id, name, type, description FROM categories WHERE name = ?",
            params![name],
        )?;
        row.map(Category::try_from).transpose()
    }

    /// Insert a category, or update the type and description of the
    /// existing category with the same name. The id of an existing
    /// category is kept.
    pub fn upsert_by_name(
        &self,
        name: &str,
        category_type: CategoryType,
        description: Option<&str>,
    ) -> Result<Category, DbError> {
        self.db.execute(
            "INSERT INTO categories (id, name, type, description) VALUES (?, ?, ?, ?) \
             ON CONFLICT(name) DO UPDATE SET type = excluded.type, description = excluded.description",
            params![
                CategoryId::generate().into_inner(),
                name,
                category_type.as_str(),
                description,
            ],
        )?;
        self.get_by_name(name)?.ok_or(DbError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_is_idempotent() {
        let db = Db::open_in_memory().unwrap();
        let store = db.categories();

        let first = store
            .upsert_by_name("Vinyl", CategoryType::RecordFormat, Some("Black vinyl records"))
            .unwrap();
        let second = store
            .upsert_by_name("Vinyl", CategoryType::RecordFormat, Some("12\" records"))
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.description.as_deref(), Some("12\" records"));
        assert_eq!(store.list(None).unwrap().len(), 1);
    }

    #[test]
    fn test_list_orders_by_type_then_name() {
        let db = Db::open_in_memory().unwrap();
        let store = db.categories();
        store.upsert_by_name("Viking Metal", CategoryType::MusicGenre, None).unwrap();
        store.upsert_by_name("Vinyl", CategoryType::RecordFormat, None).unwrap();
        store.upsert_by_name("Black Metal", CategoryType::MusicGenre, None).unwrap();
        store.upsert_by_name("CD", CategoryType::RecordFormat, None).unwrap();

        let names: Vec<String> = store.list(None).unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Black Metal", "Viking Metal", "CD", "Vinyl"]);

        let formats = store.list(Some(CategoryType::RecordFormat)).unwrap();
        assert_eq!(formats.len(), 2);
        assert!(formats.iter().all(|c| !c.is_genre()));
    }
}

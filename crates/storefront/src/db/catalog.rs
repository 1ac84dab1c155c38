//! Catalog navigation repository.

use sqlx::PgPool;

use flipzokart_core::{CategoryId, Slug, SubcategoryId, SubmenuId};

use super::RepositoryError;
use crate::models::catalog::{Category, Subcategory, Submenu};

const CATEGORY_COLUMNS: &str =
    "id, name, slug, banner_url, mobile_banner_url, is_active, created_at, updated_at";
const SUBCATEGORY_COLUMNS: &str =
    "id, category_id, name, slug, icon_url, position, is_active, created_at, updated_at";
const SUBMENU_COLUMNS: &str =
    "id, subcategory_id, name, slug, icon_url, position, is_active, link, created_at, updated_at";

const CATEGORY_CONFLICTS: &[(&str, &str)] = &[
    ("category_name_key", "Category name already exists"),
    ("category_slug_key", "Category slug already exists"),
];
const SUBCATEGORY_CONFLICTS: &[(&str, &str)] = &[(
    "subcategory_category_slug_key",
    "Subcategory slug already exists in this category",
)];
const SUBMENU_CONFLICTS: &[(&str, &str)] = &[(
    "submenu_subcategory_slug_key",
    "Submenu slug already exists in this subcategory",
)];

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub slug: Slug,
    pub banner_url: String,
    pub mobile_banner_url: String,
}

#[derive(Debug, Clone)]
pub struct NewSubcategory {
    pub category_id: CategoryId,
    pub name: String,
    pub slug: Slug,
    pub icon_url: String,
    pub position: i32,
}

#[derive(Debug, Clone)]
pub struct NewSubmenu {
    pub subcategory_id: SubcategoryId,
    pub name: String,
    pub slug: Slug,
    pub icon_url: String,
    pub position: i32,
    pub is_active: bool,
    pub link: String,
}

/// Partial submenu update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct SubmenuChanges {
    pub name: Option<String>,
    pub slug: Option<Slug>,
    pub icon_url: Option<String>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
    pub link: Option<String>,
}

/// Repository for categories, subcategories and submenus.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active categories by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM shop.category WHERE is_active ORDER BY name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Get an active category by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_category_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<Category>, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM shop.category WHERE slug = $1 AND is_active"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }

    /// Active subcategories of a category, ordered by position then name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_subcategories(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Subcategory>, RepositoryError> {
        let subcategories = sqlx::query_as::<_, Subcategory>(&format!(
            r"
            SELECT {SUBCATEGORY_COLUMNS} FROM shop.subcategory
            WHERE category_id = $1 AND is_active
            ORDER BY position, name
            "
        ))
        .bind(category_id)
        .fetch_all(self.pool)
        .await?;

        Ok(subcategories)
    }

    /// Active submenus anywhere below a category, ordered by position then name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active_submenus(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Submenu>, RepositoryError> {
        let submenus = sqlx::query_as::<_, Submenu>(
            r"
            SELECT m.id, m.subcategory_id, m.name, m.slug, m.icon_url, m.position,
                   m.is_active, m.link, m.created_at, m.updated_at
            FROM shop.submenu m
            JOIN shop.subcategory s ON s.id = m.subcategory_id
            WHERE s.category_id = $1 AND m.is_active
            ORDER BY m.position, m.name
            ",
        )
        .bind(category_id)
        .fetch_all(self.pool)
        .await?;

        Ok(submenus)
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name or slug is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_category(&self, new: &NewCategory) -> Result<Category, RepositoryError> {
        sqlx::query_as::<_, Category>(&format!(
            r"
            INSERT INTO shop.category (name, slug, banner_url, mobile_banner_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {CATEGORY_COLUMNS}
            "
        ))
        .bind(new.name.trim())
        .bind(&new.slug)
        .bind(new.banner_url.trim())
        .bind(new.mobile_banner_url.trim())
        .fetch_one(self.pool)
        .await
        .map_err(|e| write_error(e, CATEGORY_CONFLICTS))
    }

    /// Create a subcategory.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is taken within the category.
    /// Returns `RepositoryError::NotFound` if the category does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_subcategory(
        &self,
        new: &NewSubcategory,
    ) -> Result<Subcategory, RepositoryError> {
        sqlx::query_as::<_, Subcategory>(&format!(
            r"
            INSERT INTO shop.subcategory (category_id, name, slug, icon_url, position)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SUBCATEGORY_COLUMNS}
            "
        ))
        .bind(new.category_id)
        .bind(new.name.trim())
        .bind(&new.slug)
        .bind(new.icon_url.trim())
        .bind(new.position)
        .fetch_one(self.pool)
        .await
        .map_err(|e| write_error(e, SUBCATEGORY_CONFLICTS))
    }

    /// Create a submenu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is taken within the subcategory.
    /// Returns `RepositoryError::NotFound` if the subcategory does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_submenu(&self, new: &NewSubmenu) -> Result<Submenu, RepositoryError> {
        sqlx::query_as::<_, Submenu>(&format!(
            r"
            INSERT INTO shop.submenu (subcategory_id, name, slug, icon_url, position, is_active, link)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SUBMENU_COLUMNS}
            "
        ))
        .bind(new.subcategory_id)
        .bind(new.name.trim())
        .bind(&new.slug)
        .bind(new.icon_url.trim())
        .bind(new.position)
        .bind(new.is_active)
        .bind(new.link.trim())
        .fetch_one(self.pool)
        .await
        .map_err(|e| write_error(e, SUBMENU_CONFLICTS))
    }

    /// Apply a partial update to a submenu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the submenu does not exist.
    /// Returns `RepositoryError::Conflict` if the new slug is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_submenu(
        &self,
        id: SubmenuId,
        changes: &SubmenuChanges,
    ) -> Result<Submenu, RepositoryError> {
        sqlx::query_as::<_, Submenu>(&format!(
            r"
            UPDATE shop.submenu SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                icon_url = COALESCE($4, icon_url),
                position = COALESCE($5, position),
                is_active = COALESCE($6, is_active),
                link = COALESCE($7, link)
            WHERE id = $1
            RETURNING {SUBMENU_COLUMNS}
            "
        ))
        .bind(id)
        .bind(changes.name.as_deref().map(str::trim))
        .bind(changes.slug.as_ref())
        .bind(changes.icon_url.as_deref().map(str::trim))
        .bind(changes.position)
        .bind(changes.is_active)
        .bind(changes.link.as_deref().map(str::trim))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| write_error(e, SUBMENU_CONFLICTS))?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a submenu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the submenu does not exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_submenu(&self, id: SubmenuId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.submenu WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Map insert/update failures: missing parent rows become `NotFound`.
fn write_error(err: sqlx::Error, conflicts: &[(&str, &str)]) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::NotFound;
    }
    RepositoryError::from_unique(err, conflicts, "duplicate catalog entry")
}

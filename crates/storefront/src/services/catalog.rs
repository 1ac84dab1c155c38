//! Catalog navigation service.
//!
//! Navigation trees are cached per category slug using `moka` (5-minute TTL).
//! Every catalog write clears the whole cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;

use flipzokart_core::{CategoryId, Slug, SlugError, SubcategoryId, SubmenuId};

use crate::config::ImageHostPolicy;
use crate::db::RepositoryError;
use crate::db::catalog::{
    CatalogRepository, NewCategory, NewSubcategory, NewSubmenu, SubmenuChanges,
};
use crate::models::catalog::{Category, CategoryNavigation, Subcategory, Submenu};

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    InvalidSlug(#[from] SlugError),
    #[error("{field} must be a relative path or an allowed image host")]
    ImageHostNotAllowed { field: &'static str },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Shared cache of assembled navigation trees keyed by category slug.
///
/// A tree loaded before an invalidation is never inserted after it: readers
/// take the generation before loading and the insert is
/// skipped if it has moved.
#[derive(Clone)]
pub struct NavigationCache {
    inner: Cache<Slug, Arc<CategoryNavigation>>,
    generation: Arc<AtomicU64>,
}

impl NavigationCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(500)
                .time_to_live(Duration::from_secs(300)) // 5 minutes
                .build(),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    async fn get(&self, slug: &Slug) -> Option<Arc<CategoryNavigation>> {
        self.inner.get(slug).await
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Insert a tree loaded at `generation`; dropped if the cache was
    /// invalidated since.
    async fn insert(&self, slug: Slug, navigation: Arc<CategoryNavigation>, generation: u64) {
        if self.generation() != generation {
            debug!(%slug, "Catalog changed during load, not caching");
            return;
        }
        self.inner.insert(slug.clone(), navigation).await;
        // An invalidation may have landed between the check and the insert
        if self.generation() != generation {
            self.inner.invalidate(&slug).await;
        }
    }

    /// Drop every cached tree.
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.invalidate_all();
    }
}

impl Default for NavigationCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Category input from the admin API.
#[derive(Debug, Clone, Default)]
pub struct CategoryInput {
    pub name: String,
    pub slug: Option<String>,
    pub banner_url: Option<String>,
    pub mobile_banner_url: Option<String>,
}

/// Subcategory input from the admin API.
#[derive(Debug, Clone)]
pub struct SubcategoryInput {
    pub category_id: CategoryId,
    pub name: String,
    pub slug: Option<String>,
    pub icon_url: Option<String>,
    pub position: Option<i32>,
}

/// Submenu input from the admin API.
#[derive(Debug, Clone)]
pub struct SubmenuInput {
    pub subcategory_id: SubcategoryId,
    pub name: String,
    pub slug: Option<String>,
    pub icon_url: Option<String>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
    pub link: Option<String>,
}

/// Partial submenu update from the admin API.
#[derive(Debug, Clone, Default)]
pub struct SubmenuPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub icon_url: Option<String>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
    pub link: Option<String>,
}

/// Catalog navigation service.
pub struct CatalogService<'a> {
    catalog: CatalogRepository<'a>,
    cache: &'a NavigationCache,
    images: &'a ImageHostPolicy,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(
        pool: &'a PgPool,
        cache: &'a NavigationCache,
        images: &'a ImageHostPolicy,
    ) -> Self {
        Self {
            catalog: CatalogRepository::new(pool),
            cache,
            images,
        }
    }

    /// Active categories.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.catalog.list_categories().await?)
    }

    /// Navigation tree below a category, or `None` if no active category has
    /// this slug.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidSlug` for a malformed slug and
    /// `CatalogError::Repository` if a query fails.
    pub async fn navigation(
        &self,
        slug: &str,
    ) -> Result<Option<Arc<CategoryNavigation>>, CatalogError> {
        let slug = Slug::parse(slug)?;

        if let Some(navigation) = self.cache.get(&slug).await {
            debug!(%slug, "Cache hit for navigation");
            return Ok(Some(navigation));
        }
        let generation = self.cache.generation();

        let Some(category) = self.catalog.get_category_by_slug(&slug).await? else {
            return Ok(None);
        };
        let subcategories = self.catalog.list_subcategories(category.id).await?;
        let submenus = self.catalog.list_active_submenus(category.id).await?;

        let navigation = Arc::new(CategoryNavigation::assemble(
            category,
            subcategories,
            &submenus,
        ));
        self.cache
            .insert(slug, Arc::clone(&navigation), generation)
            .await;

        Ok(Some(navigation))
    }

    /// Create a category; the slug defaults to one derived from the name.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input or `Repository(Conflict)` for
    /// a duplicate name or slug.
    pub async fn create_category(&self, input: CategoryInput) -> Result<Category, CatalogError> {
        let name = required(&input.name, "name")?;
        let slug = slug_or_derived(input.slug.as_deref(), name)?;
        let banner_url = self.image(input.banner_url, "bannerUrl")?;
        let mobile_banner_url = self.image(input.mobile_banner_url, "mobileBannerUrl")?;

        let category = self
            .catalog
            .create_category(&NewCategory {
                name: name.to_owned(),
                slug,
                banner_url,
                mobile_banner_url,
            })
            .await?;
        self.cache.invalidate_all();
        Ok(category)
    }

    /// Create a subcategory under a category.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, `Repository(NotFound)` for an
    /// unknown category, or `Repository(Conflict)` for a duplicate slug.
    pub async fn create_subcategory(
        &self,
        input: SubcategoryInput,
    ) -> Result<Subcategory, CatalogError> {
        let name = required(&input.name, "name")?;
        let slug = slug_or_derived(input.slug.as_deref(), name)?;
        let icon_url = self.image(input.icon_url, "iconUrl")?;

        let subcategory = self
            .catalog
            .create_subcategory(&NewSubcategory {
                category_id: input.category_id,
                name: name.to_owned(),
                slug,
                icon_url,
                position: input.position.unwrap_or(0),
            })
            .await?;
        self.cache.invalidate_all();
        Ok(subcategory)
    }

    /// Create a submenu under a subcategory.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, `Repository(NotFound)` for an
    /// unknown subcategory, or `Repository(Conflict)` if the slug is already
    /// used under that subcategory.
    pub async fn create_submenu(&self, input: SubmenuInput) -> Result<Submenu, CatalogError> {
        let name = required(&input.name, "name")?;
        let slug = slug_or_derived(input.slug.as_deref(), name)?;
        let icon_url = self.image(input.icon_url, "iconUrl")?;

        let submenu = self
            .catalog
            .create_submenu(&NewSubmenu {
                subcategory_id: input.subcategory_id,
                name: name.to_owned(),
                slug,
                icon_url,
                position: input.position.unwrap_or(0),
                is_active: input.is_active.unwrap_or(true),
                link: input.link.unwrap_or_default(),
            })
            .await?;
        self.cache.invalidate_all();
        Ok(submenu)
    }

    /// Update a submenu.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, `Repository(NotFound)` for an
    /// unknown submenu, or `Repository(Conflict)` for a duplicate slug.
    pub async fn update_submenu(
        &self,
        id: SubmenuId,
        patch: SubmenuPatch,
    ) -> Result<Submenu, CatalogError> {
        let name = match patch.name.as_deref() {
            Some(name) => Some(required(name, "name")?.to_owned()),
            None => None,
        };
        let slug = patch.slug.as_deref().map(Slug::parse).transpose()?;
        let icon_url = match patch.icon_url {
            Some(url) => Some(self.image(Some(url), "iconUrl")?),
            None => None,
        };

        let submenu = self
            .catalog
            .update_submenu(
                id,
                &SubmenuChanges {
                    name,
                    slug,
                    icon_url,
                    position: patch.position,
                    is_active: patch.is_active,
                    link: patch.link,
                },
            )
            .await?;
        self.cache.invalidate_all();
        Ok(submenu)
    }

    /// Delete a submenu.
    ///
    /// # Errors
    ///
    /// Returns `Repository(NotFound)` for an unknown submenu.
    pub async fn delete_submenu(&self, id: SubmenuId) -> Result<(), CatalogError> {
        self.catalog.delete_submenu(id).await?;
        self.cache.invalidate_all();
        Ok(())
    }

    fn image(&self, url: Option<String>, field: &'static str) -> Result<String, CatalogError> {
        let url = url.unwrap_or_default().trim().to_owned();
        if self.images.allows(&url) {
            Ok(url)
        } else {
            Err(CatalogError::ImageHostNotAllowed { field })
        }
    }
}

fn required<'s>(value: &'s str, field: &'static str) -> Result<&'s str, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        Err(CatalogError::MissingField(field))
    } else {
        Ok(value)
    }
}

fn slug_or_derived(slug: Option<&str>, name: &str) -> Result<Slug, CatalogError> {
    match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => Ok(Slug::parse(slug)?),
        None => Ok(Slug::from_name(name)?),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn navigation(slug: &Slug) -> CategoryNavigation {
        CategoryNavigation {
            category: Category {
                id: CategoryId::new(1),
                name: "Fashion".to_owned(),
                slug: slug.clone(),
                banner_url: String::new(),
                mobile_banner_url: String::new(),
                is_active: true,
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            },
            subcategories: Vec::new(),
        }
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(required("  Mobiles ", "name").unwrap(), "Mobiles");
        assert!(matches!(
            required("   ", "name"),
            Err(CatalogError::MissingField("name"))
        ));
    }

    #[test]
    fn test_slug_defaults_to_name() {
        assert_eq!(
            slug_or_derived(None, "Men's Top Wear").unwrap().as_str(),
            "men-s-top-wear"
        );
        assert_eq!(
            slug_or_derived(Some("  "), "Kurtas").unwrap().as_str(),
            "kurtas"
        );
        assert_eq!(
            slug_or_derived(Some("Casual-Shirts"), "ignored").unwrap().as_str(),
            "casual-shirts"
        );
        assert!(slug_or_derived(Some("bad slug"), "x").is_err());
    }

    #[tokio::test]
    async fn test_navigation_cache_invalidate_all() {
        let cache = NavigationCache::new();
        let slug = Slug::parse("fashion").unwrap();
        let nav = Arc::new(navigation(&slug));

        cache.insert(slug.clone(), nav, cache.generation()).await;
        assert!(cache.get(&slug).await.is_some());

        cache.invalidate_all();
        assert!(cache.get(&slug).await.is_none());
    }

    #[tokio::test]
    async fn test_tree_loaded_before_invalidation_is_not_cached() {
        let cache = NavigationCache::new();
        let slug = Slug::parse("fashion").unwrap();

        let loaded_at = cache.generation();
        cache.invalidate_all();
        cache
            .insert(slug.clone(), Arc::new(navigation(&slug)), loaded_at)
            .await;

        assert!(cache.get(&slug).await.is_none());

        cache
            .insert(slug.clone(), Arc::new(navigation(&slug)), cache.generation())
            .await;
        assert!(cache.get(&slug).await.is_some());
    }
}

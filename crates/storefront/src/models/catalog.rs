//! Catalog navigation tree: category, subcategory, submenu.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use flipzokart_core::{CategoryId, Slug, SubcategoryId, SubmenuId};

/// Top-level department (e.g. "Fashion").
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
    pub banner_url: String,
    pub mobile_banner_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Group of submenus inside a category (e.g. "Men's Top Wear").
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub category_id: CategoryId,
    pub name: String,
    pub slug: Slug,
    pub icon_url: String,
    pub position: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Navigational leaf under a subcategory.
///
/// An empty `link` means the frontend builds the URL from the slugs.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submenu {
    pub id: SubmenuId,
    pub subcategory_id: SubcategoryId,
    pub name: String,
    pub slug: Slug,
    pub icon_url: String,
    pub position: i32,
    pub is_active: bool,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submenu {
    /// Where the submenu entry points: the override link, or the slug path.
    #[must_use]
    pub fn href(&self, category: &Slug, subcategory: &Slug) -> String {
        if self.link.trim().is_empty() {
            format!("/{category}/{subcategory}/{}", self.slug)
        } else {
            self.link.clone()
        }
    }
}

/// Submenu as rendered in a navigation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmenuEntry {
    pub id: SubmenuId,
    pub name: String,
    pub slug: Slug,
    pub icon_url: String,
    pub href: String,
}

/// Subcategory with its active submenus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryNavigation {
    pub id: SubcategoryId,
    pub name: String,
    pub slug: Slug,
    pub icon_url: String,
    pub submenus: Vec<SubmenuEntry>,
}

/// Full navigation tree below one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNavigation {
    pub category: Category,
    pub subcategories: Vec<SubcategoryNavigation>,
}

impl CategoryNavigation {
    /// Assemble the tree from rows already ordered by position then name.
    ///
    /// Submenus whose subcategory is not in `subcategories` are dropped.
    #[must_use]
    pub fn assemble(
        category: Category,
        subcategories: Vec<Subcategory>,
        submenus: &[Submenu],
    ) -> Self {
        let subcategories = subcategories
            .into_iter()
            .map(|sub| {
                let entries = submenus
                    .iter()
                    .filter(|menu| menu.subcategory_id == sub.id)
                    .map(|menu| SubmenuEntry {
                        id: menu.id,
                        name: menu.name.clone(),
                        slug: menu.slug.clone(),
                        icon_url: menu.icon_url.clone(),
                        href: menu.href(&category.slug, &sub.slug),
                    })
                    .collect();
                SubcategoryNavigation {
                    id: sub.id,
                    name: sub.name,
                    slug: sub.slug,
                    icon_url: sub.icon_url,
                    submenus: entries,
                }
            })
            .collect();

        Self {
            category,
            subcategories,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_767_225_600, 0).unwrap()
    }

    fn category() -> Category {
        Category {
            id: CategoryId::new(1),
            name: "Fashion".to_owned(),
            slug: Slug::parse("fashion").unwrap(),
            banner_url: String::new(),
            mobile_banner_url: String::new(),
            is_active: true,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn subcategory(id: i32, slug: &str) -> Subcategory {
        Subcategory {
            id: SubcategoryId::new(id),
            category_id: CategoryId::new(1),
            name: slug.to_owned(),
            slug: Slug::parse(slug).unwrap(),
            icon_url: String::new(),
            position: 0,
            is_active: true,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn submenu(id: i32, subcategory_id: i32, slug: &str, link: &str) -> Submenu {
        Submenu {
            id: SubmenuId::new(id),
            subcategory_id: SubcategoryId::new(subcategory_id),
            name: slug.to_owned(),
            slug: Slug::parse(slug).unwrap(),
            icon_url: String::new(),
            position: 0,
            is_active: true,
            link: link.to_owned(),
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_assemble_groups_submenus_and_builds_hrefs() {
        let nav = CategoryNavigation::assemble(
            category(),
            vec![subcategory(10, "mens-top-wear"), subcategory(11, "footwear")],
            &[
                submenu(1, 10, "t-shirts", ""),
                submenu(2, 11, "sneakers", "/sale/sneakers"),
                submenu(3, 99, "orphan", ""),
            ],
        );

        assert_eq!(nav.subcategories.len(), 2);
        let tops = &nav.subcategories[0];
        assert_eq!(tops.submenus.len(), 1);
        assert_eq!(tops.submenus[0].href, "/fashion/mens-top-wear/t-shirts");
        let shoes = &nav.subcategories[1];
        assert_eq!(shoes.submenus[0].href, "/sale/sneakers");
    }

    #[test]
    fn test_same_slug_allowed_under_different_subcategories() {
        let nav = CategoryNavigation::assemble(
            category(),
            vec![subcategory(10, "men"), subcategory(11, "women")],
            &[submenu(1, 10, "jeans", ""), submenu(2, 11, "jeans", "")],
        );
        assert_eq!(nav.subcategories[0].submenus[0].href, "/fashion/men/jeans");
        assert_eq!(nav.subcategories[1].submenus[0].href, "/fashion/women/jeans");
    }
}

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{
    entities::category::{Category, CreateCategory},
    middleware::{
        error::{AppError, AppResult},
        utils::extractor_utils::SearchParams,
    },
    store::AppStore,
    utils::{
        pagination::{paginate, Page, ADMIN_CATEGORIES_PAGE_SIZE},
        validate_utils::{trim_string, validate_not_blank},
    },
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CategoryInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(
        custom(function = validate_not_blank),
        length(max = 100, message = "Max 100 characters")
    )]
    pub name: String,
}

pub struct CategoryService<'a> {
    store: &'a AppStore,
}

impl<'a> CategoryService<'a> {
    pub fn new(store: &'a AppStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.store.categories.fetch_all().await
    }

    pub async fn admin_list(&self, params: SearchParams) -> AppResult<Page<Category>> {
        let term = params.term();
        let categories = self
            .store
            .categories
            .fetch_all()
            .await?
            .into_iter()
            .filter(|c| match &term {
                Some(term) => c.name.to_lowercase().contains(term),
                None => true,
            })
            .collect();
        Ok(paginate(categories, params.page, ADMIN_CATEGORIES_PAGE_SIZE))
    }

    async fn ensure_unique_name(&self, name: &str, except_id: Option<&str>) -> AppResult<()> {
        let duplicate = self
            .store
            .categories
            .fetch_all()
            .await?
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name) && Some(c.id.as_str()) != except_id);
        if duplicate {
            return Err(AppError::Generic {
                description: format!("Category {name} already exists"),
            });
        }
        Ok(())
    }

    pub async fn create(&self, input: CategoryInput) -> AppResult<Category> {
        input.validate()?;
        self.ensure_unique_name(&input.name, None).await?;
        let category = self
            .store
            .categories
            .create(&CreateCategory { name: input.name })
            .await?;
        info!("category {} created", category.id);
        Ok(category)
    }

    pub async fn rename(&self, id: &str, input: CategoryInput) -> AppResult<Category> {
        input.validate()?;
        let mut category = self.store.categories.find(id).await?;
        self.ensure_unique_name(&input.name, Some(id)).await?;
        category.name = input.name;
        self.store.categories.update(&category).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store.categories.remove(id).await
    }
}

//! Page and widget service.

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use nexus_db::entities::page::{self, PageType, PageVisibility};
use nexus_db::entities::widget::{self, WidgetRect};
use nexus_db::repositories::PageRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a page.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(rename = "type")]
    pub page_type: PageType,
    pub visibility: Option<PageVisibility>,
    pub layout_config: Option<serde_json::Value>,
}

/// Input for updating a page.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageInput {
    pub page_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub visibility: Option<PageVisibility>,
    pub layout_config: Option<serde_json::Value>,
}

/// Input for placing a widget on a page.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWidgetInput {
    pub page_id: i64,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub widget_type: String,
    pub position: WidgetRect,
    pub config: Option<serde_json::Value>,
}

/// Input for updating a widget.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWidgetInput {
    pub widget_id: i64,
    pub position: Option<WidgetRect>,
    pub config: Option<serde_json::Value>,
}

/// Service for pages and the widgets placed on them.
#[derive(Clone)]
pub struct PageService {
    page_repo: PageRepository,
}

impl PageService {
    /// Create a new page service.
    #[must_use]
    pub const fn new(page_repo: PageRepository) -> Self {
        Self { page_repo }
    }

    /// List the caller's pages, newest first.
    pub async fn list(&self, user_id: i64) -> AppResult<Vec<page::Model>> {
        self.page_repo.find_by_user(user_id).await
    }

    /// Get a page the caller owns.
    pub async fn get_owned(&self, page_id: i64, user_id: i64) -> AppResult<page::Model> {
        let page = self.page_repo.get_by_id(page_id).await?;
        if page.user_id != user_id {
            return Err(AppError::Forbidden("Not the page owner".to_string()));
        }
        Ok(page)
    }

    /// Create a page for the caller.
    pub async fn create(&self, user_id: i64, input: CreatePageInput) -> AppResult<page::Model> {
        input.validate()?;

        let model = page::ActiveModel {
            user_id: Set(user_id),
            name: Set(input.name),
            page_type: Set(input.page_type),
            visibility: Set(input.visibility.unwrap_or_default()),
            layout_config: Set(input.layout_config),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.page_repo.create(model).await
    }

    /// Update a page the caller owns.
    pub async fn update(&self, user_id: i64, input: UpdatePageInput) -> AppResult<page::Model> {
        input.validate()?;

        let page = self.get_owned(input.page_id, user_id).await?;
        let mut active: page::ActiveModel = page.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(visibility) = input.visibility {
            active.visibility = Set(visibility);
        }
        if let Some(layout_config) = input.layout_config {
            active.layout_config = Set(Some(layout_config));
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.page_repo.update(active).await
    }

    /// Delete a page the caller owns, along with its widgets.
    pub async fn delete(&self, user_id: i64, page_id: i64) -> AppResult<()> {
        self.get_owned(page_id, user_id).await?;
        self.page_repo.delete(page_id).await
    }

    // ==================== Widget Operations ====================

    /// List widgets on a page the caller owns.
    pub async fn list_widgets(&self, user_id: i64, page_id: i64) -> AppResult<Vec<widget::Model>> {
        self.get_owned(page_id, user_id).await?;
        self.page_repo.find_widgets_by_page(page_id).await
    }

    /// Place a widget on a page the caller owns.
    pub async fn create_widget(
        &self,
        user_id: i64,
        input: CreateWidgetInput,
    ) -> AppResult<widget::Model> {
        input.validate()?;

        self.get_owned(input.page_id, user_id).await?;

        let model = widget::ActiveModel {
            page_id: Set(input.page_id),
            widget_type: Set(input.widget_type),
            position: Set(input.position),
            config: Set(input.config),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.page_repo.create_widget(model).await
    }

    /// Update a widget on a page the caller owns.
    pub async fn update_widget(
        &self,
        user_id: i64,
        input: UpdateWidgetInput,
    ) -> AppResult<widget::Model> {
        input.validate()?;

        let widget = self.page_repo.get_widget_by_id(input.widget_id).await?;
        self.get_owned(widget.page_id, user_id).await?;

        let mut active: widget::ActiveModel = widget.into();
        if let Some(position) = input.position {
            active.position = Set(position);
        }
        if let Some(config) = input.config {
            active.config = Set(Some(config));
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.page_repo.update_widget(active).await
    }

    /// Remove a widget from a page the caller owns.
    pub async fn delete_widget(&self, user_id: i64, widget_id: i64) -> AppResult<()> {
        let widget = self.page_repo.get_widget_by_id(widget_id).await?;
        self.get_owned(widget.page_id, user_id).await?;
        self.page_repo.delete_widget(widget_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_page(id: i64, user_id: i64) -> page::Model {
        page::Model {
            id,
            user_id,
            name: "My Hub".to_string(),
            page_type: PageType::Social,
            visibility: PageVisibility::Public,
            layout_config: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_owned_rejects_other_user() {
        let page = create_test_page(1, 10);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[page]])
                .into_connection(),
        );

        let service = PageService::new(PageRepository::new(db));
        let result = service.get_owned(1, 99).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = PageService::new(PageRepository::new(db));

        let result = service
            .create(
                10,
                CreatePageInput {
                    name: String::new(),
                    page_type: PageType::Social,
                    visibility: None,
                    layout_config: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

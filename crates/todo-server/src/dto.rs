use serde::{Deserialize, Serialize};

use todo_core::models::{Item, ItemChanges};

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Wire representation of a todo item.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    /// Client-chosen item id
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Buy milk")]
    pub title: String,
    pub is_completed: bool,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.title,
            is_completed: item.is_completed,
        }
    }
}

impl From<ItemDto> for Item {
    fn from(dto: ItemDto) -> Self {
        Item {
            id: dto.id,
            title: dto.title,
            is_completed: dto.is_completed,
        }
    }
}

impl From<ItemDto> for ItemChanges {
    fn from(dto: ItemDto) -> Self {
        ItemChanges {
            title: dto.title,
            is_completed: dto.is_completed,
        }
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "omer.faruk@email.com")]
    pub username: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

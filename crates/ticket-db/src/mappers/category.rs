//! Category entity <-> model mapper

use ticket_core::Category;

use crate::models::CategoryModel;

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category {
            id: model.id,
            name: model.name,
            emoji: model.emoji,
            description: model.description,
        }
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
    prelude::DateTimeWithTimeZone,
};
use uuid::Uuid;

use super::entities::prelude::Todo;
use super::entities::todo;

pub async fn create_todo(
    db: &DatabaseConnection,
    title: &str,
    description: Option<String>,
    due_date: Option<DateTimeWithTimeZone>,
) -> Result<todo::Model, sea_orm::DbErr> {
    let model = todo::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set(description),
        due_date: Set(due_date),
        is_resolved: Set(false),
        ..Default::default()
    };
    model.insert(db).await
}

/// Unresolved entries first, nearest due date first within each group.
pub async fn list_todos(db: &DatabaseConnection) -> Result<Vec<todo::Model>, sea_orm::DbErr> {
    Todo::find()
        .order_by_asc(todo::Column::IsResolved)
        .order_by_asc(todo::Column::DueDate)
        .all(db)
        .await
}

pub async fn find_todo_by_id(
    db: &DatabaseConnection,
    id: &Uuid,
) -> Result<Option<todo::Model>, sea_orm::DbErr> {
    Todo::find_by_id(*id).one(db).await
}

/// Full overwrite of the editable fields. `is_resolved` is left as stored.
pub async fn update_todo(
    db: &DatabaseConnection,
    id: &Uuid,
    title: &str,
    description: Option<String>,
    due_date: Option<DateTimeWithTimeZone>,
) -> Result<Option<todo::Model>, sea_orm::DbErr> {
    let Some(item) = Todo::find_by_id(*id).one(db).await? else {
        return Ok(None);
    };
    let mut active: todo::ActiveModel = item.into();
    active.title = Set(title.to_string());
    active.description = Set(description);
    active.due_date = Set(due_date);
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(Some(active.update(db).await?))
}

pub async fn delete_todo(db: &DatabaseConnection, id: &Uuid) -> Result<bool, sea_orm::DbErr> {
    let result = Todo::delete_by_id(*id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

pub async fn toggle_resolved(
    db: &DatabaseConnection,
    id: &Uuid,
) -> Result<Option<todo::Model>, sea_orm::DbErr> {
    let Some(item) = Todo::find_by_id(*id).one(db).await? else {
        return Ok(None);
    };
    let flipped = !item.is_resolved;
    let mut active: todo::ActiveModel = item.into();
    active.is_resolved = Set(flipped);
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(Some(active.update(db).await?))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use super::{delete_todo, list_todos, toggle_resolved, update_todo};

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    #[tokio::test]
    async fn update_todo_returns_none_when_record_is_missing() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<super::todo::Model>::new()])
            .into_connection();

        let result = update_todo(&db, &id, "new title", None, Some(ts()))
            .await
            .expect("query should succeed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn toggle_resolved_returns_none_when_record_is_missing() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<super::todo::Model>::new()])
            .into_connection();

        let result = toggle_resolved(&db, &id)
            .await
            .expect("query should succeed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_todo_returns_false_when_nothing_was_removed() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let deleted = delete_todo(&db, &id).await.expect("query should succeed");
        assert!(!deleted);
    }

    #[tokio::test]
    async fn list_todos_propagates_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("list failed".to_string())])
            .into_connection();

        let err = list_todos(&db).await.expect_err("list should fail");
        assert!(matches!(err, DbErr::Custom(_)));
    }
}

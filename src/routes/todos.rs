use std::sync::Arc;

use askama::Template;
use axum::{
    Router,
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::Local;
use uuid::Uuid;

use crate::{
    db::{entities::todo, todo_repo},
    error::AppError,
    state::AppState,
};

use super::forms::{FormErrors, TodoForm};
use super::public::project_name;

#[derive(Template)]
#[template(path = "todo_list.html")]
struct TodoListTemplate {
    now: String,
    project_name: String,
    todos: Vec<TodoRow>,
}

struct TodoRow {
    id: Uuid,
    title: String,
    description: String,
    due_date: String,
    is_resolved: bool,
}

#[derive(Template)]
#[template(path = "todo_form.html")]
struct TodoFormTemplate {
    now: String,
    project_name: String,
    heading: &'static str,
    action: String,
    form: TodoForm,
    errors: FormErrors,
}

#[derive(Template)]
#[template(path = "todo_confirm_delete.html")]
struct ConfirmDeleteTemplate {
    now: String,
    project_name: String,
    id: Uuid,
    title: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_todos))
        .route("/new", get(new_todo).post(create_todo))
        .route("/{id}/edit", get(edit_todo).post(update_todo))
        .route("/{id}/delete", get(confirm_delete).post(delete_todo))
        // GET kept alongside POST so plain links can flip the flag.
        .route("/{id}/toggle", get(toggle_todo).post(toggle_todo))
        .with_state(state)
}

async fn list_todos(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let todos = todo_repo::list_todos(&state.db).await?;
    let rendered = TodoListTemplate {
        now: Local::now().to_rfc3339(),
        project_name: project_name(),
        todos: todos.into_iter().map(TodoRow::from).collect(),
    }
    .render()?;
    Ok(Html(rendered))
}

async fn new_todo() -> Result<Html<String>, AppError> {
    let rendered = form_template(
        "New Todo",
        "/new".to_string(),
        TodoForm::default(),
        FormErrors::default(),
    )
    .render()?;
    Ok(Html(rendered))
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    match form.validate() {
        Ok(input) => {
            todo_repo::create_todo(&state.db, &input.title, input.description, input.due_date)
                .await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => {
            let rendered = form_template("New Todo", "/new".to_string(), form, errors).render()?;
            Ok(Html(rendered).into_response())
        }
    }
}

async fn edit_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let item = require_todo(&state, &id).await?;
    let rendered = form_template(
        "Edit Todo",
        format!("/{id}/edit"),
        TodoForm::from_model(&item),
        FormErrors::default(),
    )
    .render()?;
    Ok(Html(rendered))
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    require_todo(&state, &id).await?;
    match form.validate() {
        Ok(input) => {
            todo_repo::update_todo(&state.db, &id, &input.title, input.description, input.due_date)
                .await?
                .ok_or_else(|| AppError::not_found("Todo not found"))?;
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => {
            let rendered =
                form_template("Edit Todo", format!("/{id}/edit"), form, errors).render()?;
            Ok(Html(rendered).into_response())
        }
    }
}

async fn confirm_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let item = require_todo(&state, &id).await?;
    let rendered = ConfirmDeleteTemplate {
        now: Local::now().to_rfc3339(),
        project_name: project_name(),
        id: item.id,
        title: item.title,
    }
    .render()?;
    Ok(Html(rendered))
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    let deleted = todo_repo::delete_todo(&state.db, &id).await?;
    if !deleted {
        return Err(AppError::not_found("Todo not found"));
    }
    Ok(Redirect::to("/"))
}

async fn toggle_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    todo_repo::toggle_resolved(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Todo not found"))?;
    Ok(Redirect::to("/"))
}

async fn require_todo(state: &AppState, id: &Uuid) -> Result<todo::Model, AppError> {
    todo_repo::find_todo_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Todo not found"))
}

fn form_template(
    heading: &'static str,
    action: String,
    form: TodoForm,
    errors: FormErrors,
) -> TodoFormTemplate {
    TodoFormTemplate {
        now: Local::now().to_rfc3339(),
        project_name: project_name(),
        heading,
        action,
        form,
        errors,
    }
}

impl From<todo::Model> for TodoRow {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description.unwrap_or_default(),
            due_date: model
                .due_date
                .map(|value| value.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            is_resolved: model.is_resolved,
        }
    }
}

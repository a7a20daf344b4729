use crate::{
    auth::{require_admin, CurrentUser},
    error::AppError,
    models::{CreateTaskRequest, TaskListQuery, UpdateTaskRequest},
    store::TaskStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Retrieves the shared task list.
///
/// Supports a `status` query parameter selecting `all` (default), `pending`
/// or `completed` tasks. Tasks are ordered by creation date, most recent
/// first.
///
/// ## Responses:
/// - `200 OK`: a JSON array of `Task` objects.
/// - `401 Unauthorized`: if the request lacks a valid bearer token.
#[get("")]
pub async fn list_tasks(
    tasks: web::Data<TaskStore>,
    query: web::Query<TaskListQuery>,
    _user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let tasks = tasks.list(query.status).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task on the shared list.
///
/// ## Request Body:
/// - `title`: 1-255 characters (required).
///
/// ## Responses:
/// - `201 Created`: the new `Task`, with `completed` set to `false`.
/// - `401 Unauthorized`: if the request lacks a valid bearer token.
/// - `422 Unprocessable Entity`: if the title fails validation.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskStore>,
    task_data: web::Json<CreateTaskRequest>,
    _user: CurrentUser,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = tasks.create(&task_data.title).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Partially updates a task.
///
/// Either `title` or `completed` (or both) may be supplied; omitted fields
/// keep their current value and `updated_at` is refreshed.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `401 Unauthorized`: if the request lacks a valid bearer token.
/// - `404 Not Found`: if no task has the given id.
/// - `422 Unprocessable Entity`: if `title` is present but empty.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskStore>,
    task_id: web::Path<i32>,
    task_data: web::Json<UpdateTaskRequest>,
    _user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let update = task_data.into_inner();
    let task = tasks
        .update(task_id.into_inner(), update.title, update.completed)
        .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `204 No Content`: on successful deletion.
/// - `401 Unauthorized`: if the request lacks a valid bearer token.
/// - `404 Not Found`: if no task has the given id.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskStore>,
    task_id: web::Path<i32>,
    _user: CurrentUser,
) -> Result<impl Responder, AppError> {
    tasks.delete_by_id(task_id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Deletes every completed task. Admin only.
///
/// ## Responses:
/// - `200 OK`: `{"deleted": n}` where `n` may be zero.
/// - `401 Unauthorized`: if the request lacks a valid bearer token.
/// - `403 Forbidden`: if the authenticated user is not an admin.
#[delete("/completed")]
pub async fn delete_completed(
    tasks: web::Data<TaskStore>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    require_admin(&user.0)?;

    let deleted = tasks.delete_completed().await?;
    log::info!("{} deleted {} completed tasks", user.0.username, deleted);

    Ok(HttpResponse::Ok().json(json!({ "deleted": deleted })))
}

/// Deletes every task on the list. Admin only.
///
/// ## Responses:
/// - `200 OK`: `{"deleted": n}` where `n` may be zero.
/// - `401 Unauthorized`: if the request lacks a valid bearer token.
/// - `403 Forbidden`: if the authenticated user is not an admin.
#[delete("/all")]
pub async fn delete_all(
    tasks: web::Data<TaskStore>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    require_admin(&user.0)?;

    let deleted = tasks.delete_all().await?;
    log::info!("{} cleared the task list ({} tasks)", user.0.username, deleted);

    Ok(HttpResponse::Ok().json(json!({ "deleted": deleted })))
}

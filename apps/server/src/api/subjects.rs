use std::sync::Arc;

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{AttendanceRequest, AttendanceResponse, DeleteResponse, SubjectView},
};
use attendance_core::subjects::{NewSubject, SubjectServiceTrait, SubjectUpdate};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{delete, get, put},
    Extension, Json, Router,
};

async fn list_subjects(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<SubjectView>>> {
    let subjects = state.subject_service.list_subjects(&user.user_id)?;
    Ok(Json(subjects.into_iter().map(SubjectView::from).collect()))
}

async fn get_subject(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<SubjectView>> {
    let subject = state.subject_service.get_subject(&user.user_id, &id)?;
    Ok(Json(subject.into()))
}

async fn create_subject(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<NewSubject>, JsonRejection>,
) -> ApiResult<Json<SubjectView>> {
    let Json(new_subject) = payload?;
    let subject = state
        .subject_service
        .create_subject(&user.user_id, new_subject)
        .await?;
    Ok(Json(subject.into()))
}

async fn record_attendance(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> ApiResult<Json<AttendanceResponse>> {
    let Json(request) = payload?;
    let outcome = state
        .subject_service
        .record_attendance(&user.user_id, &id, request.attended.into())
        .await?;
    Ok(Json(outcome.into()))
}

async fn update_subject(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<SubjectUpdate>, JsonRejection>,
) -> ApiResult<Json<SubjectView>> {
    let Json(update) = payload?;
    let subject = state
        .subject_service
        .update_subject(&user.user_id, &id, update)
        .await?;
    Ok(Json(subject.into()))
}

async fn delete_subject(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<DeleteResponse>> {
    state
        .subject_service
        .delete_subject(&user.user_id, &id)
        .await?;
    Ok(Json(DeleteResponse { deleted: true }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/subjects", get(list_subjects).post(create_subject))
        .route("/subjects/{id}", get(get_subject).put(record_attendance))
        .route("/subjects/update/{id}", put(update_subject))
        .route("/subjects/delete/{id}", delete(delete_subject))
}

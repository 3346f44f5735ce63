use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{
        request::{
            GenerateQuizRequestDto, PaginationParams, RecordOutcomesRequestDto,
            UpdateQuizRequestDto,
        },
        response::{ExplanationsResponse, MessageResponse, QuizCreatedResponse, QuizResponse},
    },
};

#[post("/api/quiz/create/{owner_id}")]
async fn create_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    owner_id: web::Path<String>,
    request: web::Json<GenerateQuizRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    log::info!(
        "[{}] Quiz generation requested by {}",
        get_request_id(&req).unwrap_or_default(),
        owner_id
    );

    let quiz_id = state
        .quiz_service
        .generate_quiz(&owner_id, request.into())
        .await?;
    Ok(HttpResponse::Created().json(QuizCreatedResponse::new(quiz_id)))
}

#[post("/api/quiz/explain/{quiz_id}")]
async fn explain_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let explanations = state
        .explanation_service
        .generate_explanations(&quiz_id)
        .await?;
    Ok(HttpResponse::Ok().json(ExplanationsResponse { explanations }))
}

#[get("/api/quizzes/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(QuizResponse { quiz }))
}

#[get("/api/users/{owner_id}/quizzes")]
async fn list_owner_quizzes(
    state: web::Data<AppState>,
    owner_id: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    let response = state
        .quiz_service
        .list_quizzes_by_owner(&owner_id, pagination.offset(), pagination.limit())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/quizzes")]
async fn list_all_quizzes(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    let response = state
        .quiz_service
        .list_all_quizzes(pagination.offset(), pagination.limit())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/api/quizzes/{id}")]
async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuizRequestDto>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .update_quiz_details(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(QuizResponse { quiz }))
}

#[put("/api/quizzes/{id}/outcomes")]
async fn record_outcomes(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<RecordOutcomesRequestDto>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .record_outcomes(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(QuizResponse { quiz }))
}

#[delete("/api/quizzes/{id}")]
async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("Quiz {} deleted", id),
    }))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

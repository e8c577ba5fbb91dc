//! JSON API over the household stores and the suggestion engine.
//!
//! - `GET|POST    /api/ingredients`, `PUT|DELETE /api/ingredients/{id}`
//! - `PUT         /api/ingredients/bulk-update`
//! - `GET|POST    /api/sales`, `PUT|DELETE /api/sales/{id}`
//! - `GET|POST    /api/family`, `PUT|DELETE /api/family/{id}`
//! - `POST        /api/menu/suggest`
//! - `POST        /api/menu/accept`

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use larder_core::domain::family::{FamilyMember, FamilyMemberDraft, FamilyMemberId};
use larder_core::domain::ingredient::{
    BulkQuantityUpdate, Ingredient, IngredientDraft, IngredientId,
};
use larder_core::domain::sale::{Sale, SaleDraft, SaleId};
use larder_core::errors::{ApplicationError, DomainError, InterfaceError};
use larder_core::{
    Calendar, ConsumptionPlan, MenuSuggestion, SuggestionEngine, SuggestionRequest,
};
use larder_db::{FamilyMemberRepository, IngredientRepository, RepositoryError, SaleRepository};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub ingredients: Arc<dyn IngredientRepository>,
    pub sales: Arc<dyn SaleRepository>,
    pub family: Arc<dyn FamilyMemberRepository>,
    pub engine: SuggestionEngine,
    pub calendar: Arc<dyn Calendar>,
}

impl AppState {
    pub fn new(
        ingredients: Arc<dyn IngredientRepository>,
        sales: Arc<dyn SaleRepository>,
        family: Arc<dyn FamilyMemberRepository>,
        engine: SuggestionEngine,
        calendar: Arc<dyn Calendar>,
    ) -> Self {
        Self { ingredients, sales, family, engine, calendar }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ApiError(InterfaceError);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
    pub correlation_id: String,
}

fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self(InterfaceError::bad_request(message, new_correlation_id()))
    }
}

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        Self(error.into_interface(new_correlation_id()))
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApplicationError::from(error).into()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        ApplicationError::from(error).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if self.0.is_client_fault() {
            warn!(
                event_name = "api.request.rejected",
                correlation_id = self.0.correlation_id(),
                error = self.0.message(),
                "request rejected"
            );
        } else {
            error!(
                event_name = "api.request.failed",
                correlation_id = self.0.correlation_id(),
                error = self.0.message(),
                "request failed"
            );
        }

        let body = ErrorBody {
            message: self.0.message().to_string(),
            correlation_id: self.0.correlation_id().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ingredients", get(list_ingredients).post(create_ingredient))
        .route("/api/ingredients/bulk-update", put(bulk_update_ingredients))
        .route("/api/ingredients/{id}", put(update_ingredient).delete(delete_ingredient))
        .route("/api/sales", get(list_sales).post(create_sale))
        .route("/api/sales/{id}", put(update_sale).delete(delete_sale))
        .route("/api/family", get(list_family).post(create_family_member))
        .route("/api/family/{id}", put(update_family_member).delete(delete_family_member))
        .route("/api/menu/suggest", post(suggest_menu))
        .route("/api/menu/accept", post(accept_menu))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Ingredients
// ---------------------------------------------------------------------------

async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    Ok(Json(state.ingredients.list().await?))
}

async fn create_ingredient(
    State(state): State<AppState>,
    payload: Result<Json<IngredientDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Ingredient>), ApiError> {
    let draft = json_body(payload)?;
    draft.validate()?;

    let created = state.ingredients.create(draft).await?;
    info!(
        event_name = "inventory.ingredient.created",
        ingredient_id = %created.id,
        "ingredient created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<IngredientDraft>, JsonRejection>,
) -> Result<Json<Ingredient>, ApiError> {
    let draft = json_body(payload)?;
    draft.validate()?;

    let id = IngredientId(id);
    let updated = state
        .ingredients
        .update(&id, draft)
        .await?
        .ok_or_else(|| ApplicationError::not_found("ingredient", id.as_str()))?;
    Ok(Json(updated))
}

async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state.ingredients.delete(&IngredientId(id.clone())).await?;
    info!(
        event_name = "inventory.ingredient.deleted",
        ingredient_id = %id,
        removed,
        "ingredient deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

async fn bulk_update_ingredients(
    State(state): State<AppState>,
    payload: Result<Json<BulkQuantityUpdate>, JsonRejection>,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    let batch = json_body(payload)?;
    batch.validate()?;

    Ok(Json(state.ingredients.bulk_update_quantities(&batch.items).await?))
}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

async fn list_sales(State(state): State<AppState>) -> Result<Json<Vec<Sale>>, ApiError> {
    Ok(Json(state.sales.list().await?))
}

async fn create_sale(
    State(state): State<AppState>,
    payload: Result<Json<SaleDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Sale>), ApiError> {
    let draft = json_body(payload)?;
    draft.validate()?;

    let created = state.sales.create(draft).await?;
    info!(event_name = "sales.sale.created", sale_id = %created.id.0, "sale created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SaleDraft>, JsonRejection>,
) -> Result<Json<Sale>, ApiError> {
    let draft = json_body(payload)?;
    draft.validate()?;

    let updated = state
        .sales
        .update(&SaleId(id.clone()), draft)
        .await?
        .ok_or_else(|| ApplicationError::not_found("sale", id))?;
    Ok(Json(updated))
}

async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state.sales.delete(&SaleId(id.clone())).await?;
    info!(event_name = "sales.sale.deleted", sale_id = %id, removed, "sale deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Family
// ---------------------------------------------------------------------------

async fn list_family(State(state): State<AppState>) -> Result<Json<Vec<FamilyMember>>, ApiError> {
    Ok(Json(state.family.list().await?))
}

async fn create_family_member(
    State(state): State<AppState>,
    payload: Result<Json<FamilyMemberDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<FamilyMember>), ApiError> {
    let draft = json_body(payload)?;
    draft.validate()?;

    let created = state.family.create(draft).await?;
    info!(
        event_name = "family.member.created",
        member_id = %created.id.0,
        "family member created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_family_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FamilyMemberDraft>, JsonRejection>,
) -> Result<Json<FamilyMember>, ApiError> {
    let draft = json_body(payload)?;
    draft.validate()?;

    let updated = state
        .family
        .update(&FamilyMemberId(id.clone()), draft)
        .await?
        .ok_or_else(|| ApplicationError::not_found("family member", id))?;
    Ok(Json(updated))
}

async fn delete_family_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state.family.delete(&FamilyMemberId(id.clone())).await?;
    info!(
        event_name = "family.member.deleted",
        member_id = %id,
        removed,
        "family member deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

async fn suggest_menu(
    State(state): State<AppState>,
    payload: Result<Json<SuggestionRequest>, JsonRejection>,
) -> Result<Json<Vec<MenuSuggestion>>, ApiError> {
    let request = json_body(payload)?;
    let today = state.calendar.today();
    Ok(Json(state.engine.suggest(&request, today)))
}

#[derive(Debug, Deserialize)]
pub struct AcceptSuggestionRequest {
    pub suggestion: MenuSuggestion,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptSuggestionResponse {
    pub plan: ConsumptionPlan,
    pub updated: Vec<Ingredient>,
}

/// Draw the accepted suggestion's ingredients down from current stock. Quantities never go
/// below zero; overdraws are reported as shortages on the plan, each paired with an active
/// sale when one matches.
async fn accept_menu(
    State(state): State<AppState>,
    payload: Result<Json<AcceptSuggestionRequest>, JsonRejection>,
) -> Result<Json<AcceptSuggestionResponse>, ApiError> {
    let AcceptSuggestionRequest { suggestion } = json_body(payload)?;

    let stock = state.ingredients.list().await?;
    let mut plan = ConsumptionPlan::build(&suggestion.used_ingredients, &stock);
    if plan.has_shortage() {
        let sales = state.sales.list().await?;
        plan.recommend_sales(&sales, state.calendar.today());
    }
    let updates = plan.quantity_updates();
    let updated = if updates.is_empty() {
        Vec::new()
    } else {
        state.ingredients.bulk_update_quantities(&updates).await?
    };

    info!(
        event_name = "menu.accept.applied",
        suggestion_id = %suggestion.id.0,
        lines = plan.lines.len(),
        updated = updated.len(),
        shortage = plan.has_shortage(),
        "suggestion accepted"
    );

    Ok(Json(AcceptSuggestionResponse { plan, updated }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        Router,
    };
    use chrono::NaiveDate;
    use larder_core::{FixedCalendar, SuggestionEngine};
    use larder_db::repositories::{
        InMemoryFamilyMemberRepository, InMemoryIngredientRepository, InMemorySaleRepository,
    };
    use larder_db::DemoHousehold;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::{router, AppState};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    fn empty_state() -> AppState {
        AppState::new(
            Arc::new(InMemoryIngredientRepository::default()),
            Arc::new(InMemorySaleRepository::default()),
            Arc::new(InMemoryFamilyMemberRepository::default()),
            SuggestionEngine::new(),
            Arc::new(FixedCalendar(today())),
        )
    }

    async fn demo_state() -> AppState {
        let state = empty_state();
        DemoHousehold::for_date(today())
            .seed(state.ingredients.as_ref(), state.sales.as_ref(), state.family.as_ref())
            .await
            .expect("seed demo household");
        state
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |value| Body::from(value.to_string())))
            .expect("request");

        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body bytes");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    #[tokio::test]
    async fn ingredient_crud_round_trip() {
        let app = router(empty_state());

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/ingredients",
            Some(json!({"name": "にんじん", "quantity": 3, "unit": "本", "category": "野菜"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().expect("id").to_string();

        let (status, listed) = send(&app, Method::GET, "/api/ingredients", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().map(Vec::len), Some(1));

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/ingredients/{id}"),
            Some(json!({"name": "にんじん", "quantity": 1.5, "expiryDate": "2026-10-25"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["quantity"], 1.5);
        assert_eq!(updated["expiryDate"], "2026-10-25");
        assert_eq!(updated["createdAt"], created["createdAt"]);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/ingredients/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, &format!("/api/ingredients/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn updating_a_missing_record_is_a_server_fault() {
        let app = router(empty_state());

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/ingredients/missing",
            Some(json!({"name": "卵", "quantity": 6})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"].as_str().expect("message").contains("not found"));
        assert!(body["correlationId"].is_string());
    }

    #[tokio::test]
    async fn invalid_payloads_are_bad_requests() {
        let app = router(empty_state());

        let (status, body) =
            send(&app, Method::POST, "/api/ingredients", Some(json!({"name": "  ", "quantity": 1})))
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().expect("message").contains("name"));

        let (status, _) =
            send(&app, Method::POST, "/api/ingredients", Some(json!({"name": "卵", "quantity": -1})))
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/family",
            Some(json!({"name": "祖母", "lifeStage": "elderly", "appetite": "light"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());

        let (status, _) =
            send(&app, Method::PUT, "/api/ingredients/bulk-update", Some(json!({"items": []})))
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bulk_update_skips_unknown_ids() {
        let state = demo_state().await;
        let app = router(state.clone());
        let milk = state
            .ingredients
            .list()
            .await
            .expect("list")
            .into_iter()
            .find(|item| item.name == "牛乳")
            .expect("milk");

        let (status, updated) = send(
            &app,
            Method::PUT,
            "/api/ingredients/bulk-update",
            Some(json!({"items": [
                {"id": milk.id.0, "quantity": 250},
                {"id": "ghost", "quantity": 1}
            ]})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let updated = updated.as_array().expect("array");
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0]["quantity"], 250.0);
    }

    #[tokio::test]
    async fn sale_create_computes_discounted_price() {
        let app = router(empty_state());

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/sales",
            Some(json!({
                "name": "鮭切り身",
                "price": 398,
                "discountRate": 30,
                "startDate": "2026-10-19",
                "endDate": "2026-10-21",
                "category": "魚"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["discountedPrice"], 279.0);
        let id = created["id"].as_str().expect("id").to_string();

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/sales/{id}"),
            Some(json!({"name": "鮭切り身", "price": 398})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(updated.get("discountedPrice").map_or(true, Value::is_null));
    }

    #[tokio::test]
    async fn family_members_accept_local_labels() {
        let app = router(empty_state());

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/family",
            Some(json!({"name": "母", "lifeStage": "40代", "appetite": "小食"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["lifeStage"], "forties");
        assert_eq!(created["appetite"], "light");

        let (_, listed) = send(&app, Method::GET, "/api/family", None).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn suggest_defaults_missing_lists_to_empty() {
        let app = router(empty_state());

        let (status, body) = send(&app, Method::POST, "/api/menu/suggest", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, _) = send(&app, Method::POST, "/api/menu/suggest", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn suggest_then_accept_draws_stock_down() {
        let state = demo_state().await;
        let app = router(state.clone());

        let (_, ingredients) = send(&app, Method::GET, "/api/ingredients", None).await;
        let (_, sales) = send(&app, Method::GET, "/api/sales", None).await;
        let (_, family) = send(&app, Method::GET, "/api/family", None).await;

        let (status, suggestions) = send(
            &app,
            Method::POST,
            "/api/menu/suggest",
            Some(json!({"ingredients": ingredients, "sales": sales, "familyMembers": family})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let suggestions = suggestions.as_array().expect("array").clone();
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0]["kind"], "balanced_plate");

        let (status, accepted) = send(
            &app,
            Method::POST,
            "/api/menu/accept",
            Some(json!({"suggestion": suggestions[0]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let lines = accepted["plan"]["lines"].as_array().expect("lines");
        assert_eq!(lines.len(), 2);
        let stock = state.ingredients.list().await.expect("list");
        for line in lines {
            let remaining = line["remaining"].as_f64().expect("remaining");
            assert!(remaining >= 0.0);
            let id = line["ingredientId"].as_str().expect("id");
            let item = stock.iter().find(|item| item.id.0 == id).expect("stock entry");
            assert_eq!(item.quantity, remaining);
        }
        assert_eq!(accepted["updated"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn accepting_a_suggestion_with_unknown_ingredients_changes_nothing() {
        let state = demo_state().await;
        let app = router(state.clone());
        let before = state.ingredients.list().await.expect("list");

        let (status, accepted) = send(
            &app,
            Method::POST,
            "/api/menu/accept",
            Some(json!({"suggestion": {
                "id": "s-1",
                "kind": "quick_use",
                "menuTitle": "Quick menu with 卵",
                "description": "",
                "nutritionComment": "",
                "usedIngredients": [
                    {"ingredientId": "ghost", "name": "卵", "usedQuantity": 2},
                    {"name": "塩", "usedQuantity": 0.5}
                ]
            }})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(accepted["plan"]["lines"], json!([]));
        assert_eq!(accepted["updated"], json!([]));
        assert_eq!(state.ingredients.list().await.expect("list"), before);
    }

    #[tokio::test]
    async fn accepting_resolves_ingredients_by_name_when_id_is_absent() {
        let state = demo_state().await;
        let app = router(state.clone());

        let (status, accepted) = send(
            &app,
            Method::POST,
            "/api/menu/accept",
            Some(json!({"suggestion": {
                "id": "s-2",
                "kind": "quick_use",
                "menuTitle": "Quick menu with 牛乳",
                "description": "",
                "nutritionComment": "",
                "usedIngredients": [
                    {"name": "牛乳", "usedQuantity": 200, "unit": "ml"},
                    {"name": "塩", "usedQuantity": 0.5}
                ]
            }})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let lines = accepted["plan"]["lines"].as_array().expect("lines");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["remaining"], json!(300.0));

        let stock = state.ingredients.list().await.expect("list");
        let milk = stock.iter().find(|item| item.name == "牛乳").expect("milk");
        assert_eq!(lines[0]["ingredientId"], json!(milk.id.0));
        assert_eq!(milk.quantity, 300.0);
        assert_eq!(accepted["updated"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn shortages_are_paired_with_active_sales() {
        let state = demo_state().await;
        let app = router(state.clone());

        let (status, accepted) = send(
            &app,
            Method::POST,
            "/api/menu/accept",
            Some(json!({"suggestion": {
                "id": "s-3",
                "kind": "balanced_plate",
                "menuTitle": "Balanced plate",
                "description": "",
                "nutritionComment": "",
                "usedIngredients": [
                    {"name": "鶏むね肉", "usedQuantity": 3},
                    {"name": "牛乳", "usedQuantity": 800},
                    {"name": "ブロッコリー", "usedQuantity": 0.5}
                ]
            }})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let lines = accepted["plan"]["lines"].as_array().expect("lines");
        assert_eq!(lines.len(), 3);

        assert_eq!(lines[0]["shortage"], json!(1.0));
        assert_eq!(lines[0]["sale"]["name"], "国産豚こま切れ");
        assert_eq!(lines[0]["sale"]["discountedPrice"], json!(224.0));
        assert_eq!(lines[0]["sale"]["storeName"], "グリーンマート桜台店");

        assert_eq!(lines[1]["shortage"], json!(300.0));
        assert!(lines[1].get("sale").is_none());

        assert_eq!(lines[2]["shortage"], json!(0.0));
        assert!(lines[2].get("sale").is_none());
    }
}

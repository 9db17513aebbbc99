use crate::{
    abstract_trait::produto::service::{DynProdutoCommandService, DynProdutoQueryService},
    domain::{
        requests::produto::{CadastrarProdutoForm, ImagemRecebida, ProdutoForm},
        response::{api::ApiResponse, produto::ProdutoResponse},
    },
    errors::{GENERIC_SERVER_ERROR, HttpError},
    state::AppState,
    storage::temp::TempStore,
};
use axum::{
    Json,
    extract::{Extension, Multipart, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;
use tracing::{error, warn};
use utoipa_axum::router::OpenApiRouter;

const DEFAULT_MIME: &str = "application/octet-stream";

/// Drains a multipart body into a [`ProdutoForm`]. Text parts map onto
/// their named fields; the `imagem` part is buffered to the temp store
/// and from that point on the form owns a file that someone must remove.
async fn parse_produto_form(
    temp: &TempStore,
    multipart: Multipart,
) -> Result<ProdutoForm, HttpError> {
    let mut form = ProdutoForm::default();

    match read_form_parts(temp, &mut form, multipart).await {
        Ok(()) => Ok(form),
        Err(err) => {
            // An image buffered before the failure would otherwise be
            // orphaned: the command service only cleans up forms it
            // actually receives.
            if let Some(imagem) = &form.imagem {
                temp.remove(&imagem.path).await;
            }
            Err(err)
        }
    }
}

async fn read_form_parts(
    temp: &TempStore,
    form: &mut ProdutoForm,
    mut multipart: Multipart,
) -> Result<(), HttpError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("⚠️ Malformed multipart request: {e}");
        HttpError::BadRequest("Requisição multipart inválida".into())
    })? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "imagem" {
            let nome_original = field
                .file_name()
                .map(str::to_string)
                .unwrap_or_else(|| "imagem".to_string());
            let mime = field
                .content_type()
                .map(str::to_string)
                .unwrap_or_else(|| DEFAULT_MIME.to_string());

            let bytes = field.bytes().await.map_err(|e| {
                warn!("⚠️ Failed to read image part: {e}");
                HttpError::BadRequest("Requisição multipart inválida".into())
            })?;

            let path = temp.save(&bytes).await.map_err(|e| {
                error!("❌ Failed to buffer upload to disk: {e}");
                HttpError::Internal(GENERIC_SERVER_ERROR.into())
            })?;

            // A repeated image part replaces the first; drop its buffer
            // so the superseded file does not linger in the upload dir.
            if let Some(anterior) = form.imagem.take() {
                temp.remove(&anterior.path).await;
            }

            form.imagem = Some(ImagemRecebida {
                path,
                nome_original,
                mime,
            });
            continue;
        }

        let value = field.text().await.map_err(|e| {
            warn!("⚠️ Failed to read field '{name}': {e}");
            HttpError::BadRequest("Requisição multipart inválida".into())
        })?;

        match name.as_str() {
            "farmacia" => form.farmacia = Some(value),
            "nome" => form.nome = Some(value),
            "nome_quimico" => form.nome_quimico = Some(value),
            "preco" => form.preco = Some(value),
            "quantidade" => form.quantidade = Some(value),
            "validade" => form.validade = Some(value),
            "lote" => form.lote = Some(value),
            "label" => form.label = Some(value),
            // unrecognized parts are ignored, not rejected
            _ => {}
        }
    }

    Ok(())
}

#[utoipa::path(
    get,
    path = "/produtos",
    tag = "Produto",
    responses(
        (status = 200, description = "List of registered products", body = ApiResponse<Vec<ProdutoResponse>>),
        (status = 404, description = "No products registered"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_produtos(
    Extension(service): Extension<DynProdutoQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/produtos/{id}",
    tag = "Produto",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProdutoResponse>),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_produto(
    Extension(service): Extension<DynProdutoQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/produtos/farmacia/{farmacia_id}",
    tag = "Produto",
    params(("farmacia_id" = i32, Path, description = "Pharmacy ID")),
    responses(
        (status = 200, description = "Products of one pharmacy", body = ApiResponse<Vec<ProdutoResponse>>),
        (status = 404, description = "No products for this pharmacy"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_produtos_by_farmacia(
    Extension(service): Extension<DynProdutoQueryService>,
    Path(farmacia_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_farmacia(farmacia_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/produtos/auth/register",
    tag = "Produto",
    request_body(content = CadastrarProdutoForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product registered", body = serde_json::Value),
        (status = 400, description = "Malformed multipart body"),
        (status = 422, description = "Missing or invalid field"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn cadastrar_produto(
    Extension(service): Extension<DynProdutoCommandService>,
    Extension(temp): Extension<TempStore>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let form = parse_produto_form(&temp, multipart).await?;
    let response = service.create_produto(&form).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/produtos/{id}",
    tag = "Produto",
    params(("id" = i32, Path, description = "Product ID")),
    request_body(content = CadastrarProdutoForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product replaced", body = serde_json::Value),
        (status = 400, description = "Malformed multipart body"),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Invalid numeric field"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn atualizar_produto(
    Extension(service): Extension<DynProdutoCommandService>,
    Extension(temp): Extension<TempStore>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let form = parse_produto_form(&temp, multipart).await?;
    let response = service.update_produto(id, &form).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/produtos/{id}",
    tag = "Produto",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = serde_json::Value),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn excluir_produto(
    Extension(service): Extension<DynProdutoCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_produto(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn produto_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/produtos", get(get_produtos))
        .route("/produtos/auth/register", post(cadastrar_produto))
        .route(
            "/produtos/farmacia/{farmacia_id}",
            get(get_produtos_by_farmacia),
        )
        .route("/produtos/{id}", get(get_produto))
        .route("/produtos/{id}", patch(atualizar_produto))
        .route("/produtos/{id}", delete(excluir_produto))
        .layer(Extension(app_state.di_container.produto_query.clone()))
        .layer(Extension(app_state.di_container.produto_command.clone()))
        .layer(Extension(app_state.temp.clone()))
}

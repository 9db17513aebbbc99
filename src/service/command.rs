use crate::{
    abstract_trait::{
        produto::{
            repository::{DynProdutoCommandRepository, DynProdutoQueryRepository},
            service::ProdutoCommandServiceTrait,
        },
        upload::{DynUploadRelay, UploadSource},
    },
    domain::{
        requests::produto::{CreateProdutoRequest, ProdutoForm, UpdateProdutoRequest},
        response::api::ApiResponse,
    },
    errors::ServiceError,
    storage::temp::TempStore,
};
use async_trait::async_trait;
use std::str::FromStr;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProdutoCommandService {
    command: DynProdutoCommandRepository,
    query: DynProdutoQueryRepository,
    relay: DynUploadRelay,
    temp: TempStore,
}

impl ProdutoCommandService {
    pub fn new(
        command: DynProdutoCommandRepository,
        query: DynProdutoQueryRepository,
        relay: DynUploadRelay,
        temp: TempStore,
    ) -> Self {
        Self {
            command,
            query,
            relay,
            temp,
        }
    }

    async fn create_inner(&self, form: &ProdutoForm) -> Result<ApiResponse<()>, ServiceError> {
        // Each field is probed independently so every absence produces
        // its own 422 message. Nothing is uploaded or persisted before
        // all checks pass.
        let farmacia = required(form.farmacia.as_deref(), "O id da farmácia é obrigatório!")?;
        let nome = required(form.nome.as_deref(), "O nome do produto é obrigatório!")?;
        let nome_quimico = required(
            form.nome_quimico.as_deref(),
            "O nome químico do produto é obrigatório!",
        )?;
        let preco_raw = required(form.preco.as_deref(), "O preço do produto é obrigatório!")?;
        let quantidade_raw = required(
            form.quantidade.as_deref(),
            "A quantidade do produto é obrigatória!",
        )?;
        let validade = required(
            form.validade.as_deref(),
            "A validade do produto é obrigatória!",
        )?;
        let lote = required(form.lote.as_deref(), "O lote do produto é obrigatório!")?;
        let label = required(form.label.as_deref(), "O rótulo do produto é obrigatório!")?;

        let Some(imagem) = &form.imagem else {
            return Err(ServiceError::Validation("Imagem é obrigatória".into()));
        };

        let farmacia_id = farmacia
            .parse::<i32>()
            .map_err(|_| ServiceError::Validation("O id da farmácia é inválido!".into()))?;
        let preco = preco_raw
            .parse::<f64>()
            .map_err(|_| ServiceError::Validation("O preço do produto é inválido!".into()))?;
        let quantidade = quantidade_raw
            .parse::<i64>()
            .map_err(|_| ServiceError::Validation("A quantidade do produto é inválida!".into()))?;

        info!(
            "⬆️ Uploading image '{}' for new product '{nome}'",
            imagem.nome_original
        );

        let imagem_url = self
            .relay
            .upload(
                UploadSource::Path(imagem.path.clone()),
                &imagem.nome_original,
                &imagem.mime,
            )
            .await
            .map_err(|e| {
                error!("❌ Image upload failed for '{nome}': {e:?}");
                ServiceError::Upload(e)
            })?;

        let req = CreateProdutoRequest {
            farmacia_id,
            nome: nome.to_string(),
            nome_quimico: nome_quimico.to_string(),
            preco,
            quantidade,
            validade: validade.to_string(),
            lote: lote.to_string(),
            label: label.to_string(),
            imagem_url,
        };

        self.command.create_produto(&req).await.map_err(|e| {
            error!("❌ Failed to persist product '{nome}': {e:?}");
            ServiceError::Repo(e)
        })?;

        info!("✅ Product '{nome}' registered");
        Ok(ApiResponse::success("Produto cadastrado com sucesso!", ()))
    }

    async fn update_inner(
        &self,
        id: i32,
        form: &ProdutoForm,
    ) -> Result<ApiResponse<()>, ServiceError> {
        let existente = match self.query.find_by_id(id).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                info!("📭 Update target not found: ID {id}");
                return Err(ServiceError::NotFound("Produto não encontrado".into()));
            }
            Err(e) => {
                error!("❌ Database error while loading product ID {id}: {e:?}");
                return Err(ServiceError::Repo(e));
            }
        };

        // A new image replaces the URL; without one the previous URL is
        // carried forward. Upload failure aborts before any write, so
        // the stored record stays untouched.
        let imagem_url = match &form.imagem {
            Some(imagem) => {
                info!(
                    "⬆️ Uploading replacement image '{}' for product ID {id}",
                    imagem.nome_original
                );
                let url = self
                    .relay
                    .upload(
                        UploadSource::Path(imagem.path.clone()),
                        &imagem.nome_original,
                        &imagem.mime,
                    )
                    .await
                    .map_err(|e| {
                        error!("❌ Replacement image upload failed for ID {id}: {e:?}");
                        ServiceError::Upload(e)
                    })?;
                Some(url)
            }
            None => existente.produto.imagem_url.clone(),
        };

        let req = UpdateProdutoRequest {
            produto_id: id,
            nome: form.nome.clone(),
            nome_quimico: form.nome_quimico.clone(),
            preco: parse_opt(form.preco.as_deref(), "O preço do produto é inválido!")?,
            quantidade: parse_opt(
                form.quantidade.as_deref(),
                "A quantidade do produto é inválida!",
            )?,
            validade: form.validade.clone(),
            lote: form.lote.clone(),
            label: form.label.clone(),
            imagem_url,
        };

        self.command.update_produto(&req).await.map_err(|e| {
            error!("❌ Failed to update product ID {id}: {e:?}");
            ServiceError::Repo(e)
        })?;

        info!("🔄 Product ID {id} updated");
        Ok(ApiResponse::success("Atualizado com sucesso", ()))
    }
}

#[async_trait]
impl ProdutoCommandServiceTrait for ProdutoCommandService {
    async fn create_produto(&self, form: &ProdutoForm) -> Result<ApiResponse<()>, ServiceError> {
        let result = self.create_inner(form).await;

        // Cleanup runs unconditionally once a file was received, on the
        // success path and on every failure path alike.
        if let Some(imagem) = &form.imagem {
            self.temp.remove(&imagem.path).await;
        }

        result
    }

    async fn update_produto(
        &self,
        id: i32,
        form: &ProdutoForm,
    ) -> Result<ApiResponse<()>, ServiceError> {
        let result = self.update_inner(id, form).await;

        if let Some(imagem) = &form.imagem {
            self.temp.remove(&imagem.path).await;
        }

        result
    }

    async fn delete_produto(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        match self.query.find_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                info!("📭 Delete target not found: ID {id}");
                return Err(ServiceError::NotFound("Produto inexistente!".into()));
            }
            Err(e) => {
                error!("❌ Database error while checking product ID {id}: {e:?}");
                return Err(ServiceError::Repo(e));
            }
        }

        self.command.delete_produto(id).await.map_err(|e| {
            error!("❌ Failed to delete product ID {id}: {e:?}");
            ServiceError::Repo(e)
        })?;

        info!("🗑️ Product ID {id} deleted");
        Ok(ApiResponse::success("Produto excluído com sucesso!", ()))
    }
}

fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, ServiceError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ServiceError::Validation(message.to_string())),
    }
}

fn parse_opt<T: FromStr>(value: Option<&str>, message: &str) -> Result<Option<T>, ServiceError> {
    match value {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| ServiceError::Validation(message.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::produto::repository::{
        ProdutoCommandRepositoryTrait, ProdutoQueryRepositoryTrait,
    };
    use crate::abstract_trait::upload::UploadRelayTrait;
    use crate::domain::requests::produto::ImagemRecebida;
    use crate::errors::{RepositoryError, UploadError};
    use crate::model::produto::{Produto, ProdutoComFarmacia};
    use crate::utils::generate_random_string;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const MOCK_URL: &str = "https://drive.google.com/uc?id=mock123";

    #[derive(Default)]
    struct MockCommandRepo {
        created: Mutex<Vec<CreateProdutoRequest>>,
        updated: Mutex<Vec<UpdateProdutoRequest>>,
        deleted: Mutex<Vec<i32>>,
    }

    #[async_trait]
    impl ProdutoCommandRepositoryTrait for MockCommandRepo {
        async fn create_produto(
            &self,
            req: &CreateProdutoRequest,
        ) -> Result<Produto, RepositoryError> {
            self.created.lock().await.push(req.clone());
            Ok(Produto {
                produto_id: 1,
                farmacia_id: req.farmacia_id,
                nome: Some(req.nome.clone()),
                nome_quimico: Some(req.nome_quimico.clone()),
                preco: Some(req.preco),
                quantidade: Some(req.quantidade),
                validade: Some(req.validade.clone()),
                lote: Some(req.lote.clone()),
                label: Some(req.label.clone()),
                imagem_url: Some(req.imagem_url.clone()),
                created_at: None,
                updated_at: None,
            })
        }

        async fn update_produto(
            &self,
            req: &UpdateProdutoRequest,
        ) -> Result<Produto, RepositoryError> {
            self.updated.lock().await.push(req.clone());
            Ok(Produto {
                produto_id: req.produto_id,
                farmacia_id: 7,
                nome: req.nome.clone(),
                nome_quimico: req.nome_quimico.clone(),
                preco: req.preco,
                quantidade: req.quantidade,
                validade: req.validade.clone(),
                lote: req.lote.clone(),
                label: req.label.clone(),
                imagem_url: req.imagem_url.clone(),
                created_at: None,
                updated_at: None,
            })
        }

        async fn delete_produto(&self, id: i32) -> Result<(), RepositoryError> {
            self.deleted.lock().await.push(id);
            Ok(())
        }
    }

    struct StubQueryRepo {
        rows: Vec<ProdutoComFarmacia>,
    }

    #[async_trait]
    impl ProdutoQueryRepositoryTrait for StubQueryRepo {
        async fn find_all(&self) -> Result<Vec<ProdutoComFarmacia>, RepositoryError> {
            Ok(self.rows.clone())
        }

        async fn find_by_id(
            &self,
            id: i32,
        ) -> Result<Option<ProdutoComFarmacia>, RepositoryError> {
            Ok(self
                .rows
                .iter()
                .find(|r| r.produto.produto_id == id)
                .cloned())
        }

        async fn find_by_farmacia(
            &self,
            farmacia_id: i32,
        ) -> Result<Vec<ProdutoComFarmacia>, RepositoryError> {
            Ok(self
                .rows
                .iter()
                .filter(|r| r.produto.farmacia_id == farmacia_id)
                .cloned()
                .collect())
        }
    }

    struct MockRelay {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl MockRelay {
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl UploadRelayTrait for MockRelay {
        async fn upload(
            &self,
            _source: UploadSource,
            nome: &str,
            _mime: &str,
        ) -> Result<String, UploadError> {
            self.calls.lock().await.push(nome.to_string());
            if self.fail {
                Err(UploadError::Token("token endpoint unavailable".into()))
            } else {
                Ok(MOCK_URL.to_string())
            }
        }
    }

    struct Harness {
        service: ProdutoCommandService,
        command: Arc<MockCommandRepo>,
        relay: Arc<MockRelay>,
        temp: TempStore,
    }

    async fn harness(rows: Vec<ProdutoComFarmacia>, relay: MockRelay) -> Harness {
        let dir = std::env::temp_dir().join(format!(
            "produtos-cmd-test-{}",
            generate_random_string(8).unwrap()
        ));
        let temp = TempStore::new(dir).await.unwrap();
        let command = Arc::new(MockCommandRepo::default());
        let relay = Arc::new(relay);
        let service = ProdutoCommandService::new(
            command.clone(),
            Arc::new(StubQueryRepo { rows }),
            relay.clone(),
            temp.clone(),
        );
        Harness {
            service,
            command,
            relay,
            temp,
        }
    }

    async fn form_with_image(temp: &TempStore) -> (ProdutoForm, PathBuf) {
        let path = temp.save(b"fake png bytes").await.unwrap();
        let form = ProdutoForm {
            farmacia: Some("7".into()),
            nome: Some("Dipirona 500mg".into()),
            nome_quimico: Some("Metamizol".into()),
            preco: Some("12.50".into()),
            quantidade: Some("100".into()),
            validade: Some("2026-12-31".into()),
            lote: Some("L-2025-044".into()),
            label: Some("Genérico".into()),
            imagem: Some(ImagemRecebida {
                path: path.clone(),
                nome_original: "dipirona.png".into(),
                mime: "image/png".into(),
            }),
        };
        (form, path)
    }

    fn existing_row(produto_id: i32) -> ProdutoComFarmacia {
        ProdutoComFarmacia {
            produto: Produto {
                produto_id,
                farmacia_id: 7,
                nome: Some("Nome antigo".into()),
                nome_quimico: Some("Químico antigo".into()),
                preco: Some(9.9),
                quantidade: Some(5),
                validade: Some("2025-01-01".into()),
                lote: Some("L-old".into()),
                label: Some("Label antigo".into()),
                imagem_url: Some("https://drive.google.com/uc?id=old".into()),
                created_at: None,
                updated_at: None,
            },
            farmacia_nome: Some("Farmácia Central".into()),
            farmacia_cep: None,
        }
    }

    #[tokio::test]
    async fn each_missing_field_gets_its_own_message() {
        let cases: Vec<(fn(&mut ProdutoForm), &str)> = vec![
            (|f| f.farmacia = None, "O id da farmácia é obrigatório!"),
            (|f| f.nome = None, "O nome do produto é obrigatório!"),
            (
                |f| f.nome_quimico = None,
                "O nome químico do produto é obrigatório!",
            ),
            (|f| f.preco = None, "O preço do produto é obrigatório!"),
            (
                |f| f.quantidade = None,
                "A quantidade do produto é obrigatória!",
            ),
            (
                |f| f.validade = None,
                "A validade do produto é obrigatória!",
            ),
            (|f| f.lote = None, "O lote do produto é obrigatório!"),
            (|f| f.label = None, "O rótulo do produto é obrigatório!"),
        ];

        for (clear, expected) in cases {
            let h = harness(vec![], MockRelay::ok()).await;
            let (mut form, path) = form_with_image(&h.temp).await;
            clear(&mut form);

            let err = h.service.create_produto(&form).await.unwrap_err();
            assert!(
                matches!(&err, ServiceError::Validation(msg) if msg == expected),
                "expected '{expected}', got {err:?}"
            );

            // no upload, no persistence, temp file still cleaned up
            assert!(h.relay.calls.lock().await.is_empty());
            assert!(h.command.created.lock().await.is_empty());
            assert!(!path.exists());
        }
    }

    #[tokio::test]
    async fn create_without_image_is_unprocessable() {
        let h = harness(vec![], MockRelay::ok()).await;
        let (mut form, path) = form_with_image(&h.temp).await;
        form.imagem = None;
        h.temp.remove(&path).await;

        let err = h.service.create_produto(&form).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg == "Imagem é obrigatória"));
        assert!(h.relay.calls.lock().await.is_empty());
        assert!(h.command.created.lock().await.is_empty());
    }

    #[tokio::test]
    async fn create_uploads_once_and_persists_relay_url() {
        let h = harness(vec![], MockRelay::ok()).await;
        let (form, path) = form_with_image(&h.temp).await;

        let response = h.service.create_produto(&form).await.unwrap();
        assert_eq!(response.message, "Produto cadastrado com sucesso!");

        let calls = h.relay.calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], "dipirona.png");

        let created = h.command.created.lock().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].imagem_url, MOCK_URL);
        assert_eq!(created[0].farmacia_id, 7);
        assert_eq!(created[0].preco, 12.5);
        assert_eq!(created[0].quantidade, 100);

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn create_upload_failure_skips_persistence_and_cleans_up() {
        let h = harness(vec![], MockRelay::failing()).await;
        let (form, path) = form_with_image(&h.temp).await;

        let err = h.service.create_produto(&form).await.unwrap_err();
        assert!(matches!(err, ServiceError::Upload(_)));
        assert!(h.command.created.lock().await.is_empty());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found_without_upload() {
        let h = harness(vec![], MockRelay::ok()).await;
        let (form, path) = form_with_image(&h.temp).await;

        let err = h.service.update_produto(99, &form).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Produto não encontrado"));
        assert!(h.relay.calls.lock().await.is_empty());
        assert!(h.command.updated.lock().await.is_empty());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn update_without_image_keeps_previous_url_and_replaces_fields() {
        let h = harness(vec![existing_row(3)], MockRelay::ok()).await;

        let form = ProdutoForm {
            nome: Some("Nome novo".into()),
            preco: Some("20".into()),
            ..ProdutoForm::default()
        };

        let response = h.service.update_produto(3, &form).await.unwrap();
        assert_eq!(response.message, "Atualizado com sucesso");
        assert!(h.relay.calls.lock().await.is_empty());

        let updated = h.command.updated.lock().await;
        assert_eq!(updated.len(), 1);
        let req = &updated[0];
        assert_eq!(req.produto_id, 3);
        assert_eq!(req.nome.as_deref(), Some("Nome novo"));
        assert_eq!(req.preco, Some(20.0));
        // full replace: omitted fields clear
        assert!(req.lote.is_none());
        assert!(req.validade.is_none());
        // the previous image survives an update without a new file
        assert_eq!(
            req.imagem_url.as_deref(),
            Some("https://drive.google.com/uc?id=old")
        );
    }

    #[tokio::test]
    async fn update_with_image_uses_new_url() {
        let h = harness(vec![existing_row(3)], MockRelay::ok()).await;
        let (form, path) = form_with_image(&h.temp).await;

        h.service.update_produto(3, &form).await.unwrap();

        let updated = h.command.updated.lock().await;
        assert_eq!(updated[0].imagem_url.as_deref(), Some(MOCK_URL));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn update_upload_failure_aborts_before_write() {
        let h = harness(vec![existing_row(3)], MockRelay::failing()).await;
        let (form, path) = form_with_image(&h.temp).await;

        let err = h.service.update_produto(3, &form).await.unwrap_err();
        assert!(matches!(err, ServiceError::Upload(_)));
        assert!(h.command.updated.lock().await.is_empty());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn delete_missing_product_is_not_found() {
        let h = harness(vec![], MockRelay::ok()).await;

        let err = h.service.delete_produto(42).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Produto inexistente!"));
        assert!(h.command.deleted.lock().await.is_empty());
    }

    #[tokio::test]
    async fn delete_existing_product_succeeds() {
        let h = harness(vec![existing_row(5)], MockRelay::ok()).await;

        let response = h.service.delete_produto(5).await.unwrap();
        assert_eq!(response.message, "Produto excluído com sucesso!");
        assert_eq!(*h.command.deleted.lock().await, vec![5]);
    }
}

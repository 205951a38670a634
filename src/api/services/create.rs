use std::str::FromStr;
use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use futures_util::StreamExt;
use tracing::{debug, error, info, warn};

use crate::store::{Item, ItemKind, ShareStore};
use crate::utils::{sanitize_filename, validate_url};

/// Upload limits, snapshotted from config at server start
#[derive(Clone, Debug)]
pub struct UploadPolicy {
    pub max_size: usize,
}

enum FieldReadError {
    TooLarge,
    Read(String),
}

pub struct CreateService;

impl CreateService {
    /// `POST /create` - submit a url, text snippet or file.
    ///
    /// Multipart form fields: `type` in {url, text, file}, `content` for
    /// url/text, `file` for file. Responds 200 with the drawn key as a
    /// plain-text body.
    pub async fn create_item(
        mut payload: Multipart,
        store: web::Data<Arc<ShareStore>>,
        policy: web::Data<UploadPolicy>,
    ) -> impl Responder {
        let mut item_type: Option<String> = None;
        let mut content: Option<String> = None;
        let mut file_name: Option<String> = None;
        let mut file_bytes: Option<Vec<u8>> = None;

        while let Some(part) = payload.next().await {
            let mut field = match part {
                Ok(f) => f,
                Err(e) => {
                    debug!("Failed to parse multipart field: {}", e);
                    return Self::bad_request("Invalid multipart data");
                }
            };

            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "type" => match Self::read_field(&mut field, policy.max_size).await {
                    Ok(data) => item_type = Some(String::from_utf8_lossy(&data).into_owned()),
                    Err(e) => return Self::field_error(e),
                },
                "content" => match Self::read_field(&mut field, policy.max_size).await {
                    Ok(data) => content = Some(String::from_utf8_lossy(&data).into_owned()),
                    Err(e) => return Self::field_error(e),
                },
                "file" => {
                    file_name = field
                        .content_disposition()
                        .and_then(|cd| cd.get_filename())
                        .map(str::to_string);
                    match Self::read_field(&mut field, policy.max_size).await {
                        Ok(data) => file_bytes = Some(data),
                        Err(e) => return Self::field_error(e),
                    }
                }
                _ => {
                    // unknown fields are ignored
                }
            }
        }

        let kind = match item_type.as_deref().map(ItemKind::from_str) {
            Some(Ok(kind)) => kind,
            _ => {
                debug!("Create request with missing or unknown type: {:?}", item_type);
                return Self::bad_request("Bad Request");
            }
        };

        match kind {
            ItemKind::Url | ItemKind::Text => {
                let content = content.unwrap_or_default();
                if content.is_empty() {
                    return Self::bad_request("Content required");
                }
                if kind == ItemKind::Url
                    && let Err(e) = validate_url(&content)
                {
                    debug!("Rejected URL submission: {}", e);
                    return Self::bad_request(e.message());
                }
                Self::finish_create(&store, Item::new(kind, content)).await
            }
            ItemKind::File => {
                let (Some(raw_name), Some(bytes)) = (file_name, file_bytes) else {
                    return Self::bad_request("No file provided");
                };
                let Some(safe_name) = sanitize_filename(&raw_name) else {
                    debug!("Rejected unsafe filename: {:?}", raw_name);
                    return Self::bad_request("No/invalid filename");
                };

                let item = Item::new(ItemKind::File, safe_name);
                if let Err(e) = store.files().save(&item.id, &bytes).await {
                    error!("Failed to store uploaded file: {}", e);
                    return Self::internal_error();
                }
                let item_id = item.id;

                let response = Self::finish_create(&store, item).await;
                if response.status() != StatusCode::OK {
                    // no key was assigned; don't leave orphan bytes behind
                    if let Err(e) = store.files().remove(&item_id).await {
                        warn!("Failed to remove orphaned upload: {}", e);
                    }
                }
                response
            }
        }
    }

    async fn finish_create(store: &ShareStore, item: Item) -> HttpResponse {
        let kind = item.kind;
        match store.insert(item) {
            Ok(key) => {
                info!("Created {} item under key '{}'", kind, key);
                HttpResponse::Ok()
                    .content_type("text/plain; charset=utf-8")
                    .body(key)
            }
            Err(e) => {
                warn!("Rejecting {} submission: {}", kind, e);
                HttpResponse::build(StatusCode::SERVICE_UNAVAILABLE)
                    .content_type("text/plain; charset=utf-8")
                    .body("No keys available, try again later")
            }
        }
    }

    /// Drain one multipart field with an accumulating size check.
    async fn read_field(
        field: &mut actix_multipart::Field,
        max_size: usize,
    ) -> Result<Vec<u8>, FieldReadError> {
        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => {
                    if data.len() + bytes.len() > max_size {
                        return Err(FieldReadError::TooLarge);
                    }
                    data.extend_from_slice(&bytes);
                }
                Err(e) => return Err(FieldReadError::Read(e.to_string())),
            }
        }
        Ok(data)
    }

    fn field_error(err: FieldReadError) -> HttpResponse {
        match err {
            FieldReadError::TooLarge => {
                debug!("Rejected oversized upload");
                HttpResponse::build(StatusCode::PAYLOAD_TOO_LARGE)
                    .content_type("text/plain; charset=utf-8")
                    .body("Upload too large")
            }
            FieldReadError::Read(msg) => {
                debug!("Failed to read multipart field: {}", msg);
                Self::bad_request("Invalid multipart data")
            }
        }
    }

    #[inline]
    fn bad_request(msg: &str) -> HttpResponse {
        HttpResponse::build(StatusCode::BAD_REQUEST)
            .content_type("text/plain; charset=utf-8")
            .body(msg.to_string())
    }

    #[inline]
    fn internal_error() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .content_type("text/plain; charset=utf-8")
            .body("Internal Server Error")
    }
}

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, web};
use bytes::Bytes;
use futures_util::Stream;
use futures_util::stream;
use tokio::io::AsyncReadExt;
use tracing::{debug, error, warn};

use crate::store::{Item, ItemKind, ShareStore};

/// Chunk size for streamed downloads
const DOWNLOAD_CHUNK_SIZE: usize = 64 * 1024;

pub struct RetrieveService;

impl RetrieveService {
    /// `GET /{key}` - dispatch on the stored item's kind:
    /// url redirects, text renders plain, file downloads.
    pub async fn handle_key(
        path: web::Path<String>,
        store: web::Data<Arc<ShareStore>>,
    ) -> impl Responder {
        let key = path.into_inner();

        let Some(item) = store.get(&key) else {
            debug!("Key not found: {}", key);
            return Self::not_found_redirect();
        };

        match item.kind {
            ItemKind::Url => HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                .insert_header(("Location", item.content))
                .finish(),
            ItemKind::Text => HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(item.content),
            ItemKind::File => Self::stream_download(&store, item).await,
        }
    }

    async fn stream_download(store: &ShareStore, item: Item) -> HttpResponse {
        let file = match store.files().open(&item.id).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // stored bytes can vanish between lookup and open when the
                // sweeper wins the race
                warn!("Stored file for item {} is gone", item.id);
                return Self::not_found_redirect();
            }
            Err(e) => {
                error!("Failed to open stored file for item {}: {}", item.id, e);
                return HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
                    .content_type("text/plain; charset=utf-8")
                    .body("Internal Server Error");
            }
        };

        let disposition = ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(item.content)],
        };

        HttpResponse::Ok()
            .content_type("application/octet-stream")
            .insert_header(disposition)
            .streaming(Self::file_chunk_stream(file))
    }

    /// Read the stored file as a chunked byte stream.
    fn file_chunk_stream(
        file: tokio::fs::File,
    ) -> impl Stream<Item = Result<Bytes, actix_web::Error>> {
        stream::unfold(file, |mut file| async move {
            let mut buf = vec![0u8; DOWNLOAD_CHUNK_SIZE];
            match file.read(&mut buf).await {
                Ok(0) => None,
                Ok(n) => {
                    buf.truncate(n);
                    Some((Ok(Bytes::from(buf)), file))
                }
                Err(e) => {
                    error!("Failed to read stored file chunk: {}", e);
                    Some((Err(actix_web::error::ErrorInternalServerError(e)), file))
                }
            }
        })
    }

    #[inline]
    fn not_found_redirect() -> HttpResponse {
        HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
            .insert_header(("Location", "/404"))
            .finish()
    }
}

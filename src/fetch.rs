//! Spawned character fetches feeding results back into the event loop.
//!
//! One task per issued descriptor. Each result carries the generation it
//! was issued under; the app drops results from superseded generations.

use crate::api_client::ApiClient;
use crate::events::TuiEvent;
use crate::query::RequestDescriptor;
use tokio::sync::mpsc;

pub fn spawn_fetch(
    api: ApiClient,
    descriptor: RequestDescriptor,
    generation: u64,
    sender: mpsc::Sender<TuiEvent>,
) {
    tokio::spawn(async move {
        match api.characters(&descriptor).await {
            Ok(page) => {
                let _ = sender.send(TuiEvent::PageLoaded { generation, page }).await;
            }
            Err(err) => {
                let _ = sender
                    .send(TuiEvent::FetchFailed {
                        generation,
                        message: err.to_string(),
                    })
                    .await;
            }
        }
    });
}

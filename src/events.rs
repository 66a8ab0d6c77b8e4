//! Event types for the TUI event loop.

use crate::api_client::CharactersPage;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Resize { width: u16, height: u16 },
    PageLoaded { generation: u64, page: CharactersPage },
    FetchFailed { generation: u64, message: String },
}

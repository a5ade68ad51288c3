//! Shared constants for the API crate.

/// Document path where the URL of an uploaded file lands. A request with
/// several file parts keeps only the last URL (single image slot).
pub const ATTACHMENT_IMAGE_PATH: &str = "catalogacao.anexo.imagem";

/// Upper bound for request bodies, file parts included.
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

// Client-facing messages. These are the full response detail; everything
// else stays in the logs.
pub const MSG_NOT_FOUND: &str = "Item não encontrado";
pub const MSG_LIST_FAILED: &str = "Erro ao buscar itens";
pub const MSG_GET_FAILED: &str = "Erro ao buscar o item";
pub const MSG_CREATE_FAILED: &str = "Erro ao adicionar o item";
pub const MSG_UPDATE_FAILED: &str = "Erro ao editar o item";
pub const MSG_DELETE_FAILED: &str = "Erro ao deletar o item";

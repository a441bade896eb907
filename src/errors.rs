use thiserror::Error;

/// Why a screen fetch failed. The display text is what the user sees in
/// the alert.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error de conexión: {0}")]
    Connection(#[from] reqwest::Error),
    #[error("Respuesta inválida: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("No se pudieron cargar las recetas")]
    EmptyMenu,
    #[error("No se pudo cargar el platillo sorpresa")]
    EmptySurprise,
}

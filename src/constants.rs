pub const DEFAULT_API_URL: &str = "https://www.themealdb.com/api/json/v1/1";
pub const DEFAULT_LETTER: char = 'a';

pub const MENU_EXPIRED_MSG: &str = "Este menú ya no está activo, usa /menu para cargarlo de nuevo.";
pub const SCREEN_INACTIVE_MSG: &str = "Esta pantalla ya no está activa.";
pub const NOT_A_COMMAND_MSG: &str = "Eso no es un comando.";

pub const MENU_LOADING_CAPTION: &str = "Cargando deliciosas recetas...";
pub const SURPRISE_LOADING_CAPTION: &str = "🎲 Preparando tu sorpresa...";

/// Instructions are cut to this many chars so a recipe fits one message.
pub const MAX_INSTRUCTIONS_CHARS: usize = 2500;

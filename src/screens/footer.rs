use teloxide::utils::markdown;

pub fn footer() -> String {
    format!(
        "━━━━━━━━━━\n{}\n{}",
        markdown::bold("Restaurante Desweb"),
        markdown::italic("🍽️ Recetas de TheMealDB")
    )
}

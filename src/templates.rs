use tera::{Context, Tera};

const FALLBACK: &str = "Something went wrong. Use /start to begin again.";

/// Message templates, compiled into the binary and parsed once at startup.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("welcome.html", include_str!("../templates/welcome.html")),
            (
                "service_selected.html",
                include_str!("../templates/service_selected.html"),
            ),
            (
                "location_prompt.html",
                include_str!("../templates/location_prompt.html"),
            ),
            (
                "location_retry.html",
                include_str!("../templates/location_retry.html"),
            ),
            (
                "unknown_service.html",
                include_str!("../templates/unknown_service.html"),
            ),
            (
                "confirmation.html",
                include_str!("../templates/confirmation.html"),
            ),
            ("cancelled.html", include_str!("../templates/cancelled.html")),
        ])?;
        Ok(Templates { tera })
    }

    pub fn render(&self, name: &str, context: &Context) -> String {
        match self.tera.render(name, context) {
            Ok(text) => text,
            Err(err) => {
                log::error!("Can't render {}: {:?}", name, err);
                FALLBACK.to_string()
            }
        }
    }
}

//! HTML rendering with Tera templates embedded in the binary.

use axum::response::Html;
use rust_embed::Embed;
use tera::{Context, Tera};

use crate::error::AppResult;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// The compiled template set.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Compile every embedded template. Templates are registered in one
    /// batch so `extends`/`include` can resolve in any order.
    pub fn load() -> Result<Self, tera::Error> {
        let mut sources = Vec::new();
        for name in EmbeddedTemplates::iter() {
            if let Some(file) = EmbeddedTemplates::get(&name) {
                let source = String::from_utf8_lossy(&file.data).into_owned();
                sources.push((name.to_string(), source));
            }
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(sources)?;
        Ok(Self { tera })
    }

    pub fn render(&self, name: &str, context: &Context) -> AppResult<Html<String>> {
        Ok(Html(self.render_string(name, context)?))
    }

    pub fn render_string(&self, name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(name, context)
    }
}

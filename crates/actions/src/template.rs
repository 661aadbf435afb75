//! One-shot email body rendering. Registers the `UIDName`/`UIDEmail`
//! helpers the original's Sprig-derived function map exposed to
//! templates, resolving against the directory snapshot passed in at
//! render time (not a live lookup — the snapshot is built once per
//! notification batch).

use crate::identity::principal_name;
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use std::collections::HashMap;

pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new(directory_snapshot: HashMap<String, String>) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_helper("UIDName", Box::new(uid_name_helper));
        handlebars.register_helper(
            "UIDEmail",
            Box::new(move |h: &Helper, _: &Handlebars, _: &Context, _: &mut RenderContext, out: &mut dyn Output| -> HelperResult {
                let arn = h.param(0).and_then(|v| v.value().as_str()).unwrap_or_default();
                let name = principal_name(arn).unwrap_or_else(|| arn.to_string());
                if let Some(email) = directory_snapshot.get(&name) {
                    out.write(email)?;
                }
                Ok(())
            }),
        );
        Self { handlebars }
    }

    pub fn render(&self, template: &str, context: &serde_json::Value) -> crate::Result<String> {
        Ok(self.handlebars.render_template(template, context)?)
    }
}

fn uid_name_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let arn = h.param(0).and_then(|v| v.value().as_str()).unwrap_or_default();
    let name = principal_name(arn).unwrap_or_else(|| arn.to_string());
    out.write(&name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_uid_name() {
        let mut dir = HashMap::new();
        dir.insert("alice".to_string(), "alice@example.com".to_string());
        let engine = TemplateEngine::new(dir);
        let out = engine
            .render(
                "Changed by {{UIDName APIEvent.UserIdentity.ARN}}",
                &json!({"APIEvent": {"UserIdentity": {"ARN": "arn:aws:iam::123456789012:user/alice"}}}),
            )
            .unwrap();
        assert_eq!(out, "Changed by alice");
    }

    #[test]
    fn renders_uid_email() {
        let mut dir = HashMap::new();
        dir.insert("alice".to_string(), "alice@example.com".to_string());
        let engine = TemplateEngine::new(dir);
        let out = engine
            .render(
                "{{UIDEmail arn}}",
                &json!({"arn": "arn:aws:iam::123456789012:user/alice"}),
            )
            .unwrap();
        assert_eq!(out, "alice@example.com");
    }
}

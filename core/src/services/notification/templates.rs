//! Email bodies rendered with Handlebars. User-facing copy is Ukrainian.
//!
//! The HTML registry keeps the default escaping, so every `{{value}}` coming
//! from a request is escaped. Only the pre-rendered body is inserted raw
//! into the layout through `{{{body}}}`.

use chrono::{Datelike, Utc};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

use crate::domain::entities::verification_code::VerificationPurpose;
use crate::errors::{DomainError, DomainResult};

/// Subject and both bodies of one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

struct PurposeCopy {
    subject: &'static str,
    heading: &'static str,
    intro: &'static str,
    ignore_hint: &'static str,
}

fn purpose_copy(purpose: VerificationPurpose) -> PurposeCopy {
    match purpose {
        VerificationPurpose::Registration => PurposeCopy {
            subject: "Підтвердження електронної пошти",
            heading: "Підтвердження електронної пошти",
            intro: "Дякуємо за реєстрацію! Щоб завершити її, введіть код підтвердження:",
            ignore_hint: "Якщо ви не реєструвались, просто проігноруйте цей лист.",
        },
        VerificationPurpose::EmailChange => PurposeCopy {
            subject: "Підтвердження зміни електронної пошти",
            heading: "Зміна електронної пошти",
            intro: "Щоб завершити зміну електронної пошти, введіть код підтвердження:",
            ignore_hint: "Якщо ви не змінювали електронну пошту, просто проігноруйте цей лист.",
        },
    }
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="uk">
  <body style="margin:0;padding:24px;background:#f4f6fb;font-family:Arial,sans-serif;">
    <div style="max-width:600px;margin:0 auto;background:#ffffff;border-radius:10px;padding:32px;">
      <h1 style="margin:0 0 24px;color:#5e89e8;text-align:center;">{{brand}}</h1>
      <h2 style="margin:0 0 16px;color:#333333;text-align:center;">{{heading}}</h2>
      {{{body}}}
      <p style="margin-top:32px;color:#999999;font-size:12px;text-align:center;">&copy; {{year}} {{brand}}</p>
    </div>
  </body>
</html>"#;

const SUBJECT: &str = "{{subject}} - {{brand}}";

const CODE_HTML: &str = r#"<p style="color:#666666;font-size:16px;text-align:center;">{{intro}}</p>
      <p style="margin:24px 0;text-align:center;">
        <span style="display:inline-block;padding:16px 24px;border:2px dashed #5e89e8;border-radius:8px;color:#5e89e8;font-size:32px;letter-spacing:10px;font-family:monospace;">{{code}}</span>
      </p>
      <p style="color:#999999;font-size:14px;text-align:center;">Цей код дійсний протягом {{ttl_minutes}} хвилин.</p>
      <p style="color:#666666;font-size:14px;text-align:center;">{{ignore_hint}}</p>"#;

const CODE_TEXT: &str = "{{heading}} - {{brand}}

{{intro}}

{{code}}

Цей код дійсний протягом {{ttl_minutes}} хвилин.

{{ignore_hint}}";

const CHANGED_HTML: &str = r#"<p style="color:#666666;font-size:16px;text-align:center;">Електронну пошту вашого облікового запису змінено на {{new_email}}.</p>
      <p style="color:#666666;font-size:14px;text-align:center;">Якщо це були не ви, негайно зверніться до служби підтримки.</p>"#;

const CHANGED_TEXT: &str = "Електронну пошту вашого облікового запису змінено на {{new_email}}.

Якщо це були не ви, негайно зверніться до служби підтримки.";

const CHANGED_HEADING: &str = "Електронну пошту змінено";

/// Handlebars registries for the HTML and plain-text parts
pub struct MailTemplates {
    html: Handlebars<'static>,
    text: Handlebars<'static>,
}

impl Default for MailTemplates {
    fn default() -> Self {
        Self::new()
    }
}

impl MailTemplates {
    pub fn new() -> Self {
        let mut html = Handlebars::new();
        html.set_strict_mode(true);

        let mut text = Handlebars::new();
        text.set_strict_mode(true);
        text.register_escape_fn(handlebars::no_escape);

        Self { html, text }
    }

    /// Message carrying a verification code
    pub fn verification_code(
        &self,
        brand: &str,
        purpose: VerificationPurpose,
        code: &str,
        ttl_minutes: i64,
    ) -> DomainResult<RenderedMail> {
        let copy = purpose_copy(purpose);
        let data = json!({
            "brand": brand,
            "subject": copy.subject,
            "heading": copy.heading,
            "intro": copy.intro,
            "ignore_hint": copy.ignore_hint,
            "code": code,
            "ttl_minutes": ttl_minutes,
        });

        Ok(RenderedMail {
            subject: self.render_text(SUBJECT, &data)?,
            html: self.render_page(brand, copy.heading, CODE_HTML, &data)?,
            text: self.render_text(CODE_TEXT, &data)?,
        })
    }

    /// Notice sent to the previous address after an email change
    pub fn email_changed_notice(&self, brand: &str, new_email: &str) -> DomainResult<RenderedMail> {
        let data = json!({
            "brand": brand,
            "subject": CHANGED_HEADING,
            "new_email": new_email,
        });

        Ok(RenderedMail {
            subject: self.render_text(SUBJECT, &data)?,
            html: self.render_page(brand, CHANGED_HEADING, CHANGED_HTML, &data)?,
            text: self.render_text(CHANGED_TEXT, &data)?,
        })
    }

    fn render_page<T: Serialize>(
        &self,
        brand: &str,
        heading: &str,
        body_template: &str,
        data: &T,
    ) -> DomainResult<String> {
        let body = self
            .html
            .render_template(body_template, data)
            .map_err(template_error)?;

        self.html
            .render_template(
                LAYOUT_HTML,
                &json!({
                    "brand": brand,
                    "heading": heading,
                    "body": body,
                    "year": Utc::now().year(),
                }),
            )
            .map_err(template_error)
    }

    fn render_text<T: Serialize>(&self, template: &str, data: &T) -> DomainResult<String> {
        self.text
            .render_template(template, data)
            .map_err(template_error)
    }
}

fn template_error(error: handlebars::RenderError) -> DomainError {
    tracing::error!(error = %error, event = "mail_template_failed", "Failed to render email");
    DomainError::internal(format!("email template: {}", error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_depends_on_purpose() {
        let templates = MailTemplates::new();
        let registration = templates
            .verification_code("Muza Life", VerificationPurpose::Registration, "123456", 15)
            .unwrap();
        let change = templates
            .verification_code("Muza Life", VerificationPurpose::EmailChange, "123456", 15)
            .unwrap();

        assert_eq!(registration.subject, "Підтвердження електронної пошти - Muza Life");
        assert_eq!(change.subject, "Підтвердження зміни електронної пошти - Muza Life");
    }

    #[test]
    fn test_both_bodies_carry_code_and_validity() {
        let mail = MailTemplates::new()
            .verification_code("Muza Life", VerificationPurpose::EmailChange, "654321", 15)
            .unwrap();

        for body in [&mail.html, &mail.text] {
            assert!(body.contains("654321"));
            assert!(body.contains("15 хвилин"));
        }
        assert!(mail.html.starts_with("<!DOCTYPE html>"));
        assert!(mail.html.contains("&copy;"));
        assert!(!mail.text.contains('<'));
    }

    #[test]
    fn test_change_notice_names_new_address() {
        let mail = MailTemplates::new()
            .email_changed_notice("Muza Life", "b@x.com")
            .unwrap();
        assert_eq!(mail.subject, "Електронну пошту змінено - Muza Life");
        assert!(mail.text.contains("b@x.com"));
        assert!(mail.html.contains("b@x.com"));
    }

    #[test]
    fn test_change_notice_escapes_markup_in_address() {
        let address = "<!--x@evil.com";
        assert!(mz_shared::validation::is_valid_email(address));

        let mail = MailTemplates::new()
            .email_changed_notice("Muza Life", address)
            .unwrap();

        assert!(!mail.html.contains("<!--"));
        assert!(mail.html.contains("&lt;!--x@evil.com"));
        assert!(mail.html.contains("негайно зверніться до служби підтримки"));
        // The plain-text part is not HTML and keeps the address as typed
        assert!(mail.text.contains(address));
    }
}

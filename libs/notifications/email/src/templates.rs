//! Handlebars templates for the booking flow's transactional emails

use crate::error::{NotificationError, NotificationResult};
use handlebars::Handlebars;
use serde_json::Value;

/// Rendered template result
#[derive(Debug, Clone)]
pub struct RenderedTemplate {
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
}

pub const RESERVATION_HELD: &str = "reservation_held";
pub const BOOKING_CONFIRMED: &str = "booking_confirmed";
pub const INVOICE_PAID: &str = "invoice_paid";

/// Template registry with the built-in booking templates registered.
///
/// Subject lines are templates too, so they can carry booth numbers.
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> NotificationResult<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);

        let templates = [
            (
                RESERVATION_HELD,
                "Booth {{booth_number}} is held for you",
                "Hi {{name}},\n\nBooth {{booth_number}} is reserved for you{{#if expires_at}} until {{expires_at}}{{/if}}. Complete payment before the hold lapses to keep it.\n",
                "<p>Hi {{name}},</p><p>Booth <strong>{{booth_number}}</strong> is reserved for you{{#if expires_at}} until {{expires_at}}{{/if}}. Complete payment before the hold lapses to keep it.</p>",
            ),
            (
                BOOKING_CONFIRMED,
                "Booth {{booth_number}} is booked",
                "Hi {{name}},\n\nYour payment went through and booth {{booth_number}} is now booked. See you at the show!\n",
                "<p>Hi {{name}},</p><p>Your payment went through and booth <strong>{{booth_number}}</strong> is now booked. See you at the show!</p>",
            ),
            (
                INVOICE_PAID,
                "Invoice {{invoice_number}} paid",
                "Hi {{name}},\n\nInvoice {{invoice_number}} over {{total}} has been settled. Thanks!\n",
                "<p>Hi {{name}},</p><p>Invoice <strong>{{invoice_number}}</strong> over {{total}} has been settled. Thanks!</p>",
            ),
        ];

        for (name, subject, text, html) in templates {
            registry
                .register_template_string(&format!("{}__subject", name), subject)
                .map_err(|e| NotificationError::Template(e.to_string()))?;
            registry
                .register_template_string(&format!("{}__text", name), text)
                .map_err(|e| NotificationError::Template(e.to_string()))?;
            registry
                .register_template_string(&format!("{}__html", name), html)
                .map_err(|e| NotificationError::Template(e.to_string()))?;
        }

        Ok(Self { registry })
    }

    pub fn render(&self, template: &str, data: &Value) -> NotificationResult<RenderedTemplate> {
        let render = |suffix: &str| {
            self.registry
                .render(&format!("{}__{}", template, suffix), data)
                .map_err(|e| NotificationError::Template(e.to_string()))
        };

        Ok(RenderedTemplate {
            subject: render("subject")?,
            body_text: render("text")?,
            body_html: render("html")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reservation_held_renders_booth_and_deadline() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine
            .render(
                RESERVATION_HELD,
                &json!({"name": "Ada", "booth_number": "A-01", "expires_at": "12:30 UTC"}),
            )
            .unwrap();

        assert_eq!(rendered.subject, "Booth A-01 is held for you");
        assert!(rendered.body_text.contains("until 12:30 UTC"));
        assert!(rendered.body_html.contains("<strong>A-01</strong>"));
    }

    #[test]
    fn missing_optional_fields_render_cleanly() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine
            .render(
                RESERVATION_HELD,
                &json!({"name": "Ada", "booth_number": "A-01"}),
            )
            .unwrap();

        assert!(!rendered.body_text.contains("until"));
    }

    #[test]
    fn unknown_template_errors() {
        let engine = TemplateEngine::new().unwrap();
        assert!(engine.render("no_such_template", &json!({})).is_err());
    }
}

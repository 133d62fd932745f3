use std::time::Duration;

use anyhow::{Context, Result};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, warn};

use crate::domain::html::escape_html;
use crate::domain::models::response::SurveyResponse;

const SUBJECT: &str = "アンケートご回答ありがとうございました";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
}

/// Sends the confirmation email to a visitor after a submission
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
    transport: SmtpTransport,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Result<Self> {
        info!("📧 Initializing email service for SMTP server: {}:{}", config.smtp_server, config.smtp_port);

        let transport = SmtpTransport::starttls_relay(&config.smtp_server)
            .context("Failed to create SMTP relay")?
            .port(config.smtp_port)
            .credentials(Credentials::new(config.username.clone(), config.password.clone()))
            .timeout(Some(SEND_TIMEOUT))
            .build();

        Ok(Self { config, transport })
    }

    /// Build the confirmation message for `response`, addressed to its email
    pub fn build_confirmation(&self, response: &SurveyResponse) -> Result<Message> {
        let from = self
            .config
            .from_email
            .parse::<Mailbox>()
            .context("Failed to parse from email")?;
        let to = response
            .email
            .parse::<Mailbox>()
            .context("Failed to parse recipient email")?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(SUBJECT)
            .multipart(MultiPart::alternative_plain_html(
                render_text_body(response),
                render_html_body(response),
            ))
            .context("Failed to build email")
    }

    /// Blocking send; call from a blocking worker
    pub fn send_confirmation(&self, response: &SurveyResponse) -> Result<()> {
        let email = self.build_confirmation(response)?;
        self.transport.send(&email).context("Failed to send email")?;
        info!("📧 Confirmation email sent to {}", response.email);
        Ok(())
    }

    /// Send on a blocking worker thread. Failures are logged and dropped.
    pub fn spawn_confirmation(&self, response: SurveyResponse) {
        let service = self.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = service.send_confirmation(&response) {
                warn!("📧 Confirmation email to {} not sent: {:#}", response.email, e);
            }
        });
    }
}

fn display_comment(response: &SurveyResponse) -> &str {
    if response.comment.is_empty() {
        "（なし）"
    } else {
        &response.comment
    }
}

pub fn render_text_body(response: &SurveyResponse) -> String {
    format!(
        "{name} 様\n\n\
         このたびはアンケートにご回答いただきありがとうございました。\n\
         以下の内容で受け付けました。\n\n\
         ■ 受付日時　　: {submitted_at}\n\
         ■ 氏名　　　　: {name}\n\
         ■ 電話番号　　: {phone}\n\
         ■ メールアドレス: {email}\n\
         ■ 会社名　　　: {company}\n\
         ■ 役職　　　　: {position}\n\
         ■ セミナー感想: {comment}\n\n\
         今後のセミナーの参考にさせていただきます。\n\
         引き続きよろしくお願いいたします。\n",
        name = response.name,
        submitted_at = response.submitted_at,
        phone = response.phone,
        email = response.email,
        company = response.company,
        position = response.position,
        comment = display_comment(response),
    )
}

pub fn render_html_body(response: &SurveyResponse) -> String {
    const TD_LABEL: &str =
        r#"style="padding:8px 12px;border:1px solid #dee2e6;font-weight:bold;white-space:nowrap;""#;
    const TD_VALUE: &str = r#"style="padding:8px 12px;border:1px solid #dee2e6;""#;
    const TR_ODD: &str = r#" style="background:#f8f9fa;""#;

    let rows: [(&str, &str); 7] = [
        ("受付日時", &response.submitted_at),
        ("氏名", &response.name),
        ("電話番号", &response.phone),
        ("メールアドレス", &response.email),
        ("会社名", &response.company),
        ("役職", &response.position),
        ("セミナー感想", display_comment(response)),
    ];

    let table_rows: String = rows
        .iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let stripe = if index % 2 == 0 { TR_ODD } else { "" };
            format!(
                "    <tr{stripe}><td {TD_LABEL}>{label}</td><td {TD_VALUE}>{}</td></tr>\n",
                escape_html(value)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head><meta charset="UTF-8"></head>
<body style="font-family:sans-serif;color:#333;max-width:600px;margin:0 auto;padding:20px;">
  <h2 style="color:#0d6efd;">{SUBJECT}</h2>
  <p>{name} 様</p>
  <p>このたびはアンケートにご回答いただきありがとうございました。<br>
     以下の内容で受け付けました。</p>
  <table style="border-collapse:collapse;width:100%;margin:20px 0;">
{table_rows}  </table>
  <p>今後のセミナーの参考にさせていただきます。<br>引き続きよろしくお願いいたします。</p>
</body>
</html>"#,
        name = escape_html(&response.name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> SurveyResponse {
        SurveyResponse {
            submitted_at: "2024-05-01 10:00:00".to_string(),
            name: "<b>田中</b>".to_string(),
            phone: "03-1234-5678".to_string(),
            email: "tanaka@example.com".to_string(),
            company: "Acme & Co".to_string(),
            position: "CEO".to_string(),
            comment: String::new(),
        }
    }

    fn config() -> EmailConfig {
        EmailConfig {
            smtp_server: "smtp.example.com".to_string(),
            smtp_port: 587,
            username: "survey@example.com".to_string(),
            password: "secret".to_string(),
            from_email: "survey@example.com".to_string(),
        }
    }

    #[test]
    fn test_text_body_lists_values() {
        let body = render_text_body(&response());
        assert!(body.starts_with("<b>田中</b> 様\n"));
        assert!(body.contains("■ 会社名　　　: Acme & Co\n"));
        assert!(body.contains("■ セミナー感想: （なし）\n"));
    }

    #[test]
    fn test_html_body_escapes_user_input() {
        let body = render_html_body(&response());
        assert!(body.contains("&lt;b&gt;田中&lt;/b&gt; 様"));
        assert!(body.contains("Acme &amp; Co"));
        assert!(!body.contains("<b>田中"));
        assert_eq!(body.matches("<tr").count(), 7);
    }

    #[test]
    fn test_comment_shown_when_present() {
        let mut response = response();
        response.comment = "とても良かった".to_string();
        assert!(render_text_body(&response).contains("■ セミナー感想: とても良かった\n"));
    }

    #[test]
    fn test_build_confirmation_addresses_visitor() {
        let service = EmailService::new(config()).unwrap();
        let message = service.build_confirmation(&response()).unwrap();

        let to: Vec<String> = message.envelope().to().iter().map(|a| a.to_string()).collect();
        assert_eq!(to, vec!["tanaka@example.com".to_string()]);
    }

    #[test]
    fn test_invalid_recipient_is_an_error() {
        let service = EmailService::new(config()).unwrap();
        let mut response = response();
        response.email = "not an address".to_string();
        assert!(service.build_confirmation(&response).is_err());
    }
}
